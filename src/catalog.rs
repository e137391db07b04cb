//! Catalogs: translation key → translated text, and their files.
//!
//! A catalog file is `<folder>/<code>.json` holding one JSON object. Keys
//! whose translation is still an empty string are work left for the
//! translator.

use crate::i18n::Registry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Translations of one language, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translated text for `key`; an empty string means not yet translated.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Set the text of `key`, returning the text it replaced.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), text.into())
    }

    /// Overwrite or add every pair; keys not in `pairs` are kept.
    pub fn merge<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, text) in pairs {
            self.entries.insert(key.into(), text.into());
        }
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.entries.retain(|key, text| keep(key, text));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys still waiting for a translation.
    pub fn untranslated(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, text)| text.is_empty()).map(|(key, _)| key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        catalog.merge(iter);
        catalog
    }
}

impl IntoIterator for Catalog {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Path of the catalog file for `code` inside `folder`.
pub fn catalog_path(folder: &Path, code: &str) -> PathBuf {
    folder.join(format!("{}.json", code))
}

/// Read the catalog for `code`. A missing file is an empty catalog.
pub fn load_catalog(folder: &Path, code: &str) -> Result<Catalog> {
    let path = catalog_path(folder, code);
    if !path.exists() {
        debug!("No catalog at {}, starting empty", path.display());
        return Ok(Catalog::new());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

    debug!("Loaded {} entries from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Write the catalog for `code`, tab-indented, creating `folder` if needed.
pub fn save_catalog(folder: &Path, code: &str, catalog: &Catalog) -> Result<PathBuf> {
    fs::create_dir_all(folder)
        .with_context(|| format!("Failed to create catalog folder {}", folder.display()))?;

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    catalog
        .serialize(&mut serializer)
        .context("Failed to serialize catalog")?;

    let path = catalog_path(folder, code);
    fs::write(&path, buffer).with_context(|| format!("Failed to write catalog {}", path.display()))?;

    info!("Wrote {} entries to {}", catalog.len(), path.display());
    Ok(path)
}

/// Load the catalogs of `code` and all of its ancestors into `registry`.
///
/// Returns the number of entries loaded.
pub fn load_chain(registry: &Registry, folder: &Path, code: &str) -> Result<usize> {
    let mut loaded = 0;
    for language in registry.fallback_chain(code)? {
        let catalog = load_catalog(folder, &language)?;
        loaded += catalog.len();
        registry.update_translations(&language, catalog)?;
    }
    Ok(loaded)
}
