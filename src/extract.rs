//! Translation key extraction.
//!
//! Scans a codebase for calls to the alias function, e.g.
//!
//! ```text
//! t("Hello {name}, it's you.", values)
//! t('{number(count)} apples.', values)
//! ```
//!
//! derives the translation keys of every pattern found, and merges them into
//! a catalog so translators see exactly which variants still need text.

use crate::catalog::Catalog;
use crate::i18n::{Languages, Translation};
use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

static ESCAPE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Finds string literals passed as first argument to the alias function.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    pattern: Regex,
}

impl SourceScanner {
    /// Scanner for calls to `alias`.
    pub fn new(alias: &str) -> Result<Self> {
        // `\b` only applies when the alias starts with a word character
        let boundary = match alias.chars().next() {
            Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
            _ => "",
        };
        let pattern = format!(
            r#"{}{}\s*\(\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#,
            boundary,
            regex::escape(alias)
        );
        let pattern = Regex::new(&pattern)
            .with_context(|| format!("Failed to build scanner for alias '{}'", alias))?;
        Ok(Self { pattern })
    }

    /// Source patterns in `content`, escapes removed.
    pub fn scan(&self, content: &str) -> Vec<String> {
        let escape = ESCAPE_REGEX.get_or_init(|| Regex::new(r"\\(.)").expect("escape regex is valid"));

        self.pattern
            .captures_iter(content)
            .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
            .map(|literal| escape.replace_all(literal.as_str(), "$1").into_owned())
            .collect()
    }

    /// Source patterns in a file, or in every file below a directory.
    ///
    /// Files that cannot be read as UTF-8 text are skipped.
    pub fn scan_path(&self, path: &Path) -> Result<BTreeSet<String>> {
        let mut patterns = BTreeSet::new();
        self.scan_into(path, &mut patterns)?;
        Ok(patterns)
    }

    fn scan_into(&self, path: &Path, patterns: &mut BTreeSet<String>) -> Result<()> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;

        if metadata.is_dir() {
            let mut entries: Vec<_> = fs::read_dir(path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .collect::<std::io::Result<_>>()
                .with_context(|| format!("Failed to list directory {}", path.display()))?;
            entries.sort_by_key(|entry| entry.path());
            for entry in entries {
                self.scan_into(&entry.path(), patterns)?;
            }
            return Ok(());
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                let found = self.scan(&content);
                debug!("Found {} patterns in {}", found.len(), path.display());
                patterns.extend(found);
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
        Ok(())
    }
}

/// What to drop from the catalog after merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Remove keys no pattern in the codebase derives any more
    pub discard_unused: bool,

    /// Remove keys whose translation is empty
    pub discard_empty: bool,
}

/// A pattern whose placeholders could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedPattern {
    pub pattern: String,
    pub reason: String,
}

/// Outcome of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Distinct source patterns found
    pub patterns: usize,

    /// Distinct translation keys derived from them
    pub keys: usize,

    /// Keys newly added with an empty translation
    pub added: Vec<String>,

    /// Keys removed by the discard options
    pub discarded: Vec<String>,

    /// Keys in the catalog that still have no translation
    pub untranslated: Vec<String>,

    pub rejected: Vec<RejectedPattern>,
}

/// Merge the keys of `patterns` for language `code` into `catalog`.
pub fn merge_patterns<I, S>(
    patterns: I,
    languages: &Languages,
    code: &str,
    catalog: &mut Catalog,
    options: ExtractOptions,
) -> ExtractionReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ExtractionReport::default();
    let mut present = BTreeSet::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        report.patterns += 1;
        match Translation::new(pattern, code, languages) {
            Ok(translation) => present.extend(translation.translation_keys()),
            Err(e) => {
                warn!("Rejected pattern {:?}: {}", pattern, e);
                report.rejected.push(RejectedPattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }
    report.keys = present.len();

    for key in &present {
        if !catalog.contains(key) {
            catalog.insert(key.as_str(), "");
            report.added.push(key.clone());
        }
    }

    let mut discarded = Vec::new();
    catalog.retain(|key, text| {
        let unused = options.discard_unused && !present.contains(key);
        let empty = options.discard_empty && text.is_empty();
        if unused || empty {
            discarded.push(key.to_string());
        }
        !(unused || empty)
    });
    report.discarded = discarded;
    report.untranslated = catalog.untranslated().map(str::to_string).collect();

    report
}

/// Scan `codebase` and merge the derived keys into `catalog`.
pub fn extract(
    scanner: &SourceScanner,
    codebase: &Path,
    languages: &Languages,
    code: &str,
    catalog: &mut Catalog,
    options: ExtractOptions,
) -> Result<ExtractionReport> {
    let patterns = scanner.scan_path(codebase)?;
    info!("Found {} source patterns in {}", patterns.len(), codebase.display());

    let report = merge_patterns(&patterns, languages, code, catalog, options);
    info!(
        "Derived {} keys: {} added, {} discarded, {} untranslated",
        report.keys,
        report.added.len(),
        report.discarded.len(),
        report.untranslated.len()
    );
    Ok(report)
}
