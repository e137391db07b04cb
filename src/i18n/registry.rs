//! Language registry: languages, their catalogs, and render entry points.
//!
//! The registry is read-mostly. Renders take a read lock for the duration of
//! one parse-classify-lookup pass; registrations, domain updates and catalog
//! loads take the write lock, so a render never sees a half-applied update.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use translatables::i18n::{Registry, Values};
//!
//! let registry = Arc::new(Registry::with_defaults());
//! registry
//!     .update_translations("de", [
//!         ("{zero(number(c))} tree", "{c} Bäume"),
//!         ("{one(number(c))} tree", "{c} Baum"),
//!     ])
//!     .unwrap();
//!
//! let t = registry.alias("de");
//! assert_eq!(t("{number(c)} tree", &Values::new().with("c", 5)).unwrap(), "5 Bäume");
//! ```

use crate::catalog::Catalog;
use crate::error::Error;
use crate::i18n::locales::default_languages;
use crate::i18n::{Domain, Language, Languages, MetricsReport, RenderMetrics, Translation, Values};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// What rendering does when no catalog along the chain has the lookup key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Render the source pattern with values substituted
    #[default]
    Passthrough,

    /// Fail with [`Error::TranslationMissing`]
    Strict,
}

#[derive(Debug, Default)]
struct RegistryState {
    languages: Languages,
    catalogs: HashMap<String, Catalog>,
}

impl RegistryState {
    /// The built-in languages, each with an empty catalog.
    fn with_defaults() -> Self {
        let mut state = Self::default();
        for language in default_languages() {
            state.catalogs.insert(language.code().to_string(), Catalog::new());
            state.languages.insert(language);
        }
        state
    }

    fn get_translation(&self, code: &str, key: &str) -> Option<String> {
        let chain = match self.languages.chain(code) {
            Ok(chain) => chain,
            Err(err) => {
                debug!("Cannot walk fallback chain of {}: {}", code, err);
                return None;
            }
        };

        chain.into_iter().find_map(|language| {
            self.catalogs
                .get(language.code())
                .and_then(|catalog| catalog.get(key))
                .map(str::to_string)
        })
    }
}

/// Holds languages and translations.
pub struct Registry {
    state: RwLock<RegistryState>,
    metrics: RenderMetrics,
    mode: RenderMode,
}

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

impl Registry {
    /// An empty registry in passthrough mode.
    pub fn new() -> Self {
        Self::with_mode(RenderMode::default())
    }

    /// An empty registry with the given render mode.
    pub fn with_mode(mode: RenderMode) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            metrics: RenderMetrics::new(),
            mode,
        }
    }

    /// A registry holding the built-in languages.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// The process-wide registry, holding the built-in languages on first use.
    pub fn global() -> Arc<Registry> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Registry::with_defaults())))
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register the built-in languages.
    pub fn register_defaults(&self) {
        for language in default_languages() {
            self.register_language(language);
        }
    }

    /// Drop every language and catalog, reset metrics and re-register the
    /// built-in languages.
    ///
    /// The defaults replace the old state in one write, so concurrent
    /// renders see either the old or the new registry.
    pub fn reset(&self) {
        let fresh = RegistryState::with_defaults();
        *self.write() = fresh;
        self.metrics.reset();
    }

    // ==================== Languages ====================

    /// Add a language, starting an empty catalog for it if it has none.
    ///
    /// Registering an existing code replaces the language but keeps its
    /// catalog.
    pub fn register_language(&self, language: Language) {
        let mut state = self.write();
        let code = language.code().to_string();
        if state.languages.insert(language).is_some() {
            warn!("Language {} registered again, replacing previous definition", code);
        }
        state.catalogs.entry(code).or_default();
    }

    /// A copy of a registered language.
    pub fn language(&self, code: &str) -> Option<Language> {
        self.read().languages.get(code).cloned()
    }

    /// Registered language codes, sorted.
    pub fn language_codes(&self) -> Vec<String> {
        self.read().languages.codes().map(str::to_string).collect()
    }

    /// A snapshot of all languages, e.g. for key extraction.
    pub fn languages(&self) -> Languages {
        self.read().languages.clone()
    }

    /// Register a new language falling back to `parent`.
    pub fn extend_language(&self, parent: &str, code: &str) -> Result<(), Error> {
        let child = self
            .language(parent)
            .ok_or_else(|| Error::UnknownLanguage(parent.to_string()))?
            .extend(code);
        self.register_language(child);
        Ok(())
    }

    /// Add or replace a domain on a registered language.
    ///
    /// # Arguments
    /// * `code` - Registered language code
    /// * `domain` - Domain replacing any local domain of the same name
    ///
    /// # Returns
    /// The registry itself, so updates can be chained
    pub fn update_domain(&self, code: &str, domain: Domain) -> Result<&Self, Error> {
        {
            let mut state = self.write();
            let language = state
                .languages
                .get_mut(code)
                .ok_or_else(|| Error::UnknownLanguage(code.to_string()))?;
            debug!("Updating domain {} on {}", domain.name(), code);
            language.update_domain(domain);
        }
        Ok(self)
    }

    /// Codes of `code` and its ancestors, nearest first.
    pub fn fallback_chain(&self, code: &str) -> Result<Vec<String>, Error> {
        Ok(self
            .read()
            .languages
            .chain(code)?
            .into_iter()
            .map(|language| language.code().to_string())
            .collect())
    }

    // ==================== Catalogs ====================

    /// Merge translations into the catalog of `code`.
    ///
    /// # Arguments
    /// * `code` - Registered language code
    /// * `pairs` - Translation key and translated text pairs
    ///
    /// # Returns
    /// `Error::UnknownLanguage` if `code` is not registered
    pub fn update_translations<I, K, V>(&self, code: &str, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut state = self.write();
        if !state.languages.contains(code) {
            return Err(Error::UnknownLanguage(code.to_string()));
        }
        state.catalogs.entry(code.to_string()).or_default().merge(pairs);
        Ok(())
    }

    /// Stored text for `key`, looked up along the fallback chain.
    ///
    /// Placeholders in the returned text have not been substituted.
    pub fn get_translation(&self, code: &str, key: &str) -> Option<String> {
        self.read().get_translation(code, key)
    }

    /// A copy of the catalog stored for `code` itself.
    pub fn catalog(&self, code: &str) -> Option<Catalog> {
        self.read().catalogs.get(code).cloned()
    }

    // ==================== Translations ====================

    /// Parse `source` against a registered language.
    pub fn translation(&self, code: &str, source: &str) -> Result<Translation, Error> {
        Translation::new(source, code, &self.read().languages)
    }

    /// Every translation key a translator has to fill for `source`.
    pub fn translation_keys(&self, code: &str, source: &str) -> Result<Vec<String>, Error> {
        Ok(self.translation(code, source)?.translation_keys())
    }

    /// Translate `source` into `code` and insert `values`.
    ///
    /// # Arguments
    /// * `code` - Target language code
    /// * `source` - Source pattern as written in application code
    /// * `values` - Value for every placeholder name in `source`
    ///
    /// # Returns
    /// The catalog text for the matching key, or the source pattern with
    /// values inserted when no catalog along the chain has it (passthrough
    /// mode only)
    pub fn render(&self, code: &str, source: &str, values: &Values) -> Result<String, Error> {
        let result = self.render_inner(code, source, values);
        if result.is_err() {
            self.metrics.record_failure();
        }
        result
    }

    fn render_inner(&self, code: &str, source: &str, values: &Values) -> Result<String, Error> {
        let state = self.read();
        if !state.languages.contains(code) {
            return Err(Error::UnknownLanguage(code.to_string()));
        }

        let translation = Translation::new(source, code, &state.languages)?;
        let rendered = translation.render(values, |key| state.get_translation(code, key))?;

        if rendered.translated {
            self.metrics.record_catalog_hit();
            return Ok(rendered.text);
        }

        match self.mode {
            RenderMode::Strict => Err(Error::TranslationMissing(rendered.key)),
            RenderMode::Passthrough => {
                debug!(
                    "No translation for {:?} in {}, passing through {:?}",
                    rendered.key,
                    code,
                    translation.source()
                );
                self.metrics.record_passthrough();
                Ok(rendered.text)
            }
        }
    }

    /// [`Registry::render`] for untyped input, such as a JSON request.
    ///
    /// Fails with [`Error::MalformedSource`] when `source` is not a string
    /// and with [`Error::MalformedValues`] when `values` is neither an object
    /// nor `null`.
    pub fn render_json(
        &self,
        code: &str,
        source: &serde_json::Value,
        values: &serde_json::Value,
    ) -> Result<String, Error> {
        let Some(source) = source.as_str() else {
            self.metrics.record_failure();
            return Err(Error::MalformedSource(source.to_string()));
        };
        let values = match values {
            serde_json::Value::Null => Values::new(),
            other => match Values::from_json(other) {
                Some(values) => values,
                None => {
                    self.metrics.record_failure();
                    return Err(Error::MalformedValues(other.to_string()));
                }
            },
        };
        self.render(code, source, &values)
    }

    /// A render function bound to one language.
    ///
    /// Each call parses the pattern afresh, so domain and catalog updates are
    /// picked up immediately.
    pub fn alias(
        self: &Arc<Self>,
        code: &str,
    ) -> impl Fn(&str, &Values) -> Result<String, Error> + Send + Sync + 'static {
        let registry = Arc::clone(self);
        let code = code.to_string();
        move |source: &str, values: &Values| registry.render(&code, source, values)
    }

    /// Current render counters.
    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
