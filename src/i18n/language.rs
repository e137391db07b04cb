//! Languages and fallback resolution.
//!
//! A [`Language`] owns the domains it defines itself and names at most one
//! fallback language by code. Anything a language does not define is looked
//! up along the fallback chain, so `de_AT` only has to say what differs from
//! `de`, which in turn only says what differs from `root`.
//!
//! The chain is resolved through [`Languages`], the set of registered
//! languages. Parents are referenced by code rather than owned, so updating a
//! parent's domains is immediately visible to every child.

use crate::error::Error;
use crate::i18n::Domain;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Longest fallback chain accepted before it is treated as a loop.
pub const MAX_FALLBACK_DEPTH: usize = 32;

/// Encapsulates what is dependent on a culture.
#[derive(Debug, Clone)]
pub struct Language {
    /// Locale identifier as in UTS #35 (e.g. "de_AT")
    code: String,

    /// Code of the language consulted when something is missing locally
    fallback: Option<String>,

    /// Locally defined domains in insertion order
    domains: Vec<Arc<Domain>>,
}

impl Language {
    /// A root language: no fallback, no domains.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            fallback: None,
            domains: Vec::new(),
        }
    }

    /// A new language falling back to `self`, with no local domains.
    pub fn extend(&self, code: impl Into<String>) -> Language {
        Language {
            code: code.into(),
            fallback: Some(self.code.clone()),
            domains: Vec::new(),
        }
    }

    /// Locale identifier, e.g. `de_AT`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Code of the parent language; `None` for a root.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Add a domain, or replace the local one with the same name in place.
    ///
    /// Returns `self` so calls can be chained.
    pub fn update_domain(&mut self, domain: Domain) -> &mut Self {
        let domain = Arc::new(domain);
        match self
            .domains
            .iter_mut()
            .find(|existing| existing.name() == domain.name())
        {
            Some(slot) => *slot = domain,
            None => self.domains.push(domain),
        }
        self
    }

    /// Builder-style [`Language::update_domain`].
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.update_domain(domain);
        self
    }

    /// A domain defined on this language itself, ignoring the fallback.
    pub fn local_domain(&self, name: &str) -> Option<&Arc<Domain>> {
        self.domains.iter().find(|domain| domain.name() == name)
    }

    /// Locally defined domains.
    pub fn domains(&self) -> impl Iterator<Item = &Arc<Domain>> {
        self.domains.iter()
    }
}

/// The set of known languages, keyed by code.
#[derive(Debug, Clone, Default)]
pub struct Languages {
    by_code: BTreeMap<String, Language>,
}

impl Languages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a language, returning the one it replaced.
    pub fn insert(&mut self, language: Language) -> Option<Language> {
        self.by_code.insert(language.code.clone(), language)
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.by_code.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Language> {
        self.by_code.get_mut(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Registered codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.by_code.keys().map(String::as_str)
    }

    /// The language itself followed by its ancestors, nearest first.
    ///
    /// A fallback code that is not registered ends the chain. Chains longer
    /// than [`MAX_FALLBACK_DEPTH`] are reported as [`Error::FallbackCycle`].
    pub fn chain(&self, code: &str) -> Result<Vec<&Language>, Error> {
        let mut language = self
            .get(code)
            .ok_or_else(|| Error::UnknownLanguage(code.to_string()))?;
        let mut chain = vec![language];

        while let Some(parent) = language.fallback() {
            let Some(next) = self.get(parent) else {
                debug!(code, parent, "Fallback language is not registered, ending chain");
                break;
            };
            if chain.len() >= MAX_FALLBACK_DEPTH {
                return Err(Error::FallbackCycle {
                    code: code.to_string(),
                    limit: MAX_FALLBACK_DEPTH,
                });
            }
            chain.push(next);
            language = next;
        }

        Ok(chain)
    }

    /// Resolve a domain for a language: local domains first, then each
    /// ancestor in turn.
    pub fn resolve_domain(&self, code: &str, name: &str) -> Result<Arc<Domain>, Error> {
        self.chain(code)?
            .into_iter()
            .find_map(|language| language.local_domain(name))
            .cloned()
            .ok_or_else(|| Error::UnsupportedDomain {
                domain: name.to_string(),
                language: code.to_string(),
            })
    }
}

impl FromIterator<Language> for Languages {
    fn from_iter<I: IntoIterator<Item = Language>>(iter: I) -> Self {
        let mut languages = Languages::new();
        for language in iter {
            languages.insert(language);
        }
        languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::domain::display_formatter;
    use crate::i18n::Category;

    fn domain(name: &str, category: &str) -> Domain {
        Domain::new(name, display_formatter, vec![Category::catch_all(category)]).unwrap()
    }

    fn family() -> Languages {
        let root = Language::new("root")
            .with_domain(domain("plain", "plain"))
            .with_domain(domain("gender", "unknown"));
        let de = root.extend("de").with_domain(domain("number", "zero"));
        let de_de = de.extend("de_DE");
        [root, de, de_de].into_iter().collect()
    }

    // ==================== Language Tests ====================

    #[test]
    fn test_extend_sets_fallback_and_starts_empty() {
        let root = Language::new("root").with_domain(domain("plain", "plain"));
        let child = root.extend("mylang");

        assert_eq!(child.code(), "mylang");
        assert_eq!(child.fallback(), Some("root"));
        assert_eq!(child.domains().count(), 0);
    }

    #[test]
    fn test_update_domain_replaces_by_name() {
        let mut language = Language::new("x");
        language
            .update_domain(domain("plain", "first"))
            .update_domain(domain("number", "n"))
            .update_domain(domain("plain", "second"));

        assert_eq!(language.domains().count(), 2);
        let plain = language.local_domain("plain").unwrap();
        assert_eq!(plain.categories()[0].name(), "second");
        // Replacement keeps the original position
        assert_eq!(language.domains().next().unwrap().name(), "plain");
    }

    #[test]
    fn test_update_domain_returns_same_language() {
        let mut language = Language::new("x");
        let ptr: *const Language = &language;
        let returned = language.update_domain(domain("plain", "plain"));
        assert!(std::ptr::eq(ptr, returned));
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_chain_nearest_first() {
        let languages = family();
        let codes: Vec<_> = languages
            .chain("de_DE")
            .unwrap()
            .iter()
            .map(|l| l.code())
            .collect();
        assert_eq!(codes, vec!["de_DE", "de", "root"]);
    }

    #[test]
    fn test_resolve_domain_through_ancestors() {
        let languages = family();
        let gender = languages.resolve_domain("de_DE", "gender").unwrap();
        assert_eq!(gender.categories()[0].name(), "unknown");
        let number = languages.resolve_domain("de_DE", "number").unwrap();
        assert_eq!(number.categories()[0].name(), "zero");
    }

    #[test]
    fn test_local_override_shadows_only_child() {
        let mut languages = family();
        languages
            .get_mut("de_DE")
            .unwrap()
            .update_domain(domain("gender", "overridden"));

        let child = languages.resolve_domain("de_DE", "gender").unwrap();
        let parent = languages.resolve_domain("de", "gender").unwrap();
        assert_eq!(child.categories()[0].name(), "overridden");
        assert_eq!(parent.categories()[0].name(), "unknown");
    }

    #[test]
    fn test_parent_update_visible_to_child() {
        let mut languages = family();
        languages
            .get_mut("root")
            .unwrap()
            .update_domain(domain("date", "date"));

        assert!(languages.resolve_domain("de_DE", "date").is_ok());
    }

    #[test]
    fn test_resolve_unknown_domain() {
        let languages = family();
        let err = languages.resolve_domain("de_DE", "color").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedDomain {
                domain: "color".to_string(),
                language: "de_DE".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_unknown_language() {
        let languages = family();
        let err = languages.resolve_domain("fr", "plain").unwrap_err();
        assert_eq!(err, Error::UnknownLanguage("fr".to_string()));
    }

    #[test]
    fn test_chain_detects_cycle() {
        let a = Language::new("b").extend("a");
        let b = a.extend("b");
        let languages: Languages = [a, b].into_iter().collect();

        let err = languages.chain("a").unwrap_err();
        assert!(matches!(err, Error::FallbackCycle { limit, .. } if limit == MAX_FALLBACK_DEPTH));
    }

    #[test]
    fn test_chain_stops_at_unregistered_parent() {
        let orphan = Language::new("gone").extend("orphan");
        let languages: Languages = [orphan].into_iter().collect();
        assert_eq!(languages.chain("orphan").unwrap().len(), 1);
    }
}
