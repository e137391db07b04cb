//! Catalog entry validation.
//!
//! Checks a translator's text against the translation key it belongs to: the
//! text may only insert values the key has placeholders for, and braces have
//! to pair up.

use crate::catalog::Catalog;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that break rendering
    pub errors: Vec<String>,

    /// Suspicious but renderable entries
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn absorb(&mut self, key: &str, other: ValidationReport) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{:?}: {}", key, e)));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("{:?}: {}", key, w)));
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog entries.
pub struct CatalogValidator;

// Cached for performance
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static FRAGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Validate one translated text against its translation key.
    ///
    /// # Arguments
    /// * `key` - Translation key with canonical tags
    /// * `text` - The translator's text for that key
    ///
    /// # Returns
    /// A report with these findings:
    /// - error: braces in the text do not pair up
    /// - warning: the text inserts a `{name}` the key has no placeholder for
    /// - warning: a placeholder of the key is never inserted
    pub fn validate(key: &str, text: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !braces_balanced(text) {
            report
                .errors
                .push("Unbalanced braces in translation".to_string());
            return report;
        }

        let key_names = Self::key_placeholder_names(key);
        let used_names = Self::text_placeholder_names(text);

        let unknown: Vec<_> = used_names.difference(&key_names).collect();
        if !unknown.is_empty() {
            report.warnings.push(format!(
                "Translation inserts values the key does not provide: {:?}",
                unknown
            ));
        }

        let unused: Vec<_> = key_names.difference(&used_names).collect();
        if !unused.is_empty() {
            report.warnings.push(format!(
                "Translation never inserts placeholders of the key: {:?}",
                unused
            ));
        }

        report
    }

    /// Validate every translated entry of a catalog. Untranslated (empty)
    /// entries are skipped.
    pub fn validate_catalog(catalog: &Catalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        for (key, text) in catalog.iter().filter(|(_, text)| !text.is_empty()) {
            report.absorb(key, Self::validate(key, text));
        }
        report
    }

    /// Names inside canonical tags `{category(domain(name))}` of a key
    fn key_placeholder_names(key: &str) -> BTreeSet<String> {
        let regex = TAG_REGEX.get_or_init(|| {
            Regex::new(r"\{[^{}()]+\([^{}()]+\(([^{}()]+)\)\)\}").expect("tag regex is valid")
        });

        regex
            .captures_iter(key)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    /// Names a translated text inserts, either bare `{name}` or as a tag
    fn text_placeholder_names(text: &str) -> BTreeSet<String> {
        let regex =
            FRAGMENT_REGEX.get_or_init(|| Regex::new(r"\{([^{}()]+)\}").expect("fragment regex is valid"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .chain(Self::key_placeholder_names(text))
            .collect()
    }
}

fn braces_balanced(text: &str) -> bool {
    let mut open = false;
    for c in text.chars() {
        match c {
            '{' if open => return false,
            '{' => open = true,
            '}' if !open => return false,
            '}' => open = false,
            _ => {}
        }
    }
    !open
}
