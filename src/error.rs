//! Errors raised by the localization engine.
//!
//! "Translation not found" is not an error in the default render mode; see
//! [`crate::i18n::RenderMode`].

use thiserror::Error;

/// Errors surfaced synchronously by parsing, classification and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The pattern handed to a dynamic entry point was not text.
    #[error("Source keys need to be text but got: {0}")]
    MalformedSource(String),

    /// The values handed to a dynamic entry point were neither an object
    /// nor absent.
    #[error("Values need to be an object but got: {0}")]
    MalformedValues(String),

    /// A placeholder fragment had an empty name or broken domain syntax.
    #[error("Malformed placeholder {{{raw}}}: {reason}")]
    MalformedPlaceholder { raw: String, reason: String },

    /// No language along the fallback chain defines the domain.
    #[error("{domain} is not a known domain for language {language}")]
    UnsupportedDomain { domain: String, language: String },

    /// No category of the domain accepts the value.
    #[error("{}", describe_mismatch(.value, .domain, .placeholder.as_deref()))]
    DomainMismatch {
        value: String,
        domain: String,
        placeholder: Option<String>,
    },

    /// The values mapping has no entry for a placeholder name.
    #[error("No value given for placeholder: {0}")]
    MissingValue(String),

    /// The locale has not been registered.
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),

    /// A domain definition violates its invariants.
    #[error("Invalid domain '{name}': {reason}")]
    InvalidDomain { name: String, reason: String },

    /// The fallback chain is longer than the walk allows, which means it loops.
    #[error("Fallback chain of language {code} exceeds {limit} languages")]
    FallbackCycle { code: String, limit: usize },

    /// Strict render mode only: no catalog along the chain has the key.
    #[error("Translation for pattern missing: {0}")]
    TranslationMissing(String),
}

fn describe_mismatch(value: &str, domain: &str, placeholder: Option<&str>) -> String {
    match placeholder {
        Some(name) => format!(
            "Cannot substitute placeholder {}: {} is not covered by domain {}",
            name, value, domain
        ),
        None => format!("{} is not covered by domain {}", value, domain),
    }
}

impl Error {
    /// Attach the placeholder name to a [`Error::DomainMismatch`].
    ///
    /// Other variants pass through unchanged.
    pub fn for_placeholder(self, name: &str) -> Self {
        match self {
            Error::DomainMismatch { value, domain, .. } => Error::DomainMismatch {
                value,
                domain,
                placeholder: Some(name.to_string()),
            },
            other => other,
        }
    }
}
