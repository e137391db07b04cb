//! Placeholder fragments inside source patterns.
//!
//! A fragment is the text between one pair of braces: either a bare value
//! name (`{count}`, implicitly the `plain` domain) or a domain applied to a
//! name (`{number(count)}`).

use crate::error::Error;
use crate::i18n::{Domain, Languages};
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// Domain assumed when a fragment names none.
pub const PLAIN_DOMAIN: &str = "plain";

static DOMAIN_FRAGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

/// A text fragment that is replaced with a value.
#[derive(Debug, Clone)]
pub struct Placeholder {
    name: String,
    domain: Arc<Domain>,
}

impl Placeholder {
    /// Parse `raw` (braces excluded) and resolve its domain for `language`.
    pub fn parse(raw: &str, language: &str, languages: &Languages) -> Result<Self, Error> {
        let (domain_name, name) = split_fragment(raw)?;
        if name.is_empty() {
            return Err(Error::MalformedPlaceholder {
                raw: raw.to_string(),
                reason: "placeholder name is empty".to_string(),
            });
        }

        let domain = languages.resolve_domain(language, domain_name)?;
        Ok(Self {
            name: name.to_string(),
            domain,
        })
    }

    /// Key into the values mapping.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The tag standing for this placeholder in a translation key once its
    /// category is known: `{category(domain(name))}`.
    pub fn canonical_tag(&self, category: &str) -> String {
        format!("{{{}({}({}))}}", category, self.domain.name(), self.name)
    }
}

/// Split a fragment into `(domain, name)`.
fn split_fragment(raw: &str) -> Result<(&str, &str), Error> {
    if !raw.contains(['(', ')']) {
        return Ok((PLAIN_DOMAIN, raw));
    }

    let regex = DOMAIN_FRAGMENT_REGEX
        .get_or_init(|| Regex::new(r"^([^(){}]+)\(([^(){}]*)\)$").expect("fragment regex is valid"));

    let captures = regex
        .captures(raw)
        .ok_or_else(|| Error::MalformedPlaceholder {
            raw: raw.to_string(),
            reason: "expected `name` or `domain(name)`".to_string(),
        })?;

    match (captures.get(1), captures.get(2)) {
        (Some(domain), Some(name)) => Ok((domain.as_str(), name.as_str())),
        _ => Err(Error::MalformedPlaceholder {
            raw: raw.to_string(),
            reason: "expected `name` or `domain(name)`".to_string(),
        }),
    }
}
