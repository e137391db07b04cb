//! A source pattern bound to a language.
//!
//! # Translation keys
//!
//! For a pattern like `"{number(c)} tree"` a translator has to supply one text
//! per category the value of `c` may fall into. [`Translation::translation_keys`]
//! enumerates these variants by replacing every placeholder fragment with the
//! canonical tag of each of its domain's categories, e.g. for `de`:
//!
//! ```text
//! {one(number(c))} tree
//! {zero(number(c))} tree
//! ```
//!
//! Rendering classifies the actual values, builds the one key matching them,
//! and fills the translator's text. A fragment used twice in a pattern is one
//! dimension, not two.

use crate::error::Error;
use crate::i18n::{Languages, Placeholder, Value, Values};
use regex::{Captures, Regex};
use std::sync::OnceLock;

static FRAGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn fragment_regex() -> &'static Regex {
    FRAGMENT_REGEX.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("fragment regex is valid"))
}

/// Outcome of rendering a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Final text with values substituted
    pub text: String,

    /// Lookup key derived from the classified values
    pub key: String,

    /// Whether a catalog entry was found; `false` means passthrough output
    pub translated: bool,
}

/// A translatable text.
#[derive(Debug, Clone)]
pub struct Translation {
    source: String,
    language: String,
    /// Distinct fragments (braces included) in order of first occurrence
    placeholders: Vec<(String, Placeholder)>,
}

impl Translation {
    /// Parse every `{...}` fragment in `source` against `language`.
    pub fn new(source: &str, language: &str, languages: &Languages) -> Result<Self, Error> {
        let mut placeholders: Vec<(String, Placeholder)> = Vec::new();

        for captures in fragment_regex().captures_iter(source) {
            let (Some(fragment), Some(raw)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if placeholders.iter().any(|(seen, _)| seen == fragment.as_str()) {
                continue;
            }
            let placeholder = Placeholder::parse(raw.as_str(), language, languages)?;
            placeholders.push((fragment.as_str().to_string(), placeholder));
        }

        Ok(Self {
            source: source.to_string(),
            language: language.to_string(),
            placeholders,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Code of the target language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Distinct placeholders, keyed by their fragment text including braces.
    pub fn placeholders(&self) -> impl Iterator<Item = (&str, &Placeholder)> {
        self.placeholders
            .iter()
            .map(|(fragment, placeholder)| (fragment.as_str(), placeholder))
    }

    /// Every text that needs a translation so that all combinations of
    /// categories are covered.
    ///
    /// The number of keys is the product of the category counts of the
    /// distinct placeholders. Callers must not rely on the order.
    pub fn translation_keys(&self) -> Vec<String> {
        let mut keys = vec![self.source.clone()];

        for (fragment, placeholder) in &self.placeholders {
            let tags: Vec<String> = placeholder
                .domain()
                .categories()
                .iter()
                .map(|category| placeholder.canonical_tag(category.name()))
                .collect();

            keys = keys
                .iter()
                .flat_map(|key| tags.iter().map(move |tag| key.replace(fragment.as_str(), tag)))
                .collect();
        }

        keys
    }

    /// The single translation key matching `values`.
    pub fn lookup_key(&self, values: &Values) -> Result<String, Error> {
        let mut key = self.source.clone();
        for (fragment, placeholder) in &self.placeholders {
            let value = value_for(placeholder, values)?;
            let category = placeholder
                .domain()
                .classify(value)
                .map_err(|err| err.for_placeholder(placeholder.name()))?;
            key = key.replace(fragment.as_str(), &placeholder.canonical_tag(category.name()));
        }
        Ok(key)
    }

    /// Render with values, looking the key up through `lookup`.
    ///
    /// When `lookup` finds nothing the output is the source pattern with each
    /// fragment replaced by its formatted value; a value given as
    /// [`Value::Undefined`] is shown as `{name}` there. This path never fails.
    pub fn render<F>(&self, values: &Values, lookup: F) -> Result<Rendered, Error>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let key = self.lookup_key(values)?;

        match lookup(&key) {
            Some(template) => {
                let text = self.fill_template(&template, values);
                Ok(Rendered {
                    text,
                    key,
                    translated: true,
                })
            }
            None => {
                let text = self.fill_passthrough(values);
                Ok(Rendered {
                    text,
                    key,
                    translated: false,
                })
            }
        }
    }

    /// Substitute `{name}` and canonical tags in a translator's text.
    /// Fragments that reference nothing known are left as they are.
    fn fill_template(&self, template: &str, values: &Values) -> String {
        fragment_regex()
            .replace_all(template, |captures: &Captures| {
                let whole = &captures[0];
                let inner = &captures[1];
                self.placeholders
                    .iter()
                    .find_map(|(_, placeholder)| {
                        let value = values.get(placeholder.name())?;
                        let matches_name = placeholder.name() == inner;
                        let matches_tag = !matches_name
                            && placeholder
                                .domain()
                                .classify(value)
                                .is_ok_and(|c| placeholder.canonical_tag(c.name()) == whole);
                        (matches_name || matches_tag).then(|| placeholder.domain().format(value))
                    })
                    .unwrap_or_else(|| whole.to_string())
            })
            .into_owned()
    }

    fn fill_passthrough(&self, values: &Values) -> String {
        fragment_regex()
            .replace_all(&self.source, |captures: &Captures| {
                let whole = &captures[0];
                self.placeholders
                    .iter()
                    .find(|(fragment, _)| fragment == whole)
                    .map(|(_, placeholder)| match values.get(placeholder.name()) {
                        Some(Value::Undefined) | None => format!("{{{}}}", placeholder.name()),
                        Some(value) => placeholder.domain().format(value),
                    })
                    .unwrap_or_else(|| whole.to_string())
            })
            .into_owned()
    }
}

fn value_for<'a>(placeholder: &Placeholder, values: &'a Values) -> Result<&'a Value, Error> {
    values
        .get(placeholder.name())
        .ok_or_else(|| Error::MissingValue(placeholder.name().to_string()))
}
