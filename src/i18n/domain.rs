//! Value classifiers: domains and their categories.
//!
//! A [`Domain`] is a type of value (numbers, genders, dates, plain text) as a
//! particular language sees it. Its [`Category`] list partitions the values
//! into the groups the language's grammar treats differently. Categories are
//! data, not types: each one is a name plus a predicate closure.

use crate::error::Error;
use crate::i18n::Value;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type Formatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Characters that delimit placeholders and canonical tags.
const RESERVED_CHARS: [char; 4] = ['{', '}', '(', ')'];

/// Covers values that a language treats the same way.
#[derive(Clone)]
pub struct Category {
    name: String,
    predicate: Predicate,
}

impl Category {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// A category accepting every value.
    pub fn catch_all(name: impl Into<String>) -> Self {
        Self::new(name, |_| true)
    }

    /// Name, also the token written into translation keys.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this category covers `value`.
    pub fn represents(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category").field("name", &self.name).finish()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A named value classifier with a formatter.
#[derive(Clone)]
pub struct Domain {
    name: String,
    formatter: Formatter,
    categories: Vec<Category>,
}

impl Domain {
    /// Create a domain.
    ///
    /// Fails with [`Error::InvalidDomain`] when the name is empty or contains
    /// one of `{ } ( )`, or when `categories` is empty.
    pub fn new<F>(name: impl Into<String>, formatter: F, categories: Vec<Category>) -> Result<Self, Error>
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidDomain {
                name,
                reason: "name must not be empty".to_string(),
            });
        }
        if name.contains(RESERVED_CHARS) {
            return Err(Error::InvalidDomain {
                name,
                reason: "name must not contain any of { } ( )".to_string(),
            });
        }
        if categories.is_empty() {
            return Err(Error::InvalidDomain {
                name,
                reason: "at least one category is required".to_string(),
            });
        }
        Ok(Self::from_parts(name, formatter, categories))
    }

    /// Unchecked constructor for the built-in locale tables.
    pub(crate) fn from_parts<F>(name: impl Into<String>, formatter: F, categories: Vec<Category>) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            formatter: Arc::new(formatter),
            categories,
        }
    }

    /// Name used in placeholders, e.g. `number` in `{number(c)}`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The first category, in declaration order, that covers `value`.
    pub fn classify(&self, value: &Value) -> Result<&Category, Error> {
        self.categories
            .iter()
            .find(|category| category.represents(value))
            .ok_or_else(|| Error::DomainMismatch {
                value: value.to_string(),
                domain: self.name.clone(),
                placeholder: None,
            })
    }

    /// Textual representation of `value`. Independent of classification.
    pub fn format(&self, value: &Value) -> String {
        (self.formatter)(value)
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("categories", &self.categories)
            .finish()
    }
}

/// Formats any value with its `Display` text; `Undefined` becomes empty.
pub fn display_formatter(value: &Value) -> String {
    match value {
        Value::Undefined => String::new(),
        other => other.to_string(),
    }
}
