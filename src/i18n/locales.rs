//! Built-in languages.
//!
//! `root` holds the domains every language needs; the others only state how
//! they differ from their fallback. Applications extend these with their own
//! languages and domains through [`crate::i18n::Registry`].

use crate::i18n::domain::display_formatter;
use crate::i18n::{Category, Domain, Language, Value};

/// Code of the language every built-in language falls back to.
pub const ROOT: &str = "root";

/// Default languages, parents before children.
pub fn default_languages() -> Vec<Language> {
    let root = root();
    let en = english(&root);
    let de = german(&root);
    let de_de = de.extend("de_DE");
    let de_at = de.extend("de_AT");
    vec![root, en, de, de_de, de_at]
}

fn root() -> Language {
    Language::new(ROOT)
        .with_domain(plain())
        .with_domain(Domain::from_parts(
            "number",
            display_formatter,
            vec![
                Category::new("zero", |v| v.as_number() == Some(0.0)),
                Category::new("one", |v| v.as_number() == Some(1.0)),
                Category::new("other", |v| number(v).is_some()),
            ],
        ))
        .with_domain(gender(display_formatter))
        .with_domain(date("%Y-%m-%d"))
}

fn english(root: &Language) -> Language {
    root.extend("en").with_domain(singular_plural())
}

fn german(root: &Language) -> Language {
    root.extend("de")
        .with_domain(singular_plural())
        .with_domain(gender(|value| {
            match value.as_text() {
                Some("male") => "männlich",
                Some("female") => "weiblich",
                _ => "unbestimmt",
            }
            .to_string()
        }))
        .with_domain(date("%d.%m.%Y"))
}

/// `one` for exactly 1, `zero` for every other number. English and German
/// inflect 0 like any plural count.
fn singular_plural() -> Domain {
    Domain::from_parts(
        "number",
        display_formatter,
        vec![
            Category::new("one", |v| v.as_number() == Some(1.0)),
            Category::new("zero", |v| number(v).is_some()),
        ],
    )
}

/// Numeric value of `value`, NaN excluded.
fn number(value: &Value) -> Option<f64> {
    value.as_number().filter(|n| !n.is_nan())
}

fn plain() -> Domain {
    Domain::from_parts("plain", display_formatter, vec![Category::catch_all("plain")])
}

fn gender<F>(formatter: F) -> Domain
where
    F: Fn(&Value) -> String + Send + Sync + 'static,
{
    Domain::from_parts(
        "gender",
        formatter,
        vec![
            Category::new("male", |v| v.as_text() == Some("male")),
            Category::new("female", |v| v.as_text() == Some("female")),
            Category::catch_all("unknown"),
        ],
    )
}

fn date(pattern: &'static str) -> Domain {
    Domain::from_parts(
        "date",
        move |value: &Value| match value.as_date() {
            Some(date) => date.format(pattern).to_string(),
            None => display_formatter(value),
        },
        vec![Category::new("date", |v| v.as_date().is_some())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Languages, Translation};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn languages() -> Languages {
        default_languages().into_iter().collect()
    }

    fn category(languages: &Languages, code: &str, domain: &str, value: Value) -> String {
        languages
            .resolve_domain(code, domain)
            .unwrap()
            .classify(&value)
            .unwrap()
            .name()
            .to_string()
    }

    #[test]
    fn test_root_language_exists() {
        let languages = languages();
        assert!(languages.get(ROOT).is_some());
        assert_eq!(languages.get(ROOT).unwrap().fallback(), None);
    }

    #[test]
    fn test_core_domains_supported() {
        let languages = languages();
        assert_eq!(category(&languages, ROOT, "number", Value::from(0)), "zero");
        assert_eq!(category(&languages, ROOT, "number", Value::from(1)), "one");
        assert_eq!(category(&languages, ROOT, "number", Value::from(2)), "other");
        assert_eq!(category(&languages, ROOT, "plain", Value::from("some value")), "plain");
    }

    #[test]
    fn test_english_number_categories() {
        let languages = languages();
        assert_eq!(category(&languages, "en", "number", Value::from(1)), "one");
        assert_eq!(category(&languages, "en", "number", Value::from(0)), "zero");
        assert_eq!(category(&languages, "en", "number", Value::from(7)), "zero");
    }

    #[test]
    fn test_german_groups_zero_with_plurals() {
        let languages = languages();
        assert_eq!(category(&languages, "de", "number", Value::from(0)), "zero");
        assert_eq!(category(&languages, "de", "number", Value::from(1)), "one");
        assert_eq!(category(&languages, "de", "number", Value::from(5)), "zero");
    }

    #[test]
    fn test_regional_german_inherits() {
        let languages = languages();
        for code in ["de_DE", "de_AT"] {
            assert_eq!(languages.get(code).unwrap().domains().count(), 0);
            assert_eq!(category(&languages, code, "gender", Value::from("female")), "female");
        }
    }

    #[test]
    fn test_gender_formatting() {
        let languages = languages();
        let de = languages.resolve_domain("de_DE", "gender").unwrap();
        assert_eq!(de.format(&Value::from("male")), "männlich");
        assert_eq!(de.format(&Value::from("x")), "unbestimmt");
        let root = languages.resolve_domain(ROOT, "gender").unwrap();
        assert_eq!(root.format(&Value::from("female")), "female");
        assert_eq!(category(&languages, ROOT, "gender", Value::Undefined), "unknown");
    }

    #[test]
    fn test_date_formatting() {
        let languages = languages();
        let date = Value::from(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let de = languages.resolve_domain("de", "date").unwrap();
        let root = languages.resolve_domain(ROOT, "date").unwrap();
        assert_eq!(de.format(&date), "09.03.2024");
        assert_eq!(root.format(&date), "2024-03-09");
        assert_eq!(de.format(&Value::from("2024-12-24")), "24.12.2024");
    }

    #[test]
    fn test_english_tree_keys() {
        let languages = languages();
        let keys: BTreeSet<String> = Translation::new("{number(c)} tree", "en", &languages)
            .unwrap()
            .translation_keys()
            .into_iter()
            .collect();
        let expected: BTreeSet<String> = ["{zero(number(c))} tree", "{one(number(c))} tree"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_number_rejects_nan() {
        let languages = languages();
        for code in [ROOT, "en", "de"] {
            let number = languages.resolve_domain(code, "number").unwrap();
            assert!(number.classify(&Value::from(f64::NAN)).is_err(), "{code}");
        }
    }

    #[test]
    fn test_number_rejects_text() {
        let languages = languages();
        let number = languages.resolve_domain("de", "number").unwrap();
        assert!(number.classify(&Value::from("five")).is_err());
    }
}
