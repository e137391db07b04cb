//! Property tests for translation key derivation

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use translatables::i18n::{Registry, Translation, Values};

const NAMES: [&str; 4] = ["a", "count", "who", "when"];
const LANGUAGES: [&str; 5] = ["root", "en", "de", "de_DE", "de_AT"];

fn category_count(language: &str, domain: &str) -> usize {
    match (language, domain) {
        (_, "plain") | (_, "date") => 1,
        (_, "gender") => 3,
        ("root", "number") => 3,
        (_, "number") => 2,
        _ => unreachable!(),
    }
}

/// A pattern with some placeholders and the domain each distinct name uses
fn pattern_strategy() -> impl Strategy<Value = (String, BTreeMap<&'static str, &'static str>)> {
    let domain = prop::sample::select(vec!["plain", "number", "gender", "date"]);
    prop::collection::btree_map(prop::sample::select(NAMES.to_vec()), domain, 0..4).prop_flat_map(
        |domains| {
            let names: Vec<&'static str> = domains.keys().copied().collect();
            let repeats = if names.is_empty() {
                Just(Vec::new()).boxed()
            } else {
                prop::collection::vec(prop::sample::select(names), 0..3).boxed()
            };
            (Just(domains), repeats).prop_map(|(domains, repeats)| {
                let mut pattern = String::from("Text");
                for name in domains.keys().chain(repeats.iter()) {
                    pattern.push_str(&format!(" {{{}({})}} and", domains[name], name));
                }
                (pattern, domains)
            })
        },
    )
}

proptest! {
    #[test]
    fn prop_key_count_is_product_of_category_counts(
        (pattern, domains) in pattern_strategy(),
        language in prop::sample::select(LANGUAGES.to_vec()),
    ) {
        let languages = Registry::with_defaults().languages();
        let translation = Translation::new(&pattern, language, &languages).unwrap();
        let keys = translation.translation_keys();

        let expected: usize = domains.values().map(|d| category_count(language, d)).product();
        prop_assert_eq!(keys.len(), expected);

        let distinct: BTreeSet<&String> = keys.iter().collect();
        prop_assert_eq!(distinct.len(), keys.len());
    }

    #[test]
    fn prop_key_derivation_is_idempotent(
        (pattern, _domains) in pattern_strategy(),
        language in prop::sample::select(LANGUAGES.to_vec()),
    ) {
        let languages = Registry::with_defaults().languages();
        let first = Translation::new(&pattern, language, &languages).unwrap().translation_keys();
        let second = Translation::new(&pattern, language, &languages).unwrap().translation_keys();
        prop_assert_eq!(
            first.into_iter().collect::<BTreeSet<_>>(),
            second.into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn prop_lookup_key_is_one_of_the_keys(n in 0u32..1000, language in prop::sample::select(LANGUAGES.to_vec())) {
        let languages = Registry::with_defaults().languages();
        let translation = Translation::new("{number(n)} items", language, &languages).unwrap();
        let key = translation.lookup_key(&Values::new().with("n", n)).unwrap();
        prop_assert!(translation.translation_keys().contains(&key));
    }

    #[test]
    fn prop_passthrough_never_fails_for_numbers(n in 0u32..1000) {
        let registry = Registry::with_defaults();
        let text = registry.render("de_AT", "{number(n)} Bäume", &Values::new().with("n", n)).unwrap();
        prop_assert_eq!(text, format!("{} Bäume", n));
    }
}
