use crate::i18n::RenderMode;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Catalogs
    pub language_folder: PathBuf,
    pub language: Option<String>,

    // Extraction
    pub alias: String,

    // Rendering
    pub render_mode: RenderMode,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            language_folder: lookup("TRANSLATABLES_LANGUAGE_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./")),
            language: lookup("TRANSLATABLES_LANGUAGE").filter(|code| !code.is_empty()),

            alias: lookup("TRANSLATABLES_ALIAS")
                .filter(|alias| !alias.is_empty())
                .unwrap_or_else(|| "t".to_string()),

            render_mode: match lookup("TRANSLATABLES_STRICT").as_deref() {
                Some("1") | Some("true") => RenderMode::Strict,
                _ => RenderMode::Passthrough,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.language_folder, PathBuf::from("./"));
        assert_eq!(config.language, None);
        assert_eq!(config.alias, "t");
        assert_eq!(config.render_mode, RenderMode::Passthrough);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TRANSLATABLES_LANGUAGE_FOLDER", "locales"),
            ("TRANSLATABLES_LANGUAGE", "de_AT"),
            ("TRANSLATABLES_ALIAS", "tr"),
            ("TRANSLATABLES_STRICT", "true"),
        ]);
        assert_eq!(config.language_folder, PathBuf::from("locales"));
        assert_eq!(config.language.as_deref(), Some("de_AT"));
        assert_eq!(config.alias, "tr");
        assert_eq!(config.render_mode, RenderMode::Strict);
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = config_from(&[
            ("TRANSLATABLES_LANGUAGE", ""),
            ("TRANSLATABLES_ALIAS", ""),
            ("TRANSLATABLES_STRICT", "no"),
        ]);
        assert_eq!(config.language, None);
        assert_eq!(config.alias, "t");
        assert_eq!(config.render_mode, RenderMode::Passthrough);
    }
}
