use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use translatables::catalog::{load_catalog, load_chain, save_catalog};
use translatables::config::Config;
use translatables::extract::{extract, ExtractOptions, SourceScanner};
use translatables::i18n::{CatalogValidator, Registry, RenderMode, Values};

/// Derive translation keys from source patterns and render translations.
#[derive(Parser, Debug)]
#[command(name = "translatables")]
#[command(version, about)]
struct Cli {
    /// Locale to work on [env: TRANSLATABLES_LANGUAGE]
    #[arg(long, global = true, value_name = "LANGUAGE CODE")]
    language: Option<String>,

    /// Folder holding the catalogs [env: TRANSLATABLES_LANGUAGE_FOLDER, default: ./]
    #[arg(long, global = true, value_name = "PATH")]
    language_folder: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a codebase and create or update the catalog of a language.
    Extract {
        /// Root of program code (file or directory) to parse
        #[arg(long, value_name = "PATH")]
        codebase: PathBuf,

        /// Name of the function used in the codebase to translate [env: TRANSLATABLES_ALIAS, default: t]
        #[arg(long, value_name = "NAME")]
        alias: Option<String>,

        /// Delete translations no longer used
        #[arg(long)]
        discard_unused: bool,

        /// Delete translation keys that point to empty translations
        #[arg(long)]
        discard_empty: bool,
    },

    /// Print the translation keys of a source pattern.
    Keys {
        /// Source pattern, e.g. "{number(c)} tree"
        pattern: String,
    },

    /// Render a source pattern with the catalogs in the language folder.
    Render {
        /// Source pattern, e.g. "{number(c)} tree"
        pattern: String,

        /// Values as a JSON object, e.g. '{"c": 5}'
        #[arg(long, default_value = "{}")]
        values: String,

        /// Fail instead of passing the pattern through when no translation exists
        #[arg(long)]
        strict: bool,
    },

    /// Validate the translations in a catalog.
    Check,
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translatables=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let language = cli
        .language
        .or(config.language.clone())
        .context("No language given. Use --language or set TRANSLATABLES_LANGUAGE")?;
    let folder = cli
        .language_folder
        .unwrap_or_else(|| config.language_folder.clone());

    match cli.command {
        Command::Extract {
            codebase,
            alias,
            discard_unused,
            discard_empty,
        } => {
            let alias = alias.unwrap_or_else(|| config.alias.clone());
            info!("Extracting {} keys from {} (alias: {})", language, codebase.display(), alias);

            let registry = Registry::with_defaults();
            let languages = registry.languages();
            if !languages.contains(&language) {
                bail!("Unknown language code: '{}'", language);
            }

            let scanner = SourceScanner::new(&alias)?;
            let mut catalog = load_catalog(&folder, &language)?;
            let options = ExtractOptions {
                discard_unused,
                discard_empty,
            };
            let report = extract(&scanner, &codebase, &languages, &language, &mut catalog, options)?;
            save_catalog(&folder, &language, &catalog)?;

            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Command::Keys { pattern } => {
            let registry = Registry::with_defaults();
            for key in registry.translation_keys(&language, &pattern)? {
                println!("{}", key);
            }
        }

        Command::Render {
            pattern,
            values,
            strict,
        } => {
            let mode = if strict {
                RenderMode::Strict
            } else {
                config.render_mode
            };
            let registry = Registry::with_mode(mode);
            registry.register_defaults();
            debug!("Rendering in {:?} mode", registry.mode());

            let loaded = load_chain(&registry, &folder, &language)?;
            info!("Loaded {} catalog entries for {}", loaded, language);

            let values: serde_json::Value =
                serde_json::from_str(&values).context("Failed to parse --values as JSON")?;
            let values = Values::from_json(&values).context("--values must be a JSON object")?;

            println!("{}", registry.render(&language, &pattern, &values)?);

            let metrics = registry.metrics();
            if metrics.passthrough_renders > 0 {
                warn!("No translation found, rendered the pattern itself");
            }
        }

        Command::Check => {
            let catalog = load_catalog(&folder, &language)?;
            let report = CatalogValidator::validate_catalog(&catalog);
            let untranslated = catalog.untranslated().count();

            for warning in &report.warnings {
                warn!("{}", warning);
            }
            for error in &report.errors {
                eprintln!("error: {}", error);
            }
            info!(
                "Checked {} entries: {} errors, {} warnings, {} untranslated",
                catalog.len(),
                report.errors.len(),
                report.warnings.len(),
                untranslated
            );

            if report.has_errors() {
                bail!("Catalog for {} has {} invalid entries", language, report.errors.len());
            }
        }
    }

    Ok(())
}
