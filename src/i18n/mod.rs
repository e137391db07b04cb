//! Localization rule engine.
//!
//! Developers write source patterns with typed placeholders directly in code;
//! this module derives every grammatically distinct variant a translator has
//! to supply, and at render time maps runtime values back to the variant that
//! fits them.
//!
//! # Architecture
//!
//! - `value`: runtime values and the values mapping
//! - `domain`: value classifiers (`Domain`) and their buckets (`Category`)
//! - `language`: locales with a single fallback chain, domain resolution
//! - `placeholder`: `{name}` / `{domain(name)}` fragments
//! - `translation`: translation key derivation and rendering
//! - `registry`: languages plus catalogs, render entry points, aliases
//! - `locales`: built-in languages (`root`, `en`, `de`, `de_DE`, `de_AT`)
//! - `validator`: checks translated texts against their keys
//! - `metrics`: catalog hit / passthrough counters
//!
//! # Example
//!
//! ```rust,ignore
//! use translatables::i18n::{Registry, Values};
//!
//! let t = Registry::global().alias("en");
//! t("There are {number(count)} things.", &Values::new().with("count", 3))?;
//! ```

pub(crate) mod domain;
mod language;
mod locales;
mod metrics;
mod placeholder;
mod registry;
mod translation;
mod validator;
mod value;

pub use domain::{display_formatter, Category, Domain};
pub use language::{Language, Languages, MAX_FALLBACK_DEPTH};
pub use locales::{default_languages, ROOT};
pub use metrics::{MetricsReport, RenderMetrics};
pub use placeholder::{Placeholder, PLAIN_DOMAIN};
pub use registry::{Registry, RenderMode};
pub use translation::{Rendered, Translation};
pub use validator::{CatalogValidator, ValidationReport};
pub use value::{Value, Values};
