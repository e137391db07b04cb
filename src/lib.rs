//! Localizable text patterns with typed placeholders.
//!
//! Application code embeds patterns such as `"{number(count)} apples"` and
//! renders them through a per-locale alias. The [`i18n`] engine derives every
//! variant a translator must supply for a pattern, driven by the locale's
//! pluralization and gender rules, and picks the matching variant at render
//! time. [`extract`] and [`catalog`] keep the translators' catalog files in
//! step with the codebase.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod i18n;

pub use error::Error;
