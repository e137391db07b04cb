//! Render metrics.
//!
//! Counts how often renders were served from a catalog and how often they
//! degraded to passthrough output, so missing catalog entries show up in
//! production without failing requests.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters kept by a [`crate::i18n::Registry`].
#[derive(Debug, Default)]
pub struct RenderMetrics {
    /// Renders that found a catalog entry along the fallback chain
    catalog_hits: AtomicUsize,

    /// Renders that fell back to the source pattern
    passthrough_renders: AtomicUsize,

    /// Renders rejected with an error
    render_failures: AtomicUsize,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_catalog_hit(&self) {
        self.catalog_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_passthrough(&self) {
        self.passthrough_renders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.render_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn catalog_hits(&self) -> usize {
        self.catalog_hits.load(Ordering::Relaxed)
    }

    pub fn passthrough_renders(&self) -> usize {
        self.passthrough_renders.load(Ordering::Relaxed)
    }

    pub fn render_failures(&self) -> usize {
        self.render_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.catalog_hits();
        let passthrough = self.passthrough_renders();
        let lookups = hits + passthrough;
        let catalog_hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            catalog_hits: hits,
            passthrough_renders: passthrough,
            catalog_hit_rate,
            render_failures: self.render_failures(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.catalog_hits.store(0, Ordering::Relaxed);
        self.passthrough_renders.store(0, Ordering::Relaxed);
        self.render_failures.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of the render counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub catalog_hits: usize,
    pub passthrough_renders: usize,

    /// Catalog hits as a percentage (0-100) of successful renders
    pub catalog_hit_rate: f64,

    pub render_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_empty() {
        let report = RenderMetrics::new().report();
        assert_eq!(report.catalog_hits, 0);
        assert_eq!(report.passthrough_renders, 0);
        assert_eq!(report.catalog_hit_rate, 0.0);
        assert_eq!(report.render_failures, 0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = RenderMetrics::new();

        // 3 hits, 1 passthrough = 75% hit rate
        metrics.record_catalog_hit();
        metrics.record_catalog_hit();
        metrics.record_catalog_hit();
        metrics.record_passthrough();

        let report = metrics.report();
        assert_eq!(report.catalog_hits, 3);
        assert_eq!(report.passthrough_renders, 1);
        assert_eq!(report.catalog_hit_rate, 75.0);
    }

    #[test]
    fn test_failures_do_not_affect_hit_rate() {
        let metrics = RenderMetrics::new();
        metrics.record_catalog_hit();
        metrics.record_failure();
        metrics.record_failure();

        let report = metrics.report();
        assert_eq!(report.catalog_hit_rate, 100.0);
        assert_eq!(report.render_failures, 2);
    }

    #[test]
    fn test_reset() {
        let metrics = RenderMetrics::new();
        metrics.record_catalog_hit();
        metrics.record_passthrough();
        metrics.record_failure();
        metrics.reset();

        assert_eq!(metrics.report().catalog_hits, 0);
        assert_eq!(metrics.report().passthrough_renders, 0);
        assert_eq!(metrics.report().render_failures, 0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = RenderMetrics::new();
        metrics.record_passthrough();
        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["passthrough_renders"], 1);
        assert_eq!(json["catalog_hit_rate"], 0.0);
    }
}
