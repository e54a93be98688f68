//! Run configuration: worker count, graphics suppression, adaptive
//! declarations and display labels.

use rustc_hash::{FxHashMap, FxHashSet};

/// Configuration surface consumed by one quantification run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Worker pool size. Defaults to the host's available parallelism.
    pub workers: usize,
    /// Acquire the graphics-suppression resource for the whole dispatch
    /// round. Defaults to true.
    pub suppress_graphics: bool,
    adaptive_features: FxHashSet<String>,
    labels: FxHashMap<String, Vec<String>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            suppress_graphics: true,
            adaptive_features: FxHashSet::default(),
            labels: FxHashMap::default(),
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    #[must_use]
    pub fn with_graphics_suppression(mut self, suppress: bool) -> Self {
        self.suppress_graphics = suppress;
        self
    }

    /// Declare a feature as adaptive: its output length may vary between
    /// runs and will be aligned by interpolation.
    #[must_use]
    pub fn declare_adaptive(mut self, feature: impl Into<String>) -> Self {
        self.adaptive_features.insert(feature.into());
        self
    }

    /// Declare display labels for a feature (or for the model, by name).
    #[must_use]
    pub fn with_labels(mut self, feature: impl Into<String>, labels: &[&str]) -> Self {
        self.labels.insert(
            feature.into(),
            labels.iter().map(|&l| l.to_string()).collect(),
        );
        self
    }

    #[must_use]
    pub fn is_adaptive_declared(&self, feature: &str) -> bool {
        self.adaptive_features.contains(feature)
    }

    #[must_use]
    pub fn labels_for(&self, feature: &str) -> Option<&[String]> {
        self.labels.get(feature).map(Vec::as_slice)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}
