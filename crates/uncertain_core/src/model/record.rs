//! Per-run result records.

use serde::{Deserialize, Serialize};

use crate::interpolate::Interpolator;

use super::values::{Signal, TimeAxis};

/// One feature's (time, output) pair for a single run.
///
/// The interpolator is present only for adaptive features with a valid 1-D
/// output; the worker evaluator guarantees it is attached before dispatch
/// returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRun {
    pub time: TimeAxis,
    pub output: Signal,
    pub interpolator: Option<Interpolator>,
}

impl FeatureRun {
    #[must_use]
    pub fn new(time: TimeAxis, output: Signal) -> Self {
        Self {
            time,
            output,
            interpolator: None,
        }
    }

    /// The record a collaborator produces when its quantity is undefined
    /// for this run.
    #[must_use]
    pub fn invalid() -> Self {
        Self::new(TimeAxis::Missing, Signal::invalid())
    }

    #[must_use]
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = Some(interpolator);
        self
    }
}

/// Results for the model and every feature from one parameter set.
///
/// Entries keep insertion order: the model first, then features in
/// declaration order. The first record's entry order defines which features
/// the assembler knows about and in which order it emits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    entries: Vec<(String, FeatureRun)>,
}

impl RunRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, run: FeatureRun) {
        self.entries.push((name.into(), run));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureRun> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, run)| run)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FeatureRun> {
        self.entries
            .iter_mut()
            .find(|(entry, _)| entry == name)
            .map(|(_, run)| run)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
