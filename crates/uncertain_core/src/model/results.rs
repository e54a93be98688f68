//! The final uniform container handed to downstream analysis.
//!
//! After regularization and alignment every feature's ensemble is
//! rectangular: one shared time axis (or none, for zero-dimensional
//! features) and a stacked array of per-run outputs with the run index as
//! the leading axis.

use serde::{Deserialize, Serialize};

use super::values::{Shape, Signal};

/// Ensemble-major stacked outputs for one feature.
///
/// Every run contributes one row of `shape.len()` elements; rows for
/// invalid runs are NaN-filled at the reference shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueStack {
    runs: usize,
    shape: Shape,
    data: Vec<f64>,
}

impl ValueStack {
    pub(crate) fn with_shape(shape: Shape) -> Self {
        Self {
            runs: 0,
            shape,
            data: Vec::new(),
        }
    }

    /// Append one run's output, NaN-filling invalid entries.
    ///
    /// Every row must match the stack's shape; rectangularity is the
    /// container's core invariant, so a mismatch is a bug in the caller.
    pub(crate) fn push(&mut self, signal: &Signal) {
        match signal {
            Signal::Valid(values) => {
                assert_eq!(
                    values.shape(),
                    self.shape,
                    "value stack rows must share one shape"
                );
                self.data.extend(values.to_vec());
            }
            Signal::Invalid(_) => {
                self.data.extend(std::iter::repeat_n(f64::NAN, self.shape.len()));
            }
        }
        self.runs += 1;
    }

    /// Append one already-resampled row (the interpolation aligner path).
    pub(crate) fn push_row(&mut self, row: Vec<f64>) {
        assert_eq!(
            row.len(),
            self.shape.len(),
            "value stack rows must share one shape"
        );
        self.data.extend(row);
        self.runs += 1;
    }

    /// Number of runs stacked (the leading axis length).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Shape of each individual run's output.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Flat row-major backing data, `runs * shape.len()` elements.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// One run's output as a flat slice.
    #[must_use]
    pub fn run(&self, index: usize) -> Option<&[f64]> {
        let width = self.shape.len();
        if index >= self.runs {
            return None;
        }
        Some(&self.data[index * width..(index + 1) * width])
    }
}

/// Assembled results for one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureData {
    /// Shared time axis; `None` for zero-dimensional features.
    pub time: Option<Vec<f64>>,
    /// Stacked per-run outputs, run index first.
    pub values: ValueStack,
    /// Display labels, e.g. axis names. Empty when none were declared.
    pub labels: Vec<String>,
}

/// The final container: every feature's regularized ensemble plus run
/// metadata. Keyed by feature name, iterated in assembly order (the model
/// first). Immutable to consumers once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleData {
    pub model_name: String,
    pub uncertain_parameters: Vec<String>,
    features: Vec<(String, FeatureData)>,
}

impl EnsembleData {
    pub(crate) fn new(model_name: impl Into<String>, uncertain_parameters: Vec<String>) -> Self {
        Self {
            model_name: model_name.into(),
            uncertain_parameters,
            features: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, data: FeatureData) {
        self.features.push((name.into(), data));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureData> {
        self.features
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, data)| data)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Feature names in assembly order (the model's own name first).
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureData)> {
        self.features
            .iter()
            .map(|(name, data)| (name.as_str(), data))
    }

    /// Number of runs in the ensemble, taken from the model's own stack.
    #[must_use]
    pub fn runs(&self) -> usize {
        self.get(self.model_name.as_str())
            .map_or(0, |data| data.values.runs())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
