//! Model parameters and per-run parameter sets.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A declared model parameter with its fixed default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The full set of declared parameters, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    parameters: Vec<Parameter>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent declaration of one parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}

/// The concrete parameter values for one model evaluation.
///
/// Built by overlaying one sampled column of uncertain-parameter values onto
/// the declared defaults. Immutable once constructed; one instance per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    values: FxHashMap<String, f64>,
}

impl ParameterSet {
    /// Overlay `column` (one value per name in `uncertain`) onto `defaults`.
    pub(crate) fn overlay(column: &[f64], uncertain: &[String], defaults: &Parameters) -> Self {
        let mut values = FxHashMap::default();
        for (name, value) in uncertain.iter().zip(column) {
            values.insert(name.clone(), *value);
        }
        for parameter in defaults.iter() {
            values
                .entry(parameter.name.clone())
                .or_insert(parameter.value);
        }
        Self { values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
