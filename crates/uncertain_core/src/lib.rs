//! Parallel ensemble evaluation and result-regularization engine
//!
//! This crate evaluates a parameterized simulation model, and features
//! derived from its output, across a large ensemble of sampled parameter
//! sets in parallel, then reconciles the heterogeneous per-run results
//! into a single uniform, analysis-ready container. It supports:
//! - Bounded worker-pool dispatch with strict submission-order results
//! - Adaptive (variable-length) output detection with fatal undeclared-adaptivity checks
//! - Invalid-placeholder regularization so failed runs stack cleanly
//! - Interpolation of adaptive outputs onto the finest observed time base
//! - Scoped suppression of model-drawn graphics for the whole dispatch round
//!
//! # Example
//!
//! ```ignore
//! use uncertain_core::{EnsembleRunner, Nodes, Parameters, RunConfig};
//!
//! let runner = EnsembleRunner::new(my_model, Parameters::new().with("tau", 10.0))
//!     .with_feature(SpikeCount)
//!     .with_config(RunConfig::new().declare_adaptive("isi"));
//!
//! let data = runner.run(&Nodes::vector(vec![8.0, 10.0, 12.0]), "tau")?;
//! let isi = data.get("isi").unwrap();
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod assemble;
pub mod dispatch;
pub mod error;
pub mod evaluate;
pub mod graphics;
pub mod interpolate;
pub mod regularize;
pub mod runner;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::RunConfig;
pub use dispatch::{DispatchProgress, Nodes};
pub use error::{BoxError, ConfigError, EvaluateError, InterpolateError, RunError};
pub use evaluate::{Feature, Model};
pub use interpolate::Interpolator;
pub use model::{
    EnsembleData, FeatureData, FeatureRun, Parameter, ParameterSet, Parameters, RunRecord, Shape,
    Signal, TimeAxis, ValueStack, Values,
};
pub use runner::EnsembleRunner;
