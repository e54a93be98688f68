//! Data model: parameters, per-run records, and the assembled container.

pub mod parameters;
pub mod record;
pub mod results;
pub mod values;

pub use parameters::{Parameter, ParameterSet, Parameters};
pub use record::{FeatureRun, RunRecord};
pub use results::{EnsembleData, FeatureData, ValueStack};
pub use values::{Shape, Signal, TimeAxis, Values};
