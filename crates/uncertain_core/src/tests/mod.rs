//! Integration tests for the ensemble evaluation engine
//!
//! Tests are organized by topic:
//! - `values` - Value, shape and time-axis types
//! - `interpolate` - Linear interpolation and extrapolation
//! - `regularize` - Adaptivity detection and invalid-placeholder handling
//! - `dispatch` - Parameter-set construction, ordering, progress, failures
//! - `assemble` - Fixed stacking, interpolation alignment, the container
//! - `runner` - End-to-end quantification runs

mod regularize;

use crate::error::BoxError;
use crate::evaluate::{Feature, Model};
use crate::interpolate::Interpolator;
use crate::model::{FeatureRun, ParameterSet, RunRecord, Signal, TimeAxis, Values};

/// Model producing `points` samples of `u(t) = gain * t` on the axis
/// `0..points-1`. Varying the `points` parameter makes it adaptive.
pub(crate) struct RampModel {
    pub adaptive: bool,
}

impl Model for RampModel {
    fn name(&self) -> &str {
        "ramp"
    }

    fn adaptive(&self) -> bool {
        self.adaptive
    }

    fn labels(&self) -> Vec<String> {
        vec!["time (s)".to_string(), "amplitude".to_string()]
    }

    fn run(&self, parameters: &ParameterSet) -> Result<(TimeAxis, Signal), BoxError> {
        let points = parameters.get("points").ok_or("missing parameter: points")? as usize;
        let gain = parameters.get("gain").ok_or("missing parameter: gain")?;

        let t: Vec<f64> = (0..points).map(|i| i as f64).collect();
        let u: Vec<f64> = t.iter().map(|&x| gain * x).collect();
        Ok((TimeAxis::Points(t), Signal::Valid(Values::OneDim(u))))
    }
}

/// 0-D feature: mean of the model output, no time dependence.
pub(crate) struct MeanFeature;

impl Feature for MeanFeature {
    fn name(&self) -> &str {
        "mean"
    }

    fn run(&self, _time: &TimeAxis, output: &Signal) -> Result<FeatureRun, BoxError> {
        match output {
            Signal::Valid(Values::OneDim(u)) if !u.is_empty() => {
                let mean = u.iter().sum::<f64>() / u.len() as f64;
                Ok(FeatureRun::new(
                    TimeAxis::Missing,
                    Signal::Valid(Values::Scalar(mean)),
                ))
            }
            _ => Ok(FeatureRun::invalid()),
        }
    }
}

/// Copies the model output verbatim; adaptive whenever the model is.
pub(crate) struct EchoFeature;

impl Feature for EchoFeature {
    fn name(&self) -> &str {
        "echo"
    }

    fn run(&self, time: &TimeAxis, output: &Signal) -> Result<FeatureRun, BoxError> {
        Ok(FeatureRun::new(time.clone(), output.clone()))
    }
}

/// A feature whose quantity is undefined for every run.
pub(crate) struct UndefinedFeature;

impl Feature for UndefinedFeature {
    fn name(&self) -> &str {
        "undefined"
    }

    fn run(&self, _time: &TimeAxis, _output: &Signal) -> Result<FeatureRun, BoxError> {
        Ok(FeatureRun::invalid())
    }
}

/// A feature that always raises.
pub(crate) struct FailingFeature;

impl Feature for FailingFeature {
    fn name(&self) -> &str {
        "kaboom"
    }

    fn run(&self, _time: &TimeAxis, _output: &Signal) -> Result<FeatureRun, BoxError> {
        Err("feature exploded".into())
    }
}

/// Minimal model stub for assembler tests built from hand-made records.
pub(crate) struct StubModel {
    pub name: &'static str,
    pub adaptive: bool,
    pub labels: Vec<String>,
}

impl StubModel {
    pub(crate) fn named(name: &'static str) -> Self {
        Self {
            name,
            adaptive: false,
            labels: Vec::new(),
        }
    }
}

impl Model for StubModel {
    fn name(&self) -> &str {
        self.name
    }

    fn adaptive(&self) -> bool {
        self.adaptive
    }

    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }

    fn run(&self, _parameters: &ParameterSet) -> Result<(TimeAxis, Signal), BoxError> {
        Err("stub model is not runnable".into())
    }
}

/// A valid 1-D run on the axis `0..n-1` with `u = slope * t`, interpolator
/// attached the way the worker evaluator would.
pub(crate) fn ramp_run(n: usize, slope: f64) -> FeatureRun {
    let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let u: Vec<f64> = t.iter().map(|&x| slope * x).collect();
    let interpolator = Interpolator::new(t.clone(), u.clone()).unwrap();
    FeatureRun::new(TimeAxis::Points(t), Signal::Valid(Values::OneDim(u)))
        .with_interpolator(interpolator)
}

/// Build a record from named feature runs.
pub(crate) fn record(entries: Vec<(&str, FeatureRun)>) -> RunRecord {
    let mut record = RunRecord::with_capacity(entries.len());
    for (name, run) in entries {
        record.insert(name, run);
    }
    record
}

pub(crate) fn assert_close(actual: f64, expected: f64, message: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{message}: expected {expected}, got {actual}"
    );
}
