//! Worker-side evaluation of one parameter set.
//!
//! [`evaluate_single`] is the pure unit of work the dispatcher fans out:
//! run the model, then every feature on the model's output, and collect the
//! per-run record. Collaborators report undefined quantities with the
//! invalid placeholder rather than raising; an actual error from a
//! collaborator aborts the whole batch.

use crate::config::RunConfig;
use crate::error::{BoxError, EvaluateError};
use crate::interpolate::Interpolator;
use crate::model::{FeatureRun, ParameterSet, RunRecord, Signal, TimeAxis, Values};

/// The simulation model under quantification.
///
/// Implementations must tolerate concurrent invocation with different
/// parameter sets and must not share mutable state across invocations.
pub trait Model: Sync {
    /// The model's reserved feature name in records and the container.
    fn name(&self) -> &str;

    /// Declares whether the model's own output length may vary between
    /// runs. Undeclared variation is a fatal configuration error.
    fn adaptive(&self) -> bool {
        false
    }

    /// Display labels for the model's axes, e.g. `["time (ms)", "voltage (mV)"]`.
    fn labels(&self) -> Vec<String> {
        Vec::new()
    }

    /// Evaluate the model for one parameter set.
    ///
    /// Returning `Signal::invalid()` marks the run as having no usable
    /// output without failing the batch.
    fn run(&self, parameters: &ParameterSet) -> Result<(TimeAxis, Signal), BoxError>;
}

/// A quantity derived from the model's output.
pub trait Feature: Sync {
    fn name(&self) -> &str;

    /// Compute the feature from one run's model output.
    ///
    /// The returned [`FeatureRun`] may carry its own interpolator; if the
    /// feature is declared adaptive and omits one, the evaluator builds a
    /// linear interpolant from the run's time axis.
    fn run(&self, model_time: &TimeAxis, model_output: &Signal) -> Result<FeatureRun, BoxError>;
}

/// Evaluate the model and every feature for one parameter set.
pub fn evaluate_single(
    model: &dyn Model,
    features: &[Box<dyn Feature>],
    config: &RunConfig,
    parameters: &ParameterSet,
) -> Result<RunRecord, EvaluateError> {
    let (model_time, model_output) =
        model
            .run(parameters)
            .map_err(|source| EvaluateError::Model {
                name: model.name().to_string(),
                source,
            })?;

    let mut model_run = FeatureRun::new(model_time, model_output);
    if model.adaptive() {
        attach_interpolator(&mut model_run, None);
    }

    let mut record = RunRecord::with_capacity(features.len() + 1);
    let mut feature_runs = Vec::with_capacity(features.len());
    for feature in features {
        let mut run = feature
            .run(&model_run.time, &model_run.output)
            .map_err(|source| EvaluateError::Feature {
                name: feature.name().to_string(),
                source,
            })?;
        if config.is_adaptive_declared(feature.name()) {
            attach_interpolator(&mut run, Some(&model_run.time));
        }
        feature_runs.push((feature.name().to_string(), run));
    }

    record.insert(model.name(), model_run);
    for (name, run) in feature_runs {
        record.insert(name, run);
    }

    Ok(record)
}

/// Ensure an adaptive run with a valid 1-D output carries an interpolator,
/// preferring the run's own time axis and falling back to the model's.
///
/// Runs that cannot be fitted (invalid output, no usable axis, length
/// mismatch) are left as-is; the aligner decides later whether that is
/// fatal.
fn attach_interpolator(run: &mut FeatureRun, model_time: Option<&TimeAxis>) {
    if run.interpolator.is_some() {
        return;
    }
    let Signal::Valid(Values::OneDim(output)) = &run.output else {
        return;
    };

    let time = if run.time.is_unusable() {
        match model_time {
            Some(t) if !t.is_unusable() => t,
            _ => return,
        }
    } else {
        &run.time
    };
    let Some(points) = time.points() else {
        return;
    };
    if points.len() != output.len() {
        return;
    }

    run.interpolator = Interpolator::new(points.to_vec(), output.clone()).ok();
}
