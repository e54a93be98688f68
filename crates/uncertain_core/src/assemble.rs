//! Alignment of adaptive runs and assembly of the final container.
//!
//! The assembler consumes the full ensemble of per-run records: it
//! regularizes invalid placeholders, rejects undeclared adaptivity, routes
//! each feature through fixed-shape stacking or interpolation alignment,
//! and emits the uniform [`EnsembleData`] container.

use tracing::warn;

use crate::config::RunConfig;
use crate::error::ConfigError;
use crate::evaluate::Model;
use crate::model::{
    EnsembleData, FeatureData, RunRecord, Shape, Signal, TimeAxis, ValueStack, Values,
};
use crate::regularize::{is_adaptive, regularize_invalid};

/// Merge per-run records into the final container.
///
/// Feature set and order come from the first record (the model first, then
/// features in declaration order). `uncertain` is attached as run metadata.
pub fn assemble_results(
    model: &dyn Model,
    config: &RunConfig,
    mut records: Vec<RunRecord>,
    uncertain: Vec<String>,
) -> Result<EnsembleData, ConfigError> {
    let names: Vec<String> = records
        .first()
        .ok_or(ConfigError::EmptyNodes)?
        .names()
        .map(str::to_string)
        .collect();

    regularize_invalid(&mut records);

    // Adaptivity observed at runtime must have been declared up front;
    // silently stacking mismatched shapes would corrupt the statistics.
    for name in &names {
        if is_adaptive(&records, name) && !declared_adaptive(model, config, name) {
            return Err(ConfigError::UndeclaredAdaptive(name.clone()));
        }
    }

    let mut data = EnsembleData::new(model.name(), uncertain);
    for name in &names {
        let labels = config
            .labels_for(name)
            .map(<[String]>::to_vec)
            .or_else(|| (name == model.name()).then(|| model.labels()))
            .unwrap_or_default();

        let (time, values) = if declared_adaptive(model, config, name) {
            align_adaptive(name, model.name(), &records)?
        } else {
            stack_fixed(name, &records)
        };

        data.insert(name.clone(), FeatureData {
            time,
            values,
            labels,
        });
    }

    Ok(data)
}

fn declared_adaptive(model: &dyn Model, config: &RunConfig, feature: &str) -> bool {
    if feature == model.name() {
        model.adaptive()
    } else {
        config.is_adaptive_declared(feature)
    }
}

/// Stack a fixed-shape feature directly, with the first run's time axis.
///
/// After regularization every entry shares the reference shape; an
/// all-invalid ensemble has no reference and falls back to one scalar
/// placeholder per run.
fn stack_fixed(feature: &str, records: &[RunRecord]) -> (Option<Vec<f64>>, ValueStack) {
    let shape = records
        .iter()
        .filter_map(|record| record.get(feature))
        .find(|run| !run.output.is_invalid())
        .map_or(Shape::Scalar, |run| run.output.shape());

    let time = records
        .first()
        .and_then(|record| record.get(feature))
        .and_then(|run| run.time.points())
        .map(<[f64]>::to_vec);

    // Runs whose shape still disagrees with the reference (a 0-D declared
    // adaptive feature can legitimately mix dimensionalities) are stacked
    // as NaN placeholders so the container stays rectangular.
    let mut stack = ValueStack::with_shape(shape);
    for record in records {
        match record.get(feature) {
            Some(run) if run.output.shape() == shape => stack.push(&run.output),
            _ => stack.push(&Signal::Invalid(shape)),
        }
    }

    (time, stack)
}

/// Align a declared-adaptive feature onto a common time base.
///
/// 1-D outputs are resampled onto the candidate axis with the most points
/// via each run's interpolator. 0-D outputs cannot be interpolated; the raw
/// scalars are stacked with a diagnostic. 2-D and higher are unsupported.
fn align_adaptive(
    feature: &str,
    model_name: &str,
    records: &[RunRecord],
) -> Result<(Option<Vec<f64>>, ValueStack), ConfigError> {
    let first_shape = records
        .first()
        .and_then(|record| record.get(feature))
        .map_or(Shape::Scalar, |run| run.output.shape());

    match first_shape.ndim() {
        0 => {
            warn!(
                feature,
                "feature has a 0-D result, no interpolation is performed"
            );
            Ok(stack_fixed(feature, records))
        }
        1 => interpolate_onto_common_axis(feature, model_name, records),
        ndim => Err(ConfigError::UnsupportedDimension {
            feature: feature.to_string(),
            ndim,
        }),
    }
}

/// Resample every run of a 1-D adaptive feature onto the finest observed
/// time axis.
fn interpolate_onto_common_axis(
    feature: &str,
    model_name: &str,
    records: &[RunRecord],
) -> Result<(Option<Vec<f64>>, ValueStack), ConfigError> {
    // One candidate axis per valid run: the feature's own axis when usable,
    // otherwise the model's. Invalid runs contribute no candidate; they
    // become NaN-filled rows below, so a missing axis is only fatal for a
    // run that actually has output to resample.
    let mut candidates: Vec<&[f64]> = Vec::with_capacity(records.len());
    for record in records {
        let Some(run) = record.get(feature) else {
            continue;
        };
        if run.output.is_invalid() {
            continue;
        }
        let model_time = record.get(model_name).map(|r| &r.time);

        let candidate = [Some(&run.time), model_time]
            .into_iter()
            .flatten()
            .find(|time| !time.is_unusable())
            .and_then(TimeAxis::points)
            .ok_or_else(|| ConfigError::NoUsableTimeAxis(feature.to_string()))?;
        candidates.push(candidate);
    }

    // No valid run anywhere: nothing to align, stack the placeholders.
    if candidates.is_empty() {
        return Ok(stack_fixed(feature, records));
    }

    // Resampling onto the finest observed resolution avoids discarding
    // detail present in any single run. First maximum wins on ties.
    let mut common: &[f64] = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.len() > common.len() {
            common = candidate;
        }
    }

    let mut stack = ValueStack::with_shape(Shape::OneDim(common.len()));
    for record in records {
        let run = record.get(feature);
        match run.map(|r| (&r.output, &r.interpolator)) {
            Some((Signal::Valid(Values::OneDim(_)), Some(interpolator))) => {
                stack.push_row(interpolator.sample(common));
            }
            Some((Signal::Valid(_), None)) => {
                return Err(ConfigError::MissingInterpolator(feature.to_string()));
            }
            // Invalid runs contribute a NaN-filled row at the common length.
            _ => stack.push(&Signal::Invalid(Shape::OneDim(common.len()))),
        }
    }

    Ok((Some(common.to_vec()), stack))
}
