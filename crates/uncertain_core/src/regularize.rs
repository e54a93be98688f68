//! Adaptivity detection and invalid-placeholder regularization.
//!
//! Both passes inspect the full ensemble of per-run records for one
//! feature. Detection decides fixed-shape versus adaptive handling;
//! regularization forces invalid placeholders to the shape of the valid
//! entries so the ensemble can be stacked.

use crate::model::{RunRecord, Shape, Signal, TimeAxis};

/// Whether `feature`'s valid output shape varies across the ensemble.
///
/// Scans records in order: the first non-invalid output fixes the reference
/// shape, and any later valid output with a different shape makes the
/// feature adaptive. Fewer than two valid outputs can never be adaptive.
#[must_use]
pub fn is_adaptive(records: &[RunRecord], feature: &str) -> bool {
    let mut reference: Option<Shape> = None;
    for record in records {
        let Some(run) = record.get(feature) else {
            continue;
        };
        if run.output.is_invalid() {
            continue;
        }
        let shape = run.output.shape();
        match reference {
            None => reference = Some(shape),
            Some(prev) if prev != shape => return true,
            Some(_) => {}
        }
    }
    false
}

/// Force invalid placeholders to the ensemble's reference shape, for every
/// feature and for the time and output components independently.
///
/// The reference is the first entry that is not entirely invalid. When an
/// entire component is invalid, entries are left unchanged; stacking then
/// falls back to a uniform scalar placeholder. Idempotent.
pub fn regularize_invalid(records: &mut [RunRecord]) {
    let Some(first) = records.first() else {
        return;
    };
    let names: Vec<String> = first.names().map(str::to_string).collect();

    for name in &names {
        regularize_outputs(records, name);
        regularize_times(records, name);
    }
}

fn regularize_outputs(records: &mut [RunRecord], feature: &str) {
    let reference = records.iter().find_map(|record| {
        record
            .get(feature)
            .filter(|run| !run.output.is_invalid())
            .map(|run| run.output.shape())
    });
    let Some(shape) = reference else {
        return;
    };

    for record in records.iter_mut() {
        if let Some(run) = record.get_mut(feature)
            && run.output.is_invalid()
            && run.output.shape() != shape
        {
            run.output = Signal::Invalid(shape);
        }
    }
}

fn regularize_times(records: &mut [RunRecord], feature: &str) {
    let reference = records.iter().find_map(|record| {
        record
            .get(feature)
            .filter(|run| !run.time.is_unusable())
            .and_then(|run| run.time.len())
    });
    let Some(len) = reference else {
        return;
    };

    for record in records.iter_mut() {
        if let Some(run) = record.get_mut(feature)
            && run.time.is_unusable()
            && run.time.len() != Some(len)
        {
            run.time = TimeAxis::Points(vec![f64::NAN; len]);
        }
    }
}
