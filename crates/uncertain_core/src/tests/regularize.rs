//! Tests for adaptivity detection and invalid-placeholder regularization

use crate::model::{FeatureRun, RunRecord, Shape, Signal, TimeAxis, Values};
use crate::regularize::{is_adaptive, regularize_invalid};

use super::{ramp_run, record};

fn invalid_run(shape: Shape) -> FeatureRun {
    FeatureRun::new(TimeAxis::Missing, Signal::Invalid(shape))
}

// Regularized records carry NaN-filled axes and rows, so derived equality
// (IEEE NaN != NaN) cannot compare them. These helpers treat NaN as equal
// to NaN.
fn same_points(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(&x, &y)| x == y || (x.is_nan() && y.is_nan()))
}

fn same_run(a: &FeatureRun, b: &FeatureRun) -> bool {
    let time = match (&a.time, &b.time) {
        (TimeAxis::Missing, TimeAxis::Missing) => true,
        (TimeAxis::Points(x), TimeAxis::Points(y)) => same_points(x, y),
        _ => false,
    };
    let output = match (&a.output, &b.output) {
        (Signal::Invalid(x), Signal::Invalid(y)) => x == y,
        (Signal::Valid(x), Signal::Valid(y)) => {
            x.shape() == y.shape() && same_points(&x.to_vec(), &y.to_vec())
        }
        _ => false,
    };
    time && output
}

fn same_records(a: &[RunRecord], b: &[RunRecord]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(left, right)| {
            left.len() == right.len()
                && left.names().all(|name| {
                    matches!(
                        (left.get(name), right.get(name)),
                        (Some(x), Some(y)) if same_run(x, y)
                    )
                })
        })
}

#[test]
fn test_uniform_shapes_are_not_adaptive() {
    let records = vec![
        record(vec![("a", ramp_run(10, 1.0))]),
        record(vec![("a", ramp_run(10, 2.0))]),
        record(vec![("a", ramp_run(10, 3.0))]),
    ];

    assert!(!is_adaptive(&records, "a"));
}

#[test]
fn test_differing_valid_shapes_are_adaptive() {
    let records = vec![
        record(vec![("a", ramp_run(10, 1.0))]),
        record(vec![("a", ramp_run(12, 1.0))]),
    ];

    assert!(is_adaptive(&records, "a"));
}

#[test]
fn test_invalid_entries_are_skipped_by_detection() {
    // Placeholder shapes differ from the valid entries, but only valid
    // outputs participate in detection.
    let records = vec![
        record(vec![("a", invalid_run(Shape::Scalar))]),
        record(vec![("a", ramp_run(10, 1.0))]),
        record(vec![("a", invalid_run(Shape::OneDim(3)))]),
        record(vec![("a", ramp_run(10, 2.0))]),
    ];

    assert!(!is_adaptive(&records, "a"));
}

#[test]
fn test_fewer_than_two_valid_outputs_are_not_adaptive() {
    let single = vec![record(vec![("a", ramp_run(10, 1.0))])];
    assert!(!is_adaptive(&single, "a"));

    let all_invalid = vec![
        record(vec![("a", invalid_run(Shape::Scalar))]),
        record(vec![("a", invalid_run(Shape::OneDim(3)))]),
    ];
    assert!(!is_adaptive(&all_invalid, "a"));
}

#[test]
fn test_regularize_widens_invalid_placeholders() {
    // 4 runs with a length-3 placeholder and 1 valid length-5 output:
    // every entry ends up with the length-5 shape.
    let mut records = vec![
        record(vec![("c", invalid_run(Shape::OneDim(3)))]),
        record(vec![("c", invalid_run(Shape::OneDim(3)))]),
        record(vec![("c", ramp_run(5, 1.0))]),
        record(vec![("c", invalid_run(Shape::OneDim(3)))]),
        record(vec![("c", invalid_run(Shape::OneDim(3)))]),
    ];

    regularize_invalid(&mut records);

    for record in &records {
        assert_eq!(record.get("c").unwrap().output.shape(), Shape::OneDim(5));
    }
    assert!(records[0].get("c").unwrap().output.is_invalid());
    assert!(!records[2].get("c").unwrap().output.is_invalid());
}

#[test]
fn test_regularize_is_idempotent() {
    let mut records = vec![
        record(vec![("c", invalid_run(Shape::Scalar))]),
        record(vec![("c", ramp_run(5, 1.0))]),
        record(vec![("c", invalid_run(Shape::OneDim(2)))]),
    ];

    regularize_invalid(&mut records);
    let once = records.clone();
    regularize_invalid(&mut records);

    assert!(same_records(&records, &once));
}

#[test]
fn test_all_invalid_ensemble_is_left_unchanged() {
    let mut records = vec![
        record(vec![("c", invalid_run(Shape::Scalar))]),
        record(vec![("c", invalid_run(Shape::OneDim(3)))]),
    ];
    let before = records.clone();

    regularize_invalid(&mut records);

    assert_eq!(records, before);
}

#[test]
fn test_regularize_fills_missing_time_axes() {
    let mut records = vec![
        record(vec![(
            "c",
            FeatureRun::new(TimeAxis::Missing, Signal::invalid()),
        )]),
        record(vec![("c", ramp_run(4, 1.0))]),
    ];

    regularize_invalid(&mut records);

    let filled = &records[0].get("c").unwrap().time;
    let points = filled.points().expect("missing axis should be NaN-filled");
    assert_eq!(points.len(), 4);
    assert!(points.iter().all(|v| v.is_nan()));
    // A NaN-filled axis is still unusable for interpolation.
    assert!(filled.is_unusable());
}

#[test]
fn test_shape_homogeneity_after_regularization() {
    let mut records = vec![
        record(vec![
            ("a", ramp_run(6, 1.0)),
            ("b", invalid_run(Shape::Scalar)),
        ]),
        record(vec![
            ("a", invalid_run(Shape::OneDim(2))),
            ("b", invalid_run(Shape::OneDim(9))),
        ]),
    ];

    regularize_invalid(&mut records);

    // Feature "a" has a valid reference: all entries share its shape.
    let shapes: Vec<_> = records
        .iter()
        .map(|r| r.get("a").unwrap().output.shape())
        .collect();
    assert!(shapes.iter().all(|&s| s == Shape::OneDim(6)));

    // Feature "b" is all-invalid: no reference, entries untouched.
    assert_eq!(records[0].get("b").unwrap().output.shape(), Shape::Scalar);
    assert_eq!(
        records[1].get("b").unwrap().output.shape(),
        Shape::OneDim(9)
    );
}
