use super::*;
use approx::assert_relative_eq;

#[test]
fn height_sample_matches_narrated_numbers() {
    let stats = compute_deviation_stats(&HEIGHT_SAMPLE).unwrap();
    assert_eq!(stats.count, 9);
    assert_eq!(stats.mean, 150.0);
    assert_eq!(stats.sum_of_squared_deviations, 3000.0);
    assert_eq!(stats.degrees_of_freedom(), 8);
    assert_eq!(stats.variance, 375.0);
    assert_relative_eq!(stats.standard_deviation, 375f64.sqrt());
    assert_eq!(format_quantity(stats.standard_deviation), "19.36");
}

#[test]
fn population_variance_divides_by_count() {
    let stats = compute_deviation_stats(&HEIGHT_SAMPLE).unwrap();
    assert_relative_eq!(stats.population_variance(), 3000.0 / 9.0);
}

#[test]
fn repeated_runs_are_bit_identical() {
    let a = compute_deviation_stats(&HEIGHT_SAMPLE).unwrap();
    let b = compute_deviation_stats(&HEIGHT_SAMPLE).unwrap();
    assert_eq!(a.variance.to_bits(), b.variance.to_bits());
    assert_eq!(
        a.standard_deviation.to_bits(),
        b.standard_deviation.to_bits()
    );
    assert_eq!(a, b);
}

#[test]
fn single_observation_is_degenerate() {
    let err = compute_deviation_stats(&[DataPoint::new(5.0, 1).unwrap()]).unwrap_err();
    assert!(matches!(err, ReelError::DegenerateDataset(_)));

    let err = compute_deviation_stats(&[]).unwrap_err();
    assert!(matches!(err, ReelError::DegenerateDataset(_)));
}

#[test]
fn multiplicity_counts_as_observations() {
    let stats = compute_deviation_stats(&[DataPoint::new(4.0, 2).unwrap()]).unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.variance, 0.0);
}

#[test]
fn data_point_rejects_zero_multiplicity() {
    assert!(DataPoint::new(1.0, 0).is_err());
    assert!(DataPoint::new(f64::NAN, 1).is_err());
    let bad = DataPoint {
        value: 1.0,
        multiplicity: 0,
    };
    assert!(compute_deviation_stats(&[bad, bad]).is_err());
}

#[test]
fn quantities_format_like_the_formulas() {
    assert_eq!(format_quantity(3000.0), "3000");
    assert_eq!(format_quantity(375.0), "375");
    assert_eq!(format_quantity(19.364916), "19.36");
    assert_eq!(format_quantity(0.126), "0.13");
}

#[test]
fn degrees_of_freedom_saturates_on_empty_result() {
    let empty = AggregateResult {
        mean: 0.0,
        count: 0,
        sum_of_squared_deviations: 0.0,
        variance: 0.0,
        standard_deviation: 0.0,
    };
    assert_eq!(empty.degrees_of_freedom(), 0);
}
