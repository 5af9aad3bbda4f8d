//! Deviation statistics for the reel's dataset.

use crate::foundation::error::{ReelError, ReelResult};

/// One observed value and how many times it occurs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataPoint {
    /// Observed value.
    pub value: f64,
    /// Occurrence count, at least 1. Repeated observations are stacked in the layout.
    pub multiplicity: u32,
}

impl DataPoint {
    /// Build a validated data point.
    pub fn new(value: f64, multiplicity: u32) -> ReelResult<Self> {
        if !value.is_finite() {
            return Err(ReelError::validation("data point value must be finite"));
        }
        if multiplicity == 0 {
            return Err(ReelError::validation("data point multiplicity must be >= 1"));
        }
        Ok(Self {
            value,
            multiplicity,
        })
    }
}

const fn point(value: f64, multiplicity: u32) -> DataPoint {
    DataPoint {
        value,
        multiplicity,
    }
}

/// The heights the video works through: seven distinct values, 140 and 160 observed twice.
pub const HEIGHT_SAMPLE: [DataPoint; 7] = [
    point(120.0, 1),
    point(130.0, 1),
    point(140.0, 2),
    point(150.0, 1),
    point(160.0, 2),
    point(170.0, 1),
    point(180.0, 1),
];

/// Derived statistics, computed once per dataset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AggregateResult {
    /// Weighted mean.
    pub mean: f64,
    /// Number of observations (sum of multiplicities).
    pub count: u32,
    /// `Σ w·(v − mean)²`.
    pub sum_of_squared_deviations: f64,
    /// Sample variance, `SSD / (n − 1)`.
    pub variance: f64,
    /// Square root of the sample variance.
    pub standard_deviation: f64,
}

impl AggregateResult {
    /// `n − 1`, the divisor of the sample variance; 0 for an empty result.
    pub fn degrees_of_freedom(&self) -> u32 {
        self.count.saturating_sub(1)
    }

    /// `SSD / n`, for comparison with the sample variance.
    pub fn population_variance(&self) -> f64 {
        self.sum_of_squared_deviations / f64::from(self.count)
    }
}

/// Mean, sum of squared deviations, sample variance and standard deviation of `dataset`.
///
/// Fails with [`ReelError::DegenerateDataset`] when the dataset holds fewer than two
/// observations, since the sample variance is undefined there.
pub fn compute_deviation_stats(dataset: &[DataPoint]) -> ReelResult<AggregateResult> {
    let mut count: u32 = 0;
    let mut weighted_sum = 0.0;
    for p in dataset {
        if p.multiplicity == 0 {
            return Err(ReelError::validation(format!(
                "data point {} has multiplicity 0",
                p.value
            )));
        }
        if !p.value.is_finite() {
            return Err(ReelError::validation("data point value must be finite"));
        }
        count = count
            .checked_add(p.multiplicity)
            .ok_or_else(|| ReelError::validation("dataset observation count overflows u32"))?;
        weighted_sum += p.value * f64::from(p.multiplicity);
    }

    if count <= 1 {
        return Err(ReelError::degenerate_dataset(format!(
            "sample variance needs at least 2 observations, got {count}"
        )));
    }

    let n = f64::from(count);
    let mean = weighted_sum / n;
    let sum_of_squared_deviations = dataset
        .iter()
        .map(|p| {
            let d = p.value - mean;
            f64::from(p.multiplicity) * d * d
        })
        .sum::<f64>();
    let variance = sum_of_squared_deviations / (n - 1.0);

    Ok(AggregateResult {
        mean,
        count,
        sum_of_squared_deviations,
        variance,
        standard_deviation: variance.sqrt(),
    })
}

/// Format a quantity for on-screen formulas: whole numbers without decimals, everything
/// else with two.
pub fn format_quantity(v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() < 1e-9 {
        format!("{rounded:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/aggregate.rs"]
mod tests;
