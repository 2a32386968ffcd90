use anyhow::{anyhow, Result};

/// Largest number of values [`PriceAxis::stepped`] will generate.
pub const MAX_AXIS_LEN: usize = 100_000;

/// An ordered sequence of prices used as one axis of a curve or heatmap.
///
/// Order is preserved exactly as given; duplicates are allowed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceAxis {
    values: Vec<f64>,
}

impl PriceAxis {
    /// Evenly spaced prices from `start` up to and including `end`.
    ///
    /// Values are computed as `start + i * step` rather than by accumulation, and
    /// `end` is included when it lies on the lattice (up to rounding noise).
    pub fn stepped(start: f64, end: f64, step: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || !step.is_finite() {
            return Err(anyhow!(
                "PriceAxis: start={}, end={}, step={} must all be finite",
                start,
                end,
                step
            ));
        }
        if step <= 0.0 {
            return Err(anyhow!("PriceAxis: step ({}) must be > 0", step));
        }
        if end < start {
            return Err(anyhow!(
                "PriceAxis: end ({}) must not be below start ({})",
                end,
                start
            ));
        }

        let intervals = ((end - start) / step + 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_AXIS_LEN as f64 {
            return Err(anyhow!(
                "PriceAxis: {}..={} in steps of {} exceeds {} values",
                start,
                end,
                step,
                MAX_AXIS_LEN
            ));
        }
        let count = intervals as usize + 1;
        let values = (0..count).map(|i| start + i as f64 * step).collect();
        Ok(Self { values })
    }

    /// Axis from explicit values, kept in the given order.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for PriceAxis {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

impl AsRef<[f64]> for PriceAxis {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Spot range of the profit-curve dashboard: 5.0 to 30.0 in steps of 0.5 (51 values).
pub fn curve_spots() -> PriceAxis {
    PriceAxis::from_values((0..=50).map(|i| 5.0 + i as f64 * 0.5).collect())
}

/// Spot and strike axis of the heatmap dashboard: 5 to 29 in steps of 1.5 (17 values).
pub fn heatmap_axis() -> PriceAxis {
    PriceAxis::from_values((0..=16).map(|i| 5.0 + i as f64 * 1.5).collect())
}
