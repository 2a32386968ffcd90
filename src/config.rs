//! Dashboard configuration: initial parameters, accepted input ranges and price axes.
//!
//! Every section is optional in TOML and falls back to the defaults below, so a
//! file only needs the values it overrides:
//!
//! ```toml
//! [parameters]
//! volatility = 0.35
//! days_to_expiry = 90
//!
//! [grid.strike_axis]
//! start = 10.0
//! end = 20.0
//! step = 1.0
//! ```

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::grid::axis::PriceAxis;
use crate::model_params::{ModelParameters, PricePoint};

/// Closed interval accepted for one scalar input.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Nearest value inside the interval. Inverted bounds resolve to `max`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Both ends finite and `min <= max`.
    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(anyhow!(
                "{} range [{}, {}] must be finite",
                name,
                self.min,
                self.max
            ));
        }
        if self.min > self.max {
            return Err(anyhow!(
                "{} range min ({}) must not exceed max ({})",
                name,
                self.min,
                self.max
            ));
        }
        Ok(())
    }
}

/// Ranges enforced on interactive inputs before they reach the pricing core.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ParameterRanges {
    #[serde(default = "default_dividend_yield_bounds")]
    pub dividend_yield: Bounds,

    #[serde(default = "default_risk_free_rate_bounds")]
    pub risk_free_rate: Bounds,

    #[serde(default = "default_volatility_bounds")]
    pub volatility: Bounds,

    /// Minimum days to expiry; there is no upper bound
    #[serde(default = "default_min_days")]
    pub min_days: u32,
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            dividend_yield: default_dividend_yield_bounds(),
            risk_free_rate: default_risk_free_rate_bounds(),
            volatility: default_volatility_bounds(),
            min_days: default_min_days(),
        }
    }
}

impl ParameterRanges {
    /// Reject inverted or non-finite bounds.
    pub fn validate(&self) -> Result<()> {
        self.dividend_yield.validate("dividend yield")?;
        self.risk_free_rate.validate("risk-free rate")?;
        self.volatility.validate("volatility")?;
        Ok(())
    }

    /// Reject parameters outside the configured ranges.
    pub fn check(&self, params: &ModelParameters) -> Result<()> {
        self.validate()?;
        check_bound("dividend yield", params.dividend_yield, &self.dividend_yield)?;
        check_bound("risk-free rate", params.risk_free_rate, &self.risk_free_rate)?;
        check_bound("volatility", params.volatility, &self.volatility)?;
        if params.days_to_expiry < self.min_days {
            return Err(anyhow!(
                "days to expiry ({}) must be at least {}",
                params.days_to_expiry,
                self.min_days
            ));
        }
        Ok(())
    }

    /// Move each parameter to the nearest value inside its range.
    pub fn clamp(&self, params: &ModelParameters) -> ModelParameters {
        ModelParameters {
            dividend_yield: self.dividend_yield.clamp(params.dividend_yield),
            risk_free_rate: self.risk_free_rate.clamp(params.risk_free_rate),
            volatility: self.volatility.clamp(params.volatility),
            days_to_expiry: params.days_to_expiry.max(self.min_days),
        }
    }
}

fn check_bound(name: &str, value: f64, bounds: &Bounds) -> Result<()> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(anyhow!(
            "{} ({}) must be within [{}, {}]",
            name,
            value,
            bounds.min,
            bounds.max
        ))
    }
}

/// Evenly stepped axis description, inclusive of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AxisConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl AxisConfig {
    pub fn build(&self) -> Result<PriceAxis> {
        PriceAxis::stepped(self.start, self.end, self.step)
    }
}

/// Profit-curve dashboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CurveConfig {
    #[serde(default = "default_curve_spots")]
    pub spots: AxisConfig,

    /// Strike held fixed along the curve
    #[serde(default = "default_curve_strike")]
    pub strike: f64,

    /// Spot at which the premiums of the profit curve are priced
    #[serde(default = "default_reference_spot")]
    pub reference_spot: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            spots: default_curve_spots(),
            strike: default_curve_strike(),
            reference_spot: default_reference_spot(),
        }
    }
}

impl CurveConfig {
    pub fn reference_point(&self) -> PricePoint {
        PricePoint::new(self.reference_spot, self.strike)
    }
}

/// Heatmap dashboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_heatmap_axis")]
    pub spot_axis: AxisConfig,

    #[serde(default = "default_heatmap_axis")]
    pub strike_axis: AxisConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spot_axis: default_heatmap_axis(),
            strike_axis: default_heatmap_axis(),
        }
    }
}

/// Main configuration struct for the dashboards
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub parameters: ModelParameters,

    #[serde(default)]
    pub ranges: ParameterRanges,

    #[serde(default)]
    pub curve: CurveConfig,

    #[serde(default)]
    pub grid: GridConfig,
}

impl DashboardConfig {
    /// Profit-curve dashboard: 1000 days to expiry.
    pub fn curve() -> Self {
        Self {
            parameters: ModelParameters::default().with_days(1000),
            ..Self::default()
        }
    }

    /// Heatmap dashboard: 200 days to expiry.
    pub fn heatmap() -> Self {
        Self {
            parameters: ModelParameters::default().with_days(200),
            ..Self::default()
        }
    }

    /// Parse a TOML document and check the initial parameters against the ranges.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("invalid dashboard configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.ranges.validate().context("ranges")?;
        self.ranges.check(&self.parameters)?;
        if !(self.curve.strike > 0.0) || !(self.curve.reference_spot > 0.0) {
            return Err(anyhow!(
                "curve strike ({}) and reference spot ({}) must be > 0",
                self.curve.strike,
                self.curve.reference_spot
            ));
        }
        self.curve.spots.build().context("curve.spots")?;
        self.grid.spot_axis.build().context("grid.spot_axis")?;
        self.grid.strike_axis.build().context("grid.strike_axis")?;
        Ok(())
    }
}

fn default_dividend_yield_bounds() -> Bounds {
    Bounds::new(0.0, 0.1)
}

fn default_risk_free_rate_bounds() -> Bounds {
    Bounds::new(0.02, 0.2)
}

fn default_volatility_bounds() -> Bounds {
    Bounds::new(0.1, 0.5)
}

fn default_min_days() -> u32 {
    1
}

fn default_curve_spots() -> AxisConfig {
    AxisConfig {
        start: 5.0,
        end: 30.0,
        step: 0.5,
    }
}

fn default_curve_strike() -> f64 {
    13.0
}

fn default_reference_spot() -> f64 {
    12.25
}

fn default_heatmap_axis() -> AxisConfig {
    AxisConfig {
        start: 5.0,
        end: 29.0,
        step: 1.5,
    }
}
