//! Value types describing one pricing request: the scalar model inputs shared by
//! every point of an evaluation pass, and the (spot, strike) coordinate being priced.
//!
//! Both types are plain `Copy` values. Range enforcement for interactive inputs
//! lives in [`crate::config::ParameterRanges`]; the pricing core only rejects
//! inputs for which the Black-Scholes formula is undefined.

/// Calendar days per year used to convert days-to-expiry into a year fraction.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scalar Black-Scholes inputs for one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelParameters {
    /// Continuous dividend yield `q` (as decimal, e.g. 0.02 for 2%)
    pub dividend_yield: f64,
    /// Annualised risk-free rate `r`
    pub risk_free_rate: f64,
    /// Annualised volatility of the underlying, must be > 0
    pub volatility: f64,
    /// Calendar days until expiry, must be > 0
    pub days_to_expiry: u32,
}

impl ModelParameters {
    pub fn new(dividend_yield: f64, risk_free_rate: f64, volatility: f64, days_to_expiry: u32) -> Self {
        Self {
            dividend_yield,
            risk_free_rate,
            volatility,
            days_to_expiry,
        }
    }

    /// Time to expiry in years: `days_to_expiry / 365`.
    pub fn years_to_expiry(&self) -> f64 {
        f64::from(self.days_to_expiry) / DAYS_PER_YEAR
    }

    /// Copy of these parameters with a different expiry.
    pub fn with_days(self, days_to_expiry: u32) -> Self {
        Self {
            days_to_expiry,
            ..self
        }
    }
}

impl Default for ModelParameters {
    /// Initial slider positions of the dashboards: no dividend, 4.5% rate, 25% vol, 200 days.
    fn default() -> Self {
        Self {
            dividend_yield: 0.0,
            risk_free_rate: 0.045,
            volatility: 0.25,
            days_to_expiry: 200,
        }
    }
}

/// A single (spot, strike) coordinate. Both prices must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    /// Underlying price `S`
    pub spot: f64,
    /// Strike price `K`
    pub strike: f64,
}

impl PricePoint {
    pub fn new(spot: f64, strike: f64) -> Self {
        Self { spot, strike }
    }
}
