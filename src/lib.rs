//! # Payoff-Lib: Black-Scholes Curves and Heatmaps
//!
//! `payoff-lib` prices European calls and puts under Black-Scholes with a continuous
//! dividend yield and evaluates them over either a 1-D range of underlying prices
//! or a 2-D grid of (underlying, strike) pairs, ready to be charted.
//!
//! ## Core Features
//!
//! - **Pricing**: closed-form call/put prices, `N(d2)` in-the-money probability
//! - **Moneyness adjustment**: theoretical price blended with intrinsic value on the
//!   in-the-money side of the strike
//! - **Curve and grid evaluation**: ordered, dense, fail-fast passes over price axes
//! - **Rendering**: SVG line charts and annotated heatmaps, CSV export
//!
//! ## Quick Start
//!
//! ```rust
//! use payoff_lib::{evaluate_curve, evaluate_grid, grid::heatmap_axis, grid::curve_spots};
//! use payoff_lib::{GridField, ModelParameters};
//!
//! let params = ModelParameters::new(0.0, 0.045, 0.25, 1000);
//!
//! // Adjusted call/put values along S = 5.0..=30.0 at K = 13
//! let curve = evaluate_curve(curve_spots().values(), 13.0, &params)?;
//! assert_eq!(curve.len(), 51);
//!
//! // N(d2) over the 17 x 17 (S, K) heatmap
//! let axis = heatmap_axis();
//! let nd2 = evaluate_grid(axis.values(), axis.values(), &params.with_days(200), GridField::Nd2)?;
//! assert_eq!(nd2.dims(), (17, 17));
//! # Ok::<(), payoff_lib::DomainError>(())
//! ```
//!
//! ## Errors
//!
//! Inputs for which the formula is undefined (non-positive prices, zero volatility or
//! expiry, overflowing results) produce a [`DomainError`] naming the offending
//! (spot, strike). Grid and curve evaluation stop at the first such point.

// ================================================================================================
// MODULES
// ================================================================================================

#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod grid;
pub mod model_params;
pub mod models;
pub mod render;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{DomainError, DomainResult};
pub use grid::{
    CurvePoint, CurveSeries, GridField, GridMatrix, PriceAxis, ProfitCurve, ProfitPoint,
};
pub use model_params::{ModelParameters, PricePoint};
pub use models::{
    BlackScholesEngine, PricingEngine, PricingResult, ProbabilityResult, TheoreticalPrices,
};

#[cfg(feature = "serde")]
pub use config::{DashboardConfig, ParameterRanges};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured dashboard settings.
///
/// - [`curve()`](default_configs::curve): profit-curve view, 1000 days to expiry
/// - [`heatmap()`](default_configs::heatmap): (S, K) heatmap view, 200 days to expiry
#[cfg(feature = "serde")]
pub mod default_configs {
    use crate::config::DashboardConfig;

    /// Curve view: spots 5.0..=30.0 step 0.5, strike 13, premiums priced at S = 12.25.
    ///
    /// ```rust
    /// let config = payoff_lib::default_configs::curve();
    /// assert_eq!(config.parameters.days_to_expiry, 1000);
    /// ```
    pub fn curve() -> DashboardConfig {
        DashboardConfig::curve()
    }

    /// Heatmap view: both axes 5..=29 step 1.5.
    pub fn heatmap() -> DashboardConfig {
        DashboardConfig::heatmap()
    }
}

// ================================================================================================
// PRICING API
// ================================================================================================

/// Moneyness-adjusted call and put values for one (spot, strike) pair.
///
/// # Example
///
/// ```rust
/// use payoff_lib::{price, ModelParameters, PricePoint};
///
/// let params = ModelParameters::new(0.0, 0.045, 0.25, 1000);
/// let result = price(PricePoint::new(12.25, 13.0), &params)?;
/// assert!((result.call_value - 2.3476).abs() < 1e-4);
/// # Ok::<(), payoff_lib::DomainError>(())
/// ```
pub fn price(point: PricePoint, params: &ModelParameters) -> DomainResult<PricingResult> {
    BlackScholesEngine.price(point, params)
}

/// Risk-neutral probability `N(d2)` that the call expires in the money.
pub fn probability_itm(
    point: PricePoint,
    params: &ModelParameters,
) -> DomainResult<ProbabilityResult> {
    BlackScholesEngine.probability_itm(point, params)
}

/// Unadjusted Black-Scholes call and put prices.
pub fn theoretical_prices(
    point: PricePoint,
    params: &ModelParameters,
) -> DomainResult<TheoreticalPrices> {
    BlackScholesEngine.theoretical(point, params)
}

/// Adjusted values for each spot against a fixed strike, in the order given.
pub fn evaluate_curve(
    spots: &[f64],
    fixed_strike: f64,
    params: &ModelParameters,
) -> DomainResult<CurveSeries> {
    grid::evaluate_curve(&BlackScholesEngine, spots, fixed_strike, params)
}

/// One `field` value per (spot, strike) cell; rows follow `spots`, columns `strikes`.
pub fn evaluate_grid(
    spots: &[f64],
    strikes: &[f64],
    params: &ModelParameters,
    field: GridField,
) -> DomainResult<GridMatrix> {
    grid::evaluate_grid(&BlackScholesEngine, spots, strikes, params, field)
}

/// Holder profit at expiry for options bought at `reference`, across `spots`.
pub fn evaluate_profit_curve(
    spots: &[f64],
    reference: PricePoint,
    params: &ModelParameters,
) -> DomainResult<ProfitCurve> {
    grid::evaluate_profit_curve(&BlackScholesEngine, spots, reference, params)
}
