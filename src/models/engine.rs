// src/models/engine.rs

//! Per-point pricing: validated Black-Scholes prices plus the moneyness adjustment.
//!
//! The adjusted values blend the theoretical price with intrinsic value depending
//! on which side of the strike the spot sits:
//!
//! ```text
//! call = raw_call                 if S <  K
//!        (S - K) + raw_call       if S >= K
//! put  = raw_put                  if S >  K
//!        (K - S) + raw_put        if S <= K
//! ```
//!
//! At `S == K` the intrinsic term is exactly zero, so both branches return the raw
//! value bit for bit and the adjusted values are continuous across the strike.

use crate::error::{DomainError, DomainResult};
use crate::model_params::{ModelParameters, PricePoint};
use crate::models::bs::{call_from_d, d1_d2, norm_cdf, put_from_d};

/// Moneyness-adjusted call and put values for one point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    pub call_value: f64,
    pub put_value: f64,
}

/// Risk-neutral probability that the call finishes in the money, `N(d2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbabilityResult {
    pub nd2: f64,
}

/// Unadjusted Black-Scholes prices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TheoreticalPrices {
    pub call: f64,
    pub put: f64,
}

/// Pricing seam used by the grid evaluator.
pub trait PricingEngine {
    /// Raw Black-Scholes call and put for `point`.
    fn theoretical(&self, point: PricePoint, params: &ModelParameters)
        -> DomainResult<TheoreticalPrices>;

    /// Moneyness-adjusted call and put for `point`.
    fn price(&self, point: PricePoint, params: &ModelParameters) -> DomainResult<PricingResult> {
        let raw = self.theoretical(point, params)?;
        Ok(adjust_for_moneyness(point, raw))
    }

    /// `N(d2)` for `point`.
    fn probability_itm(
        &self,
        point: PricePoint,
        params: &ModelParameters,
    ) -> DomainResult<ProbabilityResult>;
}

/// Closed-form European Black-Scholes with continuous dividend yield.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholesEngine;

impl PricingEngine for BlackScholesEngine {
    fn theoretical(
        &self,
        point: PricePoint,
        params: &ModelParameters,
    ) -> DomainResult<TheoreticalPrices> {
        validate_inputs(point, params)?;

        let s = point.spot;
        let k = point.strike;
        let r = params.risk_free_rate;
        let q = params.dividend_yield;
        let t = params.years_to_expiry();

        let (d1, d2) = d1_d2(s, k, r, q, t, params.volatility);
        ensure_finite("d1", d1, point)?;
        ensure_finite("d2", d2, point)?;

        let call = call_from_d(s, k, r, q, t, d1, d2);
        let put = put_from_d(s, k, r, q, t, d1, d2);
        ensure_finite("call price", call, point)?;
        ensure_finite("put price", put, point)?;

        Ok(TheoreticalPrices { call, put })
    }

    fn probability_itm(
        &self,
        point: PricePoint,
        params: &ModelParameters,
    ) -> DomainResult<ProbabilityResult> {
        validate_inputs(point, params)?;

        let (_, d2) = d1_d2(
            point.spot,
            point.strike,
            params.risk_free_rate,
            params.dividend_yield,
            params.years_to_expiry(),
            params.volatility,
        );
        ensure_finite("d2", d2, point)?;

        Ok(ProbabilityResult { nd2: norm_cdf(d2) })
    }
}

/// Apply the moneyness blend to raw prices priced at `point`.
pub fn adjust_for_moneyness(point: PricePoint, raw: TheoreticalPrices) -> PricingResult {
    let s = point.spot;
    let k = point.strike;

    let call_value = if s < k { raw.call } else { (s - k) + raw.call };
    let put_value = if s > k { raw.put } else { (k - s) + raw.put };

    PricingResult {
        call_value,
        put_value,
    }
}

fn validate_inputs(point: PricePoint, params: &ModelParameters) -> DomainResult<()> {
    // Negated comparisons so NaN inputs are rejected too.
    if !(point.spot > 0.0) || !(point.strike > 0.0) {
        return Err(DomainError::NonPositivePrice {
            spot: point.spot,
            strike: point.strike,
        });
    }
    if !(params.volatility > 0.0) || !params.volatility.is_finite() || params.days_to_expiry == 0 {
        return Err(DomainError::DegenerateDiffusion {
            spot: point.spot,
            strike: point.strike,
            volatility: params.volatility,
            days_to_expiry: params.days_to_expiry,
        });
    }
    Ok(())
}

fn ensure_finite(quantity: &'static str, value: f64, point: PricePoint) -> DomainResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite {
            quantity,
            spot: point.spot,
            strike: point.strike,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> ModelParameters {
        ModelParameters::new(0.0, 0.045, 0.25, 1000)
    }

    #[test]
    fn test_adjustment_below_strike() {
        let raw = TheoreticalPrices {
            call: 1.5,
            put: 2.5,
        };
        let adjusted = adjust_for_moneyness(PricePoint::new(10.0, 13.0), raw);
        assert_eq!(adjusted.call_value, 1.5);
        assert_eq!(adjusted.put_value, (13.0 - 10.0) + 2.5);
    }

    #[test]
    fn test_adjustment_above_strike() {
        let raw = TheoreticalPrices {
            call: 1.5,
            put: 2.5,
        };
        let adjusted = adjust_for_moneyness(PricePoint::new(20.0, 13.0), raw);
        assert_eq!(adjusted.call_value, (20.0 - 13.0) + 1.5);
        assert_eq!(adjusted.put_value, 2.5);
    }

    #[test]
    fn test_adjustment_at_the_money_is_raw() {
        let raw = TheoreticalPrices {
            call: 1.25,
            put: 0.75,
        };
        let adjusted = adjust_for_moneyness(PricePoint::new(13.0, 13.0), raw);
        assert_eq!(adjusted.call_value, raw.call);
        assert_eq!(adjusted.put_value, raw.put);
    }

    #[test]
    fn test_adjustment_at_the_money_keeps_every_bit() {
        // Small raw values lose low bits under K - raw; the adjusted value must not.
        let raw = TheoreticalPrices {
            call: 0.010_578_053_328_953_896,
            put: 0.1 + 0.2,
        };
        let adjusted = adjust_for_moneyness(PricePoint::new(5.0, 5.0), raw);
        assert_eq!(adjusted.call_value.to_bits(), raw.call.to_bits());
        assert_eq!(adjusted.put_value.to_bits(), raw.put.to_bits());

        let params = ModelParameters::new(0.0, 0.02, 0.1, 1);
        let point = PricePoint::new(5.0, 5.0);
        let raw = BlackScholesEngine.theoretical(point, &params).unwrap();
        let priced = BlackScholesEngine.price(point, &params).unwrap();
        assert_eq!(priced.call_value, raw.call);
        assert_eq!(priced.put_value, raw.put);
    }

    #[test]
    fn test_reference_scenario() {
        let engine = BlackScholesEngine;
        let result = engine
            .price(PricePoint::new(12.25, 13.0), &reference_params())
            .unwrap();
        assert!((result.call_value - 2.347_553_189_907_087).abs() < 1e-6);
        // S < K: put is routed through the intrinsic branch.
        assert!((result.put_value - 2.339_674_374_968_741).abs() < 1e-6);
    }

    #[test]
    fn test_negative_spot_rejected() {
        let err = BlackScholesEngine
            .price(PricePoint::new(-1.0, 5.0), &reference_params())
            .unwrap_err();
        assert!(matches!(err, DomainError::NonPositivePrice { .. }));
        assert_eq!(err.point(), PricePoint::new(-1.0, 5.0));
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let params = ModelParameters {
            volatility: 0.0,
            ..reference_params()
        };
        let err = BlackScholesEngine
            .price(PricePoint::new(5.0, 5.0), &params)
            .unwrap_err();
        assert!(matches!(err, DomainError::DegenerateDiffusion { .. }));
    }

    #[test]
    fn test_zero_days_rejected() {
        let params = reference_params().with_days(0);
        assert!(BlackScholesEngine
            .probability_itm(PricePoint::new(5.0, 5.0), &params)
            .is_err());
    }

    #[test]
    fn test_nan_strike_rejected() {
        let err = BlackScholesEngine
            .theoretical(PricePoint::new(5.0, f64::NAN), &reference_params())
            .unwrap_err();
        assert!(matches!(err, DomainError::NonPositivePrice { .. }));
    }

    #[test]
    fn test_overflowing_rate_is_non_finite() {
        let params = ModelParameters::new(0.0, -1.0e6, 0.25, 1000);
        let err = BlackScholesEngine
            .theoretical(PricePoint::new(10.0, 13.0), &params)
            .unwrap_err();
        assert!(matches!(err, DomainError::NonFinite { .. }));
    }
}
