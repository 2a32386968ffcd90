//! Iteration of the pricing engine over curves and grids.
//!
//! Each call is one full, non-incremental pass. A domain error at any coordinate
//! aborts the pass and is returned as-is (it already carries that coordinate);
//! no partial curve or matrix is ever produced.

use crate::error::{DomainError, DomainResult};
use crate::grid::types::{CurvePoint, CurveSeries, GridField, GridMatrix, ProfitCurve, ProfitPoint};
use crate::model_params::{ModelParameters, PricePoint};
use crate::models::PricingEngine;

/// Adjusted call/put values for each spot against `fixed_strike`, in input order.
pub fn evaluate_curve<E: PricingEngine>(
    engine: &E,
    spots: &[f64],
    fixed_strike: f64,
    params: &ModelParameters,
) -> DomainResult<CurveSeries> {
    tracing::debug!(
        points = spots.len(),
        strike = fixed_strike,
        days = params.days_to_expiry,
        "evaluating curve"
    );

    let mut points = Vec::with_capacity(spots.len());
    for &spot in spots {
        let result = engine
            .price(PricePoint::new(spot, fixed_strike), params)
            .map_err(log_abort)?;
        points.push(CurvePoint { spot, result });
    }

    Ok(CurveSeries {
        strike: fixed_strike,
        points,
    })
}

/// One scalar per `(spot, strike)` cell, spot outer and strike inner.
pub fn evaluate_grid<E: PricingEngine>(
    engine: &E,
    spots: &[f64],
    strikes: &[f64],
    params: &ModelParameters,
    field: GridField,
) -> DomainResult<GridMatrix> {
    tracing::debug!(
        rows = spots.len(),
        cols = strikes.len(),
        field = field.label(),
        days = params.days_to_expiry,
        "evaluating grid"
    );

    let mut values = Vec::with_capacity(spots.len() * strikes.len());
    for &spot in spots {
        for &strike in strikes {
            let point = PricePoint::new(spot, strike);
            let value = cell_value(engine, point, params, field).map_err(log_abort)?;
            values.push(value);
        }
    }

    Ok(GridMatrix {
        field,
        spots: spots.to_vec(),
        strikes: strikes.to_vec(),
        values,
    })
}

/// Profit at expiry of a long call and a long put bought at `reference`.
///
/// Premiums are the theoretical prices at the reference point. For each spot `s`
/// of the curve the holder's profit is the intrinsic value at `s` minus the premium:
/// a call earns `s - K - premium` when `s >= K` and loses the premium otherwise; a
/// put earns `K - s - premium` when `s <= K` and loses the premium otherwise.
pub fn evaluate_profit_curve<E: PricingEngine>(
    engine: &E,
    spots: &[f64],
    reference: PricePoint,
    params: &ModelParameters,
) -> DomainResult<ProfitCurve> {
    tracing::debug!(
        points = spots.len(),
        reference_spot = reference.spot,
        strike = reference.strike,
        "evaluating profit curve"
    );

    let premiums = engine.theoretical(reference, params).map_err(log_abort)?;
    let k = reference.strike;

    let mut points = Vec::with_capacity(spots.len());
    for &spot in spots {
        if !(spot > 0.0) {
            return Err(log_abort(DomainError::NonPositivePrice { spot, strike: k }));
        }
        let call_profit = if spot < k {
            -premiums.call
        } else {
            spot - (k + premiums.call)
        };
        let put_profit = if spot > k {
            -premiums.put
        } else {
            k - (spot + premiums.put)
        };
        points.push(ProfitPoint {
            spot,
            call_profit,
            put_profit,
        });
    }

    Ok(ProfitCurve {
        strike: k,
        call_premium: premiums.call,
        put_premium: premiums.put,
        points,
    })
}

fn cell_value<E: PricingEngine>(
    engine: &E,
    point: PricePoint,
    params: &ModelParameters,
    field: GridField,
) -> DomainResult<f64> {
    Ok(match field {
        GridField::CallValue => engine.price(point, params)?.call_value,
        GridField::PutValue => engine.price(point, params)?.put_value,
        GridField::Nd2 => engine.probability_itm(point, params)?.nd2,
        GridField::TheoreticalCall => engine.theoretical(point, params)?.call,
        GridField::TheoreticalPut => engine.theoretical(point, params)?.put,
    })
}

fn log_abort(err: DomainError) -> DomainError {
    tracing::warn!(spot = err.point().spot, strike = err.point().strike, "evaluation aborted: {err}");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlackScholesEngine, ProbabilityResult, TheoreticalPrices};
    use std::cell::Cell;

    /// Engine that fails at one spot and counts how many points were priced.
    struct FailingEngine {
        fail_spot: f64,
        calls: Cell<usize>,
    }

    impl PricingEngine for FailingEngine {
        fn theoretical(
            &self,
            point: PricePoint,
            _params: &ModelParameters,
        ) -> DomainResult<TheoreticalPrices> {
            self.calls.set(self.calls.get() + 1);
            if point.spot == self.fail_spot {
                return Err(DomainError::NonFinite {
                    quantity: "call price",
                    spot: point.spot,
                    strike: point.strike,
                });
            }
            Ok(TheoreticalPrices {
                call: 1.0,
                put: 1.0,
            })
        }

        fn probability_itm(
            &self,
            point: PricePoint,
            params: &ModelParameters,
        ) -> DomainResult<ProbabilityResult> {
            self.theoretical(point, params)?;
            Ok(ProbabilityResult { nd2: 0.5 })
        }
    }

    #[test]
    fn test_grid_fails_fast_with_coordinate() {
        let engine = FailingEngine {
            fail_spot: 6.5,
            calls: Cell::new(0),
        };
        let spots = [5.0, 6.5, 8.0];
        let strikes = [5.0, 6.5];
        let err = evaluate_grid(&engine, &spots, &strikes, &ModelParameters::default(), GridField::Nd2)
            .unwrap_err();

        assert_eq!(err.point(), PricePoint::new(6.5, 5.0));
        // Row 0 (two cells) plus the failing first cell of row 1.
        assert_eq!(engine.calls.get(), 3);
    }

    #[test]
    fn test_curve_fails_fast() {
        let engine = FailingEngine {
            fail_spot: 8.0,
            calls: Cell::new(0),
        };
        let spots = [5.0, 8.0, 9.5, 11.0];
        assert!(evaluate_curve(&engine, &spots, 13.0, &ModelParameters::default()).is_err());
        assert_eq!(engine.calls.get(), 2);
    }

    #[test]
    fn test_profit_curve_rejects_non_positive_spot() {
        let err = evaluate_profit_curve(
            &BlackScholesEngine,
            &[5.0, 0.0],
            PricePoint::new(12.25, 13.0),
            &ModelParameters::default(),
        )
        .unwrap_err();
        assert_eq!(err.point(), PricePoint::new(0.0, 13.0));
    }

    #[test]
    fn test_empty_inputs() {
        let params = ModelParameters::default();
        let curve = evaluate_curve(&BlackScholesEngine, &[], 13.0, &params).unwrap();
        assert!(curve.is_empty());
        let grid = evaluate_grid(&BlackScholesEngine, &[5.0], &[], &params, GridField::CallValue)
            .unwrap();
        assert_eq!(grid.dims(), (1, 0));
        assert_eq!(grid.cell_count(), 0);
    }
}
