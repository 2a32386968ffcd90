
use payoff_lib::models::bs::{d1_d2, norm_cdf};
use payoff_lib::{
    price, probability_itm, theoretical_prices, DomainError, ModelParameters, PricePoint,
};
use test_utils::{
    assert_close, curve_params, parameter_matrix, reference_norm_cdf, sampled_params,
    sampled_prices,
};

/// Reference point of the curve dashboard: S=12.25, K=13, r=4.5%, q=0, vol=25%, 1000 days.
/// Expected values come from an independent double-precision evaluation of the closed form.
#[test]
fn test_reference_scenario() {
    let params = curve_params();
    let point = PricePoint::new(12.25, 13.0);

    let t = params.years_to_expiry();
    assert_close(t, 2.739_726_027_397_26, 1e-12, "t");

    let (d1, d2) = d1_d2(12.25, 13.0, 0.045, 0.0, t, 0.25);
    assert_close(d1, 0.361_236_407_756_059_1, 1e-10, "d1");
    assert_close(d2, -0.052_566_536_545_124_84, 1e-10, "d2");

    let raw = theoretical_prices(point, &params).unwrap();
    assert_close(raw.call, 2.347_553_189_907_087, 1e-9, "raw call");
    assert_close(raw.put, 1.589_674_374_968_742, 1e-9, "raw put");

    // S < K: call keeps the raw price, put picks up intrinsic value.
    let adjusted = price(point, &params).unwrap();
    assert_close(adjusted.call_value, 2.347_553_189_907_087, 1e-6, "call value");
    assert_close(adjusted.put_value, 2.339_674_374_968_741, 1e-6, "put value");

    let prob = probability_itm(point, &params).unwrap();
    assert_close(prob.nd2, 0.479_038_640_029_536_6, 1e-10, "N(d2)");
}

#[test]
fn test_in_the_money_call_scenario() {
    let adjusted = price(PricePoint::new(20.0, 13.0), &curve_params()).unwrap();
    // S > K: call = (S - K) + raw, put unchanged.
    assert_close(adjusted.call_value, 15.766_740_230_735_707, 1e-6, "call value");
    assert_close(adjusted.put_value, 0.258_861_415_797_360_3, 1e-6, "put value");
}

#[test]
fn test_dividend_scenario() {
    let params = ModelParameters::new(0.02, 0.045, 0.3, 200);
    let point = PricePoint::new(8.0, 13.0);
    let adjusted = price(point, &params).unwrap();
    assert_close(adjusted.call_value, 0.013_375_582_222_184_323, 1e-6, "call value");
    assert_close(adjusted.put_value, 9.783_939_907_974_096, 1e-6, "put value");
    assert_close(
        probability_itm(point, &params).unwrap().nd2,
        0.012_687_942_706_426_37,
        1e-9,
        "N(d2)",
    );
}

/// At S == K both adjustment branches reduce to the raw price.
#[test]
fn test_at_the_money_continuity() {
    for params in parameter_matrix() {
        for &k in &[5.0, 13.0, 27.5] {
            let point = PricePoint::new(k, k);
            let raw = theoretical_prices(point, &params).unwrap();
            let adjusted = price(point, &params).unwrap();
            assert_eq!(adjusted.call_value, raw.call, "call at S=K={k}, {params:?}");
            assert_eq!(adjusted.put_value, raw.put, "put at S=K={k}, {params:?}");
        }
    }
}

/// Adjusted values stay close to raw values just either side of the strike.
#[test]
fn test_adjustment_near_strike() {
    let params = curve_params();
    let eps = 1e-9;
    let below = price(PricePoint::new(13.0 - eps, 13.0), &params).unwrap();
    let above = price(PricePoint::new(13.0 + eps, 13.0), &params).unwrap();
    assert_close(below.call_value, above.call_value, 1e-6, "call across strike");
    assert_close(below.put_value, above.put_value, 1e-6, "put across strike");
}

#[test]
fn test_put_call_parity() {
    let spots = sampled_prices(7, 40, 1.0, 60.0);
    let strikes = sampled_prices(11, 40, 1.0, 60.0);
    for (i, params) in sampled_params(3, 40).into_iter().enumerate() {
        let (s, k) = (spots[i], strikes[i]);
        let t = params.years_to_expiry();
        let raw = theoretical_prices(PricePoint::new(s, k), &params).unwrap();

        let forward_diff =
            s * (-params.dividend_yield * t).exp() - k * (-params.risk_free_rate * t).exp();
        let tol = 1e-9 * s.max(k);
        assert_close(raw.call - raw.put, forward_diff, tol, "put-call parity");
    }
}

#[test]
fn test_probability_bounds() {
    for params in parameter_matrix() {
        for &s in &[0.5, 5.0, 13.0, 29.0, 500.0] {
            let nd2 = probability_itm(PricePoint::new(s, 13.0), &params)
                .unwrap()
                .nd2;
            assert!((0.0..=1.0).contains(&nd2), "N(d2)={nd2} for S={s}, {params:?}");
        }
    }
    // Far tails saturate without leaving [0, 1].
    assert_eq!(norm_cdf(50.0), 1.0);
    assert_eq!(norm_cdf(-50.0), 0.0);
}

#[test]
fn test_norm_cdf_matches_reference() {
    let mut x = -8.0;
    while x <= 8.0 {
        // libm and statrs erf agree to roughly 1e-12; allow some headroom.
        assert_close(norm_cdf(x), reference_norm_cdf(x), 1e-10, "N(x)");
        x += 0.125;
    }
}

#[test]
fn test_raw_price_monotonicity_in_spot() {
    for params in parameter_matrix() {
        let mut prev: Option<(f64, f64)> = None;
        let mut s = 5.0;
        while s <= 30.0 {
            let raw = theoretical_prices(PricePoint::new(s, 13.0), &params).unwrap();
            if let Some((prev_call, prev_put)) = prev {
                assert!(raw.call >= prev_call - 1e-12, "call fell at S={s}, {params:?}");
                assert!(raw.put <= prev_put + 1e-12, "put rose at S={s}, {params:?}");
            }
            prev = Some((raw.call, raw.put));
            s += 0.25;
        }
    }
}

#[test]
fn test_domain_errors() {
    let params = curve_params();

    let err = price(PricePoint::new(-1.0, 5.0), &params).unwrap_err();
    assert!(matches!(err, DomainError::NonPositivePrice { .. }));
    assert_eq!(err.point(), PricePoint::new(-1.0, 5.0));

    let zero_vol = ModelParameters {
        volatility: 0.0,
        ..params
    };
    let err = price(PricePoint::new(5.0, 5.0), &zero_vol).unwrap_err();
    assert!(matches!(err, DomainError::DegenerateDiffusion { .. }));
    assert_eq!(err.point(), PricePoint::new(5.0, 5.0));

    assert!(price(PricePoint::new(5.0, 0.0), &params).is_err());
    assert!(probability_itm(PricePoint::new(5.0, 5.0), &params.with_days(0)).is_err());
    assert!(theoretical_prices(PricePoint::new(5.0, 5.0), &ModelParameters {
        volatility: -0.2,
        ..params
    })
    .is_err());
}

#[test]
fn test_error_messages_name_the_point() {
    let err = price(PricePoint::new(-1.0, 5.0), &curve_params()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("spot=-1"), "{msg}");
    assert!(msg.contains("strike=5"), "{msg}");
}
