// Closed-form Black-Scholes pieces for European options with a continuous
// dividend yield. These helpers do no input validation; callers go through
// `models::engine`, which rejects inputs for which the formulas are undefined.

/// Standard normal CDF: 0.5 * [1 + erf(x / sqrt(2))]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// The `d1` and `d2` terms of the closed form.
///
/// Both are evaluated from their own numerator rather than as `d1 - sigma*sqrt(T)`
/// so that `d2` is reproduced exactly as written:
///
/// ```text
/// d1 = (ln(S/K) + (r - q + sigma²/2) T) / (sigma sqrt(T))
/// d2 = (ln(S/K) + (r - q - sigma²/2) T) / (sigma sqrt(T))
/// ```
#[allow(non_snake_case)]
pub fn d1_d2(S: f64, K: f64, r: f64, q: f64, T: f64, sigma: f64) -> (f64, f64) {
    let log_sk = (S / K).ln();
    let half_var = sigma.powi(2) / 2.0;
    let denom = sigma * T.sqrt();
    let d1 = (log_sk + (r - q + half_var) * T) / denom;
    let d2 = (log_sk + (r - q - half_var) * T) / denom;
    (d1, d2)
}

/// Price of a European call option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_call_price(S: f64, K: f64, r: f64, q: f64, T: f64, sigma: f64) -> f64 {
    let (d1, d2) = d1_d2(S, K, r, q, T, sigma);
    call_from_d(S, K, r, q, T, d1, d2)
}

/// Price of a European put option under Black-Scholes assumptions.
#[allow(non_snake_case)]
pub fn bs_put_price(S: f64, K: f64, r: f64, q: f64, T: f64, sigma: f64) -> f64 {
    let (d1, d2) = d1_d2(S, K, r, q, T, sigma);
    put_from_d(S, K, r, q, T, d1, d2)
}

/// Call price from already computed `d1`, `d2`.
#[allow(non_snake_case)]
pub fn call_from_d(S: f64, K: f64, r: f64, q: f64, T: f64, d1: f64, d2: f64) -> f64 {
    S * (-q * T).exp() * norm_cdf(d1) - K * (-r * T).exp() * norm_cdf(d2)
}

/// Put price from already computed `d1`, `d2`. `N(-x)` is evaluated directly.
#[allow(non_snake_case)]
pub fn put_from_d(S: f64, K: f64, r: f64, q: f64, T: f64, d1: f64, d2: f64) -> f64 {
    K * (-r * T).exp() * norm_cdf(-d2) - S * (-q * T).exp() * norm_cdf(-d1)
}
