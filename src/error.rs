use crate::model_params::PricePoint;

/// Inputs for which the Black-Scholes closed form is undefined.
///
/// Every variant carries the coordinate being priced so that a failed grid
/// evaluation can report exactly which cell aborted it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("spot and strike must be positive (spot={spot}, strike={strike})")]
    NonPositivePrice { spot: f64, strike: f64 },

    #[error(
        "volatility and time to expiry must be positive \
         (volatility={volatility}, days_to_expiry={days_to_expiry}) at spot={spot}, strike={strike}"
    )]
    DegenerateDiffusion {
        spot: f64,
        strike: f64,
        volatility: f64,
        days_to_expiry: u32,
    },

    #[error("non-finite {quantity} at spot={spot}, strike={strike}")]
    NonFinite {
        quantity: &'static str,
        spot: f64,
        strike: f64,
    },
}

impl DomainError {
    /// The (spot, strike) coordinate that triggered the error.
    pub fn point(&self) -> PricePoint {
        match *self {
            DomainError::NonPositivePrice { spot, strike }
            | DomainError::DegenerateDiffusion { spot, strike, .. }
            | DomainError::NonFinite { spot, strike, .. } => PricePoint::new(spot, strike),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
