pub mod bs;
pub mod engine;

pub use engine::{
    adjust_for_moneyness, BlackScholesEngine, PricingEngine, PricingResult, ProbabilityResult,
    TheoreticalPrices,
};
