pub mod client;
pub mod error;
pub mod market;
pub mod types;

#[cfg(feature = "portfolio")]
pub mod portfolio;

#[cfg(feature = "impact")]
pub mod impact;

#[cfg(feature = "firm")]
pub mod firm;

#[cfg(feature = "cashflow")]
pub mod cashflow;

pub use error::PlanneticError;
pub use types::*;

/// Standard result type for all plannetic operations
pub type PlanneticResult<T> = Result<T, PlanneticError>;
