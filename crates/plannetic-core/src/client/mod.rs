//! Client-side inputs: financial profiles, client records, and the
//! collaborator interfaces that supply them.

pub mod aum;
pub mod profile;
pub mod provider;

pub use aum::{AumCalculator, AumSummary, HoldingsAumCalculator};
pub use profile::{ClientFinancialProfile, ClientRecord, Investment, MaritalStatus, Pension};
pub use provider::ClientRecordProvider;
