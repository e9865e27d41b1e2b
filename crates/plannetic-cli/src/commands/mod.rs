pub mod cashflow;
pub mod firm;
pub mod portfolio;
