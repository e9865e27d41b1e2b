//! Point-in-time market snapshot consumed by the impact classifier and the
//! firm aggregator.

pub mod reading;

pub use reading::{
    DataProvenance, ExtendedIndex, IndexReading, MarketDataProvider, MarketReading, RateReading,
};
