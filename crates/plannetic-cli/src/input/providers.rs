//! File-backed collaborators: a JSON export of the client book and a JSON
//! market snapshot saved from the live feed.

use plannetic_core::client::{ClientRecord, ClientRecordProvider};
use plannetic_core::market::{MarketDataProvider, MarketReading};
use plannetic_core::{PlanneticError, PlanneticResult};

pub struct JsonClientBook {
    path: String,
}

impl JsonClientBook {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl ClientRecordProvider for JsonClientBook {
    fn list(&self) -> PlanneticResult<Vec<ClientRecord>> {
        super::file::read_json(&self.path).map_err(|e| PlanneticError::ProviderError {
            provider: "client-book".into(),
            reason: e.to_string(),
        })
    }
}

pub struct JsonMarketFeed {
    path: String,
}

impl JsonMarketFeed {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl MarketDataProvider for JsonMarketFeed {
    fn fetch(&self) -> PlanneticResult<MarketReading> {
        super::file::read_json(&self.path).map_err(|e| PlanneticError::ProviderError {
            provider: "market-data".into(),
            reason: e.to_string(),
        })
    }
}
