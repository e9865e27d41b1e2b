pub mod decomposition;

pub use decomposition::{classify_investment, decompose, AssetBucket, PortfolioBreakdown};
