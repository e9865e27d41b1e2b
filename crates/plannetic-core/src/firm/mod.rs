//! Firm-wide aggregation across the client book: review flags,
//! distributions for the dashboard and the per-client heat map.

pub mod analytics;
pub mod distribution;
pub mod review;

pub use analytics::{
    analyse_client_book, assess_client, build_client_impacts, build_firm_analytics, initials,
    DetailedClientImpact, FirmAnalytics,
};
pub use distribution::{asset_allocation, risk_distribution, AssetAllocation, RiskDistribution};
pub use review::{
    build_review_flags, client_review_flags, risk_tier_or_default, sort_review_flags, ReviewFlag,
    ReviewTrigger, DEFAULT_RISK_TIER,
};
