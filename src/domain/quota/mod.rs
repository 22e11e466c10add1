pub mod model;
pub mod tracker;

pub use model::{month_key, next_month_start, Tier, UsageRecord, UsageSnapshot};
pub use tracker::QuotaTracker;
