use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::quota::{Tier, UsageSnapshot};

/// Response for GET /api/usage
#[derive(Debug, Serialize, Deserialize)]
pub struct UsageResponse {
    pub period: String,
    pub month: String,
    pub tier: Tier,
    pub usage: UsageStats,
    pub limits: UsageLimits,
    pub resets_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsageStats {
    pub generations: u32,
    /// None when the tier is unlimited
    pub remaining: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsageLimits {
    /// None when the tier is unlimited
    pub generations: Option<u32>,
}

impl From<UsageSnapshot> for UsageResponse {
    fn from(snapshot: UsageSnapshot) -> Self {
        Self {
            period: "monthly".to_string(),
            month: snapshot.month_key,
            tier: snapshot.tier,
            usage: UsageStats {
                generations: snapshot.count,
                remaining: snapshot.remaining,
            },
            limits: UsageLimits {
                generations: snapshot.limit,
            },
            resets_at: snapshot.resets_at,
        }
    }
}
