use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Subscription level bounding monthly generation volume
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Basic,
    Pro,
    Business,
}

impl Tier {
    /// Monthly generation allowance; `None` means unlimited
    pub fn monthly_limit(&self) -> Option<u32> {
        match self {
            Tier::Free => Some(5),
            Tier::Basic => Some(50),
            Tier::Pro => Some(200),
            Tier::Business => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Basic => "basic",
            Tier::Pro => "pro",
            Tier::Business => "business",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "basic" => Ok(Tier::Basic),
            "pro" => Ok(Tier::Pro),
            "business" => Ok(Tier::Business),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

/// Generation count for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub month_key: String,
    pub count: u32,
}

impl UsageRecord {
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            month_key: month_key(now),
            count: 0,
        }
    }
}

/// Point-in-time view of the quota
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSnapshot {
    pub tier: Tier,
    pub month_key: String,
    pub count: u32,
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub resets_at: DateTime<Utc>,
}

/// "YYYY-MM" key of the month containing `now`
pub fn month_key(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

/// Midnight UTC on the first day of the month after `now`
pub fn next_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}
