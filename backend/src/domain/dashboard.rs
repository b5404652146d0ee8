//! Admin dashboard counters.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// How far back "recent" reaches.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Start of the recent window ending at `now`.
pub fn recent_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(RECENT_WINDOW_DAYS)
}

/// Profile counts by review status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCounts {
    pub total: u64,
    /// Unapproved profiles at or above the completeness threshold,
    /// including rejected ones.
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub recently_created: u64,
}

/// User counts by account type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCounts {
    pub total: u64,
    pub companions: u64,
    pub clients: u64,
    pub recently_registered: u64,
}

/// Snapshot served by the dashboard endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub profiles: ProfileCounts,
    pub users: UserCounts,
    pub last_updated: DateTime<Utc>,
}
