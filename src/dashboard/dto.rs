use std::collections::BTreeMap;

use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::{
    applications::{Application, ApplicationStatus},
    interviews::Interview,
};

/// How far ahead an interview counts as upcoming.
pub const UPCOMING_WINDOW: Duration = Duration::days(7);
/// Size of the recent applications and interviews lists.
pub const RECENT_LIMIT: u32 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_applications: i64,
    pub applications_by_status: BTreeMap<ApplicationStatus, i64>,
    pub upcoming_interviews: i64,
    pub total_companies: i64,
    pub total_contacts: i64,
    pub recent_applications: Vec<Application>,
    pub recent_interviews: Vec<Interview>,
}

/// Zero-fills every status and returns the total alongside, so the map
/// always sums to the total.
pub fn fill_status_counts(
    rows: impl IntoIterator<Item = (ApplicationStatus, i64)>,
) -> (i64, BTreeMap<ApplicationStatus, i64>) {
    let mut counts: BTreeMap<_, _> = ApplicationStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for (status, n) in rows {
        *counts.entry(status).or_insert(0) += n;
    }
    let total = counts.values().sum();
    (total, counts)
}

/// Inclusive bounds of the upcoming-interview window.
pub fn upcoming_window(now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
    (now, now + UPCOMING_WINDOW)
}
