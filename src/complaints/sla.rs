use chrono::{DateTime, Duration, Utc};

use crate::models::complaint::types::{
    Complaint, Status, DEFAULT_SLA_HOURS, MAX_SLA_HOURS, MIN_SLA_HOURS,
};

/// Derive a due timestamp from the creation time and the SLA budget.
/// An already-set due date is returned unchanged: the clock is fixed at
/// first derivation and later SLA edits do not silently move it.
pub fn derive_due_at(
    created_at: DateTime<Utc>,
    sla_hours: i64,
    existing: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    match existing {
        Some(due_at) => due_at,
        None => created_at + Duration::hours(sla_hours),
    }
}

/// SLA budget to use at creation: the supplied value when it is inside
/// the allowed bounds, the default otherwise. Creation never rejects a
/// bad budget; only updates do.
pub fn sla_hours_or_default(requested: Option<i64>) -> i64 {
    match requested {
        Some(hours) if (MIN_SLA_HOURS..=MAX_SLA_HOURS).contains(&hours) => hours,
        _ => DEFAULT_SLA_HOURS,
    }
}

/// Whether a complaint has blown its deadline: a due date exists, `now`
/// is past it, and the complaint is not resolved. Computed, never stored.
pub fn is_breached(complaint: &Complaint, now: DateTime<Utc>) -> bool {
    match complaint.due_at {
        Some(due_at) => now > due_at && complaint.status != Status::Resolved,
        None => false,
    }
}
