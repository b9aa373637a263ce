use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::types::Complaint;

/// Raw list-filter parameters as they arrive on the query string. All
/// optional; unknown enum values simply match nothing rather than erroring.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListFilter {
    pub id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub dept: Option<String>,
    pub status: Option<String>,
    pub urgency: Option<String>,
    pub priority: Option<String>,
    /// "true" = assignee present, "false" = absent. The false case writes
    /// the query's single or-slot, replacing any role scope already there.
    pub assigned: Option<String>,
    pub limit: Option<String>,
}

impl ListFilter {
    /// Requested limit, or None when absent, unparsable, or zero.
    pub fn requested_limit(&self) -> Option<usize> {
        self.limit
            .as_deref()
            .and_then(|l| l.parse::<usize>().ok())
            .filter(|&l| l > 0)
    }
}

/// One predicate over a complaint record.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    OwnerIs(String),
    DepartmentIs(String),
    AssignedDepartmentIs(String),
    AssignedToIs(String),
    IdIs(String),
    StatusIs(String),
    UrgencyIs(String),
    PriorityIs(String),
    /// Inclusive creation-time range; either bound may be open.
    CreatedBetween(Option<DateTime<Utc>>, Option<DateTime<Utc>>),
    Assigned,
    Unassigned,
}

impl Clause {
    pub fn matches(&self, c: &Complaint) -> bool {
        match self {
            Clause::OwnerIs(id) => c.owner_id.as_deref() == Some(id.as_str()),
            Clause::DepartmentIs(d) => c.department.as_deref() == Some(d.as_str()),
            Clause::AssignedDepartmentIs(d) => {
                c.assigned_department.as_deref() == Some(d.as_str())
            }
            Clause::AssignedToIs(id) => c.assigned_to.as_deref() == Some(id.as_str()),
            Clause::IdIs(id) => c.id == *id,
            Clause::StatusIs(s) => c.status.as_str() == s,
            Clause::UrgencyIs(u) => c.urgency.as_str() == u,
            Clause::PriorityIs(p) => c.priority.as_str() == p,
            Clause::CreatedBetween(from, to) => {
                from.is_none_or(|f| c.created_at >= f) && to.is_none_or(|t| c.created_at <= t)
            }
            Clause::Assigned => c.assigned_to.is_some(),
            Clause::Unassigned => c.assigned_to.is_none(),
        }
    }
}

/// Explicit query representation: a conjunction of clauses plus at most
/// one disjunction slot. Like a document query's single `$or` key,
/// writing `any_of` again replaces the previous disjunction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub any_of: Option<Vec<Clause>>,
    pub all_of: Vec<Clause>,
}

impl Query {
    pub fn matches(&self, c: &Complaint) -> bool {
        if let Some(any) = &self.any_of {
            if !any.iter().any(|clause| clause.matches(c)) {
                return false;
            }
        }
        self.all_of.iter().all(|clause| clause.matches(c))
    }
}

/// Parse a filter timestamp: RFC 3339, or a bare date taken as midnight
/// UTC. Unparsable values are dropped, leaving that bound open.
pub fn parse_filter_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
