//! Role-scoped query construction for complaint listings.
//!
//! `scoped_query` is the only place a list query is built; it layers the
//! caller's role scope first, then the optional user filters. Keeping the
//! branching here, over an explicit [`Query`] value, means the store never
//! sees an unscoped read from a non-admin caller.

use crate::models::complaint::filter::{parse_filter_date, Clause, ListFilter, Query};
use crate::models::identity::{Identity, Role};

/// Default page size when the caller asks for nothing.
pub const DEFAULT_LIMIT: usize = 100;
/// Hard cap for non-admin listings.
pub const MAX_LIMIT: usize = 1_000;
/// Hard cap for admin listings and exports.
pub const ADMIN_MAX_LIMIT: usize = 10_000;

/// Build the role-scoped query for a listing.
///
/// Base scope by role: admins see everything; heads see their
/// department's records, records assigned to their department, and
/// records assigned to them personally; faculty see their assignments
/// and their department's records; students see only their own.
///
/// User filters are AND-combined on top, with one deliberate,
/// long-standing exception: `assigned=false` writes the query's single
/// or-slot and therefore REPLACES a head/faculty role scope instead of
/// intersecting with it.
pub fn scoped_query(identity: &Identity, filter: &ListFilter) -> Query {
    let mut query = Query::default();

    match identity.role {
        Role::Admin => {}
        Role::Head => {
            let mut any = Vec::new();
            if let Some(dept) = &identity.department {
                any.push(Clause::DepartmentIs(dept.clone()));
                any.push(Clause::AssignedDepartmentIs(dept.clone()));
            }
            any.push(Clause::AssignedToIs(identity.id.clone()));
            query.any_of = Some(any);
        }
        Role::Faculty => {
            let mut any = vec![Clause::AssignedToIs(identity.id.clone())];
            if let Some(dept) = &identity.department {
                any.push(Clause::DepartmentIs(dept.clone()));
            }
            query.any_of = Some(any);
        }
        Role::Student => {
            query
                .all_of
                .push(Clause::OwnerIs(identity.id.clone()));
        }
    }

    apply_filters(&mut query, filter);
    query
}

/// Filter-only query with no role scope. Used by the admin export, which
/// gates on role before reaching the store.
pub fn filter_only_query(filter: &ListFilter) -> Query {
    let mut query = Query::default();
    apply_filters(&mut query, filter);
    query
}

fn apply_filters(query: &mut Query, filter: &ListFilter) {
    if let Some(id) = &filter.id {
        query.all_of.push(Clause::IdIs(id.clone()));
    }
    if filter.from.is_some() || filter.to.is_some() {
        let from = filter.from.as_deref().and_then(parse_filter_date);
        let to = filter.to.as_deref().and_then(parse_filter_date);
        query.all_of.push(Clause::CreatedBetween(from, to));
    }
    if let Some(dept) = &filter.dept {
        query.all_of.push(Clause::DepartmentIs(dept.clone()));
    }
    if let Some(status) = &filter.status {
        query.all_of.push(Clause::StatusIs(status.clone()));
    }
    if let Some(urgency) = &filter.urgency {
        query.all_of.push(Clause::UrgencyIs(urgency.clone()));
    }
    if let Some(priority) = &filter.priority {
        query.all_of.push(Clause::PriorityIs(priority.clone()));
    }
    match filter.assigned.as_deref() {
        Some("true") => query.all_of.push(Clause::Assigned),
        // Overwrites any role-scope or-clause; see module docs.
        Some("false") => query.any_of = Some(vec![Clause::Unassigned]),
        _ => {}
    }
}

/// Clamp a requested result limit to the caller's cap. Never errors:
/// oversized requests are silently reduced, absent or zero requests get
/// the default.
pub fn clamp_limit(role: Role, requested: Option<usize>) -> usize {
    let max = if role == Role::Admin {
        ADMIN_MAX_LIMIT
    } else {
        MAX_LIMIT
    };
    requested.unwrap_or(DEFAULT_LIMIT).min(max)
}
