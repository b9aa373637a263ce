//! Role-scoped authorization for complaint records.
//!
//! Two pure decision functions consumed by every read or mutation path:
//! `can_view` answers "may this identity see this record at all", and
//! `resolve_update_permission` answers "may it mutate the record, and
//! which fields". Both take the identity explicitly — nothing here reads
//! request state or touches the store — so they are unit-testable against
//! plain values.
//!
//! Denial is a normal result, not an error; callers map it to an
//! access-denied response.

use crate::models::complaint::Complaint;
use crate::models::identity::{Identity, Role};

/// Complaint fields a role may set in one update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Status,
    AssignedTo,
    AssignedDepartment,
    Urgency,
    Priority,
    SlaHours,
    DueAt,
    EscalatedAt,
    EscalatedTo,
    EscalationReason,
    Description,
    Tags,
}

/// Admins control the full triage surface, including the SLA clock.
pub const ADMIN_FIELDS: &[Field] = &[
    Field::Status,
    Field::AssignedTo,
    Field::Urgency,
    Field::Priority,
    Field::SlaHours,
    Field::DueAt,
    Field::AssignedDepartment,
    Field::EscalatedAt,
    Field::EscalatedTo,
    Field::EscalationReason,
];

/// Heads triage within their department but cannot touch the SLA clock.
pub const HEAD_FIELDS: &[Field] = &[
    Field::Status,
    Field::AssignedTo,
    Field::Urgency,
    Field::Priority,
    Field::AssignedDepartment,
    Field::EscalatedAt,
    Field::EscalatedTo,
    Field::EscalationReason,
];

/// Assigned faculty work the complaint but cannot reassign it.
pub const FACULTY_FIELDS: &[Field] = &[Field::Status, Field::Urgency, Field::Priority];

/// Owners may refine their own submission.
pub const OWNER_FIELDS: &[Field] = &[Field::Description, Field::Tags];

fn is_owner(identity: &Identity, complaint: &Complaint) -> bool {
    complaint.owner_id.as_deref() == Some(identity.id.as_str())
}

fn is_assignee(identity: &Identity, complaint: &Complaint) -> bool {
    complaint.assigned_to.as_deref() == Some(identity.id.as_str())
}

fn department_matches(identity: &Identity, complaint: &Complaint) -> bool {
    match identity.department.as_deref() {
        Some(dept) => {
            complaint.department.as_deref() == Some(dept)
                || complaint.assigned_department.as_deref() == Some(dept)
        }
        None => false,
    }
}

/// Whether `identity` may see `complaint` at all. Grants, in order:
/// admin, owner (anonymity does not hide a record from its own
/// submitter), head/faculty with a department match, assignee.
pub fn can_view(identity: &Identity, complaint: &Complaint) -> bool {
    if identity.role == Role::Admin {
        return true;
    }
    if is_owner(identity, complaint) {
        return true;
    }
    if matches!(identity.role, Role::Head | Role::Faculty) && department_matches(identity, complaint)
    {
        return true;
    }
    is_assignee(identity, complaint)
}

/// Resolve update eligibility and the allowed-field set in one step.
///
/// A switch over the closed role set; each arm is exclusive. A faculty
/// owner who is not the assignee is denied — the owner grant belongs to
/// the student arm only, and there is no fall-through between arms.
pub fn resolve_update_permission(
    identity: &Identity,
    complaint: &Complaint,
) -> Option<&'static [Field]> {
    match identity.role {
        Role::Admin => Some(ADMIN_FIELDS),
        Role::Head if department_matches(identity, complaint) => Some(HEAD_FIELDS),
        Role::Head => None,
        Role::Faculty if is_assignee(identity, complaint) => Some(FACULTY_FIELDS),
        Role::Faculty => None,
        Role::Student if is_owner(identity, complaint) => Some(OWNER_FIELDS),
        Role::Student => None,
    }
}
