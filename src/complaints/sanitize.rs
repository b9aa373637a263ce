//! Field-level update filtering.
//!
//! Turns a raw partial-update payload into a [`ComplaintUpdate`]
//! descriptor containing only fields the caller is allowed to set, with
//! enumerated values and SLA bounds validated. Violations accumulate and
//! reject the whole update; nothing is partially applied.

use chrono::Utc;

use crate::auth::policy::Field;
use crate::models::complaint::types::{
    Comment, ComplaintUpdate, Priority, Status, UpdatePayload, Urgency, MAX_SLA_HOURS,
    MIN_SLA_HOURS,
};
use crate::models::identity::Identity;

/// Copy allowed-and-present fields from `payload` into a sanitized
/// descriptor. A payload key outside `allowed` is dropped silently — the
/// caller keeps their other edits; a present-but-invalid value is an
/// error.
///
/// A `comment` in the payload is appended on behalf of `author`
/// regardless of the allowed-field set: anyone who passed the update
/// permission check may comment.
pub fn sanitize_update(
    allowed: &[Field],
    payload: &UpdatePayload,
    author: &Identity,
) -> Result<ComplaintUpdate, Vec<String>> {
    let mut update = ComplaintUpdate::default();
    let mut errors = Vec::new();

    for field in allowed {
        match field {
            Field::Status => {
                if let Some(raw) = &payload.status {
                    match Status::parse(raw) {
                        Some(status) => update.status = Some(status),
                        None => errors.push("Invalid status".to_string()),
                    }
                }
            }
            Field::AssignedTo => {
                if let Some(assigned_to) = &payload.assigned_to {
                    update.assigned_to = Some(assigned_to.clone());
                }
            }
            Field::AssignedDepartment => {
                if let Some(dept) = &payload.assigned_department {
                    update.assigned_department = Some(dept.clone());
                }
            }
            Field::Urgency => {
                if let Some(raw) = &payload.urgency {
                    match Urgency::parse(raw) {
                        Some(urgency) => update.urgency = Some(urgency),
                        None => errors.push("Invalid urgency".to_string()),
                    }
                }
            }
            Field::Priority => {
                if let Some(raw) = &payload.priority {
                    match Priority::parse(raw) {
                        Some(priority) => update.priority = Some(priority),
                        None => errors.push("Invalid priority".to_string()),
                    }
                }
            }
            Field::SlaHours => {
                if let Some(hours) = payload.sla_hours {
                    if (MIN_SLA_HOURS..=MAX_SLA_HOURS).contains(&hours) {
                        update.sla_hours = Some(hours);
                    } else {
                        errors.push("Invalid SLA hours".to_string());
                    }
                }
            }
            Field::DueAt => {
                if let Some(due_at) = payload.due_at {
                    update.due_at = Some(due_at);
                }
            }
            Field::EscalatedAt => {
                if let Some(escalated_at) = payload.escalated_at {
                    update.escalated_at = Some(escalated_at);
                }
            }
            Field::EscalatedTo => {
                if let Some(escalated_to) = &payload.escalated_to {
                    update.escalated_to = Some(escalated_to.clone());
                }
            }
            Field::EscalationReason => {
                if let Some(reason) = &payload.escalation_reason {
                    update.escalation_reason = Some(reason.clone());
                }
            }
            Field::Description => {
                if let Some(description) = &payload.description {
                    update.description = Some(description.clone());
                }
            }
            Field::Tags => {
                if let Some(tags) = &payload.tags {
                    update.tags = Some(tags.clone());
                }
            }
        }
    }

    if let Some(text) = &payload.comment {
        if !text.trim().is_empty() {
            update.push_comment = Some(Comment {
                author_id: Some(author.id.clone()),
                text: text.clone(),
                is_internal: payload.is_internal.unwrap_or(false),
                created_at: Utc::now(),
            });
        }
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}
