//! Complaint lifecycle orchestration.
//!
//! `ComplaintService` chains the pure pieces — authorization policy,
//! query scoping, update sanitizing, SLA derivation, visibility — around
//! the store seam. Handlers stay thin: they resolve an identity and call
//! one method here.

pub mod sanitize;
pub mod sla;
pub mod visibility;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::auth::{policy, scope, validate};
use crate::errors::AppError;
use crate::models::complaint::filter::ListFilter;
use crate::models::complaint::types::{
    self, Category, Complaint, NewComplaintPayload, Priority, Status, UpdatePayload, Urgency,
};
use crate::models::identity::{Identity, Role};
use crate::store::{ComplaintStore, IdentityStore};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult {
    pub items: Vec<Complaint>,
    pub applied_limit: usize,
}

#[derive(Debug, Serialize)]
pub struct CreatedComplaint {
    pub id: String,
}

/// One export row, unredacted, with owner-contact backfill. Rendering to
/// CSV (or anything else) belongs to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub complaint_id: String,
    pub subject: String,
    pub category: String,
    pub department: String,
    pub status: String,
    pub urgency: String,
    pub priority: String,
    pub assigned_to: String,
    pub created_at: String,
    pub due_at: String,
    pub sla_hours: i64,
    pub breached: bool,
    pub description: String,
    pub student_id: String,
    pub email: String,
    pub phone: String,
    pub building: String,
    pub room: String,
}

pub struct ComplaintService {
    complaints: Arc<dyn ComplaintStore>,
    identities: Arc<dyn IdentityStore>,
}

impl ComplaintService {
    pub fn new(complaints: Arc<dyn ComplaintStore>, identities: Arc<dyn IdentityStore>) -> Self {
        ComplaintService {
            complaints,
            identities,
        }
    }

    /// Create a complaint. `identity` is optional: anonymous submission
    /// is allowed, and a logged-in submitter of an anonymous complaint
    /// still gets an owner reference so they can track it later.
    pub async fn create(
        &self,
        identity: Option<&Identity>,
        payload: NewComplaintPayload,
    ) -> Result<CreatedComplaint, AppError> {
        let mut errors = Vec::new();

        let category = payload.category.as_deref().and_then(Category::parse);
        if category.is_none() {
            errors.push("Invalid category".to_string());
        }
        let subject = payload.subject.as_deref().unwrap_or("").trim().to_string();
        if subject.len() < 3 {
            errors.push("Subject is required (min 3 chars)".to_string());
        }
        let description = payload
            .description
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string();
        if description.split_whitespace().count() < 50 {
            errors.push("Description must be at least 50 words".to_string());
        }
        let email = payload
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());
        if !payload.is_anonymous && email.is_none() {
            errors.push("Email is required if not anonymous".to_string());
        }
        if let Some(email) = email {
            errors.extend(validate::validate_email(email));
        }
        if let Some(phone) = payload.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            errors.extend(validate::validate_phone(phone));
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let Some(category) = category else {
            return Err(AppError::Validation(errors));
        };

        let now = Utc::now();
        let sla_hours = sla::sla_hours_or_default(payload.sla_hours);
        let complaint = Complaint {
            id: types::new_record_id(),
            owner_id: identity.map(|i| i.id.clone()),
            is_anonymous: payload.is_anonymous,
            anonymous_id: payload.is_anonymous.then(types::new_anonymous_id),
            name: payload.name,
            email: email.map(String::from),
            phone: payload.phone,
            student_id: payload.student_id,
            category,
            subject,
            description,
            tags: payload.tags,
            media_files: payload.media_files,
            voice_note: payload.voice_note,
            building: payload.building,
            block: payload.block,
            room: payload.room,
            department: payload.department,
            assigned_to: None,
            assigned_department: None,
            status: Status::default(),
            urgency: Urgency::default(),
            priority: Priority::default(),
            sla_hours,
            due_at: Some(sla::derive_due_at(now, sla_hours, None)),
            escalated_at: None,
            escalated_to: None,
            escalation_reason: None,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let inserted = self.complaints.insert(complaint).await?;
        log::info!(
            "complaint {} created (category {}, anonymous {})",
            inserted.id,
            inserted.category.as_str(),
            inserted.is_anonymous
        );
        Ok(CreatedComplaint { id: inserted.id })
    }

    /// Role-scoped listing with per-item redaction. The requested limit
    /// is clamped, never rejected.
    pub async fn list(
        &self,
        identity: &Identity,
        filter: &ListFilter,
    ) -> Result<ListResult, AppError> {
        let query = scope::scoped_query(identity, filter);
        let limit = scope::clamp_limit(identity.role, filter.requested_limit());
        let items = self.complaints.find(&query, limit).await?;
        let items = items
            .iter()
            .map(|c| visibility::redact(c, identity))
            .collect();
        Ok(ListResult {
            items,
            applied_limit: limit,
        })
    }

    pub async fn get(&self, identity: &Identity, id: &str) -> Result<Complaint, AppError> {
        let complaint = self
            .complaints
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        if !policy::can_view(identity, &complaint) {
            return Err(AppError::AccessDenied(
                "You do not have permission to view this complaint".to_string(),
            ));
        }
        Ok(visibility::redact(&complaint, identity))
    }

    /// Role-scoped partial update: permission resolution, assignee
    /// normalization, field sanitizing, due-date backfill, store write,
    /// redacted result.
    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        payload: UpdatePayload,
    ) -> Result<Complaint, AppError> {
        let complaint = self
            .complaints
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let allowed = policy::resolve_update_permission(identity, &complaint).ok_or_else(|| {
            AppError::AccessDenied(
                "You do not have permission to update this complaint".to_string(),
            )
        })?;

        let payload = self.normalize_assignee(payload).await?;
        let mut update = sanitize::sanitize_update(allowed, &payload, identity)
            .map_err(AppError::Validation)?;

        // A record that never got a due date picks one up on any save.
        if complaint.due_at.is_none() && update.due_at.is_none() {
            let sla_hours = update.sla_hours.unwrap_or(complaint.sla_hours);
            update.due_at = Some(sla::derive_due_at(
                complaint.created_at,
                sla_hours,
                complaint.due_at,
            ));
        }

        let updated = self
            .complaints
            .update_by_id(id, &update)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(visibility::redact(&updated, identity))
    }

    /// Admin-only export: filter clauses without role scope, capped hard,
    /// no redaction, owner contact backfilled where the complaint's own
    /// copy is blank.
    pub async fn export(
        &self,
        identity: &Identity,
        filter: &ListFilter,
    ) -> Result<Vec<ExportRow>, AppError> {
        if identity.role != Role::Admin {
            return Err(AppError::AccessDenied("Admin access required".to_string()));
        }

        let query = scope::filter_only_query(filter);
        let items = self
            .complaints
            .find(&query, scope::ADMIN_MAX_LIMIT)
            .await?;

        let now = Utc::now();
        let mut rows = Vec::with_capacity(items.len());
        for complaint in &items {
            let owner = match &complaint.owner_id {
                Some(owner_id) => self.identities.find_by_id(owner_id).await?,
                None => None,
            };
            let assignee = match &complaint.assigned_to {
                Some(assignee_id) => self.identities.find_by_id(assignee_id).await?,
                None => None,
            };
            rows.push(build_export_row(complaint, owner.as_ref(), assignee.as_ref(), now));
        }
        Ok(rows)
    }

    /// Resolve an `assignedTo` value that is not already an id: an email
    /// is looked up (failing with `UnknownAssignee` when nobody matches);
    /// anything else is reinterpreted as a department assignment.
    async fn normalize_assignee(&self, mut payload: UpdatePayload) -> Result<UpdatePayload, AppError> {
        let Some(value) = payload.assigned_to.clone() else {
            return Ok(payload);
        };
        if value.is_empty() || types::looks_like_id(&value) {
            return Ok(payload);
        }
        if value.contains('@') {
            match self.identities.find_by_email(value.trim()).await? {
                Some(assignee) => payload.assigned_to = Some(assignee.id),
                None => return Err(AppError::UnknownAssignee(value)),
            }
        } else {
            payload.assigned_department = Some(value);
            payload.assigned_to = None;
        }
        Ok(payload)
    }
}

fn build_export_row(
    complaint: &Complaint,
    owner: Option<&Identity>,
    assignee: Option<&Identity>,
    now: chrono::DateTime<Utc>,
) -> ExportRow {
    // Assignee rendered as email, falling back to name, then raw id.
    let assigned_to = match (&complaint.assigned_to, assignee) {
        (Some(_), Some(assignee)) => {
            if !assignee.email.is_empty() {
                assignee.email.clone()
            } else if let Some(name) = assignee.name.clone().filter(|n| !n.is_empty()) {
                name
            } else {
                assignee.id.clone()
            }
        }
        (Some(id), None) => id.clone(),
        (None, _) => "Unassigned".to_string(),
    };

    let backfill = |own: &Option<String>, from_owner: Option<String>| -> String {
        own.clone()
            .filter(|v| !v.is_empty())
            .or(from_owner)
            .unwrap_or_default()
    };

    ExportRow {
        complaint_id: complaint.id.clone(),
        subject: complaint.subject.clone(),
        category: complaint.category.as_str().to_string(),
        department: complaint
            .department
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "Unassigned".to_string()),
        status: complaint.status.as_str().to_string(),
        urgency: complaint.urgency.as_str().to_string(),
        priority: complaint.priority.as_str().to_string(),
        assigned_to,
        created_at: complaint.created_at.to_rfc3339(),
        due_at: complaint
            .due_at
            .map(|d| d.to_rfc3339())
            .unwrap_or_default(),
        sla_hours: complaint.sla_hours,
        breached: sla::is_breached(complaint, now),
        description: complaint.description.clone(),
        student_id: backfill(
            &complaint.student_id,
            owner.and_then(|o| o.student_id.clone()),
        ),
        email: backfill(&complaint.email, owner.map(|o| o.email.clone())),
        phone: backfill(&complaint.phone, owner.and_then(|o| o.phone.clone())),
        building: complaint.building.clone().unwrap_or_default(),
        room: complaint.room.clone().unwrap_or_default(),
    }
}
