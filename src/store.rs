//! Store seam for complaint and identity records.
//!
//! The service talks to these traits only; the backing database is an
//! external collaborator. [`MemoryStore`] is the reference
//! implementation used by the dev server and the test suite: a pair of
//! `RwLock`ed maps with last-write-wins update semantics and atomic
//! per-record read-modify-write.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::auth::password;
use crate::models::complaint::filter::Query;
use crate::models::complaint::types::{Complaint, ComplaintUpdate};
use crate::models::identity::{Identity, Role, StaffEntry, DEFAULT_DEPARTMENT};

/// Opaque store failure, passed through to callers unmodified.
#[derive(Debug)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Matching records, newest first, at most `limit`.
    async fn find(&self, query: &Query, limit: usize) -> Result<Vec<Complaint>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Complaint>, StoreError>;

    /// Apply an update descriptor to one record. Only fields named by the
    /// descriptor are written. Returns the updated record, or None when
    /// the id does not exist.
    async fn update_by_id(
        &self,
        id: &str,
        update: &ComplaintUpdate,
    ) -> Result<Option<Complaint>, StoreError>;

    async fn insert(&self, complaint: Complaint) -> Result<Complaint, StoreError>;
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn insert(&self, identity: Identity) -> Result<Identity, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Faculty and head identities, for assignment pickers.
    async fn list_staff(&self) -> Result<Vec<StaffEntry>, StoreError>;
}

#[derive(Default)]
pub struct MemoryStore {
    complaints: RwLock<HashMap<String, Complaint>>,
    identities: RwLock<HashMap<String, Identity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl ComplaintStore for MemoryStore {
    async fn find(&self, query: &Query, limit: usize) -> Result<Vec<Complaint>, StoreError> {
        let complaints = self.complaints.read().await;
        let mut matched: Vec<Complaint> = complaints
            .values()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        // Newest first; id as tie-break for a deterministic order.
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matched.truncate(limit);
        Ok(matched)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Complaint>, StoreError> {
        Ok(self.complaints.read().await.get(id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        update: &ComplaintUpdate,
    ) -> Result<Option<Complaint>, StoreError> {
        let mut complaints = self.complaints.write().await;
        let Some(complaint) = complaints.get_mut(id) else {
            return Ok(None);
        };

        if let Some(status) = update.status {
            complaint.status = status;
        }
        if let Some(assigned_to) = &update.assigned_to {
            complaint.assigned_to = Some(assigned_to.clone());
        }
        if let Some(assigned_department) = &update.assigned_department {
            complaint.assigned_department = Some(assigned_department.clone());
        }
        if let Some(urgency) = update.urgency {
            complaint.urgency = urgency;
        }
        if let Some(priority) = update.priority {
            complaint.priority = priority;
        }
        if let Some(sla_hours) = update.sla_hours {
            complaint.sla_hours = sla_hours;
        }
        if let Some(due_at) = update.due_at {
            complaint.due_at = Some(due_at);
        }
        if let Some(escalated_at) = update.escalated_at {
            complaint.escalated_at = Some(escalated_at);
        }
        if let Some(escalated_to) = &update.escalated_to {
            complaint.escalated_to = Some(escalated_to.clone());
        }
        if let Some(escalation_reason) = &update.escalation_reason {
            complaint.escalation_reason = Some(escalation_reason.clone());
        }
        if let Some(description) = &update.description {
            complaint.description = description.clone();
        }
        if let Some(tags) = &update.tags {
            complaint.tags = tags.clone();
        }
        if let Some(comment) = &update.push_comment {
            complaint.comments.push(comment.clone());
        }
        complaint.updated_at = Utc::now();

        Ok(Some(complaint.clone()))
    }

    async fn insert(&self, complaint: Complaint) -> Result<Complaint, StoreError> {
        let mut complaints = self.complaints.write().await;
        if complaints.contains_key(&complaint.id) {
            return Err(StoreError(format!("duplicate complaint id {}", complaint.id)));
        }
        complaints.insert(complaint.id.clone(), complaint.clone());
        Ok(complaint)
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn insert(&self, identity: Identity) -> Result<Identity, StoreError> {
        let mut identities = self.identities.write().await;
        if identities.contains_key(&identity.id) {
            return Err(StoreError(format!("duplicate identity id {}", identity.id)));
        }
        identities.insert(identity.id.clone(), identity.clone());
        Ok(identity)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.identities.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read().await;
        Ok(identities.values().find(|i| i.email == email).cloned())
    }

    async fn list_staff(&self) -> Result<Vec<StaffEntry>, StoreError> {
        let identities = self.identities.read().await;
        let mut staff: Vec<StaffEntry> = identities
            .values()
            .filter(|i| matches!(i.role, Role::Faculty | Role::Head) && i.is_active)
            .map(StaffEntry::from)
            .collect();
        staff.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(staff)
    }
}

/// Seed the admin identity if it is not already present. Idempotent;
/// admin is the only role never reachable through registration.
pub async fn seed_admin(
    store: &dyn IdentityStore,
    email: &str,
    password: &str,
) -> Result<(), StoreError> {
    if store.find_by_email(email).await?.is_some() {
        log::info!("admin identity already present, skipping seed");
        return Ok(());
    }

    let hash = password::hash_password(password)
        .map_err(|e| StoreError(format!("admin password hash failed: {e}")))?;
    let admin = Identity {
        id: crate::models::complaint::types::new_record_id(),
        email: email.to_string(),
        password_hash: hash,
        role: Role::Admin,
        department: Some(DEFAULT_DEPARTMENT.to_string()),
        name: Some("Administrator".to_string()),
        student_id: None,
        phone: None,
        is_active: true,
        created_at: Utc::now(),
    };
    store.insert(admin).await?;
    log::info!("seeded admin identity {email}");
    Ok(())
}
