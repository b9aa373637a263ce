//! Shared test infrastructure for complaint lifecycle tests.
//!
//! Provides an in-memory store + service pair, identity constructors for
//! each role, and a valid submission payload builder.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;

use grievance::complaints::ComplaintService;
use grievance::models::complaint::types::{Complaint, NewComplaintPayload};
use grievance::models::identity::{Identity, Role};
use grievance::store::{IdentityStore, MemoryStore};

/// A description comfortably past the 50-word minimum.
pub const LONG_DESCRIPTION: &str = "The mess hall on the second floor has been serving stale food \
    for the past two weeks and several students have reported stomach problems after eating there. \
    The vendors have been informed repeatedly but nothing has changed so far. We request an urgent \
    inspection of the kitchen, the storage area, and the supplier contracts before the situation \
    gets worse for everyone living on campus.";

pub fn setup() -> (Arc<MemoryStore>, ComplaintService) {
    let store = Arc::new(MemoryStore::new());
    let service = ComplaintService::new(store.clone(), store.clone());
    (store, service)
}

/// Build an identity without inserting it.
pub fn identity(id: &str, role: Role, department: Option<&str>) -> Identity {
    Identity {
        id: id.to_string(),
        email: format!("{id}@test.campus"),
        password_hash: String::new(),
        role,
        department: department.map(String::from),
        name: Some(format!("User {id}")),
        student_id: None,
        phone: None,
        is_active: true,
        created_at: Utc::now(),
    }
}

/// Build an identity and insert it into the store.
pub async fn add_identity(
    store: &MemoryStore,
    id: &str,
    role: Role,
    department: Option<&str>,
) -> Identity {
    insert_identity(store, identity(id, role, department)).await
}

/// Insert a prebuilt identity. Disambiguates the store's two `insert`
/// methods for tests that also import `ComplaintStore`.
pub async fn insert_identity(store: &MemoryStore, new: Identity) -> Identity {
    IdentityStore::insert(store, new)
        .await
        .expect("insert identity")
}

/// A bare complaint record for pure policy and transform tests; mutate
/// fields as needed.
pub fn complaint(id: &str) -> Complaint {
    use grievance::models::complaint::types::{Category, Priority, Status, Urgency};
    let now = Utc::now();
    Complaint {
        id: id.to_string(),
        owner_id: None,
        is_anonymous: false,
        anonymous_id: None,
        name: None,
        email: None,
        phone: None,
        student_id: None,
        category: Category::Other,
        subject: "Test subject".to_string(),
        description: LONG_DESCRIPTION.to_string(),
        tags: Vec::new(),
        media_files: Vec::new(),
        voice_note: None,
        building: None,
        block: None,
        room: None,
        department: None,
        assigned_to: None,
        assigned_department: None,
        status: Status::default(),
        urgency: Urgency::default(),
        priority: Priority::default(),
        sla_hours: 72,
        due_at: None,
        escalated_at: None,
        escalated_to: None,
        escalation_reason: None,
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// A valid non-anonymous submission payload.
pub fn valid_payload() -> NewComplaintPayload {
    NewComplaintPayload {
        email: Some("reporter@test.campus".to_string()),
        category: Some("Mess".to_string()),
        subject: Some("Food quality".to_string()),
        description: Some(LONG_DESCRIPTION.to_string()),
        ..NewComplaintPayload::default()
    }
}

/// Create a complaint through the service and read it back raw from the
/// store, bypassing redaction.
pub async fn create_raw(
    store: &MemoryStore,
    service: &ComplaintService,
    owner: Option<&Identity>,
    payload: NewComplaintPayload,
) -> Complaint {
    let created = service.create(owner, payload).await.expect("create");
    grievance::store::ComplaintStore::find_by_id(store, &created.id)
        .await
        .expect("find")
        .expect("created complaint present")
}
