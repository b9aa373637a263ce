//! Presentation-time redaction.
//!
//! Scoping decides which records a viewer gets; this transform decides
//! what they see on each record they are already entitled to. It works on
//! a copy — the stored record is never mutated — and is idempotent, so
//! applying it twice is harmless.

use crate::models::complaint::types::Complaint;
use crate::models::identity::{Identity, Role};

pub const ANONYMOUS_NAME: &str = "Anonymous User";

/// Produce the viewer's copy of a complaint.
///
/// Anonymous masking applies to everyone except admins and the owner:
/// the owner reference and all personal contact fields are blanked and
/// the display name becomes a fixed placeholder. Owners always see their
/// own submission unmasked, anonymous or not.
///
/// Internal comments are visible only to admins, heads, and their own
/// author.
pub fn redact(complaint: &Complaint, viewer: &Identity) -> Complaint {
    let mut presented = complaint.clone();

    let is_owner = complaint.owner_id.as_deref() == Some(viewer.id.as_str());
    if complaint.is_anonymous && viewer.role != Role::Admin && !is_owner {
        presented.owner_id = None;
        presented.name = Some(ANONYMOUS_NAME.to_string());
        presented.email = None;
        presented.phone = None;
        presented.student_id = None;
    }

    if !matches!(viewer.role, Role::Admin | Role::Head) {
        presented
            .comments
            .retain(|c| !c.is_internal || c.author_id.as_deref() == Some(viewer.id.as_str()));
    }

    presented
}
