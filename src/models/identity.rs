use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Departments an identity may belong to. Complaint location departments
/// are free-form; identity departments are validated against this set.
pub const DEPARTMENTS: &[&str] = &[
    "IT Department",
    "Maintenance",
    "Security",
    "Mess",
    "Hostel",
    "Library",
    "Sports",
    "Transport",
    "Finance",
    "Academic",
    "General",
];

pub const DEFAULT_DEPARTMENT: &str = "General";

/// Closed role set. Role and department together fully determine
/// authorization scope; there is no per-resource ACL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Faculty,
    Head,
    Admin,
}

/// An authenticated actor. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub department: Option<String>,
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration payload. Role is never accepted from the caller: the
/// register endpoint always produces students, and admin identities come
/// only from seeding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Staff directory entry for assignment pickers — no contact details
/// beyond email, no hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffEntry {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub department: Option<String>,
}

impl From<&Identity> for StaffEntry {
    fn from(identity: &Identity) -> Self {
        StaffEntry {
            id: identity.id.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            role: identity.role,
            department: identity.department.clone(),
        }
    }
}
