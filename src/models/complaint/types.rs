use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Default resolution budget in hours.
pub const DEFAULT_SLA_HOURS: i64 = 72;
/// Inclusive bounds for an explicitly supplied SLA budget (1 hour to 60 days).
pub const MIN_SLA_HOURS: i64 = 1;
pub const MAX_SLA_HOURS: i64 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Infrastructure,
    Faculty,
    Harassment,
    Hostel,
    Mess,
    Admin,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Infrastructure => "Infrastructure",
            Category::Faculty => "Faculty",
            Category::Harassment => "Harassment",
            Category::Hostel => "Hostel",
            Category::Mess => "Mess",
            Category::Admin => "Admin",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "Infrastructure" => Some(Category::Infrastructure),
            "Faculty" => Some(Category::Faculty),
            "Harassment" => Some(Category::Harassment),
            "Hostel" => Some(Category::Hostel),
            "Mess" => Some(Category::Mess),
            "Admin" => Some(Category::Admin),
            "Other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Workflow states. An unordered set, not a progression: any authorized
/// update may move a complaint to any member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Submitted,
    #[default]
    Pending,
    InReview,
    InProgress,
    Resolved,
    Rejected,
    Escalated,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "submitted",
            Status::Pending => "pending",
            Status::InReview => "in_review",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
            Status::Rejected => "rejected",
            Status::Escalated => "escalated",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "submitted" => Some(Status::Submitted),
            "pending" => Some(Status::Pending),
            "in_review" => Some(Status::InReview),
            "in_progress" => Some(Status::InProgress),
            "resolved" => Some(Status::Resolved),
            "rejected" => Some(Status::Rejected),
            "escalated" => Some(Status::Escalated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Urgency> {
        match s {
            "low" => Some(Urgency::Low),
            "medium" => Some(Urgency::Medium),
            "high" => Some(Urgency::High),
            "urgent" => Some(Urgency::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

/// A comment on a complaint. Append-only: the API models no edit or
/// delete. Internal comments are hidden from complainants at
/// presentation time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author_id: Option<String>,
    pub text: String,
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
}

/// The central record. `owner_id` is retained internally even for
/// anonymous complaints so the submitter can track their own submission;
/// anonymity is a presentation concern handled by the visibility
/// transform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: String,
    pub owner_id: Option<String>,
    pub is_anonymous: bool,
    /// Tracking token for anonymous submissions, distinct from the owner
    /// reference. System use only — never serialized to clients.
    #[serde(skip_serializing)]
    pub anonymous_id: Option<String>,

    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub student_id: Option<String>,

    pub category: Category,
    pub subject: String,
    pub description: String,
    pub tags: Vec<String>,

    pub media_files: Vec<String>,
    pub voice_note: Option<String>,

    pub building: Option<String>,
    pub block: Option<String>,
    pub room: Option<String>,
    pub department: Option<String>,

    pub assigned_to: Option<String>,
    pub assigned_department: Option<String>,

    pub status: Status,
    pub urgency: Urgency,
    pub priority: Priority,

    pub sla_hours: i64,
    pub due_at: Option<DateTime<Utc>>,

    pub escalated_at: Option<DateTime<Utc>>,
    pub escalated_to: Option<String>,
    pub escalation_reason: Option<String>,

    pub comments: Vec<Comment>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submission payload. Attachments arrive as opaque path references
/// recorded verbatim; upload storage lives outside this service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewComplaintPayload {
    pub is_anonymous: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub student_id: Option<String>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub media_files: Vec<String>,
    pub voice_note: Option<String>,
    pub building: Option<String>,
    pub block: Option<String>,
    pub room: Option<String>,
    pub department: Option<String>,
    pub sla_hours: Option<i64>,
}

/// Raw partial-update payload. Everything optional; the sanitizer decides
/// what survives based on the caller's allowed-field set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePayload {
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub assigned_department: Option<String>,
    pub urgency: Option<String>,
    pub priority: Option<String>,
    pub sla_hours: Option<i64>,
    pub due_at: Option<DateTime<Utc>>,
    pub escalated_at: Option<DateTime<Utc>>,
    pub escalated_to: Option<String>,
    pub escalation_reason: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub comment: Option<String>,
    pub is_internal: Option<bool>,
}

/// Sanitized update descriptor. Only fields explicitly set here are ever
/// written; the store leaves everything else untouched.
#[derive(Debug, Clone, Default)]
pub struct ComplaintUpdate {
    pub status: Option<Status>,
    pub assigned_to: Option<String>,
    pub assigned_department: Option<String>,
    pub urgency: Option<Urgency>,
    pub priority: Option<Priority>,
    pub sla_hours: Option<i64>,
    pub due_at: Option<DateTime<Utc>>,
    pub escalated_at: Option<DateTime<Utc>>,
    pub escalated_to: Option<String>,
    pub escalation_reason: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub push_comment: Option<Comment>,
}

impl ComplaintUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.assigned_to.is_none()
            && self.assigned_department.is_none()
            && self.urgency.is_none()
            && self.priority.is_none()
            && self.sla_hours.is_none()
            && self.due_at.is_none()
            && self.escalated_at.is_none()
            && self.escalated_to.is_none()
            && self.escalation_reason.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.push_comment.is_none()
    }
}

/// Tags may arrive as an array or as one comma-separated string.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagsField {
        List(Vec<String>),
        Csv(String),
    }

    match Option::<TagsField>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(TagsField::List(tags)) => Ok(tags),
        Some(TagsField::Csv(csv)) => Ok(csv
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()),
    }
}

/// Record ids (complaints and identities alike) are 12 random bytes,
/// hex-encoded: 24 lowercase hex characters, the shape the update
/// normalizer recognizes as "already an id".
pub fn new_record_id() -> String {
    let bytes: [u8; 12] = rand::rng().random();
    hex::encode(bytes)
}

/// Tracking token handed to anonymous submitters, unrelated to any
/// identity reference.
pub fn new_anonymous_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// The 24-hex shape produced by `new_record_id`.
pub fn looks_like_id(value: &str) -> bool {
    value.len() == 24 && value.chars().all(|c| c.is_ascii_hexdigit())
}
