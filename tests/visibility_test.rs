mod common;

use chrono::Utc;
use common::{complaint, identity};
use grievance::complaints::visibility::{redact, ANONYMOUS_NAME};
use grievance::models::complaint::types::Comment;
use grievance::models::identity::Role;

fn anonymous_complaint() -> grievance::models::complaint::types::Complaint {
    let mut c = complaint("c1");
    c.is_anonymous = true;
    c.owner_id = Some("stu".to_string());
    c.name = Some("Asha Kulkarni".to_string());
    c.email = Some("asha@test.campus".to_string());
    c.phone = Some("9876543210".to_string());
    c.student_id = Some("S-1042".to_string());
    c.department = Some("Hostel".to_string());
    c
}

fn comment(author: &str, text: &str, internal: bool) -> Comment {
    Comment {
        author_id: Some(author.to_string()),
        text: text.to_string(),
        is_internal: internal,
        created_at: Utc::now(),
    }
}

#[test]
fn anonymous_masked_for_uninvolved_staff() {
    let c = anonymous_complaint();
    let head = identity("hd", Role::Head, Some("Hostel"));

    let presented = redact(&c, &head);
    assert!(presented.owner_id.is_none());
    assert_eq!(presented.name.as_deref(), Some(ANONYMOUS_NAME));
    assert!(presented.email.is_none());
    assert!(presented.phone.is_none());
    assert!(presented.student_id.is_none());

    // The input record is untouched.
    assert_eq!(c.name.as_deref(), Some("Asha Kulkarni"));
}

#[test]
fn owner_sees_own_anonymous_submission_unmasked() {
    let c = anonymous_complaint();
    let owner = identity("stu", Role::Student, None);

    let presented = redact(&c, &owner);
    assert_eq!(presented.owner_id.as_deref(), Some("stu"));
    assert_eq!(presented.name.as_deref(), Some("Asha Kulkarni"));
    assert_eq!(presented.email.as_deref(), Some("asha@test.campus"));
}

#[test]
fn admin_sees_everything() {
    let c = anonymous_complaint();
    let admin = identity("adm", Role::Admin, None);

    let presented = redact(&c, &admin);
    assert_eq!(presented.name.as_deref(), Some("Asha Kulkarni"));
    assert_eq!(presented.student_id.as_deref(), Some("S-1042"));
}

#[test]
fn non_anonymous_complaint_is_untouched() {
    let mut c = complaint("c1");
    c.name = Some("Open Reporter".to_string());
    c.email = Some("open@test.campus".to_string());
    let faculty = identity("fac", Role::Faculty, Some("Mess"));

    let presented = redact(&c, &faculty);
    assert_eq!(presented.name.as_deref(), Some("Open Reporter"));
    assert_eq!(presented.email.as_deref(), Some("open@test.campus"));
}

#[test]
fn internal_comments_hidden_from_complainant_except_own() {
    let mut c = complaint("c1");
    c.owner_id = Some("stu".to_string());
    c.comments = vec![
        comment("fac", "public progress note", false),
        comment("fac", "internal triage note", true),
        comment("stu", "my own note", true),
    ];
    let owner = identity("stu", Role::Student, None);

    let presented = redact(&c, &owner);
    let texts: Vec<&str> = presented.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["public progress note", "my own note"]);
}

#[test]
fn heads_and_admins_see_internal_comments() {
    let mut c = complaint("c1");
    c.comments = vec![comment("fac", "internal triage note", true)];

    for viewer in [
        identity("hd", Role::Head, Some("Hostel")),
        identity("adm", Role::Admin, None),
    ] {
        let presented = redact(&c, &viewer);
        assert_eq!(presented.comments.len(), 1, "viewer {}", viewer.id);
    }
}

#[test]
fn redaction_is_idempotent() {
    let mut c = anonymous_complaint();
    c.comments = vec![
        comment("fac", "public", false),
        comment("fac", "internal", true),
    ];
    let faculty = identity("fac2", Role::Faculty, Some("Hostel"));

    let once = redact(&c, &faculty);
    let twice = redact(&once, &faculty);

    assert_eq!(once.owner_id, twice.owner_id);
    assert_eq!(once.name, twice.name);
    assert_eq!(once.email, twice.email);
    assert_eq!(once.phone, twice.phone);
    assert_eq!(once.student_id, twice.student_id);
    assert_eq!(once.comments.len(), twice.comments.len());
}
