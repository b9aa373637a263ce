mod common;

use common::{complaint, identity};
use grievance::auth::policy::{
    can_view, resolve_update_permission, Field, ADMIN_FIELDS, FACULTY_FIELDS, HEAD_FIELDS,
    OWNER_FIELDS,
};
use grievance::models::identity::Role;

// ---------------------------------------------------------------------------
// can_view
// ---------------------------------------------------------------------------

#[test]
fn admin_views_everything() {
    let admin = identity("adm", Role::Admin, Some("General"));
    let mut c = complaint("c1");
    c.is_anonymous = true;
    c.department = Some("Hostel".to_string());
    assert!(can_view(&admin, &c));
}

#[test]
fn owner_views_own_even_when_anonymous() {
    let student = identity("stu", Role::Student, None);
    let mut c = complaint("c1");
    c.owner_id = Some("stu".to_string());
    c.is_anonymous = true;
    assert!(can_view(&student, &c));
}

#[test]
fn head_views_department_and_assigned_department() {
    let head = identity("hd", Role::Head, Some("Hostel"));

    let mut by_dept = complaint("c1");
    by_dept.department = Some("Hostel".to_string());
    assert!(can_view(&head, &by_dept));

    let mut by_assigned_dept = complaint("c2");
    by_assigned_dept.department = Some("Mess".to_string());
    by_assigned_dept.assigned_department = Some("Hostel".to_string());
    assert!(can_view(&head, &by_assigned_dept));

    let mut other = complaint("c3");
    other.department = Some("Mess".to_string());
    assert!(!can_view(&head, &other));
}

#[test]
fn faculty_without_department_needs_assignment() {
    let faculty = identity("fac", Role::Faculty, None);
    let mut c = complaint("c1");
    c.department = Some("Library".to_string());
    assert!(!can_view(&faculty, &c));

    c.assigned_to = Some("fac".to_string());
    assert!(can_view(&faculty, &c));
}

#[test]
fn assignee_views_regardless_of_department() {
    let faculty = identity("fac", Role::Faculty, Some("Library"));
    let mut c = complaint("c1");
    c.department = Some("Mess".to_string());
    c.assigned_to = Some("fac".to_string());
    assert!(can_view(&faculty, &c));
}

#[test]
fn uninvolved_faculty_in_other_department_denied() {
    // An anonymous complaint changes nothing: the view gate fails first.
    let faculty = identity("fac", Role::Faculty, Some("Sports"));
    let mut c = complaint("c1");
    c.is_anonymous = true;
    c.department = Some("Hostel".to_string());
    c.owner_id = Some("stu".to_string());
    assert!(!can_view(&faculty, &c));
}

#[test]
fn unrelated_student_denied() {
    let student = identity("stu", Role::Student, None);
    let mut c = complaint("c1");
    c.owner_id = Some("someone-else".to_string());
    assert!(!can_view(&student, &c));
}

// ---------------------------------------------------------------------------
// resolve_update_permission
// ---------------------------------------------------------------------------

#[test]
fn admin_gets_full_field_set() {
    let admin = identity("adm", Role::Admin, None);
    let c = complaint("c1");
    let fields = resolve_update_permission(&admin, &c).expect("admin allowed");
    assert_eq!(fields, ADMIN_FIELDS);
    assert!(fields.contains(&Field::SlaHours));
    assert!(fields.contains(&Field::DueAt));
}

#[test]
fn head_field_set_excludes_sla_clock() {
    let head = identity("hd", Role::Head, Some("Hostel"));
    let mut c = complaint("c1");
    c.department = Some("Hostel".to_string());
    let fields = resolve_update_permission(&head, &c).expect("head allowed");
    assert_eq!(fields, HEAD_FIELDS);
    assert!(!fields.contains(&Field::SlaHours));
    assert!(!fields.contains(&Field::DueAt));
    assert!(fields.contains(&Field::EscalationReason));
}

#[test]
fn head_outside_department_denied() {
    let head = identity("hd", Role::Head, Some("Hostel"));
    let mut c = complaint("c1");
    c.department = Some("Mess".to_string());
    assert!(resolve_update_permission(&head, &c).is_none());
}

#[test]
fn head_matches_on_assigned_department_too() {
    let head = identity("hd", Role::Head, Some("Hostel"));
    let mut c = complaint("c1");
    c.department = Some("Mess".to_string());
    c.assigned_department = Some("Hostel".to_string());
    assert!(resolve_update_permission(&head, &c).is_some());
}

#[test]
fn assigned_faculty_gets_triage_fields_only() {
    let faculty = identity("fac", Role::Faculty, Some("Library"));
    let mut c = complaint("c1");
    c.assigned_to = Some("fac".to_string());
    let fields = resolve_update_permission(&faculty, &c).expect("assignee allowed");
    assert_eq!(fields, FACULTY_FIELDS);
    assert!(!fields.contains(&Field::AssignedTo));
}

#[test]
fn unassigned_faculty_denied() {
    // Assigned to a different faculty member — no grant.
    let faculty = identity("fac", Role::Faculty, Some("Library"));
    let mut c = complaint("c1");
    c.assigned_to = Some("other-fac".to_string());
    assert!(resolve_update_permission(&faculty, &c).is_none());
}

#[test]
fn faculty_owner_without_assignment_denied() {
    // The owner grant lives in the student arm only; a faculty member
    // who filed the complaint but is not its assignee cannot update it.
    let faculty = identity("fac", Role::Faculty, Some("Library"));
    let mut c = complaint("c1");
    c.owner_id = Some("fac".to_string());
    assert!(resolve_update_permission(&faculty, &c).is_none());
}

#[test]
fn student_owner_gets_content_fields() {
    let student = identity("stu", Role::Student, None);
    let mut c = complaint("c1");
    c.owner_id = Some("stu".to_string());
    let fields = resolve_update_permission(&student, &c).expect("owner allowed");
    assert_eq!(fields, OWNER_FIELDS);
    assert!(!fields.contains(&Field::Status));
}

#[test]
fn student_non_owner_denied() {
    let student = identity("stu", Role::Student, None);
    let mut c = complaint("c1");
    c.owner_id = Some("other".to_string());
    assert!(resolve_update_permission(&student, &c).is_none());
}
