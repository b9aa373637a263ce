mod common;

use common::{add_identity, setup};
use grievance::auth::password;
use grievance::models::identity::Role;
use grievance::store::{seed_admin, IdentityStore};

#[test]
fn password_hash_roundtrip() {
    let hash = password::hash_password("correct horse battery").expect("hash");
    assert!(password::verify_password("correct horse battery", &hash).expect("verify"));
    assert!(!password::verify_password("wrong guess", &hash).expect("verify"));
}

#[test]
fn malformed_hash_is_an_error_not_a_match() {
    assert!(password::verify_password("anything", "not-a-phc-string").is_err());
}

#[tokio::test]
async fn seed_admin_is_idempotent() {
    let (store, _service) = setup();
    seed_admin(store.as_ref(), "admin@campus.local", "admin123")
        .await
        .expect("first seed");
    seed_admin(store.as_ref(), "admin@campus.local", "different-pass")
        .await
        .expect("second seed is a no-op");

    let admin = store
        .find_by_email("admin@campus.local")
        .await
        .unwrap()
        .expect("admin present");
    assert_eq!(admin.role, Role::Admin);
    // The original password still verifies — the second seed changed nothing.
    assert!(password::verify_password("admin123", &admin.password_hash).unwrap());
}

#[tokio::test]
async fn staff_listing_excludes_students_admins_and_inactive() {
    let (store, _service) = setup();
    add_identity(&store, "stu", Role::Student, None).await;
    add_identity(&store, "adm", Role::Admin, None).await;
    add_identity(&store, "fac", Role::Faculty, Some("Mess")).await;
    add_identity(&store, "hd", Role::Head, Some("Hostel")).await;

    let mut inactive = common::identity("gone", Role::Faculty, Some("Mess"));
    inactive.is_active = false;
    common::insert_identity(&store, inactive).await;

    let staff = store.list_staff().await.unwrap();
    let ids: Vec<&str> = staff.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["fac", "hd"]);
}

#[tokio::test]
async fn find_by_email_is_exact() {
    let (store, _service) = setup();
    let fac = add_identity(&store, "fac", Role::Faculty, Some("Mess")).await;

    let found = store.find_by_email(&fac.email).await.unwrap();
    assert_eq!(found.map(|i| i.id), Some("fac".to_string()));
    assert!(store
        .find_by_email("nobody@test.campus")
        .await
        .unwrap()
        .is_none());
}
