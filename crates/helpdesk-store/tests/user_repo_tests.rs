// User repository behaviour

use helpdesk_core::errors::HdErrorKind;
use helpdesk_core::model::UserPatch;
use helpdesk_store::{Session, Storage, UserRepo};
use proptest::collection::btree_map;
use proptest::prelude::*;
use tempfile::TempDir;

fn setup() -> (TempDir, Storage, Session) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(dir.path().join("helpdesk.db")).unwrap();
    let session = storage.new_session().unwrap();
    (dir, storage, session)
}

#[test]
fn test_create_user_listed_exactly_once() {
    let (_dir, _storage, mut session) = setup();

    let ana = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    assert!(ana.id > 0);
    assert_eq!(ana.name, "Ana");

    let users = UserRepo::list_users(&session).unwrap();
    assert_eq!(users.iter().filter(|u| u.email == "ana@x.com").count(), 1);
    assert_eq!(users[0], ana);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_generated_users_each_listed_once(
        users in btree_map(
            "[a-z0-9.]{1,20}@[a-z]{1,10}\\.com",
            "[A-Za-zÀ-ÿ][A-Za-zÀ-ÿ ]{0,60}",
            1..8,
        )
    ) {
        let (_dir, _storage, mut session) = setup();
        for (email, name) in &users {
            let created = UserRepo::create_user(&mut session, name, email).unwrap();
            prop_assert_eq!(&created.name, name);
        }

        let listed = UserRepo::list_users(&session).unwrap();
        prop_assert_eq!(listed.len(), users.len());
        for email in users.keys() {
            prop_assert_eq!(listed.iter().filter(|u| &u.email == email).count(), 1);
        }
    }
}

#[test]
fn test_duplicate_email_rejected_and_count_unchanged() {
    let (_dir, _storage, mut session) = setup();
    UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    let before = UserRepo::count_users(&session).unwrap();

    let err = UserRepo::create_user(&mut session, "Other Ana", "ana@x.com").unwrap_err();

    assert_eq!(err.kind(), HdErrorKind::UniqueConstraintViolation);
    assert_eq!(err.op(), Some("create_user"));
    assert_eq!(err.entity_id(), Some("ana@x.com"));
    assert_eq!(UserRepo::count_users(&session).unwrap(), before);
}

#[test]
fn test_blank_fields_rejected_before_insert() {
    let (_dir, _storage, mut session) = setup();

    let err = UserRepo::create_user(&mut session, "  ", "ana@x.com").unwrap_err();
    assert_eq!(err.kind(), HdErrorKind::InvalidInput);
    assert_eq!(err.field(), Some("name"));

    let err = UserRepo::create_user(&mut session, "Ana", "").unwrap_err();
    assert_eq!(err.field(), Some("email"));

    assert_eq!(UserRepo::count_users(&session).unwrap(), 0);
}

#[test]
fn test_get_and_find_by_email() {
    let (_dir, _storage, mut session) = setup();
    let ana = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();

    assert_eq!(UserRepo::get_user(&session, ana.id).unwrap(), Some(ana.clone()));
    assert_eq!(
        UserRepo::find_user_by_email(&session, "ana@x.com").unwrap(),
        Some(ana)
    );
    assert_eq!(UserRepo::get_user(&session, 999).unwrap(), None);
    assert_eq!(
        UserRepo::find_user_by_email(&session, "nobody@x.com").unwrap(),
        None
    );
}

#[test]
fn test_list_users_ordered_by_id() {
    let (_dir, _storage, mut session) = setup();
    UserRepo::create_user(&mut session, "Luís", "luis@exemplo.com").unwrap();
    UserRepo::create_user(&mut session, "Jamilly", "jamilly@exemplo.com").unwrap();

    let names: Vec<String> = UserRepo::list_users(&session)
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();
    assert_eq!(names, vec!["Luís", "Jamilly"]);
}

#[test]
fn test_update_user_name_keeps_identity() {
    let (_dir, _storage, mut session) = setup();
    let luis = UserRepo::create_user(&mut session, "Luís", "luis@exemplo.com").unwrap();

    let patch = UserPatch::new().name("Luís Eduardo");
    let updated = UserRepo::update_user(&mut session, luis.id, &patch)
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, luis.id);
    assert_eq!(updated.name, "Luís Eduardo");
    assert_eq!(updated.email, "luis@exemplo.com");
    assert_eq!(UserRepo::get_user(&session, luis.id).unwrap(), Some(updated));
}

#[test]
fn test_update_user_email_collision() {
    let (_dir, _storage, mut session) = setup();
    UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    let bia = UserRepo::create_user(&mut session, "Bia", "bia@x.com").unwrap();

    let err = UserRepo::update_user(&mut session, bia.id, &UserPatch::new().email("ana@x.com"))
        .unwrap_err();
    assert_eq!(err.kind(), HdErrorKind::UniqueConstraintViolation);

    let unchanged = UserRepo::get_user(&session, bia.id).unwrap().unwrap();
    assert_eq!(unchanged.email, "bia@x.com");
}

#[test]
fn test_update_unknown_user_is_absent() {
    let (_dir, _storage, mut session) = setup();
    let result = UserRepo::update_user(&mut session, 42, &UserPatch::new().name("Ghost")).unwrap();
    assert_eq!(result, None);
    assert_eq!(UserRepo::count_users(&session).unwrap(), 0);
}

#[test]
fn test_delete_user_reports_presence() {
    let (_dir, _storage, mut session) = setup();
    let ana = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();

    assert!(UserRepo::delete_user(&mut session, ana.id).unwrap());
    assert!(!UserRepo::delete_user(&mut session, ana.id).unwrap());
}

#[test]
fn test_ids_not_reused_after_delete() {
    let (_dir, _storage, mut session) = setup();
    let first = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    UserRepo::delete_user(&mut session, first.id).unwrap();

    let second = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    assert!(second.id > first.id);
}
