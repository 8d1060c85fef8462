// Integration tests for user command handlers.

use helpdesk_core::errors::HdErrorKind;
use helpdesk_core::model::{NewTicket, UserPatch};
use helpdesk_engine::commands::{user_create, user_delete, user_list, user_update};
use helpdesk_store::{Session, Storage, TicketRepo};
use tempfile::TempDir;

fn setup_db() -> (TempDir, Session) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::open(temp_dir.path().join("test.db")).unwrap();
    let session = storage.new_session().unwrap();
    (temp_dir, session)
}

#[test]
fn test_user_create_and_list() {
    let (_tmp, mut session) = setup_db();

    let luis = user_create(&mut session, "Luís", "luis@exemplo.com").unwrap();
    let jamilly = user_create(&mut session, "Jamilly", "jamilly@exemplo.com").unwrap();

    assert_eq!(user_list(&session).unwrap(), vec![luis, jamilly]);
}

#[test]
fn test_user_create_duplicate_email() {
    let (_tmp, mut session) = setup_db();
    user_create(&mut session, "Luís", "luis@exemplo.com").unwrap();

    let err = user_create(&mut session, "Outro", "luis@exemplo.com").unwrap_err();
    assert_eq!(err.kind(), HdErrorKind::UniqueConstraintViolation);
    assert_eq!(user_list(&session).unwrap().len(), 1);
}

#[test]
fn test_user_update_rename() {
    let (_tmp, mut session) = setup_db();
    let luis = user_create(&mut session, "Luís", "luis@exemplo.com").unwrap();

    let renamed = user_update(&mut session, luis.id, &UserPatch::new().name("Luís Eduardo"))
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Luís Eduardo");

    assert!(user_update(&mut session, luis.id + 1, &UserPatch::new().name("x"))
        .unwrap()
        .is_none());
}

#[test]
fn test_user_delete_cascades() {
    let (_tmp, mut session) = setup_db();
    let luis = user_create(&mut session, "Luís", "luis@exemplo.com").unwrap();
    TicketRepo::create_ticket(&mut session, luis.id, &NewTicket::new("Erro NF-e")).unwrap();
    let draft = NewTicket::new("Falha na impressão");
    TicketRepo::create_ticket(&mut session, luis.id, &draft).unwrap();

    assert!(user_delete(&mut session, luis.id).unwrap());
    assert_eq!(TicketRepo::count_tickets(&session).unwrap(), 0);
    assert!(!user_delete(&mut session, luis.id).unwrap());
}
