// Ticket repository behaviour

use helpdesk_core::errors::HdErrorKind;
use helpdesk_core::model::{
    NewTicket, Ticket, TicketPatch, UserId, STATUS_OPEN, STATUS_RESOLVED,
};
use helpdesk_store::{Session, Storage, TicketRepo, UserRepo};
use tempfile::TempDir;

fn setup() -> (TempDir, Storage, Session) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(dir.path().join("helpdesk.db")).unwrap();
    let session = storage.new_session().unwrap();
    (dir, storage, session)
}

fn open_ticket(session: &mut Session, owner_id: UserId, title: &str) -> Ticket {
    TicketRepo::create_ticket(session, owner_id, &NewTicket::new(title)).unwrap()
}

#[test]
fn test_round_trip_with_fresh_id() {
    let (_dir, _storage, mut session) = setup();
    let owner = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    let earlier = open_ticket(&mut session, owner.id, "Earlier");

    let draft = NewTicket::new("T").with_description("D").with_status("aberto");
    let created = TicketRepo::create_ticket(&mut session, owner.id, &draft).unwrap();

    let fetched = TicketRepo::get_ticket(&session, created.id).unwrap().unwrap();
    assert_eq!(fetched.title, "T");
    assert_eq!(fetched.description, "D");
    assert_eq!(fetched.status, "aberto");
    assert_eq!(fetched.owner_id, owner.id);
    assert_ne!(fetched.id, earlier.id);
    assert_eq!(fetched, created);
}

#[test]
fn test_unknown_owner_is_foreign_key_violation() {
    let (_dir, _storage, mut session) = setup();

    let err = TicketRepo::create_ticket(&mut session, 404, &NewTicket::new("Orphan"))
        .unwrap_err();

    assert_eq!(err.kind(), HdErrorKind::ForeignKeyViolation);
    assert_eq!(err.entity_id(), Some("404"));
    assert_eq!(TicketRepo::count_tickets(&session).unwrap(), 0);
    assert_eq!(UserRepo::count_users(&session).unwrap(), 0);
}

#[test]
fn test_blank_title_rejected() {
    let (_dir, _storage, mut session) = setup();
    let owner = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();

    let err = TicketRepo::create_ticket(&mut session, owner.id, &NewTicket::new(" ")).unwrap_err();
    assert_eq!(err.kind(), HdErrorKind::InvalidInput);
    assert_eq!(err.field(), Some("title"));
}

#[test]
fn test_update_status_to_resolved() {
    let (_dir, _storage, mut session) = setup();
    let owner = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    let ticket = open_ticket(&mut session, owner.id, "Printer jam");

    let patch = TicketPatch::new().status(STATUS_RESOLVED);
    let updated = TicketRepo::update_ticket(&mut session, ticket.id, &patch)
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, STATUS_RESOLVED);

    let fetched = TicketRepo::get_ticket(&session, ticket.id).unwrap().unwrap();
    assert_eq!(fetched.status, "resolvido");
    assert_eq!(fetched.title, "Printer jam");
    assert_eq!(fetched.owner_id, owner.id);
}

#[test]
fn test_update_unknown_ticket_mutates_nothing() {
    let (_dir, _storage, mut session) = setup();
    let owner = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    let ticket = open_ticket(&mut session, owner.id, "Printer jam");

    let patch = TicketPatch::new().status(STATUS_RESOLVED);
    let result = TicketRepo::update_ticket(&mut session, ticket.id + 100, &patch).unwrap();
    assert_eq!(result, None);

    let untouched = TicketRepo::get_ticket(&session, ticket.id).unwrap().unwrap();
    assert_eq!(untouched, ticket);
}

#[test]
fn test_empty_patch_returns_ticket_unchanged() {
    let (_dir, _storage, mut session) = setup();
    let owner = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    let ticket = open_ticket(&mut session, owner.id, "Printer jam");

    let result = TicketRepo::update_ticket(&mut session, ticket.id, &TicketPatch::new()).unwrap();
    assert_eq!(result, Some(ticket));
}

#[test]
fn test_blank_status_patch_rejected() {
    let (_dir, _storage, mut session) = setup();
    let owner = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    let ticket = open_ticket(&mut session, owner.id, "Printer jam");

    let patch = TicketPatch::new().status("");
    let err = TicketRepo::update_ticket(&mut session, ticket.id, &patch).unwrap_err();
    assert_eq!(err.kind(), HdErrorKind::InvalidInput);
}

#[test]
fn test_list_by_owner() {
    let (_dir, _storage, mut session) = setup();
    let ana = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();
    let bia = UserRepo::create_user(&mut session, "Bia", "bia@x.com").unwrap();
    TicketRepo::create_ticket(&mut session, ana.id, &NewTicket::new("A1")).unwrap();
    TicketRepo::create_ticket(&mut session, bia.id, &NewTicket::new("B1")).unwrap();
    TicketRepo::create_ticket(&mut session, ana.id, &NewTicket::new("A2")).unwrap();

    let titles: Vec<String> = TicketRepo::list_tickets_by_owner(&session, ana.id)
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["A1", "A2"]);

    assert_eq!(TicketRepo::list_tickets(&session).unwrap().len(), 3);
    assert!(TicketRepo::list_tickets_by_owner(&session, 999).unwrap().is_empty());
}

#[test]
fn test_default_status_and_double_delete() {
    let (_dir, _storage, mut session) = setup();
    let ana = UserRepo::create_user(&mut session, "Ana", "ana@x.com").unwrap();

    let ticket = open_ticket(&mut session, ana.id, "Printer jam");
    assert_eq!(ticket.status, STATUS_OPEN);
    assert_eq!(ticket.description, "");

    assert!(TicketRepo::delete_ticket(&mut session, ticket.id).unwrap());
    assert!(!TicketRepo::delete_ticket(&mut session, ticket.id).unwrap());
}
