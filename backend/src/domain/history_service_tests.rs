//! Tests for the history service.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::rstest;
use tokio::sync::Barrier;

use super::*;
use crate::domain::ports::{MockHistoryRepository, MockTicketRepository, MockUserRepository};
use crate::domain::{ErrorCode, PoiId, PoiRef, Pseudo};
use crate::test_support::{FixtureClock, InMemoryDatabase};

type MockService = HistoryService<MockHistoryRepository, MockUserRepository, MockTicketRepository>;

fn user(id: i64) -> User {
    User::new(UserId::new(id), Pseudo::new("wanderer").expect("valid pseudo"))
}

fn ticket(id: i64) -> Ticket {
    Ticket {
        id: TicketId::new(id),
        poi: PoiRef { id: PoiId::new(1) },
        price: 50.0,
        transport_mode: Some("Avion".to_owned()),
    }
}

fn history(id: i64, user_id: i64, ticket_id: i64) -> History {
    History {
        id: HistoryId::new(id),
        user: user(user_id),
        ticket: ticket(ticket_id),
        purchase_date: FixtureClock::may_day().0,
    }
}

fn users_resolving(id: i64) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user(id))));
    users
}

fn tickets_resolving(id: i64) -> MockTicketRepository {
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .returning(move |_| Ok(Some(ticket(id))));
    tickets
}

fn make_service(
    histories: MockHistoryRepository,
    users: MockUserRepository,
    tickets: MockTicketRepository,
) -> MockService {
    HistoryService::new(
        Arc::new(histories),
        Arc::new(users),
        Arc::new(tickets),
        Arc::new(FixtureClock::may_day()),
    )
}

fn request(user_id: i64, ticket_id: i64) -> CreateHistoryRequest {
    CreateHistoryRequest {
        user_id: Some(UserId::new(user_id)),
        ticket_id: Some(TicketId::new(ticket_id)),
    }
}

#[rstest]
#[case(
    CreateHistoryRequest { user_id: None, ticket_id: Some(TicketId::new(2)) },
    "userId",
    HISTORY_USER_REQUIRED
)]
#[case(
    CreateHistoryRequest { user_id: Some(UserId::new(1)), ticket_id: None },
    "ticketId",
    HISTORY_TICKET_REQUIRED
)]
#[tokio::test]
async fn create_rejects_missing_references(
    #[case] request: CreateHistoryRequest,
    #[case] field: &str,
    #[case] message: &str,
) {
    let service = make_service(
        MockHistoryRepository::new(),
        MockUserRepository::new(),
        MockTicketRepository::new(),
    );

    let error = service.create(request).await.expect_err("missing reference");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), message);
    let details = error.details().expect("details present");
    assert_eq!(details["field"], field);
    assert_eq!(details["code"], "missing_field");
}

#[tokio::test]
async fn create_reports_unknown_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let service = make_service(
        MockHistoryRepository::new(),
        users,
        MockTicketRepository::new(),
    );

    let error = service.create(request(1, 2)).await.expect_err("unknown user");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "User not found");
}

#[tokio::test]
async fn create_reports_unknown_ticket() {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let service = make_service(MockHistoryRepository::new(), users_resolving(1), tickets);

    let error = service.create(request(1, 2)).await.expect_err("unknown ticket");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Ticket not found");
}

#[tokio::test]
async fn create_returns_existing_row_without_inserting() {
    let mut histories = MockHistoryRepository::new();
    histories
        .expect_find_by_user_and_ticket()
        .times(1)
        .return_once(|_, _| Ok(Some(history(9, 1, 2))));
    histories.expect_insert().never();
    let service = make_service(histories, users_resolving(1), tickets_resolving(2));

    let found = service.create(request(1, 2)).await.expect("existing row");
    assert_eq!(found.id, HistoryId::new(9));
}

#[tokio::test]
async fn create_stamps_purchase_date_from_clock() {
    let mut histories = MockHistoryRepository::new();
    histories
        .expect_find_by_user_and_ticket()
        .times(1)
        .return_once(|_, _| Ok(None));
    histories
        .expect_insert()
        .times(1)
        .withf(|row| row.purchase_date == FixtureClock::may_day().0)
        .return_once(|_| Ok(history(3, 1, 2)));
    let service = make_service(histories, users_resolving(1), tickets_resolving(2));

    let created = service.create(request(1, 2)).await.expect("created");
    assert_eq!(created.id, HistoryId::new(3));
}

#[tokio::test]
async fn create_rereads_once_after_unique_violation() {
    let lookups = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&lookups);
    let mut histories = MockHistoryRepository::new();
    histories
        .expect_find_by_user_and_ticket()
        .times(2)
        .returning(move |_, _| {
            if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(None)
            } else {
                Ok(Some(history(4, 1, 2)))
            }
        });
    histories
        .expect_insert()
        .times(1)
        .return_once(|_| Err(RepositoryError::unique_violation("histories_user_id_ticket_id_key")));
    let service = make_service(histories, users_resolving(1), tickets_resolving(2));

    let winner = service.create(request(1, 2)).await.expect("reconciled");
    assert_eq!(winner.id, HistoryId::new(4));
    assert_eq!(lookups.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn create_fails_when_reread_finds_nothing() {
    let mut histories = MockHistoryRepository::new();
    histories
        .expect_find_by_user_and_ticket()
        .times(2)
        .returning(|_, _| Ok(None));
    histories
        .expect_insert()
        .times(1)
        .return_once(|_| Err(RepositoryError::unique_violation("histories_user_id_ticket_id_key")));
    let service = make_service(histories, users_resolving(1), tickets_resolving(2));

    let error = service.create(request(1, 2)).await.expect_err("reconcile fails");
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), HISTORY_RECONCILE_FAILED);
}

#[tokio::test]
async fn create_propagates_other_insert_failures() {
    let mut histories = MockHistoryRepository::new();
    histories
        .expect_find_by_user_and_ticket()
        .times(1)
        .return_once(|_, _| Ok(None));
    histories
        .expect_insert()
        .times(1)
        .return_once(|_| Err(RepositoryError::connection("pool exhausted")));
    let service = make_service(histories, users_resolving(1), tickets_resolving(2));

    let error = service.create(request(1, 2)).await.expect_err("propagated");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn create_twice_yields_one_row() {
    let db = Arc::new(InMemoryDatabase::new());
    let buyer = db.seed_user("wanderer");
    let poi = db.seed_poi("Louvre", Some("Paris"));
    let pass = db.seed_ticket(poi.id, 17.0);
    let service = HistoryService::new(
        Arc::clone(&db),
        Arc::clone(&db),
        Arc::clone(&db),
        Arc::new(FixtureClock::may_day()),
    );

    let first = service
        .create(request(buyer.id.get(), pass.id.get()))
        .await
        .expect("first create");
    let second = service
        .create(request(buyer.id.get(), pass.id.get()))
        .await
        .expect("second create");

    assert_eq!(first.id, second.id);
    assert_eq!(db.history_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_converge_on_one_row() {
    const CALLERS: usize = 8;
    let barrier = Arc::new(Barrier::new(CALLERS));
    let db = Arc::new(InMemoryDatabase::with_history_insert_barrier(barrier));
    let buyer = db.seed_user("wanderer");
    let poi = db.seed_poi("Louvre", Some("Paris"));
    let pass = db.seed_ticket(poi.id, 17.0);
    let service = Arc::new(HistoryService::new(
        Arc::clone(&db),
        Arc::clone(&db),
        Arc::clone(&db),
        Arc::new(FixtureClock::may_day()),
    ));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let service = Arc::clone(&service);
            let request = request(buyer.id.get(), pass.id.get());
            tokio::spawn(async move { service.create(request).await })
        })
        .collect();

    let mut ids = Vec::with_capacity(CALLERS);
    for handle in handles {
        let created = handle.await.expect("task joins").expect("create succeeds");
        ids.push(created.id);
    }

    assert_eq!(db.history_count(), 1);
    assert!(ids.iter().all(|id| *id == ids[0]));
}

#[tokio::test]
async fn update_checks_replacement_user_exists() {
    let mut histories = MockHistoryRepository::new();
    histories
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(history(5, 1, 2))));
    histories.expect_update().never();
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let service = make_service(histories, users, MockTicketRepository::new());

    let changes = HistoryChanges {
        user_id: Some(UserId::new(99)),
        ..HistoryChanges::default()
    };
    let error = service
        .update(HistoryId::new(5), changes)
        .await
        .expect_err("unknown user");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "User not found");
}

#[tokio::test]
async fn update_reports_missing_history() {
    let mut histories = MockHistoryRepository::new();
    histories.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let service = make_service(
        histories,
        MockUserRepository::new(),
        MockTicketRepository::new(),
    );

    let error = service
        .update(HistoryId::new(5), HistoryChanges::default())
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_reports_missing_history() {
    let mut histories = MockHistoryRepository::new();
    histories.expect_delete().times(1).return_once(|_| Ok(false));
    let service = make_service(
        histories,
        MockUserRepository::new(),
        MockTicketRepository::new(),
    );

    let error = service.delete(HistoryId::new(5)).await.expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_returns_stored_history() {
    let mut histories = MockHistoryRepository::new();
    histories
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(history(5, 1, 2))));
    let service = make_service(
        histories,
        MockUserRepository::new(),
        MockTicketRepository::new(),
    );

    let found = service.get(HistoryId::new(5)).await.expect("found");
    assert_eq!(found.user.id, UserId::new(1));
}
