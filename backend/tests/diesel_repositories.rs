//! Integration tests for the Diesel repositories against PostgreSQL.
//!
//! Skipped unless `TEST_DATABASE_URL` is set; see `support/mod.rs`.

mod support;

use rstest::rstest;
use travel_backend::domain::ports::{
    HistoryRepository, PoiRepository, RepositoryError, TicketRepository, UserRepository,
};
use travel_backend::domain::{
    NewHistory, Poi, PoiDraft, PoiImageDraft, PoiLookupKey, Pseudo, Ticket, TicketDraft,
    UserDraft,
};
use travel_backend::outbound::persistence::{
    DbPool, DieselHistoryRepository, DieselPoiRepository, DieselTicketRepository,
    DieselUserRepository,
};

use support::{migrated_pool, unique};

fn poi_draft(name: &str, location: Option<&str>) -> PoiDraft {
    PoiDraft::new(
        name,
        Some("Integration fixture".to_owned()),
        location.map(str::to_owned),
        None,
        vec![PoiImageDraft {
            image_url: Some("https://img.example/cover.jpg".to_owned()),
            embedding: Some(vec![0, 1, 2, 255]),
        }],
    )
    .expect("valid poi draft")
}

async fn seed_ticket(pool: &DbPool) -> (Poi, Ticket) {
    let pois = DieselPoiRepository::new(pool.clone());
    let tickets = DieselTicketRepository::new(pool.clone());
    let poi = pois
        .insert(&poi_draft(&unique("Ticketed"), Some("Lyon")))
        .await
        .expect("insert poi");
    let ticket = tickets
        .insert(&TicketDraft::new(poi.id, 42.5, Some("Train".to_owned())).expect("valid ticket"))
        .await
        .expect("insert ticket");
    (poi, ticket)
}

#[rstest]
#[tokio::test]
async fn user_round_trips_through_crud() {
    let Some(pool) = migrated_pool().await else {
        return;
    };
    let users = DieselUserRepository::new(pool);
    let draft = UserDraft {
        pseudo: Pseudo::new(unique("wanderer")).expect("valid pseudo"),
    };

    let created = users.insert(&draft).await.expect("insert user");
    assert_eq!(created.pseudo, draft.pseudo);
    assert_eq!(
        users.find_by_id(created.id).await.expect("find user"),
        Some(created.clone())
    );

    let renamed = UserDraft {
        pseudo: Pseudo::new(unique("nomad")).expect("valid pseudo"),
    };
    let updated = users
        .update(created.id, &renamed)
        .await
        .expect("update user")
        .expect("user exists");
    assert_eq!(updated.pseudo, renamed.pseudo);

    assert!(users.delete(created.id).await.expect("delete user"));
    assert!(!users.delete(created.id).await.expect("second delete"));
    assert_eq!(users.find_by_id(created.id).await.expect("find"), None);
}

#[rstest]
#[tokio::test]
async fn poi_lookup_ignores_case_and_keeps_images() {
    let Some(pool) = migrated_pool().await else {
        return;
    };
    let pois = DieselPoiRepository::new(pool);
    let name = unique("Musee");
    let created = pois
        .insert(&poi_draft(&name, Some("Paris")))
        .await
        .expect("insert poi");
    assert_eq!(created.images.len(), 1);
    assert_eq!(created.images[0].embedding.as_deref(), Some(&[0, 1, 2, 255][..]));

    let key = PoiLookupKey::new(&name.to_uppercase(), Some("PARIS")).expect("valid key");
    let found = pois
        .find_by_name_and_location(&key)
        .await
        .expect("lookup")
        .expect("poi matches");
    assert_eq!(found.id, created.id);

    let duplicate = pois.insert(&poi_draft(&name.to_lowercase(), Some("paris"))).await;
    assert!(matches!(duplicate, Err(RepositoryError::UniqueViolation { .. })));

    let replaced = pois
        .update(
            created.id,
            &PoiDraft::new(&name, None, Some("Paris".to_owned()), None, Vec::new())
                .expect("valid draft"),
        )
        .await
        .expect("update")
        .expect("poi exists");
    assert!(replaced.images.is_empty());
    assert_eq!(replaced.description, None);
}

#[rstest]
#[tokio::test]
async fn non_ascii_poi_is_found_by_its_own_spelling() {
    let Some(pool) = migrated_pool().await else {
        return;
    };
    let pois = DieselPoiRepository::new(pool);
    let name = unique("Île de la Cité");
    let created = pois
        .insert(&poi_draft(&name, Some("Région Île-de-France")))
        .await
        .expect("insert poi");

    let key = PoiLookupKey::new(&name, Some("Région Île-de-France")).expect("valid key");
    let found = pois
        .find_by_name_and_location(&key)
        .await
        .expect("lookup")
        .expect("poi matches");
    assert_eq!(found.id, created.id);

    let duplicate = pois
        .insert(&poi_draft(&name, Some("Région Île-de-France")))
        .await;
    assert!(matches!(duplicate, Err(RepositoryError::UniqueViolation { .. })));
}

#[rstest]
#[tokio::test]
async fn poi_referenced_by_ticket_cannot_be_deleted() {
    let Some(pool) = migrated_pool().await else {
        return;
    };
    let (poi, ticket) = seed_ticket(&pool).await;
    let pois = DieselPoiRepository::new(pool.clone());
    let tickets = DieselTicketRepository::new(pool);

    let blocked = pois.delete(poi.id).await;
    assert!(matches!(blocked, Err(RepositoryError::ForeignKey { .. })));

    assert!(tickets.delete(ticket.id).await.expect("delete ticket"));
    assert!(pois.delete(poi.id).await.expect("delete poi"));
}

#[rstest]
#[tokio::test]
async fn history_pair_is_unique_and_joins_user_and_ticket() {
    let Some(pool) = migrated_pool().await else {
        return;
    };
    let (_, ticket) = seed_ticket(&pool).await;
    let user = DieselUserRepository::new(pool.clone())
        .insert(&UserDraft {
            pseudo: Pseudo::new(unique("buyer")).expect("valid pseudo"),
        })
        .await
        .expect("insert user");
    let histories = DieselHistoryRepository::new(pool);
    let purchase = NewHistory {
        user_id: user.id,
        ticket_id: ticket.id,
        purchase_date: chrono::DateTime::parse_from_rfc3339("2025-05-01T09:30:00Z")
            .expect("valid timestamp")
            .with_timezone(&chrono::Utc),
    };

    let created = histories.insert(&purchase).await.expect("insert history");
    assert_eq!(created.user, user);
    assert_eq!(created.ticket.id, ticket.id);

    let again = histories.insert(&purchase).await;
    assert!(matches!(again, Err(RepositoryError::UniqueViolation { .. })));

    let found = histories
        .find_by_user_and_ticket(user.id, ticket.id)
        .await
        .expect("lookup")
        .expect("history exists");
    assert_eq!(found.id, created.id);
}
