//! Test utilities for the backend crate.
//!
//! [`InMemoryDatabase`] implements every repository port against plain
//! vectors. It mirrors the relational constraints of the migrations (unique
//! POI lookup key, unique history pair, foreign keys) so services and
//! handlers can be exercised end to end without PostgreSQL.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use tokio::sync::Barrier;

use crate::domain::ports::{
    HistoryRepository, PoiRepository, RepositoryError, SearchRepository, TicketRepository,
    TripRepository, UserRepository,
};
use crate::domain::{
    History, HistoryChanges, HistoryId, NewHistory, Poi, PoiDraft, PoiId, PoiImage, PoiImageId,
    PoiLookupKey, PoiRef, Search, SearchDraft, SearchId, Ticket, TicketDraft, TicketId, Trip,
    TripDraft, TripId, User, UserDraft, UserId,
};

/// Clock pinned to a single instant.
pub struct FixtureClock(pub DateTime<Utc>);

impl FixtureClock {
    /// Clock fixed at 2025-05-01T09:30:00Z.
    pub fn may_day() -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 5, 1, 9, 30, 0)
                .single()
                .expect("valid fixture instant"),
        )
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone)]
struct HistoryRow {
    id: HistoryId,
    user_id: UserId,
    ticket_id: TicketId,
    purchase_date: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    pois: Vec<Poi>,
    tickets: Vec<Ticket>,
    trips: Vec<Trip>,
    searches: Vec<Search>,
    histories: Vec<HistoryRow>,
}

impl Tables {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn hydrate(&self, row: &HistoryRow) -> Result<History, RepositoryError> {
        let user = self
            .users
            .iter()
            .find(|user| user.id == row.user_id)
            .cloned()
            .ok_or_else(|| RepositoryError::query("dangling user reference"))?;
        let ticket = self
            .tickets
            .iter()
            .find(|ticket| ticket.id == row.ticket_id)
            .cloned()
            .ok_or_else(|| RepositoryError::query("dangling ticket reference"))?;
        Ok(History {
            id: row.id,
            user,
            ticket,
            purchase_date: row.purchase_date,
        })
    }

    fn build_poi(&mut self, id: PoiId, draft: &PoiDraft) -> Poi {
        let images = draft
            .images()
            .iter()
            .map(|image| PoiImage {
                id: PoiImageId::new(self.allocate()),
                image_url: image.image_url.clone(),
                embedding: image.embedding.clone(),
            })
            .collect();
        Poi {
            id,
            name: draft.name().to_owned(),
            description: draft.description().map(str::to_owned),
            location: draft.location().map(str::to_owned),
            image_url: draft.image_url().map(str::to_owned),
            images,
        }
    }

    fn poi_key_taken(&self, key: &PoiLookupKey, except: Option<PoiId>) -> bool {
        self.pois
            .iter()
            .any(|poi| Some(poi.id) != except && key.matches(poi))
    }
}

/// In-memory stand-in for the PostgreSQL schema.
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: Mutex<Tables>,
    history_insert_barrier: Option<Arc<Barrier>>,
}

impl InMemoryDatabase {
    /// Empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty database whose history inserts wait on `barrier` first, forcing
    /// concurrent creators past the existence check before any of them
    /// writes.
    pub fn with_history_insert_barrier(barrier: Arc<Barrier>) -> Self {
        Self {
            tables: Mutex::default(),
            history_insert_barrier: Some(barrier),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("in-memory tables lock")
    }

    /// Number of stored history rows.
    pub fn history_count(&self) -> usize {
        self.lock().histories.len()
    }

    /// Seed a user directly.
    pub fn seed_user(&self, pseudo: &str) -> User {
        let mut tables = self.lock();
        let user = User::new(
            UserId::new(tables.allocate()),
            crate::domain::Pseudo::new(pseudo).expect("valid fixture pseudo"),
        );
        tables.users.push(user.clone());
        user
    }

    /// Seed a POI directly.
    pub fn seed_poi(&self, name: &str, location: Option<&str>) -> Poi {
        let draft = PoiDraft::new(name, None, location.map(str::to_owned), None, Vec::new())
            .expect("valid fixture poi");
        let mut tables = self.lock();
        let id = PoiId::new(tables.allocate());
        let poi = tables.build_poi(id, &draft);
        tables.pois.push(poi.clone());
        poi
    }

    /// Seed a ticket for `poi` directly.
    pub fn seed_ticket(&self, poi: PoiId, price: f64) -> Ticket {
        let mut tables = self.lock();
        let ticket = Ticket {
            id: TicketId::new(tables.allocate()),
            poi: PoiRef { id: poi },
            price,
            transport_mode: Some("Train".to_owned()),
        };
        tables.tickets.push(ticket.clone());
        ticket
    }
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.lock().users.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock().users.iter().find(|user| user.id == id).cloned())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, RepositoryError> {
        let mut tables = self.lock();
        let user = User::new(UserId::new(tables.allocate()), draft.pseudo.clone());
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<Option<User>, RepositoryError> {
        let mut tables = self.lock();
        Ok(tables.users.iter_mut().find(|user| user.id == id).map(|user| {
            user.pseudo = draft.pseudo.clone();
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock();
        if tables.histories.iter().any(|row| row.user_id == id) {
            return Err(RepositoryError::foreign_key("histories_user_id_fkey"));
        }
        let before = tables.users.len();
        tables.users.retain(|user| user.id != id);
        Ok(tables.users.len() != before)
    }
}

#[async_trait]
impl PoiRepository for InMemoryDatabase {
    async fn list(&self) -> Result<Vec<Poi>, RepositoryError> {
        Ok(self.lock().pois.clone())
    }

    async fn find_by_id(&self, id: PoiId) -> Result<Option<Poi>, RepositoryError> {
        Ok(self.lock().pois.iter().find(|poi| poi.id == id).cloned())
    }

    async fn find_by_name_and_location(
        &self,
        key: &PoiLookupKey,
    ) -> Result<Option<Poi>, RepositoryError> {
        Ok(self.lock().pois.iter().find(|poi| key.matches(poi)).cloned())
    }

    async fn insert(&self, draft: &PoiDraft) -> Result<Poi, RepositoryError> {
        let mut tables = self.lock();
        if tables.poi_key_taken(&draft.lookup_key(), None) {
            return Err(RepositoryError::unique_violation("pois_name_location_key"));
        }
        let id = PoiId::new(tables.allocate());
        let poi = tables.build_poi(id, draft);
        tables.pois.push(poi.clone());
        Ok(poi)
    }

    async fn update(&self, id: PoiId, draft: &PoiDraft) -> Result<Option<Poi>, RepositoryError> {
        let mut tables = self.lock();
        if !tables.pois.iter().any(|poi| poi.id == id) {
            return Ok(None);
        }
        if tables.poi_key_taken(&draft.lookup_key(), Some(id)) {
            return Err(RepositoryError::unique_violation("pois_name_location_key"));
        }
        let replacement = tables.build_poi(id, draft);
        let slot = tables
            .pois
            .iter_mut()
            .find(|poi| poi.id == id)
            .ok_or_else(|| RepositoryError::query("poi vanished"))?;
        *slot = replacement.clone();
        Ok(Some(replacement))
    }

    async fn delete(&self, id: PoiId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock();
        if tables.tickets.iter().any(|ticket| ticket.poi.id == id) {
            return Err(RepositoryError::foreign_key("tickets_poi_id_fkey"));
        }
        let before = tables.pois.len();
        tables.pois.retain(|poi| poi.id != id);
        Ok(tables.pois.len() != before)
    }
}

#[async_trait]
impl TicketRepository for InMemoryDatabase {
    async fn list(&self) -> Result<Vec<Ticket>, RepositoryError> {
        Ok(self.lock().tickets.clone())
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError> {
        Ok(self.lock().tickets.iter().find(|ticket| ticket.id == id).cloned())
    }

    async fn insert(&self, draft: &TicketDraft) -> Result<Ticket, RepositoryError> {
        let mut tables = self.lock();
        if !tables.pois.iter().any(|poi| poi.id == draft.poi_id()) {
            return Err(RepositoryError::foreign_key("tickets_poi_id_fkey"));
        }
        let ticket = Ticket {
            id: TicketId::new(tables.allocate()),
            poi: PoiRef { id: draft.poi_id() },
            price: draft.price(),
            transport_mode: draft.transport_mode().map(str::to_owned),
        };
        tables.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn update(
        &self,
        id: TicketId,
        draft: &TicketDraft,
    ) -> Result<Option<Ticket>, RepositoryError> {
        let mut tables = self.lock();
        Ok(tables.tickets.iter_mut().find(|ticket| ticket.id == id).map(|ticket| {
            ticket.poi = PoiRef { id: draft.poi_id() };
            ticket.price = draft.price();
            ticket.transport_mode = draft.transport_mode().map(str::to_owned);
            ticket.clone()
        }))
    }

    async fn delete(&self, id: TicketId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock();
        if tables.histories.iter().any(|row| row.ticket_id == id) {
            return Err(RepositoryError::foreign_key("histories_ticket_id_fkey"));
        }
        let before = tables.tickets.len();
        tables.tickets.retain(|ticket| ticket.id != id);
        Ok(tables.tickets.len() != before)
    }
}

fn trip_from_draft(id: TripId, draft: &TripDraft) -> Trip {
    Trip {
        id,
        destination: draft.destination.clone(),
        start_date: draft.start_date,
        end_date: draft.end_date,
        budget: draft.budget,
        people: draft.people,
        transport: draft.transport.clone(),
        latitude: draft.latitude,
        longitude: draft.longitude,
    }
}

#[async_trait]
impl TripRepository for InMemoryDatabase {
    async fn list(&self) -> Result<Vec<Trip>, RepositoryError> {
        Ok(self.lock().trips.clone())
    }

    async fn find_by_id(&self, id: TripId) -> Result<Option<Trip>, RepositoryError> {
        Ok(self.lock().trips.iter().find(|trip| trip.id == id).cloned())
    }

    async fn insert(&self, draft: &TripDraft) -> Result<Trip, RepositoryError> {
        let mut tables = self.lock();
        let trip = trip_from_draft(TripId::new(tables.allocate()), draft);
        tables.trips.push(trip.clone());
        Ok(trip)
    }

    async fn update(&self, id: TripId, draft: &TripDraft) -> Result<Option<Trip>, RepositoryError> {
        let mut tables = self.lock();
        Ok(tables.trips.iter_mut().find(|trip| trip.id == id).map(|trip| {
            *trip = trip_from_draft(id, draft);
            trip.clone()
        }))
    }

    async fn delete(&self, id: TripId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock();
        let before = tables.trips.len();
        tables.trips.retain(|trip| trip.id != id);
        Ok(tables.trips.len() != before)
    }
}

fn search_from_draft(id: SearchId, draft: &SearchDraft) -> Search {
    Search {
        id,
        destination: draft.destination.clone(),
        budget: draft.budget,
        persons: draft.persons,
        transport_mode: draft.transport_mode.clone(),
    }
}

#[async_trait]
impl SearchRepository for InMemoryDatabase {
    async fn list(&self) -> Result<Vec<Search>, RepositoryError> {
        Ok(self.lock().searches.clone())
    }

    async fn find_by_id(&self, id: SearchId) -> Result<Option<Search>, RepositoryError> {
        Ok(self.lock().searches.iter().find(|search| search.id == id).cloned())
    }

    async fn insert(&self, draft: &SearchDraft) -> Result<Search, RepositoryError> {
        let mut tables = self.lock();
        let search = search_from_draft(SearchId::new(tables.allocate()), draft);
        tables.searches.push(search.clone());
        Ok(search)
    }

    async fn update(
        &self,
        id: SearchId,
        draft: &SearchDraft,
    ) -> Result<Option<Search>, RepositoryError> {
        let mut tables = self.lock();
        Ok(tables.searches.iter_mut().find(|search| search.id == id).map(|search| {
            *search = search_from_draft(id, draft);
            search.clone()
        }))
    }

    async fn delete(&self, id: SearchId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock();
        let before = tables.searches.len();
        tables.searches.retain(|search| search.id != id);
        Ok(tables.searches.len() != before)
    }
}

#[async_trait]
impl HistoryRepository for InMemoryDatabase {
    async fn list(&self) -> Result<Vec<History>, RepositoryError> {
        let tables = self.lock();
        tables.histories.iter().map(|row| tables.hydrate(row)).collect()
    }

    async fn find_by_id(&self, id: HistoryId) -> Result<Option<History>, RepositoryError> {
        let tables = self.lock();
        tables
            .histories
            .iter()
            .find(|row| row.id == id)
            .map(|row| tables.hydrate(row))
            .transpose()
    }

    async fn find_by_user_and_ticket(
        &self,
        user_id: UserId,
        ticket_id: TicketId,
    ) -> Result<Option<History>, RepositoryError> {
        let tables = self.lock();
        tables
            .histories
            .iter()
            .find(|row| row.user_id == user_id && row.ticket_id == ticket_id)
            .map(|row| tables.hydrate(row))
            .transpose()
    }

    async fn insert(&self, history: &NewHistory) -> Result<History, RepositoryError> {
        if let Some(barrier) = &self.history_insert_barrier {
            barrier.wait().await;
        }
        let mut tables = self.lock();
        if tables
            .histories
            .iter()
            .any(|row| row.user_id == history.user_id && row.ticket_id == history.ticket_id)
        {
            return Err(RepositoryError::unique_violation(
                "histories_user_id_ticket_id_key",
            ));
        }
        let row = HistoryRow {
            id: HistoryId::new(tables.allocate()),
            user_id: history.user_id,
            ticket_id: history.ticket_id,
            purchase_date: history.purchase_date,
        };
        let hydrated = tables.hydrate(&row)?;
        tables.histories.push(row);
        Ok(hydrated)
    }

    async fn update(
        &self,
        id: HistoryId,
        changes: &HistoryChanges,
    ) -> Result<Option<History>, RepositoryError> {
        let mut tables = self.lock();
        let Some(current) = tables.histories.iter().find(|row| row.id == id).cloned() else {
            return Ok(None);
        };
        let updated = HistoryRow {
            id,
            user_id: changes.user_id.unwrap_or(current.user_id),
            ticket_id: changes.ticket_id.unwrap_or(current.ticket_id),
            purchase_date: changes.purchase_date.unwrap_or(current.purchase_date),
        };
        if tables.histories.iter().any(|row| {
            row.id != id && row.user_id == updated.user_id && row.ticket_id == updated.ticket_id
        }) {
            return Err(RepositoryError::unique_violation(
                "histories_user_id_ticket_id_key",
            ));
        }
        let hydrated = tables.hydrate(&updated)?;
        if let Some(slot) = tables.histories.iter_mut().find(|row| row.id == id) {
            *slot = updated;
        }
        Ok(Some(hydrated))
    }

    async fn delete(&self, id: HistoryId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock();
        let before = tables.histories.len();
        tables.histories.retain(|row| row.id != id);
        Ok(tables.histories.len() != before)
    }
}
