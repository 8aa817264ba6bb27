//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{histories, poi_images, pois, searches, tickets, trips, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub pseudo: String,
}

/// Insertable and changeset struct for user records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserValues<'a> {
    pub pseudo: &'a str,
}

// ---------------------------------------------------------------------------
// POI models
// ---------------------------------------------------------------------------

/// Row struct for reading from the pois table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pois)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PoiRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

/// Insertable and changeset struct for POI records.
///
/// Absent optional fields overwrite stored values with `NULL`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = pois)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PoiValues<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

/// Row struct for reading from the poi_images table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = poi_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PoiImageRow {
    pub id: i64,
    pub poi_id: i64,
    pub image_url: Option<String>,
    pub embedding: Option<Vec<u8>>,
}

/// Insertable struct for POI images.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = poi_images)]
pub(crate) struct NewPoiImageRow<'a> {
    pub poi_id: i64,
    pub image_url: Option<&'a str>,
    pub embedding: Option<&'a [u8]>,
}

// ---------------------------------------------------------------------------
// Ticket models
// ---------------------------------------------------------------------------

/// Row struct for reading from the tickets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TicketRow {
    pub id: i64,
    pub poi_id: i64,
    pub price: f64,
    pub transport_mode: Option<String>,
}

/// Insertable and changeset struct for ticket records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tickets)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TicketValues<'a> {
    pub poi_id: i64,
    pub price: f64,
    pub transport_mode: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Trip and search models
// ---------------------------------------------------------------------------

/// Row struct for reading from the trips table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trips)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TripRow {
    pub id: i64,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub people: Option<i32>,
    pub transport: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Insertable and changeset struct for trip records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = trips)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TripValues<'a> {
    pub destination: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub people: Option<i32>,
    pub transport: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Row struct for reading from the searches table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = searches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SearchRow {
    pub id: i64,
    pub destination: Option<String>,
    pub budget: Option<f64>,
    pub persons: Option<i32>,
    pub transport_mode: Option<String>,
}

/// Insertable and changeset struct for search records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = searches)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SearchValues<'a> {
    pub destination: Option<&'a str>,
    pub budget: Option<f64>,
    pub persons: Option<i32>,
    pub transport_mode: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// History models
// ---------------------------------------------------------------------------

/// Row struct for reading from the histories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = histories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoryRow {
    pub id: i64,
    pub user_id: i64,
    pub ticket_id: i64,
    pub purchase_date: DateTime<Utc>,
}

/// Insertable struct for new purchases.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = histories)]
pub(crate) struct NewHistoryRow {
    pub user_id: i64,
    pub ticket_id: i64,
    pub purchase_date: DateTime<Utc>,
}

/// Partial update for a history row; `None` leaves the column unchanged.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = histories)]
pub(crate) struct HistoryUpdate {
    pub user_id: Option<i64>,
    pub ticket_id: Option<i64>,
    pub purchase_date: Option<DateTime<Utc>>,
}
