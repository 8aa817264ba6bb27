//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered travellers.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Display name, trimmed, at most 255 characters.
        pseudo -> Varchar,
    }
}

diesel::table! {
    /// Points of interest.
    ///
    /// Unique over `(lower(name), lower(coalesce(location, '')))` through the
    /// `pois_name_location_key` expression index, which Diesel cannot model.
    pois (id) {
        /// Primary key.
        id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Free-form description.
        description -> Nullable<Text>,
        /// Town or area.
        location -> Nullable<Varchar>,
        /// Cover image location.
        image_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Images owned by a POI; deleted with their POI.
    poi_images (id) {
        /// Primary key.
        id -> Int8,
        /// Owning POI.
        poi_id -> Int8,
        /// Image location.
        image_url -> Nullable<Text>,
        /// Opaque embedding bytes.
        embedding -> Nullable<Bytea>,
    }
}

diesel::table! {
    /// Tickets sold for a POI.
    tickets (id) {
        /// Primary key.
        id -> Int8,
        /// POI the ticket is valid for.
        poi_id -> Int8,
        /// Non-negative price.
        price -> Float8,
        /// Transport mode label.
        transport_mode -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Planned trips.
    trips (id) {
        /// Primary key.
        id -> Int8,
        /// Destination name.
        destination -> Nullable<Varchar>,
        /// First day.
        start_date -> Nullable<Date>,
        /// Last day.
        end_date -> Nullable<Date>,
        /// Budget.
        budget -> Nullable<Float8>,
        /// Party size.
        people -> Nullable<Int4>,
        /// Transport mode.
        transport -> Nullable<Varchar>,
        /// Destination latitude.
        latitude -> Nullable<Float8>,
        /// Destination longitude.
        longitude -> Nullable<Float8>,
    }
}

diesel::table! {
    /// Saved searches.
    searches (id) {
        /// Primary key.
        id -> Int8,
        /// Destination name.
        destination -> Nullable<Varchar>,
        /// Budget.
        budget -> Nullable<Float8>,
        /// Party size.
        persons -> Nullable<Int4>,
        /// Transport mode.
        transport_mode -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Purchase history; unique over `(user_id, ticket_id)`.
    histories (id) {
        /// Primary key.
        id -> Int8,
        /// Buyer.
        user_id -> Int8,
        /// Purchased ticket.
        ticket_id -> Int8,
        /// Purchase time.
        purchase_date -> Timestamptz,
    }
}

diesel::joinable!(poi_images -> pois (poi_id));
diesel::joinable!(tickets -> pois (poi_id));
diesel::joinable!(histories -> users (user_id));
diesel::joinable!(histories -> tickets (ticket_id));

diesel::allow_tables_to_appear_in_same_query!(
    users, pois, poi_images, tickets, trips, searches, histories,
);
