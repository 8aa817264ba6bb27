//! Numeric identifiers assigned by the store.
//!
//! Every aggregate uses a distinct newtype so a ticket id can never be passed
//! where a user id is expected.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Return the raw store identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a [`crate::domain::User`].
    UserId
}

define_id! {
    /// Identifier of a [`crate::domain::Poi`].
    PoiId
}

define_id! {
    /// Identifier of a [`crate::domain::PoiImage`].
    PoiImageId
}

define_id! {
    /// Identifier of a [`crate::domain::Ticket`].
    TicketId
}

define_id! {
    /// Identifier of a [`crate::domain::Trip`].
    TripId
}

define_id! {
    /// Identifier of a [`crate::domain::Search`].
    SearchId
}

define_id! {
    /// Identifier of a [`crate::domain::History`].
    HistoryId
}
