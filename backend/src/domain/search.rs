//! Saved search queries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::SearchId;

/// A traveller's saved search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Search {
    /// Store-assigned identifier.
    #[schema(value_type = i64)]
    pub id: SearchId,
    /// Destination name.
    #[schema(example = "Paris")]
    pub destination: Option<String>,
    /// Budget for the whole party.
    #[schema(example = 1000.0)]
    pub budget: Option<f64>,
    /// Party size.
    #[schema(example = 2)]
    pub persons: Option<i32>,
    /// Preferred transport mode.
    #[schema(example = "Avion")]
    pub transport_mode: Option<String>,
}

/// Fields for creating or replacing a search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchDraft {
    /// Destination name.
    pub destination: Option<String>,
    /// Budget for the whole party.
    pub budget: Option<f64>,
    /// Party size.
    pub persons: Option<i32>,
    /// Preferred transport mode.
    pub transport_mode: Option<String>,
}
