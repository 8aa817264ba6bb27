//! Planned trips. Trips stand alone and reference no other aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TripId;

/// Validation errors raised while building a [`TripDraft`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TripValidationError {
    /// `end_date` precedes `start_date`.
    #[error("endDate must not precede startDate")]
    EndBeforeStart,
    /// Latitude outside `[-90, 90]`.
    #[error("latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    /// Longitude outside `[-180, 180]`.
    #[error("longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

/// Planned trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Store-assigned identifier.
    #[schema(value_type = i64)]
    pub id: TripId,
    /// Destination name.
    #[schema(example = "Lisbon")]
    pub destination: Option<String>,
    /// First day of the trip.
    pub start_date: Option<NaiveDate>,
    /// Last day of the trip.
    pub end_date: Option<NaiveDate>,
    /// Budget for the whole party.
    pub budget: Option<f64>,
    /// Party size.
    pub people: Option<i32>,
    /// Transport mode.
    pub transport: Option<String>,
    /// Destination latitude.
    pub latitude: Option<f64>,
    /// Destination longitude.
    pub longitude: Option<f64>,
}

/// Validated fields for creating or replacing a trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripDraft {
    /// Destination name.
    pub destination: Option<String>,
    /// First day of the trip.
    pub start_date: Option<NaiveDate>,
    /// Last day of the trip.
    pub end_date: Option<NaiveDate>,
    /// Budget for the whole party.
    pub budget: Option<f64>,
    /// Party size.
    pub people: Option<i32>,
    /// Transport mode.
    pub transport: Option<String>,
    /// Destination latitude.
    pub latitude: Option<f64>,
    /// Destination longitude.
    pub longitude: Option<f64>,
}

impl TripDraft {
    /// Check cross-field invariants.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use travel_backend::domain::TripDraft;
    ///
    /// let draft = TripDraft {
    ///     start_date: NaiveDate::from_ymd_opt(2025, 6, 10),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 6, 1),
    ///     ..TripDraft::default()
    /// };
    /// assert!(draft.validate().is_err());
    /// ```
    pub fn validate(self) -> Result<Self, TripValidationError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(TripValidationError::EndBeforeStart);
            }
        }
        if self.latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
            return Err(TripValidationError::LatitudeOutOfRange);
        }
        if self
            .longitude
            .is_some_and(|lng| !(-180.0..=180.0).contains(&lng))
        {
            return Err(TripValidationError::LongitudeOutOfRange);
        }
        Ok(self)
    }
}
