//! Tickets sold for a point of interest.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PoiId, TicketId};

/// Validation errors raised while building a [`TicketDraft`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TicketValidationError {
    /// The price was NaN, infinite, or negative.
    #[error("price must be a finite, non-negative amount")]
    InvalidPrice,
}

/// Reference to a POI by identifier, serialised as `{"id": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PoiRef {
    /// Referenced POI.
    #[schema(value_type = i64, example = 1)]
    pub id: PoiId,
}

/// Ticket granting access to a POI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 3)]
    pub id: TicketId,
    /// POI the ticket is valid for.
    pub poi: PoiRef,
    /// Price in the operator's currency.
    #[schema(example = 50.0)]
    pub price: f64,
    /// How the traveller reaches the POI.
    #[schema(example = "Avion")]
    pub transport_mode: Option<String>,
}

/// Validated fields for creating or replacing a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    poi_id: PoiId,
    price: f64,
    transport_mode: Option<String>,
}

impl TicketDraft {
    /// Validate ticket fields.
    ///
    /// # Examples
    /// ```
    /// use travel_backend::domain::{PoiId, TicketDraft};
    ///
    /// assert!(TicketDraft::new(PoiId::new(1), 50.0, Some("Avion".into())).is_ok());
    /// assert!(TicketDraft::new(PoiId::new(1), -1.0, None).is_err());
    /// ```
    pub fn new(
        poi_id: PoiId,
        price: f64,
        transport_mode: Option<String>,
    ) -> Result<Self, TicketValidationError> {
        if !price.is_finite() || price < 0.0 {
            return Err(TicketValidationError::InvalidPrice);
        }
        Ok(Self {
            poi_id,
            price,
            transport_mode,
        })
    }

    /// Referenced POI.
    pub fn poi_id(&self) -> PoiId {
        self.poi_id
    }

    /// Price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Transport mode.
    pub fn transport_mode(&self) -> Option<&str> {
        self.transport_mode.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(-0.01)]
    fn draft_rejects_invalid_prices(#[case] price: f64) {
        assert_eq!(
            TicketDraft::new(PoiId::new(1), price, None),
            Err(TicketValidationError::InvalidPrice)
        );
    }

    #[rstest]
    fn ticket_serialises_poi_reference() {
        let ticket = Ticket {
            id: TicketId::new(4),
            poi: PoiRef { id: PoiId::new(2) },
            price: 50.0,
            transport_mode: Some("Avion".into()),
        };
        let value = serde_json::to_value(&ticket).expect("serialise ticket");
        assert_eq!(
            value,
            serde_json::json!({
                "id": 4,
                "poi": { "id": 2 },
                "price": 50.0,
                "transport_mode": "Avion",
            })
        );
    }
}
