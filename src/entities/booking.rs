use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{merge, Entity, EntityKind};

/// Search tab a booking was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Flights,
    Hotels,
    Cars,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Flights => "flights",
            BookingKind::Hotels => "hotels",
            BookingKind::Cars => "cars",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub trip_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: BookingKind,
    pub provider: String,
    /// Free-form record: route, dates and whatever the offer carried.
    #[serde(with = "json_column")]
    pub details: Map<String, Value>,
    pub price: Decimal,
    pub currency: String,
    pub confirmation_number: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// One-line summary of the details record: "from → to" for routes,
    /// otherwise the destination, or the searched location for hotels.
    pub fn route(&self) -> Option<String> {
        let text = |key: &str| self.details.get(key).and_then(Value::as_str);
        match (text("from"), text("to")) {
            (Some(from), Some(to)) => Some(format!("{from} → {to}")),
            _ => text("destination").or(text("from")).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub trip_id: Option<String>,
    pub kind: BookingKind,
    pub provider: String,
    pub details: Map<String, Value>,
    pub price: Decimal,
    pub currency: String,
    pub confirmation_number: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub trip_id: Option<Option<String>>,
    pub kind: Option<BookingKind>,
    pub provider: Option<String>,
    pub details: Option<Map<String, Value>>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub confirmation_number: Option<String>,
    pub status: Option<BookingStatus>,
}

impl Entity for Booking {
    const KIND: EntityKind = EntityKind::Booking;

    type Draft = NewBooking;
    type Patch = BookingPatch;

    fn id(&self) -> &str {
        &self.booking_id
    }

    fn create(id: String, draft: NewBooking, now: DateTime<Utc>) -> Self {
        Self {
            booking_id: id,
            trip_id: draft.trip_id,
            kind: draft.kind,
            provider: draft.provider,
            details: draft.details,
            price: draft.price,
            currency: draft.currency,
            confirmation_number: draft.confirmation_number,
            status: draft.status,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, patch: BookingPatch, now: DateTime<Utc>) {
        merge(&mut self.trip_id, patch.trip_id);
        merge(&mut self.kind, patch.kind);
        merge(&mut self.provider, patch.provider);
        merge(&mut self.details, patch.details);
        merge(&mut self.price, patch.price);
        merge(&mut self.currency, patch.currency);
        merge(&mut self.confirmation_number, patch.confirmation_number);
        merge(&mut self.status, patch.status);
        self.updated_at = Some(now);
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Booking details travel through CSV as a single JSON-encoded column.
mod json_column {
    use serde::de::{Deserializer, Error as _};
    use serde::ser::{Error as _, Serializer};
    use serde::Deserialize;
    use serde_json::{Map, Value};

    pub fn serialize<S>(details: &Map<String, Value>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = serde_json::to_string(details).map_err(S::Error::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(D::Error::custom)
    }
}
