//! Entity kinds held by the store.
//!
//! Each kind is a plain record with a string identity field, a creation
//! stamp and an optional update stamp. Callers create entities from a
//! `Draft` (everything except the server-assigned fields) and change them
//! with a `Patch` whose `Some` fields overlay the stored record.

mod booking;
mod document;
mod expense;
mod trip;
mod user;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub use booking::{Booking, BookingKind, BookingPatch, BookingStatus, NewBooking};
pub use document::{Document, DocumentPatch, DocumentType, NewDocument, EXPIRY_WARNING_DAYS};
pub use expense::{Expense, ExpensePatch, NewExpense};
pub use trip::{NewTrip, Trip, TripPatch, TripStatus};
pub use user::{NewUser, User, UserPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Trip,
    Booking,
    Document,
    Expense,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Trip,
        EntityKind::Booking,
        EntityKind::Document,
        EntityKind::Expense,
        EntityKind::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Trip => "trip",
            EntityKind::Booking => "booking",
            EntityKind::Document => "document",
            EntityKind::Expense => "expense",
            EntityKind::User => "user",
        }
    }

    /// Name of the fixture file holding this kind, e.g. `trips.csv`.
    pub fn fixture_file(&self) -> &'static str {
        match self {
            EntityKind::Trip => "trips.csv",
            EntityKind::Booking => "bookings.csv",
            EntityKind::Document => "documents.csv",
            EntityKind::Expense => "expenses.csv",
            EntityKind::User => "users.csv",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    type Draft: Send + 'static;
    type Patch: Send + 'static;

    fn id(&self) -> &str;

    /// Builds the stored record from a draft plus the server-assigned fields.
    fn create(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Overlays `patch` and stamps the update time. The identity field is
    /// not part of any patch.
    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

/// Replaces `field` when the patch carries a value.
pub(crate) fn merge<T>(field: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *field = value;
    }
}
