use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{merge, Entity, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Planning,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub trip_id: String,
    pub name: String,
    pub destination: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// A trip is upcoming while its start date lies after `now`'s date.
    /// On the start day itself it already counts as recent.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_date > now.date_naive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub name: String,
    pub destination: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPatch {
    pub name: Option<String>,
    pub destination: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<TripStatus>,
}

impl Entity for Trip {
    const KIND: EntityKind = EntityKind::Trip;

    type Draft = NewTrip;
    type Patch = TripPatch;

    fn id(&self) -> &str {
        &self.trip_id
    }

    fn create(id: String, draft: NewTrip, now: DateTime<Utc>) -> Self {
        Self {
            trip_id: id,
            name: draft.name,
            destination: draft.destination,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, patch: TripPatch, now: DateTime<Utc>) {
        merge(&mut self.name, patch.name);
        merge(&mut self.destination, patch.destination);
        merge(&mut self.start_date, patch.start_date);
        merge(&mut self.end_date, patch.end_date);
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
