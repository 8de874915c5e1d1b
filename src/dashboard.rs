//! Dashboard view over trips.
//!
//! The upcoming/recent split is computed from start dates against the
//! current time on every call; trips never store which side they are on.

use chrono::{DateTime, Utc};

use crate::entities::Trip;

/// Number of started trips shown under recent activity.
pub const RECENT_TRIPS_SHOWN: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPartition {
    /// Trips starting after today, in collection order.
    pub upcoming: Vec<Trip>,
    /// The first [`RECENT_TRIPS_SHOWN`] trips that have already started.
    pub recent: Vec<Trip>,
}

impl TripPartition {
    pub fn from_trips(trips: impl IntoIterator<Item = Trip>, now: DateTime<Utc>) -> Self {
        let (upcoming, mut recent): (Vec<_>, Vec<_>) =
            trips.into_iter().partition(|trip| trip.is_upcoming(now));
        recent.truncate(RECENT_TRIPS_SHOWN);
        Self { upcoming, recent }
    }
}
