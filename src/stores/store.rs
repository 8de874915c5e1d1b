use std::sync::Arc;
use tracing::info;

use super::Collection;
use crate::clock::{Clock, SystemClock};
use crate::entities::{Booking, Document, Entity, Expense, Trip, User};
use crate::fixtures::{kind_counts, Fixtures};
use crate::ids::{IdGenerator, SequentialIds};
use crate::latency::Latency;
use crate::repository::Repository;

pub struct Store {
    trips: Arc<Collection<Trip>>,
    bookings: Arc<Collection<Booking>>,
    documents: Arc<Collection<Document>>,
    expenses: Arc<Collection<Expense>>,
    users: Arc<Collection<User>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    latency: Latency,
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    pub fn trips(&self) -> Repository<Trip> {
        self.repository(&self.trips)
    }

    pub fn bookings(&self) -> Repository<Booking> {
        self.repository(&self.bookings)
    }

    pub fn documents(&self) -> Repository<Document> {
        self.repository(&self.documents)
    }

    pub fn expenses(&self) -> Repository<Expense> {
        self.repository(&self.expenses)
    }

    pub fn users(&self) -> Repository<User> {
        self.repository(&self.users)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    fn repository<E: Entity>(&self, collection: &Arc<Collection<E>>) -> Repository<E> {
        Repository::new(
            Arc::clone(collection),
            Arc::clone(&self.ids),
            Arc::clone(&self.clock),
            self.latency,
        )
    }
}

/// Assembles a [`Store`]. Unset parts default to: no seed data, the system
/// clock, simulated latency, and sequential ids starting above the highest
/// numeric fixture id.
#[derive(Default)]
pub struct StoreBuilder {
    fixtures: Fixtures,
    ids: Option<Arc<dyn IdGenerator>>,
    clock: Option<Arc<dyn Clock>>,
    latency: Latency,
}

impl StoreBuilder {
    pub fn fixtures(mut self, fixtures: Fixtures) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn build(self) -> Store {
        let fixtures = self.fixtures;
        let ids: Arc<dyn IdGenerator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(SequentialIds::starting_after(fixtures.max_numeric_id())),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };

        for (kind, count) in kind_counts(&fixtures) {
            info!(%kind, count, "seeding collection");
        }

        Store {
            trips: Arc::new(Collection::new(fixtures.trips)),
            bookings: Arc::new(Collection::new(fixtures.bookings)),
            documents: Arc::new(Collection::new(fixtures.documents)),
            expenses: Arc::new(Collection::new(fixtures.expenses)),
            users: Arc::new(Collection::new(fixtures.users)),
            ids,
            clock,
            latency: self.latency,
        }
    }
}
