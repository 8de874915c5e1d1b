//! Data access for one entity kind.
//!
//! A [`Repository`] is a cheap handle over a store's collection: cloning it
//! or asking the store for another one yields a view of the same records.
//! Every call first sleeps for its operation's fixed latency, then reads or
//! mutates the collection and returns owned copies.
//!
//! Lookups by id return `None` on a miss, while `update` and `delete` fail
//! with [`Error::NotFound`]. Nothing is validated on the way in.
//!
//! A future dropped while it is still sleeping changes nothing. Once the
//! delay has elapsed the mutation runs to completion.

mod documents;

use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::entities::Entity;
use crate::ids::IdGenerator;
use crate::latency::{Latency, Operation};
use crate::stores::Collection;
use crate::Error;

pub use documents::DEFAULT_EXPIRY_WINDOW_DAYS;

pub struct Repository<E> {
    collection: Arc<Collection<E>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    latency: Latency,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
            latency: self.latency,
        }
    }
}

impl<E: Entity> fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("kind", &E::KIND)
            .field("latency", &self.latency)
            .finish()
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(
        collection: Arc<Collection<E>>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        latency: Latency,
    ) -> Self {
        Self {
            collection,
            ids,
            clock,
            latency,
        }
    }

    pub async fn get_all(&self) -> Vec<E> {
        self.latency.wait(E::KIND, Operation::GetAll).await;
        let records = self.collection.snapshot().await;
        debug!(kind = %E::KIND, count = records.len(), "get_all");
        records
    }

    pub async fn get_by_id(&self, id: &str) -> Option<E> {
        self.latency.wait(E::KIND, Operation::GetById).await;
        let record = self.collection.find(id).await;
        debug!(kind = %E::KIND, id, found = record.is_some(), "get_by_id");
        record
    }

    /// Stores a new record with a fresh id and creation stamp.
    pub async fn create(&self, draft: E::Draft) -> E {
        self.latency.wait(E::KIND, Operation::Create).await;
        let record = E::create(self.ids.next_id(), draft, self.clock.now());
        let stored = self.collection.push(record).await;
        debug!(kind = %E::KIND, id = stored.id(), "create");
        stored
    }

    /// Overlays `patch` on the record with `id` and stamps the update time.
    pub async fn update(&self, id: &str, patch: E::Patch) -> Result<E, Error> {
        self.latency.wait(E::KIND, Operation::Update).await;
        let now = self.clock.now();
        let result = self
            .collection
            .modify(id, |record| record.apply(patch, now))
            .await;
        match &result {
            Ok(_) => debug!(kind = %E::KIND, id, "update"),
            Err(err) => warn!(kind = %E::KIND, id, %err, "update failed"),
        }
        result
    }

    /// Removes the record with `id` and returns it.
    pub async fn delete(&self, id: &str) -> Result<E, Error> {
        self.latency.wait(E::KIND, Operation::Delete).await;
        let result = self.collection.remove(id).await;
        match &result {
            Ok(_) => debug!(kind = %E::KIND, id, "delete"),
            Err(err) => warn!(kind = %E::KIND, id, %err, "delete failed"),
        }
        result
    }

    pub(crate) fn collection(&self) -> &Collection<E> {
        &self.collection
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn latency(&self) -> Latency {
        self.latency
    }
}
