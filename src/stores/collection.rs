//! Ordered in-memory collection of one entity kind.
//!
//! Records keep insertion order; updates replace in place. Every accessor
//! hands out clones, so callers never hold a reference into the store.

use tokio::sync::RwLock;

use crate::entities::Entity;
use crate::Error;

#[derive(Debug)]
pub struct Collection<E> {
    records: RwLock<Vec<E>>,
}

impl<E: Entity> Default for Collection<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E: Entity> Collection<E> {
    pub fn new(seed: Vec<E>) -> Self {
        Self {
            records: RwLock::new(seed),
        }
    }

    pub async fn snapshot(&self) -> Vec<E> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn find(&self, id: &str) -> Option<E> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<E>
    where
        F: Fn(&E) -> bool,
    {
        self.records
            .read()
            .await
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Appends a record and returns a copy of what was stored.
    pub async fn push(&self, record: E) -> E {
        let stored = record.clone();
        self.records.write().await.push(record);
        stored
    }

    /// Applies `change` to the record with `id` in place.
    /// Returns an error if no record has that id.
    pub async fn modify<F>(&self, id: &str, change: F) -> Result<E, Error>
    where
        F: FnOnce(&mut E),
    {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Error::not_found(E::KIND, id))?;
        change(record);
        Ok(record.clone())
    }

    /// Removes the record with `id`, keeping the order of the others.
    /// Returns an error if no record has that id.
    pub async fn remove(&self, id: &str) -> Result<E, Error> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| Error::not_found(E::KIND, id))?;
        Ok(records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Entity, NewUser, User, UserPatch};
    use chrono::{TimeZone, Utc};

    fn user(id: &str, name: &str) -> User {
        User::create(
            id.to_string(),
            NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                home_city: None,
                preferred_currency: "USD".to_string(),
            },
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_new_collection_is_empty() {
        let collection = Collection::<User>::default();
        assert!(collection.is_empty().await);
        assert!(collection.find("1").await.is_none());
        assert!(collection.remove("1").await.is_err());
    }

    #[tokio::test]
    async fn test_push_keeps_insertion_order() {
        let collection = Collection::new(vec![user("2", "Bea")]);
        collection.push(user("1", "Al")).await;
        collection.push(user("3", "Cy")).await;

        let ids: Vec<_> = collection
            .snapshot()
            .await
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(ids, ["2", "1", "3"]);
    }

    #[tokio::test]
    async fn test_modify_in_place_does_not_reorder() {
        let collection = Collection::new(vec![user("1", "Al"), user("2", "Bea")]);
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

        let updated = collection
            .modify("1", |u| {
                u.apply(
                    UserPatch {
                        name: Some("Alan".to_string()),
                        ..Default::default()
                    },
                    now,
                )
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Alan");

        let snapshot = collection.snapshot().await;
        assert_eq!(snapshot[0].name, "Alan");
        assert_eq!(snapshot[1].name, "Bea");
    }

    #[tokio::test]
    async fn test_modify_missing_is_not_found() {
        let collection = Collection::new(vec![user("1", "Al")]);
        let result = collection.modify("9", |_| {}).await;
        assert!(matches!(result, Err(Error::NotFound { ref id, .. }) if id == "9"));
    }

    #[tokio::test]
    async fn test_remove_returns_record_and_keeps_order() {
        let collection = Collection::new(vec![user("1", "Al"), user("2", "Bea"), user("3", "Cy")]);
        let removed = collection.remove("2").await.unwrap();
        assert_eq!(removed.name, "Bea");

        let names: Vec<_> = collection
            .snapshot()
            .await
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, ["Al", "Cy"]);
        assert!(collection.remove("2").await.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_is_independent() {
        let collection = Collection::new(vec![user("1", "Al")]);
        let mut snapshot = collection.snapshot().await;
        snapshot[0].name = "Mallory".to_string();
        snapshot.clear();

        assert_eq!(collection.len().await, 1);
        assert_eq!(collection.find("1").await.unwrap().name, "Al");
    }
}
