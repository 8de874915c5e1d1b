//! Seed data for the store.
//!
//! The five fixture CSVs under `data/` are compiled into the crate, so a
//! store can be seeded with no filesystem access. A directory holding files
//! with the same names can be streamed in instead with [`Fixtures::load_dir`].

use csv_async::{AsyncReaderBuilder, Trim};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs::File;
use tokio_stream::StreamExt;

use crate::csv_utils::read_csv;
use crate::entities::{Booking, Document, Entity, EntityKind, Expense, Trip, User};
use crate::Error;

const TRIPS_CSV: &str = include_str!("../data/trips.csv");
const BOOKINGS_CSV: &str = include_str!("../data/bookings.csv");
const DOCUMENTS_CSV: &str = include_str!("../data/documents.csv");
const EXPENSES_CSV: &str = include_str!("../data/expenses.csv");
const USERS_CSV: &str = include_str!("../data/users.csv");

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixtures {
    pub trips: Vec<Trip>,
    pub bookings: Vec<Booking>,
    pub documents: Vec<Document>,
    pub expenses: Vec<Expense>,
    pub users: Vec<User>,
}

impl Fixtures {
    /// An empty seed, for stores that start with nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the fixtures bundled with the crate.
    pub fn embedded() -> Result<Self, Error> {
        let fixtures = Self {
            trips: read_csv(TRIPS_CSV.as_bytes())?,
            bookings: read_csv(BOOKINGS_CSV.as_bytes())?,
            documents: read_csv(DOCUMENTS_CSV.as_bytes())?,
            expenses: read_csv(EXPENSES_CSV.as_bytes())?,
            users: read_csv(USERS_CSV.as_bytes())?,
        };
        fixtures.validate()?;
        Ok(fixtures)
    }

    /// Streams `trips.csv`, `bookings.csv`, `documents.csv`, `expenses.csv`
    /// and `users.csv` from `dir`. The five files are read concurrently.
    ///
    /// # Errors
    /// Returns an error if:
    /// * A file is missing or unreadable
    /// * A row is malformed
    /// * Two rows of one kind share an id
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let (trips, bookings, documents, expenses, users) = tokio::try_join!(
            load_file::<Trip>(dir),
            load_file::<Booking>(dir),
            load_file::<Document>(dir),
            load_file::<Expense>(dir),
            load_file::<User>(dir),
        )?;
        let fixtures = Self {
            trips,
            bookings,
            documents,
            expenses,
            users,
        };
        fixtures.validate()?;
        Ok(fixtures)
    }

    /// Largest purely numeric id across all kinds. Sequential id generation
    /// starts after it.
    pub fn max_numeric_id(&self) -> u64 {
        let trips = self.trips.iter().map(Entity::id);
        let bookings = self.bookings.iter().map(Entity::id);
        let documents = self.documents.iter().map(Entity::id);
        let expenses = self.expenses.iter().map(Entity::id);
        let users = self.users.iter().map(Entity::id);
        trips
            .chain(bookings)
            .chain(documents)
            .chain(expenses)
            .chain(users)
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
    }

    fn validate(&self) -> Result<(), Error> {
        check_unique_ids(&self.trips)?;
        check_unique_ids(&self.bookings)?;
        check_unique_ids(&self.documents)?;
        check_unique_ids(&self.expenses)?;
        check_unique_ids(&self.users)
    }
}

fn check_unique_ids<E: Entity>(records: &[E]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(Error::FixtureFormat {
                kind: E::KIND,
                reason: format!("duplicate id '{}'", record.id()),
            });
        }
    }
    Ok(())
}

async fn load_file<E: Entity>(dir: &Path) -> Result<Vec<E>, Error> {
    let path = dir.join(E::KIND.fixture_file());
    let file = File::open(&path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<E>();
    let mut loaded = Vec::new();
    while let Some(result) = records.next().await {
        // malformed rows abort the whole load
        loaded.push(result?);
    }
    tracing::debug!(kind = %E::KIND, count = loaded.len(), path = %path.display(), "fixture loaded");
    Ok(loaded)
}

pub(crate) fn kind_counts(fixtures: &Fixtures) -> [(EntityKind, usize); 5] {
    [
        (EntityKind::Trip, fixtures.trips.len()),
        (EntityKind::Booking, fixtures.bookings.len()),
        (EntityKind::Document, fixtures.documents.len()),
        (EntityKind::Expense, fixtures.expenses.len()),
        (EntityKind::User, fixtures.users.len()),
    ]
}
