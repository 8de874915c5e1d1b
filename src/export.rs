//! CSV export of collection snapshots.
//!
//! Output uses the fixture headers, so an exported file can be dropped into
//! a fixtures directory as-is.

use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::csv_utils::write_csv;
use crate::entities::{Entity, EntityKind};
use crate::stores::Store;
use crate::Error;

/// Writes `records` as CSV to `writer`.
pub fn export_csv<E, W>(writer: W, records: &[E]) -> Result<(), Error>
where
    E: Entity + Serialize,
    W: Write,
{
    write_csv(writer, records)?;
    debug!(kind = %E::KIND, count = records.len(), "exported");
    Ok(())
}

/// Snapshots one collection of `store` and writes it as CSV.
///
/// The snapshot goes through the repository, so simulated latency applies.
pub async fn export_kind<W: Write>(store: &Store, kind: EntityKind, writer: W) -> Result<(), Error> {
    match kind {
        EntityKind::Trip => export_csv(writer, &store.trips().get_all().await),
        EntityKind::Booking => export_csv(writer, &store.bookings().get_all().await),
        EntityKind::Document => export_csv(writer, &store.documents().get_all().await),
        EntityKind::Expense => export_csv(writer, &store.expenses().get_all().await),
        EntityKind::User => export_csv(writer, &store.users().get_all().await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_utils::read_csv;
    use crate::entities::{Booking, Document, Expense, NewUser, Trip, User, UserPatch};
    use crate::latency::Latency;
    use crate::Fixtures;

    fn store() -> Store {
        Store::builder()
            .fixtures(Fixtures::embedded().unwrap())
            .latency(Latency::none())
            .build()
    }

    #[tokio::test]
    async fn test_export_of_seeded_users_matches_fixture() -> Result<(), Box<dyn std::error::Error>> {
        let mut output = Vec::new();
        export_kind(&store(), EntityKind::User, &mut output).await?;

        let expected = "userId,name,email,homeCity,preferredCurrency,createdAt,updatedAt
1,Alex Morgan,alex.morgan@example.com,San Francisco,USD,2025-06-01T09:00:00Z,
2,Priya Raman,priya.raman@example.com,,EUR,2025-11-14T17:20:00Z,2026-01-03T10:00:00Z
";
        assert_eq!(String::from_utf8(output)?, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_export_reflects_changes() -> Result<(), Box<dyn std::error::Error>> {
        let store = store();
        store.users().delete("1").await?;
        store
            .users()
            .update(
                "2",
                UserPatch {
                    home_city: Some(Some("Lisbon".to_string())),
                    ..Default::default()
                },
            )
            .await?;
        let created = store
            .users()
            .create(NewUser {
                name: "Jo Park".to_string(),
                email: "jo@example.com".to_string(),
                home_city: None,
                preferred_currency: "GBP".to_string(),
            })
            .await;

        let mut output = Vec::new();
        export_kind(&store, EntityKind::User, &mut output).await?;
        let users: Vec<User> = read_csv(output.as_slice())?;

        let ids: Vec<_> = users.iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(ids, ["2", created.user_id.as_str()]);
        assert_eq!(users[0].home_city.as_deref(), Some("Lisbon"));
        assert_eq!(users[1], created);
        Ok(())
    }

    #[tokio::test]
    async fn test_every_kind_exports_and_reloads() -> Result<(), Box<dyn std::error::Error>> {
        let store = store();
        let fixtures = Fixtures::embedded()?;

        for kind in EntityKind::ALL {
            let mut output = Vec::new();
            export_kind(&store, kind, &mut output).await?;
            let reloaded = match kind {
                EntityKind::Trip => {
                    read_csv::<Trip, _>(output.as_slice())? == fixtures.trips
                }
                EntityKind::Booking => {
                    read_csv::<Booking, _>(output.as_slice())? == fixtures.bookings
                }
                EntityKind::Document => {
                    read_csv::<Document, _>(output.as_slice())? == fixtures.documents
                }
                EntityKind::Expense => {
                    read_csv::<Expense, _>(output.as_slice())? == fixtures.expenses
                }
                EntityKind::User => {
                    read_csv::<User, _>(output.as_slice())? == fixtures.users
                }
            };
            assert!(reloaded, "{kind} export did not reload");
        }
        Ok(())
    }
}
