//! Bodies of the `wanderly` subcommands.
//!
//! Each command reads through the store's repositories and writes a plain
//! text report to the given writer. The binary passes stdout.

use std::io::Write;

use tracing::info;

use crate::dashboard::TripPartition;
use crate::entities::{Booking, BookingKind, NewBooking};
use crate::repository::DEFAULT_EXPIRY_WINDOW_DAYS;
use crate::search::{MockSearchProvider, SearchForm};
use crate::stores::Store;
use crate::wallet::{DocumentStats, WalletFilter};
use crate::Error;

pub async fn dashboard<W: Write>(store: &Store, mut out: W) -> Result<(), Error> {
    let trips = store.trips();
    let documents = store.documents();
    let (trips, expiring) = tokio::join!(
        trips.get_all(),
        documents.get_expiring_documents(DEFAULT_EXPIRY_WINDOW_DAYS),
    );
    let partition = TripPartition::from_trips(trips, store.clock().now());

    writeln!(out, "Upcoming trips ({})", partition.upcoming.len())?;
    for trip in &partition.upcoming {
        writeln!(
            out,
            "  {:<24} {:<12} {} .. {}  {:?}",
            trip.name,
            trip.destination.as_deref().unwrap_or("-"),
            trip.start_date,
            trip.end_date,
            trip.status
        )?;
    }
    writeln!(out, "Recent trips ({})", partition.recent.len())?;
    for trip in &partition.recent {
        writeln!(out, "  {:<24} {}", trip.name, trip.start_date)?;
    }
    writeln!(
        out,
        "Expiring within {DEFAULT_EXPIRY_WINDOW_DAYS} days ({})",
        expiring.len()
    )?;
    for document in &expiring {
        if let Some(expiry) = document.expiry_date {
            writeln!(out, "  {:<32} {:<10} {}", document.name, document.kind.as_str(), expiry)?;
        }
    }
    Ok(())
}

pub async fn wallet<W: Write>(store: &Store, filter: &WalletFilter, mut out: W) -> Result<(), Error> {
    let documents = store.documents().get_all().await;
    let stats = DocumentStats::from_documents(&documents, store.clock().now());

    writeln!(
        out,
        "{} documents: {} passports, {} visas, {} tickets, {} insurance, {} other ({} expiring soon)",
        stats.total,
        stats.passports,
        stats.visas,
        stats.tickets,
        stats.insurance,
        stats.other,
        stats.expiring_soon
    )?;
    for document in filter.apply(&documents) {
        let expiry = document
            .expiry_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "  [{}] {:<32} {:<10} {}",
            document.document_id,
            document.name,
            document.kind.as_str(),
            expiry
        )?;
    }
    Ok(())
}

/// Lists the offers for `form` and, when `book` names one of them, stores
/// a booking for it.
///
/// # Errors
/// Returns an error if:
/// * The form is incomplete for `kind`
/// * `book` matches no offer id
/// * Writing to `out` fails
pub async fn search<W: Write>(
    store: &Store,
    kind: BookingKind,
    form: &SearchForm,
    book: Option<u32>,
    mut out: W,
) -> Result<Option<Booking>, Error> {
    let offers = MockSearchProvider::new(store.latency()).search(kind, form).await?;
    for offer in &offers {
        writeln!(
            out,
            "  [{}] {:<14} {:>6}  {}",
            offer.id, offer.provider, offer.price, offer.details
        )?;
    }

    let Some(choice) = book else {
        return Ok(None);
    };
    let offer = offers
        .iter()
        .find(|offer| offer.id == choice)
        .ok_or_else(|| Error::InvalidSearch(format!("no offer with id {choice}")))?;
    let draft = NewBooking::from_offer(kind, form, offer, store.clock().now());
    let booking = store.bookings().create(draft).await;
    info!(id = %booking.booking_id, provider = %booking.provider, "booked");
    writeln!(
        out,
        "Booked {} with {} ({} {}), confirmation {}",
        booking.route().unwrap_or_default(),
        booking.provider,
        booking.price,
        booking.currency,
        booking.confirmation_number
    )?;
    Ok(Some(booking))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::entities::DocumentType;
    use crate::latency::Latency;
    use crate::Fixtures;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    fn store() -> Store {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        ));
        Store::builder()
            .fixtures(Fixtures::embedded().unwrap())
            .clock(clock)
            .latency(Latency::none())
            .build()
    }

    fn form(to: &str) -> SearchForm {
        SearchForm {
            from: "Chicago".to_string(),
            to: to.to_string(),
            depart_date: NaiveDate::from_ymd_opt(2027, 4, 2),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dashboard_report() -> Result<(), Box<dyn std::error::Error>> {
        let mut output = Vec::new();
        dashboard(&store(), &mut output).await?;
        let text = String::from_utf8(output)?;

        assert!(text.starts_with("Upcoming trips (2)\n  Tokyo Adventure"));
        assert!(text.contains("Recent trips (3)\n  New York Business Trip"));
        assert!(text.contains("Expiring within 180 days (2)"));
        assert!(text.contains("Japan Tourist Visa"));
        assert!(!text.contains("Schengen Visa"));
        Ok(())
    }

    #[tokio::test]
    async fn test_wallet_report_filters_rows_but_counts_everything() -> Result<(), Box<dyn std::error::Error>> {
        let filter = WalletFilter {
            kind: Some(DocumentType::Visa),
            query: String::new(),
        };
        let mut output = Vec::new();
        wallet(&store(), &filter, &mut output).await?;
        let text = String::from_utf8(output)?;

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("6 documents: 1 passports, 2 visas, 1 tickets, 1 insurance, 1 other (3 expiring soon)")
        );
        let rows: Vec<_> = lines.collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("  [2] Japan Tourist Visa"));
        assert!(rows[1].starts_with("  [5] Schengen Visa"));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_without_booking_only_lists() -> Result<(), Box<dyn std::error::Error>> {
        let store = store();
        let mut output = Vec::new();
        let booked = search(&store, BookingKind::Cars, &form("Detroit"), None, &mut output).await?;

        assert!(booked.is_none());
        let text = String::from_utf8(output)?;
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Hertz"));
        assert!(text.contains("Nissan Rogue"));
        assert_eq!(store.bookings().get_all().await.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_books_chosen_hotel() -> Result<(), Box<dyn std::error::Error>> {
        let store = store();
        let mut output = Vec::new();
        let booked = search(&store, BookingKind::Hotels, &form(""), Some(2), &mut output).await?;

        let booking = booked.ok_or("no booking returned")?;
        assert_eq!(booking.provider, "Budget Inn");
        assert_eq!(booking.kind, BookingKind::Hotels);
        assert_eq!(store.bookings().get_by_id(&booking.booking_id).await, Some(booking.clone()));

        let text = String::from_utf8(output)?;
        assert!(text.ends_with(&format!(
            "Booked Chicago with Budget Inn (80 USD), confirmation {}\n",
            booking.confirmation_number
        )));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_unknown_offer_books_nothing() {
        let store = store();
        let result = search(&store, BookingKind::Flights, &form("Miami"), Some(9), Vec::<u8>::new()).await;

        assert!(matches!(result, Err(Error::InvalidSearch(_))));
        assert_eq!(store.bookings().get_all().await.len(), 4);
    }
}
