//! Mock travel search and the booking drafts built from its offers.
//!
//! There is no provider behind this: a valid search waits for a fixed delay
//! and returns the same three offers for every tab and route.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::info;

use crate::entities::{BookingKind, BookingStatus, NewBooking};
use crate::latency::{self, Latency};
use crate::Error;

pub const DEFAULT_CURRENCY: &str = "USD";
const CONFIRMATION_PREFIX: &str = "WN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    #[default]
    Economy,
    Premium,
    Business,
    First,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub from: String,
    pub to: String,
    pub depart_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
    pub class: CabinClass,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: String::new(),
            depart_date: None,
            return_date: None,
            passengers: 1,
            class: CabinClass::Economy,
        }
    }
}

impl SearchForm {
    /// Origin and departure date are always required. Hotel searches have
    /// no destination, every other kind needs one.
    pub fn validate(&self, kind: BookingKind) -> Result<NaiveDate, Error> {
        if self.from.trim().is_empty() {
            return Err(Error::InvalidSearch("origin is required".to_string()));
        }
        if kind != BookingKind::Hotels && self.to.trim().is_empty() {
            return Err(Error::InvalidSearch("destination is required".to_string()));
        }
        self.depart_date
            .ok_or_else(|| Error::InvalidSearch("departure date is required".to_string()))
    }
}

/// Kind-specific fields of an offer. They are flattened next to the common
/// fields when an offer is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfferDetails {
    Flight {
        duration: String,
        departure: String,
        arrival: String,
        stops: String,
        aircraft: String,
    },
    Hotel {
        #[serde(rename = "type")]
        category: String,
        rating: u8,
        address: String,
    },
    Car {
        #[serde(rename = "type")]
        category: String,
        model: String,
        fuel: String,
    },
}

impl fmt::Display for OfferDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferDetails::Flight {
                duration,
                departure,
                arrival,
                stops,
                aircraft,
            } => write!(f, "{duration}  {departure} -> {arrival}  {stops}  {aircraft}"),
            OfferDetails::Hotel {
                category,
                rating,
                address,
            } => write!(f, "{category}  {rating}*  {address}"),
            OfferDetails::Car {
                category,
                model,
                fuel,
            } => write!(f, "{category}  {model}  {fuel}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOffer {
    pub id: u32,
    pub provider: String,
    /// Plain JSON number, as in a booking's details record.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(flatten)]
    pub details: OfferDetails,
}

impl SearchOffer {
    fn new(id: u32, provider: &str, price: i64, details: OfferDetails) -> Self {
        Self {
            id,
            provider: provider.to_string(),
            price: Decimal::new(price, 0),
            details,
        }
    }
}

fn flight(duration: &str, departure: &str, arrival: &str, stops: &str, aircraft: &str) -> OfferDetails {
    OfferDetails::Flight {
        duration: duration.to_string(),
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        stops: stops.to_string(),
        aircraft: aircraft.to_string(),
    }
}

fn hotel(category: &str, rating: u8, address: &str) -> OfferDetails {
    OfferDetails::Hotel {
        category: category.to_string(),
        rating,
        address: address.to_string(),
    }
}

fn car(category: &str, model: &str, fuel: &str) -> OfferDetails {
    OfferDetails::Car {
        category: category.to_string(),
        model: model.to_string(),
        fuel: fuel.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockSearchProvider {
    latency: Latency,
}

impl MockSearchProvider {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    /// Validates the form, waits out the provider delay and returns the
    /// canned offers for `kind`. Invalid forms fail immediately, without
    /// the delay.
    pub async fn search(&self, kind: BookingKind, form: &SearchForm) -> Result<Vec<SearchOffer>, Error> {
        form.validate(kind)?;
        latency::sleep(self.latency.provider_search()).await;
        let offers = canned_offers(kind);
        info!(kind = kind.as_str(), from = %form.from, to = %form.to, count = offers.len(), "search completed");
        Ok(offers)
    }
}

fn canned_offers(kind: BookingKind) -> Vec<SearchOffer> {
    match kind {
        BookingKind::Flights => vec![
            SearchOffer::new(1, "AirExpress", 299, flight("3h 45m", "08:30", "12:15", "Non-stop", "Boeing 737")),
            SearchOffer::new(2, "SkyLine", 259, flight("5h 20m", "14:15", "19:35", "1 stop", "Airbus A320")),
            SearchOffer::new(3, "CloudWings", 349, flight("3h 30m", "18:45", "22:15", "Non-stop", "Boeing 787")),
        ],
        BookingKind::Hotels => vec![
            SearchOffer::new(1, "Grand Hyatt", 180, hotel("Hotel", 5, "123 Main St")),
            SearchOffer::new(2, "Budget Inn", 80, hotel("Motel", 3, "456 Side St")),
            SearchOffer::new(3, "Luxury Suites", 300, hotel("Resort", 4, "789 Park Ave")),
        ],
        BookingKind::Cars => vec![
            SearchOffer::new(1, "Hertz", 50, car("Compact Car", "Toyota Corolla", "Full to Full")),
            SearchOffer::new(2, "Avis", 70, car("SUV", "Nissan Rogue", "Full to Full")),
            SearchOffer::new(3, "Enterprise", 60, car("Sedan", "Honda Civic", "Full to Full")),
        ],
    }
}

impl NewBooking {
    /// Draft for booking `offer`. The details record holds the route and
    /// date from the form with every offer field laid over it. Hotel
    /// bookings carry no destination.
    pub fn from_offer(
        kind: BookingKind,
        form: &SearchForm,
        offer: &SearchOffer,
        now: DateTime<Utc>,
    ) -> Self {
        let mut details = Map::new();
        details.insert("from".to_string(), Value::String(form.from.clone()));
        if kind != BookingKind::Hotels {
            details.insert("to".to_string(), Value::String(form.to.clone()));
        }
        if let Some(date) = form.depart_date {
            details.insert("date".to_string(), Value::String(date.to_string()));
        }
        if let Ok(Value::Object(fields)) = serde_json::to_value(offer) {
            details.extend(fields);
        }

        Self {
            trip_id: None,
            kind,
            provider: offer.provider.clone(),
            details,
            price: offer.price,
            currency: DEFAULT_CURRENCY.to_string(),
            confirmation_number: format!("{CONFIRMATION_PREFIX}{}", now.timestamp_millis()),
            status: BookingStatus::Confirmed,
        }
    }
}
