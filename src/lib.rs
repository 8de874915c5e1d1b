pub mod clock;
pub mod commands;
pub mod config;
pub mod csv_utils;
pub mod dashboard;
pub mod entities;
mod error;
pub mod export;
pub mod fixtures;
pub mod ids;
pub mod latency;
mod repository;
pub mod search;
mod stores;
pub mod wallet;

pub use config::{IdStrategy, Settings};
pub use entities::{
    Booking, BookingKind, BookingStatus, Document, DocumentType, Entity, EntityKind, Expense,
    Trip, TripStatus, User,
};
pub use error::{Error, Result};
pub use export::{export_csv, export_kind};
pub use fixtures::Fixtures;
pub use latency::Latency;
pub use repository::{Repository, DEFAULT_EXPIRY_WINDOW_DAYS};
pub use stores::{Collection, Store, StoreBuilder};
