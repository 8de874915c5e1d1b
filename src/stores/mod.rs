//! Storage layer for the travel data. Provides:
//! - One ordered collection per entity kind ([`Collection`])
//! - The process-wide [`Store`] owning them together with the id generator,
//!   clock and latency settings its repositories share
//!
//! Nothing lives in module-level state: two stores never see each other's
//! records.

mod collection;
mod store;

pub use collection::Collection;
pub use store::{Store, StoreBuilder};
