//! Wallet queries available only on the document repository.

use tracing::debug;

use super::Repository;
use crate::entities::{Document, DocumentType, Entity};
use crate::latency::Operation;

/// Look-ahead used by the wallet for expiring documents.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 180;

impl Repository<Document> {
    /// Documents whose type is exactly `kind`, in insertion order.
    pub async fn get_by_type(&self, kind: DocumentType) -> Vec<Document> {
        self.latency()
            .wait(Document::KIND, Operation::GetByType)
            .await;
        let documents = self.collection().filter(|doc| doc.kind == kind).await;
        debug!(%kind, count = documents.len(), "get_by_type");
        documents
    }

    /// Case-insensitive substring search over name, type, description,
    /// country and document number. Any field matching is enough. Results
    /// keep insertion order and are not ranked.
    pub async fn search(&self, query: &str) -> Vec<Document> {
        self.latency().wait(Document::KIND, Operation::Search).await;
        let needle = query.to_lowercase();
        let documents = self
            .collection()
            .filter(|doc| doc.matches_lowercase(&needle))
            .await;
        debug!(query, count = documents.len(), "search");
        documents
    }

    /// Documents that have not expired yet and expire within `days` of
    /// today, the last day included. Documents without an expiry date are
    /// never returned.
    pub async fn get_expiring_documents(&self, days: i64) -> Vec<Document> {
        self.latency()
            .wait(Document::KIND, Operation::GetExpiring)
            .await;
        let today = self.clock().now().date_naive();
        let documents = self
            .collection()
            .filter(|doc| doc.expires_within(today, days))
            .await;
        debug!(days, count = documents.len(), "get_expiring_documents");
        documents
    }
}
