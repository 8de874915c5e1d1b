//! Document wallet view: filtering by type and free text, plus the
//! per-type counters shown above the document list.
//!
//! Unlike [`Repository::search`](crate::Repository::search), the wallet's
//! own text filter only looks at name, type and description, and it runs
//! in memory over documents the caller already holds.

use chrono::{DateTime, Utc};

use crate::entities::{Document, DocumentType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletFilter {
    /// `None` shows every type.
    pub kind: Option<DocumentType>,
    pub query: String,
}

impl WalletFilter {
    pub fn matches(&self, document: &Document) -> bool {
        let kind_ok = self.kind.map_or(true, |kind| document.kind == kind);
        kind_ok && self.matches_query(document)
    }

    pub fn apply<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents.iter().filter(|doc| self.matches(doc)).collect()
    }

    fn matches_query(&self, document: &Document) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        document.name.to_lowercase().contains(&needle)
            || document.kind.as_str().contains(&needle)
            || document
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub total: usize,
    pub passports: usize,
    pub visas: usize,
    pub tickets: usize,
    pub insurance: usize,
    pub other: usize,
    pub expiring_soon: usize,
}

impl DocumentStats {
    pub fn from_documents(documents: &[Document], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total: documents.len(),
            ..Self::default()
        };
        for document in documents {
            let counter = match document.kind {
                DocumentType::Passport => &mut stats.passports,
                DocumentType::Visa => &mut stats.visas,
                DocumentType::Ticket => &mut stats.tickets,
                DocumentType::Insurance => &mut stats.insurance,
                DocumentType::Other => &mut stats.other,
            };
            *counter += 1;
            if document.is_expiring_soon(now) {
                stats.expiring_soon += 1;
            }
        }
        stats
    }
}
