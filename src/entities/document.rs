use chrono::{DateTime, Duration, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{merge, Entity, EntityKind};

/// Window, in days, inside which a document counts as expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Passport,
    Visa,
    Ticket,
    Insurance,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Passport,
        DocumentType::Visa,
        DocumentType::Ticket,
        DocumentType::Insurance,
        DocumentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Passport => "passport",
            DocumentType::Visa => "visa",
            DocumentType::Ticket => "ticket",
            DocumentType::Insurance => "insurance",
            DocumentType::Other => "other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown document type '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub description: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub document_number: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub file_type: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Case-insensitive substring match over name, type, description,
    /// country and document number. `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(self.name.as_str())
            || contains(self.kind.as_str())
            || self.description.as_deref().is_some_and(contains)
            || self.country.as_deref().is_some_and(contains)
            || self.document_number.as_deref().is_some_and(contains)
    }

    /// Expires after `today` and no later than `today + days`. A window
    /// reaching past the last representable date has no upper bound.
    pub fn expires_within(&self, today: NaiveDate, days: i64) -> bool {
        let Some(expiry) = self.expiry_date else {
            return false;
        };
        if expiry <= today {
            return false;
        }
        match TimeDelta::try_days(days).and_then(|window| today.checked_add_signed(window)) {
            Some(last_day) => expiry <= last_day,
            None => days > 0,
        }
    }

    /// Badge condition for the wallet: an expiry date within the warning
    /// window. Already expired documents are flagged too.
    pub fn is_expiring_soon(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date
            .is_some_and(|expiry| expiry <= now.date_naive() + Duration::days(EXPIRY_WARNING_DAYS))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub name: String,
    pub kind: DocumentType,
    pub description: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub country: Option<String>,
    pub document_number: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub file_type: Option<String>,
    pub file_url: Option<String>,
}

impl NewDocument {
    pub fn new(name: impl Into<String>, kind: DocumentType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            expiry_date: None,
            issue_date: None,
            country: None,
            document_number: None,
            file_name: None,
            file_size: None,
            file_type: None,
            file_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub name: Option<String>,
    pub kind: Option<DocumentType>,
    pub description: Option<Option<String>>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub issue_date: Option<Option<NaiveDate>>,
    pub country: Option<Option<String>>,
    pub document_number: Option<Option<String>>,
}

impl Entity for Document {
    const KIND: EntityKind = EntityKind::Document;

    type Draft = NewDocument;
    type Patch = DocumentPatch;

    fn id(&self) -> &str {
        &self.document_id
    }

    // Documents carry an update stamp from the moment they are stored.
    fn create(id: String, draft: NewDocument, now: DateTime<Utc>) -> Self {
        Self {
            document_id: id,
            name: draft.name,
            kind: draft.kind,
            description: draft.description,
            expiry_date: draft.expiry_date,
            issue_date: draft.issue_date,
            country: draft.country,
            document_number: draft.document_number,
            file_name: draft.file_name,
            file_size: draft.file_size,
            file_type: draft.file_type,
            file_url: draft.file_url,
            created_at: now,
            updated_at: Some(now),
        }
    }

    fn apply(&mut self, patch: DocumentPatch, now: DateTime<Utc>) {
        merge(&mut self.name, patch.name);
        merge(&mut self.kind, patch.kind);
        merge(&mut self.description, patch.description);
        merge(&mut self.expiry_date, patch.expiry_date);
        merge(&mut self.issue_date, patch.issue_date);
        merge(&mut self.country, patch.country);
        merge(&mut self.document_number, patch.document_number);
        self.updated_at = Some(now);
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn passport(expiry: Option<NaiveDate>) -> Document {
        let mut draft = NewDocument::new("Passport", DocumentType::Passport);
        draft.expiry_date = expiry;
        draft.country = Some("Canada".to_string());
        draft.document_number = Some("AB123456".to_string());
        Document::create(
            "1".to_string(),
            draft,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_create_stamps_both_timestamps() {
        let doc = passport(None);
        assert_eq!(doc.updated_at, Some(doc.created_at));
    }

    #[test]
    fn test_matches_lowercase_fields() {
        let doc = passport(None);
        assert!(doc.matches_lowercase("canada"));
        assert!(doc.matches_lowercase("ab123"));
        assert!(doc.matches_lowercase("pass"));
        assert!(!doc.matches_lowercase("visa"));
    }

    #[test]
    fn test_expires_within_window_bounds() {
        let today = date(2025, 1, 1);
        assert!(!passport(None).expires_within(today, 180));
        assert!(!passport(Some(today)).expires_within(today, 180));
        assert!(!passport(Some(date(2024, 12, 1))).expires_within(today, 180));
        assert!(passport(Some(date(2025, 1, 2))).expires_within(today, 180));
        assert!(passport(Some(today + Duration::days(180))).expires_within(today, 180));
        assert!(!passport(Some(today + Duration::days(181))).expires_within(today, 180));
    }

    #[test]
    fn test_expires_within_out_of_range_window() {
        let today = date(2025, 1, 1);
        let far = passport(Some(date(9999, 12, 31)));
        assert!(far.expires_within(today, i64::MAX));
        let last = passport(Some(NaiveDate::MAX));
        assert!(last.expires_within(NaiveDate::MAX - Duration::days(1), 2));
        assert!(!far.expires_within(today, i64::MIN));
        assert!(!passport(Some(date(2025, 6, 1))).expires_within(today, -5));
    }

    #[test]
    fn test_expiring_soon_includes_expired() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert!(passport(Some(date(2024, 6, 1))).is_expiring_soon(now));
        assert!(passport(Some(date(2025, 3, 1))).is_expiring_soon(now));
        assert!(!passport(Some(date(2026, 3, 1))).is_expiring_soon(now));
        assert!(!passport(None).is_expiring_soon(now));
    }

    #[test]
    fn test_document_type_from_str() {
        assert_eq!("Visa".parse::<DocumentType>(), Ok(DocumentType::Visa));
        assert!("boarding".parse::<DocumentType>().is_err());
    }
}
