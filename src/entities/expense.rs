use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{merge, Entity, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub expense_id: String,
    pub trip_id: Option<String>,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub trip_id: Option<String>,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub trip_id: Option<Option<String>>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub date: Option<NaiveDate>,
}

impl Entity for Expense {
    const KIND: EntityKind = EntityKind::Expense;

    type Draft = NewExpense;
    type Patch = ExpensePatch;

    fn id(&self) -> &str {
        &self.expense_id
    }

    fn create(id: String, draft: NewExpense, now: DateTime<Utc>) -> Self {
        Self {
            expense_id: id,
            trip_id: draft.trip_id,
            category: draft.category,
            description: draft.description,
            amount: draft.amount,
            currency: draft.currency,
            date: draft.date,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, patch: ExpensePatch, now: DateTime<Utc>) {
        merge(&mut self.trip_id, patch.trip_id);
        merge(&mut self.category, patch.category);
        merge(&mut self.description, patch.description);
        merge(&mut self.amount, patch.amount);
        merge(&mut self.currency, patch.currency);
        merge(&mut self.date, patch.date);
        self.updated_at = Some(now);
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
