use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{merge, Entity, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub home_city: Option<String>,
    pub preferred_currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub home_city: Option<String>,
    pub preferred_currency: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub home_city: Option<Option<String>>,
    pub preferred_currency: Option<String>,
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    type Draft = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.user_id
    }

    fn create(id: String, draft: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            user_id: id,
            name: draft.name,
            email: draft.email,
            home_city: draft.home_city,
            preferred_currency: draft.preferred_currency,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.home_city, patch.home_city);
        merge(&mut self.preferred_currency, patch.preferred_currency);
        self.updated_at = Some(now);
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
