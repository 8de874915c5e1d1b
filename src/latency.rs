//! Artificial network latency.
//!
//! Every repository call sleeps for a fixed, per-operation delay before it
//! touches the collection. There is no jitter and no per-call override; the
//! only knob is switching simulation off for the whole store.

use std::time::Duration;

use crate::entities::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
    GetByType,
    Search,
    GetExpiring,
}

const PROVIDER_SEARCH_MS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    enabled: bool,
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

impl Latency {
    pub fn simulated() -> Self {
        Self { enabled: true }
    }

    pub fn none() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Delay applied to `op` on a repository of `kind`.
    pub fn duration(&self, kind: EntityKind, op: Operation) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let ms = match (op, kind) {
            (Operation::GetAll, _) => 300,
            (Operation::GetById, _) => 250,
            // documents simulate a file upload
            (Operation::Create, EntityKind::Document) => 800,
            (Operation::Create, _) => 400,
            (Operation::Update, EntityKind::Document) => 400,
            (Operation::Update, _) => 350,
            (Operation::Delete, _) => 300,
            (Operation::GetByType, _) => 300,
            (Operation::Search, _) => 400,
            (Operation::GetExpiring, _) => 300,
        };
        Duration::from_millis(ms)
    }

    /// Delay of the mock search provider.
    pub fn provider_search(&self) -> Duration {
        if self.enabled {
            Duration::from_millis(PROVIDER_SEARCH_MS)
        } else {
            Duration::ZERO
        }
    }

    pub async fn wait(&self, kind: EntityKind, op: Operation) {
        sleep(self.duration(kind, op)).await;
    }
}

pub(crate) async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
