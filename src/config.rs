//! Settings loaded from the environment (and a `.env` file, if present).
//!
//! Variables:
//! - `WANDERLY_SIMULATE_LATENCY` -- sleep before every repository call (default `true`)
//! - `WANDERLY_ID_STRATEGY` -- `sequential` or `uuid` (default `sequential`)
//! - `WANDERLY_FIXTURES_DIR` -- directory of fixture CSVs (embedded fixtures when unset)

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::fixtures::Fixtures;
use crate::ids::UuidIds;
use crate::latency::Latency;
use crate::stores::Store;
use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    #[default]
    Sequential,
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(IdStrategy::Sequential),
            "uuid" => Ok(IdStrategy::Uuid),
            other => Err(Error::Config(format!(
                "invalid WANDERLY_ID_STRATEGY '{other}', expected 'sequential' or 'uuid'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub simulate_latency: bool,
    pub id_strategy: IdStrategy,
    pub fixtures_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            id_strategy: IdStrategy::Sequential,
            fixtures_dir: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup("WANDERLY_SIMULATE_LATENCY") {
            settings.simulate_latency = raw.trim().parse().map_err(|e| {
                Error::Config(format!("invalid WANDERLY_SIMULATE_LATENCY '{raw}': {e}"))
            })?;
        }
        if let Some(raw) = lookup("WANDERLY_ID_STRATEGY") {
            settings.id_strategy = raw.parse()?;
        }
        settings.fixtures_dir = lookup("WANDERLY_FIXTURES_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(settings)
    }

    pub fn latency(&self) -> Latency {
        if self.simulate_latency {
            Latency::simulated()
        } else {
            Latency::none()
        }
    }

    /// Loads fixtures and assembles a store as configured.
    pub async fn build_store(&self) -> Result<Store, Error> {
        let fixtures = match &self.fixtures_dir {
            Some(dir) => Fixtures::load_dir(dir).await?,
            None => Fixtures::embedded()?,
        };
        let mut builder = Store::builder().fixtures(fixtures).latency(self.latency());
        if self.id_strategy == IdStrategy::Uuid {
            builder = builder.ids(Arc::new(UuidIds));
        }
        Ok(builder.build())
    }
}
