pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::catalog::{FileCatalog, InMemoryCatalog};
pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use config::toml_config::ServerConfig;
pub use core::symptom_checker::{check_symptoms_against, SymptomChecker};
pub use domain::model::{Advice, CatalogEntry, FALLBACK_ADVICE};
pub use utils::error::{HealthError, Result};
