pub mod auth;
pub mod bmr;
pub mod edit_distance;
pub mod food;
pub mod matcher;
pub mod responder;
pub mod symptom_checker;
pub mod tokenizer;

pub use crate::domain::model::{Advice, CatalogEntry, TokenSequence};
pub use crate::domain::ports::{CatalogStore, ConfigProvider, Storage};
pub use crate::utils::error::Result;
