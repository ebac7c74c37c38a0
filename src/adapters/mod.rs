// Adapters layer: concrete implementations for external systems (storage, catalog, ledger, http)

pub mod catalog;
pub mod ledger;
pub mod nutrition;
pub mod storage;
