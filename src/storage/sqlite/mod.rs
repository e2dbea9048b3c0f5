// File: src/storage/sqlite/mod.rs

mod config;
mod convert;
mod feedback;
mod identity;
mod pollination;
mod schema;
mod store;

// Public exports
pub use config::SqliteConfig;
pub use pollination::{freshness_cutoff, FRESHNESS_WINDOW_DAYS};
pub use schema::SCHEMA_VERSION;
pub use store::SqliteStore;
