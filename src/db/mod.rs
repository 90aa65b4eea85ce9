//! Persistence layer for the client's daily session and statistics.

mod error;
mod models;
mod records;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod store;

pub use error::StoreError;
pub use models::{NewRecord, Record};
pub use records::{
    SCHEMA_VERSION, SESSION_KEY, STATS_KEY, SessionRecord, checked_statistics, decode, encode,
};
pub use repository::{MIGRATIONS, SqliteStore};
pub use store::{MemoryStore, RecordStore};
