//! SQLite-backed record store.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{NewRecord, Record, RecordStore, StoreError, schema};

/// Migrations bundled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Record store persisted in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations if needed.
    ///
    /// Each operation opens its own connection, so `":memory:"` does not
    /// keep data between calls; use a file path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }
}

impl RecordStore for SqliteStore {
    #[instrument(skip(self))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;

        let record: Option<Record> = schema::records::table
            .filter(schema::records::record_key.eq(key))
            .select(Record::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = record.is_some(), "Record read");
        Ok(record.map(|r| r.payload().clone()))
    }

    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        let record = NewRecord::new(key.to_string(), payload.to_string(), Utc::now().naive_utc());
        diesel::replace_into(schema::records::table)
            .values(&record)
            .execute(&mut conn)?;

        debug!("Record written");
        Ok(())
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    fn write_all(&self, records: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, StoreError, _>(|conn| {
            for (key, payload) in records {
                let record = NewRecord::new(key.to_string(), payload.to_string(), now);
                diesel::replace_into(schema::records::table)
                    .values(&record)
                    .execute(conn)?;
            }
            Ok(())
        })?;

        debug!("Records written in one transaction");
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        let removed = diesel::delete(schema::records::table.filter(schema::records::record_key.eq(key)))
            .execute(&mut conn)?;

        info!(removed, "Record cleared");
        Ok(())
    }
}
