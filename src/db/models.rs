//! Database models for the key/value record table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// A stored record.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::records)]
pub struct Record {
    record_key: String,
    payload: String,
    updated_at: NaiveDateTime,
}

/// Insertable record; replaces any existing row with the same key.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::records)]
pub struct NewRecord {
    record_key: String,
    payload: String,
    updated_at: NaiveDateTime,
}
