//! One repository module per entity; raw SQL over rusqlite.
//!
//! Create-or-update by natural key is factored into `upsert_by_key` so
//! the find/update/insert flow is written once, not per entity.

pub mod antenatal_visit;
pub mod appointment;
pub mod doctor;
pub mod fetal_kick_count;
pub mod husband;
pub mod lab_result;
pub mod medical_history;
pub mod pregnancy;
pub mod pregnant_woman;
pub mod previous_pregnancy;
pub mod vaccination;
pub mod vaccine_type;

pub use antenatal_visit::*;
pub use appointment::*;
pub use doctor::*;
pub use fetal_kick_count::*;
pub use husband::*;
pub use lab_result::*;
pub use medical_history::*;
pub use pregnancy::*;
pub use pregnant_woman::*;
pub use previous_pregnancy::*;
pub use vaccination::*;
pub use vaccine_type::*;

use rusqlite::Connection;

use super::DatabaseError;

/// Outcome of an upsert, so callers can pick status code and message.
#[derive(Debug)]
pub enum UpsertOutcome<T> {
    Created(T),
    Updated(T),
}

impl<T> UpsertOutcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Created(v) | Self::Updated(v) => v,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Update-if-exists-else-insert, keyed by a business key the `find`
/// closure encodes.
pub fn upsert_by_key<T, F, U, I>(
    conn: &Connection,
    find: F,
    update: U,
    insert: I,
) -> Result<UpsertOutcome<T>, DatabaseError>
where
    F: FnOnce(&Connection) -> Result<Option<T>, DatabaseError>,
    U: FnOnce(&Connection, T) -> Result<T, DatabaseError>,
    I: FnOnce(&Connection) -> Result<T, DatabaseError>,
{
    match find(conn)? {
        Some(existing) => Ok(UpsertOutcome::Updated(update(conn, existing)?)),
        None => Ok(UpsertOutcome::Created(insert(conn)?)),
    }
}
