use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::repository::{upsert_by_key, UpsertOutcome};
use crate::db::DatabaseError;
use crate::models::{FetalKickCount, NewFetalKickCount};

const COLUMNS: &str =
    "id, pregnancy_id, count_date, kick_count_morning, kick_count_lunch, kick_count_evening";

fn kick_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FetalKickCount> {
    Ok(FetalKickCount {
        id: row.get(0)?,
        pregnancy_id: row.get(1)?,
        count_date: row.get(2)?,
        kick_count_morning: row.get(3)?,
        kick_count_lunch: row.get(4)?,
        kick_count_evening: row.get(5)?,
    })
}

pub fn get_fetal_kick_count(
    conn: &Connection,
    id: i64,
) -> Result<Option<FetalKickCount>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM fetal_kick_counts WHERE id = ?1 AND deleted_at IS NULL"
            ),
            params![id],
            kick_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn find_kick_count_by_pregnancy_and_date(
    conn: &Connection,
    pregnancy_id: i64,
    count_date: NaiveDate,
) -> Result<Option<FetalKickCount>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM fetal_kick_counts
                 WHERE pregnancy_id = ?1 AND count_date = ?2 AND deleted_at IS NULL
                 ORDER BY id LIMIT 1"
            ),
            params![pregnancy_id, count_date],
            kick_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn list_kick_counts_by_pregnancy(
    conn: &Connection,
    pregnancy_id: i64,
) -> Result<Vec<FetalKickCount>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM fetal_kick_counts
         WHERE pregnancy_id = ?1 AND deleted_at IS NULL ORDER BY count_date ASC, id"
    ))?;
    let rows = stmt.query_map(params![pregnancy_id], kick_from_row)?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

pub fn insert_fetal_kick_count(
    conn: &Connection,
    new: &NewFetalKickCount,
) -> Result<FetalKickCount, DatabaseError> {
    conn.execute(
        "INSERT INTO fetal_kick_counts (pregnancy_id, count_date, kick_count_morning,
         kick_count_lunch, kick_count_evening)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new.pregnancy_id,
            new.count_date,
            new.kick_count_morning,
            new.kick_count_lunch,
            new.kick_count_evening,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_fetal_kick_count(conn, id)?.ok_or_else(|| DatabaseError::not_found("FetalKickCount", id))
}

pub fn update_fetal_kick_count(
    conn: &Connection,
    id: i64,
    new: &NewFetalKickCount,
) -> Result<FetalKickCount, DatabaseError> {
    let changed = conn.execute(
        "UPDATE fetal_kick_counts SET kick_count_morning = ?1, kick_count_lunch = ?2,
         kick_count_evening = ?3, updated_at = datetime('now')
         WHERE id = ?4 AND deleted_at IS NULL",
        params![
            new.kick_count_morning,
            new.kick_count_lunch,
            new.kick_count_evening,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("FetalKickCount", id));
    }
    get_fetal_kick_count(conn, id)?.ok_or_else(|| DatabaseError::not_found("FetalKickCount", id))
}

/// Upsert keyed on the (pregnancy, calendar day) pair.
pub fn upsert_fetal_kick_count(
    conn: &Connection,
    new: &NewFetalKickCount,
) -> Result<UpsertOutcome<FetalKickCount>, DatabaseError> {
    upsert_by_key(
        conn,
        |c| find_kick_count_by_pregnancy_and_date(c, new.pregnancy_id, new.count_date),
        |c, existing| update_fetal_kick_count(c, existing.id, new),
        |c| insert_fetal_kick_count(c, new),
    )
}
