use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{AntenatalVisit, NewAntenatalVisit};

const COLUMNS: &str = "id, pregnancy_id, visit_date, gestational_age, weight, blood_pressure, \
                       fetal_heart_rate, notes";

fn visit_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AntenatalVisit> {
    Ok(AntenatalVisit {
        id: row.get(0)?,
        pregnancy_id: row.get(1)?,
        visit_date: row.get(2)?,
        gestational_age: row.get(3)?,
        weight: row.get(4)?,
        blood_pressure: row.get(5)?,
        fetal_heart_rate: row.get(6)?,
        notes: row.get(7)?,
    })
}

pub fn insert_antenatal_visit(
    conn: &Connection,
    new: &NewAntenatalVisit,
) -> Result<AntenatalVisit, DatabaseError> {
    conn.execute(
        "INSERT INTO antenatal_visits (pregnancy_id, visit_date, gestational_age, weight,
         blood_pressure, fetal_heart_rate, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.pregnancy_id,
            new.visit_date,
            new.gestational_age,
            new.weight,
            new.blood_pressure,
            new.fetal_heart_rate,
            new.notes,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_antenatal_visit(conn, id)?.ok_or_else(|| DatabaseError::not_found("AntenatalVisit", id))
}

pub fn get_antenatal_visit(
    conn: &Connection,
    id: i64,
) -> Result<Option<AntenatalVisit>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM antenatal_visits WHERE id = ?1 AND deleted_at IS NULL"
            ),
            params![id],
            visit_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn list_antenatal_visits_by_pregnancy(
    conn: &Connection,
    pregnancy_id: i64,
) -> Result<Vec<AntenatalVisit>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM antenatal_visits
         WHERE pregnancy_id = ?1 AND deleted_at IS NULL ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![pregnancy_id], visit_from_row)?;

    let mut visits = Vec::new();
    for row in rows {
        visits.push(row?);
    }
    Ok(visits)
}
