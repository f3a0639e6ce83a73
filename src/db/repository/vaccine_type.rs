use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::VaccineType;

fn type_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<VaccineType> {
    Ok(VaccineType {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn insert_vaccine_type(conn: &Connection, name: &str) -> Result<VaccineType, DatabaseError> {
    conn.execute(
        "INSERT INTO vaccine_types (name) VALUES (?1)",
        params![name],
    )?;
    let id = conn.last_insert_rowid();
    Ok(VaccineType {
        id,
        name: name.to_string(),
    })
}

pub fn find_vaccine_type_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<VaccineType>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name FROM vaccine_types WHERE name = ?1 AND deleted_at IS NULL",
            params![name],
            type_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn list_vaccine_types(conn: &Connection) -> Result<Vec<VaccineType>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, name FROM vaccine_types WHERE deleted_at IS NULL ORDER BY id")?;
    let rows = stmt.query_map([], type_from_row)?;

    let mut types = Vec::new();
    for row in rows {
        types.push(row?);
    }
    Ok(types)
}
