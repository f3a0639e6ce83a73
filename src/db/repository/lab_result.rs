use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::LabResult;

const COLUMNS: &str = "id, pregnancy_id, test_date, hct, hb, hb_typing, other_remarks, file_path";

fn lab_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LabResult> {
    Ok(LabResult {
        id: row.get(0)?,
        pregnancy_id: row.get(1)?,
        test_date: row.get(2)?,
        hct: row.get(3)?,
        hb: row.get(4)?,
        hb_typing: row.get(5)?,
        other_remarks: row.get(6)?,
        file_path: row.get(7)?,
    })
}

pub struct NewLabResult {
    pub pregnancy_id: i64,
    pub test_date: Option<NaiveDate>,
    pub hct: f64,
    pub hb: f64,
    pub hb_typing: String,
    pub other_remarks: String,
    pub file_path: Option<String>,
}

pub fn insert_lab_result(
    conn: &Connection,
    new: &NewLabResult,
) -> Result<LabResult, DatabaseError> {
    conn.execute(
        "INSERT INTO lab_results (pregnancy_id, test_date, hct, hb, hb_typing, other_remarks,
         file_path)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.pregnancy_id,
            new.test_date,
            new.hct,
            new.hb,
            new.hb_typing,
            new.other_remarks,
            new.file_path,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_lab_result(conn, id)?.ok_or_else(|| DatabaseError::not_found("LabResult", id))
}

pub fn get_lab_result(conn: &Connection, id: i64) -> Result<Option<LabResult>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM lab_results WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            lab_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn list_lab_results_by_pregnancy(
    conn: &Connection,
    pregnancy_id: i64,
) -> Result<Vec<LabResult>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM lab_results
         WHERE pregnancy_id = ?1 AND deleted_at IS NULL ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![pregnancy_id], lab_from_row)?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::pregnancy::{create_pregnancy, NewPregnancy};
    use crate::db::repository::pregnant_woman::{insert_pregnant_woman, NewPregnantWoman};

    fn seeded_pregnancy(conn: &Connection) -> i64 {
        let woman = insert_pregnant_woman(
            conn,
            &NewPregnantWoman {
                username: "pt1".into(),
                password_hash: "x$y".into(),
                email: String::new(),
                full_name: String::new(),
                phone_number: String::new(),
                age: 30,
            },
        )
        .unwrap();
        create_pregnancy(
            conn,
            &NewPregnancy {
                pregnant_woman_id: woman.id,
                pregnancy_no: 1,
                lmp: None,
                edc: None,
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn insert_records_file_path() {
        let conn = open_memory_database().unwrap();
        seeded_pregnancy(&conn);
        let lab = insert_lab_result(
            &conn,
            &NewLabResult {
                pregnancy_id: 1,
                test_date: NaiveDate::from_ymd_opt(2025, 3, 10),
                hct: 36.5,
                hb: 12.1,
                hb_typing: "A2A".into(),
                other_remarks: String::new(),
                file_path: Some("uploads/lab_results/1700000000_cbc.pdf".into()),
            },
        )
        .unwrap();

        assert_eq!(lab.hct, 36.5);
        assert_eq!(
            lab.file_path.as_deref(),
            Some("uploads/lab_results/1700000000_cbc.pdf")
        );

        let listed = list_lab_results_by_pregnancy(&conn, 1).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(list_lab_results_by_pregnancy(&conn, 2).unwrap().is_empty());
    }
}
