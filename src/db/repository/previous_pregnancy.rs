use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{DeliveryOutcome, PreviousPregnancy};

const COLUMNS: &str = "id, pregnant_woman_id, pregnancy_no, delivery_date, gestational_age, \
                       delivery_method, birth_weight, sex, delivery_place, complications, \
                       child_status";

fn previous_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PreviousPregnancy> {
    Ok(PreviousPregnancy {
        id: row.get(0)?,
        pregnant_woman_id: row.get(1)?,
        pregnancy_no: row.get(2)?,
        delivery_date: row.get(3)?,
        gestational_age: row.get(4)?,
        delivery_method: row.get(5)?,
        birth_weight: row.get(6)?,
        sex: row.get(7)?,
        delivery_place: row.get(8)?,
        complications: row.get(9)?,
        child_status: row.get(10)?,
    })
}

pub struct NewPreviousPregnancy {
    pub pregnant_woman_id: i64,
    pub pregnancy_no: i64,
    pub outcome: DeliveryOutcome,
}

pub fn insert_previous_pregnancy(
    conn: &Connection,
    new: &NewPreviousPregnancy,
) -> Result<PreviousPregnancy, DatabaseError> {
    conn.execute(
        "INSERT INTO previous_pregnancies (pregnant_woman_id, pregnancy_no, delivery_date,
         gestational_age, delivery_method, birth_weight, sex, delivery_place, complications,
         child_status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            new.pregnant_woman_id,
            new.pregnancy_no,
            new.outcome.delivery_date,
            new.outcome.gestational_age,
            new.outcome.delivery_method,
            new.outcome.birth_weight,
            new.outcome.sex,
            new.outcome.delivery_place,
            new.outcome.complications,
            new.outcome.child_status,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_previous_pregnancy(conn, id)?
        .ok_or_else(|| DatabaseError::not_found("PreviousPregnancy", id))
}

pub fn get_previous_pregnancy(
    conn: &Connection,
    id: i64,
) -> Result<Option<PreviousPregnancy>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM previous_pregnancies
                 WHERE id = ?1 AND deleted_at IS NULL"
            ),
            params![id],
            previous_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn list_previous_pregnancies_by_woman(
    conn: &Connection,
    pregnant_woman_id: i64,
) -> Result<Vec<PreviousPregnancy>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM previous_pregnancies
         WHERE pregnant_woman_id = ?1 AND deleted_at IS NULL
         ORDER BY pregnancy_no, id"
    ))?;
    let rows = stmt.query_map(params![pregnant_woman_id], previous_from_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::pregnant_woman::{insert_pregnant_woman, NewPregnantWoman};
    use chrono::NaiveDate;

    #[test]
    fn insert_and_list_ordered_by_pregnancy_no() {
        let conn = open_memory_database().unwrap();
        let woman = insert_pregnant_woman(
            &conn,
            &NewPregnantWoman {
                username: "pt2".into(),
                password_hash: "x$y".into(),
                email: String::new(),
                full_name: String::new(),
                phone_number: String::new(),
                age: 0,
            },
        )
        .unwrap();

        for no in [2, 1] {
            insert_previous_pregnancy(
                &conn,
                &NewPreviousPregnancy {
                    pregnant_woman_id: woman.id,
                    pregnancy_no: no,
                    outcome: DeliveryOutcome {
                        delivery_date: NaiveDate::from_ymd_opt(2020 + no as i32, 1, 1),
                        ..Default::default()
                    },
                },
            )
            .unwrap();
        }

        let records = list_previous_pregnancies_by_woman(&conn, woman.id).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pregnancy_no, 1);
        assert_eq!(records[1].pregnancy_no, 2);
    }
}
