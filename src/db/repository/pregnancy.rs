use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::repository::previous_pregnancy::{
    insert_previous_pregnancy, NewPreviousPregnancy,
};
use crate::db::DatabaseError;
use crate::models::enums::PregnancyStatus;
use crate::models::{DeliveryOutcome, Pregnancy, PreviousPregnancy};

const COLUMNS: &str = "id, pregnant_woman_id, pregnancy_no, lmp, edc, status";

// Two-stage mapping: raw row first, then enum parsing with a
// DatabaseError (rusqlite closures can only fail with rusqlite errors).
struct PregnancyRow {
    id: i64,
    pregnant_woman_id: i64,
    pregnancy_no: i64,
    lmp: Option<NaiveDate>,
    edc: Option<NaiveDate>,
    status: String,
}

fn row_from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<PregnancyRow> {
    Ok(PregnancyRow {
        id: row.get(0)?,
        pregnant_woman_id: row.get(1)?,
        pregnancy_no: row.get(2)?,
        lmp: row.get(3)?,
        edc: row.get(4)?,
        status: row.get(5)?,
    })
}

fn pregnancy_from_row(row: PregnancyRow) -> Result<Pregnancy, DatabaseError> {
    Ok(Pregnancy {
        id: row.id,
        pregnant_woman_id: row.pregnant_woman_id,
        pregnancy_no: row.pregnancy_no,
        lmp: row.lmp,
        edc: row.edc,
        status: PregnancyStatus::from_str(&row.status)?,
    })
}

pub struct NewPregnancy {
    pub pregnant_woman_id: i64,
    pub pregnancy_no: i64,
    pub lmp: Option<NaiveDate>,
    pub edc: Option<NaiveDate>,
}

/// EDC convention: LMP + 280 days.
pub fn expected_delivery_date(lmp: NaiveDate) -> NaiveDate {
    lmp + Duration::days(280)
}

/// Create a pregnancy with status `Active`. EDC defaults to LMP + 280
/// days when not supplied. Callers check the one-Active-per-patient
/// invariant with `find_active_pregnancy` first.
pub fn create_pregnancy(
    conn: &Connection,
    new: &NewPregnancy,
) -> Result<Pregnancy, DatabaseError> {
    let edc = new.edc.or_else(|| new.lmp.map(expected_delivery_date));

    conn.execute(
        "INSERT INTO pregnancies (pregnant_woman_id, pregnancy_no, lmp, edc, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new.pregnant_woman_id,
            new.pregnancy_no,
            new.lmp,
            edc,
            PregnancyStatus::Active.as_str(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_pregnancy(conn, id)?.ok_or_else(|| DatabaseError::not_found("Pregnancy", id))
}

pub fn get_pregnancy(conn: &Connection, id: i64) -> Result<Option<Pregnancy>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM pregnancies WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            row_from_sql,
        )
        .optional()?;
    row.map(pregnancy_from_row).transpose()
}

/// The Active pregnancy for a patient, if any.
pub fn find_active_pregnancy(
    conn: &Connection,
    pregnant_woman_id: i64,
) -> Result<Option<Pregnancy>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM pregnancies
                 WHERE pregnant_woman_id = ?1 AND status = ?2 AND deleted_at IS NULL
                 LIMIT 1"
            ),
            params![pregnant_woman_id, PregnancyStatus::Active.as_str()],
            row_from_sql,
        )
        .optional()?;
    row.map(pregnancy_from_row).transpose()
}

pub fn list_pregnancies_by_woman(
    conn: &Connection,
    pregnant_woman_id: i64,
) -> Result<Vec<Pregnancy>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM pregnancies
         WHERE pregnant_woman_id = ?1 AND deleted_at IS NULL ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![pregnant_woman_id], row_from_sql)?;

    let mut pregnancies = Vec::new();
    for row in rows {
        pregnancies.push(pregnancy_from_row(row?)?);
    }
    Ok(pregnancies)
}

/// Most recently created pregnancy for a patient.
pub fn latest_pregnancy(
    conn: &Connection,
    pregnant_woman_id: i64,
) -> Result<Option<Pregnancy>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM pregnancies
                 WHERE pregnant_woman_id = ?1 AND deleted_at IS NULL
                 ORDER BY id DESC LIMIT 1"
            ),
            params![pregnant_woman_id],
            row_from_sql,
        )
        .optional()?;
    row.map(pregnancy_from_row).transpose()
}

/// End an Active pregnancy: flip its status to Ended and record the
/// delivery outcome as a PreviousPregnancy row, both inside one
/// transaction. Fails with NotFound for an unknown id and
/// ConstraintViolation when the pregnancy is not Active.
pub fn end_pregnancy(
    conn: &mut Connection,
    id: i64,
    outcome: &DeliveryOutcome,
) -> Result<PreviousPregnancy, DatabaseError> {
    let pregnancy =
        get_pregnancy(conn, id)?.ok_or_else(|| DatabaseError::not_found("Pregnancy", id))?;

    if pregnancy.status != PregnancyStatus::Active {
        return Err(DatabaseError::ConstraintViolation(
            "Pregnancy is not active".into(),
        ));
    }

    let tx = conn.transaction()?;
    tx.execute(
        "UPDATE pregnancies SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![PregnancyStatus::Ended.as_str(), id],
    )?;
    let previous = insert_previous_pregnancy(
        &tx,
        &NewPreviousPregnancy {
            pregnant_woman_id: pregnancy.pregnant_woman_id,
            pregnancy_no: pregnancy.pregnancy_no,
            outcome: outcome.clone(),
        },
    )?;
    tx.commit()?;

    Ok(previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::pregnant_woman::{insert_pregnant_woman, NewPregnantWoman};
    use crate::db::repository::previous_pregnancy::list_previous_pregnancies_by_woman;

    fn seeded_woman(conn: &Connection) -> i64 {
        insert_pregnant_woman(
            conn,
            &NewPregnantWoman {
                username: "pt1".into(),
                password_hash: "x$y".into(),
                email: String::new(),
                full_name: "Patient One".into(),
                phone_number: String::new(),
                age: 30,
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn edc_defaults_to_lmp_plus_280_days() {
        let conn = open_memory_database().unwrap();
        let woman_id = seeded_woman(&conn);

        let lmp = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let pregnancy = create_pregnancy(
            &conn,
            &NewPregnancy {
                pregnant_woman_id: woman_id,
                pregnancy_no: 1,
                lmp: Some(lmp),
                edc: None,
            },
        )
        .unwrap();

        assert_eq!(pregnancy.status, PregnancyStatus::Active);
        assert_eq!(pregnancy.edc, NaiveDate::from_ymd_opt(2025, 10, 8));
    }

    #[test]
    fn explicit_edc_is_kept() {
        let conn = open_memory_database().unwrap();
        let woman_id = seeded_woman(&conn);

        let edc = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        let pregnancy = create_pregnancy(
            &conn,
            &NewPregnancy {
                pregnant_woman_id: woman_id,
                pregnancy_no: 1,
                lmp: NaiveDate::from_ymd_opt(2025, 1, 1),
                edc: Some(edc),
            },
        )
        .unwrap();

        assert_eq!(pregnancy.edc, Some(edc));
    }

    #[test]
    fn active_pregnancy_lookup() {
        let conn = open_memory_database().unwrap();
        let woman_id = seeded_woman(&conn);
        assert!(find_active_pregnancy(&conn, woman_id).unwrap().is_none());

        create_pregnancy(
            &conn,
            &NewPregnancy {
                pregnant_woman_id: woman_id,
                pregnancy_no: 1,
                lmp: None,
                edc: None,
            },
        )
        .unwrap();

        assert!(find_active_pregnancy(&conn, woman_id).unwrap().is_some());
    }

    #[test]
    fn end_pregnancy_flips_status_and_records_outcome() {
        let mut conn = open_memory_database().unwrap();
        let woman_id = seeded_woman(&conn);
        let pregnancy = create_pregnancy(
            &conn,
            &NewPregnancy {
                pregnant_woman_id: woman_id,
                pregnancy_no: 2,
                lmp: None,
                edc: None,
            },
        )
        .unwrap();

        let outcome = DeliveryOutcome {
            delivery_date: NaiveDate::from_ymd_opt(2025, 10, 1),
            gestational_age: 39,
            delivery_method: "Normal".into(),
            birth_weight: 3.2,
            sex: "Female".into(),
            delivery_place: "General Hospital".into(),
            complications: String::new(),
            child_status: "Healthy".into(),
        };
        let previous = end_pregnancy(&mut conn, pregnancy.id, &outcome).unwrap();

        assert_eq!(previous.pregnancy_no, 2);
        assert_eq!(previous.pregnant_woman_id, woman_id);

        let ended = get_pregnancy(&conn, pregnancy.id).unwrap().unwrap();
        assert_eq!(ended.status, PregnancyStatus::Ended);

        let history = list_previous_pregnancies_by_woman(&conn, woman_id).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn end_pregnancy_twice_is_rejected() {
        let mut conn = open_memory_database().unwrap();
        let woman_id = seeded_woman(&conn);
        let pregnancy = create_pregnancy(
            &conn,
            &NewPregnancy {
                pregnant_woman_id: woman_id,
                pregnancy_no: 1,
                lmp: None,
                edc: None,
            },
        )
        .unwrap();

        end_pregnancy(&mut conn, pregnancy.id, &DeliveryOutcome::default()).unwrap();
        let err = end_pregnancy(&mut conn, pregnancy.id, &DeliveryOutcome::default()).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));

        // Exactly one outcome row despite the second attempt
        let history = list_previous_pregnancies_by_woman(&conn, woman_id).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn end_unknown_pregnancy_is_not_found() {
        let mut conn = open_memory_database().unwrap();
        let err = end_pregnancy(&mut conn, 999, &DeliveryOutcome::default()).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
