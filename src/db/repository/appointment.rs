use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Appointment;

const COLUMNS: &str = "id, appointment_date, title, location";

fn appointment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        appointment_date: row.get(1)?,
        title: row.get(2)?,
        location: row.get(3)?,
    })
}

pub struct NewAppointment {
    pub appointment_date: NaiveDateTime,
    pub title: String,
    pub location: String,
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM appointments WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            appointment_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn find_appointment_by_title(
    conn: &Connection,
    title: &str,
) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM appointments
                 WHERE title = ?1 AND deleted_at IS NULL ORDER BY id LIMIT 1"
            ),
            params![title],
            appointment_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn insert_appointment(
    conn: &Connection,
    new: &NewAppointment,
) -> Result<Appointment, DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (appointment_date, title, location) VALUES (?1, ?2, ?3)",
        params![new.appointment_date, new.title, new.location],
    )?;
    let id = conn.last_insert_rowid();
    get_appointment(conn, id)?.ok_or_else(|| DatabaseError::not_found("Appointment", id))
}

/// Create an appointment and attach it to the patient in one
/// transaction. Replaces any prior link.
pub fn create_appointment_for_woman(
    conn: &mut Connection,
    pregnant_woman_id: i64,
    new: &NewAppointment,
) -> Result<Appointment, DatabaseError> {
    let tx = conn.transaction()?;

    let appointment = insert_appointment(&tx, new)?;
    let changed = tx.execute(
        "UPDATE pregnant_women SET appointment_id = ?1, updated_at = datetime('now')
         WHERE id = ?2 AND deleted_at IS NULL",
        params![appointment.id, pregnant_woman_id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("PregnantWoman", pregnant_woman_id));
    }

    tx.commit()?;
    Ok(appointment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::pregnant_woman::{
        get_pregnant_woman, insert_pregnant_woman, NewPregnantWoman,
    };
    use chrono::NaiveDate;

    fn sample(title: &str) -> NewAppointment {
        NewAppointment {
            appointment_date: NaiveDate::from_ymd_opt(2025, 11, 25)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            title: title.into(),
            location: "ANC clinic".into(),
        }
    }

    #[test]
    fn create_links_patient_to_new_appointment() {
        let mut conn = open_memory_database().unwrap();
        let woman = insert_pregnant_woman(
            &conn,
            &NewPregnantWoman {
                username: "pt5".into(),
                password_hash: "x$y".into(),
                email: String::new(),
                full_name: String::new(),
                phone_number: String::new(),
                age: 0,
            },
        )
        .unwrap();
        assert!(woman.appointment_id.is_none());

        let appointment =
            create_appointment_for_woman(&mut conn, woman.id, &sample("Next checkup")).unwrap();

        let woman = get_pregnant_woman(&conn, woman.id).unwrap().unwrap();
        assert_eq!(woman.appointment_id, Some(appointment.id));
        assert!(find_appointment_by_title(&conn, "Next checkup")
            .unwrap()
            .is_some());
    }

    #[test]
    fn unknown_patient_leaves_no_orphan_row() {
        let mut conn = open_memory_database().unwrap();
        let err = create_appointment_for_woman(&mut conn, 404, &sample("Orphan")).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
        // Rolled back: the appointment insert did not survive
        assert!(find_appointment_by_title(&conn, "Orphan").unwrap().is_none());
    }
}
