use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Doctor;

const COLUMNS: &str = "id, username, email, full_name, phone_number";

fn doctor_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        full_name: row.get(3)?,
        phone_number: row.get(4)?,
    })
}

pub struct NewDoctor {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
}

pub fn insert_doctor(conn: &Connection, new: &NewDoctor) -> Result<Doctor, DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (username, password_hash, email, full_name, phone_number)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new.username,
            new.password_hash,
            new.email,
            new.full_name,
            new.phone_number,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_doctor(conn, id)?.ok_or_else(|| DatabaseError::not_found("Doctor", id))
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Option<Doctor>, DatabaseError> {
    let doctor = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM doctors WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            doctor_from_row,
        )
        .optional()?;
    Ok(doctor)
}

/// Look up a doctor with the password hash, for login.
pub fn find_doctor_credentials(
    conn: &Connection,
    username: &str,
) -> Result<Option<(Doctor, String)>, DatabaseError> {
    let found = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS}, password_hash FROM doctors
                 WHERE username = ?1 AND deleted_at IS NULL"
            ),
            params![username],
            |row| Ok((doctor_from_row(row)?, row.get::<_, String>(5)?)),
        )
        .optional()?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn insert_and_find_credentials() {
        let conn = open_memory_database().unwrap();
        let doctor = insert_doctor(
            &conn,
            &NewDoctor {
                username: "drsmith".into(),
                password_hash: "s$h".into(),
                email: "smith@example.com".into(),
                full_name: "Dr Smith".into(),
                phone_number: "0655765587".into(),
            },
        )
        .unwrap();

        let (found, hash) = find_doctor_credentials(&conn, "drsmith").unwrap().unwrap();
        assert_eq!(found.id, doctor.id);
        assert_eq!(hash, "s$h");
        assert!(find_doctor_credentials(&conn, "nobody").unwrap().is_none());
    }
}
