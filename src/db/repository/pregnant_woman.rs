use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::PregnantWoman;

const COLUMNS: &str = "id, username, email, full_name, phone_number, age, birth_date, \
                       citizen_id, husband_id, appointment_id";

fn woman_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PregnantWoman> {
    Ok(PregnantWoman {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        full_name: row.get(3)?,
        phone_number: row.get(4)?,
        age: row.get(5)?,
        birth_date: row.get(6)?,
        citizen_id: row.get(7)?,
        husband_id: row.get(8)?,
        appointment_id: row.get(9)?,
    })
}

pub struct NewPregnantWoman {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub age: i64,
}

/// Profile fields a patient may edit herself. When `birth_date` is
/// present, age is recomputed from it.
pub struct PersonalUpdate {
    pub full_name: String,
    pub citizen_id: String,
    pub phone_number: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
}

pub fn insert_pregnant_woman(
    conn: &Connection,
    new: &NewPregnantWoman,
) -> Result<PregnantWoman, DatabaseError> {
    conn.execute(
        "INSERT INTO pregnant_women (username, password_hash, email, full_name, phone_number, age)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.username,
            new.password_hash,
            new.email,
            new.full_name,
            new.phone_number,
            new.age,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_pregnant_woman(conn, id)?.ok_or_else(|| DatabaseError::not_found("PregnantWoman", id))
}

pub fn get_pregnant_woman(
    conn: &Connection,
    id: i64,
) -> Result<Option<PregnantWoman>, DatabaseError> {
    let woman = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM pregnant_women WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            woman_from_row,
        )
        .optional()?;
    Ok(woman)
}

/// Look up a patient with her password hash, for login.
pub fn find_woman_credentials(
    conn: &Connection,
    username: &str,
) -> Result<Option<(PregnantWoman, String)>, DatabaseError> {
    let found = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS}, password_hash FROM pregnant_women
                 WHERE username = ?1 AND deleted_at IS NULL"
            ),
            params![username],
            |row| Ok((woman_from_row(row)?, row.get::<_, String>(10)?)),
        )
        .optional()?;
    Ok(found)
}

pub fn list_pregnant_women(conn: &Connection) -> Result<Vec<PregnantWoman>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM pregnant_women WHERE deleted_at IS NULL ORDER BY id"
    ))?;
    let rows = stmt.query_map([], woman_from_row)?;

    let mut women = Vec::new();
    for row in rows {
        women.push(row?);
    }
    Ok(women)
}

/// Apply a self-service profile edit; recomputes age when a birth date
/// is supplied.
pub fn update_personal(
    conn: &Connection,
    id: i64,
    update: &PersonalUpdate,
) -> Result<PregnantWoman, DatabaseError> {
    let changed = match update.birth_date {
        Some(birth) => {
            let age = derive_age(birth, Utc::now().date_naive());
            conn.execute(
                "UPDATE pregnant_women
                 SET full_name = ?1, citizen_id = ?2, phone_number = ?3, email = ?4,
                     birth_date = ?5, age = ?6, updated_at = datetime('now')
                 WHERE id = ?7 AND deleted_at IS NULL",
                params![
                    update.full_name,
                    update.citizen_id,
                    update.phone_number,
                    update.email,
                    birth,
                    age,
                    id,
                ],
            )?
        }
        None => conn.execute(
            "UPDATE pregnant_women
             SET full_name = ?1, citizen_id = ?2, phone_number = ?3, email = ?4,
                 updated_at = datetime('now')
             WHERE id = ?5 AND deleted_at IS NULL",
            params![
                update.full_name,
                update.citizen_id,
                update.phone_number,
                update.email,
                id,
            ],
        )?,
    };
    if changed == 0 {
        return Err(DatabaseError::not_found("PregnantWoman", id));
    }
    get_pregnant_woman(conn, id)?.ok_or_else(|| DatabaseError::not_found("PregnantWoman", id))
}

/// Age in whole years: year difference, minus one when today's day of
/// year precedes the birth day of year.
pub fn derive_age(birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year()) - i64::from(birth.year());
    if today.ordinal() < birth.ordinal() {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn sample_woman() -> NewPregnantWoman {
        NewPregnantWoman {
            username: "amara".into(),
            password_hash: "x$y".into(),
            email: "amara@example.com".into(),
            full_name: "Amara A".into(),
            phone_number: "0801112222".into(),
            age: 28,
        }
    }

    #[test]
    fn insert_and_get() {
        let conn = open_memory_database().unwrap();
        let woman = insert_pregnant_woman(&conn, &sample_woman()).unwrap();
        assert_eq!(woman.username, "amara");
        assert_eq!(woman.age, 28);
        assert!(woman.husband_id.is_none());

        let fetched = get_pregnant_woman(&conn, woman.id).unwrap().unwrap();
        assert_eq!(fetched.id, woman.id);
    }

    #[test]
    fn credentials_include_hash() {
        let conn = open_memory_database().unwrap();
        insert_pregnant_woman(&conn, &sample_woman()).unwrap();

        let (woman, hash) = find_woman_credentials(&conn, "amara").unwrap().unwrap();
        assert_eq!(woman.username, "amara");
        assert_eq!(hash, "x$y");
    }

    #[test]
    fn update_personal_recomputes_age() {
        let conn = open_memory_database().unwrap();
        let woman = insert_pregnant_woman(&conn, &sample_woman()).unwrap();

        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let updated = update_personal(
            &conn,
            woman.id,
            &PersonalUpdate {
                full_name: "Amara B".into(),
                citizen_id: "1234567890123".into(),
                phone_number: "0803334444".into(),
                email: "b@example.com".into(),
                birth_date: Some(birth),
            },
        )
        .unwrap();

        assert_eq!(updated.full_name, "Amara B");
        assert_eq!(updated.birth_date, Some(birth));
        assert_eq!(updated.age, derive_age(birth, Utc::now().date_naive()));
    }

    #[test]
    fn update_personal_unknown_id_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = update_personal(
            &conn,
            999,
            &PersonalUpdate {
                full_name: String::new(),
                citizen_id: String::new(),
                phone_number: String::new(),
                email: String::new(),
                birth_date: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn derive_age_before_birthday() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        assert_eq!(derive_age(birth, today), 34);
    }

    #[test]
    fn derive_age_on_birthday() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(derive_age(birth, today), 35);
    }

    #[test]
    fn derive_age_after_birthday() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(derive_age(birth, today), 35);
    }
}
