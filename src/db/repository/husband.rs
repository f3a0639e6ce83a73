use rusqlite::{params, Connection, OptionalExtension};

use crate::db::repository::UpsertOutcome;
use crate::db::DatabaseError;
use crate::models::{Husband, HusbandFields};

const COLUMNS: &str = "id, full_name, age, citizen_id, phone_number, email";

fn husband_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Husband> {
    Ok(Husband {
        id: row.get(0)?,
        fields: HusbandFields {
            full_name: row.get(1)?,
            age: row.get(2)?,
            citizen_id: row.get(3)?,
            phone_number: row.get(4)?,
            email: row.get(5)?,
        },
    })
}

pub fn get_husband(conn: &Connection, id: i64) -> Result<Option<Husband>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM husbands WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            husband_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn insert_husband(conn: &Connection, fields: &HusbandFields) -> Result<Husband, DatabaseError> {
    conn.execute(
        "INSERT INTO husbands (full_name, age, citizen_id, phone_number, email)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fields.full_name,
            fields.age,
            fields.citizen_id,
            fields.phone_number,
            fields.email,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_husband(conn, id)?.ok_or_else(|| DatabaseError::not_found("Husband", id))
}

pub fn update_husband(
    conn: &Connection,
    id: i64,
    fields: &HusbandFields,
) -> Result<Husband, DatabaseError> {
    let changed = conn.execute(
        "UPDATE husbands SET full_name = ?1, age = ?2, citizen_id = ?3, phone_number = ?4,
         email = ?5, updated_at = datetime('now')
         WHERE id = ?6 AND deleted_at IS NULL",
        params![
            fields.full_name,
            fields.age,
            fields.citizen_id,
            fields.phone_number,
            fields.email,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("Husband", id));
    }
    get_husband(conn, id)?.ok_or_else(|| DatabaseError::not_found("Husband", id))
}

/// Husband record linked from the patient row, if any.
pub fn find_husband_by_woman(
    conn: &Connection,
    pregnant_woman_id: i64,
) -> Result<Option<Husband>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT h.id, h.full_name, h.age, h.citizen_id, h.phone_number, h.email
             FROM husbands h
             JOIN pregnant_women w ON w.husband_id = h.id
             WHERE w.id = ?1 AND h.deleted_at IS NULL",
            params![pregnant_woman_id],
            husband_from_row,
        )
        .optional()?;
    Ok(row)
}

/// Update the linked husband in place, or create one and attach it to
/// the patient in a single transaction.
pub fn upsert_husband_for_woman(
    conn: &mut Connection,
    pregnant_woman_id: i64,
    fields: &HusbandFields,
) -> Result<UpsertOutcome<Husband>, DatabaseError> {
    let linked: Option<i64> = conn
        .query_row(
            "SELECT husband_id FROM pregnant_women WHERE id = ?1 AND deleted_at IS NULL",
            params![pregnant_woman_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| DatabaseError::not_found("PregnantWoman", pregnant_woman_id))?;

    if let Some(husband_id) = linked {
        let husband = update_husband(conn, husband_id, fields)?;
        return Ok(UpsertOutcome::Updated(husband));
    }

    let tx = conn.transaction()?;
    let husband = insert_husband(&tx, fields)?;
    tx.execute(
        "UPDATE pregnant_women SET husband_id = ?1, updated_at = datetime('now')
         WHERE id = ?2 AND deleted_at IS NULL",
        params![husband.id, pregnant_woman_id],
    )?;
    tx.commit()?;
    Ok(UpsertOutcome::Created(husband))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::pregnant_woman::{insert_pregnant_woman, NewPregnantWoman};

    fn seeded_woman(conn: &Connection) -> i64 {
        insert_pregnant_woman(
            conn,
            &NewPregnantWoman {
                username: "pt6".into(),
                password_hash: "x$y".into(),
                email: String::new(),
                full_name: String::new(),
                phone_number: String::new(),
                age: 0,
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn first_upsert_links_then_updates_in_place() {
        let mut conn = open_memory_database().unwrap();
        let woman_id = seeded_woman(&conn);

        assert!(find_husband_by_woman(&conn, woman_id).unwrap().is_none());

        let first = upsert_husband_for_woman(
            &mut conn,
            woman_id,
            &HusbandFields {
                full_name: "Daddy D".into(),
                age: 30,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(first.was_created());

        let second = upsert_husband_for_woman(
            &mut conn,
            woman_id,
            &HusbandFields {
                full_name: "Daddy D".into(),
                age: 31,
                phone_number: "0899999999".into(),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!second.was_created());
        assert_eq!(first.into_inner().id, second.into_inner().id);

        let linked = find_husband_by_woman(&conn, woman_id).unwrap().unwrap();
        assert_eq!(linked.fields.age, 31);
        assert_eq!(linked.fields.phone_number, "0899999999");
    }

    #[test]
    fn unknown_patient_is_not_found() {
        let mut conn = open_memory_database().unwrap();
        let err =
            upsert_husband_for_woman(&mut conn, 123, &HusbandFields::default()).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
