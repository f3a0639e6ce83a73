use rusqlite::{params, Connection, OptionalExtension};

use crate::db::repository::{upsert_by_key, UpsertOutcome};
use crate::db::DatabaseError;
use crate::models::{MedicalHistory, MedicalHistoryFields};

const COLUMNS: &str = "id, pregnant_woman_id, chronic_diseases, heart_disease, thyroid, \
                       other_diseases, surgery_history, other_surgery, genetic_diseases, \
                       drug_allergies, family_history_ht, family_history_diabetes, \
                       family_history_thalassemia, family_history_congenital, \
                       other_family_history, contraception_before_method, \
                       contraception_before_duration, contraception_last_method, \
                       contraception_last_duration, menstrual_cycle, menstrual_duration, \
                       menstrual_condition";

fn history_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MedicalHistory> {
    Ok(MedicalHistory {
        id: row.get(0)?,
        pregnant_woman_id: row.get(1)?,
        fields: MedicalHistoryFields {
            chronic_diseases: row.get(2)?,
            heart_disease: row.get(3)?,
            thyroid: row.get(4)?,
            other_diseases: row.get(5)?,
            surgery_history: row.get(6)?,
            other_surgery: row.get(7)?,
            genetic_diseases: row.get(8)?,
            drug_allergies: row.get(9)?,
            family_history_ht: row.get(10)?,
            family_history_diabetes: row.get(11)?,
            family_history_thalassemia: row.get(12)?,
            family_history_congenital: row.get(13)?,
            other_family_history: row.get(14)?,
            contraception_before_method: row.get(15)?,
            contraception_before_duration: row.get(16)?,
            contraception_last_method: row.get(17)?,
            contraception_last_duration: row.get(18)?,
            menstrual_cycle: row.get(19)?,
            menstrual_duration: row.get(20)?,
            menstrual_condition: row.get(21)?,
        },
    })
}

pub fn get_medical_history(
    conn: &Connection,
    id: i64,
) -> Result<Option<MedicalHistory>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM medical_histories WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            history_from_row,
        )
        .optional()?;
    Ok(row)
}

/// The patient's medical history, if one exists (first by id; the
/// existence check keeps it to one in practice).
pub fn find_medical_history_by_woman(
    conn: &Connection,
    pregnant_woman_id: i64,
) -> Result<Option<MedicalHistory>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM medical_histories
                 WHERE pregnant_woman_id = ?1 AND deleted_at IS NULL
                 ORDER BY id LIMIT 1"
            ),
            params![pregnant_woman_id],
            history_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn list_medical_histories_by_woman(
    conn: &Connection,
    pregnant_woman_id: i64,
) -> Result<Vec<MedicalHistory>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM medical_histories
         WHERE pregnant_woman_id = ?1 AND deleted_at IS NULL ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![pregnant_woman_id], history_from_row)?;

    let mut histories = Vec::new();
    for row in rows {
        histories.push(row?);
    }
    Ok(histories)
}

pub fn insert_medical_history(
    conn: &Connection,
    pregnant_woman_id: i64,
    fields: &MedicalHistoryFields,
) -> Result<MedicalHistory, DatabaseError> {
    conn.execute(
        "INSERT INTO medical_histories (pregnant_woman_id, chronic_diseases, heart_disease,
         thyroid, other_diseases, surgery_history, other_surgery, genetic_diseases,
         drug_allergies, family_history_ht, family_history_diabetes, family_history_thalassemia,
         family_history_congenital, other_family_history, contraception_before_method,
         contraception_before_duration, contraception_last_method, contraception_last_duration,
         menstrual_cycle, menstrual_duration, menstrual_condition)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                 ?18, ?19, ?20, ?21)",
        params![
            pregnant_woman_id,
            fields.chronic_diseases,
            fields.heart_disease,
            fields.thyroid,
            fields.other_diseases,
            fields.surgery_history,
            fields.other_surgery,
            fields.genetic_diseases,
            fields.drug_allergies,
            fields.family_history_ht,
            fields.family_history_diabetes,
            fields.family_history_thalassemia,
            fields.family_history_congenital,
            fields.other_family_history,
            fields.contraception_before_method,
            fields.contraception_before_duration,
            fields.contraception_last_method,
            fields.contraception_last_duration,
            fields.menstrual_cycle,
            fields.menstrual_duration,
            fields.menstrual_condition,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_medical_history(conn, id)?.ok_or_else(|| DatabaseError::not_found("MedicalHistory", id))
}

/// Copy the full field list onto an existing row. This is the only
/// update statement for medical histories; doctor and self-service
/// paths both use it.
pub fn update_medical_history(
    conn: &Connection,
    id: i64,
    fields: &MedicalHistoryFields,
) -> Result<MedicalHistory, DatabaseError> {
    let changed = conn.execute(
        "UPDATE medical_histories SET chronic_diseases = ?1, heart_disease = ?2, thyroid = ?3,
         other_diseases = ?4, surgery_history = ?5, other_surgery = ?6, genetic_diseases = ?7,
         drug_allergies = ?8, family_history_ht = ?9, family_history_diabetes = ?10,
         family_history_thalassemia = ?11, family_history_congenital = ?12,
         other_family_history = ?13, contraception_before_method = ?14,
         contraception_before_duration = ?15, contraception_last_method = ?16,
         contraception_last_duration = ?17, menstrual_cycle = ?18, menstrual_duration = ?19,
         menstrual_condition = ?20, updated_at = datetime('now')
         WHERE id = ?21 AND deleted_at IS NULL",
        params![
            fields.chronic_diseases,
            fields.heart_disease,
            fields.thyroid,
            fields.other_diseases,
            fields.surgery_history,
            fields.other_surgery,
            fields.genetic_diseases,
            fields.drug_allergies,
            fields.family_history_ht,
            fields.family_history_diabetes,
            fields.family_history_thalassemia,
            fields.family_history_congenital,
            fields.other_family_history,
            fields.contraception_before_method,
            fields.contraception_before_duration,
            fields.contraception_last_method,
            fields.contraception_last_duration,
            fields.menstrual_cycle,
            fields.menstrual_duration,
            fields.menstrual_condition,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("MedicalHistory", id));
    }
    get_medical_history(conn, id)?.ok_or_else(|| DatabaseError::not_found("MedicalHistory", id))
}

/// Upsert keyed on patient id.
pub fn upsert_medical_history(
    conn: &Connection,
    pregnant_woman_id: i64,
    fields: &MedicalHistoryFields,
) -> Result<UpsertOutcome<MedicalHistory>, DatabaseError> {
    upsert_by_key(
        conn,
        |c| find_medical_history_by_woman(c, pregnant_woman_id),
        |c, existing| update_medical_history(c, existing.id, fields),
        |c| insert_medical_history(c, pregnant_woman_id, fields),
    )
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
                username: "pt3".into(),
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
    fn upsert_creates_then_updates_same_row() {
        let conn = open_memory_database().unwrap();
        let woman_id = seeded_woman(&conn);

        let fields = MedicalHistoryFields {
            chronic_diseases: "asthma".into(),
            heart_disease: true,
            ..Default::default()
        };
        let first = upsert_medical_history(&conn, woman_id, &fields).unwrap();
        assert!(first.was_created());
        let first = first.into_inner();

        let fields = MedicalHistoryFields {
            chronic_diseases: "asthma, anemia".into(),
            menstrual_cycle: 28,
            ..Default::default()
        };
        let second = upsert_medical_history(&conn, woman_id, &fields).unwrap();
        assert!(!second.was_created());
        let second = second.into_inner();

        assert_eq!(first.id, second.id);
        assert_eq!(second.fields.chronic_diseases, "asthma, anemia");
        assert_eq!(second.fields.menstrual_cycle, 28);
        // Full field list is copied: the earlier flag is overwritten
        assert!(!second.fields.heart_disease);

        assert_eq!(list_medical_histories_by_woman(&conn, woman_id).unwrap().len(), 1);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err =
            update_medical_history(&conn, 42, &MedicalHistoryFields::default()).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
