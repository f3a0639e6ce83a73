use rusqlite::{params, Connection, OptionalExtension};

use crate::db::repository::{upsert_by_key, UpsertOutcome};
use crate::db::DatabaseError;
use crate::models::{Vaccination, VaccinationFields, VaccinationRecord};

const COLUMNS: &str = "id, pregnant_woman_id, vaccine_type_id, is_previously_vaccinated, \
                       previous_doses, last_previous_date_year, dose1_date_during_preg, \
                       dose2_date_during_preg, remarks";

fn vaccination_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Vaccination> {
    Ok(Vaccination {
        id: row.get(0)?,
        pregnant_woman_id: row.get(1)?,
        vaccine_type_id: row.get(2)?,
        fields: VaccinationFields {
            is_previously_vaccinated: row.get(3)?,
            previous_doses: row.get(4)?,
            last_previous_date_year: row.get(5)?,
            dose1_date_during_preg: row.get(6)?,
            dose2_date_during_preg: row.get(7)?,
            remarks: row.get(8)?,
        },
    })
}

pub fn get_vaccination(conn: &Connection, id: i64) -> Result<Option<Vaccination>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM vaccinations WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            vaccination_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn find_vaccination_by_woman_and_type(
    conn: &Connection,
    pregnant_woman_id: i64,
    vaccine_type_id: i64,
) -> Result<Option<Vaccination>, DatabaseError> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM vaccinations
                 WHERE pregnant_woman_id = ?1 AND vaccine_type_id = ?2 AND deleted_at IS NULL
                 ORDER BY id LIMIT 1"
            ),
            params![pregnant_woman_id, vaccine_type_id],
            vaccination_from_row,
        )
        .optional()?;
    Ok(row)
}

/// Vaccinations for a patient, joined with the vaccine type name.
pub fn list_vaccinations_by_woman(
    conn: &Connection,
    pregnant_woman_id: i64,
) -> Result<Vec<VaccinationRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT v.id, v.pregnant_woman_id, v.vaccine_type_id, v.is_previously_vaccinated,
                v.previous_doses, v.last_previous_date_year, v.dose1_date_during_preg,
                v.dose2_date_during_preg, v.remarks, t.name
         FROM vaccinations v
         JOIN vaccine_types t ON t.id = v.vaccine_type_id
         WHERE v.pregnant_woman_id = ?1 AND v.deleted_at IS NULL
         ORDER BY v.id",
    )?;
    let rows = stmt.query_map(params![pregnant_woman_id], |row| {
        Ok(VaccinationRecord {
            vaccination: vaccination_from_row(row)?,
            vaccine_type_name: row.get(9)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

pub fn insert_vaccination(
    conn: &Connection,
    pregnant_woman_id: i64,
    vaccine_type_id: i64,
    fields: &VaccinationFields,
) -> Result<Vaccination, DatabaseError> {
    conn.execute(
        "INSERT INTO vaccinations (pregnant_woman_id, vaccine_type_id, is_previously_vaccinated,
         previous_doses, last_previous_date_year, dose1_date_during_preg, dose2_date_during_preg,
         remarks)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            pregnant_woman_id,
            vaccine_type_id,
            fields.is_previously_vaccinated,
            fields.previous_doses,
            fields.last_previous_date_year,
            fields.dose1_date_during_preg,
            fields.dose2_date_during_preg,
            fields.remarks,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_vaccination(conn, id)?.ok_or_else(|| DatabaseError::not_found("Vaccination", id))
}

pub fn update_vaccination(
    conn: &Connection,
    id: i64,
    fields: &VaccinationFields,
) -> Result<Vaccination, DatabaseError> {
    let changed = conn.execute(
        "UPDATE vaccinations SET is_previously_vaccinated = ?1, previous_doses = ?2,
         last_previous_date_year = ?3, dose1_date_during_preg = ?4,
         dose2_date_during_preg = ?5, remarks = ?6, updated_at = datetime('now')
         WHERE id = ?7 AND deleted_at IS NULL",
        params![
            fields.is_previously_vaccinated,
            fields.previous_doses,
            fields.last_previous_date_year,
            fields.dose1_date_during_preg,
            fields.dose2_date_during_preg,
            fields.remarks,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("Vaccination", id));
    }
    get_vaccination(conn, id)?.ok_or_else(|| DatabaseError::not_found("Vaccination", id))
}

/// Upsert keyed on the (patient, vaccine type) pair.
pub fn upsert_vaccination(
    conn: &Connection,
    pregnant_woman_id: i64,
    vaccine_type_id: i64,
    fields: &VaccinationFields,
) -> Result<UpsertOutcome<Vaccination>, DatabaseError> {
    upsert_by_key(
        conn,
        |c| find_vaccination_by_woman_and_type(c, pregnant_woman_id, vaccine_type_id),
        |c, existing| update_vaccination(c, existing.id, fields),
        |c| insert_vaccination(c, pregnant_woman_id, vaccine_type_id, fields),
    )
}
