use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Vaccination record, one per (patient, vaccine type) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vaccination {
    pub id: i64,
    pub pregnant_woman_id: i64,
    pub vaccine_type_id: i64,
    #[serde(flatten)]
    pub fields: VaccinationFields,
}

/// Updatable vaccination fields, shared by the doctor upsert and the
/// row-id update path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaccinationFields {
    pub is_previously_vaccinated: bool,
    pub previous_doses: i64,
    pub last_previous_date_year: Option<NaiveDate>,
    pub dose1_date_during_preg: Option<NaiveDate>,
    pub dose2_date_during_preg: Option<NaiveDate>,
    pub remarks: String,
}

/// Reference/lookup row, seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaccineType {
    pub id: i64,
    pub name: String,
}

/// Vaccination joined with its vaccine type name, for list views.
#[derive(Debug, Clone, Serialize)]
pub struct VaccinationRecord {
    #[serde(flatten)]
    pub vaccination: Vaccination,
    pub vaccine_type_name: String,
}
