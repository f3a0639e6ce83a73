use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Patient account + demographic profile. The password hash never leaves
/// the repository layer. `husband_id` and `appointment_id` are optional
/// references: at most one husband and one current appointment per patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PregnantWoman {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub age: i64,
    pub birth_date: Option<NaiveDate>,
    pub citizen_id: String,
    pub husband_id: Option<i64>,
    pub appointment_id: Option<i64>,
}
