use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Append-only antenatal visit log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntenatalVisit {
    pub id: i64,
    pub pregnancy_id: i64,
    pub visit_date: Option<NaiveDate>,
    /// Weeks
    pub gestational_age: i64,
    /// Kilograms
    pub weight: f64,
    pub blood_pressure: String,
    pub fetal_heart_rate: i64,
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAntenatalVisit {
    pub pregnancy_id: i64,
    #[serde(default)]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub gestational_age: i64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub blood_pressure: String,
    #[serde(default)]
    pub fetal_heart_rate: i64,
    #[serde(default)]
    pub notes: String,
}
