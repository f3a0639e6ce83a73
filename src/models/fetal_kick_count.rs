use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One kick-count row per pregnancy per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetalKickCount {
    pub id: i64,
    pub pregnancy_id: i64,
    pub count_date: NaiveDate,
    pub kick_count_morning: i64,
    pub kick_count_lunch: i64,
    pub kick_count_evening: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFetalKickCount {
    pub pregnancy_id: i64,
    pub count_date: NaiveDate,
    #[serde(default)]
    pub kick_count_morning: i64,
    #[serde(default)]
    pub kick_count_lunch: i64,
    #[serde(default)]
    pub kick_count_evening: i64,
}
