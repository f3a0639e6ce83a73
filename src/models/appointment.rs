use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Standalone appointment row; referenced by at most one patient at a
/// time through `pregnant_women.appointment_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub appointment_date: NaiveDateTime,
    pub title: String,
    pub location: String,
}
