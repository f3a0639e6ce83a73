use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Historical outcome record, created when a pregnancy ends.
/// Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviousPregnancy {
    pub id: i64,
    pub pregnant_woman_id: i64,
    pub pregnancy_no: i64,
    pub delivery_date: Option<NaiveDate>,
    /// Weeks
    pub gestational_age: i64,
    pub delivery_method: String,
    /// Kilograms
    pub birth_weight: f64,
    pub sex: String,
    pub delivery_place: String,
    pub complications: String,
    pub child_status: String,
}

/// Delivery outcome payload for ending a pregnancy or recording an
/// earlier one directly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeliveryOutcome {
    pub delivery_date: Option<NaiveDate>,
    pub gestational_age: i64,
    pub delivery_method: String,
    pub birth_weight: f64,
    pub sex: String,
    pub delivery_place: String,
    pub complications: String,
    pub child_status: String,
}
