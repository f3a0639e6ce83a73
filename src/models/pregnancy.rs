use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::PregnancyStatus;

/// A pregnancy under care. At most one `Active` pregnancy per patient.
/// `edc` defaults to `lmp` + 280 days when not supplied at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pregnancy {
    pub id: i64,
    pub pregnant_woman_id: i64,
    pub pregnancy_no: i64,
    pub lmp: Option<NaiveDate>,
    pub edc: Option<NaiveDate>,
    pub status: PregnancyStatus,
}
