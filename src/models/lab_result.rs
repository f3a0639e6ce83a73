use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lab result for a pregnancy; `file_path` points at an uploaded document
/// under the uploads directory when one was attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabResult {
    pub id: i64,
    pub pregnancy_id: i64,
    pub test_date: Option<NaiveDate>,
    pub hct: f64,
    pub hb: f64,
    pub hb_typing: String,
    pub other_remarks: String,
    pub file_path: Option<String>,
}
