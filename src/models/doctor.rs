use serde::{Deserialize, Serialize};

/// Doctor account; identity only, no clinical fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
}
