use serde::{Deserialize, Serialize};

/// Husband contact record; referenced by at most one patient through
/// `pregnant_women.husband_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Husband {
    pub id: i64,
    #[serde(flatten)]
    pub fields: HusbandFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HusbandFields {
    pub full_name: String,
    pub age: i64,
    pub citizen_id: String,
    pub phone_number: String,
    pub email: String,
}
