use serde::{Deserialize, Serialize};

/// One medical history per patient, enforced by an existence check in the
/// repository rather than a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub id: i64,
    pub pregnant_woman_id: i64,
    #[serde(flatten)]
    pub fields: MedicalHistoryFields,
}

/// The full set of updatable clinical fields. Every path that writes a
/// medical history (doctor entry, patient self-service) goes through this
/// one struct, so the field-copy list cannot drift between handlers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalHistoryFields {
    pub chronic_diseases: String,
    pub heart_disease: bool,
    pub thyroid: bool,
    pub other_diseases: String,
    pub surgery_history: String,
    pub other_surgery: String,
    pub genetic_diseases: String,
    pub drug_allergies: String,
    pub family_history_ht: bool,
    pub family_history_diabetes: bool,
    pub family_history_thalassemia: bool,
    pub family_history_congenital: bool,
    pub other_family_history: String,
    pub contraception_before_method: String,
    pub contraception_before_duration: String,
    pub contraception_last_method: String,
    pub contraception_last_duration: String,
    /// Every X days
    pub menstrual_cycle: i64,
    /// Lasts X days
    pub menstrual_duration: i64,
    /// Regular / Irregular
    pub menstrual_condition: String,
}
