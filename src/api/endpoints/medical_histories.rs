//! Medical history endpoints. Doctor and patient paths share the same
//! field list and the same upsert.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::db::repository::{
    find_medical_history_by_woman, update_medical_history, upsert_medical_history,
};
use crate::models::{MedicalHistory, MedicalHistoryFields};

/// `GET /medical-histories/pregnant-woman/:id` — 404 when absent.
pub async fn get_by_woman(
    State(ctx): State<ApiContext>,
    Path(pregnant_woman_id): Path<i64>,
) -> Result<Json<Envelope<MedicalHistory>>, ApiError> {
    let conn = ctx.conn()?;
    let history = find_medical_history_by_woman(&conn, pregnant_woman_id)?
        .ok_or_else(|| ApiError::NotFound("Medical history not found".into()))?;
    Ok(Json(Envelope::new("Medical history", history)))
}

/// `PUT /medical-histories/:id` — full field-list update by row id.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(fields): Json<MedicalHistoryFields>,
) -> Result<Json<Envelope<MedicalHistory>>, ApiError> {
    let conn = ctx.conn()?;
    let history = update_medical_history(&conn, id, &fields)?;
    Ok(Json(Envelope::new("Medical history updated", history)))
}

#[derive(Deserialize)]
pub struct MedicalHistoryUpsertRequest {
    pub pregnant_woman_id: i64,
    #[serde(flatten)]
    pub fields: MedicalHistoryFields,
}

/// `POST /doctor/medical-history` — upsert by patient id.
pub async fn doctor_upsert(
    State(ctx): State<ApiContext>,
    Json(payload): Json<MedicalHistoryUpsertRequest>,
) -> Result<(StatusCode, Json<Envelope<MedicalHistory>>), ApiError> {
    let conn = ctx.conn()?;
    let outcome = upsert_medical_history(&conn, payload.pregnant_woman_id, &payload.fields)?;

    let (status, message) = if outcome.was_created() {
        (StatusCode::CREATED, "Medical history recorded")
    } else {
        (StatusCode::OK, "Medical history updated")
    };
    Ok((status, Json(Envelope::new(message, outcome.into_inner()))))
}

/// `GET /doctor/patient/:patient_id/medical-history` — `data: null`
/// when the patient has no history yet (200, not 404).
pub async fn doctor_get(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Envelope<Option<MedicalHistory>>>, ApiError> {
    let conn = ctx.conn()?;
    let history = find_medical_history_by_woman(&conn, patient_id)?;
    Ok(Json(Envelope::new("Medical history", history)))
}
