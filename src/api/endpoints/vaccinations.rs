//! Vaccination and vaccine type endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::db::repository::{
    list_vaccinations_by_woman, list_vaccine_types, update_vaccination, upsert_vaccination,
};
use crate::models::{Vaccination, VaccinationFields, VaccinationRecord, VaccineType};

/// `GET /vaccinations/pregnant-woman/:id` — list with vaccine type names.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(pregnant_woman_id): Path<i64>,
) -> Result<Json<Vec<VaccinationRecord>>, ApiError> {
    let conn = ctx.conn()?;
    let records = list_vaccinations_by_woman(&conn, pregnant_woman_id)?;
    Ok(Json(records))
}

/// `PUT /vaccinations/:id` — update by row id.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(fields): Json<VaccinationFields>,
) -> Result<Json<Envelope<Vaccination>>, ApiError> {
    let conn = ctx.conn()?;
    let vaccination = update_vaccination(&conn, id, &fields)?;
    Ok(Json(Envelope::new("Vaccination updated", vaccination)))
}

/// `GET /vaccine-types` — reference list.
pub async fn types(State(ctx): State<ApiContext>) -> Result<Json<Vec<VaccineType>>, ApiError> {
    let conn = ctx.conn()?;
    let types = list_vaccine_types(&conn)?;
    Ok(Json(types))
}

#[derive(Deserialize)]
pub struct VaccinationUpsertRequest {
    pub pregnant_woman_id: i64,
    pub vaccine_type_id: i64,
    #[serde(flatten)]
    pub fields: VaccinationFields,
}

/// `POST /doctor/vaccination` — upsert by (patient, vaccine type).
pub async fn doctor_upsert(
    State(ctx): State<ApiContext>,
    Json(payload): Json<VaccinationUpsertRequest>,
) -> Result<(StatusCode, Json<Envelope<Vaccination>>), ApiError> {
    let conn = ctx.conn()?;
    let outcome = upsert_vaccination(
        &conn,
        payload.pregnant_woman_id,
        payload.vaccine_type_id,
        &payload.fields,
    )?;

    let (status, message) = if outcome.was_created() {
        (StatusCode::CREATED, "Vaccination recorded")
    } else {
        (StatusCode::OK, "Vaccination updated")
    };
    Ok((status, Json(Envelope::new(message, outcome.into_inner()))))
}
