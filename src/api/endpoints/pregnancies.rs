//! Pregnancy lifecycle endpoints (doctor only in practice; the auth
//! gate does not distinguish roles beyond the token).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::db::repository::{
    create_pregnancy, end_pregnancy, find_active_pregnancy, get_pregnant_woman,
    list_pregnancies_by_woman, NewPregnancy,
};
use crate::models::{DeliveryOutcome, Pregnancy, PreviousPregnancy};

#[derive(Deserialize)]
pub struct PregnancyRequest {
    pub pregnant_woman_id: i64,
    pub pregnancy_no: i64,
    #[serde(default)]
    pub lmp: Option<NaiveDate>,
    #[serde(default)]
    pub edc: Option<NaiveDate>,
}

/// `POST /doctor/pregnancy` — create with the one-Active-per-patient
/// check (409 on conflict) and the LMP + 280 days EDC default.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<PregnancyRequest>,
) -> Result<(StatusCode, Json<Envelope<Pregnancy>>), ApiError> {
    let conn = ctx.conn()?;
    if get_pregnant_woman(&conn, payload.pregnant_woman_id)?.is_none() {
        return Err(ApiError::NotFound("Patient not found".into()));
    }
    if find_active_pregnancy(&conn, payload.pregnant_woman_id)?.is_some() {
        return Err(ApiError::Conflict(
            "Patient already has an active pregnancy".into(),
        ));
    }

    let pregnancy = create_pregnancy(
        &conn,
        &NewPregnancy {
            pregnant_woman_id: payload.pregnant_woman_id,
            pregnancy_no: payload.pregnancy_no,
            lmp: payload.lmp,
            edc: payload.edc,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Pregnancy created", pregnancy)),
    ))
}

/// `POST /doctor/pregnancy/:id/end` — flip to Ended and record the
/// outcome; 404 for an unknown id, 400 when not Active.
pub async fn end(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(outcome): Json<DeliveryOutcome>,
) -> Result<Json<Envelope<PreviousPregnancy>>, ApiError> {
    let mut conn = ctx.conn()?;
    let previous = end_pregnancy(&mut conn, id, &outcome)?;
    Ok(Json(Envelope::new("Pregnancy ended", previous)))
}

/// `GET /pregnancies/pregnant-woman/:id` — all pregnancies of a patient.
pub async fn list_by_woman(
    State(ctx): State<ApiContext>,
    Path(pregnant_woman_id): Path<i64>,
) -> Result<Json<Vec<Pregnancy>>, ApiError> {
    let conn = ctx.conn()?;
    let pregnancies = list_pregnancies_by_woman(&conn, pregnant_woman_id)?;
    Ok(Json(pregnancies))
}
