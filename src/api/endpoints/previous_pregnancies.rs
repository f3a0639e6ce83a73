//! Previous pregnancy (delivery history) endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::db::repository::{
    get_pregnant_woman, insert_previous_pregnancy, list_previous_pregnancies_by_woman,
    NewPreviousPregnancy,
};
use crate::models::{DeliveryOutcome, PreviousPregnancy};

/// `GET /previous-pregnancies/pregnant-woman/:id` — list, ordered by
/// pregnancy number.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(pregnant_woman_id): Path<i64>,
) -> Result<Json<Vec<PreviousPregnancy>>, ApiError> {
    let conn = ctx.conn()?;
    let records = list_previous_pregnancies_by_woman(&conn, pregnant_woman_id)?;
    Ok(Json(records))
}

#[derive(Deserialize)]
pub struct PreviousPregnancyRequest {
    pub pregnant_woman_id: i64,
    pub pregnancy_no: i64,
    #[serde(flatten)]
    pub outcome: DeliveryOutcome,
}

/// `POST /doctor/previous-pregnancy` — record a historical delivery
/// directly (outside the end-pregnancy flow).
pub async fn doctor_create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<PreviousPregnancyRequest>,
) -> Result<(StatusCode, Json<Envelope<PreviousPregnancy>>), ApiError> {
    let conn = ctx.conn()?;
    if get_pregnant_woman(&conn, payload.pregnant_woman_id)?.is_none() {
        return Err(ApiError::NotFound("Patient not found".into()));
    }

    let record = insert_previous_pregnancy(
        &conn,
        &NewPreviousPregnancy {
            pregnant_woman_id: payload.pregnant_woman_id,
            pregnancy_no: payload.pregnancy_no,
            outcome: payload.outcome,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Previous pregnancy recorded", record)),
    ))
}
