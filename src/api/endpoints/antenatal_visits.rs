//! Antenatal visit endpoints. The visit log is append-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::db::repository::{
    insert_antenatal_visit, latest_pregnancy, list_antenatal_visits_by_pregnancy,
};
use crate::models::{AntenatalVisit, NewAntenatalVisit};

/// `GET /antenatal-visits/pregnancy/:id` — list in insertion order.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(pregnancy_id): Path<i64>,
) -> Result<Json<Vec<AntenatalVisit>>, ApiError> {
    let conn = ctx.conn()?;
    let visits = list_antenatal_visits_by_pregnancy(&conn, pregnancy_id)?;
    Ok(Json(visits))
}

/// `POST /antenatal-visits` and `POST /doctor/antenatal-visit` —
/// append a visit.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NewAntenatalVisit>,
) -> Result<(StatusCode, Json<Envelope<AntenatalVisit>>), ApiError> {
    let conn = ctx.conn()?;
    let visit = insert_antenatal_visit(&conn, &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Antenatal visit recorded", visit)),
    ))
}

/// `GET /doctor/patient/:patient_id/visits` — visits of the patient's
/// latest pregnancy; empty list when she has no pregnancy.
pub async fn patient_visits(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Vec<AntenatalVisit>>, ApiError> {
    let conn = ctx.conn()?;
    let visits = match latest_pregnancy(&conn, patient_id)? {
        Some(pregnancy) => list_antenatal_visits_by_pregnancy(&conn, pregnancy.id)?,
        None => Vec::new(),
    };
    Ok(Json(visits))
}
