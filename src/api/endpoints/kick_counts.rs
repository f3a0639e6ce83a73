//! Fetal kick count endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::db::repository::{list_kick_counts_by_pregnancy, upsert_fetal_kick_count};
use crate::models::{FetalKickCount, NewFetalKickCount};

/// `POST /kick-counts` — upsert by (pregnancy, day). 201 on create,
/// 200 when the day's row is updated in place.
pub async fn record(
    State(ctx): State<ApiContext>,
    Json(payload): Json<NewFetalKickCount>,
) -> Result<(StatusCode, Json<Envelope<FetalKickCount>>), ApiError> {
    let conn = ctx.conn()?;
    let outcome = upsert_fetal_kick_count(&conn, &payload)?;

    let (status, message) = if outcome.was_created() {
        (StatusCode::CREATED, "Kick count recorded")
    } else {
        (StatusCode::OK, "Kick count updated")
    };
    Ok((status, Json(Envelope::new(message, outcome.into_inner()))))
}

/// `GET /kick-counts/pregnancy/:id` — list, ordered by date ascending.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(pregnancy_id): Path<i64>,
) -> Result<Json<Vec<FetalKickCount>>, ApiError> {
    let conn = ctx.conn()?;
    let counts = list_kick_counts_by_pregnancy(&conn, pregnancy_id)?;
    Ok(Json(counts))
}
