//! Patient self-service profile endpoints. The authenticated id from
//! the bearer token is the only patient these can touch.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::auth::AuthUser;
use crate::db::repository::{
    update_personal, upsert_husband_for_woman, upsert_medical_history, PersonalUpdate,
};
use crate::models::{Husband, HusbandFields, MedicalHistory, PregnantWoman};

/// `PUT /profile/husband` — create and link on first write, update the
/// linked row in place afterwards.
pub async fn update_husband(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Json(fields): Json<HusbandFields>,
) -> Result<(StatusCode, Json<Envelope<Husband>>), ApiError> {
    let mut conn = ctx.conn()?;
    let outcome = upsert_husband_for_woman(&mut conn, user.id, &fields)?;

    let (status, message) = if outcome.was_created() {
        (StatusCode::CREATED, "Husband recorded")
    } else {
        (StatusCode::OK, "Husband updated")
    };
    Ok((status, Json(Envelope::new(message, outcome.into_inner()))))
}

#[derive(Deserialize)]
pub struct PersonalRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub citizen_id: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// `PUT /profile/personal` — update contact fields; a parsable birth
/// date also recomputes age.
pub async fn update_personal_info(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<PersonalRequest>,
) -> Result<Json<Envelope<PregnantWoman>>, ApiError> {
    let birth_date = payload
        .birth_date
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map(parse_birth_date)
        .transpose()?;

    let conn = ctx.conn()?;
    let woman = update_personal(
        &conn,
        user.id,
        &PersonalUpdate {
            full_name: payload.full_name,
            citizen_id: payload.citizen_id,
            phone_number: payload.phone_number,
            email: payload.email,
            birth_date,
        },
    )?;
    Ok(Json(Envelope::new("Personal information updated", woman)))
}

/// `PUT /profile/medical-history` — same upsert and field list as the
/// doctor path, keyed to the authenticated patient.
pub async fn update_medical_history(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Json(fields): Json<crate::models::MedicalHistoryFields>,
) -> Result<(StatusCode, Json<Envelope<MedicalHistory>>), ApiError> {
    let conn = ctx.conn()?;
    let outcome = upsert_medical_history(&conn, user.id, &fields)?;

    let (status, message) = if outcome.was_created() {
        (StatusCode::CREATED, "Medical history recorded")
    } else {
        (StatusCode::OK, "Medical history updated")
    };
    Ok((status, Json(Envelope::new(message, outcome.into_inner()))))
}

/// `%Y-%m-%d` with an RFC 3339 fallback for clients that send full
/// timestamps.
fn parse_birth_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| ApiError::BadRequest(format!("Invalid birth date: {raw}")))
}
