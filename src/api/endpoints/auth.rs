//! Login, registration, and the current-identity endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::auth::{hash_password, verify_password, AuthUser};
use crate::db::repository::{
    find_doctor_credentials, find_woman_credentials, get_doctor, get_pregnant_woman,
    insert_pregnant_woman, NewPregnantWoman,
};
use crate::models::enums::Role;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthData {
    pub token: String,
    pub role: &'static str,
    pub id: i64,
}

/// `POST /login` — either role; patients are tried first.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Envelope<AuthData>>, ApiError> {
    let user = {
        let conn = ctx.conn()?;
        if let Some((woman, hash)) = find_woman_credentials(&conn, &payload.username)? {
            if !verify_password(&payload.password, &hash) {
                return Err(ApiError::Unauthorized);
            }
            AuthUser {
                id: woman.id,
                role: Role::Patient,
            }
        } else if let Some((doctor, hash)) = find_doctor_credentials(&conn, &payload.username)? {
            if !verify_password(&payload.password, &hash) {
                return Err(ApiError::Unauthorized);
            }
            AuthUser {
                id: doctor.id,
                role: Role::Doctor,
            }
        } else {
            return Err(ApiError::Unauthorized);
        }
    };

    let role = user.role.as_str();
    let id = user.id;
    let token = ctx.sessions()?.issue(user);

    tracing::info!(username = %payload.username, role, "login");
    Ok(Json(Envelope::new(
        "Login successful",
        AuthData { token, role, id },
    )))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub age: i64,
}

/// `POST /register` — create a patient account and log it in.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<AuthData>>), ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required".into(),
        ));
    }

    let woman = {
        let conn = ctx.conn()?;
        if find_woman_credentials(&conn, &payload.username)?.is_some() {
            return Err(ApiError::Conflict("Username is already taken".into()));
        }
        insert_pregnant_woman(
            &conn,
            &NewPregnantWoman {
                username: payload.username,
                password_hash: hash_password(&payload.password),
                email: payload.email,
                full_name: payload.full_name,
                phone_number: payload.phone_number,
                age: payload.age,
            },
        )?
    };

    let token = ctx.sessions()?.issue(AuthUser {
        id: woman.id,
        role: Role::Patient,
    });

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(
            "Registration successful",
            AuthData {
                token,
                role: Role::Patient.as_str(),
                id: woman.id,
            },
        )),
    ))
}

/// `GET /me` — role-shaped profile of the authenticated user.
pub async fn me(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Envelope<serde_json::Value>>, ApiError> {
    let conn = ctx.conn()?;
    let data = match user.role {
        Role::Patient => {
            let woman = get_pregnant_woman(&conn, user.id)?
                .ok_or_else(|| ApiError::NotFound("Account not found".into()))?;
            serde_json::to_value(woman)
        }
        Role::Doctor => {
            let doctor = get_doctor(&conn, user.id)?
                .ok_or_else(|| ApiError::NotFound("Account not found".into()))?;
            serde_json::to_value(doctor)
        }
    }
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(Envelope::new("Current user", data)))
}
