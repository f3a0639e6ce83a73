//! Lab result endpoints. Creation is a multipart form so the client
//! can attach the scanned report alongside the values.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::config::lab_results_dir;
use crate::db::repository::{insert_lab_result, list_lab_results_by_pregnancy, NewLabResult};
use crate::models::LabResult;

/// `POST /doctor/lab-result` — multipart form. Text fields carry the
/// values; the optional `File` part is stored under the uploads
/// directory as `lab_results/<unix-ts>_<original-name>` and its path
/// recorded on the row.
pub async fn doctor_create(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Envelope<LabResult>>), ApiError> {
    let mut pregnancy_id: Option<i64> = None;
    let mut test_date: Option<NaiveDate> = None;
    let mut hct = 0.0;
    let mut hb = 0.0;
    let mut hb_typing = String::new();
    let mut other_remarks = String::new();
    let mut file_path: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pregnancy_id" => {
                pregnancy_id = Some(parse_field(&name, &field_text(field).await?)?);
            }
            "test_date" => {
                let raw = field_text(field).await?;
                test_date = Some(
                    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                        .map_err(|_| ApiError::BadRequest(format!("Invalid test date: {raw}")))?,
                );
            }
            "hct" => hct = parse_field(&name, &field_text(field).await?)?,
            "hb" => hb = parse_field(&name, &field_text(field).await?)?,
            "hb_typing" => hb_typing = field_text(field).await?,
            "other_remarks" => other_remarks = field_text(field).await?,
            "File" => {
                let original = field
                    .file_name()
                    .unwrap_or("lab_result")
                    .replace(['/', '\\'], "_");
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

                let dir = lab_results_dir(&ctx.uploads_dir);
                std::fs::create_dir_all(&dir)
                    .map_err(|e| ApiError::Internal(format!("Uploads directory: {e}")))?;

                let file_name = format!("{}_{}", chrono::Utc::now().timestamp(), original);
                let dest = dir.join(&file_name);
                std::fs::write(&dest, &bytes)
                    .map_err(|e| ApiError::Internal(format!("Writing upload: {e}")))?;
                file_path = Some(dest.to_string_lossy().into_owned());
            }
            _ => {}
        }
    }

    let pregnancy_id =
        pregnancy_id.ok_or_else(|| ApiError::BadRequest("pregnancy_id is required".into()))?;

    let conn = ctx.conn()?;
    let lab = insert_lab_result(
        &conn,
        &NewLabResult {
            pregnancy_id,
            test_date,
            hct,
            hb,
            hb_typing,
            other_remarks,
            file_path,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Lab result recorded", lab)),
    ))
}

/// `GET /doctor/pregnancy/:pregnancy_id/lab-results` — list.
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(pregnancy_id): Path<i64>,
) -> Result<Json<Vec<LabResult>>, ApiError> {
    let conn = ctx.conn()?;
    let results = list_lab_results_by_pregnancy(&conn, pregnancy_id)?;
    Ok(Json(results))
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn parse_field<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {name}: {raw}")))
}
