//! Doctor-facing patient roster and detail endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Envelope};
use crate::db::repository::{
    create_appointment_for_woman, get_appointment, get_pregnant_woman,
    list_medical_histories_by_woman, list_pregnancies_by_woman,
    list_pregnant_women, list_previous_pregnancies_by_woman, list_vaccinations_by_woman,
    NewAppointment,
};
use crate::models::{
    Appointment, MedicalHistory, Pregnancy, PregnantWoman, PreviousPregnancy, VaccinationRecord,
};

#[derive(Serialize)]
pub struct PatientSummary {
    #[serde(flatten)]
    pub patient: PregnantWoman,
    pub pregnancies: Vec<Pregnancy>,
    pub medical_histories: Vec<MedicalHistory>,
}

/// `GET /doctor/patients` — roster with nested pregnancies and
/// medical histories.
pub async fn roster(State(ctx): State<ApiContext>) -> Result<Json<Vec<PatientSummary>>, ApiError> {
    let conn = ctx.conn()?;
    let mut summaries = Vec::new();
    for patient in list_pregnant_women(&conn)? {
        let pregnancies = list_pregnancies_by_woman(&conn, patient.id)?;
        let medical_histories = list_medical_histories_by_woman(&conn, patient.id)?;
        summaries.push(PatientSummary {
            patient,
            pregnancies,
            medical_histories,
        });
    }
    Ok(Json(summaries))
}

#[derive(Serialize)]
pub struct PatientDetail {
    #[serde(flatten)]
    pub patient: PregnantWoman,
    pub pregnancies: Vec<Pregnancy>,
    pub medical_histories: Vec<MedicalHistory>,
    pub vaccinations: Vec<VaccinationRecord>,
    pub previous_pregnancies: Vec<PreviousPregnancy>,
    pub appointment: Option<Appointment>,
}

/// `GET /doctor/patients/:id` — full chart view of one patient.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<PatientDetail>>, ApiError> {
    let conn = ctx.conn()?;
    let patient = get_pregnant_woman(&conn, id)?
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    let appointment = match patient.appointment_id {
        Some(appointment_id) => get_appointment(&conn, appointment_id)?,
        None => None,
    };
    let detail = PatientDetail {
        pregnancies: list_pregnancies_by_woman(&conn, patient.id)?,
        medical_histories: list_medical_histories_by_woman(&conn, patient.id)?,
        vaccinations: list_vaccinations_by_woman(&conn, patient.id)?,
        previous_pregnancies: list_previous_pregnancies_by_woman(&conn, patient.id)?,
        appointment,
        patient,
    };
    Ok(Json(Envelope::new("Patient detail", detail)))
}

#[derive(Deserialize)]
pub struct AppointmentRequest {
    pub appointment_date: NaiveDateTime,
    pub title: String,
    #[serde(default)]
    pub location: String,
}

/// `POST /doctor/patient/:id/appointment` — create an appointment and
/// attach it to the patient in one transaction.
pub async fn create_appointment(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<i64>,
    Json(payload): Json<AppointmentRequest>,
) -> Result<(StatusCode, Json<Envelope<Appointment>>), ApiError> {
    let mut conn = ctx.conn()?;
    let appointment = create_appointment_for_woman(
        &mut conn,
        patient_id,
        &NewAppointment {
            appointment_date: payload.appointment_date,
            title: payload.title,
            location: payload.location,
        },
    )?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Appointment created", appointment)),
    ))
}
