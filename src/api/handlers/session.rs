use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateSessionRequest, UpdateSessionRequest};
use crate::api::dtos::responses::SessionListResponse;
use crate::api::extractors::admin::AdminUser;
use crate::domain::models::session::Session;
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {field} (expected YYYY-MM-DD)")))
}

fn parse_time(value: &str, field: &str) -> Result<String, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| value.to_string())
        .map_err(|_| AppError::Validation(format!("Invalid {field} (expected HH:MM)")))
}

async fn check_references(
    state: &AppState,
    program_id: &str,
    venue_id: &str,
    contact_id: &str,
) -> Result<(), AppError> {
    state.program_repo.find_by_id(program_id).await?
        .ok_or(AppError::Validation("Selected program does not exist".into()))?;
    state.venue_repo.find_by_id(venue_id).await?
        .ok_or(AppError::Validation("Selected venue does not exist".into()))?;
    state.contact_repo.find_by_id(contact_id).await?
        .ok_or(AppError::Validation("Selected contact does not exist".into()))?;
    Ok(())
}

fn validate_date_range(session: &Session) -> Result<(), AppError> {
    if let Some(end) = session.end_date {
        if end < session.start_date {
            return Err(AppError::Validation("End date must not be before start date".into()));
        }
    }
    Ok(())
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_references(&state, &payload.program_id, &payload.venue_id, &payload.contact_id).await?;

    let start_date = parse_date(&payload.start_date, "start date")?;
    let mut session = Session::new(
        payload.program_id,
        payload.venue_id,
        payload.contact_id,
        start_date,
    );

    if let Some(ref end) = payload.end_date {
        session.end_date = Some(parse_date(end, "end date")?);
    }
    if let Some(ref time) = payload.start_time {
        session.start_time = Some(parse_time(time, "start time")?);
    }
    if let Some(ref time) = payload.end_time {
        session.end_time = Some(parse_time(time, "end time")?);
    }
    session.language = payload.language;
    session.is_published = payload.is_published.unwrap_or(false);
    session.registrations_allowed = payload.registrations_allowed.unwrap_or(false);
    session.registration_link = payload.registration_link;
    session.open_without_registration = payload.open_without_registration.unwrap_or(false);

    validate_date_range(&session)?;

    let created = state.session_repo.create(&session).await?;
    info!("Created session {}", created.id);
    Ok(Json(created))
}

#[derive(Deserialize)]
pub struct SessionListQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<SessionListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let offset = query.offset.unwrap_or(0).max(0);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let (sessions, total) = state.session_repo.list_paginated(offset, limit).await?;
    Ok(Json(SessionListResponse { sessions, total }))
}

pub async fn update_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if let Some(program_id) = payload.program_id {
        state.program_repo.find_by_id(&program_id).await?
            .ok_or(AppError::Validation("Selected program does not exist".into()))?;
        session.program_id = program_id;
    }
    if let Some(venue_id) = payload.venue_id {
        state.venue_repo.find_by_id(&venue_id).await?
            .ok_or(AppError::Validation("Selected venue does not exist".into()))?;
        session.venue_id = venue_id;
    }
    if let Some(contact_id) = payload.contact_id {
        state.contact_repo.find_by_id(&contact_id).await?
            .ok_or(AppError::Validation("Selected contact does not exist".into()))?;
        session.contact_id = contact_id;
    }

    if let Some(ref start) = payload.start_date {
        session.start_date = parse_date(start, "start date")?;
    }
    if let Some(ref end) = payload.end_date {
        session.end_date = if end.is_empty() {
            None
        } else {
            Some(parse_date(end, "end date")?)
        };
    }
    if let Some(ref time) = payload.start_time {
        session.start_time = if time.is_empty() {
            None
        } else {
            Some(parse_time(time, "start time")?)
        };
    }
    if let Some(ref time) = payload.end_time {
        session.end_time = if time.is_empty() {
            None
        } else {
            Some(parse_time(time, "end time")?)
        };
    }
    if let Some(language) = payload.language {
        session.language = if language.is_empty() { None } else { Some(language) };
    }
    if let Some(flag) = payload.is_published {
        session.is_published = flag;
    }
    if let Some(flag) = payload.registrations_allowed {
        session.registrations_allowed = flag;
    }
    if let Some(link) = payload.registration_link {
        session.registration_link = if link.is_empty() { None } else { Some(link) };
    }
    if let Some(flag) = payload.open_without_registration {
        session.open_without_registration = flag;
    }

    validate_date_range(&session)?;

    let updated = state.session_repo.update(&session).await?;
    info!("Updated session {}", id);
    Ok(Json(updated))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.session_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    state.session_repo.delete(&id).await?;
    info!("Deleted session {}", id);
    Ok(Json(json!({ "status": "deleted" })))
}
