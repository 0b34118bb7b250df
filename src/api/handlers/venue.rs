use axum::{extract::{Path, State}, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateVenueRequest, UpdateVenueRequest};
use crate::api::extractors::admin::AdminUser;
use crate::domain::models::venue::Venue;
use crate::domain::services::slug::slugify;
use crate::error::AppError;
use crate::state::AppState;

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let v = v.trim().to_string();
        if v.is_empty() { None } else { Some(v) }
    })
}

pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Venue name is required".into()));
    }

    state.city_repo.find_by_id(&payload.city_id).await?
        .ok_or(AppError::Validation("Selected city does not exist".into()))?;

    let mut venue = Venue::new(name.clone(), slugify(&name), payload.city_id);
    venue.address = none_if_empty(payload.address);
    venue.google_maps_url = none_if_empty(payload.google_maps_url);

    let created = state.venue_repo.create(&venue).await?;
    info!("Created venue {}", created.id);
    Ok(Json(created))
}

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let venues = state.venue_repo.list().await?;
    Ok(Json(venues))
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut venue = state.venue_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Venue name cannot be empty".into()));
        }
        venue.slug = slugify(&name);
        venue.name = name;
    }

    if let Some(city_id) = payload.city_id {
        state.city_repo.find_by_id(&city_id).await?
            .ok_or(AppError::Validation("Selected city does not exist".into()))?;
        venue.city_id = city_id;
    }

    if payload.address.is_some() {
        venue.address = none_if_empty(payload.address);
    }
    if payload.google_maps_url.is_some() {
        venue.google_maps_url = none_if_empty(payload.google_maps_url);
    }

    let updated = state.venue_repo.update(&venue).await?;
    info!("Updated venue {}", id);
    Ok(Json(updated))
}

pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.venue_repo.delete(&id).await?;
    info!("Deleted venue {}", id);
    Ok(Json(json!({ "status": "deleted" })))
}
