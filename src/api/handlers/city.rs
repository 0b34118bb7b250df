use axum::{extract::{Path, State}, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateCityRequest, UpdateCityRequest};
use crate::api::extractors::admin::AdminUser;
use crate::domain::models::city::City;
use crate::domain::services::slug::slugify;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_city(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateCityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("City name is required".into()));
    }

    let city = City::new(name.clone(), Some(slugify(&name)));
    let created = state.city_repo.create(&city).await?;

    info!("Created city {}", created.id);
    Ok(Json(created))
}

pub async fn list_cities(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let cities = state.city_repo.list().await?;
    Ok(Json(cities))
}

pub async fn update_city(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut city = state.city_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("City not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("City name cannot be empty".into()));
        }
        city.slug = Some(slugify(&name));
        city.name = name;
    }

    let updated = state.city_repo.update(&city).await?;
    info!("Updated city {}", id);
    Ok(Json(updated))
}

pub async fn delete_city(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.city_repo.delete(&id).await?;
    info!("Deleted city {}", id);
    Ok(Json(json!({ "status": "deleted" })))
}
