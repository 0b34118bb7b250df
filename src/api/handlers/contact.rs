use axum::{extract::{Path, State}, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateContactRequest, UpdateContactRequest};
use crate::api::extractors::admin::AdminUser;
use crate::domain::models::contact::Contact;
use crate::error::AppError;
use crate::state::AppState;

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let v = v.trim().to_string();
        if v.is_empty() { None } else { Some(v) }
    })
}

pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Contact name is required".into()));
    }

    if let Some(ref city_id) = payload.city_id {
        state.city_repo.find_by_id(city_id).await?
            .ok_or(AppError::Validation("Selected city does not exist".into()))?;
    }

    let mut contact = Contact::new(name);
    contact.email = none_if_empty(payload.email);
    contact.phone = none_if_empty(payload.phone);
    contact.whatsapp = none_if_empty(payload.whatsapp);
    contact.city_id = payload.city_id;

    let created = state.contact_repo.create(&contact).await?;
    info!("Created contact {}", created.id);
    Ok(Json(created))
}

pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let contacts = state.contact_repo.list().await?;
    Ok(Json(contacts))
}

pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut contact = state.contact_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Contact not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Contact name cannot be empty".into()));
        }
        contact.name = name;
    }

    if payload.email.is_some() {
        contact.email = none_if_empty(payload.email);
    }
    if payload.phone.is_some() {
        contact.phone = none_if_empty(payload.phone);
    }
    if payload.whatsapp.is_some() {
        contact.whatsapp = none_if_empty(payload.whatsapp);
    }
    if let Some(city_id) = payload.city_id {
        state.city_repo.find_by_id(&city_id).await?
            .ok_or(AppError::Validation("Selected city does not exist".into()))?;
        contact.city_id = Some(city_id);
    }

    let updated = state.contact_repo.update(&contact).await?;
    info!("Updated contact {}", id);
    Ok(Json(updated))
}

pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.contact_repo.delete(&id).await?;
    info!("Deleted contact {}", id);
    Ok(Json(json!({ "status": "deleted" })))
}
