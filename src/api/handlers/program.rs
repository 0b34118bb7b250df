use axum::{extract::{Path, State}, response::IntoResponse, Json};
use rand::Rng;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateProgramRequest, UpdateProgramRequest};
use crate::api::extractors::admin::AdminUser;
use crate::domain::models::program::Program;
use crate::domain::services::slug::slugify;
use crate::error::AppError;
use crate::state::AppState;

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let v = v.trim().to_string();
        if v.is_empty() { None } else { Some(v) }
    })
}

/// Soft card background colour assigned once at creation time.
fn generate_pastel_colour() -> String {
    let hue: u16 = rand::thread_rng().gen_range(0..360);
    format!("hsl({hue}, 70%, 85%)")
}

pub async fn create_program(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateProgramRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Program name is required".into()));
    }

    if let Some(ref parent_id) = payload.parent_id {
        state.program_repo.find_by_id(parent_id).await?
            .ok_or(AppError::Validation("Parent program does not exist".into()))?;
    }

    let mut program = Program::new(name.clone(), slugify(&name));
    program.parent_id = payload.parent_id;
    program.image_url = none_if_empty(payload.image_url);
    program.sub_text = none_if_empty(payload.sub_text);
    program.colour = Some(generate_pastel_colour());
    program.details_external = payload.details_external.unwrap_or(false);
    program.external_link = none_if_empty(payload.external_link);

    let created = state.program_repo.create(&program).await?;
    info!("Created program {}", created.id);
    Ok(Json(created))
}

pub async fn list_programs(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let programs = state.program_repo.list().await?;
    Ok(Json(programs))
}

pub async fn update_program(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProgramRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut program = state.program_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Program not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Program name cannot be empty".into()));
        }
        program.slug = slugify(&name);
        program.name = name;
    }

    // An empty string detaches the program from its parent, mirroring how the
    // other optional fields clear.
    if let Some(parent_id) = payload.parent_id {
        match none_if_empty(Some(parent_id)) {
            Some(parent_id) => {
                if parent_id == program.id {
                    return Err(AppError::Validation("A program cannot be its own parent".into()));
                }
                state.program_repo.find_by_id(&parent_id).await?
                    .ok_or(AppError::Validation("Parent program does not exist".into()))?;
                program.parent_id = Some(parent_id);
            }
            None => program.parent_id = None,
        }
    }

    if payload.image_url.is_some() {
        program.image_url = none_if_empty(payload.image_url);
    }
    if payload.sub_text.is_some() {
        program.sub_text = none_if_empty(payload.sub_text);
    }
    if let Some(flag) = payload.details_external {
        program.details_external = flag;
    }
    if payload.external_link.is_some() {
        program.external_link = none_if_empty(payload.external_link);
    }

    let updated = state.program_repo.update(&program).await?;
    info!("Updated program {}", id);
    Ok(Json(updated))
}

pub async fn delete_program(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.program_repo.delete(&id).await?;
    info!("Deleted program {}", id);
    Ok(Json(json!({ "status": "deleted" })))
}
