use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::dtos::responses::{
    CitySessionsResponse, ProgramSummary, ProgramVenuesResponse, PublicProgramsResponse,
};
use crate::domain::models::program::Program;
use crate::domain::models::session::SessionCard;
use crate::domain::ports::SessionDateFilter;
use crate::domain::services::listing::get_public_programs;
use crate::domain::services::slug::slugify;
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: usize = 6;
const MAX_PAGE_SIZE: usize = 50;

/// Slug that means "do not filter by program" on the city sessions listing.
const ALL_PROGRAMS_SLUG: &str = "all-programs";

#[derive(Deserialize)]
pub struct ProgramsQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

fn parse_non_negative(value: Option<&str>, fallback: usize) -> usize {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(fallback)
}

pub async fn list_public_programs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProgramsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let offset = parse_non_negative(query.offset.as_deref(), 0);
    let limit = parse_non_negative(query.limit.as_deref(), DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let today = Local::now().date_naive();
    let page = get_public_programs(
        state.program_repo.as_ref(),
        state.session_repo.as_ref(),
        today,
        offset,
        limit,
    )
    .await?;

    Ok(Json(PublicProgramsResponse {
        programs: page.programs,
        has_more: page.has_more,
    }))
}

/// Program lookup by slug, falling back to id for legacy links. Responses
/// always carry the canonical slug so callers can self-correct.
async fn find_program(state: &AppState, slug_or_id: &str) -> Result<Program, AppError> {
    if let Some(program) = state.program_repo.find_by_slug(slug_or_id).await? {
        return Ok(program);
    }
    state
        .program_repo
        .find_by_id(slug_or_id)
        .await?
        .ok_or(AppError::NotFound("Program not found".into()))
}

/// Session queries for a program include its children in place of the parent
/// when any exist; the parent itself is only queried when it has no children.
async fn rollup_program_ids(state: &AppState, program: &Program) -> Result<Vec<String>, AppError> {
    let children = state.program_repo.list_children(&program.id).await?;
    if children.is_empty() {
        Ok(vec![program.id.clone()])
    } else {
        Ok(children.into_iter().map(|c| c.id).collect())
    }
}

pub async fn list_program_venues(
    State(state): State<Arc<AppState>>,
    Path(program_slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let program = find_program(&state, program_slug.trim()).await?;
    let program_ids = rollup_program_ids(&state, &program).await?;

    let today = Local::now().date_naive();
    let venue_ids = state
        .session_repo
        .list_venue_ids_for_programs(&program_ids, today)
        .await?;

    let venues = if venue_ids.is_empty() {
        Vec::new()
    } else {
        state.venue_repo.list_by_ids_with_city(&venue_ids).await?
    };

    Ok(Json(ProgramVenuesResponse {
        program: ProgramSummary {
            id: program.id,
            name: program.name,
            slug: program.slug,
        },
        venues,
    }))
}

#[derive(Deserialize)]
pub struct CitySessionsQuery {
    pub venue: Option<String>,
    pub date: Option<String>,
}

fn normalize_slug(value: &str) -> String {
    value.trim().to_lowercase()
}

/// City grouping for a session card: the stored city slug when present, else
/// the slug derived from the city name, else "other" for venues with no city.
fn card_matches_city(card: &SessionCard, target: &str) -> bool {
    if let Some(db_slug) = card.city_slug.as_deref() {
        if normalize_slug(db_slug) == target {
            return true;
        }
    }
    let derived = match card.city_name.as_deref() {
        Some(name) => slugify(name),
        None => slugify("Other"),
    };
    derived == target
}

pub async fn list_city_sessions(
    State(state): State<Arc<AppState>>,
    Path((program_slug, city_slug)): Path<(String, String)>,
    Query(query): Query<CitySessionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let program_ids = if normalize_slug(&program_slug) == ALL_PROGRAMS_SLUG {
        None
    } else {
        let program = find_program(&state, program_slug.trim()).await?;
        Some(rollup_program_ids(&state, &program).await?)
    };

    // A pinned date (from a share link) replaces the upcoming filter.
    let filter = match query.date.as_deref() {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::Validation("Invalid date (expected YYYY-MM-DD)".into()))?;
            SessionDateFilter::On(date)
        }
        None => SessionDateFilter::OnOrAfter(Local::now().date_naive()),
    };

    let cards = state
        .session_repo
        .list_published_cards(filter, program_ids.as_deref())
        .await?;

    let target_city = normalize_slug(&city_slug);
    let mut sessions: Vec<SessionCard> = cards
        .into_iter()
        .filter(|card| card_matches_city(card, &target_city))
        .collect();

    if let Some(venue_slug) = query.venue.as_deref() {
        let venue_slug = normalize_slug(venue_slug);
        sessions.retain(|card| normalize_slug(&card.venue_slug) == venue_slug);
    }

    let city_display_name = sessions
        .first()
        .and_then(|card| card.city_name.clone())
        .unwrap_or_else(|| city_slug.clone());

    Ok(Json(CitySessionsResponse {
        city: city_display_name,
        sessions,
    }))
}
