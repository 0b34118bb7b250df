use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::domain::services::share_token::resolve_share_token;
use crate::state::AppState;

const DEFAULT_LISTING: &str = "/programs";

/// 302 Found; shared links must stay GETs, and the original endpoint used 302.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Resolve a `{programSlug}-{citySlug}-{venueSlug}-{YYYY-MM-DD}` share token
/// to the canonical filtered listing URL. A broken deep link degrades to the
/// default programs listing instead of an error page, so this endpoint always
/// redirects and never returns a body.
pub async fn share_redirect(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Response {
    let resolved = resolve_share_token(
        state.program_repo.as_ref(),
        state.venue_repo.as_ref(),
        token.trim(),
    )
    .await;

    match resolved {
        Ok(Some(target)) => {
            info!(
                program = %target.program_slug,
                city = %target.city_slug,
                venue = %target.venue_slug,
                "resolved share token"
            );
            found(format!(
                "/programs/{}/centers/{}?venue={}&date={}",
                target.program_slug,
                target.city_slug,
                target.venue_slug,
                target.date.format("%Y-%m-%d"),
            ))
        }
        _ => found(DEFAULT_LISTING.to_string()),
    }
}
