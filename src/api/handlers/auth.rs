use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};
use tracing::info;

use crate::api::dtos::requests::LoginRequest;
use crate::error::AppError;
use crate::state::AppState;

const ADMIN_COOKIE: &str = "admin_token";

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.password != state.config.admin_password {
        return Err(AppError::Unauthorized);
    }

    let mut cookie = Cookie::new(ADMIN_COOKIE, state.config.admin_token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    info!("Admin logged in");
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn logout(cookies: Cookies) -> impl IntoResponse {
    let mut cookie = Cookie::new(ADMIN_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);

    Json(json!({ "status": "ok" }))
}
