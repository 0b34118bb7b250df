use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, city, contact, health, program, public, session, share, venue};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Admin
        .route("/api/v1/admin/cities", post(city::create_city).get(city::list_cities))
        .route("/api/v1/admin/cities/{id}", put(city::update_city).delete(city::delete_city))
        .route("/api/v1/admin/venues", post(venue::create_venue).get(venue::list_venues))
        .route("/api/v1/admin/venues/{id}", put(venue::update_venue).delete(venue::delete_venue))
        .route("/api/v1/admin/contacts", post(contact::create_contact).get(contact::list_contacts))
        .route("/api/v1/admin/contacts/{id}", put(contact::update_contact).delete(contact::delete_contact))
        .route("/api/v1/admin/programs", post(program::create_program).get(program::list_programs))
        .route("/api/v1/admin/programs/{id}", put(program::update_program).delete(program::delete_program))
        .route("/api/v1/admin/sessions", post(session::create_session).get(session::list_sessions))
        .route("/api/v1/admin/sessions/{id}", put(session::update_session).delete(session::delete_session))

        // Public browsing
        .route("/api/v1/public/programs", get(public::list_public_programs))
        .route("/api/v1/public/programs/{program_slug}/venues", get(public::list_program_venues))
        .route("/api/v1/public/programs/{program_slug}/cities/{city_slug}/sessions", get(public::list_city_sessions))

        // Share links
        .route("/share/{token}", get(share::share_redirect))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
