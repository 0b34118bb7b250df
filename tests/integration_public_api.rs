mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};
use serde_json::json;

struct Fixtures {
    venue_id: String,
    contact_id: String,
}

async fn create(app: &TestApp, cookie: &str, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = app.request(Method::POST, uri, Some(cookie), Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK, "seeding {uri} failed");
    read_json(response).await
}

async fn seed_fixtures(app: &TestApp, cookie: &str) -> Fixtures {
    let city = create(app, cookie, "/api/v1/admin/cities", json!({ "name": "Kochi" })).await;
    let venue = create(
        app,
        cookie,
        "/api/v1/admin/venues",
        json!({ "name": "Isha Center", "city_id": city["id"] }),
    )
    .await;
    let contact = create(
        app,
        cookie,
        "/api/v1/admin/contacts",
        json!({ "name": "Priya", "phone": "+91 9999999999" }),
    )
    .await;

    Fixtures {
        venue_id: venue["id"].as_str().unwrap().to_string(),
        contact_id: contact["id"].as_str().unwrap().to_string(),
    }
}

async fn seed_program(app: &TestApp, cookie: &str, name: &str) -> String {
    let program = create(app, cookie, "/api/v1/admin/programs", json!({ "name": name })).await;
    program["id"].as_str().unwrap().to_string()
}

async fn seed_session(
    app: &TestApp,
    cookie: &str,
    fixtures: &Fixtures,
    program_id: &str,
    start_date: &str,
    published: bool,
) {
    create(
        app,
        cookie,
        "/api/v1/admin/sessions",
        json!({
            "program_id": program_id,
            "venue_id": fixtures.venue_id,
            "contact_id": fixtures.contact_id,
            "start_date": start_date,
            "is_published": published
        }),
    )
    .await;
}

#[tokio::test]
async fn public_programs_are_ordered_by_earliest_upcoming_session() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let fixtures = seed_fixtures(&app, &cookie).await;

    let yoga = seed_program(&app, &cookie, "Yoga Basics").await;
    let retreat = seed_program(&app, &cookie, "Spring Retreat").await;
    let breathwork = seed_program(&app, &cookie, "Breathwork").await;

    seed_session(&app, &cookie, &fixtures, &yoga, "2030-07-01", true).await;
    seed_session(&app, &cookie, &fixtures, &retreat, "2030-06-15", true).await;
    // A later session for the retreat must not displace its earliest date.
    seed_session(&app, &cookie, &fixtures, &retreat, "2030-08-01", true).await;
    // Unpublished sessions are invisible to the public listing.
    seed_session(&app, &cookie, &fixtures, &breathwork, "2030-05-01", false).await;

    let response = app
        .request(Method::GET, "/api/v1/public/programs", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    let names: Vec<&str> = body["programs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Spring Retreat", "Yoga Basics"]);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn public_programs_roll_child_sessions_up_to_parent() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let fixtures = seed_fixtures(&app, &cookie).await;

    let parent = seed_program(&app, &cookie, "Hatha Yoga").await;
    let child = create(
        &app,
        &cookie,
        "/api/v1/admin/programs",
        json!({ "name": "Hatha Yoga Weekend", "parent_id": parent }),
    )
    .await;
    let child_id = child["id"].as_str().unwrap().to_string();

    seed_session(&app, &cookie, &fixtures, &child_id, "2030-06-15", true).await;

    let response = app
        .request(Method::GET, "/api/v1/public/programs", None, None)
        .await;
    let body = read_json(response).await;
    let programs = body["programs"].as_array().unwrap();

    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0]["name"], "Hatha Yoga");
}

#[tokio::test]
async fn public_programs_include_external_programs_and_paginate() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let fixtures = seed_fixtures(&app, &cookie).await;

    let yoga = seed_program(&app, &cookie, "Yoga Basics").await;
    seed_session(&app, &cookie, &fixtures, &yoga, "2030-07-01", true).await;

    create(
        &app,
        &cookie,
        "/api/v1/admin/programs",
        json!({
            "name": "Angamardana",
            "details_external": true,
            "external_link": "https://example.org/angamardana"
        }),
    )
    .await;
    create(
        &app,
        &cookie,
        "/api/v1/admin/programs",
        json!({
            "name": "Bhuta Shuddhi",
            "details_external": true,
            "external_link": "https://example.org/bhuta-shuddhi"
        }),
    )
    .await;

    let response = app
        .request(Method::GET, "/api/v1/public/programs?limit=2", None, None)
        .await;
    let body = read_json(response).await;
    let names: Vec<&str> = body["programs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();

    // Session-linked programs first, then external ones alphabetically.
    assert_eq!(names, vec!["Yoga Basics", "Angamardana"]);
    assert_eq!(body["hasMore"], true);

    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs?offset=2&limit=2",
            None,
            None,
        )
        .await;
    let body = read_json(response).await;
    let names: Vec<&str> = body["programs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bhuta Shuddhi"]);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn public_programs_tolerate_garbage_pagination_params() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs?offset=abc&limit=-5",
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["programs"].as_array().unwrap().len(), 0);
    assert_eq!(body["hasMore"], false);

    // An offset at the top of the usize range must page empty, not panic.
    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs?offset=18446744073709551615",
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["programs"].as_array().unwrap().len(), 0);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn program_venues_lists_venues_with_upcoming_sessions() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let fixtures = seed_fixtures(&app, &cookie).await;

    let yoga = seed_program(&app, &cookie, "Yoga Basics").await;
    seed_session(&app, &cookie, &fixtures, &yoga, "2030-07-01", true).await;

    // A second venue with no sessions must not appear.
    let city = create(&app, &cookie, "/api/v1/admin/cities", json!({ "name": "Chennai" })).await;
    create(
        &app,
        &cookie,
        "/api/v1/admin/venues",
        json!({ "name": "Beach Hall", "city_id": city["id"] }),
    )
    .await;

    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs/yoga-basics/venues",
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    assert_eq!(body["program"]["slug"], "yoga-basics");
    let venues = body["venues"].as_array().unwrap();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0]["name"], "Isha Center");
    assert_eq!(venues[0]["city_name"], "Kochi");
}

#[tokio::test]
async fn program_venues_unknown_program_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs/nope/venues",
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn city_sessions_filter_by_city_venue_and_date() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let fixtures = seed_fixtures(&app, &cookie).await;

    let yoga = seed_program(&app, &cookie, "Yoga Basics").await;
    seed_session(&app, &cookie, &fixtures, &yoga, "2030-06-15", true).await;
    seed_session(&app, &cookie, &fixtures, &yoga, "2030-06-20", true).await;

    // Session in another city, should be filtered out.
    let chennai = create(&app, &cookie, "/api/v1/admin/cities", json!({ "name": "Chennai" })).await;
    let beach = create(
        &app,
        &cookie,
        "/api/v1/admin/venues",
        json!({ "name": "Beach Hall", "city_id": chennai["id"] }),
    )
    .await;
    create(
        &app,
        &cookie,
        "/api/v1/admin/sessions",
        json!({
            "program_id": yoga,
            "venue_id": beach["id"],
            "contact_id": fixtures.contact_id,
            "start_date": "2030-06-15",
            "is_published": true
        }),
    )
    .await;

    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs/yoga-basics/cities/kochi/sessions",
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["city"], "Kochi");
    assert_eq!(body["sessions"].as_array().unwrap().len(), 2);

    // Date pin keeps only the matching day.
    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs/yoga-basics/cities/kochi/sessions?venue=isha-center&date=2030-06-15",
            None,
            None,
        )
        .await;
    let body = read_json(response).await;
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["start_date"], "2030-06-15");
    assert_eq!(sessions[0]["venue_slug"], "isha-center");

    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs/yoga-basics/cities/kochi/sessions?date=15-06-2030",
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn city_sessions_all_programs_slug_skips_program_filter() {
    let app = TestApp::new().await;
    let cookie = app.login().await;
    let fixtures = seed_fixtures(&app, &cookie).await;

    let yoga = seed_program(&app, &cookie, "Yoga Basics").await;
    let retreat = seed_program(&app, &cookie, "Spring Retreat").await;
    seed_session(&app, &cookie, &fixtures, &yoga, "2030-06-15", true).await;
    seed_session(&app, &cookie, &fixtures, &retreat, "2030-06-16", true).await;

    let response = app
        .request(
            Method::GET,
            "/api/v1/public/programs/all-programs/cities/kochi/sessions",
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["sessions"].as_array().unwrap().len(), 2);
}
