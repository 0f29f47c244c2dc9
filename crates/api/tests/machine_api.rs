//! HTTP-level integration tests for the machine endpoints.
//!
//! Time-dependent scenarios inject a `ManualClock` so session countdowns are
//! deterministic.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, post_raw, T0};
use laundry_core::clock::ManualClock;
use serde_json::json;
use sqlx::SqlitePool;

/// Create one location plus one default washer and return `(location_id, machine_id)`.
async fn seed(pool: &SqlitePool) -> (i64, i64) {
    let location = common::create_location(common::build_test_app(pool.clone()), "Dorm A").await;
    let machine = common::create_machine(
        common::build_test_app(pool.clone()),
        json!({"location_id": location}),
    )
    .await;
    (location, machine)
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_machine_returns_201(pool: SqlitePool) {
    let location = common::create_location(common::build_test_app(pool.clone()), "Dorm A").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/machines/create/",
        json!({"location_id": location, "washer": true, "status": 0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({
            "success": true,
            "data": {"id": 1, "location": location, "washer": true, "status": 0, "time_remaining": 0}
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_machine_defaults_to_available_washer(pool: SqlitePool) {
    let (_, machine) = seed(&pool).await;

    let app = common::build_test_app(pool);
    let body = body_json(get(app, &format!("/api/machines/{machine}/")).await).await;
    assert_eq!(body["data"]["washer"], true);
    assert_eq!(body["data"]["status"], 0);
    assert_eq!(body["data"]["time_remaining"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_machine_without_location_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/machines/create/", json!({"washer": false})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({
            "success": false,
            "error": "Could not create machine without specification of location ID."
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_machine_at_missing_location_returns_404_and_persists_nothing(
    pool: SqlitePool,
) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/machines/create/", json!({"location_id": 999})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "error": "Location with ID 999 not found."})
    );

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM machine")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_machine_with_out_of_range_status_returns_400(pool: SqlitePool) {
    let location = common::create_location(common::build_test_app(pool.clone()), "Dorm A").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/machines/create/",
        json!({"location_id": location, "status": 7}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_machine_with_mistyped_field_returns_400(pool: SqlitePool) {
    let location = common::create_location(common::build_test_app(pool.clone()), "Dorm A").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/machines/create/",
        json!({"location_id": location, "washer": "yes"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_machine_type(pool: SqlitePool) {
    let location = common::create_location(common::build_test_app(pool.clone()), "Dorm A").await;
    let dryer = common::create_machine(
        common::build_test_app(pool.clone()),
        json!({"location_id": location, "washer": false}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/machines/{dryer}/type/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"success": true, "data": {"washer": false}})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookups_on_missing_machine_return_404(pool: SqlitePool) {
    for suffix in ["", "type/", "time/", "status/"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, &format!("/api/machines/5/{suffix}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET .../5/{suffix}");
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": "Machine with ID 5 not found."})
        );
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_counts_down_and_expires(pool: SqlitePool) {
    let (_, machine) = seed(&pool).await;
    let clock = Arc::new(ManualClock::new(T0));

    let app = common::build_test_app_with_clock(pool.clone(), clock.clone());
    let response = post_json(
        app,
        &format!("/api/machines/{machine}/start/"),
        json!({"duration": 1800}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["time_remaining"], 1800);
    assert_eq!(body["data"]["status"], 1);

    clock.advance(600);
    let app = common::build_test_app_with_clock(pool.clone(), clock.clone());
    let body = body_json(get(app, &format!("/api/machines/{machine}/time/")).await).await;
    assert_eq!(body, json!({"success": true, "data": {"time_remaining": 1200}}));

    clock.set(T0 + 1801);
    let app = common::build_test_app_with_clock(pool.clone(), clock.clone());
    let body = body_json(get(app, &format!("/api/machines/{machine}/time/")).await).await;
    assert_eq!(body["data"]["time_remaining"], 0);

    let app = common::build_test_app_with_clock(pool, clock);
    let body = body_json(get(app, &format!("/api/machines/{machine}/status/")).await).await;
    assert_eq!(body, json!({"success": true, "data": {"status": 0}}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restarting_session_overwrites_timer(pool: SqlitePool) {
    let (_, machine) = seed(&pool).await;
    let clock = Arc::new(ManualClock::new(T0));

    let app = common::build_test_app_with_clock(pool.clone(), clock.clone());
    post_json(
        app,
        &format!("/api/machines/{machine}/start/"),
        json!({"duration": 1800}),
    )
    .await;

    clock.advance(100);
    let app = common::build_test_app_with_clock(pool, clock);
    let response = post_json(
        app,
        &format!("/api/machines/{machine}/start/"),
        json!({"duration": 60}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["time_remaining"], 60);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_start_without_integer_duration_returns_400_and_leaves_session(pool: SqlitePool) {
    let (_, machine) = seed(&pool).await;
    let uri = format!("/api/machines/{machine}/start/");

    for body in [
        json!({}),
        json!({"duration": null}),
        json!({"duration": "1800"}),
        json!({"duration": 1800.5}),
        json!({"duration": true}),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, &uri, body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(
            body_json(response).await["error"],
            "Could not start machine timer without specification of the session duration."
        );
    }

    let app = common::build_test_app(pool.clone());
    let response = post_raw(app, &uri, "not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (start, duration): (Option<i64>, Option<i64>) = sqlx::query_as(
        "SELECT last_session_start, last_session_duration FROM machine WHERE id = $1",
    )
    .bind(machine)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(start, None);
    assert_eq!(duration, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_start_on_missing_machine_returns_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/machines/3/start/", json!({"duration": 60})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Machine with ID 3 not found."
    );
}

// ---------------------------------------------------------------------------
// Broken override
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_broken_machine_stays_broken_during_session(pool: SqlitePool) {
    let location = common::create_location(common::build_test_app(pool.clone()), "Dorm A").await;
    let machine = common::create_machine(
        common::build_test_app(pool.clone()),
        json!({"location_id": location, "status": 2}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/machines/{machine}/start/"),
        json!({"duration": 300}),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], 2);
    assert_eq!(body["data"]["time_remaining"], 300);

    let app = common::build_test_app(pool);
    let body = body_json(get(app, &format!("/api/machines/{machine}/status/")).await).await;
    assert_eq!(body["data"]["status"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_status_resets_broken_machine(pool: SqlitePool) {
    let location = common::create_location(common::build_test_app(pool.clone()), "Dorm A").await;
    let machine = common::create_machine(
        common::build_test_app(pool.clone()),
        json!({"location_id": location, "status": 2}),
    )
    .await;
    let uri = format!("/api/machines/{machine}/status/");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &uri, json!({"status": 0})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], 0);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, &uri, json!({"status": 3})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/machines/99/status/", json!({"status": 0})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_machine_returns_deleted_machine(pool: SqlitePool) {
    let (location, machine) = seed(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/machines/{machine}/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!({"id": machine, "location": location, "washer": true, "status": 0, "time_remaining": 0})
    );

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/machines/{machine}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/machines/{machine}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
