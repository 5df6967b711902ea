//! Public booking form, admin inbox and the confirm-and-schedule flow.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, days_from_now, get_auth, post_json, post_json_auth, put_json_auth, token_for_role,
};
use serde_json::{json, Value};
use sqlx::PgPool;

fn booking_body(date: &str, time: &str) -> Value {
    json!({
        "full_name": "Amina Diallo",
        "email": "amina@example.org",
        "phone": "+221 77 123 45 67",
        "preferred_date": date,
        "preferred_time": time,
        "service_type": "prenatal-checkup",
        "notes": "First visit"
    })
}

async fn submit_booking(app: axum::Router, date: &str, time: &str) -> i64 {
    let response = post_json(app, "/api/public/bookings", booking_body(date, time)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    json["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_fields_are_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/public/bookings", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let mut body = booking_body(&days_from_now(3), "09:00:00");
    body["phone"] = json!("");
    let response = post_json(app, "/api/public/bookings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn past_date_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = booking_body(&days_from_now(-1), "09:00:00");
    let response = post_json(app, "/api/public/bookings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_can_clear_optional_details(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for_role(&pool, app.clone(), "nurse").await;
    let id = submit_booking(app.clone(), &days_from_now(4), "09:00:00").await;

    let response = put_json_auth(
        app,
        &format!("/api/admin/bookings/{id}"),
        json!({ "email": null, "notes": null }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["email"].is_null());
    assert!(json["data"]["notes"].is_null());
    assert_eq!(json["data"]["full_name"], "Amina Diallo");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn confirming_creates_linked_appointment(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for_role(&pool, app.clone(), "nurse").await;
    let date = days_from_now(5);
    let id = submit_booking(app.clone(), &date, "10:00:00").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/bookings/{id}/status"),
        json!({ "status": "confirmed", "admin_notes": "Call the day before" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.get("warning").is_none());

    let booking = &json["data"]["booking"];
    let appointment = &json["data"]["appointment"];
    assert_eq!(booking["status"], "confirmed");
    assert!(booking["confirmed_at"].is_string());
    assert_eq!(appointment["booking_id"], id);
    assert_eq!(booking["appointment_id"], appointment["id"]);
    assert_eq!(appointment["appointment_date"], date.as_str());
    assert_eq!(appointment["patient_name"], "Amina Diallo");
    assert_eq!(appointment["status"], "scheduled");

    // Reload shows the persisted status and link.
    let response = get_auth(app, &format!("/api/admin/bookings/{id}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "confirmed");
    assert_eq!(json["data"]["appointment"]["id"], appointment["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn conflicting_confirm_keeps_status_with_warning(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for_role(&pool, app.clone(), "admin").await;
    let date = days_from_now(6);

    // Occupy 10:00-10:30 on the calendar.
    let response = post_json_auth(
        app.clone(),
        "/api/admin/appointments",
        json!({
            "patient_name": "Existing Patient",
            "appointment_date": date,
            "start_time": "10:00:00",
            "duration_minutes": 30,
            "service_type": "consultation"
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let id = submit_booking(app.clone(), &date, "10:15:00").await;
    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/bookings/{id}/status"),
        json!({ "status": "confirmed" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["warning"].is_string());
    assert_eq!(json["data"]["booking"]["status"], "confirmed");
    assert!(json["data"]["appointment"].is_null());
    assert!(json["data"]["booking"]["appointment_id"].is_null());

    // Retrying with a free slot succeeds.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/admin/bookings/{id}/appointment"),
        json!({ "start_time": "11:00:00" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["appointment"]["start_time"], "11:00:00");
    assert_eq!(
        json["data"]["booking"]["appointment_id"],
        json["data"]["appointment"]["id"]
    );

    // A second retry is a conflict: the link already exists.
    let response = post_json_auth(
        app,
        &format!("/api/admin/bookings/{id}/appointment"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_transition_is_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for_role(&pool, app.clone(), "nurse").await;
    let id = submit_booking(app.clone(), &days_from_now(2), "09:00:00").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/bookings/{id}/status"),
        json!({ "status": "completed" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(
        app,
        &format!("/api/admin/bookings/{id}/status"),
        json!({ "status": "teleported" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cancelling_cancels_scheduled_appointment(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for_role(&pool, app.clone(), "nurse").await;
    let id = submit_booking(app.clone(), &days_from_now(4), "14:00:00").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/bookings/{id}/status"),
        json!({ "status": "confirmed" }),
        &token,
    )
    .await;
    let appointment_id = body_json(response).await["data"]["appointment"]["id"]
        .as_i64()
        .unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/bookings/{id}/status"),
        json!({ "status": "cancelled" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["booking"]["status"], "cancelled");
    assert_eq!(json["data"]["appointment"]["status"], "cancelled");

    let response = get_auth(
        app,
        &format!("/api/admin/appointments/{appointment_id}"),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["status"], "cancelled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_paginated_and_filterable(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for_role(&pool, app.clone(), "nurse").await;
    let date = days_from_now(3);
    for hour in 8..13 {
        submit_booking(app.clone(), &date, &format!("{hour:02}:00:00")).await;
    }

    let response = get_auth(app.clone(), "/api/admin/bookings?page=2&limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["total"], 5);
    assert_eq!(json["pagination"]["total_pages"], 3);
    assert_eq!(json["pagination"]["has_next"], true);

    let response = get_auth(app.clone(), "/api/admin/bookings?status=confirmed", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 0);

    let response = get_auth(app, "/api/admin/bookings?status=bogus", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
