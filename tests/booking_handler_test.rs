mod common;

use axum::http::StatusCode;
use common::{details, send, setup_app};
use serde_json::{json, Value};
use veloria_backend::model::booking::BookingStatus;

fn booking_body(date: &str, time: &str) -> Value {
    json!({
        "name": "Ana Souza",
        "email": "Ana@Acme.test",
        "company": "Acme",
        "date": date,
        "time": time,
        "timezone": "Europe/Lisbon",
        "callType": "video",
        "projectType": "E-commerce"
    })
}

async fn create_booking(app: &common::TestApp, date: &str, time: &str) -> String {
    let resp = send(app, "POST", "/api/bookings", Some(booking_body(date, time)), false).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    resp.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_booking() {
    let (app, notifier) = setup_app();
    let resp = send(&app, "POST", "/api/bookings", Some(booking_body("2026-11-20", "10:00")), false).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["data"]["status"], "scheduled");
    assert_eq!(resp.body["data"]["callType"], "video");
    assert_eq!(notifier.sent().len(), 2);
}

#[tokio::test]
async fn test_create_booking_validation() {
    let (app, _) = setup_app();
    let mut body = booking_body("2026-13-40", "25:99");
    body.as_object_mut().unwrap().remove("callType");
    let resp = send(&app, "POST", "/api/bookings", Some(body), false).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let details = details(&resp.body);
    assert!(details.contains("date"));
    assert!(details.contains("time"));
    assert!(details.contains("callType is required"));
    assert_eq!(app.bookings.len(), 0);
}

#[tokio::test]
async fn test_double_booking_is_a_conflict() {
    let (app, _) = setup_app();
    create_booking(&app, "2026-11-20", "10:00").await;
    let resp = send(&app, "POST", "/api/bookings", Some(booking_body("2026-11-20", "10:00")), false).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(app.bookings.len(), 1);

    // Another time on the same day is fine
    create_booking(&app, "2026-11-20", "11:00").await;
}

#[tokio::test]
async fn test_unpadded_date_and_time_name_the_same_slot() {
    let (app, _) = setup_app();
    create_booking(&app, "2026-11-20", "09:30").await;
    let resp = send(&app, "POST", "/api/bookings", Some(booking_body("2026-11-20", "9:30")), false).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);

    create_booking(&app, "2026-11-05", "10:00").await;
    let resp = send(&app, "POST", "/api/bookings", Some(booking_body("2026-11-5", "10:00")), false).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(app.bookings.len(), 2);

    let resp = send(&app, "GET", "/api/bookings/availability?date=2026-11-5", None, false).await;
    assert_eq!(resp.body["data"]["date"], "2026-11-05");
    assert_eq!(resp.body["data"]["bookedTimes"], json!(["10:00"]));
}

#[tokio::test]
async fn test_unpadded_time_is_stored_padded() {
    let (app, _) = setup_app();
    let resp = send(&app, "POST", "/api/bookings", Some(booking_body("2026-11-5", "9:05")), false).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["data"]["date"], "2026-11-05");
    assert_eq!(resp.body["data"]["time"], "09:05");
}

#[tokio::test]
async fn test_cancel_with_wrong_email_is_forbidden() {
    let (app, _) = setup_app();
    let id = create_booking(&app, "2026-11-20", "10:00").await;
    let resp = send(
        &app,
        "PATCH",
        &format!("/api/bookings/cancel/{}", id),
        Some(json!({ "email": "someone@else.test" })),
        false,
    )
    .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(app.bookings.all()[0].status, BookingStatus::Scheduled);
}

#[tokio::test]
async fn test_cancel_with_matching_email_frees_slot() {
    let (app, notifier) = setup_app();
    let id = create_booking(&app, "2026-11-20", "10:00").await;
    let resp = send(
        &app,
        "PATCH",
        &format!("/api/bookings/cancel/{}", id),
        Some(json!({ "email": "  ana@acme.TEST " })),
        false,
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["data"]["status"], "cancelled");
    assert!(notifier.sent().iter().any(|(kind, _)| kind == "booking-cancelled"));

    let resp = send(&app, "GET", "/api/bookings/availability?date=2026-11-20", None, false).await;
    assert_eq!(resp.body["data"]["bookedTimes"], json!([]));

    create_booking(&app, "2026-11-20", "10:00").await;
}

#[tokio::test]
async fn test_cancel_unknown_booking_is_not_found() {
    let (app, _) = setup_app();
    let resp = send(
        &app,
        "PATCH",
        &format!("/api/bookings/cancel/{}", bson::oid::ObjectId::new()),
        Some(json!({ "email": "ana@acme.test" })),
        false,
    )
    .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_lists_held_times() {
    let (app, _) = setup_app();
    create_booking(&app, "2026-11-20", "14:30").await;
    create_booking(&app, "2026-11-20", "09:00").await;
    create_booking(&app, "2026-11-21", "09:00").await;

    let resp = send(&app, "GET", "/api/bookings/availability?date=2026-11-20", None, false).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["data"]["bookedTimes"], json!(["09:00", "14:30"]));

    let resp = send(&app, "GET", "/api/bookings/availability?date=tomorrow", None, false).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_status_change_is_visible_on_get() {
    let (app, _) = setup_app();
    let id = create_booking(&app, "2026-11-20", "10:00").await;
    let resp = send(&app, "PATCH", &format!("/admin/bookings/{}", id), Some(json!({ "status": "completed" })), true).await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = send(&app, "GET", &format!("/admin/bookings/{}", id), None, true).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["data"]["status"], "completed");
}

#[tokio::test]
async fn test_admin_reschedule() {
    let (app, _) = setup_app();
    let id = create_booking(&app, "2026-11-20", "10:00").await;
    create_booking(&app, "2026-11-20", "11:00").await;

    // Moving onto a held slot conflicts
    let resp = send(&app, "PATCH", &format!("/admin/bookings/{}", id), Some(json!({ "time": "11:00" })), true).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);

    let resp = send(
        &app,
        "PATCH",
        &format!("/admin/bookings/{}", id),
        Some(json!({ "date": "2026-11-23", "time": "15:00", "meetingLink": "https://meet.test/abc" })),
        true,
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["data"]["status"], "rescheduled");
    assert_eq!(resp.body["data"]["date"], "2026-11-23");
    assert_eq!(resp.body["data"]["meetingLink"], "https://meet.test/abc");
}

#[tokio::test]
async fn test_restoring_cancelled_booking_onto_taken_slot_is_a_conflict() {
    let (app, _) = setup_app();
    let first = create_booking(&app, "2026-11-20", "10:00").await;
    let resp = send(
        &app,
        "PATCH",
        &format!("/api/bookings/cancel/{}", first),
        Some(json!({ "email": "ana@acme.test" })),
        false,
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    create_booking(&app, "2026-11-20", "10:00").await;

    let uri = format!("/admin/bookings/{}", first);
    let resp = send(&app, "PATCH", &uri, Some(json!({ "status": "scheduled" })), true).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    let held = app.bookings.all().iter().filter(|b| b.status.holds_slot()).count();
    assert_eq!(held, 1);

    // A free slot can be restored
    let resp = send(&app, "PATCH", &uri, Some(json!({ "status": "scheduled", "time": "11:00" })), true).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["data"]["time"], "11:00");
}

#[tokio::test]
async fn test_admin_reschedule_pads_time() {
    let (app, _) = setup_app();
    create_booking(&app, "2026-11-20", "09:30").await;
    let id = create_booking(&app, "2026-11-20", "11:00").await;
    let uri = format!("/admin/bookings/{}", id);
    let resp = send(&app, "PATCH", &uri, Some(json!({ "time": "9:30" })), true).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_create_booking_skips_notifications() {
    let (app, notifier) = setup_app();
    let resp = send(&app, "POST", "/admin/bookings", Some(booking_body("2026-11-20", "10:00")), true).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_admin_booking_list_and_stats() {
    let (app, _) = setup_app();
    let id = create_booking(&app, "2026-11-20", "10:00").await;
    create_booking(&app, "2026-11-21", "10:00").await;
    send(&app, "PATCH", &format!("/admin/bookings/{}", id), Some(json!({ "status": "cancelled" })), true).await;

    let resp = send(&app, "GET", "/admin/bookings?date=2026-11-21", None, true).await;
    assert_eq!(resp.body["data"]["total"], 1);

    let resp = send(&app, "GET", "/admin/bookings/stats", None, true).await;
    assert_eq!(
        resp.body["data"],
        json!({ "scheduled": 1, "completed": 0, "cancelled": 1, "rescheduled": 0 })
    );
}

#[tokio::test]
async fn test_admin_delete_booking() {
    let (app, _) = setup_app();
    let id = create_booking(&app, "2026-11-20", "10:00").await;
    let resp = send(&app, "DELETE", &format!("/admin/bookings/{}", id), None, true).await;
    assert_eq!(resp.status, StatusCode::OK);
    let resp = send(&app, "GET", &format!("/admin/bookings/{}", id), None, true).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
