//! Canceled-request persistence tests.
//!
//! Purges are always scoped to a process created by the test so parallel
//! runs against a shared database do not interfere.

use super::helpers::{postgres_app, unique_token};
use axum::http::StatusCode;
use serde_json::{Value, json};

fn cancellation(app_uid: &str, process_uid: &str, minute: u32) -> Value {
    json!({
        "app_uid": app_uid,
        "app_number": 7,
        "app_title": "Expense claim #7",
        "pro_uid": process_uid,
        "pro_id": 3,
        "app_pro_title": "Expense claim",
        "tas_uid": "TASAPPROVE",
        "tas_id": 5,
        "app_tas_title": "Approve",
        "usr_uid": "USRAPPROVER",
        "usr_id": 12,
        "del_index": 2,
        "del_previous_usr_uid": "USRCLERK",
        "del_current_usr_username": "jdoe",
        "del_current_usr_firstname": "Jo",
        "del_current_usr_lastname": "Doe",
        "del_delegate_date": "2026-05-01T09:00:00Z",
        "del_init_date": "2026-05-01T09:30:00Z",
        "del_due_date": "2026-05-03T17:00:00Z",
        "del_priority": "4",
        "app_canceled_date": format!("2026-05-02T11:{minute:02}:00Z"),
    })
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn every_column_round_trips_through_postgres() {
    let app = postgres_app().await;
    let app_uid = unique_token();
    let body = cancellation(&app_uid, &unique_token(), 15);

    let created = app.post("/canceled-requests", &body).await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);

    let fetched = app.get(&format!("/canceled-requests/{app_uid}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let stored = fetched.body.as_object().expect("object body");
    for (column, value) in body.as_object().expect("object payload") {
        assert_eq!(stored.get(column), Some(value), "column {column}");
    }
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn duplicate_application_is_rejected_by_postgres() {
    let app = postgres_app().await;
    let app_uid = unique_token();
    let process = unique_token();
    let first = app
        .post("/canceled-requests", &cancellation(&app_uid, &process, 1))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .post("/canceled-requests", &cancellation(&app_uid, &process, 2))
        .await;

    assert_eq!(second.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(second.body["errors"]["app_uid"].is_array());
    let stored = app.get(&format!("/canceled-requests/{app_uid}")).await;
    assert_eq!(stored.body["app_canceled_date"], "2026-05-02T11:01:00Z");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn process_listing_is_newest_first_and_purge_is_scoped() {
    let app = postgres_app().await;
    let process = unique_token();
    let bystander = unique_token();
    let older = unique_token();
    let newer = unique_token();
    for (uid, process_uid, minute) in [
        (&older, &process, 10),
        (&newer, &process, 40),
        (&bystander, &bystander, 20),
    ] {
        let response = app
            .post("/canceled-requests", &cancellation(uid, process_uid, minute))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let listed = app
        .get(&format!("/canceled-requests?process_uid={process}"))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["meta"]["total"], 2);
    assert_eq!(listed.body["data"][0]["app_uid"], newer.as_str());
    assert_eq!(listed.body["data"][1]["app_uid"], older.as_str());

    let purged = app
        .delete(&format!("/canceled-requests?process_uid={process}"))
        .await;
    assert_eq!(purged.status, StatusCode::OK);
    assert_eq!(purged.body, json!({ "purged": 2 }));

    let survivor = app.get(&format!("/canceled-requests/{bystander}")).await;
    assert_eq!(survivor.status, StatusCode::OK);
}
