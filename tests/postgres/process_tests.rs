//! Process catalogue persistence tests.

use super::helpers::{postgres_app, unique_name};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn process_round_trips_through_postgres() {
    let app = postgres_app().await;
    let name = unique_name("Leave request");
    let uid = app.create_process(&name).await;

    let response = app.get(&format!("/processes/{uid}")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["uid"], uid.as_str());
    assert_eq!(response.body["name"], name.as_str());
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn duplicate_process_name_is_rejected_by_postgres() {
    let app = postgres_app().await;
    let name = unique_name("Onboarding");
    app.create_process(&name).await;

    let response = app.post("/processes", &json!({ "name": name })).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["errors"]["name"].is_array());
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn process_listing_filters_by_name() {
    let app = postgres_app().await;
    let name = unique_name("Purchase order");
    app.create_process(&name).await;

    let response = app
        .get(&format!("/processes?filter={}", name.replace(' ', "%20")))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["meta"]["total"], 1);
    assert_eq!(response.body["data"][0]["name"], name.as_str());
}
