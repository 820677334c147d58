//! Script persistence tests.

use super::helpers::{postgres_app, unique_name, unique_token};
use axum::http::StatusCode;
use serde_json::{Value, json};

fn script_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Computes the leave balance",
        "language": "php",
        "code": "<?php return 1;",
    })
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn script_lifecycle_round_trips_through_postgres() {
    let app = postgres_app().await;
    let process = app.create_process(&unique_name("Leave request")).await;
    let title = unique_name("Balance");
    let base = format!("/processes/{process}/scripts");

    let created = app.post(&base, &script_body(&title)).await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    let uid = created.body["uid"].as_str().expect("uid").to_owned();

    let updated = app
        .put(&format!("{base}/{uid}"), &json!({ "language": "python" }))
        .await;
    assert_eq!(updated.status, StatusCode::NO_CONTENT);

    let fetched = app.get(&format!("{base}/{uid}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["title"], title.as_str());
    assert_eq!(fetched.body["language"], "python");
    assert_eq!(fetched.body["code"], "<?php return 1;");

    let deleted = app.delete(&format!("{base}/{uid}")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let missing = app.get(&format!("{base}/{uid}")).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn script_titles_are_unique_across_processes() {
    let app = postgres_app().await;
    let first = app.create_process(&unique_name("Leave request")).await;
    let second = app.create_process(&unique_name("Expense claim")).await;
    let title = unique_name("Shared");

    let created = app
        .post(&format!("/processes/{first}/scripts"), &script_body(&title))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let clash = app
        .post(&format!("/processes/{second}/scripts"), &script_body(&title))
        .await;
    assert_eq!(clash.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(clash.body["errors"]["title"].is_array());
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires PALLADIO_TEST_DATABASE_URL"]
async fn scripts_are_listed_per_process_with_filter() {
    let app = postgres_app().await;
    let process = app.create_process(&unique_name("Leave request")).await;
    let other = app.create_process(&unique_name("Expense claim")).await;
    let token = unique_token();
    for title in [format!("Alpha {token}"), format!("Beta {token}")] {
        let response = app
            .post(&format!("/processes/{process}/scripts"), &script_body(&title))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
    let foreign = app
        .post(
            &format!("/processes/{other}/scripts"),
            &script_body(&format!("Gamma {token}")),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::CREATED);

    let response = app
        .get(&format!(
            "/processes/{process}/scripts?filter={token}&sort_by=title&sort_order=desc"
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["meta"]["total"], 2);
    assert_eq!(response.body["data"][0]["title"], format!("Beta {token}"));
    assert_eq!(response.body["data"][1]["title"], format!("Alpha {token}"));
}
