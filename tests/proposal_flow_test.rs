mod common;

use axum::http::{Method, StatusCode};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use common::TestApp;

fn decimal(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).expect("value is not a decimal")
}

fn details_payload(title: &str, term: i64) -> Value {
    json!({
        "date": "2025-03-10",
        "valid_until": "2025-04-10",
        "manager_id": "5",
        "title": title,
        "client": "Prefeitura Municipal",
        "contact": "compras@prefeitura.gov.br",
        "contract_type": "Taxa Fixa",
        "classification": "Novo",
        "opportunity": "Outsourcing",
        "term": term,
        "status": "Em negociação",
        "probability": 60,
        "observation": ""
    })
}

#[tokio::test]
async fn proposal_lifecycle_end_to_end() {
    let app = TestApp::new();
    let admin = app.admin_id();

    // Draft creation: generated number, empty items, zero totals.
    let response = app
        .request(Method::POST, "/api/v1/proposals", None, Some(admin))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let proposal = TestApp::json_body(response).await;

    let number_pattern = Regex::new(r"^PROP-\d{4}-\d{4}$").unwrap();
    assert!(number_pattern.is_match(proposal["number"].as_str().unwrap()));
    assert_eq!(proposal["status"], "Em aberto");
    assert_eq!(proposal["items"].as_array().unwrap().len(), 0);
    assert_eq!(decimal(&proposal["totals"]["grand_total"]), Decimal::ZERO);

    let id = proposal["id"].as_str().unwrap().to_string();

    // Fill in the header; the manager name is snapshotted from the catalog.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/proposals/{id}"),
            Some(details_payload("Outsourcing de Impressão", 12)),
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let proposal = TestApp::json_body(response).await;
    assert_eq!(proposal["manager_name"], "Aline");
    assert_eq!(proposal["status"], "Em negociação");

    // Add a line item and check the derived totals.
    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/proposals/{id}/items"),
            Some(json!({
                "equipment_id": "1",
                "unit_value": "550.00",
                "quantity": 2,
                "monthly_volume_pb": 10000,
                "monthly_volume_color": 2000,
                "cost_pb": "0.10",
                "cost_color": "0.50",
                "cost_labor": "200.00",
                "cost_parts": "99.90"
            })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let proposal = TestApp::json_body(response).await;

    let item = &proposal["items"][0];
    assert_eq!(item["equipment_name"], "Impressora HP LaserJet Pro");

    // fixed rate = 0.10 + 0.50 + 200.00 + 99.90
    assert_eq!(
        decimal(&proposal["totals"]["fixed_rate_total"]),
        dec!(300.50)
    );
    // production = (10000 * 0.10 + 2000 * 0.50) * 12
    assert_eq!(
        decimal(&proposal["totals"]["production_total"]),
        dec!(24000.00)
    );
    assert_eq!(decimal(&proposal["totals"]["grand_total"]), dec!(24300.50));

    // Halving the term halves the production component only.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/proposals/{id}/term"),
            Some(json!({ "term": 6 })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let proposal = TestApp::json_body(response).await;
    assert_eq!(
        decimal(&proposal["totals"]["production_total"]),
        dec!(12000.00)
    );
    assert_eq!(
        decimal(&proposal["totals"]["fixed_rate_total"]),
        dec!(300.50)
    );

    // Approve, then drop the line; totals go back to zero.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/proposals/{id}/status"),
            Some(json!({ "status": "Aprovada" })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let item_id = item["id"].as_str().unwrap();
    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/proposals/{id}/items/{item_id}"),
            None,
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let proposal = TestApp::json_body(response).await;
    assert_eq!(decimal(&proposal["totals"]["grand_total"]), Decimal::ZERO);

    // Delete and confirm it is gone.
    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/proposals/{id}"),
            None,
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/proposals/{id}"),
            None,
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn incomplete_header_is_rejected_with_field_names() {
    let app = TestApp::new();
    let admin = app.admin_id();

    let response = app
        .request(Method::POST, "/api/v1/proposals", None, Some(admin))
        .await;
    let proposal = TestApp::json_body(response).await;
    let id = proposal["id"].as_str().unwrap().to_string();

    // Blank title and client fail the save-path validation.
    let mut payload = details_payload("", 12);
    payload["client"] = json!("");
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/proposals/{id}"),
            Some(payload),
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = TestApp::json_body(response).await;
    let details = body["details"].as_str().expect("field list expected");
    assert!(details.contains("title"));
    assert!(details.contains("client"));
}

#[tokio::test]
async fn rejected_save_leaves_stored_proposal_unchanged() {
    let app = TestApp::new();
    let admin = app.admin_id();

    let response = app
        .request(Method::POST, "/api/v1/proposals", None, Some(admin))
        .await;
    let proposal = TestApp::json_body(response).await;
    let id = proposal["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/proposals/{id}"),
            Some(details_payload("Proposta Válida", 12)),
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // A save with a blank title is rejected and must not be persisted.
    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/proposals/{id}"),
            Some(details_payload("", 6)),
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/proposals/{id}"),
            None,
            Some(admin),
        )
        .await;
    let stored = TestApp::json_body(response).await;
    assert_eq!(stored["title"], "Proposta Válida");
    assert_eq!(stored["term"], 12);
}

#[tokio::test]
async fn validation_report_flags_invalid_items() {
    let app = TestApp::new();
    let admin = app.admin_id();

    let response = app
        .request(Method::POST, "/api/v1/proposals", None, Some(admin))
        .await;
    let proposal = TestApp::json_body(response).await;
    let id = proposal["id"].as_str().unwrap().to_string();

    // A fresh draft has a blank header, so the report is invalid.
    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/proposals/{id}/validation"),
            None,
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = TestApp::json_body(response).await;
    assert_eq!(report["valid"], false);
    let errors = report["errors"].as_array().unwrap();
    assert!(errors.contains(&json!("title")));
    assert!(errors.contains(&json!("client")));
    assert!(errors.contains(&json!("manager_id")));
}

#[tokio::test]
async fn item_with_non_positive_quantity_is_rejected() {
    let app = TestApp::new();
    let admin = app.admin_id();

    let response = app
        .request(Method::POST, "/api/v1/proposals", None, Some(admin))
        .await;
    let proposal = TestApp::json_body(response).await;
    let id = proposal["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/proposals/{id}/items"),
            Some(json!({
                "equipment_id": "1",
                "unit_value": "100.00",
                "quantity": 0
            })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = TestApp::json_body(response).await;
    let details = body["details"].as_str().expect("field list expected");
    assert!(details.contains("quantity"));
}
