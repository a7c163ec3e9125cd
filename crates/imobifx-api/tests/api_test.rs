//! HTTP API integration tests.
//!
//! Run with: `cargo test -p imobifx-api --test api_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{setup_test_app, MAX_IMAGE_BYTES};
use serde_json::{json, Value};

fn ad_form(ad_type: &str, price: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("type", ad_type)
        .add_text("price_brl", price)
        .add_text("cep", "58000-000")
        .add_text("street", "Rua A")
        .add_text("number", "10")
        .add_text("complement", "  ")
        .add_text("neighborhood", "Centro")
        .add_text("city", "João Pessoa")
        .add_text("state", "pb")
}

fn jpeg(size: usize) -> Part {
    Part::bytes(vec![0xFFu8; size])
        .file_name("casa.JPG")
        .mime_type("image/jpeg")
}

fn violation_fields(body: &Value) -> Vec<String> {
    body["details"]["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert!(body["paths"]["/api/ads"].is_object());
}

#[tokio::test]
async fn test_address_lookup() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/addresses/58000-000").await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert_eq!(body["cep"], "58000-000");
    assert_eq!(body["city"], "João Pessoa");
    assert_eq!(body["state"], "PB");
}

#[tokio::test]
async fn test_address_errors() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/addresses/123").await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "CEP_INVALID");

    let response = app.client().get("/api/addresses/99999-999").await;
    assert_eq!(response.status_code(), 404);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "CEP_NOT_FOUND");
    assert_eq!(body["details"]["cep"], "99999-999");

    let response = app.client().get("/api/addresses/00000000").await;
    assert_eq!(response.status_code(), 503);
    assert_eq!(response.json::<Value>()["code"], "VIA_CEP_UNAVAILABLE");
}

#[tokio::test]
async fn test_current_quote_is_404_until_one_exists() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/quotes/current").await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["code"], "NOT_FOUND");

    let response = app
        .client()
        .post("/api/quotes")
        .json(&json!({ "brl_to_usd": 0.19, "effective_at": " 2026-02-16T07:00:00-03:00 " }))
        .await;
    assert_eq!(response.status_code(), 201);
    let created = response.json::<Value>();
    assert_eq!(created["brl_to_usd"].as_f64(), Some(0.19));

    let response = app.client().get("/api/quotes/current").await;
    assert_eq!(response.status_code(), 200);
    let current = response.json::<Value>();
    assert_eq!(current["id"], created["id"]);
    assert!(current["effective_at"]
        .as_str()
        .unwrap()
        .starts_with("2026-02-16T10:00:00"));
}

#[tokio::test]
async fn test_create_quote_with_empty_body_reports_missing_rate() {
    let app = setup_test_app().await;

    let response = app.client().post("/api/quotes").json(&json!({})).await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(violation_fields(&body), ["brl_to_usd"]);
    assert_eq!(body["details"]["violations"][0]["message"], "must be > 0");
}

#[tokio::test]
async fn test_create_quote_validation() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/quotes")
        .json(&json!({ "brl_to_usd": 0, "effective_at": "yesterday" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(violation_fields(&body), ["brl_to_usd", "effective_at"]);

    let response = app
        .client()
        .post("/api/quotes")
        .text("{not json")
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_ad_with_image() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/ads")
        .multipart(ad_form(" sale ", "250000.50").add_part("image", jpeg(16)))
        .await;

    assert_eq!(response.status_code(), 201);
    let body = response.json::<Value>();
    assert_eq!(body["type"], "SALE");
    assert_eq!(body["price_brl"].as_f64(), Some(250000.5));
    assert!(body.get("price_usd").is_none());
    assert_eq!(body["address"]["cep"], "58000-000");
    assert_eq!(body["address"]["state"], "PB");
    assert_eq!(body["address"]["number"], "10");
    assert!(body["address"].get("complement").is_none());

    let image_url = body["image_url"].as_str().unwrap();
    let name = image_url.strip_prefix("/static/images/").unwrap();
    assert!(name.ends_with(".jpg"));
    assert!(app.images_dir().join(name).exists());

    let image = app.client().get(image_url).await;
    assert_eq!(image.status_code(), 200);
    assert_eq!(image.as_bytes().len(), 16);
}

#[tokio::test]
async fn test_create_ad_without_image() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/ads")
        .multipart(ad_form("RENT", "1800"))
        .await;

    assert_eq!(response.status_code(), 201);
    let body = response.json::<Value>();
    assert_eq!(body["type"], "RENT");
    assert!(body.get("image_url").is_none());
    assert_eq!(app.stored_images(), 0);
}

#[tokio::test]
async fn test_create_ad_rejects_invalid_fields_without_storing() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("type", "LEASE")
        .add_text("price_brl", "-1")
        .add_text("cep", "123")
        .add_text("state", "Paraíba")
        .add_part("image", jpeg(16));
    let response = app.client().post("/api/ads").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        violation_fields(&body),
        ["type", "price_brl", "cep", "street", "neighborhood", "city", "state"]
    );
    assert_eq!(app.stored_images(), 0);
}

#[tokio::test]
async fn test_create_ad_price_must_be_a_number() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/ads")
        .multipart(ad_form("SALE", "cheap"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(body["details"]["violations"][0]["field"], "price_brl");
    assert_eq!(body["details"]["violations"][0]["message"], "must be a number");
}

#[tokio::test]
async fn test_create_ad_price_beyond_cents_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/ads")
        .multipart(ad_form("SALE", "1500.505").add_part("image", jpeg(16)))
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(violation_fields(&body), ["price_brl"]);
    assert_eq!(
        body["details"]["violations"][0]["message"],
        "must have at most 2 decimal places"
    );
    assert_eq!(app.stored_images(), 0);
}

#[tokio::test]
async fn test_create_ad_image_checks() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/ads")
        .multipart(ad_form("SALE", "100").add_part("image", jpeg(MAX_IMAGE_BYTES as usize + 1)))
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "IMAGE_TOO_LARGE");
    assert_eq!(body["details"]["max_bytes"], MAX_IMAGE_BYTES);

    let pdf = Part::bytes(b"%PDF-1.4".to_vec())
        .file_name("planta.pdf")
        .mime_type("application/pdf");
    let response = app
        .client()
        .post("/api/ads")
        .multipart(ad_form("SALE", "100").add_part("image", pdf))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "UNSUPPORTED_IMAGE_TYPE");

    assert_eq!(app.stored_images(), 0);
}

#[tokio::test]
async fn test_list_ads_prices_in_usd_with_current_quote() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/quotes")
        .json(&json!({ "brl_to_usd": 0.5 }))
        .await;
    assert_eq!(response.status_code(), 201);

    for (ad_type, price) in [("SALE", "100"), ("RENT", "200"), ("SALE", "300.01")] {
        let response = app
            .client()
            .post("/api/ads")
            .multipart(ad_form(ad_type, price))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let response = app
        .client()
        .get("/api/ads")
        .add_query_param("type", "sale")
        .add_query_param("state", "pb")
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 10);
    assert_eq!(body["total"], 2);
    assert_eq!(body["quote_used"]["brl_to_usd"].as_f64(), Some(0.5));

    // newest first
    let items = body["items"].as_array().unwrap();
    assert_eq!(items[0]["price_brl"].as_f64(), Some(300.01));
    assert_eq!(items[0]["price_usd"].as_f64(), Some(150.01));
    assert_eq!(items[1]["price_usd"].as_f64(), Some(50.0));
    assert!(items.iter().all(|item| item["type"] == "SALE"));
}

#[tokio::test]
async fn test_list_ads_without_quote_omits_usd() {
    let app = setup_test_app().await;
    app.client()
        .post("/api/ads")
        .multipart(ad_form("SALE", "100"))
        .await;

    let response = app.client().get("/api/ads").await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert_eq!(body["total"], 1);
    assert!(body.get("quote_used").is_none());
    assert!(body["items"][0].get("price_usd").is_none());
}

#[tokio::test]
async fn test_list_ads_pagination_and_lenient_paging() {
    let app = setup_test_app().await;
    for price in ["1", "2", "3"] {
        app.client()
            .post("/api/ads")
            .multipart(ad_form("SALE", price))
            .await;
    }

    let response = app
        .client()
        .get("/api/ads")
        .add_query_param("page", "2")
        .add_query_param("page_size", "2")
        .await;
    let body = response.json::<Value>();
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["price_brl"].as_f64(), Some(1.0));

    let response = app
        .client()
        .get("/api/ads")
        .add_query_param("page", "first")
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["page"], 1);
}

#[tokio::test]
async fn test_list_ads_query_validation() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/ads")
        .add_query_param("page_size", "51")
        .add_query_param("type", "LEASE")
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(violation_fields(&body), ["page_size", "type"]);

    let response = app
        .client()
        .get("/api/ads")
        .add_query_param("min_price", "500")
        .add_query_param("max_price", "100")
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(violation_fields(&response.json::<Value>()), ["price_range"]);

    let response = app
        .client()
        .get("/api/ads")
        .add_query_param("min_price", "abc")
        .await;
    assert_eq!(response.status_code(), 400);
    let body = response.json::<Value>();
    assert_eq!(body["details"]["violations"][0]["field"], "min_price");
    assert_eq!(body["details"]["violations"][0]["message"], "must be a number");
}

#[tokio::test]
async fn test_list_ads_huge_page_is_a_client_error() {
    let app = setup_test_app().await;
    app.client()
        .post("/api/ads")
        .multipart(ad_form("SALE", "1"))
        .await;

    let response = app
        .client()
        .get("/api/ads")
        .add_query_param("page", i64::MAX.to_string())
        .add_query_param("page_size", "50")
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(violation_fields(&response.json::<Value>()), ["page"]);

    let response = app
        .client()
        .get("/api/ads")
        .add_query_param("page", i64::MAX.to_string())
        .add_query_param("page_size", "1")
        .await;
    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert_eq!(body["total"], 1);
    assert!(body["items"].as_array().unwrap().is_empty());
}
