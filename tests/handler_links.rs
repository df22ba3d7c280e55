mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::MultipartForm;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::future::IntoFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use snaplink::utils::code_generator::CodeGenerator;

fn server() -> TestServer {
    TestServer::new(common::create_test_app(common::create_test_state())).unwrap()
}

#[tokio::test]
async fn test_create_link_success() {
    let server = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["targetUrl"], "https://example.com");
    assert_eq!(json["totalClicks"], 0);
    assert!(json["lastClickedAt"].is_null());
    assert!(json["id"].is_i64());

    let code = json["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(
        code.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    );
}

#[tokio::test]
async fn test_create_link_normalizes_bare_host() {
    let server = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "  example.com/page  " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["targetUrl"],
        "https://example.com/page"
    );
}

#[tokio::test]
async fn test_create_link_from_form_body() {
    let server = server();

    let response = server
        .post("/api/links")
        .form(&[("url", "example.org"), ("code", "form-link")])
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["code"], "form-link");
    assert_eq!(json["targetUrl"], "https://example.org");
}

#[tokio::test]
async fn test_create_link_from_multipart_body() {
    let server = server();

    let response = server
        .post("/api/links")
        .multipart(
            MultipartForm::new()
                .add_text("url", "example.com")
                .add_text("code", "mp-code"),
        )
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["code"], "mp-code");
    assert_eq!(json["targetUrl"], "https://example.com");
}

#[tokio::test]
async fn test_multipart_body_without_url() {
    let server = server();

    let response = server
        .post("/api/links")
        .multipart(MultipartForm::new().add_text("code", "mp-only"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "input_missing");
}

#[tokio::test]
async fn test_round_trip_by_code() {
    let server = server();

    let created = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<Value>();
    let code = created["code"].as_str().unwrap();

    let response = server.get(&format!("/api/links/{code}")).await;

    response.assert_status_ok();
    let fetched = response.json::<Value>();
    assert_eq!(fetched["targetUrl"], "https://example.com");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_custom_code_conflict() {
    let server = server();

    server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "code": "abc12" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.org", "code": "abc12" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "code_conflict");
    assert_eq!(
        json["error"],
        "This code is already in use. Please choose another one."
    );
}

#[tokio::test]
async fn test_blank_code_means_generated() {
    let server = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "code": "   " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["code"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_rejects_missing_url() {
    let server = server();

    for body in [json!({}), json!({ "url": "" }), json!({ "url": "   " })] {
        let response = server.post("/api/links").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json::<Value>();
        assert_eq!(json["kind"], "input_missing");
        assert_eq!(json["error"], "URL is required");
    }
}

#[tokio::test]
async fn test_rejects_malformed_body() {
    let server = server();

    let response = server
        .post("/api/links")
        .bytes("{\"url\": ".into())
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "malformed_body");
    assert_eq!(json["error"], "Invalid request body");
}

#[tokio::test]
async fn test_rejects_invalid_format() {
    let server = server();

    for url in ["not a domain", "https://example.notatld", "ftp://example.com"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": url }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["kind"], "format_invalid", "{url}");
    }
}

#[tokio::test]
async fn test_rejects_unresolvable_domain() {
    let server = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "http://totally-bogus-domain-xyz123.invalid" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "domain_unreachable");
    assert_eq!(
        json["error"],
        "The domain \"totally-bogus-domain-xyz123.invalid\" does not exist or cannot be reached. Please check the URL and try again."
    );
}

#[tokio::test]
async fn test_rejects_malformed_google_docs_url() {
    let server = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://docs.google.com/" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "special_shape_invalid");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid Google Docs URL")
    );

    server
        .post("/api/links")
        .json(&json!({ "url": "https://docs.google.com/document/d/1AbC_d-E/edit" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_rejects_bad_code_format() {
    let server = server();

    for code in ["a", "has space", "way-too-long-code-value-x"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": "https://example.com", "code": code }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["kind"],
            "code_format_invalid",
            "{code}"
        );
    }
}

#[tokio::test]
async fn test_rejection_stores_nothing() {
    let server = server();

    server
        .post("/api/links")
        .json(&json!({ "url": "https://docs.google.com/", "code": "kept-out" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/api/links/kept-out")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let list = server.get("/api/links").await.json::<Value>();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let server = server();

    for code in ["first", "second", "third"] {
        server
            .post("/api/links")
            .json(&json!({ "url": "https://example.com", "code": code }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server.get("/api/links").await;
    response.assert_status_ok();

    let codes: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|link| link["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_get_unknown_code() {
    let server = server();

    let response = server.get("/api/links/missing").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "not_found");
    assert_eq!(json["error"], "Link not found");
}

#[tokio::test]
async fn test_delete_link() {
    let server = server();

    server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "code": "gone-soon" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.delete("/api/links/gone-soon").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "Link deleted successfully" })
    );

    server
        .get("/api/links/gone-soon")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_code_is_not_found() {
    let server = server();

    let response = server.delete("/api/links/nonexistent").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "not_found");
}

/// Hands out the same code to the first few callers, then unique ones.
struct RepeatingGenerator {
    calls: AtomicUsize,
}

impl CodeGenerator for RepeatingGenerator {
    fn generate(&self) -> String {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < 3 {
            "repeat".to_string()
        } else {
            format!("uniq{n}")
        }
    }
}

#[tokio::test]
async fn test_concurrent_creations_get_distinct_codes() {
    let generator = Arc::new(RepeatingGenerator {
        calls: AtomicUsize::new(0),
    });
    let state = common::create_test_state_with_generator(generator);
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let create = |i: usize| {
        server
            .post("/api/links")
            .json(&json!({ "url": format!("https://example.com/{i}") }))
            .into_future()
    };

    let (r1, r2, r3, r4, r5, r6) = tokio::join!(
        create(1),
        create(2),
        create(3),
        create(4),
        create(5),
        create(6)
    );

    let mut codes = HashSet::new();
    for response in [r1, r2, r3, r4, r5, r6] {
        response.assert_status(StatusCode::CREATED);
        codes.insert(response.json::<Value>()["code"].as_str().unwrap().to_string());
    }
    assert_eq!(codes.len(), 6);
    assert!(codes.contains("repeat"));

    let stored = server.get("/api/links").await.json::<Vec<Value>>();
    assert_eq!(stored.len(), 6);
}
