//! Full summarize-and-compare runs against a mock site and mock API

use crate::{mount_page, page};
use insurance_compare::config::{parse_config, Config};
use insurance_compare::generator::GeminiClient;
use insurance_compare::pipeline::Pipeline;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-pro:generateContent";

fn config_for(site: &MockServer, dir: &TempDir, max_chars: usize) -> Config {
    parse_config(&format!(
        r#"
[crawler]
request-timeout = 5

[output]
summaries-dir = "{summaries}"
comparisons-dir = "{comparisons}"
max-chars = {max_chars}

[[company]]
id = "norte"
name = "Seguros Norte"
url = "{site}/norte/"

[[company]]
id = "sur"
name = "Seguros Sur"
url = "{site}/sur/"
"#,
        summaries = dir.path().join("summaries").display(),
        comparisons = dir.path().join("comparisons").display(),
        site = site.uri(),
    ))
    .expect("Invalid test config")
}

fn gemini_client(api: &MockServer) -> GeminiClient {
    GeminiClient::new(format!("{}/v1beta", api.uri()), "gemini-1.5-pro", "k")
        .expect("Failed to create client")
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    }))
}

async fn mount_sites(site: &MockServer) {
    mount_page(
        site,
        "/norte/",
        r#"<html><body><a href="/norte/productos">Productos</a></body></html>"#,
    )
    .await;
    mount_page(site, "/norte/productos", &page("Cobertura Norte")).await;

    mount_page(
        site,
        "/sur/",
        r#"<html><body><a href="/sur/seguros">Seguros</a></body></html>"#,
    )
    .await;
    mount_page(site, "/sur/seguros", &page("Cobertura Sur")).await;
}

#[tokio::test]
async fn test_compare_crawls_summarizes_and_saves() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_sites(&site).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("Cobertura Norte"))
        .respond_with(reply("Resumen Norte"))
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("Cobertura Sur"))
        .respond_with(reply("Resumen Sur"))
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("Resumen Norte"))
        .and(body_string_contains("Resumen Sur"))
        .respond_with(reply("## Comparativa"))
        .expect(1)
        .mount(&api)
        .await;

    let generator = gemini_client(&api);
    let pipeline = Pipeline::new(config_for(&site, &dir, 70_000), generator);

    let comparison = pipeline
        .compare_companies("norte", "sur")
        .await
        .expect("Comparison failed");
    assert_eq!(comparison, "## Comparativa");

    let store = pipeline.store();
    assert_eq!(store.load_summary("norte").unwrap().as_deref(), Some("Resumen Norte"));
    assert_eq!(store.load_summary("sur").unwrap().as_deref(), Some("Resumen Sur"));
    assert_eq!(
        store.load_comparison("norte", "sur").unwrap().as_deref(),
        Some("## Comparativa")
    );

    // Everything is cached now: a second run makes no further requests
    let again = pipeline.compare_companies("norte", "sur").await.unwrap();
    assert_eq!(again, "## Comparativa");
}

#[tokio::test]
async fn test_fresh_run_regenerates_cached_results() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_sites(&site).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(reply("nuevo"))
        .expect(3)
        .mount(&api)
        .await;

    let config = config_for(&site, &dir, 70_000);
    let generator = gemini_client(&api);
    let pipeline = Pipeline::new(config, generator).fresh(true);

    pipeline.store().save_summary("norte", "viejo").unwrap();
    pipeline.store().save_summary("sur", "viejo").unwrap();
    pipeline.store().save_comparison("norte", "sur", "viejo").unwrap();

    let comparison = pipeline.compare_companies("norte", "sur").await.unwrap();
    assert_eq!(comparison, "nuevo");
    assert_eq!(pipeline.store().load_summary("norte").unwrap().as_deref(), Some("nuevo"));
}

#[tokio::test]
async fn test_failed_fresh_run_discards_saved_comparison() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_sites(&site).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&api)
        .await;

    let config = config_for(&site, &dir, 70_000);
    let pipeline = Pipeline::new(config, gemini_client(&api)).fresh(true);
    pipeline.store().save_comparison("norte", "sur", "viejo").unwrap();

    let error = pipeline.compare_companies("norte", "sur").await.unwrap_err();
    assert!(error.is_generation_failure());
    assert_eq!(pipeline.store().load_comparison("norte", "sur").unwrap(), None);
}

#[tokio::test]
async fn test_content_is_truncated_before_summarizing() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let long_text = "x".repeat(1500);
    mount_page(
        &site,
        "/norte/",
        r#"<html><body><a href="/norte/productos">Productos</a></body></html>"#,
    )
    .await;
    mount_page(&site, "/norte/productos", &page(&format!("{}FIN", long_text))).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("FIN"))
        .respond_with(reply("should not happen"))
        .expect(0)
        .mount(&api)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(reply("Resumen corto"))
        .expect(1)
        .mount(&api)
        .await;

    let config = config_for(&site, &dir, 1000);
    let company = config.company("norte").unwrap().clone();
    let generator = gemini_client(&api);
    let pipeline = Pipeline::new(config, generator);

    let summary = pipeline.summarize_company(&company).await.unwrap();
    assert_eq!(summary, "Resumen corto");
}

#[tokio::test]
async fn test_generation_failure_aborts_comparison() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_sites(&site).await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&api)
        .await;

    let generator = gemini_client(&api);
    let pipeline = Pipeline::new(config_for(&site, &dir, 70_000), generator);

    let error = pipeline.compare_companies("norte", "sur").await.unwrap_err();
    assert!(error.is_generation_failure());
    assert_eq!(pipeline.store().load_summary("norte").unwrap(), None);
}
