//! Link discovery and content aggregation against a mock site

use crate::{mount_page, page};
use insurance_compare::config::{Config, CrawlerConfig};
use insurance_compare::crawler::{aggregate_pages, crawl, ExtractionSession};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_crawler_config() -> CrawlerConfig {
    CrawlerConfig {
        request_timeout: 5,
        ..CrawlerConfig::default()
    }
}

fn test_config() -> Config {
    Config {
        crawler: test_crawler_config(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_crawl_filters_and_orders_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r##"<html><body>
            <a href="/about">Nosotros</a>
            <a href="/productos">Productos</a>
            <a href="https://other.com/x">Otro sitio</a>
            <a href="/logo.png">Logo</a>
            <a href="mailto:info@example.com">Mail</a>
            <a href="#top">Arriba</a>
        </body></html>"##,
    )
    .await;
    mount_page(&mock_server, "/productos", &page("Seguros de auto")).await;
    mount_page(&mock_server, "/about", &page("Quienes somos")).await;

    let output = crawl(&format!("{}/", base_url), &test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(output.links_found, 4);
    assert_eq!(
        output.content_links,
        vec![
            format!("{}/productos", base_url),
            format!("{}/about", base_url)
        ]
    );
    assert!(!output
        .content_links
        .iter()
        .any(|link| link.contains("other.com")));
    assert_eq!(output.content, "Seguros de auto\n\nQuienes somos");
}

#[tokio::test]
async fn test_crawl_fetches_self_linked_seed_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a href="/">Inicio</a> <a href="/productos">Productos</a></body></html>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/productos", &page("Seguros de auto")).await;

    let output = crawl(&format!("{}/", base_url), &test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(
        output.content_links,
        vec![format!("{}/productos", base_url), format!("{}/", base_url)]
    );
    assert_eq!(output.content, "Seguros de auto\n\nInicio Productos");
}

#[tokio::test]
async fn test_crawl_finds_links_in_embedded_json_and_scripts() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<html><body>
            <div data-props='{{"menu": {{"items": [{{"link": "/contacto"}}]}}}}'></div>
            <script>window.next = "{}/seguros/hogar.html";</script>
        </body></html>"#,
            base_url
        ),
    )
    .await;
    mount_page(&mock_server, "/contacto", &page("Contacto")).await;
    mount_page(&mock_server, "/seguros/hogar.html", &page("Hogar")).await;

    let output = crawl(&format!("{}/", base_url), &test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(
        output.content_links,
        vec![
            format!("{}/contacto", base_url),
            format!("{}/seguros/hogar.html", base_url)
        ]
    );
    assert_eq!(output.content, "Contacto\n\nHogar");
}

#[tokio::test]
async fn test_crawl_with_unreachable_seed_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let output = crawl(&format!("{}/", mock_server.uri()), &test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(output.links_found, 0);
    assert!(output.content_links.is_empty());
    assert_eq!(output.content, "");
}

#[tokio::test]
async fn test_aggregate_skips_failed_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/u1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/u2", &page("T")).await;

    let urls = vec![format!("{}/u1", base_url), format!("{}/u2", base_url)];
    let content = aggregate_pages(&urls, 100, &test_crawler_config()).await;

    assert_eq!(content, "T");
}

#[tokio::test]
async fn test_aggregate_preserves_order_across_chunks() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let names = ["A", "B", "C", "D", "E"];
    for name in names {
        mount_page(&mock_server, &format!("/{}", name), &page(name)).await;
    }

    let urls: Vec<String> = names
        .iter()
        .map(|name| format!("{}/{}", base_url, name))
        .collect();
    let config = CrawlerConfig {
        chunk_size: 2,
        max_workers: 2,
        ..test_crawler_config()
    };

    let content = aggregate_pages(&urls, 100, &config).await;
    assert_eq!(content, "A\n\nB\n\nC\n\nD\n\nE");
}

#[tokio::test]
async fn test_aggregate_limits_concurrent_fetches() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let delay = Duration::from_millis(300);

    for name in ["a", "b", "c", "d"] {
        Mock::given(method("GET"))
            .and(path(format!("/{}", name)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page(name))
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let urls: Vec<String> = ["a", "b", "c", "d"]
        .iter()
        .map(|name| format!("{}/{}", base_url, name))
        .collect();
    let config = CrawlerConfig {
        max_workers: 2,
        chunk_size: 10,
        ..test_crawler_config()
    };

    let started = Instant::now();
    let content = aggregate_pages(&urls, 100, &config).await;
    let elapsed = started.elapsed();

    assert_eq!(content, "a\n\nb\n\nc\n\nd");
    // Two workers over four delayed pages need at least two rounds
    assert!(
        elapsed >= delay * 2,
        "four pages finished in {:?} with two workers",
        elapsed
    );
}

#[tokio::test]
async fn test_aggregate_respects_max_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/1", &page("Uno")).await;
    mount_page(&mock_server, "/2", &page("Dos")).await;

    // Past the limit: must never be requested
    Mock::given(method("GET"))
        .and(path("/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Tres")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/1", base_url),
        format!("{}/2", base_url),
        format!("{}/3", base_url),
    ];
    let content = aggregate_pages(&urls, 2, &test_crawler_config()).await;

    assert_eq!(content, "Uno\n\nDos");
}

#[tokio::test]
async fn test_aggregate_empty_list() {
    let content = aggregate_pages(&[], 100, &test_crawler_config()).await;
    assert_eq!(content, "");
}

#[tokio::test]
async fn test_session_fetches_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><a href="/seguros">Seguros</a></body></html>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let session =
        ExtractionSession::new(&base_url, &test_crawler_config())
            .expect("Failed to create session");

    let links = session.extract_links(None).await;
    assert_eq!(links, vec![format!("{}seguros", base_url)]);

    let text = session.page_text(Some(base_url.as_str())).await;
    assert_eq!(text, "Seguros");
    assert_eq!(session.cache().len(), 1);
}

#[tokio::test]
async fn test_session_does_not_cache_failures() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let session =
        ExtractionSession::new(&base_url, &test_crawler_config())
            .expect("Failed to create session");

    assert!(session.extract_links(None).await.is_empty());
    assert_eq!(session.page_text(None).await, "");
    assert!(session.cache().is_empty());
}
