use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use brk::catalog::builtin::{STORAGE_ID, builtin_services};
use brk::domain::config::{ApiConfig, ServiceOverride, SslConfig};
use brk::kernel::config::load_config;
use brk_server::Server;
use std::path::PathBuf;
use tower::ServiceExt;

async fn get(server: &Server, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn docs_page_lists_every_builtin_service() {
    let server = Server::builder().build().unwrap();

    let (status, content_type, body) = get(&server, "/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    for service in builtin_services() {
        assert!(body.contains(&service.name), "missing {}", service.name);
    }
}

#[tokio::test]
async fn service_config_page_lists_ids() {
    let server = Server::builder().build().unwrap();

    let (status, _, body) = get(&server, "/service-config").await;

    assert_eq!(status, StatusCode::OK);
    for service in builtin_services() {
        assert!(body.contains(&service.id), "missing {}", service.id);
    }
}

#[tokio::test]
async fn json_routes_are_mounted() {
    let server = Server::builder().build().unwrap();

    let (status, _, body) = get(&server, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "up");

    let (status, _, body) = get(&server, &format!("/services/{STORAGE_ID}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("google-storage"));

    let (status, _, _) = get(&server, "/services/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disabled_service_disappears_from_pages() {
    let mut cfg = ApiConfig::default();
    cfg.catalog
        .services
        .insert(STORAGE_ID.to_owned(), ServiceOverride { enabled: false, ..Default::default() });
    let server = Server::builder().config(cfg).build().unwrap();

    let (_, _, docs) = get(&server, "/docs").await;
    let (_, _, config) = get(&server, "/service-config").await;

    assert!(!docs.contains("google-storage"));
    assert!(!config.contains(STORAGE_ID));
}

#[tokio::test]
async fn config_file_drives_the_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.toml");
    std::fs::write(
        &path,
        "[docs]\ntitle = \"Internal Catalog\"\nstylesheet = \"/static/site.css\"\n",
    )
    .unwrap();

    let cfg: ApiConfig = load_config(Some(&path)).unwrap();
    let server = Server::builder().config(cfg).build().unwrap();

    let (status, _, body) = get(&server, "/docs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Internal Catalog</title>"));
    assert!(body.contains("/static/site.css"));
}

#[test]
fn empty_stylesheet_fails_build() {
    let mut cfg = ApiConfig::default();
    cfg.docs.stylesheet = String::new();

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(format!("{err:#}").contains("/docs"), "got {err:#}");
}

#[test]
fn unknown_override_fails_build() {
    let mut cfg = ApiConfig::default();
    cfg.catalog.services.insert("nope".to_owned(), ServiceOverride::default());

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(format!("{err:#}").contains("nope"), "got {err:#}");
}

#[test]
fn missing_certificate_fails_build() {
    let mut cfg = ApiConfig::default();
    cfg.server.ssl = Some(SslConfig {
        cert: PathBuf::from("/nonexistent/cert.pem"),
        key: PathBuf::from("/nonexistent/key.pem"),
    });

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(err.to_string().contains("SSL certificate not found"));
}
