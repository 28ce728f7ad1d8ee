// ==============================================================================
// main.rs - Variant Report Server Entry Point
// ==============================================================================
// Description: Axum server for a generated report directory and its projections
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, Level};

mod handlers;
mod middleware;
mod models;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("Starting Variant Report Server v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_env().context("Failed to initialize application state")?;
    let addr = state.bind_addr();
    info!("Serving {} at http://{}/", state.report_dir().display(), addr);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.report_dir());

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/api/report", get(handlers::report))
        // index.html, analysis_results.json, variants.json and assets
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                // Request tracing
                .layer(TraceLayer::new_for_http())
                // Generated documents change between runs
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static(middleware::NO_STORE),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static(middleware::ALLOWED_METHODS),
                ))
                // Answers OPTIONS on any path
                .layer(middleware::cors_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const SUMMARY: &str = r#"{
        "total_variants": 10, "snp_count": 8, "indel_count": 2,
        "snp_percentage": 80.0, "indel_percentage": 20.0,
        "most_common_chromosome": "chr1",
        "af_histogram": {"0.0-0.2": 4, "0.2-0.4": 6},
        "chromosome_counts": {"chr1": 6, "chr2": 4}
    }"#;

    const VARIANTS: &str = r#"[
        {"chrom": "chr2", "pos": 50, "ref": "A", "alt": "G", "af": 0.5, "dp": 30, "qual": 99.0},
        {"chrom": "chr1", "pos": 300, "ref": "AT", "alt": "A", "af": 0.25, "dp": 12, "qual": 45.55,
         "clinvar_significance": "Benign"},
        {"chrom": "chr1", "pos": 100, "ref": "C", "alt": "T"}
    ]"#;

    fn report_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "analysis_results.json", SUMMARY);
        write(dir.path(), "variants.json", VARIANTS);
        write(dir.path(), "index.html", "<html><body>report</body></html>");
        dir
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    async fn send(dir: &Path, method: Method, uri: &str) -> Response {
        build_router(AppState::for_dir(dir))
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn header_str<'a>(response: &'a Response, name: header::HeaderName) -> &'a str {
        response.headers().get(name).unwrap().to_str().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = report_dir();
        let response = send(dir.path(), Method::GET, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_requires_both_documents() {
        let dir = report_dir();
        assert_eq!(send(dir.path(), Method::GET, "/ready").await.status(), StatusCode::OK);

        fs::remove_file(dir.path().join("variants.json")).unwrap();
        let response = send(dir.path(), Method::GET, "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["summary_document"], true);
        assert_eq!(body["variants_document"], false);
    }

    #[tokio::test]
    async fn test_root_serves_index_without_caching() {
        let dir = report_dir();
        let response = send(dir.path(), Method::GET, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::CACHE_CONTROL), middleware::NO_STORE);
        assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        assert!(body_text(response).await.contains("report"));
    }

    #[tokio::test]
    async fn test_static_json_document() {
        let dir = report_dir();
        let response = send(dir.path(), Method::GET, "/analysis_results.json").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(header_str(&response, header::CONTENT_TYPE).starts_with("application/json"));
        assert_eq!(header_str(&response, header::CACHE_CONTROL), middleware::NO_STORE);
        assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
        assert_eq!(
            header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
            middleware::ALLOWED_METHODS
        );

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["total_variants"], 10);
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = report_dir();
        let response = send(dir.path(), Method::GET, "/nope.json").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_options_answered_with_200() {
        let dir = report_dir();
        let response = send(dir.path(), Method::OPTIONS, "/variants.json").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");

        // Preflight answer from the CORS layer, not the static file service
        assert_eq!(
            header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
            "GET,OPTIONS"
        );
        assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_HEADERS), "*");
        assert!(response.headers().get(header::LAST_MODIFIED).is_none());
        assert_eq!(header_str(&response, header::CACHE_CONTROL), middleware::NO_STORE);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_report_json_view() {
        let dir = report_dir();
        let response = send(dir.path(), Method::GET, "/api/report").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(header_str(&response, header::CONTENT_TYPE).starts_with("application/json"));

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["summaryCards"]["status"], "ready");
        assert_eq!(body["summaryCards"]["data"][0]["value"], "10");

        let rows = body["tableRows"]["data"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["chromosome"], "chr2");
        assert_eq!(rows[2]["clinicalSignificance"], "Unknown");
    }

    #[tokio::test]
    async fn test_report_row_cap() {
        let dir = report_dir();
        let response = send(dir.path(), Method::GET, "/api/report?row_cap=2").await;
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();

        let table = &body["tableRows"]["data"];
        assert_eq!(table["rows"].as_array().unwrap().len(), 2);
        assert_eq!(table["truncated"], true);
        assert_eq!(table["totalRows"], 3);
    }

    #[tokio::test]
    async fn test_report_rejects_non_positive_row_cap() {
        let dir = report_dir();
        for uri in ["/api/report?row_cap=0", "/api/report?row_cap=-5"] {
            let response = send(dir.path(), Method::GET, uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
            assert_eq!(body["error"], "Bad request");
            assert!(body["details"].as_str().unwrap().contains("row_cap"));
        }
    }

    #[tokio::test]
    async fn test_report_rejects_unknown_format() {
        let dir = report_dir();
        let response = send(dir.path(), Method::GET, "/api/report?format=pdf").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_report_html() {
        let dir = report_dir();
        let response = send(dir.path(), Method::GET, "/api/report?format=html").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(header_str(&response, header::CONTENT_TYPE).starts_with("text/html"));
        assert!(body_text(response).await.contains("Total Variants"));
    }

    #[tokio::test]
    async fn test_report_isolates_broken_section() {
        let dir = report_dir();
        write(dir.path(), "analysis_results.json", r#"{"total_variants": "ten"}"#);

        let response = send(dir.path(), Method::GET, "/api/report").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["summaryCards"]["status"], "failed");
        assert_eq!(body["tableRows"]["status"], "ready");
    }
}
