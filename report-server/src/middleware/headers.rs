// ==============================================================================
// middleware/headers.rs - Response Header Policy
// ==============================================================================
// Description: Permissive CORS and cache headers for the report server
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.1
// ==============================================================================
//
// Every response carries Access-Control-Allow-Origin: *, allows GET, and a
// no-store Cache-Control so browsers always re-read freshly generated documents.
//
// ==============================================================================

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Cache-Control value applied to every response
pub const NO_STORE: &str = "no-store, no-cache, must-revalidate";

/// Access-Control-Allow-Methods value on non-preflight responses
pub const ALLOWED_METHODS: &str = "GET";

/// CORS policy: any origin, read-only methods
///
/// The layer answers every OPTIONS request itself with an empty 200,
/// with or without Access-Control-Request-Method.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}
