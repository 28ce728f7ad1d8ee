// ==============================================================================
// middleware/mod.rs - Report Server Middleware Modules
// ==============================================================================
// Description: Response header policy
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.1
// ==============================================================================

pub mod headers;

pub use headers::{cors_layer, ALLOWED_METHODS, NO_STORE};
