// ==============================================================================
// lib.rs - Variant Report Library
// ==============================================================================
// Description: Data contract, validation, and projection core for variant
//              analysis reports, plus rendering adapters
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

pub mod config;
pub mod error;
pub mod fetch;
pub mod formatter;
pub mod models;
pub mod projector;
pub mod render;
pub mod report;
pub mod table;
pub mod validator;

pub use error::{FetchError, InvalidArgument, RenderError, ReportError, SchemaError};
pub use models::{AnalysisSummary, Variant};
pub use report::{Report, ReportLoader, ReportView, Section};
