// ==============================================================================
// formatter.rs - Display Formatting
// ==============================================================================
// Description: Pure functions turning raw report fields into display strings
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Rounding:
//   All fixed-decimal output rounds half away from zero (29.96 -> "30.0",
//   0.0005 -> "0.001"). Rust's float formatting alone rounds ties to even,
//   so values are rounded with f64::round before being printed.
// ==============================================================================

/// Placeholder for absent labels (clinical significance, chromosome)
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Fixed-decimal formatting, rounding half away from zero
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        // Magnitude already beyond the requested precision
        return format!("{:.*}", decimals, value);
    }
    let mut rounded = scaled.round() / scale;
    if rounded == 0.0 {
        rounded = 0.0; // -0.0 would print a sign
    }
    format!("{:.*}", decimals, rounded)
}

/// Allele frequency with three decimals; missing reads as 0
pub fn format_frequency(af: Option<f64>) -> String {
    format_fixed(af.unwrap_or(0.0), 3)
}

/// Call quality with one decimal; missing reads as 0
pub fn format_quality(qual: Option<f64>) -> String {
    format_fixed(qual.unwrap_or(0.0), 1)
}

/// Percentage with one decimal and a `%` suffix
pub fn format_percentage(p: f64) -> String {
    format!("{}%", format_fixed(p, 1))
}

/// ClinVar label, or "Unknown" when absent or empty
pub fn format_clinical_significance(s: Option<&str>) -> String {
    match s {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

/// Read depth as a raw integer, blank when absent
pub fn format_depth(dp: Option<u64>) -> String {
    dp.map(|d| d.to_string()).unwrap_or_default()
}

/// Summary card value such as "8 (80.0%)"
pub fn format_count_with_share(count: u64, percentage: f64) -> String {
    format!("{} ({})", count, format_percentage(percentage))
}
