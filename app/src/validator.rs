// ==============================================================================
// validator.rs - Report Document Schema Validation
// ==============================================================================
// Description: Validates analysis_results.json and variants.json field by field
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Contract:
//   - Every required field present with the correct JSON type
//   - snp_count + indel_count <= total_variants
//   - Optional variant fields (af, dp, qual, clinvar_significance) may be
//     absent or null; when present they must be well-typed
//   - Unknown fields are ignored
// ==============================================================================

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::SchemaError;
use crate::models::{AnalysisSummary, Variant, SUMMARY_DOCUMENT, VARIANTS_DOCUMENT};

/// Field path used when the whole document is at fault
const ROOT: &str = "$";

/// Schema validator for both report documents
pub struct SchemaValidator {
    summary_document: String,
    variants_document: String,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self {
            summary_document: SUMMARY_DOCUMENT.to_string(),
            variants_document: VARIANTS_DOCUMENT.to_string(),
        }
    }

    /// Decode and validate raw analysis_results.json bytes
    pub fn parse_summary(&self, bytes: &[u8]) -> Result<AnalysisSummary, SchemaError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            SchemaError::new(&self.summary_document, ROOT, format!("is not valid JSON ({})", e))
        })?;
        self.validate_summary(&value)
    }

    /// Decode and validate raw variants.json bytes
    pub fn parse_variants(&self, bytes: &[u8]) -> Result<Vec<Variant>, SchemaError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            SchemaError::new(&self.variants_document, ROOT, format!("is not valid JSON ({})", e))
        })?;
        self.validate_variants(&value)
    }

    /// Validate an analysis summary document
    pub fn validate_summary(&self, value: &Value) -> Result<AnalysisSummary, SchemaError> {
        let doc = FieldReader::new(&self.summary_document, "");
        let obj = value
            .as_object()
            .ok_or_else(|| doc.error(ROOT, "must be a JSON object"))?;

        let total_variants = doc.required_count(obj, "total_variants")?;
        let snp_count = doc.required_count(obj, "snp_count")?;
        let indel_count = doc.required_count(obj, "indel_count")?;
        let snp_percentage = doc.required_percentage(obj, "snp_percentage")?;
        let indel_percentage = doc.required_percentage(obj, "indel_percentage")?;
        let most_common_chromosome = doc.nullable_string(obj, "most_common_chromosome")?;
        let af_histogram = doc.required_count_map(obj, "af_histogram")?;
        let chromosome_counts = doc.required_count_map(obj, "chromosome_counts")?;

        // 1. Type invariant: classified variants never exceed the total
        let classified = snp_count.checked_add(indel_count);
        if classified.map_or(true, |c| c > total_variants) {
            return Err(doc.error(
                "snp_count",
                format!(
                    "plus indel_count ({} + {}) exceeds total_variants ({})",
                    snp_count, indel_count, total_variants
                ),
            ));
        }

        debug!(
            "Summary validated: {} variants, {} histogram buckets, {} chromosomes",
            total_variants,
            af_histogram.len(),
            chromosome_counts.len()
        );

        Ok(AnalysisSummary {
            total_variants,
            snp_count,
            indel_count,
            snp_percentage,
            indel_percentage,
            most_common_chromosome,
            af_histogram,
            chromosome_counts,
        })
    }

    /// Validate a variant list document
    pub fn validate_variants(&self, value: &Value) -> Result<Vec<Variant>, SchemaError> {
        let items = value.as_array().ok_or_else(|| {
            SchemaError::new(&self.variants_document, ROOT, "must be a JSON array")
        })?;

        let mut variants = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let prefix = format!("[{}].", idx);
            let row = FieldReader::new(&self.variants_document, &prefix);
            let obj = item.as_object().ok_or_else(|| {
                SchemaError::new(
                    &self.variants_document,
                    format!("[{}]", idx),
                    "must be a JSON object",
                )
            })?;
            variants.push(row.variant(obj)?);
        }

        info!("Validated {} variants from {}", variants.len(), self.variants_document);
        Ok(variants)
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed field access that reports failures with a document-qualified path
struct FieldReader<'a> {
    document: &'a str,
    prefix: &'a str,
}

impl<'a> FieldReader<'a> {
    fn new(document: &'a str, prefix: &'a str) -> Self {
        Self { document, prefix }
    }

    fn error(&self, field: &str, reason: impl Into<String>) -> SchemaError {
        let path = if field == ROOT {
            field.to_string()
        } else {
            format!("{}{}", self.prefix, field)
        };
        SchemaError::new(self.document, path, reason)
    }

    fn required<'v>(&self, obj: &'v Map<String, Value>, field: &str) -> Result<&'v Value, SchemaError> {
        obj.get(field).ok_or_else(|| self.error(field, "is missing"))
    }

    /// Absent and null both read as None
    fn optional<'v>(&self, obj: &'v Map<String, Value>, field: &str) -> Option<&'v Value> {
        obj.get(field).filter(|v| !v.is_null())
    }

    fn required_count(&self, obj: &Map<String, Value>, field: &str) -> Result<u64, SchemaError> {
        self.required(obj, field)?
            .as_u64()
            .ok_or_else(|| self.error(field, "must be a non-negative integer"))
    }

    fn required_string(&self, obj: &Map<String, Value>, field: &str) -> Result<String, SchemaError> {
        self.required(obj, field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.error(field, "must be a string"))
    }

    fn required_percentage(&self, obj: &Map<String, Value>, field: &str) -> Result<f64, SchemaError> {
        let value = self
            .required(obj, field)?
            .as_f64()
            .ok_or_else(|| self.error(field, "must be a number"))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(self.error(field, format!("must be between 0 and 100 (got {})", value)));
        }
        Ok(value)
    }

    /// Required key whose value may be null
    fn nullable_string(
        &self,
        obj: &Map<String, Value>,
        field: &str,
    ) -> Result<Option<String>, SchemaError> {
        match self.required(obj, field)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            _ => Err(self.error(field, "must be a string or null")),
        }
    }

    fn required_count_map(
        &self,
        obj: &Map<String, Value>,
        field: &str,
    ) -> Result<IndexMap<String, u64>, SchemaError> {
        let map = self
            .required(obj, field)?
            .as_object()
            .ok_or_else(|| self.error(field, "must be a JSON object"))?;

        // serde_json preserve_order keeps the producer's key order here
        let mut counts = IndexMap::with_capacity(map.len());
        for (label, count) in map {
            let count = count.as_u64().ok_or_else(|| {
                self.error(&format!("{}.{}", field, label), "must be a non-negative integer")
            })?;
            counts.insert(label.clone(), count);
        }
        Ok(counts)
    }

    fn variant(&self, obj: &Map<String, Value>) -> Result<Variant, SchemaError> {
        let chrom = self.required_string(obj, "chrom")?;
        let pos = self
            .required(obj, "pos")?
            .as_u64()
            .filter(|p| *p > 0)
            .ok_or_else(|| self.error("pos", "must be a positive integer"))?;
        let ref_allele = self.required_string(obj, "ref")?;
        let alt_allele = self.required_string(obj, "alt")?;

        let af = match self.optional(obj, "af") {
            None => None,
            Some(v) => {
                let af = v.as_f64().ok_or_else(|| self.error("af", "must be a number"))?;
                if !(0.0..=1.0).contains(&af) {
                    return Err(self.error("af", format!("must be between 0 and 1 (got {})", af)));
                }
                Some(af)
            }
        };

        let dp = self
            .optional(obj, "dp")
            .map(|v| {
                v.as_u64()
                    .ok_or_else(|| self.error("dp", "must be a non-negative integer"))
            })
            .transpose()?;

        let qual = self
            .optional(obj, "qual")
            .map(|v| v.as_f64().ok_or_else(|| self.error("qual", "must be a number")))
            .transpose()?;

        let clinvar_significance = self
            .optional(obj, "clinvar_significance")
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.error("clinvar_significance", "must be a string"))
            })
            .transpose()?;

        Ok(Variant {
            chrom,
            pos,
            ref_allele,
            alt_allele,
            af,
            dp,
            qual,
            clinvar_significance,
        })
    }
}
