//! SPARQL 1.1 Query Results JSON decoding
//!
//! Accepts either the full results document
//! (`{"head": {"vars": [...]}, "results": {"bindings": [...]}}`) or the bare
//! `bindings` array. Each variable is an RDF term `{"type": ..., "value": ...}`.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Binding, DomainError};

/// One RDF term inside a result row.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Term {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: String,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
}

/// A raw result row: variable name → term.
pub type RawRow = HashMap<String, Term>;

#[derive(Debug, Deserialize, Default)]
struct Head {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Results {
    #[serde(default)]
    bindings: Vec<RawRow>,
}

#[derive(Debug, Deserialize)]
struct ResultsDocument {
    #[serde(default)]
    head: Head,
    results: Results,
}

/// Parse a results document or bindings array into raw rows.
///
/// The JSON shape is inspected first: serde would also accept an array as a
/// positional `ResultsDocument`.
pub fn parse_rows(json: &str) -> Result<Vec<RawRow>, DomainError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(unsupported)?;
    if value.is_array() {
        let rows: Vec<RawRow> = serde_json::from_value(value).map_err(unsupported)?;
        debug!(rows = rows.len(), "bare bindings array");
        return Ok(rows);
    }
    let doc: ResultsDocument = serde_json::from_value(value).map_err(unsupported)?;
    debug!(vars = ?doc.head.vars, rows = doc.results.bindings.len(), "results document");
    Ok(doc.results.bindings)
}

fn unsupported(e: serde_json::Error) -> DomainError {
    DomainError::UnsupportedFormat(e.to_string())
}

/// Decode raw rows into bindings.
///
/// `entry` and `label` are mandatory; every other variable is optional and
/// unknown variables are ignored. A `translation` in a language other than
/// English is dropped.
pub fn decode_rows(rows: &[RawRow]) -> Result<Vec<Binding>, DomainError> {
    rows.iter()
        .enumerate()
        .map(|(row, raw)| decode_row(row, raw))
        .collect()
}

/// Parse and decode in one step.
pub fn decode_results(json: &str) -> Result<Vec<Binding>, DomainError> {
    decode_rows(&parse_rows(json)?)
}

fn decode_row(row: usize, raw: &RawRow) -> Result<Binding, DomainError> {
    let value = |name: &str| raw.get(name).map(|t| t.value.clone());
    let required = |field: &'static str| {
        value(field).ok_or(DomainError::MissingField { row, field })
    };

    let translation = raw
        .get("translation")
        .filter(|t| t.lang.as_deref().map_or(true, |l| l.eq_ignore_ascii_case("en")))
        .map(|t| t.value.clone());

    Ok(Binding {
        entry: required("entry")?,
        label: required("label")?,
        level: value("level"),
        topic: value("topic"),
        sub_topic: value("subTopic").or_else(|| value("subtopic")),
        pos: value("pos"),
        gender: value("gender"),
        plural: value("plural"),
        ipa: value("ipa"),
        example: value("example"),
        translation,
    })
}
