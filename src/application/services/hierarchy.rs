//! Hierarchy service
//!
//! Fetches bindings for a set of filters, builds the hierarchy rooted at the
//! most specific filtered layer, and wraps the outcome in a response
//! envelope. Zero bindings become a "no data found" response, not an error.

use std::collections::BTreeSet;
use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::domain::normalize::local_name;
use crate::domain::{
    build_hierarchy_with, Binding, BuildOptions, ExampleAggregator, Filters, HierarchyNode,
};
use crate::infrastructure::traits::BindingSource;

pub const LOADED_MESSAGE: &str = "Knowledge graph loaded successfully.";

/// Successful hierarchy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositiveResponse {
    pub ok: bool,
    pub message: String,
    pub data: HierarchyNode,
}

/// Response carrying a user-facing reason instead of data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegativeResponse {
    pub ok: bool,
    pub reason: String,
}

impl NegativeResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: reason.into(),
        }
    }
}

/// Envelope returned to callers; serializes without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KgResponse {
    Positive(PositiveResponse),
    Negative(NegativeResponse),
}

impl KgResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, KgResponse::Positive(_))
    }

    pub fn data(&self) -> Option<&HierarchyNode> {
        match self {
            KgResponse::Positive(p) => Some(&p.data),
            KgResponse::Negative(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            KgResponse::Positive(_) => None,
            KgResponse::Negative(n) => Some(&n.reason),
        }
    }
}

/// Examples and translations of a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDetail {
    pub ok: bool,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryResponse {
    Found(EntryDetail),
    NotFound(NegativeResponse),
}

/// Service building vocabulary hierarchies from a binding source.
pub struct HierarchyService {
    source: Arc<dyn BindingSource>,
    options: BuildOptions,
}

impl HierarchyService {
    pub fn new(source: Arc<dyn BindingSource>, options: BuildOptions) -> Self {
        Self { source, options }
    }

    /// Build the hierarchy for `filters`.
    ///
    /// The tree starts at the most specific filtered layer.
    #[instrument(level = "debug", skip(self))]
    pub fn query(&self, filters: &Filters) -> ApplicationResult<KgResponse> {
        let bindings = self.source.fetch(filters)?;
        if bindings.is_empty() {
            info!(filters = %filters.describe(), "no bindings found");
            return Ok(KgResponse::Negative(NegativeResponse::new(no_data_reason(filters))));
        }

        let primary = filters.primary();
        debug!(rows = bindings.len(), %primary, "building hierarchy");
        let root = build_hierarchy_with(&bindings, primary, &self.options);
        Ok(KgResponse::Positive(PositiveResponse {
            ok: true,
            message: LOADED_MESSAGE.to_string(),
            data: root,
        }))
    }

    /// Complete hierarchy: no filters, starting at the level layer.
    pub fn full(&self) -> ApplicationResult<KgResponse> {
        self.query(&Filters::default())
    }

    /// Examples and translations of one entry.
    ///
    /// `entry_id` matches the full identifier exactly, or else the local
    /// name of exactly one identifier. A local name shared by several
    /// identifiers is reported as ambiguous.
    #[instrument(level = "debug", skip(self))]
    pub fn entry_detail(&self, entry_id: &str) -> ApplicationResult<EntryResponse> {
        let bindings = self.source.fetch(&Filters::default())?;

        let resolved = match resolve_entry(&bindings, entry_id) {
            Ok(entry) => entry,
            Err(candidates) => {
                debug!(entry_id, ?candidates, "ambiguous local name");
                return Ok(EntryResponse::NotFound(NegativeResponse::new(format!(
                    "Entry '{}' is ambiguous, it matches: {}.",
                    entry_id,
                    candidates.join(", ")
                ))));
            }
        };

        let mut examples = ExampleAggregator::new();
        let mut translations = BTreeSet::new();
        if let Some(entry) = resolved {
            for b in bindings.iter().filter(|b| b.entry == entry) {
                if let Some(example) = b.example.as_deref() {
                    examples.record(entry, example);
                }
                if let Some(t) = b.translation.as_deref().filter(|t| !t.trim().is_empty()) {
                    translations.insert(t.to_string());
                }
            }
        }

        let examples = resolved.and_then(|entry| examples.drain().remove(entry));
        if examples.is_none() && translations.is_empty() {
            return Ok(EntryResponse::NotFound(NegativeResponse::new(format!(
                "No detail data found for entry '{}'.",
                entry_id
            ))));
        }

        Ok(EntryResponse::Found(EntryDetail {
            ok: true,
            id: entry_id.to_string(),
            examples,
            translations: (!translations.is_empty()).then(|| translations.into_iter().collect()),
        }))
    }
}

/// Identifier `entry_id` refers to: an exact match, else the single
/// identifier with that local name. `Err` lists the competing identifiers.
fn resolve_entry<'a>(
    bindings: &'a [Binding],
    entry_id: &str,
) -> Result<Option<&'a str>, Vec<&'a str>> {
    if let Some(b) = bindings.iter().find(|b| b.entry == entry_id) {
        return Ok(Some(b.entry.as_str()));
    }
    let candidates: Vec<&str> = bindings
        .iter()
        .map(|b| b.entry.as_str())
        .filter(|entry| local_name(entry) == entry_id)
        .sorted()
        .dedup()
        .collect();
    match candidates.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        _ => Err(candidates),
    }
}

fn no_data_reason(filters: &Filters) -> String {
    if filters.has_filters() {
        format!(
            "No vocabulary data found for '{}' in the Knowledge Graph. \
             Please check the spelling or try a different topic.",
            filters.describe()
        )
    } else {
        "No vocabulary data found in the Knowledge Graph.".to_string()
    }
}
