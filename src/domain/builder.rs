//! Hierarchy builder: flat bindings in, deduplicated tree out.
//!
//! Construction runs in two passes. The grow pass walks every binding down
//! the configured layers, creating or reusing one node per distinct value
//! under its parent, and records examples per entry identifier. The attach
//! pass then hands each entry node its aggregated examples. Examples fan out
//! across rows that may reach the same entry through different paths, so
//! they cannot be settled while the tree is still growing.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use crate::domain::aggregator::ExampleAggregator;
use crate::domain::arena::HierarchyArena;
use crate::domain::entities::{Binding, EntryDetails, HierarchyNode};
use crate::domain::layer::Layer;
use crate::domain::normalize::{gender_to_article, non_empty, pos_key, strip_article};

/// Root node identity of a built tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub root_id: String,
    pub root_label: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            root_id: "KG_ROOT".to_string(),
            root_label: "360°Deutsch KG".to_string(),
        }
    }
}

/// Build the hierarchy for `bindings`, starting the tree at `primary`.
///
/// `primary` is one of `level`, `topic`, `subtopic`; any other name builds
/// the full layer order. Never fails: missing fields fall back to layer
/// defaults and an empty input yields a root without children.
pub fn build_hierarchy(bindings: &[Binding], primary: &str) -> HierarchyNode {
    build_hierarchy_with(bindings, Layer::from_primary(primary), &BuildOptions::default())
}

/// [`build_hierarchy`] with an already resolved layer and explicit root identity.
#[instrument(level = "debug", skip(bindings, options), fields(bindings = bindings.len()))]
pub fn build_hierarchy_with(
    bindings: &[Binding],
    primary: Layer,
    options: &BuildOptions,
) -> HierarchyNode {
    let mut builder = HierarchyBuilder::new(primary, options);
    for binding in bindings {
        builder.push(binding);
    }
    builder.finish()
}

/// Call-scoped builder state: the growing arena and the example aggregator.
pub(crate) struct HierarchyBuilder {
    layers: &'static [Layer],
    arena: HierarchyArena,
    examples: ExampleAggregator,
}

impl HierarchyBuilder {
    pub(crate) fn new(primary: Layer, options: &BuildOptions) -> Self {
        Self {
            layers: primary.suffix(),
            arena: HierarchyArena::new(&options.root_id, &options.root_label),
            examples: ExampleAggregator::new(),
        }
    }

    /// Grow pass for one binding.
    pub(crate) fn push(&mut self, binding: &Binding) {
        let mut parent = self.arena.root();
        for &layer in self.layers {
            parent = self.arena.group_child(parent, layer, layer.value_of(binding));
        }

        let pos = self.arena.pos_child(parent, &pos_key(binding.pos.as_deref()));
        let (entry, created) = self.arena.entry_child(pos, &binding.entry, &binding.label);
        if let Some(details) = self.arena.entry_details_mut(entry) {
            if created {
                trace!(entry = %binding.entry, label = %binding.label, "new entry node");
            }
            fill_entry(details, binding);
        }

        if let Some(example) = non_empty(binding.example.as_deref()) {
            self.examples.record(&binding.entry, example);
        }
    }

    /// Attach pass, then hand out the owned tree.
    pub(crate) fn finish(mut self) -> HierarchyNode {
        let examples = self.examples.drain();
        let attached = attach_examples(&mut self.arena, examples);
        debug!(
            nodes = self.arena.node_count(),
            depth = self.arena.depth(),
            attached,
            "hierarchy built"
        );
        self.arena.into_hierarchy()
    }
}

/// Set entry attributes that are still unset; set values are never replaced.
fn fill_entry(details: &mut EntryDetails, binding: &Binding) {
    if details.gender.is_none() {
        details.gender = gender_to_article(binding.gender.as_deref()).map(str::to_string);
    }
    if details.plural.is_none() {
        details.plural = non_empty(binding.plural.as_deref()).map(|p| strip_article(p).to_string());
    }
    if details.ipa.is_none() {
        details.ipa = non_empty(binding.ipa.as_deref()).map(str::to_string);
    }
    if details.translation.is_none() {
        details.translation = non_empty(binding.translation.as_deref()).map(str::to_string);
    }
}

/// Give every entry node its aggregated examples. Returns the number of
/// entry nodes that received some.
fn attach_examples(arena: &mut HierarchyArena, examples: HashMap<String, Vec<String>>) -> usize {
    let mut attached = 0;
    for handle in arena.entry_handles() {
        let Some(details) = arena.entry_details_mut(handle) else {
            continue;
        };
        // An entry may occur under several categories; each node gets its own copy.
        if let Some(values) = examples.get(&details.entry) {
            if !values.is_empty() {
                details.examples = Some(values.clone());
                attached += 1;
            }
        }
    }
    attached
}
