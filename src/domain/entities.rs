//! Domain entities: input bindings and the output hierarchy

use serde::Serialize;

/// One flat result row from the knowledge graph.
///
/// An entry with N examples arrives as N bindings that differ only in
/// `example`; the builder folds them back together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    /// Opaque entity identifier (usually an IRI), stable across rows
    pub entry: String,
    /// Display string for the entry
    pub label: String,
    pub level: Option<String>,
    pub topic: Option<String>,
    pub sub_topic: Option<String>,
    /// Part-of-speech code or IRI
    pub pos: Option<String>,
    /// Grammatical gender code or IRI
    pub gender: Option<String>,
    /// Raw plural surface form, possibly article-prefixed
    pub plural: Option<String>,
    pub ipa: Option<String>,
    /// One example sentence per row
    pub example: Option<String>,
    /// English meaning of the entry
    pub translation: Option<String>,
}

impl Binding {
    pub fn new(entry: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_sub_topic(mut self, sub_topic: impl Into<String>) -> Self {
        self.sub_topic = Some(sub_topic.into());
        self
    }

    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn with_ipa(mut self, ipa: impl Into<String>) -> Self {
        self.ipa = Some(ipa.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }
}

/// Semantic type of a hierarchy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Root,
    Level,
    Category,
    Subcategory,
    Pos,
    Entry,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Level => "level",
            NodeType::Category => "category",
            NodeType::Subcategory => "subcategory",
            NodeType::Pos => "pos",
            NodeType::Entry => "entry",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes that only exist on entry nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryDetails {
    /// Entity identifier the node was keyed by; not part of the wire format
    #[serde(skip)]
    pub entry: String,
    /// Definite article derived from the gender code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Plural with its leading article removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Sorted distinct examples, attached after the tree is grown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

/// Owned output tree handed to callers.
///
/// Serializes to `{id, label, type, gender?, plural?, ipa?, translation?,
/// examples?, children}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(flatten)]
    pub details: Option<EntryDetails>,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            details: None,
            children: Vec::new(),
        }
    }

    pub fn is_entry(&self) -> bool {
        self.node_type == NodeType::Entry
    }

    pub fn gender(&self) -> Option<&str> {
        self.details.as_ref()?.gender.as_deref()
    }

    pub fn plural(&self) -> Option<&str> {
        self.details.as_ref()?.plural.as_deref()
    }

    pub fn ipa(&self) -> Option<&str> {
        self.details.as_ref()?.ipa.as_deref()
    }

    pub fn translation(&self) -> Option<&str> {
        self.details.as_ref()?.translation.as_deref()
    }

    pub fn examples(&self) -> Option<&[String]> {
        self.details.as_ref()?.examples.as_deref()
    }

    /// Child with the given id, if any.
    pub fn child(&self, id: &str) -> Option<&HierarchyNode> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Number of nodes in this subtree, including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::count).sum::<usize>()
    }

    /// All nodes of this subtree in pre-order.
    pub fn descendants(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// All entry nodes of this subtree in pre-order.
    pub fn entries(&self) -> Vec<&HierarchyNode> {
        self.descendants()
            .into_iter()
            .filter(|n| n.is_entry())
            .collect()
    }

    /// Copy of this subtree with every child list sorted by label.
    ///
    /// Presentation only: the builder keeps first-creation order.
    pub fn sorted(&self) -> HierarchyNode {
        let mut node = self.clone();
        node.sort_recursive();
        node
    }

    fn sort_recursive(&mut self) {
        self.children
            .sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
        for child in &mut self.children {
            child.sort_recursive();
        }
    }
}
