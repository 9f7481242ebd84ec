use std::collections::{HashMap, HashSet};
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{EntryDetails, HierarchyNode, NodeType};
use crate::domain::layer::Layer;
use crate::domain::normalize::local_name;

/// Payload of a hierarchy node.
///
/// Entry-only attributes live inside `Entry`, so no other node kind can
/// carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Group(Layer),
    Pos,
    Entry(EntryDetails),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Root => NodeType::Root,
            NodeKind::Group(layer) => layer.node_type(),
            NodeKind::Pos => NodeType::Pos,
            NodeKind::Entry(_) => NodeType::Entry,
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in first-creation order
    pub children: Vec<Index>,
    /// Group key → child, scoped to this node
    child_keys: HashMap<String, Index>,
    child_ids: HashSet<String>,
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label, self.kind.node_type())
    }
}

/// Handle to the root or a grouping-layer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHandle(Index);

/// Handle to a part-of-speech node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosHandle(Index);

/// Handle to an entry node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHandle(Index);

/// Arena-based hierarchy under construction.
///
/// Handles encode the legal parent/child transitions: groups hold groups or
/// POS nodes, POS nodes hold entries, entries hold nothing.
#[derive(Debug)]
pub struct HierarchyArena {
    arena: Arena<TreeNode>,
    root: Index,
}

impl HierarchyArena {
    pub fn new(root_id: &str, root_label: &str) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            id: root_id.to_string(),
            label: root_label.to_string(),
            kind: NodeKind::Root,
            parent: None,
            children: Vec::new(),
            child_keys: HashMap::new(),
            child_ids: HashSet::new(),
        });
        Self { arena, root }
    }

    pub fn root(&self) -> GroupHandle {
        GroupHandle(self.root)
    }

    /// Reuse or create the child of `parent` for `value` at `layer`.
    ///
    /// Ids are the value below the root and `{parent id}_{value}` deeper.
    #[instrument(level = "trace", skip(self))]
    pub fn group_child(&mut self, parent: GroupHandle, layer: Layer, value: &str) -> GroupHandle {
        let id = if parent.0 == self.root {
            value.to_string()
        } else {
            format!("{}_{}", self.node_id(parent.0), value)
        };
        let (idx, _) = self.child_or_insert(parent.0, value, || {
            (id, value.to_string(), NodeKind::Group(layer))
        });
        GroupHandle(idx)
    }

    /// Reuse or create the part-of-speech child of `parent` for `pos_key`.
    #[instrument(level = "trace", skip(self))]
    pub fn pos_child(&mut self, parent: GroupHandle, pos_key: &str) -> PosHandle {
        let (idx, _) = self.child_or_insert(parent.0, pos_key, || {
            (pos_key.to_string(), format!("{}s", pos_key), NodeKind::Pos)
        });
        PosHandle(idx)
    }

    /// Reuse or create the entry child of `parent` keyed by `entry`.
    ///
    /// Returns the handle and whether the node was created by this call.
    #[instrument(level = "trace", skip(self))]
    pub fn entry_child(&mut self, parent: PosHandle, entry: &str, label: &str) -> (EntryHandle, bool) {
        let id = self.unique_entry_id(parent.0, entry, label);
        let details = EntryDetails {
            entry: entry.to_string(),
            ..EntryDetails::default()
        };
        let (idx, created) = self.child_or_insert(parent.0, entry, || {
            (id, label.to_string(), NodeKind::Entry(details))
        });
        (EntryHandle(idx), created)
    }

    pub fn entry_details_mut(&mut self, handle: EntryHandle) -> Option<&mut EntryDetails> {
        match self.arena.get_mut(handle.0) {
            Some(TreeNode {
                kind: NodeKind::Entry(details),
                ..
            }) => Some(details),
            _ => None,
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Handles of all entry nodes in pre-order, each exactly once.
    pub fn entry_handles(&self) -> Vec<EntryHandle> {
        self.iter()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Entry(_)))
            .map(|(idx, _)| EntryHandle(idx))
            .collect()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of node levels, the root counting as one.
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Consume the arena into the owned output tree.
    #[instrument(level = "debug", skip(self))]
    pub fn into_hierarchy(mut self) -> HierarchyNode {
        let root = self.root;
        Self::take_subtree(&mut self.arena, root)
            .unwrap_or_else(|| HierarchyNode::new("", "", NodeType::Root))
    }

    fn take_subtree(arena: &mut Arena<TreeNode>, idx: Index) -> Option<HierarchyNode> {
        let node = arena.remove(idx)?;
        let node_type = node.kind.node_type();
        let details = match node.kind {
            NodeKind::Entry(details) => Some(details),
            _ => None,
        };
        let children = node
            .children
            .into_iter()
            .filter_map(|child| Self::take_subtree(arena, child))
            .collect();
        Some(HierarchyNode {
            id: node.id,
            label: node.label,
            node_type,
            details,
            children,
        })
    }

    /// First free id among `label`, `{label}_{local name}`, then
    /// `{label}_{local name}_{n}` for n = 2, 3, ...
    fn unique_entry_id(&self, parent: Index, entry: &str, label: &str) -> String {
        let Some(pos) = self.arena.get(parent) else {
            return label.to_string();
        };
        if !pos.child_ids.contains(label) {
            return label.to_string();
        }
        let base = format!("{}_{}", label, local_name(entry));
        let mut candidate = base.clone();
        let mut n = 2;
        while pos.child_ids.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        candidate
    }

    fn node_id(&self, idx: Index) -> &str {
        self.arena.get(idx).map(|n| n.id.as_str()).unwrap_or_default()
    }

    fn child_or_insert(
        &mut self,
        parent: Index,
        key: &str,
        make: impl FnOnce() -> (String, String, NodeKind),
    ) -> (Index, bool) {
        if let Some(&existing) = self.arena.get(parent).and_then(|p| p.child_keys.get(key)) {
            return (existing, false);
        }

        let (id, label, kind) = make();
        let idx = self.arena.insert(TreeNode {
            id: id.clone(),
            label,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            child_keys: HashMap::new(),
            child_ids: HashSet::new(),
        });
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(idx);
            parent_node.child_keys.insert(key.to_string(), idx);
            parent_node.child_ids.insert(id);
        }
        (idx, true)
    }
}

pub struct TreeIterator<'a> {
    arena: &'a HierarchyArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a HierarchyArena) -> Self {
        Self {
            arena,
            stack: vec![arena.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
