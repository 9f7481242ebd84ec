//! Vocabulary hierarchies from flat knowledge-graph bindings.
//!
//! Rows joining a lexical entry against its level, topic, subtopic and
//! example attributes are folded into a deduplicated tree:
//! root → level → category → subcategory → part of speech → entry.
//!
//! ```
//! use lexitree::domain::{build_hierarchy, Binding, NodeType};
//!
//! let bindings = vec![
//!     Binding::new("E1", "Tisch").with_level("A1").with_pos("noun"),
//! ];
//! let root = build_hierarchy(&bindings, "level");
//! assert_eq!(root.node_type, NodeType::Root);
//! assert_eq!(root.children[0].id, "A1");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use domain::{build_hierarchy, Binding, HierarchyNode};
