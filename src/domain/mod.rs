//! Domain layer: entities and hierarchy construction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod aggregator;
pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod layer;
pub mod normalize;
pub mod selector;

pub use aggregator::ExampleAggregator;
pub use arena::{HierarchyArena, NodeKind, TreeNode};
pub use builder::{build_hierarchy, build_hierarchy_with, BuildOptions};
pub use entities::*;
pub use error::DomainError;
pub use layer::Layer;
pub use selector::Filters;
