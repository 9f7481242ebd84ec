//! Terminal rendering of hierarchies via `termtree`.

use termtree::Tree;

use crate::domain::{HierarchyNode, NodeType};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for HierarchyNode {
    fn to_tree_string(&self) -> Tree<String> {
        let mut tree = Tree::new(display_label(self));

        if let Some(examples) = self.examples() {
            for example in examples {
                tree.push(Tree::new(format!("» {}", example)));
            }
        }
        for child in &self.children {
            tree.push(child.to_tree_string());
        }
        tree
    }
}

/// One-line label: entries show article, plural, IPA and translation.
pub fn display_label(node: &HierarchyNode) -> String {
    match node.node_type {
        NodeType::Entry => {
            let mut out = match node.gender() {
                Some(article) => format!("{} {}", article, node.label),
                None => node.label.clone(),
            };
            if let Some(plural) = node.plural() {
                out.push_str(&format!(" (pl. {})", plural));
            }
            if let Some(ipa) = node.ipa() {
                out.push_str(&format!(" [{}]", ipa));
            }
            if let Some(translation) = node.translation() {
                out.push_str(&format!(" = {}", translation));
            }
            out
        }
        NodeType::Root => node.label.clone(),
        other => format!("{} ({})", node.label, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_hierarchy, Binding};

    #[test]
    fn test_render_entry_with_examples() {
        let bindings = vec![Binding::new("E1", "Tisch")
            .with_level("A1")
            .with_pos("noun")
            .with_gender("masculine")
            .with_plural("die Tische")
            .with_example("Der Tisch ist groß.")];
        let root = build_hierarchy(&bindings, "subtopic");
        let rendered = root.to_tree_string().to_string();

        assert!(rendered.starts_with("360°Deutsch KG"));
        assert!(rendered.contains("Other (subcategory)"));
        assert!(rendered.contains("Nouns (pos)"));
        assert!(rendered.contains("der Tisch (pl. Tische)"));
        assert!(rendered.contains("» Der Tisch ist groß."));
    }
}
