//! Tests for the hierarchy builder

use std::collections::HashSet;

use itertools::Itertools;
use rstest::rstest;

use lexitree::domain::{build_hierarchy, Binding, HierarchyNode, NodeType};
use lexitree::util::testing;

fn tisch(example: &str) -> Binding {
    Binding::new("http://ailand.org/E1", "Tisch")
        .with_level("A1")
        .with_topic("Home")
        .with_sub_topic("Büro")
        .with_pos("noun")
        .with_example(example)
}

fn mixed_rows() -> Vec<Binding> {
    vec![
        tisch("Der Tisch ist groß.").with_gender("masculine"),
        Binding::new("http://ailand.org/E2", "Lampe")
            .with_level("A1")
            .with_topic("Home")
            .with_sub_topic("Wohnzimmer")
            .with_pos("noun")
            .with_gender("feminine")
            .with_plural("die Lampen"),
        Binding::new("http://ailand.org/E3", "schreiben")
            .with_level("A1")
            .with_topic("Work")
            .with_sub_topic("Büro")
            .with_pos("verb")
            .with_example("Ich schreibe."),
        Binding::new("http://ailand.org/E4", "Kaffee").with_level("A2"),
        tisch("Ich kaufe einen Tisch."),
    ]
}

/// (id, label, type, children ids) for every node, pre-order.
fn shape(root: &HierarchyNode) -> Vec<(String, String, NodeType, Vec<String>)> {
    root.descendants()
        .into_iter()
        .map(|n| {
            (
                n.id.clone(),
                n.label.clone(),
                n.node_type,
                n.children.iter().map(|c| c.id.clone()).collect(),
            )
        })
        .collect()
}

fn single_child(node: &HierarchyNode) -> &HierarchyNode {
    assert_eq!(
        node.children.len(),
        1,
        "expected one child under {}, got {:?}",
        node.id,
        node.children.iter().map(|c| &c.id).collect::<Vec<_>>()
    );
    &node.children[0]
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn given_two_rows_for_one_entry_when_building_then_single_path_with_sorted_examples() {
    testing::init_test_setup();
    // Arrange
    let bindings = vec![
        tisch("Der Tisch ist groß.").with_gender("masculine"),
        tisch("Ich kaufe einen Tisch."),
    ];

    // Act
    let root = build_hierarchy(&bindings, "level");

    // Assert
    assert_eq!(root.node_type, NodeType::Root);
    let level = single_child(&root);
    assert_eq!((level.label.as_str(), level.node_type), ("A1", NodeType::Level));
    let topic = single_child(level);
    assert_eq!((topic.label.as_str(), topic.node_type), ("Home", NodeType::Category));
    let sub = single_child(topic);
    assert_eq!((sub.label.as_str(), sub.node_type), ("Büro", NodeType::Subcategory));
    let pos = single_child(sub);
    assert_eq!((pos.id.as_str(), pos.node_type), ("Noun", NodeType::Pos));
    let entry = single_child(pos);
    assert_eq!(entry.label, "Tisch");
    assert_eq!(entry.node_type, NodeType::Entry);
    assert_eq!(entry.gender(), Some("der"));
    assert_eq!(
        entry.examples(),
        Some(&["Der Tisch ist groß.".to_string(), "Ich kaufe einen Tisch.".to_string()][..])
    );
}

#[test]
fn given_row_without_subtopic_when_building_then_other_sibling_is_created() {
    // Arrange
    let mut second = tisch("Ich kaufe einen Tisch.");
    second.sub_topic = None;
    let bindings = vec![tisch("Der Tisch ist groß.").with_gender("masculine"), second];

    // Act
    let root = build_hierarchy(&bindings, "level");

    // Assert
    let topic = single_child(single_child(&root));
    let subs: Vec<_> = topic.children.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(subs, vec!["Büro", "Other"]);
    assert_eq!(topic.children[1].id, "A1_Home_Other");
    assert!(topic
        .children
        .iter()
        .all(|c| c.node_type == NodeType::Subcategory));
}

// ============================================================
// Properties
// ============================================================

#[test]
fn given_same_input_when_building_twice_then_trees_are_identical() {
    let rows = mixed_rows();
    for primary in ["level", "topic", "subtopic"] {
        let first = build_hierarchy(&rows, primary);
        let second = build_hierarchy(&rows, primary);
        assert_eq!(first.count(), second.count());
        assert_eq!(shape(&first), shape(&second));
        assert_eq!(first, second);
    }
}

#[test]
fn given_repeated_values_when_building_then_no_duplicate_children() {
    let mut rows = mixed_rows();
    rows.extend(mixed_rows());

    let root = build_hierarchy(&rows, "level");

    for node in root.descendants() {
        let ids: HashSet<_> = node.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), node.children.len(), "duplicate child under {}", node.id);
        let labels: HashSet<_> = node
            .children
            .iter()
            .filter(|c| !c.is_entry())
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(
            labels.len(),
            node.children.iter().filter(|c| !c.is_entry()).count(),
            "duplicate group under {}",
            node.id
        );
    }
    assert_eq!(root.count(), build_hierarchy(&mixed_rows(), "level").count());
}

#[test]
fn given_same_subtopic_under_two_topics_when_building_then_two_distinct_nodes() {
    let root = build_hierarchy(&mixed_rows(), "level");

    let buero: Vec<_> = root
        .descendants()
        .into_iter()
        .filter(|n| n.node_type == NodeType::Subcategory && n.label == "Büro")
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(buero, vec!["A1_Home_Büro", "A1_Work_Büro"]);
}

#[test]
fn given_examples_in_any_order_when_building_then_same_sorted_distinct_list() {
    let examples = ["c: Am Tisch.", "a: Der Tisch.", "b: Ein Tisch."];
    let expected: Vec<String> = {
        let mut v: Vec<String> = examples.iter().map(|e| e.to_string()).collect();
        v.sort();
        v
    };

    for perm in examples.iter().permutations(examples.len()) {
        let mut rows: Vec<Binding> = perm.iter().map(|e| tisch(e)).collect();
        rows.push(tisch(perm[1]));

        let root = build_hierarchy(&rows, "level");

        let entries = root.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].examples(), Some(&expected[..]));
    }
}

#[rstest]
#[case("level", NodeType::Level)]
#[case("topic", NodeType::Category)]
#[case("subtopic", NodeType::Subcategory)]
#[case("nonsense", NodeType::Level)]
fn given_primary_when_building_then_root_children_have_matching_type(
    #[case] primary: &str,
    #[case] expected: NodeType,
) {
    let root = build_hierarchy(&mixed_rows(), primary);

    assert!(!root.children.is_empty());
    assert!(root.children.iter().all(|c| c.node_type == expected));
}

#[test]
fn given_subtopic_primary_when_building_then_entries_sit_two_levels_below_root_children() {
    let root = build_hierarchy(&mixed_rows(), "subtopic");

    let ids: Vec<_> = root.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["Büro", "Wohnzimmer", "Other"]);
    for sub in &root.children {
        for pos in &sub.children {
            assert_eq!(pos.node_type, NodeType::Pos);
            assert!(pos.children.iter().all(|e| e.node_type == NodeType::Entry));
        }
    }
}

#[test]
fn given_empty_input_when_building_then_root_without_children() {
    let root = build_hierarchy(&[], "level");

    assert_eq!(root.node_type, NodeType::Root);
    assert_eq!(root.id, "KG_ROOT");
    assert!(root.children.is_empty());
}

#[test]
fn given_unknown_primary_when_building_then_full_layer_order_is_used() {
    let rows = mixed_rows();
    assert_eq!(build_hierarchy(&rows, "room"), build_hierarchy(&rows, "level"));
}

#[test]
fn given_entry_in_two_categories_when_building_then_one_node_per_path() {
    let rows = vec![tisch("x"), tisch("y").with_topic("Work").with_sub_topic("Büro")];

    let root = build_hierarchy(&rows, "level");

    let entries = root.entries();
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry.examples().map(|e| e.len()), Some(2));
    }
}

#[test]
fn given_rows_without_optional_fields_when_building_then_defaults_apply() {
    let rows = vec![Binding::new("E9", "etwas")];

    let root = build_hierarchy(&rows, "level");

    let path: Vec<_> = root
        .descendants()
        .into_iter()
        .map(|n| (n.id.as_str(), n.node_type))
        .collect();
    assert_eq!(
        path,
        vec![
            ("KG_ROOT", NodeType::Root),
            ("Unknown", NodeType::Level),
            ("Unknown_General", NodeType::Category),
            ("Unknown_General_Other", NodeType::Subcategory),
            ("Unknown", NodeType::Pos),
            ("etwas", NodeType::Entry),
        ]
    );
    let entry = root.entries()[0];
    assert_eq!(entry.gender(), None);
    assert_eq!(entry.plural(), None);
    assert_eq!(entry.examples(), None);
}

#[test]
fn given_children_when_building_then_first_creation_order_is_kept() {
    let rows = vec![
        Binding::new("E1", "b").with_level("B1"),
        Binding::new("E2", "a").with_level("A1"),
        Binding::new("E3", "c").with_level("B1"),
    ];

    let root = build_hierarchy(&rows, "level");

    let ids: Vec<_> = root.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["B1", "A1"]);
    let sorted = root.sorted();
    let ids: Vec<_> = sorted.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "B1"]);
}

#[test]
fn given_plural_with_article_when_building_then_article_is_stripped() {
    let rows = vec![Binding::new("E2", "Lampe")
        .with_pos("noun")
        .with_gender("feminine")
        .with_plural("die Lampen")
        .with_ipa("ˈlampə")];

    let root = build_hierarchy(&rows, "topic");

    let entry = root.entries()[0];
    assert_eq!(entry.gender(), Some("die"));
    assert_eq!(entry.plural(), Some("Lampen"));
    assert_eq!(entry.ipa(), Some("ˈlampə"));
}

#[test]
fn given_tree_when_serializing_then_wire_format_omits_unset_fields() {
    let root = build_hierarchy(&[tisch("Der Tisch ist groß.")], "subtopic");

    let json = serde_json::to_value(&root).unwrap();

    assert_eq!(json["type"], "root");
    let pos = &json["children"][0]["children"][0];
    assert_eq!(pos["type"], "pos");
    assert_eq!(pos["label"], "Nouns");
    let entry = &pos["children"][0];
    assert_eq!(entry["id"], "Tisch");
    assert_eq!(entry["examples"], serde_json::json!(["Der Tisch ist groß."]));
    assert!(entry.get("gender").is_none());
    assert!(json.get("examples").is_none());
}

#[test]
fn given_concurrent_calls_when_building_then_results_are_independent() {
    let rows = mixed_rows();
    let expected = build_hierarchy(&rows, "topic");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let rows = rows.clone();
            std::thread::spawn(move || build_hierarchy(&rows, "topic"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn given_colliding_entry_labels_when_building_then_sibling_ids_stay_unique() {
    // Arrange
    let rows = vec![
        Binding::new("http://ailand.org/E9", "Bank_E2").with_pos("noun"),
        Binding::new("http://ailand.org/E1", "Bank").with_pos("noun"),
        Binding::new("http://ailand.org/E2", "Bank").with_pos("noun"),
        Binding::new("http://other.org/kg#E1", "Bank").with_pos("noun"),
        Binding::new("http://third.org/kg#E1", "Bank").with_pos("noun"),
    ];

    // Act
    let root = build_hierarchy(&rows, "subtopic");

    // Assert
    let pos = single_child(single_child(&root));
    let ids: Vec<_> = pos.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["Bank_E2", "Bank", "Bank_E2_2", "Bank_E1", "Bank_E1_2"]
    );
    let distinct: HashSet<_> = ids.iter().collect();
    assert_eq!(distinct.len(), ids.len());
    assert!(pos.children.iter().skip(1).all(|c| c.label == "Bank"));
}
