//! Property-based tests for property tree operations.
//!
//! These tests use proptest to generate random trees and verify that the
//! cloning, merging, lookup and filtering invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::property::{Property, PropertyStruct};
    use crate::tag::Tag;
    use proptest::prelude::*;

    const TAGS: [&str; 4] = [
        "",
        r#"android:"arch_variant""#,
        r#"android:"path,arch_variant""#,
        r#"blueprint:"mutated""#,
    ];

    fn arb_leaf() -> impl Strategy<Value = Property> {
        (
            "[a-c]{1,2}",
            prop::sample::select(vec!["string", "bool", "list of string"]),
            prop::sample::select(TAGS.to_vec()),
            prop::option::of("[a-z0-9]{1,4}"),
        )
            .prop_map(|(name, typ, tag, default)| Property {
                name,
                typ: typ.to_string(),
                tag: Tag::new(tag),
                default,
                ..Property::default()
            })
    }

    fn arb_property() -> impl Strategy<Value = Property> {
        arb_leaf().prop_recursive(3, 24, 4, |inner| {
            (arb_leaf(), prop::collection::vec(inner, 0..4)).prop_map(|(mut node, children)| {
                node.typ = String::new();
                node.properties = unique_names(children);
                node
            })
        })
    }

    fn arb_tree() -> impl Strategy<Value = PropertyStruct> {
        prop::collection::vec(arb_property(), 0..5).prop_map(|props| PropertyStruct {
            name: "Generated".to_string(),
            properties: unique_names(props),
            ..PropertyStruct::default()
        })
    }

    /// Suffixes sibling names with their index so dotted paths are unambiguous.
    fn unique_names(mut props: Vec<Property>) -> Vec<Property> {
        for (i, prop) in props.iter_mut().enumerate() {
            prop.name = format!("{}{}", prop.name, i);
        }
        props
    }

    fn all_paths(props: &[Property], prefix: &str, out: &mut Vec<String>) {
        for prop in props {
            let path = format!("{}{}", prefix, prop.name);
            all_paths(&prop.properties, &format!("{}.", path), out);
            out.push(path);
        }
    }

    fn all_nodes(props: &[Property]) -> Vec<&Property> {
        let mut nodes = Vec::new();
        for prop in props {
            nodes.push(prop);
            nodes.extend(all_nodes(&prop.properties));
        }
        nodes
    }

    // ============================================================================
    // Clone / Equal property tests
    // ============================================================================

    proptest! {
        /// Property: a clone is equal to its source
        #[test]
        fn clone_is_equal(tree in arb_tree()) {
            let copy = tree.clone();
            prop_assert_eq!(&copy, &tree);
            for (a, b) in copy.properties.iter().zip(&tree.properties) {
                prop_assert!(a.equal(b));
            }
        }

        /// Property: mutating a clone never affects the source
        #[test]
        fn clone_does_not_alias(tree in arb_tree()) {
            let snapshot = tree.clone();
            let mut copy = tree.clone();

            let mut paths = Vec::new();
            all_paths(&copy.properties, "", &mut paths);
            for path in paths {
                let node = copy.get_by_name(&path).unwrap();
                node.default = Some("mutated".to_string());
                node.other_names.push("alias".to_string());
            }
            copy.properties.push(Property::default());

            prop_assert_eq!(&tree, &snapshot);
        }
    }

    // ============================================================================
    // Nest property tests
    // ============================================================================

    proptest! {
        /// Property: nesting keeps the original nodes first and appends only
        /// nodes of the addition not equal to anything already present
        #[test]
        fn nest_is_stable_and_unique(a in arb_tree(), b in arb_tree()) {
            let mut merged = a.clone();
            merged.nest(&b);

            prop_assert!(merged.properties.len() >= a.properties.len());
            prop_assert_eq!(&merged.properties[..a.properties.len()], &a.properties[..]);

            let appended = &merged.properties[a.properties.len()..];
            for (i, node) in appended.iter().enumerate() {
                let earlier = a.properties.iter().chain(&appended[..i]);
                for other in earlier {
                    prop_assert!(!node.equal(other));
                }
            }

            // Appended nodes are a subsequence of the addition, in its order.
            let mut source = b.properties.iter();
            for node in appended {
                prop_assert!(source.any(|candidate| candidate.equal(node)));
            }

            for node in &b.properties {
                prop_assert!(merged.properties.iter().any(|m| m.equal(node)));
            }
        }

        /// Property: nesting the same addition twice is a no-op the second time
        #[test]
        fn nest_is_idempotent(a in arb_tree(), b in arb_tree()) {
            let mut once = a.clone();
            once.nest(&b);
            let mut twice = once.clone();
            twice.nest(&b);
            prop_assert_eq!(once, twice);
        }
    }

    // ============================================================================
    // GetByName property tests
    // ============================================================================

    proptest! {
        /// Property: every dotted path in the tree resolves to the node at that path
        #[test]
        fn get_by_name_finds_every_path(tree in arb_tree()) {
            let mut paths = Vec::new();
            all_paths(&tree.properties, "", &mut paths);

            for path in paths {
                let node = tree.get(&path);
                prop_assert!(node.is_some(), "path {} not found", path);
                let last = path.rsplit('.').next().unwrap();
                prop_assert_eq!(&node.unwrap().name, last);
            }
        }

        /// Property: paths absent from the tree are not found
        #[test]
        fn get_by_name_misses_absent_paths(mut tree in arb_tree(), suffix in "[x-z]{1,3}") {
            prop_assert!(tree.get(&suffix).is_none());
            let nested = format!("a0.{}", suffix);
            prop_assert!(tree.get_by_name(&nested).is_none());
        }
    }

    // ============================================================================
    // Tag filter property tests
    // ============================================================================

    proptest! {
        /// Property: including by tag leaves only nodes carrying the value
        #[test]
        fn include_keeps_only_matching(mut tree in arb_tree()) {
            tree.include_by_tag("android", "arch_variant");
            for node in all_nodes(&tree.properties) {
                prop_assert!(node.tag.has_value("android", "arch_variant"));
            }
        }

        /// Property: excluding by tag leaves only nodes lacking the value
        #[test]
        fn exclude_keeps_only_non_matching(mut tree in arb_tree()) {
            tree.exclude_by_tag("android", "path");
            for node in all_nodes(&tree.properties) {
                prop_assert!(!node.tag.has_value("android", "path"));
            }
        }

        /// Property: include followed by exclude on the same value empties the tree
        #[test]
        fn include_then_exclude_is_empty(mut tree in arb_tree()) {
            tree.include_by_tag("blueprint", "mutated");
            tree.exclude_by_tag("blueprint", "mutated");
            prop_assert!(tree.properties.is_empty());
        }

        /// Property: filtering preserves the relative order of survivors
        #[test]
        fn filter_preserves_order(tree in arb_tree()) {
            let mut filtered = tree.clone();
            filtered.exclude_by_tag("blueprint", "mutated");

            let mut source = tree.properties.iter();
            for node in &filtered.properties {
                prop_assert!(source.any(|candidate| candidate.name == node.name));
            }
        }
    }
}
