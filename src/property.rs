//! # Property Trees
//!
//! A [`PropertyStruct`] documents one record type. Its [`Property`] nodes
//! document fields, in declaration order, and nest to describe fields whose
//! type is itself a record (directly, as a list, or wrapped in a configurable
//! value).
//!
//! Node order is what renderers emit, so every operation in this module
//! preserves it. A node's ancestors are implied by its position in the tree;
//! [`PropertyStruct::get_by_name`] rebuilds the dotted path while descending.
//!
//! Trees own their nodes outright. Cloning is a deep copy, and lookups hand
//! out borrows into the tree so callers can edit nodes in place.

use crate::markup::Markup;
use crate::tag::Tag;
use serde::{Deserialize, Serialize};

/// Documentation for one record type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyStruct {
    /// The type's declared name.
    pub name: String,
    /// Markup rendered from the type's doc comment.
    pub text: Markup,
    /// Documented fields in declaration order.
    pub properties: Vec<Property>,
}

/// Documentation for one field, possibly a nested group of fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Property {
    /// External property name, without any ancestor prefix.
    pub name: String,
    /// Type descriptor, e.g. `string`, `list of string`, `configurable bool`.
    #[serde(rename = "type")]
    pub typ: String,
    /// The field's unquoted tag.
    pub tag: Tag,
    /// Markup rendered from the field's doc comment.
    pub text: Markup,
    /// Alternate spellings of this property recorded by callers.
    #[serde(default)]
    pub other_names: Vec<String>,
    /// Alternate descriptions of this property recorded by callers.
    #[serde(default)]
    pub other_texts: Vec<Markup>,
    /// Whether the field was embedded rather than declared with a name.
    #[serde(default)]
    pub anonymous: bool,
    /// Rendered default value, when one has been bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Nested properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl PropertyStruct {
    /// Looks up a node by its dotted path, e.g. `target.android.cflags`.
    ///
    /// The returned borrow points into this tree, so edits through it are
    /// edits to the tree.
    pub fn get_by_name(&mut self, name: &str) -> Option<&mut Property> {
        get_by_name_mut(name, "", &mut self.properties)
    }

    /// Shared-borrow variant of [`PropertyStruct::get_by_name`].
    pub fn get(&self, name: &str) -> Option<&Property> {
        get_by_name_ref(name, "", &self.properties)
    }

    /// Appends every node of `nested` that is not already present.
    pub fn nest(&mut self, nested: &PropertyStruct) {
        nest_unique(&mut self.properties, &nested.properties);
    }
}

impl Property {
    /// Structural equality over every field except `anonymous`, recursing into
    /// nested properties in order.
    pub fn equal(&self, other: &Property) -> bool {
        self.name == other.name
            && self.typ == other.typ
            && self.tag == other.tag
            && self.text == other.text
            && self.default == other.default
            && self.other_names == other.other_names
            && self.other_texts == other.other_texts
            && self.same_sub_properties(other)
    }

    /// Returns true if both nodes have equal nested properties, in the same
    /// order.
    pub fn same_sub_properties(&self, other: &Property) -> bool {
        self.properties.len() == other.properties.len()
            && self
                .properties
                .iter()
                .zip(&other.properties)
                .all(|(a, b)| a.equal(b))
    }

    /// Appends every node of `nested` not already present under this node.
    pub fn nest(&mut self, nested: &PropertyStruct) {
        nest_unique(&mut self.properties, &nested.properties);
    }

    pub fn set_anonymous(&mut self) {
        self.anonymous = true;
    }

    /// Returns true if this node has no nested properties.
    pub fn is_leaf(&self) -> bool {
        self.properties.is_empty()
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Property {}

/// Appends each node of `additions` to `props` unless an equal node is
/// already there, including nodes appended earlier in the same call.
fn nest_unique(props: &mut Vec<Property>, additions: &[Property]) {
    for elem in additions {
        if !props.iter().any(|existing| existing.equal(elem)) {
            props.push(elem.clone());
        }
    }
}

fn get_by_name_mut<'a>(
    name: &str,
    prefix: &str,
    props: &'a mut [Property],
) -> Option<&'a mut Property> {
    for prop in props.iter_mut() {
        let path = format!("{}{}", prefix, prop.name);
        if path == name {
            return Some(prop);
        }
        let nested_prefix = format!("{}.", path);
        if name.starts_with(&nested_prefix) {
            return get_by_name_mut(name, &nested_prefix, &mut prop.properties);
        }
    }
    None
}

fn get_by_name_ref<'a>(name: &str, prefix: &str, props: &'a [Property]) -> Option<&'a Property> {
    for prop in props {
        let path = format!("{}{}", prefix, prop.name);
        if path == name {
            return Some(prop);
        }
        let nested_prefix = format!("{}.", path);
        if name.starts_with(&nested_prefix) {
            return get_by_name_ref(name, &nested_prefix, &prop.properties);
        }
    }
    None
}
