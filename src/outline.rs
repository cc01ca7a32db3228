//! Plain-text outline of a property tree.
//!
//! Useful for eyeballing what a build, filter or defaults pass produced. Each
//! node is labelled `name (type)`, followed by ` = default` when a default
//! has been bound.

use ptree::TreeItem;
use std::borrow::Cow;
use std::io::Write;

use crate::error::Result;
use crate::property::{Property, PropertyStruct};

/// Tree node structure for ptree visualization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineNode {
    pub label: String,
    pub children: Vec<OutlineNode>,
}

impl TreeItem for OutlineNode {
    type Child = OutlineNode;

    fn write_self<W: Write>(&self, f: &mut W, _style: &ptree::Style) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}

/// Builds the outline of `tree`.
pub fn outline(tree: &PropertyStruct) -> OutlineNode {
    OutlineNode {
        label: tree.name.clone(),
        children: tree.properties.iter().map(outline_property).collect(),
    }
}

/// Writes the outline of `tree` to `writer`.
pub fn write_outline<W: Write>(tree: &PropertyStruct, writer: W) -> Result<()> {
    ptree::write_tree(&outline(tree), writer)?;
    Ok(())
}

fn outline_property(prop: &Property) -> OutlineNode {
    let mut label = prop.name.clone();
    if !prop.typ.is_empty() {
        label.push_str(&format!(" ({})", prop.typ));
    }
    if prop.anonymous {
        label.push_str(" [embedded]");
    }
    if let Some(default) = &prop.default {
        label.push_str(&format!(" = {}", default));
    }

    OutlineNode {
        label,
        children: prop.properties.iter().map(outline_property).collect(),
    }
}
