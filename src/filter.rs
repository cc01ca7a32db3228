//! Tag-based filtering of property trees.
//!
//! Filtering keeps or drops nodes depending on whether their tag lists a
//! given value under a given key. Children of every kept node are filtered
//! with the same predicate; a kept node may end up with no children, which
//! does not remove it. Filtering only ever selects a subsequence, so the
//! surviving nodes keep their relative order.

use log::trace;

use crate::property::{Property, PropertyStruct};

impl PropertyStruct {
    /// Keeps only nodes whose tag has `value` under `key`, recursively.
    pub fn include_by_tag(&mut self, key: &str, value: &str) {
        self.filter_by_tag(key, value, false);
    }

    /// Drops nodes whose tag has `value` under `key`, recursively.
    pub fn exclude_by_tag(&mut self, key: &str, value: &str) {
        self.filter_by_tag(key, value, true);
    }

    /// Keeps a node when `exclude` differs from whether its tag has `value`
    /// under `key`.
    pub fn filter_by_tag(&mut self, key: &str, value: &str, exclude: bool) {
        filter_props_by_tag(&mut self.properties, key, value, exclude);
    }
}

fn filter_props_by_tag(props: &mut Vec<Property>, key: &str, value: &str, exclude: bool) {
    props.retain_mut(|prop| {
        let keep = prop.tag.has_value(key, value) != exclude;
        if keep {
            filter_props_by_tag(&mut prop.properties, key, value, exclude);
        } else {
            trace!(
                "Dropping property '{}' ({}:{} exclude={})",
                prop.name,
                key,
                value,
                exclude
            );
        }
        keep
    });
}
