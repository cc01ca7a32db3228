//! Field name <-> property name conventions.
//!
//! The builder maps each declared field name to the external property name
//! users write in their configuration files, and the defaults binder maps the
//! property name back to look the field up on a live instance. Both sides must
//! use the same convention, so it is passed in explicitly rather than assumed.

use serde::{Deserialize, Serialize};

/// A bidirectional, pure mapping between declared field names and external
/// property names.
pub trait NamingConvention {
    /// Maps a declared field name to its external property name.
    fn property_name_for_field(&self, field_name: &str) -> String;

    /// Maps an external property name back to the declared field name.
    fn field_name_for_property(&self, property_name: &str) -> String;
}

/// Lower-cases the first character of a field name (`CFlags` -> `cFlags`) and
/// upper-cases it again in the other direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowerFirst;

impl NamingConvention for LowerFirst {
    fn property_name_for_field(&self, field_name: &str) -> String {
        map_first_char(field_name, |c| c.to_lowercase().collect())
    }

    fn field_name_for_property(&self, property_name: &str) -> String {
        map_first_char(property_name, |c| c.to_uppercase().collect())
    }
}

/// Uses field names unchanged as property names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl NamingConvention for Identity {
    fn property_name_for_field(&self, field_name: &str) -> String {
        field_name.to_string()
    }

    fn field_name_for_property(&self, property_name: &str) -> String {
        property_name.to_string()
    }
}

/// Selects one of the built-in conventions from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStyle {
    #[default]
    LowerFirst,
    Identity,
}

impl NamingStyle {
    pub fn convention(self) -> &'static dyn NamingConvention {
        match self {
            NamingStyle::LowerFirst => &LowerFirst,
            NamingStyle::Identity => &Identity,
        }
    }
}

fn map_first_char(name: &str, f: impl FnOnce(char) -> String) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut out = f(first);
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
