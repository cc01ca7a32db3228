//! Binding default values from a live instance.
//!
//! A live instance of the documented type (typically the value a module
//! factory starts from) is serialized into a [`LiveValue`] and walked
//! alongside the property tree. Every leaf whose field holds a non-zero value
//! gets that value's text as its `default`. An option holding a value is
//! never zero, so `Some(false)` is documented while `None` is not.
//!
//! The live type must have a field for every documented property. A missing
//! field means the documented type and the runtime type are out of sync, which
//! is a defect in the program rather than bad input, so it panics.

mod value;

pub use value::{to_live_value, LiveValue, SerializeError};

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::naming::NamingConvention;
use crate::property::{Property, PropertyStruct};

impl PropertyStruct {
    /// Stamps defaults from `defaults` onto this tree.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if `defaults` cannot be serialized.
    ///
    /// # Panics
    ///
    /// Panics if `defaults` is not a record, or lacks a field for one of the
    /// documented properties.
    pub fn set_defaults<T: Serialize + ?Sized>(
        &mut self,
        defaults: &T,
        naming: &dyn NamingConvention,
    ) -> Result<()> {
        let value = to_live_value(defaults).map_err(|e| Error::Serialization {
            message: e.to_string(),
        })?;
        self.set_defaults_from_live(&value, naming);
        Ok(())
    }

    /// Stamps defaults from an already serialized live instance.
    ///
    /// # Panics
    ///
    /// Same conditions as [`PropertyStruct::set_defaults`].
    pub fn set_defaults_from_live(&mut self, defaults: &LiveValue, naming: &dyn NamingConvention) {
        let defaults = defaults.unwrap_option();
        if !defaults.has_fields() {
            panic!(
                "defaults for {:?} must be a struct, got {}",
                self.name, defaults
            );
        }
        set_defaults(&mut self.properties, defaults, &self.name, naming);
    }
}

fn set_defaults(
    properties: &mut [Property],
    defaults: &LiveValue,
    owner: &str,
    naming: &dyn NamingConvention,
) {
    for prop in properties.iter_mut() {
        let field_name = naming.field_name_for_property(&prop.name);
        let Some(field) = defaults.field(&field_name) else {
            panic!("property {:?} does not exist in {:?}", field_name, owner);
        };

        if field.is_zero() {
            continue;
        }

        match field.unwrap_option() {
            nested @ LiveValue::Struct(_) => {
                let owner = format!("{}.{}", owner, field_name);
                set_defaults(&mut prop.properties, nested, &owner, naming);
            }
            nested @ LiveValue::Map(_) if !prop.is_leaf() => {
                let owner = format!("{}.{}", owner, field_name);
                set_defaults(&mut prop.properties, nested, &owner, naming);
            }
            value => {
                let rendered = value.to_string();
                debug!("Default for '{}' is {}", prop.name, rendered);
                prop.default = Some(rendered);
            }
        }
    }
}
