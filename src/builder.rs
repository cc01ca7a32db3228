//! # Property Tree Construction
//!
//! This module turns a record type declaration into a [`PropertyStruct`].
//!
//! ## Process
//!
//! 1.  **Record Check**: The declaration's type must be a record; anything
//!     else is rejected with `Error::NotARecord`.
//!
//! 2.  **Field Walk**: Fields are visited in declaration order. A field with
//!     several names yields one property per name, all sharing the field's
//!     type, tag and doc text. An embedded field is named after its type's
//!     identifier; an embedded field whose type has no identifier is dropped.
//!
//! 3.  **Per-Field Resolution**: The tag literal is unquoted, the doc comment
//!     is formatted as markup, and the type is resolved into a descriptor and
//!     nested properties (see [`crate::shape`]).
//!
//! Building is a pure function of the declaration and the naming convention.

use log::{debug, warn};

use crate::ast::{FieldDecl, TypeDecl, TypeExpr};
use crate::config::default_configurable_markers;
use crate::error::{Error, Result};
use crate::markup::format_text;
use crate::naming::NamingConvention;
use crate::property::{Property, PropertyStruct};
use crate::tag::{unquote_tag, Tag};

/// Builds property trees from type declarations.
pub struct PropertyBuilder<'a> {
    naming: &'a dyn NamingConvention,
    configurable_markers: Vec<String>,
}

impl<'a> PropertyBuilder<'a> {
    /// Creates a builder using `naming` for property names and the default
    /// configurable markers.
    pub fn new(naming: &'a dyn NamingConvention) -> Self {
        Self {
            naming,
            configurable_markers: default_configurable_markers(),
        }
    }

    /// Replaces the generic base names treated as configurable wrappers.
    pub fn with_configurable_markers(mut self, markers: Vec<String>) -> Self {
        self.configurable_markers = markers;
        self
    }

    pub fn naming(&self) -> &'a dyn NamingConvention {
        self.naming
    }

    pub fn configurable_markers(&self) -> &[String] {
        &self.configurable_markers
    }

    /// Builds the property tree documenting `decl`.
    ///
    /// # Errors
    ///
    /// - `Error::NotARecord` if `decl` is not a record type.
    /// - `Error::TagParse` if a field tag literal is not validly quoted.
    /// - `Error::UnknownType` if a field type has an unsupported shape.
    pub fn build(&self, decl: &TypeDecl) -> Result<PropertyStruct> {
        let TypeExpr::Struct { fields, .. } = &decl.ty else {
            return Err(Error::NotARecord {
                name: decl.name.clone(),
            });
        };

        debug!(
            "Building properties for {} ({} fields)",
            decl.name,
            fields.len()
        );

        Ok(PropertyStruct {
            name: decl.name.clone(),
            text: format_text(&decl.doc),
            properties: self.struct_properties(fields)?,
        })
    }

    /// Builds one property per declared field name, in declaration order.
    pub fn struct_properties(&self, fields: &[FieldDecl]) -> Result<Vec<Property>> {
        let mut props = Vec::new();

        for field in fields {
            let names: Vec<&str> = if field.is_embedded() {
                match field.ty.identifier() {
                    Some(name) => vec![name],
                    None => {
                        warn!(
                            "Dropping embedded field of type {}: it has no name to document it under",
                            field.ty
                        );
                        continue;
                    }
                }
            } else {
                field.names.iter().map(String::as_str).collect()
            };

            let text = format_text(field.doc.as_deref().unwrap_or_default());
            let tag = match &field.tag {
                Some(literal) => unquote_tag(literal)?,
                None => Tag::default(),
            };
            let (typ, inner) = self.resolve_type(&field.ty)?;

            for name in names {
                props.push(Property {
                    name: self.naming.property_name_for_field(name),
                    typ: typ.clone(),
                    tag: tag.clone(),
                    text: text.clone(),
                    properties: inner.clone(),
                    ..Property::default()
                });
            }
        }

        Ok(props)
    }
}

/// Builds the property tree for `decl` with the default configurable markers.
///
/// # Errors
///
/// See [`PropertyBuilder::build`].
pub fn build_property_struct(
    decl: &TypeDecl,
    naming: &dyn NamingConvention,
) -> Result<PropertyStruct> {
    PropertyBuilder::new(naming).build(decl)
}
