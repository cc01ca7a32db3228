//! Type shape resolution.
//!
//! Every field type is first classified into a [`TypeShape`], after stripping
//! one level of pointer indirection. The shape decides the type descriptor
//! shown to users and whether the field gets nested properties.
//!
//! | Shape          | Descriptor                   | Nested properties        |
//! |----------------|------------------------------|--------------------------|
//! | `List`         | `list of <element>`          | the element's            |
//! | `Interface`    | `interface`                  | none                     |
//! | `Named`        | the identifier               | none                     |
//! | `Record`       | the record's name, or empty  | one per field            |
//! | `Configurable` | `configurable <argument>`    | the argument's           |
//! | `Fallback`     | the type's source text       | none                     |
//!
//! A generic instantiation of anything other than a configurable marker is
//! `Unknown` and fails to resolve.

use crate::ast::{FieldDecl, TypeExpr};
use crate::builder::PropertyBuilder;
use crate::error::{Error, Result};
use crate::property::Property;

/// The documentation-relevant shape of a type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape<'a> {
    List(&'a TypeExpr),
    Interface,
    Named(&'a str),
    Record {
        name: Option<&'a str>,
        fields: &'a [FieldDecl],
    },
    /// A configurable wrapper around its type argument.
    Configurable(&'a TypeExpr),
    /// A shape with no dedicated rendering (maps, funcs, channels, qualified
    /// names, nested pointers). Documented by its source text.
    Fallback(&'a TypeExpr),
    Unknown(&'a TypeExpr),
}

impl<'a> TypeShape<'a> {
    /// Classifies `expr`, treating a generic whose base is one of
    /// `configurable_markers` as a configurable wrapper.
    pub fn classify(expr: &'a TypeExpr, configurable_markers: &[String]) -> Self {
        match expr.strip_pointer() {
            TypeExpr::Array(elem) => TypeShape::List(elem),
            TypeExpr::Interface => TypeShape::Interface,
            TypeExpr::Ident(name) => TypeShape::Named(name),
            TypeExpr::Struct { name, fields } => TypeShape::Record {
                name: name.as_deref(),
                fields,
            },
            TypeExpr::Generic { base, argument } => {
                if is_configurable(base, configurable_markers) {
                    TypeShape::Configurable(argument)
                } else {
                    TypeShape::Unknown(expr)
                }
            }
            other @ (TypeExpr::Pointer(_)
            | TypeExpr::Selector { .. }
            | TypeExpr::Map { .. }
            | TypeExpr::Func
            | TypeExpr::Chan(_)) => TypeShape::Fallback(other),
        }
    }
}

fn is_configurable(base: &TypeExpr, markers: &[String]) -> bool {
    let name = match base {
        TypeExpr::Ident(name) => name.clone(),
        TypeExpr::Selector { package, name } => format!("{}.{}", package, name),
        _ => return false,
    };
    markers.iter().any(|marker| *marker == name)
}

impl PropertyBuilder<'_> {
    /// Resolves a field type into its descriptor and nested properties.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownType` for generic instantiations that are not
    /// configurable wrappers, and propagates tag errors from nested records.
    pub fn resolve_type(&self, expr: &TypeExpr) -> Result<(String, Vec<Property>)> {
        match TypeShape::classify(expr, self.configurable_markers()) {
            TypeShape::List(elem) => {
                let (elem_type, inner) = self.resolve_type(elem)?;
                Ok((format!("list of {}", elem_type), inner))
            }
            TypeShape::Interface => Ok(("interface".to_string(), Vec::new())),
            TypeShape::Named(name) => Ok((name.to_string(), Vec::new())),
            TypeShape::Record { name, fields } => Ok((
                name.unwrap_or_default().to_string(),
                self.struct_properties(fields)?,
            )),
            TypeShape::Configurable(argument) => {
                let (inner_type, inner) = self.resolve_type(argument)?;
                Ok((format!("configurable {}", inner_type), inner))
            }
            TypeShape::Fallback(other) => Ok((other.to_string(), Vec::new())),
            TypeShape::Unknown(other) => Err(Error::UnknownType {
                dump: format!("{:#?}", other),
            }),
        }
    }
}
