//! # Property Documentation Library
//!
//! This library extracts a navigable model of configuration properties from
//! record type declarations, for documentation generators that emit property
//! reference pages for build-system configuration schemas.
//!
//! ## Quick Example
//!
//! ```
//! use propdoc::ast::{FieldDecl, TypeDecl, TypeExpr};
//! use propdoc::builder::build_property_struct;
//! use propdoc::naming::LowerFirst;
//!
//! let decl = TypeDecl {
//!     name: "Options".to_string(),
//!     doc: "Options for a module.".to_string(),
//!     ty: TypeExpr::record(vec![
//!         FieldDecl::named("Name", TypeExpr::ident("string")),
//!         FieldDecl::named("Count", TypeExpr::array(TypeExpr::ident("int"))),
//!     ]),
//! };
//!
//! let tree = build_property_struct(&decl, &LowerFirst).unwrap();
//! assert_eq!(tree.properties.len(), 2);
//! assert_eq!(tree.get("count").unwrap().typ, "list of int");
//! ```
//!
//! ## Core Concepts
//!
//! - **Declarations (`ast`)**: The abstract shape of the documented types,
//!   constructed in memory or loaded from YAML.
//! - **Building (`builder`, `shape`)**: Walks a record declaration and
//!   resolves each field's type into a descriptor and nested properties.
//! - **Property Trees (`property`)**: Deep cloning, structural equality,
//!   duplicate-free merging and dotted-path lookup.
//! - **Filtering (`filter`)**: Keeps or drops nodes by tag value.
//! - **Defaults (`defaults`)**: Stamps default values from a live instance.
//! - **Markup (`markup`)**: Renders doc comments as escaped markup with
//!   preformatted blocks for indented text.
//!
//! All operations are synchronous and in-memory. Trees are plain owned data;
//! mutating operations take `&mut` and need external serialization if shared
//! across threads.

pub mod ast;
pub mod builder;
pub mod config;
pub mod defaults;
pub mod error;
pub mod filter;
pub mod markup;
pub mod naming;
pub mod outline;
pub mod property;
pub mod shape;
pub mod tag;

pub use error::{Error, Result};
pub use property::{Property, PropertyStruct};

#[cfg(test)]
mod property_proptest;
