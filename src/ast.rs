//! # Declaration Model
//!
//! This module defines the abstract shape of the type declarations that
//! property trees are built from. A declaration is a named type with an
//! optional doc comment and a type expression; record types carry an ordered
//! field list where each field has zero or more names, a type expression, an
//! optional quoted tag literal, and an optional doc comment.
//!
//! Declarations are plain data: they can be constructed in memory by a
//! discovery front-end, or loaded from YAML with [`parse_declarations`].
//!
//! ## YAML Format
//!
//! ```yaml
//! - name: Options
//!   doc: Options for a module.
//!   type:
//!     struct:
//!       fields:
//!         - names: [Name]
//!           type: { ident: string }
//!           doc: The module name.
//!         - names: [Srcs]
//!           type: { array: { ident: string } }
//!           tag: '`android:"path,arch_variant"`'
//!         - type: { ident: Inner }      # embedded: no names
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single top-level type declaration to document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// The declared type name.
    pub name: String,
    /// Raw doc comment text attached to the declaration.
    #[serde(default)]
    pub doc: String,
    /// The declared shape; must be a record for the builder to accept it.
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

/// One entry in a record type's field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Declared names. Several names may share one type, tag and doc comment.
    /// An empty list marks an embedded (anonymous) field.
    #[serde(default)]
    pub names: Vec<String>,
    /// The field's type expression.
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// The tag literal exactly as written, including its quotes.
    #[serde(default)]
    pub tag: Option<String>,
    /// Raw doc comment text.
    #[serde(default)]
    pub doc: Option<String>,
}

impl FieldDecl {
    /// A named field of the given type.
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            names: vec![name.into()],
            ty,
            tag: None,
            doc: None,
        }
    }

    /// An embedded field, named after its type.
    pub fn embedded(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
            tag: None,
            doc: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Returns true when the field has no declared name.
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// The shape of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    /// A pointer to another type; transparent for documentation.
    Pointer(Box<TypeExpr>),
    /// A slice or array of another type.
    Array(Box<TypeExpr>),
    /// An interface or `any`.
    Interface,
    /// A bare identifier such as `string` or `Options`.
    Ident(String),
    /// A package-qualified identifier such as `proptools.Configurable`.
    Selector { package: String, name: String },
    /// A record type. `name` is set when the record is a named type whose
    /// fields are known, and absent for inline record literals.
    Struct {
        #[serde(default)]
        name: Option<String>,
        fields: Vec<FieldDecl>,
    },
    /// A generic instantiation `base[argument]`.
    Generic {
        base: Box<TypeExpr>,
        argument: Box<TypeExpr>,
    },
    /// A map type.
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// A function type.
    Func,
    /// A channel type.
    Chan(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    pub fn array(inner: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(inner))
    }

    pub fn generic(base: TypeExpr, argument: TypeExpr) -> Self {
        TypeExpr::Generic {
            base: Box::new(base),
            argument: Box::new(argument),
        }
    }

    pub fn selector(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Selector {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Strips a single level of pointer indirection.
    pub fn strip_pointer(&self) -> &TypeExpr {
        match self {
            TypeExpr::Pointer(inner) => inner,
            other => other,
        }
    }

    /// An inline record literal.
    pub fn record(fields: Vec<FieldDecl>) -> Self {
        TypeExpr::Struct { name: None, fields }
    }

    /// A named record type with known fields.
    pub fn named_record(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        TypeExpr::Struct {
            name: Some(name.into()),
            fields,
        }
    }

    /// The bare identifier naming this type, if it has one. Embedded fields
    /// take their name from it.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            TypeExpr::Ident(name) => Some(name),
            TypeExpr::Struct {
                name: Some(name), ..
            } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Array(inner) => write!(f, "[]{}", inner),
            TypeExpr::Interface => write!(f, "interface{{}}"),
            TypeExpr::Ident(name) => write!(f, "{}", name),
            TypeExpr::Selector { package, name } => write!(f, "{}.{}", package, name),
            TypeExpr::Struct {
                name: Some(name), ..
            } => write!(f, "{}", name),
            TypeExpr::Struct { name: None, fields } => {
                write!(f, "struct{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if field.names.is_empty() {
                        write!(f, "{}", field.ty)?;
                    } else {
                        write!(f, "{} {}", field.names.join(", "), field.ty)?;
                    }
                }
                write!(f, "}}")
            }
            TypeExpr::Generic { base, argument } => write!(f, "{}[{}]", base, argument),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Func => write!(f, "func()"),
            TypeExpr::Chan(inner) => write!(f, "chan {}", inner),
        }
    }
}

/// Parses a YAML document holding a list of type declarations.
pub fn parse_declarations(yaml_content: &str) -> Result<Vec<TypeDecl>> {
    if yaml_content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let decls: Vec<TypeDecl> = serde_yaml::from_str(yaml_content)?;
    for decl in &decls {
        validate_decl(decl)?;
    }

    Ok(decls)
}

/// Parses type declarations from a YAML file path
pub fn declarations_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<TypeDecl>> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse_declarations(&content)
}

fn validate_decl(decl: &TypeDecl) -> Result<()> {
    if decl.name.trim().is_empty() {
        return Err(Error::DeclarationParse {
            message: "Type declaration has an empty name".to_string(),
        });
    }
    validate_expr(&decl.name, &decl.ty)
}

fn validate_expr(owner: &str, expr: &TypeExpr) -> Result<()> {
    match expr {
        TypeExpr::Struct { fields, .. } => {
            for field in fields {
                if field.names.iter().any(|n| n.trim().is_empty()) {
                    return Err(Error::DeclarationParse {
                        message: format!("Field of {:?} has an empty name", owner),
                    });
                }
                validate_expr(owner, &field.ty)?;
            }
            Ok(())
        }
        TypeExpr::Pointer(inner) | TypeExpr::Array(inner) | TypeExpr::Chan(inner) => {
            validate_expr(owner, inner)
        }
        TypeExpr::Generic { base, argument } => {
            validate_expr(owner, base)?;
            validate_expr(owner, argument)
        }
        TypeExpr::Map { key, value } => {
            validate_expr(owner, key)?;
            validate_expr(owner, value)
        }
        TypeExpr::Interface | TypeExpr::Ident(_) | TypeExpr::Selector { .. } | TypeExpr::Func => {
            Ok(())
        }
    }
}
