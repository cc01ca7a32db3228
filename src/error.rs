//! # Error Handling
//!
//! This module defines the centralized error type for `propdoc`. It uses the
//! `thiserror` library to derive an `Error` enum covering every recoverable
//! failure of building, loading, and annotating property trees.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Structural failures (`NotARecord`,
//!   `UnknownType`, `TagParse`) abort building a single type's tree; the
//!   caller may skip that type and continue with others.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A live defaults instance that lacks a field the documented tree expects is
//! *not* represented here. That condition means the documented type and the
//! runtime type have drifted apart, and `PropertyStruct::set_defaults` panics on it.

use thiserror::Error;

/// Main error type for propdoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// The top-level declaration handed to the builder is not a record type.
    #[error("Type of {name:?} is not a struct")]
    NotARecord { name: String },

    /// A field's type expression matches none of the documented shapes.
    ///
    /// `dump` holds a structural dump of the offending type expression.
    #[error("Unknown type {dump}")]
    UnknownType { dump: String },

    /// A field tag literal is not a validly quoted string.
    #[error("Tag parsing error for {tag}: {message}")]
    TagParse { tag: String, message: String },

    /// A declaration document could be read but does not describe valid
    /// declarations.
    #[error("Declaration parsing error: {message}")]
    DeclarationParse { message: String },

    /// A builder configuration document is invalid.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// A live defaults instance could not be serialized for inspection.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
