//! Shared test fixtures for integration tests.
//!
//! Add `mod common;` to a test file, then use the fixtures:
//!
//! ```rust,ignore
//! mod common;
//! use common::library_decl;
//! ```

use propdoc::ast::{FieldDecl, TypeDecl, TypeExpr};
use serde::Serialize;

/// Tag carried by properties that vary per architecture.
pub const ARCH_VARIANT: &str = r#"`android:"arch_variant"`"#;

/// Tag carried by path properties that also vary per architecture.
pub const PATH_ARCH_VARIANT: &str = r#"`android:"path,arch_variant"`"#;

/// Tag carried by properties set by mutators rather than users.
pub const MUTATED: &str = r#"`blueprint:"mutated"`"#;

/// A library module declaration exercising every field shape.
#[allow(dead_code)]
pub fn library_decl() -> TypeDecl {
    let mut flags = FieldDecl::named("Cflags", TypeExpr::array(TypeExpr::ident("string")))
        .with_tag(ARCH_VARIANT)
        .with_doc("Flags passed to the compiler.\n");
    flags.names.push("Asflags".to_string());

    TypeDecl {
        name: "LibraryProperties".to_string(),
        doc: "Properties of a library module.\n\nExample:\n  cc_library { name: \"libfoo\" }\n"
            .to_string(),
        ty: TypeExpr::record(vec![
            FieldDecl::named("Name", TypeExpr::pointer(TypeExpr::ident("string")))
                .with_doc("The name of the module. Must be unique.\n"),
            FieldDecl::named("Srcs", TypeExpr::array(TypeExpr::ident("string")))
                .with_tag(PATH_ARCH_VARIANT)
                .with_doc("Source files, e.g.\n    srcs: [\"a.c\"]\n"),
            flags,
            FieldDecl::named(
                "Enabled",
                TypeExpr::generic(
                    TypeExpr::selector("proptools", "Configurable"),
                    TypeExpr::ident("bool"),
                ),
            ),
            FieldDecl::named(
                "Target",
                TypeExpr::record(vec![
                    FieldDecl::named(
                        "Android",
                        TypeExpr::record(vec![FieldDecl::named(
                            "Cflags",
                            TypeExpr::array(TypeExpr::ident("string")),
                        )
                        .with_tag(ARCH_VARIANT)]),
                    )
                    .with_tag(ARCH_VARIANT),
                    FieldDecl::named(
                        "Host",
                        TypeExpr::pointer(TypeExpr::record(vec![FieldDecl::named(
                            "Enabled",
                            TypeExpr::pointer(TypeExpr::ident("bool")),
                        )])),
                    ),
                ]),
            )
            .with_tag(ARCH_VARIANT),
            FieldDecl::named("Internal", TypeExpr::ident("string")).with_tag(MUTATED),
            FieldDecl::embedded(TypeExpr::ident("CommonProperties")),
            FieldDecl::embedded(TypeExpr::named_record(
                "Inner",
                vec![FieldDecl::named("X", TypeExpr::ident("bool"))],
            )),
        ]),
    }
}

#[derive(Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ArchDefaults {
    pub cflags: Vec<String>,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct HostDefaults {
    pub enabled: Option<bool>,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct TargetDefaults {
    pub android: ArchDefaults,
    pub host: Option<HostDefaults>,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CommonDefaults {
    pub owner: String,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct InnerDefaults {
    pub x: bool,
}

/// The live counterpart of [`library_decl`].
#[derive(Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct LibraryDefaults {
    pub name: Option<String>,
    pub srcs: Vec<String>,
    pub cflags: Vec<String>,
    pub asflags: Vec<String>,
    pub enabled: Option<bool>,
    pub target: TargetDefaults,
    pub internal: String,
    pub common_properties: CommonDefaults,
    pub inner: InnerDefaults,
}
