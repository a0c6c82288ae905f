//! Structured declaration model for parsed Go source units.
//!
//! Given an already-parsed syntax tree (see [`syntax`]), this crate builds
//! a serializable model of the unit's top-level declarations (imports,
//! struct-like records, interfaces, free functions, and methods bound to
//! their receiver records) and renders canonical declaration text back out
//! of it. Lexing, parsing, and file-system traversal are external
//! collaborators.
//!
//! - Type expressions resolve into a closed set of semantic shapes
//!   ([`model::TypeShape`]), with generic arguments merged up next to the
//!   base shape.
//! - Method receivers bind to records by literal name within the same
//!   package only; binding happens in a post-pass after all declarations
//!   have been collected.
//! - Function bodies stay opaque: an unparsed source range at most.

pub mod build;
pub mod error;
pub mod model;
pub mod render;
pub mod resolve;
pub mod syntax;

// Re-exports for convenience
pub use build::ModuleBuilder;
pub use error::{BuildError, Result};
pub use model::Module;
pub use syntax::SourceUnit;

/// Assembles a module from a single source unit, taking the package name
/// from the unit.
pub fn assemble_unit(unit: &SourceUnit) -> Result<Module> {
    let mut builder = ModuleBuilder::new(unit.package_name.clone());
    builder.collect(unit)?;
    builder.bind()
}

/// Assembles a module from all units of a multi-file package.
pub fn assemble_package(name: &str, units: &[SourceUnit]) -> Result<Module> {
    let mut builder = ModuleBuilder::new(name);
    for unit in units {
        builder.collect(unit)?;
    }
    builder.bind()
}
