//! Generates tagged-union wrappers for Go struct declarations.
//!
//! A struct whose fields are the alternatives is loaded from its package,
//! translated into the [`gunion_types`] IR, and turned into Go source for a
//! union type with a discriminant, accessors, a `Match` helper and one
//! constructor per variant.

pub mod codegen;
pub mod config;
pub mod error;
pub mod loader;
pub mod names;
pub mod union;

pub use codegen::SynthesisError;
pub use config::{Features, LoadRequest, OutputConfig};
pub use error::Error;
pub use loader::{LoadError, Location, load};
pub use union::{NamingPlan, NotARecord, UnionDescriptor};

/// Loads the requested declaration and generates its union.
pub fn generate(request: &LoadRequest, config: &OutputConfig) -> Result<String, Error> {
    let named = loader::load(request)?;
    codegen::generate(&named, config)
}
