//! gunion - tagged unions for Go
//!
//! # Overview
//!
//! gunion reads a Go struct declaration whose fields are the alternatives of
//! a union and writes a Go type that holds exactly one of them:
//!
//! - a discriminant type with one constant per variant (and an invalid state
//!   unless the first variant is the zero value)
//! - `Get_<v>` and `Set_<v>` accessors
//! - a `Match` helper taking one handler per variant
//! - a `New<Union>_<v>` constructor per variant
//!
//! # Quick Start
//!
//! ```no_run
//! use gunion::{LoadRequest, OutputConfig, generate, render_error};
//!
//! let request = LoadRequest {
//!     source: "shapes/shapes.go".into(),
//!     type_name: "shape".to_string(),
//! };
//! let config = OutputConfig::new("ShapeUnion", "shapes/shapes_gunion.go", "shapes");
//!
//! match generate(&request, &config) {
//!     Ok(source) => print!("{source}"),
//!     Err(err) => render_error(&err),
//! }
//! ```
//!
//! # Layers
//!
//! 1. **Loading** (`loader`): parses the package and translates one
//!    declaration into the [`types`] IR
//! 2. **Generation** (`codegen`): plans names and imports, then renders Go

// Re-export public API from gunion_core
pub use gunion_core::{
    Error, Features, LoadError, LoadRequest, Location, NamingPlan, NotARecord, OutputConfig,
    SynthesisError, UnionDescriptor, generate,
};
pub use gunion_core::{codegen, loader, names};

// Re-export the type IR
pub use gunion_types::{self as types, Named, Type};

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
