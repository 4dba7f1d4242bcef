//! Type IR for gunion.
//!
//! This crate provides the closed, immutable representation of Go types that
//! the loader produces and the code generator consumes. Nothing here knows how
//! the types were obtained; values are plain data compared structurally.
//!
//! # Example
//!
//! ```
//! use gunion_types::{Basic, Named, Type};
//!
//! let ctx = Type::Named(Named::new("Context", "context"));
//! let ty = Type::map(Type::Basic(Basic::String), Type::pointer(ctx));
//! assert_eq!(ty.to_string(), "map[string]*context.Context");
//! ```

#![no_std]
extern crate alloc;

// Intermediate Representation
pub mod ir;

pub use ir::{
    Basic, ChanDir, Field, FullPath, Func, Interface, Named, Qualifier, Signature, Struct, Type,
    TypeFormatter, TypeParam, TypeVisitor, Union, UnionMember, Var,
};
