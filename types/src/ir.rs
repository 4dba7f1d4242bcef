//! Intermediate Representation (IR) for Go types.
//!
//! ## Structure
//!
//! - **Core types**: `Type` and the node structs it carries
//! - **Basic**: the predeclared basic types, spelled as written
//! - **Visitor**: read-only traversal with default recursion
//! - **Display**: Go-syntax formatting with pluggable package qualification

pub mod basic;
pub mod display;
pub mod ty;
pub mod visit;

pub use basic::Basic;
pub use display::{FullPath, Qualifier, TypeFormatter};
pub use ty::{
    ChanDir, Field, Func, Interface, Named, Signature, Struct, Type, TypeParam, Union, UnionMember,
    Var,
};
pub use visit::TypeVisitor;
