//! Syntax tree for the declarations the loader cares about.
//!
//! Only package clauses, imports, type declarations and constants are kept.
//! Variable and function declarations are skipped by the parser.

use std::ops::Range;

use gunion_types::ChanDir;

pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
    pub types: Vec<TypeSpec>,
    pub consts: Vec<ConstSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit local name, including `_` and `.`.
    pub name: Option<Ident>,
    pub path: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: Vec<TypeParamDecl>,
    /// `type A = B`
    pub alias: bool,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamDecl {
    pub name: Ident,
    pub constraint: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstSpec {
    pub name: Ident,
    pub value: ConstValue,
}

/// Value of a constant, as far as array lengths are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstValue {
    Int(u64),
    /// Any expression the loader does not evaluate.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExprKind {
    /// `Name`, `pkg.Name`, `Name[Args]`.
    Name {
        package: Option<Ident>,
        name: Ident,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Array {
        len: ArrayLen,
        elem: Box<TypeExpr>,
    },
    Slice(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(FuncType),
    Struct(Vec<FieldDecl>),
    Interface(Vec<InterfaceElem>),
    /// `~A | B`. Only valid in constraint position.
    Union(Vec<UnionTerm>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLen {
    Literal(u64),
    /// A single identifier, to be resolved as a constant.
    Name(Ident),
    /// `[...]T`
    Ellipsis,
    /// Anything else, kept as source text.
    Expr(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    pub params: Vec<ParamDecl>,
    pub results: Vec<ParamDecl>,
    /// The last parameter was written `...T`; its `ty` is `T`.
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: Option<Ident>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// For embedded fields, the type's name.
    pub name: Ident,
    pub ty: TypeExpr,
    pub tag: Option<String>,
    pub embedded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    Method { name: Ident, func: FuncType },
    /// An embedded type or a type-set union.
    Embed(TypeExpr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionTerm {
    pub tilde: bool,
    pub ty: TypeExpr,
}
