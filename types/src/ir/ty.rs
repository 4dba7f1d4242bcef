use super::Basic;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Logical structure of a Go type.
///
/// One variant per kind of type that can appear as a struct field or as a
/// type-parameter constraint. Matching on this enum is always exhaustive, so a
/// new kind is a compile error everywhere it matters rather than a silent
/// fallthrough.
///
/// Values compare structurally: two independently built types are equal when
/// their shapes are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Predeclared basic type (`int`, `string`, `byte`, ...).
    Basic(Basic),

    /// Reference to a declared type, optionally with its expansion.
    Named(Named),

    /// `*T`
    Pointer(Box<Type>),

    /// `[N]T`
    Array { len: u64, elem: Box<Type> },

    /// `[]T`
    Slice(Box<Type>),

    /// `map[K]V`
    Map { key: Box<Type>, value: Box<Type> },

    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, elem: Box<Type> },

    /// `func(...) ...`
    Signature(Signature),

    /// `struct { ... }`
    Struct(Struct),

    /// `interface { ... }`
    Interface(Interface),

    /// `~A | B`, only meaningful inside constraints.
    Union(Union),
}

impl Type {
    pub fn pointer(elem: Type) -> Type {
        Type::Pointer(Box::new(elem))
    }

    pub fn slice(elem: Type) -> Type {
        Type::Slice(Box::new(elem))
    }

    pub fn array(len: u64, elem: Type) -> Type {
        Type::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Type, value: Type) -> Type {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: Type) -> Type {
        Type::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// Short name of this type's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Basic(_) => "basic type",
            Type::Named(_) => "named type",
            Type::Pointer(_) => "pointer",
            Type::Array { .. } => "array",
            Type::Slice(_) => "slice",
            Type::Map { .. } => "map",
            Type::Chan { .. } => "channel",
            Type::Signature(_) => "function",
            Type::Struct(_) => "struct",
            Type::Interface(_) => "interface",
            Type::Union(_) => "union",
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Type::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_named(&self) -> Option<&Named> {
        match self {
            Type::Named(named) => Some(named),
            _ => None,
        }
    }
}

/// A declared type, identified by name and canonical package path.
///
/// `underlying` is only ever populated on the root of a translation. Every
/// other `Named` is a back-reference, which is what keeps self-referential
/// declarations finite. An alias declaration is also represented by a `Named`
/// without `underlying`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Named {
    /// Package-local name.
    pub name: String,
    /// Import path of the declaring package. Empty for universe types such as
    /// `error`, `any` and `comparable`.
    pub package: String,
    /// Expanded structure, present on the root only.
    pub underlying: Option<Box<Type>>,
    /// Declared type parameters.
    pub type_params: Vec<TypeParam>,
    /// Type arguments of this instantiation.
    pub type_args: Vec<Type>,
}

impl Named {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Named {
            name: name.into(),
            package: package.into(),
            ..Named::default()
        }
    }

    /// A predeclared name such as `error` or `any`.
    pub fn universe(name: impl Into<String>) -> Self {
        Named::new(name, String::new())
    }

    pub fn with_underlying(mut self, ty: Type) -> Self {
        self.underlying = Some(Box::new(ty));
        self
    }

    pub fn with_type_params(mut self, params: Vec<TypeParam>) -> Self {
        self.type_params = params;
        self
    }

    pub fn with_type_args(mut self, args: Vec<Type>) -> Self {
        self.type_args = args;
        self
    }

    pub fn is_universe(&self) -> bool {
        self.package.is_empty()
    }

    /// Whether the name is visible outside its package.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }

    /// The underlying struct, if this is an expanded struct declaration.
    pub fn underlying_struct(&self) -> Option<&Struct> {
        self.underlying.as_deref().and_then(Type::as_struct)
    }
}

/// A type parameter and its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParam {
    pub name: String,
    /// Constraint. An interface, a union, or a named type.
    pub constraint: Type,
}

impl TypeParam {
    pub fn new(name: impl Into<String>, constraint: Type) -> Self {
        TypeParam {
            name: name.into(),
            constraint,
        }
    }
}

/// A named variable: function parameter or result. `name` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    pub name: String,
    pub ty: Type,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Var {
            name: name.into(),
            ty,
        }
    }

    pub fn unnamed(ty: Type) -> Self {
        Var::new(String::new(), ty)
    }
}

/// A struct field. For embedded fields `name` is the type's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    /// Raw tag value, already unquoted.
    pub tag: Option<String>,
    pub embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Field {
            name: name.into(),
            ty,
            tag: None,
            embedded: false,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }
}

/// `struct { ... }`. Field order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Struct {
    pub fields: Vec<Field>,
}

impl Struct {
    pub fn new(fields: Vec<Field>) -> Self {
        Struct { fields }
    }
}

/// A function signature.
///
/// For variadic signatures the last parameter has slice type, as in `go/types`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    pub receiver: Option<Box<Var>>,
    pub receiver_type_params: Vec<TypeParam>,
    pub params: Vec<Var>,
    pub results: Vec<Var>,
    pub type_params: Vec<TypeParam>,
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Var>, results: Vec<Var>) -> Self {
        Signature {
            params,
            results,
            ..Signature::default()
        }
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn with_receiver(mut self, receiver: Var) -> Self {
        self.receiver = Some(Box::new(receiver));
        self
    }
}

/// A method of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Func {
    pub name: String,
    pub signature: Signature,
}

/// `interface { ... }`: embedded types and methods, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Interface {
    pub embeds: Vec<Type>,
    pub methods: Vec<Func>,
}

/// One term of a type-set union.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionMember {
    /// Whether the term was written with `~`.
    pub approximate: bool,
    pub ty: Type,
}

/// A type-set union such as `~int | string`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Union {
    pub members: Vec<UnionMember>,
}

/// Channel direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ChanDir {
    #[default]
    SendRecv,
    SendOnly,
    RecvOnly,
}
