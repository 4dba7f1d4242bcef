//! Predeclared basic types.
//!
//! Go's `byte` and `rune` are aliases of `uint8` and `int32`, but the IR keeps
//! the spelling used in the source so generated code reads the same way the
//! declaration did.

/// Basic (predeclared, non-composite) type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Basic {
    Bool,
    String,

    Int,
    Int8,
    Int16,
    Int32,
    Int64,

    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,

    Float32,
    Float64,
    Complex64,
    Complex128,

    /// Alias for `uint8`.
    Byte,
    /// Alias for `int32`.
    Rune,

    /// `unsafe.Pointer`
    UnsafePointer,
}

impl Basic {
    /// Looks up a basic type by its universe-scope name.
    ///
    /// `unsafe.Pointer` is not in the universe scope and is never returned.
    pub fn from_name(name: &str) -> Option<Basic> {
        let basic = match name {
            "bool" => Basic::Bool,
            "string" => Basic::String,
            "int" => Basic::Int,
            "int8" => Basic::Int8,
            "int16" => Basic::Int16,
            "int32" => Basic::Int32,
            "int64" => Basic::Int64,
            "uint" => Basic::Uint,
            "uint8" => Basic::Uint8,
            "uint16" => Basic::Uint16,
            "uint32" => Basic::Uint32,
            "uint64" => Basic::Uint64,
            "uintptr" => Basic::Uintptr,
            "float32" => Basic::Float32,
            "float64" => Basic::Float64,
            "complex64" => Basic::Complex64,
            "complex128" => Basic::Complex128,
            "byte" => Basic::Byte,
            "rune" => Basic::Rune,
            _ => return None,
        };
        Some(basic)
    }

    /// The name as written in Go source.
    pub fn name(&self) -> &'static str {
        match self {
            Basic::Bool => "bool",
            Basic::String => "string",
            Basic::Int => "int",
            Basic::Int8 => "int8",
            Basic::Int16 => "int16",
            Basic::Int32 => "int32",
            Basic::Int64 => "int64",
            Basic::Uint => "uint",
            Basic::Uint8 => "uint8",
            Basic::Uint16 => "uint16",
            Basic::Uint32 => "uint32",
            Basic::Uint64 => "uint64",
            Basic::Uintptr => "uintptr",
            Basic::Float32 => "float32",
            Basic::Float64 => "float64",
            Basic::Complex64 => "complex64",
            Basic::Complex128 => "complex128",
            Basic::Byte => "byte",
            Basic::Rune => "rune",
            Basic::UnsafePointer => "unsafe.Pointer",
        }
    }

    /// Returns true for the predeclared aliases `byte` and `rune`.
    pub fn is_alias(&self) -> bool {
        matches!(self, Basic::Byte | Basic::Rune)
    }

    /// Returns true if this type needs `import "unsafe"` to be named.
    pub fn needs_unsafe(&self) -> bool {
        matches!(self, Basic::UnsafePointer)
    }
}
