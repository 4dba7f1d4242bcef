use gunion_types::{Named, Type, TypeParam};
use thiserror::Error;

/// The declaration a union was requested for is not a struct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{package}.{name} is a {kind}, not a struct")]
pub struct NotARecord {
    pub name: String,
    pub package: String,
    pub kind: String,
}

/// One alternative of the union, taken from one struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub ty: Type,
    pub tag: Option<String>,
    pub embedded: bool,
}

/// The variants of a union and the declaration they come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDescriptor {
    /// Name of the source struct.
    pub name: String,
    /// Import path of the source struct's package.
    pub package: String,
    pub type_params: Vec<TypeParam>,
    /// In field order. The first variant is the default when the union's
    /// zero value selects one.
    pub variants: Vec<Variant>,
}

impl UnionDescriptor {
    /// Builds a descriptor from an expanded struct declaration.
    pub fn from_named(named: &Named) -> Result<Self, NotARecord> {
        let Some(record) = named.underlying_struct() else {
            let kind = named
                .underlying
                .as_deref()
                .map_or("type without structure", Type::kind_name);
            return Err(NotARecord {
                name: named.name.clone(),
                package: named.package.clone(),
                kind: kind.to_string(),
            });
        };

        let variants = record
            .fields
            .iter()
            .map(|field| Variant {
                name: field.name.clone(),
                ty: field.ty.clone(),
                tag: field.tag.clone(),
                embedded: field.embedded,
            })
            .collect();

        Ok(Self {
            name: named.name.clone(),
            package: named.package.clone(),
            type_params: named.type_params.clone(),
            variants,
        })
    }

    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}
