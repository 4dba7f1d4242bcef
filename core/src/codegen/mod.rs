//! Go source generation for a union.
//!
//! Output is deterministic: the same descriptor, naming plan and
//! configuration always produce byte-identical text, laid out the way
//! `gofmt` would lay it out.

mod emit;
mod imports;

use gunion_types::Named;
use thiserror::Error;
use tracing::debug;

pub use imports::ImportSet;

use crate::config::{Features, OutputConfig};
use crate::names::is_identifier;
use crate::union::{NamingPlan, UnionDescriptor};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("field {index} of {union} is blank; blank fields cannot become variants")]
    BlankVariant { union: String, index: usize },

    #[error("{union} declares field {name} more than once")]
    DuplicateVariant { union: String, name: String },

    #[error("{union} has no fields, so there is no first variant to make the default")]
    NoVariants { union: String },

    #[error("{owner} uses {ty}, which is unexported and cannot be named from package {package}")]
    Unexported {
        owner: String,
        ty: String,
        package: String,
    },

    #[error("`{name}` is not a valid {what}")]
    InvalidName { name: String, what: &'static str },
}

/// Generates the union for an expanded struct declaration.
pub fn generate(named: &Named, config: &OutputConfig) -> Result<String, crate::Error> {
    let descriptor = UnionDescriptor::from_named(named)?;
    let dest = config
        .out_pkg_path
        .clone()
        .unwrap_or_else(|| descriptor.package.clone());

    validate(&descriptor, config)?;
    let imports = ImportSet::collect(&descriptor, &dest)?;

    let mut reserved = imports.reserved();
    reserved.insert(config.out_type.clone());
    reserved.insert(emit::discriminant_type(&config.out_type));
    let plan = NamingPlan::resolve(&descriptor.variant_names(), config.features, &reserved);
    debug!(
        union = %config.out_type,
        variants = descriptor.variants.len(),
        imports = !imports.is_empty(),
        "generating"
    );

    Ok(synthesize(&descriptor, &plan, &imports, config))
}

/// Renders the Go source for a validated descriptor.
pub fn synthesize(
    descriptor: &UnionDescriptor,
    plan: &NamingPlan,
    imports: &ImportSet,
    config: &OutputConfig,
) -> String {
    emit::Emitter::new(descriptor, plan, imports, config).emit()
}

fn validate(descriptor: &UnionDescriptor, config: &OutputConfig) -> Result<(), SynthesisError> {
    if !is_identifier(&config.out_type) || config.out_type == "_" {
        return Err(SynthesisError::InvalidName {
            name: config.out_type.clone(),
            what: "type name",
        });
    }
    if !is_identifier(&config.out_pkg) || config.out_pkg == "_" {
        return Err(SynthesisError::InvalidName {
            name: config.out_pkg.clone(),
            what: "package name",
        });
    }

    for (index, variant) in descriptor.variants.iter().enumerate() {
        if variant.name == "_" {
            return Err(SynthesisError::BlankVariant {
                union: descriptor.name.clone(),
                index,
            });
        }
        if descriptor.variants[..index]
            .iter()
            .any(|earlier| earlier.name == variant.name)
        {
            return Err(SynthesisError::DuplicateVariant {
                union: descriptor.name.clone(),
                name: variant.name.clone(),
            });
        }
    }

    if config.features.contains(Features::DEFAULT) && descriptor.variants.is_empty() {
        return Err(SynthesisError::NoVariants {
            union: descriptor.name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "codegen_test.rs"]
mod codegen_test;
