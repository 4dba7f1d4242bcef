//! Import planning for the generated file.

use std::collections::{BTreeMap, BTreeSet};

use gunion_types::{Named, Qualifier, Type, TypeVisitor};
use hashbrown::HashSet;

use super::SynthesisError;
use crate::names::default_package_name;
use crate::union::UnionDescriptor;

const UNSAFE: &str = "unsafe";

/// Imports needed to spell the variant types from the destination package,
/// and how each reference is qualified.
#[derive(Debug)]
pub struct ImportSet {
    dest: String,
    source: String,
    type_params: Vec<String>,
    /// Import path to local name, sorted by path.
    names: BTreeMap<String, String>,
    /// Identifiers written unqualified: basic, universe and destination
    /// package types, and type parameters.
    bare: BTreeSet<String>,
}

impl ImportSet {
    /// Plans imports for `descriptor` emitted into the package at `dest`.
    ///
    /// Fails if a referenced type cannot be named from `dest`.
    pub fn collect(descriptor: &UnionDescriptor, dest: &str) -> Result<Self, SynthesisError> {
        let mut collector = Collector {
            dest,
            source: &descriptor.package,
            type_params: &descriptor.type_params,
            paths: BTreeSet::new(),
            bare: BTreeSet::new(),
            unexported: None,
        };

        for param in &descriptor.type_params {
            collector.visit_ty(&param.constraint);
            if let Some(named) = collector.unexported.take() {
                return Err(SynthesisError::Unexported {
                    owner: format!("type parameter `{}`", param.name),
                    ty: named.to_string(),
                    package: dest.to_string(),
                });
            }
        }
        for variant in &descriptor.variants {
            collector.visit_ty(&variant.ty);
            if let Some(named) = collector.unexported.take() {
                return Err(SynthesisError::Unexported {
                    owner: format!("variant `{}`", variant.name),
                    ty: named.to_string(),
                    package: dest.to_string(),
                });
            }
        }

        let Collector { paths, mut bare, .. } = collector;
        bare.extend(descriptor.type_params.iter().map(|p| p.name.clone()));

        let mut taken: HashSet<String> = bare.iter().cloned().collect();
        let mut names = BTreeMap::new();
        // `unsafe.Pointer` is always spelled with the package's real name.
        if paths.contains(UNSAFE) {
            taken.insert(UNSAFE.to_string());
            names.insert(UNSAFE.to_string(), UNSAFE.to_string());
        }
        for path in paths.iter().filter(|p| p.as_str() != UNSAFE) {
            let base = default_package_name(path);
            let mut name = base.clone();
            let mut n = 2;
            while taken.contains(&name) {
                name = format!("{base}{n}");
                n += 1;
            }
            taken.insert(name.clone());
            names.insert(path.clone(), name);
        }

        Ok(Self {
            dest: dest.to_string(),
            source: descriptor.package.clone(),
            type_params: descriptor.type_params.iter().map(|p| p.name.clone()).collect(),
            names,
            bare,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Identifiers the generated code must not shadow.
    pub fn reserved(&self) -> HashSet<String> {
        self.bare
            .iter()
            .chain(self.names.values())
            .cloned()
            .collect()
    }

    /// The `import` declaration, or nothing when no imports are needed.
    pub fn render(&self) -> String {
        let specs: Vec<String> = self
            .names
            .iter()
            .map(|(path, name)| {
                let last = path.rsplit('/').next().unwrap_or(path);
                if name == last {
                    format!("{path:?}")
                } else {
                    format!("{name} {path:?}")
                }
            })
            .collect();
        match specs.as_slice() {
            [] => String::new(),
            [single] => format!("import {single}\n"),
            specs => {
                let mut out = String::from("import (\n");
                for spec in specs {
                    out.push('\t');
                    out.push_str(spec);
                    out.push('\n');
                }
                out.push_str(")\n");
                out
            }
        }
    }

    fn is_type_param(&self, named: &Named) -> bool {
        is_type_param(&self.source, &self.type_params, named)
    }
}

impl Qualifier for ImportSet {
    fn qualifier<'a>(&'a self, named: &'a Named) -> Option<&'a str> {
        if named.is_universe() || named.package == self.dest || self.is_type_param(named) {
            return None;
        }
        self.names.get(&named.package).map(String::as_str)
    }
}

fn is_type_param<P: AsRef<str>>(source: &str, params: &[P], named: &Named) -> bool {
    named.package == source
        && named.type_args.is_empty()
        && params.iter().any(|p| p.as_ref() == named.name)
}

struct Collector<'a> {
    dest: &'a str,
    source: &'a str,
    type_params: &'a [gunion_types::TypeParam],
    paths: BTreeSet<String>,
    bare: BTreeSet<String>,
    unexported: Option<Named>,
}

impl TypeVisitor for Collector<'_> {
    fn visit_ty(&mut self, ty: &Type) {
        if let Type::Basic(basic) = ty {
            if basic.needs_unsafe() {
                self.paths.insert(UNSAFE.to_string());
            } else {
                self.bare.insert(basic.name().to_string());
            }
        }
        self.super_visit_ty(ty);
    }

    fn visit_named(&mut self, named: &Named) {
        let names: Vec<&str> = self.type_params.iter().map(|p| p.name.as_str()).collect();
        if named.is_universe()
            || named.package == self.dest
            || is_type_param(self.source, &names, named)
        {
            self.bare.insert(named.name.clone());
        } else {
            if !named.is_exported() && self.unexported.is_none() {
                self.unexported = Some(named.clone());
            }
            self.paths.insert(named.package.clone());
        }
        self.super_visit_named(named);
    }
}
