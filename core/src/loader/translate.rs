//! Translation from syntax to the type IR.
//!
//! Only the requested root declaration is expanded. Every other declared
//! type becomes a reference ([`Named`] without `underlying`), so recursive
//! and mutually recursive declarations translate to finite values.
//!
//! References to generic declarations of the same package carry their
//! declared type parameters. Constraints inside those parameter lists are
//! translated one level down only: their own references omit type
//! parameters. This bounds the work for constraints that refer back to the
//! declaring type.

use gunion_types::{
    Basic, Field, Func, Interface, Named, Signature, Struct, Type, TypeParam, Union, UnionMember,
    Var,
};
use tracing::{debug, trace};

use super::error::{FieldRef, LoadError};
use super::package::{Package, ParsedFile, TypeDecl};
use super::syntax::{
    ArrayLen, ConstValue, FieldDecl, FuncType, Ident, InterfaceElem, Span, TypeExpr, TypeExprKind,
    TypeParamDecl,
};

/// How much detail references carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    /// References to local generic declarations carry type parameters.
    Reference,
    /// References carry only name, package and type arguments.
    Shallow,
}

/// Lexical context for translating one declaration's syntax.
#[derive(Clone, Copy)]
struct Env<'p> {
    file: &'p ParsedFile,
    type_params: &'p [TypeParamDecl],
    depth: Depth,
}

pub struct Translator<'p> {
    package: &'p Package,
}

impl<'p> Translator<'p> {
    pub fn new(package: &'p Package) -> Self {
        Self { package }
    }

    /// Translates the declaration `name` with its structure expanded.
    pub fn translate_root(&self, name: &str) -> Result<Named, LoadError> {
        let decl = self
            .package
            .lookup_type(name)
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_string(),
                package: self.package.path.clone(),
            })?;
        debug!(name, package = %self.package.path, "translating root");

        let env = Env {
            file: decl.file,
            type_params: &decl.spec.type_params,
            depth: Depth::Reference,
        };
        let type_params = self.type_params(&decl.spec.type_params, env)?;
        let underlying = self.underlying(decl, 0)?;

        Ok(Named::new(name, self.package.path.as_str())
            .with_type_params(type_params)
            .with_underlying(underlying))
    }

    /// The structure a declaration denotes. Aliases and definitions over
    /// another local declaration are followed to the type literal.
    fn underlying(&self, decl: TypeDecl<'p>, hops: usize) -> Result<Type, LoadError> {
        let env = Env {
            file: decl.file,
            type_params: &decl.spec.type_params,
            depth: Depth::Reference,
        };
        let expr = &decl.spec.ty;

        if let TypeExprKind::Name {
            package,
            name,
            args,
        } = &expr.kind
        {
            let unsupported = |construct: String| LoadError::Unsupported {
                construct,
                field: None,
                location: decl.file.location(expr.span.clone()),
            };

            if let Some(pkg) = package {
                let path = decl
                    .file
                    .import(&pkg.name)
                    .ok_or_else(|| self.undefined(&pkg.name, &pkg.span, env))?;
                if path == "unsafe" && name.name == "Pointer" {
                    return Ok(Type::Basic(Basic::UnsafePointer));
                }
                return Err(unsupported(format!(
                    "underlying type `{}.{}` declared in another package",
                    pkg.name, name.name
                )));
            }

            if is_type_param(env, &name.name) {
                return Err(unsupported(format!(
                    "type parameter `{}` as underlying type",
                    name.name
                )));
            }

            if let Some(target) = self.package.lookup_type(&name.name) {
                if !args.is_empty() {
                    return Err(unsupported(format!(
                        "instantiated type `{}` as underlying type",
                        name.name
                    )));
                }
                if hops >= self.package.type_count() {
                    return Err(unsupported(format!(
                        "invalid recursive type `{}`",
                        decl.spec.name.name
                    )));
                }
                trace!(from = %decl.spec.name.name, to = %name.name, "following declaration");
                return self.underlying(target, hops + 1);
            }

            match name.name.as_str() {
                "any" => return Ok(Type::Interface(Interface::default())),
                "error" => return Ok(Type::Interface(error_interface())),
                "comparable" => return Err(unsupported("`comparable` outside a constraint".into())),
                _ => {}
            }
        }

        match &expr.kind {
            TypeExprKind::Struct(fields) => self.root_struct(fields, env).map(Type::Struct),
            _ => self.translate(expr, env),
        }
    }

    /// Translates the root's own struct, attaching field positions to
    /// unsupported-construct errors.
    fn root_struct(&self, fields: &[FieldDecl], env: Env<'p>) -> Result<Struct, LoadError> {
        let mut out = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            trace!(index, name = %field.name.name, "translating field");
            let translated = self.field(field, env).map_err(|err| match err {
                LoadError::Unsupported {
                    construct,
                    field: None,
                    location,
                } => LoadError::Unsupported {
                    construct,
                    field: Some(FieldRef {
                        index,
                        name: field.name.name.clone(),
                    }),
                    location,
                },
                other => other,
            })?;
            out.push(translated);
        }
        Ok(Struct::new(out))
    }

    fn field(&self, field: &FieldDecl, env: Env<'p>) -> Result<Field, LoadError> {
        Ok(Field {
            name: field.name.name.clone(),
            ty: self.translate(&field.ty, env)?,
            tag: field.tag.clone(),
            embedded: field.embedded,
        })
    }

    fn translate(&self, expr: &TypeExpr, env: Env<'p>) -> Result<Type, LoadError> {
        let ty = match &expr.kind {
            TypeExprKind::Name {
                package: None,
                name,
                args,
            } => self.resolve_local(name, args, &expr.span, env)?,
            TypeExprKind::Name {
                package: Some(pkg),
                name,
                args,
            } => self.resolve_imported(pkg, name, args, env)?,
            TypeExprKind::Pointer(elem) => Type::pointer(self.translate(elem, env)?),
            TypeExprKind::Array { len, elem } => {
                let len = self.array_len(len, &expr.span, env)?;
                Type::array(len, self.translate(elem, env)?)
            }
            TypeExprKind::Slice(elem) => Type::slice(self.translate(elem, env)?),
            TypeExprKind::Map { key, value } => {
                Type::map(self.translate(key, env)?, self.translate(value, env)?)
            }
            TypeExprKind::Chan { dir, elem } => Type::chan(*dir, self.translate(elem, env)?),
            TypeExprKind::Func(func) => Type::Signature(self.signature(func, env)?),
            TypeExprKind::Struct(fields) => {
                let fields = fields
                    .iter()
                    .map(|field| self.field(field, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Type::Struct(Struct::new(fields))
            }
            TypeExprKind::Interface(elems) => {
                let mut iface = Interface::default();
                for elem in elems {
                    match elem {
                        InterfaceElem::Method { name, func } => iface.methods.push(Func {
                            name: name.name.clone(),
                            signature: self.signature(func, env)?,
                        }),
                        InterfaceElem::Embed(ty) => iface.embeds.push(self.translate(ty, env)?),
                    }
                }
                Type::Interface(iface)
            }
            TypeExprKind::Union(terms) => {
                let members = terms
                    .iter()
                    .map(|term| {
                        Ok(UnionMember {
                            approximate: term.tilde,
                            ty: self.translate(&term.ty, env)?,
                        })
                    })
                    .collect::<Result<Vec<_>, LoadError>>()?;
                Type::Union(Union { members })
            }
        };
        Ok(ty)
    }

    /// Resolves an unqualified name: type parameters, then package scope,
    /// then the universe.
    fn resolve_local(
        &self,
        name: &Ident,
        args: &[TypeExpr],
        span: &Span,
        env: Env<'p>,
    ) -> Result<Type, LoadError> {
        if is_type_param(env, &name.name) {
            if !args.is_empty() {
                return Err(LoadError::Unsupported {
                    construct: format!("instantiation of type parameter `{}`", name.name),
                    field: None,
                    location: env.file.location(span.clone()),
                });
            }
            return Ok(Type::Named(Named::new(
                name.name.as_str(),
                self.package.path.as_str(),
            )));
        }

        if let Some(decl) = self.package.lookup_type(&name.name) {
            let declared = decl.spec.type_params.len();
            if declared != args.len() {
                let message = if args.is_empty() {
                    format!(
                        "cannot use generic type {} without instantiation",
                        name.name
                    )
                } else {
                    format!(
                        "wrong number of type arguments for {}: have {}, want {}",
                        name.name,
                        args.len(),
                        declared
                    )
                };
                return Err(LoadError::TypeArgCount {
                    message,
                    location: env.file.location(span.clone()),
                });
            }

            let type_args = self.type_args(args, env)?;
            let mut named = Named::new(name.name.as_str(), self.package.path.as_str())
                .with_type_args(type_args);
            if env.depth == Depth::Reference && declared > 0 {
                let decl_env = Env {
                    file: decl.file,
                    type_params: &decl.spec.type_params,
                    depth: Depth::Shallow,
                };
                named.type_params = self.type_params(&decl.spec.type_params, decl_env)?;
            }
            return Ok(Type::Named(named));
        }

        if let Some(basic) = Basic::from_name(&name.name) {
            if !args.is_empty() {
                return Err(not_generic(name, span, env));
            }
            return Ok(Type::Basic(basic));
        }
        if matches!(name.name.as_str(), "any" | "error" | "comparable") {
            if !args.is_empty() {
                return Err(not_generic(name, span, env));
            }
            return Ok(Type::Named(Named::universe(name.name.as_str())));
        }

        if env.file.has_dot_import() {
            return Err(LoadError::Unsupported {
                construct: format!("identifier `{}` from a dot import", name.name),
                field: None,
                location: env.file.location(span.clone()),
            });
        }
        Err(self.undefined(&name.name, &name.span, env))
    }

    /// Resolves `pkg.Name` through the file's imports. Declarations in other
    /// packages are not loaded, so the reference carries no type parameters.
    fn resolve_imported(
        &self,
        pkg: &Ident,
        name: &Ident,
        args: &[TypeExpr],
        env: Env<'p>,
    ) -> Result<Type, LoadError> {
        let path = env
            .file
            .import(&pkg.name)
            .ok_or_else(|| self.undefined(&pkg.name, &pkg.span, env))?;
        if path == "unsafe" {
            if name.name == "Pointer" && args.is_empty() {
                return Ok(Type::Basic(Basic::UnsafePointer));
            }
            return Err(self.undefined(&format!("unsafe.{}", name.name), &name.span, env));
        }
        if !crate::names::is_exported(&name.name) {
            return Err(LoadError::Undefined {
                name: format!("{}.{} (name not exported by package)", pkg.name, name.name),
                location: env.file.location(name.span.clone()),
            });
        }
        let type_args = self.type_args(args, env)?;
        Ok(Type::Named(
            Named::new(name.name.as_str(), path).with_type_args(type_args),
        ))
    }

    fn type_args(&self, args: &[TypeExpr], env: Env<'p>) -> Result<Vec<Type>, LoadError> {
        args.iter().map(|arg| self.translate(arg, env)).collect()
    }

    fn type_params(
        &self,
        params: &[TypeParamDecl],
        env: Env<'p>,
    ) -> Result<Vec<TypeParam>, LoadError> {
        params
            .iter()
            .map(|param| {
                Ok(TypeParam::new(
                    param.name.name.as_str(),
                    self.translate(&param.constraint, env)?,
                ))
            })
            .collect()
    }

    fn signature(&self, func: &FuncType, env: Env<'p>) -> Result<Signature, LoadError> {
        let mut params = Vec::with_capacity(func.params.len());
        for (i, param) in func.params.iter().enumerate() {
            let mut ty = self.translate(&param.ty, env)?;
            if func.variadic && i + 1 == func.params.len() {
                ty = Type::slice(ty);
            }
            params.push(var(param.name.as_ref(), ty));
        }
        let results = func
            .results
            .iter()
            .map(|result| Ok(var(result.name.as_ref(), self.translate(&result.ty, env)?)))
            .collect::<Result<Vec<_>, LoadError>>()?;

        let mut signature = Signature::new(params, results);
        signature.variadic = func.variadic;
        Ok(signature)
    }

    fn array_len(&self, len: &ArrayLen, span: &Span, env: Env<'p>) -> Result<u64, LoadError> {
        let unsupported = |construct: String| LoadError::Unsupported {
            construct,
            field: None,
            location: env.file.location(span.clone()),
        };
        match len {
            ArrayLen::Literal(n) => Ok(*n),
            ArrayLen::Name(ident) => match self.package.lookup_const(&ident.name) {
                Some(ConstValue::Int(n)) => Ok(n),
                Some(ConstValue::Unknown) => Err(unsupported(format!(
                    "array length `{}` (only literal and iota constants are evaluated)",
                    ident.name
                ))),
                None => Err(self.undefined(&ident.name, &ident.span, env)),
            },
            ArrayLen::Ellipsis => Err(unsupported("array length `[...]`".to_string())),
            ArrayLen::Expr(text) => Err(unsupported(format!("array length `{text}`"))),
        }
    }

    fn undefined(&self, name: &str, span: &Span, env: Env<'p>) -> LoadError {
        LoadError::Undefined {
            name: name.to_string(),
            location: env.file.location(span.clone()),
        }
    }
}

fn is_type_param(env: Env<'_>, name: &str) -> bool {
    env.type_params.iter().any(|p| p.name.name == name)
}

fn not_generic(name: &Ident, span: &Span, env: Env<'_>) -> LoadError {
    LoadError::TypeArgCount {
        message: format!("{} is not a generic type", name.name),
        location: env.file.location(span.clone()),
    }
}

fn var(name: Option<&Ident>, ty: Type) -> Var {
    match name {
        Some(ident) => Var::new(ident.name.as_str(), ty),
        None => Var::unnamed(ty),
    }
}

/// `interface{ Error() string }`
fn error_interface() -> Interface {
    Interface {
        embeds: Vec::new(),
        methods: vec![Func {
            name: "Error".to_string(),
            signature: Signature::new(Vec::new(), vec![Var::unnamed(Type::Basic(Basic::String))]),
        }],
    }
}

#[cfg(test)]
#[path = "translate_test.rs"]
mod translate_test;
