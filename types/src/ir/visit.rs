use super::{Named, Signature, Type, TypeParam};

/// Trait for visiting types.
///
/// Implement this trait to traverse types without mutation. The default
/// methods recurse into every constituent that is part of how the type is
/// written: element, key and value types, parameters and results, fields,
/// embedded types, methods, union members and type arguments.
///
/// A `Named` node's `underlying` expansion and its declared `type_params` are
/// not visited by default; they describe the declaration, not the reference.
///
/// # Example
///
/// ```
/// use gunion_types::{Basic, Type, TypeVisitor};
///
/// struct BasicCounter {
///     count: usize,
/// }
///
/// impl TypeVisitor for BasicCounter {
///     fn visit_ty(&mut self, ty: &Type) {
///         if matches!(ty, Type::Basic(_)) {
///             self.count += 1;
///         }
///         self.super_visit_ty(ty);
///     }
/// }
///
/// let ty = Type::map(Type::Basic(Basic::String), Type::slice(Type::Basic(Basic::Int)));
/// let mut counter = BasicCounter { count: 0 };
/// counter.visit_ty(&ty);
/// assert_eq!(counter.count, 2);
/// ```
pub trait TypeVisitor {
    /// Visit a type.
    ///
    /// Override this to customize behavior for all types.
    /// Call `super_visit_ty` to recurse into nested types.
    fn visit_ty(&mut self, ty: &Type) {
        self.super_visit_ty(ty)
    }

    /// Visit a reference to a declared type.
    fn visit_named(&mut self, named: &Named) {
        self.super_visit_named(named)
    }

    /// Visit the constraints of a type-parameter list.
    fn visit_type_params(&mut self, params: &[TypeParam]) {
        for param in params {
            self.visit_ty(&param.constraint);
        }
    }

    /// Default recursion into nested types.
    ///
    /// Override `visit_ty` instead of this method.
    fn super_visit_ty(&mut self, ty: &Type) {
        match ty {
            Type::Basic(_) => {}

            Type::Named(named) => self.visit_named(named),

            Type::Pointer(elem) | Type::Slice(elem) => self.visit_ty(elem),
            Type::Array { elem, .. } | Type::Chan { elem, .. } => self.visit_ty(elem),

            Type::Map { key, value } => {
                self.visit_ty(key);
                self.visit_ty(value);
            }

            Type::Signature(sig) => self.super_visit_signature(sig),

            Type::Struct(s) => {
                for field in &s.fields {
                    self.visit_ty(&field.ty);
                }
            }

            Type::Interface(iface) => {
                for method in &iface.methods {
                    self.super_visit_signature(&method.signature);
                }
                for embed in &iface.embeds {
                    self.visit_ty(embed);
                }
            }

            Type::Union(union) => {
                for member in &union.members {
                    self.visit_ty(&member.ty);
                }
            }
        }
    }

    fn super_visit_named(&mut self, named: &Named) {
        for arg in &named.type_args {
            self.visit_ty(arg);
        }
    }

    fn super_visit_signature(&mut self, sig: &Signature) {
        if let Some(receiver) = &sig.receiver {
            self.visit_ty(&receiver.ty);
        }
        self.visit_type_params(&sig.receiver_type_params);
        self.visit_type_params(&sig.type_params);
        for var in sig.params.iter().chain(&sig.results) {
            self.visit_ty(&var.ty);
        }
    }
}
