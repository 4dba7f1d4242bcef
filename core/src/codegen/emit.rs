use std::fmt::Write;

use gunion_types::{Type, TypeFormatter};

use super::ImportSet;
use crate::config::{Features, OutputConfig};
use crate::union::{NamingPlan, UnionDescriptor, Variant};

/// Name of the discriminant type for the union `out_type`.
pub fn discriminant_type(out_type: &str) -> String {
    format!("{out_type}Variant")
}

pub struct Emitter<'a> {
    descriptor: &'a UnionDescriptor,
    plan: &'a NamingPlan,
    imports: &'a ImportSet,
    config: &'a OutputConfig,
    /// `[T any, U comparable]`, or empty.
    params_decl: String,
    /// `[T, U]`, or empty.
    params_use: String,
    discriminant: String,
    compact: bool,
}

impl<'a> Emitter<'a> {
    pub fn new(
        descriptor: &'a UnionDescriptor,
        plan: &'a NamingPlan,
        imports: &'a ImportSet,
        config: &'a OutputConfig,
    ) -> Self {
        let (params_decl, params_use) = if descriptor.is_generic() {
            let names: Vec<&str> = descriptor
                .type_params
                .iter()
                .map(|p| p.name.as_str())
                .collect();
            (
                format!(
                    "[{}]",
                    TypeFormatter::format_type_params(&descriptor.type_params, imports)
                ),
                format!("[{}]", names.join(", ")),
            )
        } else {
            (String::new(), String::new())
        };

        Self {
            descriptor,
            plan,
            imports,
            config,
            params_decl,
            params_use,
            discriminant: discriminant_type(&config.out_type),
            compact: config.features.contains(Features::PUBLIC_VALUE),
        }
    }

    pub fn emit(self) -> String {
        let mut out = String::new();
        self.header(&mut out);

        let decls: [fn(&Self, &mut String); 9] = [
            Self::discriminant_decl,
            Self::string_method,
            Self::record,
            Self::variant_method,
            Self::value_method,
            Self::getters,
            Self::setters,
            Self::match_method,
            Self::constructors,
        ];
        for decl in decls {
            decl(&self, &mut out);
        }
        out
    }

    fn ty(&self, ty: &Type) -> String {
        TypeFormatter::format(ty, self.imports)
    }

    fn out_type(&self) -> &str {
        &self.config.out_type
    }

    /// The union type as used in signatures: `MyUnion[T, U]`.
    fn instance(&self) -> String {
        format!("{}{}", self.config.out_type, self.params_use)
    }

    fn constant(&self, suffix: &str) -> String {
        format!("{}_{}", self.config.out_type, suffix)
    }

    fn receiver(&self) -> String {
        format!("({} *{})", self.plan.receiver, self.instance())
    }

    fn variants(&self) -> std::slice::Iter<'a, Variant> {
        self.descriptor.variants.iter()
    }

    /// Field initializer holding `value` for `variant`.
    fn slot_init(&self, variant: &Variant) -> String {
        let slot = if self.compact {
            self.plan.inner.as_str()
        } else {
            variant.name.as_str()
        };
        format!(
            "{}{{{}: {}, {}: {}}}",
            self.instance(),
            self.plan.discriminant,
            self.constant(&variant.name),
            slot,
            self.plan.value_param
        )
    }

    fn header(&self, out: &mut String) {
        match &self.config.command {
            Some(command) => {
                let command = command.replace(['\n', '\r'], " ");
                let _ = writeln!(
                    out,
                    "// Code generated by gunion via `{command}`. DO NOT EDIT."
                );
            }
            None => out.push_str("// Code generated by gunion. DO NOT EDIT.\n"),
        }
        let _ = writeln!(out, "\npackage {}", self.config.out_pkg);
        if !self.imports.is_empty() {
            out.push('\n');
            out.push_str(&self.imports.render());
        }
    }

    fn discriminant_decl(&self, out: &mut String) {
        let d = &self.discriminant;
        let _ = writeln!(out, "\n// {d} identifies the active variant of a {}.", self.out_type());
        let _ = writeln!(out, "type {d} int\n");
        out.push_str("const (\n");
        let mut first = true;
        if let Some(invalid) = &self.plan.invalid {
            let _ = writeln!(out, "\t{} {d} = iota", self.constant(invalid));
            first = false;
        }
        for variant in self.variants() {
            if first {
                let _ = writeln!(out, "\t{} {d} = iota", self.constant(&variant.name));
                first = false;
            } else {
                let _ = writeln!(out, "\t{}", self.constant(&variant.name));
            }
        }
        out.push_str(")\n");
    }

    fn string_method(&self, out: &mut String) {
        let _ = writeln!(out, "\n// String returns the name of the variant.");
        let _ = writeln!(out, "func (v {}) String() string {{", self.discriminant);
        out.push_str("\tswitch v {\n");
        for variant in self.variants() {
            let _ = writeln!(out, "\tcase {}:", self.constant(&variant.name));
            let _ = writeln!(out, "\t\treturn {:?}", variant.name);
        }
        let invalid = self.plan.invalid.as_deref().unwrap_or("Invalid");
        out.push_str("\tdefault:\n");
        let _ = writeln!(out, "\t\treturn {invalid:?}");
        out.push_str("\t}\n}\n");
    }

    fn record(&self, out: &mut String) {
        let mut slots: Vec<(String, String)> =
            vec![(self.plan.discriminant.clone(), self.discriminant.clone())];
        if self.compact {
            slots.push((self.plan.inner.clone(), "any".to_string()));
        } else {
            for variant in self.variants() {
                slots.push((variant.name.clone(), self.ty(&variant.ty)));
            }
        }
        let width = slots
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);

        let _ = writeln!(
            out,
            "\n// {} holds exactly one of the fields of {}.",
            self.out_type(),
            self.descriptor.name
        );
        let _ = writeln!(out, "type {}{} struct {{", self.out_type(), self.params_decl);
        for (name, ty) in &slots {
            let pad = width - name.chars().count();
            let _ = writeln!(out, "\t{name}{:pad$} {ty}", "");
        }
        out.push_str("}\n");
    }

    fn variant_method(&self, out: &mut String) {
        let _ = writeln!(out, "\n// {} returns the active variant.", self.plan.variant_method);
        let _ = writeln!(
            out,
            "func {} {}() {} {{",
            self.receiver(),
            self.plan.variant_method,
            self.discriminant
        );
        let _ = writeln!(out, "\treturn {}.{}", self.plan.receiver, self.plan.discriminant);
        out.push_str("}\n");
    }

    fn value_method(&self, out: &mut String) {
        let Some(method) = &self.plan.value_method else {
            return;
        };
        let u = &self.plan.receiver;
        let _ = writeln!(
            out,
            "\n// {method} returns the value of the active variant, or nil if there is none."
        );
        let _ = writeln!(out, "func {} {method}() any {{", self.receiver());
        if self.config.features.contains(Features::DEFAULT) {
            if let Some(first) = self.descriptor.variants.first() {
                let _ = writeln!(
                    out,
                    "\tif {u}.{} == {} && {u}.{} == nil {{",
                    self.plan.discriminant,
                    self.constant(&first.name),
                    self.plan.inner
                );
                let _ = writeln!(out, "\t\tvar {} {}", self.plan.zero, self.ty(&first.ty));
                let _ = writeln!(out, "\t\treturn {}", self.plan.zero);
                out.push_str("\t}\n");
            }
        }
        let _ = writeln!(out, "\treturn {u}.{}", self.plan.inner);
        out.push_str("}\n");
    }

    fn getters(&self, out: &mut String) {
        let u = &self.plan.receiver;
        for (variant, getter) in self.variants().zip(&self.plan.getters) {
            let ty = self.ty(&variant.ty);
            let _ = writeln!(
                out,
                "\n// {getter} returns the value of {} and whether it is the active variant.",
                variant.name
            );
            let _ = writeln!(out, "func {} {getter}() ({ty}, bool) {{", self.receiver());
            let _ = writeln!(
                out,
                "\tif {u}.{} != {} {{",
                self.plan.discriminant,
                self.constant(&variant.name)
            );
            let _ = writeln!(out, "\t\tvar {} {ty}", self.plan.zero);
            let _ = writeln!(out, "\t\treturn {}, false", self.plan.zero);
            out.push_str("\t}\n");
            if self.compact {
                let value = &self.plan.value_param;
                let _ = writeln!(out, "\t{value}, _ := {u}.{}.({ty})", self.plan.inner);
                let _ = writeln!(out, "\treturn {value}, true");
            } else {
                let _ = writeln!(out, "\treturn {u}.{}, true", variant.name);
            }
            out.push_str("}\n");
        }
    }

    fn setters(&self, out: &mut String) {
        for (variant, setter) in self.variants().zip(&self.plan.setters) {
            let _ = writeln!(
                out,
                "\n// {setter} makes {} the active variant, holding {}.",
                variant.name, self.plan.value_param
            );
            let _ = writeln!(
                out,
                "func {} {setter}({} {}) {{",
                self.receiver(),
                self.plan.value_param,
                self.ty(&variant.ty)
            );
            let _ = writeln!(out, "\t*{} = {}", self.plan.receiver, self.slot_init(variant));
            out.push_str("}\n");
        }
    }

    fn match_method(&self, out: &mut String) {
        let Some(method) = &self.plan.match_method else {
            return;
        };
        let u = &self.plan.receiver;
        let _ = writeln!(
            out,
            "\n// {method} calls the handler of the active variant with its value."
        );
        let _ = writeln!(out, "func {} {method}(", self.receiver());
        for (variant, handler) in self.variants().zip(&self.plan.handlers) {
            let _ = writeln!(out, "\t{handler} func({}),", self.ty(&variant.ty));
        }
        if self.plan.invalid.is_some() {
            let _ = writeln!(out, "\t{} func(),", self.plan.invalid_handler);
        }
        out.push_str(") {\n");
        let _ = writeln!(out, "\tswitch {u}.{} {{", self.plan.discriminant);
        for (variant, handler) in self.variants().zip(&self.plan.handlers) {
            let _ = writeln!(out, "\tcase {}:", self.constant(&variant.name));
            if self.compact {
                let value = &self.plan.value_param;
                let _ = writeln!(
                    out,
                    "\t\t{value}, _ := {u}.{}.({})",
                    self.plan.inner,
                    self.ty(&variant.ty)
                );
                let _ = writeln!(out, "\t\t{handler}({value})");
            } else {
                let _ = writeln!(out, "\t\t{handler}({u}.{})", variant.name);
            }
        }
        if self.plan.invalid.is_some() {
            out.push_str("\tdefault:\n");
            let _ = writeln!(out, "\t\t{}()", self.plan.invalid_handler);
        }
        out.push_str("\t}\n}\n");
    }

    fn constructors(&self, out: &mut String) {
        for variant in self.variants() {
            let name = format!("New{}", self.constant(&variant.name));
            let _ = writeln!(
                out,
                "\n// {name} returns a {} holding {}.",
                self.out_type(),
                variant.name
            );
            let _ = writeln!(
                out,
                "func {name}{}({} {}) {} {{",
                self.params_decl,
                self.plan.value_param,
                self.ty(&variant.ty),
                self.instance()
            );
            let _ = writeln!(out, "\treturn {}", self.slot_init(variant));
            out.push_str("}\n");
        }
    }
}
