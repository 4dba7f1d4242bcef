use super::{ChanDir, Named, Signature, Type, TypeParam, Var};
use alloc::string::String;
use core::fmt::{self, Write};

/// Decides how a reference to a declared type is spelled.
///
/// Returns the qualifier to write before the name (`io` in `io.Writer`), or
/// `None` to write the bare name.
pub trait Qualifier {
    fn qualifier<'a>(&'a self, named: &'a Named) -> Option<&'a str>;
}

/// Qualifies every non-universe type with its full package path, as `go/types`
/// does in its `String` methods. Used by `Display`.
pub struct FullPath;

impl Qualifier for FullPath {
    fn qualifier<'a>(&'a self, named: &'a Named) -> Option<&'a str> {
        if named.is_universe() {
            None
        } else {
            Some(&named.package)
        }
    }
}

/// Writes types in Go syntax.
pub struct TypeFormatter<'q, Q: Qualifier + ?Sized> {
    output: String,
    qualifier: &'q Q,
}

impl<'q, Q: Qualifier + ?Sized> TypeFormatter<'q, Q> {
    pub fn new(qualifier: &'q Q) -> Self {
        Self {
            output: String::new(),
            qualifier,
        }
    }

    pub fn format(ty: &Type, qualifier: &'q Q) -> String {
        let mut formatter = Self::new(qualifier);
        formatter.write_type(ty);
        formatter.output
    }

    /// Formats a type-parameter list without brackets: `T any, K comparable`.
    pub fn format_type_params(params: &[TypeParam], qualifier: &'q Q) -> String {
        let mut formatter = Self::new(qualifier);
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                formatter.output.push_str(", ");
            }
            formatter.output.push_str(&param.name);
            formatter.output.push(' ');
            formatter.write_type(&param.constraint);
        }
        formatter.output
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn write_type(&mut self, ty: &Type) {
        match ty {
            Type::Basic(basic) => self.output.push_str(basic.name()),
            Type::Named(named) => self.write_named(named),
            Type::Pointer(elem) => {
                self.output.push('*');
                self.write_type(elem);
            }
            Type::Array { len, elem } => {
                let _ = write!(self.output, "[{}]", len);
                self.write_type(elem);
            }
            Type::Slice(elem) => {
                self.output.push_str("[]");
                self.write_type(elem);
            }
            Type::Map { key, value } => {
                self.output.push_str("map[");
                self.write_type(key);
                self.output.push(']');
                self.write_type(value);
            }
            Type::Chan { dir, elem } => {
                let (prefix, parens) = match dir {
                    // `chan <-chan T` would parse as `chan<- chan T`.
                    ChanDir::SendRecv => (
                        "chan ",
                        matches!(
                            **elem,
                            Type::Chan {
                                dir: ChanDir::RecvOnly,
                                ..
                            }
                        ),
                    ),
                    ChanDir::SendOnly => ("chan<- ", false),
                    ChanDir::RecvOnly => ("<-chan ", false),
                };
                self.output.push_str(prefix);
                if parens {
                    self.output.push('(');
                }
                self.write_type(elem);
                if parens {
                    self.output.push(')');
                }
            }
            Type::Signature(sig) => {
                self.output.push_str("func");
                self.write_signature(sig);
            }
            Type::Struct(s) => {
                if s.fields.is_empty() {
                    self.output.push_str("struct{}");
                    return;
                }
                self.output.push_str("struct{ ");
                for (i, field) in s.fields.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str("; ");
                    }
                    if !field.embedded {
                        self.output.push_str(&field.name);
                        self.output.push(' ');
                    }
                    self.write_type(&field.ty);
                    if let Some(tag) = &field.tag {
                        self.output.push(' ');
                        write_tag(&mut self.output, tag);
                    }
                }
                self.output.push_str(" }");
            }
            Type::Interface(iface) => {
                if iface.embeds.is_empty() && iface.methods.is_empty() {
                    self.output.push_str("interface{}");
                    return;
                }
                self.output.push_str("interface{ ");
                let mut first = true;
                for method in &iface.methods {
                    if !first {
                        self.output.push_str("; ");
                    }
                    first = false;
                    self.output.push_str(&method.name);
                    self.write_signature(&method.signature);
                }
                for embed in &iface.embeds {
                    if !first {
                        self.output.push_str("; ");
                    }
                    first = false;
                    self.write_type(embed);
                }
                self.output.push_str(" }");
            }
            Type::Union(union) => {
                for (i, member) in union.members.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(" | ");
                    }
                    if member.approximate {
                        self.output.push('~');
                    }
                    self.write_type(&member.ty);
                }
            }
        }
    }

    fn write_named(&mut self, named: &Named) {
        if let Some(qualifier) = self.qualifier.qualifier(named) {
            self.output.push_str(qualifier);
            self.output.push('.');
        }
        self.output.push_str(&named.name);
        if !named.type_args.is_empty() {
            self.output.push('[');
            for (i, arg) in named.type_args.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.write_type(arg);
            }
            self.output.push(']');
        }
    }

    /// Writes everything after `func` (or after a method name).
    fn write_signature(&mut self, sig: &Signature) {
        self.output.push('(');
        self.write_vars(&sig.params, sig.variadic);
        self.output.push(')');

        match sig.results.as_slice() {
            [] => {}
            [single] if single.name.is_empty() => {
                self.output.push(' ');
                self.write_type(&single.ty);
            }
            results => {
                self.output.push_str(" (");
                self.write_vars(results, false);
                self.output.push(')');
            }
        }
    }

    fn write_vars(&mut self, vars: &[Var], variadic: bool) {
        let named = vars.iter().any(|var| !var.name.is_empty());
        for (i, var) in vars.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            if named {
                self.output.push_str(if var.name.is_empty() { "_" } else { &var.name });
                self.output.push(' ');
            }
            match &var.ty {
                Type::Slice(elem) if variadic && i + 1 == vars.len() => {
                    self.output.push_str("...");
                    self.write_type(elem);
                }
                ty => self.write_type(ty),
            }
        }
    }
}

/// Writes a struct tag as a Go string literal, preferring a raw literal.
fn write_tag(output: &mut String, tag: &str) {
    if !tag.contains('`') && !tag.contains('\r') {
        output.push('`');
        output.push_str(tag);
        output.push('`');
        return;
    }
    output.push('"');
    for c in tag.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(output, "\\u{:04x}", c as u32);
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TypeFormatter::format(self, &FullPath))
    }
}

impl fmt::Display for Named {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = TypeFormatter::new(&FullPath);
        formatter.write_named(self);
        f.write_str(&formatter.finish())
    }
}
