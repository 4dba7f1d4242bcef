//! Collision-free names for everything the generator introduces.
//!
//! Generated members share one namespace with the variant slots, so each
//! generated name is escaped against the variant names and against the
//! names resolved before it. Escaping prepends `_` until the name is free.
//! Resolution runs in a fixed order, which makes the plan a pure function of
//! its inputs.

use hashbrown::HashSet;

use crate::config::Features;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPlan {
    /// Field holding the discriminant. `_variant` unless taken.
    pub discriminant: String,
    /// Field holding the active value in compact storage.
    pub inner: String,
    /// Suffix of the invalid-state constant. `None` when the zero value is
    /// the first variant.
    pub invalid: Option<String>,
    pub variant_method: String,
    pub value_method: Option<String>,
    pub match_method: Option<String>,
    /// One per variant when getters are enabled, otherwise empty.
    pub getters: Vec<String>,
    /// One per variant when setters are enabled, otherwise empty.
    pub setters: Vec<String>,
    /// Parameter names of `Match`, one per variant.
    pub handlers: Vec<String>,
    pub receiver: String,
    pub value_param: String,
    pub zero: String,
    pub invalid_handler: String,
}

/// Set of names already in use in one scope.
struct Namespace {
    taken: HashSet<String>,
}

impl Namespace {
    fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: names.into_iter().map(str::to_string).collect(),
        }
    }

    fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.taken.extend(names.into_iter().map(str::to_string));
    }

    /// Returns `base`, or `base` with `_` prepended until it is free, and
    /// marks the result as taken.
    fn claim(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        while self.taken.contains(&name) {
            name.insert(0, '_');
        }
        self.taken.insert(name.clone());
        name
    }
}

impl NamingPlan {
    /// Resolves every generated name.
    ///
    /// `reserved` holds identifiers the generated code refers to by name
    /// (type parameters, imported package names, type names); locals must not
    /// shadow them.
    pub fn resolve(variants: &[&str], features: Features, reserved: &HashSet<String>) -> Self {
        let mut members = Namespace::new(variants.iter().copied());

        let discriminant = members.claim("_variant");
        let inner = members.claim("_inner");
        let invalid = (!features.contains(Features::DEFAULT)).then(|| members.claim("Invalid"));
        let variant_method = members.claim("Variant");
        let value_method = features
            .contains(Features::PUBLIC_VALUE)
            .then(|| members.claim("Value"));
        let match_method = features
            .contains(Features::MATCH)
            .then(|| members.claim("Match"));

        let getters = if features.contains(Features::GETTERS) {
            variants
                .iter()
                .map(|v| members.claim(&format!("Get_{v}")))
                .collect()
        } else {
            Vec::new()
        };
        let setters = if features.contains(Features::SETTERS) {
            variants
                .iter()
                .map(|v| members.claim(&format!("Set_{v}")))
                .collect()
        } else {
            Vec::new()
        };

        let mut locals = Namespace::new(variants.iter().copied());
        locals.extend(reserved.iter().map(String::as_str));
        let receiver = locals.claim("u");
        let value_param = locals.claim("value");
        let zero = locals.claim("zero");
        let invalid_handler = locals.claim("invalid");

        // Handler parameters are named after their variants unless that name
        // is needed to spell a type inside `Match`.
        let handlers = variants
            .iter()
            .map(|&v| {
                if reserved.contains(v) {
                    locals.claim(v)
                } else {
                    v.to_string()
                }
            })
            .collect();

        Self {
            discriminant,
            inner,
            invalid,
            variant_method,
            value_method,
            match_method,
            getters,
            setters,
            handlers,
            receiver,
            value_param,
            zero,
            invalid_handler,
        }
    }
}

#[cfg(test)]
#[path = "naming_test.rs"]
mod naming_test;
