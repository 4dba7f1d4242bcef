//! Inputs to loading and code generation.

use std::path::PathBuf;

use bitflags::bitflags;

/// What to load: a declaration in the package of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// A Go source file. Its directory is the package to load.
    pub source: PathBuf,
    /// Name of the struct declaration to turn into a union.
    pub type_name: String,
}

bitflags! {
    /// Optional parts of the generated code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u8 {
        /// Store the active value in one `any` slot and expose `Value()`.
        const PUBLIC_VALUE = 1 << 0;
        /// `Get_<variant>() (T, bool)` accessors.
        const GETTERS = 1 << 1;
        /// `Set_<variant>(T)` mutators.
        const SETTERS = 1 << 2;
        /// `Match(...)` dispatch over handler functions.
        const MATCH = 1 << 3;
        /// The zero value is the first variant instead of an invalid state.
        const DEFAULT = 1 << 4;
    }
}

impl Default for Features {
    fn default() -> Self {
        Features::GETTERS | Features::SETTERS | Features::MATCH
    }
}

/// Where and how to emit the union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Name of the generated union type.
    pub out_type: String,
    /// Destination file.
    pub out_file: PathBuf,
    /// Package clause of the generated file.
    pub out_pkg: String,
    /// Import path of the destination package. `None` means the package of
    /// the source declaration.
    pub out_pkg_path: Option<String>,
    /// Invocation recorded in the generated header.
    pub command: Option<String>,
    pub features: Features,
}

impl OutputConfig {
    /// A configuration with default features and no recorded command.
    pub fn new(out_type: impl Into<String>, out_file: impl Into<PathBuf>, out_pkg: impl Into<String>) -> Self {
        Self {
            out_type: out_type.into(),
            out_file: out_file.into(),
            out_pkg: out_pkg.into(),
            out_pkg_path: None,
            command: None,
            features: Features::default(),
        }
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_features() {
        let features = Features::default();
        assert!(features.contains(Features::GETTERS | Features::SETTERS | Features::MATCH));
        assert!(!features.intersects(Features::PUBLIC_VALUE | Features::DEFAULT));
    }

    #[test]
    fn test_builder() {
        let config = OutputConfig::new("MyUnionUnion", "out.go", "basic")
            .with_features(Features::MATCH)
            .with_command("gunion -type=myUnion");
        assert_eq!(config.features, Features::MATCH);
        assert_eq!(config.command.as_deref(), Some("gunion -type=myUnion"));
        assert_eq!(config.out_pkg_path, None);
    }
}
