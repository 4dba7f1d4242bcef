use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use gunion_core::names::capitalize;
use gunion_core::{Features, LoadRequest, OutputConfig};
use miette::Diagnostic;
use thiserror::Error;

/// gunion - Generate tagged unions from Go struct definitions
///
/// The union holds exactly one of the struct's fields at a time. Unless
/// --no-default is given, the first field is the zero value's variant.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gunion")]
#[command(about = "Generates tagged unions based on a struct definition", long_about = None)]
pub struct Args {
    /// Struct to generate the union from
    #[arg(short = 't', long = "type")]
    pub type_name: String,

    /// Name of the union type [default: the input name capitalized, suffixed with Union]
    #[arg(long)]
    pub out_type: Option<String>,

    /// File declaring the struct [default: $GOFILE]
    #[arg(long)]
    pub src: Option<PathBuf>,

    /// Output file [default: <src>_gunion.go]
    #[arg(short = 'o', long)]
    pub out_file: Option<PathBuf>,

    /// Package clause of the output file [default: $GOPACKAGE]
    #[arg(long)]
    pub out_pkg: Option<String>,

    /// Import path of the output package [default: the struct's package]
    #[arg(long)]
    pub out_pkg_path: Option<String>,

    /// Store the value in a single `any` field and add a Value() accessor
    #[arg(long)]
    pub public_value: bool,

    /// Omit getters for union members
    #[arg(long)]
    pub no_getters: bool,

    /// Omit setters for union members
    #[arg(long)]
    pub no_setters: bool,

    /// Omit the Match function
    #[arg(long, visible_alias = "no-switch")]
    pub no_match: bool,

    /// Don't assume the first field is the default; the zero value is invalid
    #[arg(long)]
    pub no_default: bool,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ArgsError {
    #[error("received empty input type")]
    #[diagnostic(code(gunion::args::empty_type))]
    EmptyType,

    #[error("one of --src or GOFILE must be set")]
    #[diagnostic(
        code(gunion::args::no_source),
        help("run gunion from a //go:generate directive, or pass --src")
    )]
    NoSource,

    #[error("one of --out-pkg or GOPACKAGE must be set")]
    #[diagnostic(
        code(gunion::args::no_package),
        help("run gunion from a //go:generate directive, or pass --out-pkg")
    )]
    NoPackage,

    #[error("failed to make {} absolute", path.display())]
    #[diagnostic(code(gunion::args::bad_path))]
    BadPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Args {
    /// Fills in defaults, reading `GOFILE` and `GOPACKAGE` through `env`.
    /// Empty values count as unset.
    pub fn resolve(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(LoadRequest, OutputConfig), ArgsError> {
        if self.type_name.is_empty() {
            return Err(ArgsError::EmptyType);
        }
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        let src = self
            .src
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| non_empty(env("GOFILE")).map(PathBuf::from))
            .ok_or(ArgsError::NoSource)?;
        let out_pkg = non_empty(self.out_pkg.clone())
            .or_else(|| non_empty(env("GOPACKAGE")))
            .ok_or(ArgsError::NoPackage)?;
        let out_type = non_empty(self.out_type.clone())
            .unwrap_or_else(|| format!("{}Union", capitalize(&self.type_name)));
        let out_file = self
            .out_file
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| default_out_file(&src));

        let source = std::path::absolute(&src).map_err(|source| ArgsError::BadPath {
            path: src.clone(),
            source,
        })?;

        let mut config = OutputConfig::new(out_type, out_file, out_pkg)
            .with_features(self.features());
        config.out_pkg_path = non_empty(self.out_pkg_path.clone());

        Ok((
            LoadRequest {
                source,
                type_name: self.type_name.clone(),
            },
            config,
        ))
    }

    fn features(&self) -> Features {
        let mut features = Features::all();
        features.set(Features::PUBLIC_VALUE, self.public_value);
        features.set(Features::GETTERS, !self.no_getters);
        features.set(Features::SETTERS, !self.no_setters);
        features.set(Features::MATCH, !self.no_match);
        features.set(Features::DEFAULT, !self.no_default);
        features
    }
}

/// `dir/file.go` becomes `dir/file_gunion.go`.
fn default_out_file(src: &Path) -> PathBuf {
    let mut name = OsString::from(src.file_stem().unwrap_or(src.as_os_str()));
    name.push("_gunion");
    if let Some(ext) = src.extension() {
        name.push(".");
        name.push(ext);
    }
    src.with_file_name(name)
}

#[cfg(test)]
#[path = "args_test.rs"]
mod args_test;
