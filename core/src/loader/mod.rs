//! Loads a Go package from disk and translates one of its declarations.
//!
//! ```text
//! source file ──► go.mod lookup ──► package dir ──► lexer/parser ──► scope
//!                                                                     │
//!                                                 Named (expanded) ◄──┘
//! ```

mod build;
mod error;
mod lexer;
mod package;
mod parser;
mod syntax;
mod translate;

use std::path::Path;

use gunion_types::Named;
use tracing::info;

pub use build::BuildContext;
pub use error::{FieldRef, LoadError, Location, ParseError};
pub use package::{Package, ParsedFile, find_module, import_path, parse_module_path};
pub use translate::Translator;

use crate::config::LoadRequest;
use crate::union::NotARecord;

/// Loads the package containing `request.source` and returns the expanded
/// declaration of `request.type_name`.
///
/// The declaration must denote a struct.
pub fn load(request: &LoadRequest) -> Result<Named, LoadError> {
    let source = request.source.as_path();
    let dir = match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = dir.canonicalize().map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let (root, module) = find_module(&dir)?;
    let path = import_path(&root, &module, &dir);
    info!(package = %path, dir = %dir.display(), "loading package");

    let package = Package::load_dir(&dir, &path)?;
    let file_name = source.file_name();
    if file_name.is_none()
        || !package
            .files()
            .iter()
            .any(|file| file.path.file_name() == file_name)
    {
        return Err(LoadError::SourceNotInPackage {
            source_file: source.to_path_buf(),
            dir,
        });
    }

    load_from_package(&package, &request.type_name)
}

/// Translates `type_name` from an already loaded package.
pub fn load_from_package(package: &Package, type_name: &str) -> Result<Named, LoadError> {
    let named = Translator::new(package).translate_root(type_name)?;
    if named.underlying_struct().is_none() {
        let kind = named
            .underlying
            .as_deref()
            .map_or("unknown type", |ty| ty.kind_name());
        return Err(NotARecord {
            name: named.name.clone(),
            package: named.package.clone(),
            kind: kind.to_string(),
        }
        .into());
    }
    Ok(named)
}
