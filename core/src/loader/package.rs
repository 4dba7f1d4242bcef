//! Package discovery: module root, import path, and the parsed files of one
//! package directory.

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use tracing::{debug, trace};

use super::build::BuildContext;
use super::error::{LoadError, Location};
use super::parser::parse_file;
use super::syntax::{ConstValue, SourceFile, TypeSpec};
use crate::names::default_package_name;

/// One parsed source file.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub syntax: SourceFile,
    /// Local import name to import path.
    imports: HashMap<String, String>,
    has_dot_import: bool,
}

impl ParsedFile {
    fn new(path: PathBuf, source: String) -> Result<Self, LoadError> {
        let syntax = parse_file(&source).map_err(|err| LoadError::Syntax {
            location: Location::new(&path, &source, err.span.clone()),
            message: err.message,
        })?;

        let mut imports = HashMap::new();
        let mut has_dot_import = false;
        for spec in &syntax.imports {
            match spec.name.as_ref().map(|n| n.name.as_str()) {
                Some("_") => {}
                Some(".") => has_dot_import = true,
                Some(name) => {
                    imports.insert(name.to_string(), spec.path.clone());
                }
                None => {
                    imports.insert(default_package_name(&spec.path), spec.path.clone());
                }
            }
        }

        Ok(Self {
            path,
            source,
            syntax,
            imports,
            has_dot_import,
        })
    }

    /// Import path bound to `name` in this file.
    pub fn import(&self, name: &str) -> Option<&str> {
        self.imports.get(name).map(String::as_str)
    }

    pub fn has_dot_import(&self) -> bool {
        self.has_dot_import
    }

    pub fn location(&self, span: std::ops::Range<usize>) -> Location {
        Location::new(&self.path, &self.source, span)
    }
}

/// A type declaration and the file it lives in.
#[derive(Debug, Clone, Copy)]
pub struct TypeDecl<'p> {
    pub file: &'p ParsedFile,
    pub spec: &'p TypeSpec,
}

/// All files of one package, with its package-level scope.
#[derive(Debug)]
pub struct Package {
    pub name: String,
    /// Canonical import path.
    pub path: String,
    files: Vec<ParsedFile>,
    /// Type name to (file index, spec index).
    types: HashMap<String, (usize, usize)>,
    consts: HashMap<String, ConstValue>,
}

impl Package {
    /// Loads the package in `dir`, whose import path is `path`, for the host
    /// platform (or `GOOS`/`GOARCH` when set).
    pub fn load_dir(dir: &Path, path: &str) -> Result<Self, LoadError> {
        let context = BuildContext::from_env(|key| std::env::var(key).ok());
        Self::load_dir_with(dir, path, &context)
    }

    /// Loads the package in `dir` as built for `context`.
    ///
    /// Reads every `.go` file except tests and files excluded by build
    /// constraints, in name order.
    pub fn load_dir_with(
        dir: &Path,
        path: &str,
        context: &BuildContext,
    ) -> Result<Self, LoadError> {
        let io_err = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut file_paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let file_path = entry.path();
            let Some(file_name) = file_path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(".go") || file_name.ends_with("_test.go") {
                continue;
            }
            if file_name.starts_with('.') || file_name.starts_with('_') {
                continue;
            }
            if !context.matches_file_name(file_name) {
                trace!(file = file_name, goos = %context.goos, goarch = %context.goarch, "excluded by file name");
                continue;
            }
            if entry.file_type().map_err(io_err)?.is_file() {
                file_paths.push(file_path);
            }
        }
        file_paths.sort();

        let mut sources = Vec::with_capacity(file_paths.len());
        for file_path in file_paths {
            let source = fs::read_to_string(&file_path).map_err(|source| LoadError::Io {
                path: file_path.clone(),
                source,
            })?;
            let included = context
                .matches_source(&source)
                .map_err(|err| LoadError::BadConstraint {
                    location: Location::new(&file_path, &source, err.span.clone()),
                    message: err.message,
                })?;
            if !included {
                trace!(file = %file_path.display(), "excluded by build constraint");
                continue;
            }
            sources.push((file_path, source));
        }
        Self::from_sources(dir, path, sources)
    }

    /// Builds a package from in-memory files. `dir` is only used in errors.
    pub fn from_sources(
        dir: &Path,
        path: &str,
        sources: Vec<(PathBuf, String)>,
    ) -> Result<Self, LoadError> {
        if sources.is_empty() {
            return Err(LoadError::EmptyPackage {
                dir: dir.to_path_buf(),
            });
        }

        let mut files = Vec::with_capacity(sources.len());
        for (file_path, source) in sources {
            trace!(file = %file_path.display(), "parsing");
            files.push(ParsedFile::new(file_path, source)?);
        }

        let first: &ParsedFile = &files[0];
        let name = first.syntax.package.name.clone();
        if let Some(other) = files.iter().find(|f| f.syntax.package.name != name) {
            return Err(LoadError::PackageMismatch {
                dir: dir.to_path_buf(),
                first: name,
                first_file: first.path.clone(),
                second: other.syntax.package.name.clone(),
                second_file: other.path.clone(),
            });
        }

        let mut types = HashMap::new();
        let mut consts = HashMap::new();
        for (file_index, file) in files.iter().enumerate() {
            for (spec_index, spec) in file.syntax.types.iter().enumerate() {
                if spec.name.name == "_" {
                    continue;
                }
                if types
                    .insert(spec.name.name.clone(), (file_index, spec_index))
                    .is_some()
                {
                    return Err(LoadError::Redeclared {
                        name: spec.name.name.clone(),
                        location: file.location(spec.name.span.clone()),
                    });
                }
            }
            for spec in &file.syntax.consts {
                if spec.name.name != "_" {
                    consts.insert(spec.name.name.clone(), spec.value);
                }
            }
        }

        debug!(
            package = %path,
            files = files.len(),
            types = types.len(),
            "loaded package"
        );
        Ok(Self {
            name,
            path: path.to_string(),
            files,
            types,
            consts,
        })
    }

    pub fn files(&self) -> &[ParsedFile] {
        &self.files
    }

    pub fn lookup_type(&self, name: &str) -> Option<TypeDecl<'_>> {
        let &(file_index, spec_index) = self.types.get(name)?;
        let file = &self.files[file_index];
        Some(TypeDecl {
            file,
            spec: &file.syntax.types[spec_index],
        })
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn lookup_const(&self, name: &str) -> Option<ConstValue> {
        self.consts.get(name).copied()
    }
}

/// Finds the enclosing module: the nearest `go.mod` at or above `dir`.
///
/// Returns the module root directory and the module path.
pub fn find_module(dir: &Path) -> Result<(PathBuf, String), LoadError> {
    let mut current = Some(dir);
    while let Some(candidate) = current {
        let go_mod = candidate.join("go.mod");
        if go_mod.is_file() {
            let contents = fs::read_to_string(&go_mod).map_err(|source| LoadError::Io {
                path: go_mod.clone(),
                source,
            })?;
            let module = parse_module_path(&contents).ok_or_else(|| LoadError::BadModule {
                path: go_mod.clone(),
                message: "missing module directive".to_string(),
            })?;
            return Ok((candidate.to_path_buf(), module));
        }
        current = candidate.parent();
    }
    Err(LoadError::NoModule {
        dir: dir.to_path_buf(),
    })
}

/// Extracts the path from the `module` directive of a go.mod file.
pub fn parse_module_path(contents: &str) -> Option<String> {
    for line in contents.lines() {
        let line = line.split("//").next().unwrap_or_default().trim();
        let Some(rest) = line.strip_prefix("module") else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let rest = rest.trim();
        let path = rest
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .or_else(|| rest.strip_prefix('`').and_then(|r| r.strip_suffix('`')))
            .unwrap_or(rest);
        if !path.is_empty() {
            return Some(path.to_string());
        }
    }
    None
}

/// Import path of the package in `dir`, inside the module rooted at `root`.
pub fn import_path(root: &Path, module: &str, dir: &Path) -> String {
    let mut path = module.to_string();
    if let Ok(relative) = dir.strip_prefix(root) {
        for component in relative.components() {
            path.push('/');
            path.push_str(&component.as_os_str().to_string_lossy());
        }
    }
    path
}
