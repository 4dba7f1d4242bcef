use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

/// Syntax error in a single file, before it is tied to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A position in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    /// Byte range in the file.
    pub span: Range<usize>,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, source: &str, span: Range<usize>) -> Self {
        let start = span.start.min(source.len());
        let before = &source[..start];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            file: file.into(),
            span,
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// The struct field an unsupported construct was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub index: usize,
    pub name: String,
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field {} (`{}`)", self.index, self.name)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no go.mod found in {} or any parent directory", dir.display())]
    NoModule { dir: PathBuf },

    #[error("{}: malformed go.mod: {message}", path.display())]
    BadModule { path: PathBuf, message: String },

    #[error("{location}: syntax error: {message}")]
    Syntax { location: Location, message: String },

    #[error("{location}: invalid build constraint: {message}")]
    BadConstraint { location: Location, message: String },

    #[error("{}: no Go source files", dir.display())]
    EmptyPackage { dir: PathBuf },

    #[error(
        "found packages {first} ({}) and {second} ({}) in {}",
        first_file.display(),
        second_file.display(),
        dir.display()
    )]
    PackageMismatch {
        dir: PathBuf,
        first: String,
        first_file: PathBuf,
        second: String,
        second_file: PathBuf,
    },

    #[error("{} is not part of the package in {}", source_file.display(), dir.display())]
    SourceNotInPackage { source_file: PathBuf, dir: PathBuf },

    #[error("{location}: {name} redeclared in this package")]
    Redeclared { name: String, location: Location },

    #[error("{location}: undefined: {name}")]
    Undefined { name: String, location: Location },

    #[error("{location}: {message}")]
    TypeArgCount { message: String, location: Location },

    #[error("type {name} not found in package {package}")]
    NotFound { name: String, package: String },

    #[error("{location}: unsupported {construct}{}", field.as_ref().map(|f| format!(" in {f}")).unwrap_or_default())]
    Unsupported {
        construct: String,
        field: Option<FieldRef>,
        location: Location,
    },

    #[error(transparent)]
    NotARecord(#[from] crate::union::NotARecord),
}

impl LoadError {
    /// Source position of the error, when it has one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            LoadError::Syntax { location, .. }
            | LoadError::BadConstraint { location, .. }
            | LoadError::Redeclared { location, .. }
            | LoadError::Undefined { location, .. }
            | LoadError::TypeArgCount { location, .. }
            | LoadError::Unsupported { location, .. } => Some(location),
            LoadError::Io { .. }
            | LoadError::NoModule { .. }
            | LoadError::BadModule { .. }
            | LoadError::EmptyPackage { .. }
            | LoadError::PackageMismatch { .. }
            | LoadError::SourceNotInPackage { .. }
            | LoadError::NotFound { .. }
            | LoadError::NotARecord(_) => None,
        }
    }
}
