//! Error rendering using ariadne
//!
//! Errors that point into a Go source file are shown with a snippet of that
//! file. Everything else is a single `error:` line.

use crate::{Error, LoadError, Location};
use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

/// Render an error with beautiful formatting to stderr
///
/// # Example
/// ```no_run
/// use gunion::{LoadRequest, OutputConfig, generate, render_error};
///
/// let request = LoadRequest {
///     source: "shapes.go".into(),
///     type_name: "shape".to_string(),
/// };
/// let config = OutputConfig::new("ShapeUnion", "shapes_gunion.go", "shapes");
/// if let Err(e) = generate(&request, &config) {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let Some(location) = error.location() else {
        return writeln!(writer, "error: {error}");
    };
    // The file may have changed or vanished since it was parsed.
    match std::fs::read_to_string(&location.file) {
        Ok(source) if location.span.end <= source.len() => {
            render_snippet(error, location, &source, writer, use_color)
        }
        _ => writeln!(writer, "error: {error}"),
    }
}

fn render_snippet(
    error: &Error,
    location: &Location,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let file = location.file.display().to_string();
    let span = location.span.clone();
    let (message, label) = describe(error);

    let report = Report::build(ReportKind::Error, (file.as_str(), span.clone()))
        .with_message(&message)
        .with_config(
            Config::default()
                .with_color(use_color)
                .with_index_type(IndexType::Byte),
        )
        .with_label(
            Label::new((file.as_str(), span))
                .with_message(label.as_deref().unwrap_or(&message))
                .with_color(colors.next()),
        );

    report
        .finish()
        .write((file.as_str(), Source::from(source)), &mut *writer)
}

/// Headline and label text, without the location prefix the `Display`
/// impls carry.
fn describe(error: &Error) -> (String, Option<String>) {
    let Error::Load(load) = error else {
        return (error.to_string(), None);
    };
    match load {
        LoadError::Syntax { message, .. } => (format!("syntax error: {message}"), None),
        LoadError::BadConstraint { message, .. } => {
            (format!("invalid build constraint: {message}"), None)
        }
        LoadError::Redeclared { name, .. } => (
            format!("{name} redeclared in this package"),
            Some("declared again here".to_string()),
        ),
        LoadError::Undefined { name, .. } => (format!("undefined: {name}"), None),
        LoadError::TypeArgCount { message, .. } => (message.clone(), None),
        LoadError::Unsupported {
            construct, field, ..
        } => (
            format!("unsupported {construct}"),
            field.as_ref().map(|f| format!("used by {f}")),
        ),
        other => (other.to_string(), None),
    }
}
