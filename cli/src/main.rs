mod args;

use std::path::{Path, PathBuf};

use args::Args;
use clap::Parser;
use gunion::render_error;
use miette::{Diagnostic, Result};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, Diagnostic)]
enum WriteError {
    #[error("failed to write {}", path.display())]
    #[diagnostic(code(gunion::write))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `contents` next to `path` and renames it into place, so readers
/// never see a partial file.
fn write_atomically(path: &Path, contents: &str) -> Result<(), WriteError> {
    let io_error = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{name}.gunion-tmp"));

    std::fs::write(&tmp, contents).map_err(io_error)?;
    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_error(source));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let (request, mut config) = args.resolve(|key| std::env::var(key).ok())?;
    config.command = Some(std::env::args().collect::<Vec<_>>().join(" "));
    debug!(?request, out_type = %config.out_type, "resolved arguments");

    let source = match gunion::generate(&request, &config) {
        Ok(source) => source,
        Err(err) => {
            render_error(&err);
            std::process::exit(1);
        }
    };

    write_atomically(&config.out_file, &source)?;
    info!(file = %config.out_file.display(), "wrote union");
    Ok(())
}
