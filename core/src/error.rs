use thiserror::Error as ThisError;

use crate::codegen::SynthesisError;
use crate::loader::{LoadError, Location};
use crate::union::NotARecord;

/// Any failure between reading the source package and producing Go text.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    NotARecord(#[from] NotARecord),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

impl Error {
    /// Source position of the failure, when it has one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Error::Load(err) => err.location(),
            Error::NotARecord(_) | Error::Synthesis(_) => None,
        }
    }
}
