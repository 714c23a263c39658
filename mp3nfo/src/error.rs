//! Top-level error type.
//!
//! This is deliberately the *only* error surface the library exposes;
//! malformed tags and missing MPEG frames are non-fatal per the error
//! handling design and are logged, not returned (see `id3v2` and `mpeg`).

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

#[derive(Debug)]
pub enum ExtractError {
    Io(io::Error),
    EmptyFile,
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ExtractError::Io(err) => write!(f, "i/o error: {}", err),
            ExtractError::EmptyFile => write!(f, "file is empty"),
        }
    }
}

impl error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ExtractError::Io(err) => Some(err),
            ExtractError::EmptyFile => None,
        }
    }
}

impl From<io::Error> for ExtractError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ExtractError::EmptyFile
        } else {
            ExtractError::Io(err)
        }
    }
}
