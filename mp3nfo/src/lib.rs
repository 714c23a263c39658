//! MP3 metadata and stream descriptor extraction.
//!
//! Given the bytes of a file purported to hold MPEG-1/2/2.5 Layer I/II/III
//! audio, produces RDF-style triples describing the musical work and its
//! stream properties, plus an optional embedded cover-art payload. See
//! `extract::run` for the entry point.

mod error;
mod extract;
mod genre;
mod id3v1;
mod id3v2;
mod io;
mod mpeg;
mod raw;
mod source;
mod string;
mod triples;
mod unsync;

pub use error::ExtractError;
pub use extract::{extract_bytes, run};
pub use triples::{prefixes, AlbumArtSink, TripleSink};
