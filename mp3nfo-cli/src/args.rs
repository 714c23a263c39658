use std::path::PathBuf;

use clap::Parser;

/// Dump MP3 metadata and stream descriptor triples for a file.
#[derive(Parser, Debug)]
#[command(name = "mp3nfo", version)]
pub(crate) struct Args {
    /// The MP3 file to inspect.
    pub(crate) path: PathBuf,

    /// Print all technical information, including skipped frames.
    #[arg(short, long)]
    pub(crate) pedantic: bool,

    /// Write any captured album art to this path instead of discarding it.
    #[arg(long, value_name = "PATH")]
    pub(crate) dump_art: Option<PathBuf>,
}
