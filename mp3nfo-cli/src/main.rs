#![forbid(unsafe_code)]

mod args;
mod logger;
mod sink;

use std::process;

use clap::Parser;

use args::Args;
use logger::PedanticLogger;
use sink::{FileArtSink, StdoutSink};

fn main() {
    let args = Args::parse();

    PedanticLogger::setup(args.pedantic);

    let mut triples = StdoutSink::default();
    let mut art_sink = FileArtSink::new(args.dump_art.clone());
    let subject = format!("file://{}", args.path.display());

    if let Err(err) = mp3nfo::run(&args.path, &subject, &mut triples, &mut art_sink) {
        eprintln!("mp3nfo: {}", err);
        process::exit(1);
    }
}
