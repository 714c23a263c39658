use std::fs;
use std::path::PathBuf;

use mp3nfo::{AlbumArtSink, TripleSink};

/// Prints every triple to stdout as it arrives; `find` replays what has
/// already been printed, mirroring an in-memory multiset sink.
#[derive(Default)]
pub(crate) struct StdoutSink {
    seen: Vec<(String, String, String)>,
}

impl TripleSink for StdoutSink {
    fn insert(&mut self, subject: &str, predicate: &str, object: &str) {
        println!("{} {} {}", subject, predicate, object);
        self.seen.push((subject.to_string(), predicate.to_string(), object.to_string()));
    }

    fn insert_with_int(&mut self, subject: &str, predicate: &str, value: i64) {
        self.insert(subject, predicate, &value.to_string());
    }

    fn find(&self, subject: &str, predicate: &str) -> Option<String> {
        self.seen
            .iter()
            .rev()
            .find(|(s, p, _)| s == subject && p == predicate)
            .map(|(_, _, o)| o.clone())
    }
}

/// Writes captured album art to `dest` if one is configured and the file
/// actually carried art; otherwise does nothing.
pub(crate) struct FileArtSink {
    dest: Option<PathBuf>,
}

impl FileArtSink {
    pub(crate) fn new(dest: Option<PathBuf>) -> Self {
        Self { dest }
    }
}

impl AlbumArtSink for FileArtSink {
    fn process_art(
        &mut self,
        bytes: &[u8],
        mime: &str,
        artist_name: Option<&str>,
        album_title: Option<&str>,
        track_hint: Option<&str>,
        source_filename: &str,
    ) {
        if bytes.is_empty() {
            log::info!("no album art captured for {}", source_filename);
            return;
        }

        log::info!(
            "captured {} bytes of {} art for {} ({} / {})",
            bytes.len(),
            mime,
            track_hint.unwrap_or("?"),
            artist_name.unwrap_or("?"),
            album_title.unwrap_or("?"),
        );

        if let Some(dest) = &self.dest {
            if let Err(err) = fs::write(dest, bytes) {
                log::error!("failed to write album art to {}: {}", dest.display(), err);
            }
        }
    }
}
