#![no_main]

use libfuzzer_sys::fuzz_target;
use mp3nfo::{AlbumArtSink, TripleSink};

struct NoopSink;

impl TripleSink for NoopSink {
    fn insert(&mut self, _subject: &str, _predicate: &str, _object: &str) {}
    fn insert_with_int(&mut self, _subject: &str, _predicate: &str, _value: i64) {}
    fn find(&self, _subject: &str, _predicate: &str) -> Option<String> {
        None
    }
}

struct NoopArtSink;

impl AlbumArtSink for NoopArtSink {
    fn process_art(
        &mut self,
        _bytes: &[u8],
        _mime: &str,
        _artist_name: Option<&str>,
        _album_title: Option<&str>,
        _track_hint: Option<&str>,
        _source_filename: &str,
    ) {
    }
}

fuzz_target!(|data: &[u8]| {
    // mp3nfo's core is pure byte-slice parsing; drive it directly rather
    // than round-tripping through a temp file.
    let mut sink = NoopSink;
    let mut art_sink = NoopArtSink;
    mp3nfo::extract_bytes(data, None, data.len() as u64, "file:///fuzz", &mut sink, &mut art_sink);
});
