//! ID3v1 Reader (C5).

use crate::genre;
use crate::string::{self, Encoding};
use crate::triples::{self, prefixes, TripleSink};

const MAGIC: &[u8; 3] = b"TAG";
const TITLE_RANGE: std::ops::Range<usize> = 3..33;
const ARTIST_RANGE: std::ops::Range<usize> = 33..63;
const ALBUM_RANGE: std::ops::Range<usize> = 63..93;
const YEAR_RANGE: std::ops::Range<usize> = 93..97;
const COMMENT_RANGE: std::ops::Range<usize> = 97..127;
const GENRE_BYTE: usize = 127;

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct TagSet {
    pub(crate) title: Option<String>,
    pub(crate) artist: Option<String>,
    pub(crate) album: Option<String>,
    pub(crate) year: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) trackno: Option<u8>,
    pub(crate) genre: Option<String>,
}

/// Parses the trailing 128-byte ID3v1 region. Returns `None` if the magic
/// `"TAG"` is absent.
pub(crate) fn parse(trailer: &[u8; 128]) -> Option<TagSet> {
    if &trailer[0..3] != MAGIC {
        return None;
    }

    // ID3v1.1: byte 28 of the comment region (absolute index 125) being
    // 0x00 means byte 29 (absolute index 126) holds a 1-byte track number,
    // and only the first 28 bytes are the actual comment.
    let (comment_bytes, trackno) = if trailer[125] == 0x00 {
        (&trailer[COMMENT_RANGE.start..125], Some(trailer[126]))
    } else {
        (&trailer[COMMENT_RANGE], None)
    };

    Some(TagSet {
        title: decode_field(&trailer[TITLE_RANGE]),
        artist: decode_field(&trailer[ARTIST_RANGE]),
        album: decode_field(&trailer[ALBUM_RANGE]),
        year: decode_field(&trailer[YEAR_RANGE]),
        comment: decode_field(comment_bytes),
        trackno,
        genre: genre::resolve_byte(trailer[GENRE_BYTE]),
    })
}

fn decode_field(raw: &[u8]) -> Option<String> {
    let trimmed = trim_padding(raw);

    if trimmed.is_empty() {
        return None;
    }

    let mut reader = crate::io::ByteReader::new(trimmed);
    Some(string::read(Encoding::Latin1, &mut reader))
}

fn trim_padding(raw: &[u8]) -> &[u8] {
    let end = raw
        .iter()
        .rposition(|&b| b != 0x00 && b != b' ')
        .map(|i| i + 1)
        .unwrap_or(0);

    &raw[..end]
}

/// Emits triples for `tags` against `subject`, mirroring the document-order
/// placement spec.md §5 describes ("ID3v1 first").
pub(crate) fn emit(tags: &TagSet, subject: &str, sink: &mut dyn TripleSink) {
    if let Some(title) = &tags.title {
        sink.insert(subject, &format!("{}title", prefixes::NIE), title);
    }

    if let Some(artist) = &tags.artist {
        triples::mint_and_link(
            sink,
            subject,
            &format!("{}performer", prefixes::NMM),
            "artist",
            &format!("{}Artist", prefixes::NMM),
            &format!("{}artistName", prefixes::NMM),
            artist,
        );
    }

    if let Some(album) = &tags.album {
        triples::mint_and_link(
            sink,
            subject,
            &format!("{}musicAlbum", prefixes::NMM),
            "album",
            &format!("{}MusicAlbum", prefixes::NMM),
            &format!("{}albumTitle", prefixes::NMM),
            album,
        );
    }

    if let Some(year) = &tags.year {
        sink.insert(subject, &format!("{}contentCreated", prefixes::NIE), year);
    }

    if let Some(comment) = &tags.comment {
        sink.insert(subject, &format!("{}comment", prefixes::NIE), comment);
    }

    if let Some(trackno) = tags.trackno {
        sink.insert_with_int(
            subject,
            &format!("{}trackNumber", prefixes::NMM),
            i64::from(trackno),
        );
    }

    if let Some(genre) = &tags.genre {
        sink.insert(subject, &format!("{}genre", prefixes::NFO), genre);
    }
}
