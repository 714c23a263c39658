//! ID3v2 Reader (C6): the largest single reader, covering three tag
//! revisions stacked back-to-back at the front of the file.

mod frames;
mod header;

use crate::triples::TripleSink;
use frames::Version;

/// Front-cover (`pic_type == 3`) art always wins; any other type is kept
/// only if nothing has been captured yet.
#[derive(Debug, Clone)]
pub(crate) struct AlbumArt {
    pub(crate) mime: String,
    pub(crate) bytes: Vec<u8>,
}

#[derive(Default)]
pub(crate) struct Capture {
    pub(crate) duration_secs: Option<u32>,
    pub(crate) album_art: Option<AlbumArt>,
    front_cover_seen: bool,
}

impl Capture {
    fn offer_art(&mut self, pic_type: u8, mime: String, bytes: Vec<u8>) {
        if pic_type == 3 {
            self.album_art = Some(AlbumArt { mime, bytes });
            self.front_cover_seen = true;
        } else if !self.front_cover_seen && self.album_art.is_none() {
            self.album_art = Some(AlbumArt { mime, bytes });
        }
    }
}

pub(crate) struct Id3v2Outcome {
    pub(crate) id3v2_size: u64,
    pub(crate) duration_secs: Option<u32>,
    pub(crate) album_art: Option<AlbumArt>,
}

/// Walks every ID3v2 tag stacked at the front of `head`, trying v2.4, then
/// v2.3, then v2.2 at each offset, and folding their frames into `sink`
/// against `subject`. Stops at the first offset where none of the three
/// match, which becomes the boundary passed on to the MPEG frame scan.
pub(crate) fn parse(head: &[u8], subject: &str, sink: &mut dyn TripleSink) -> Id3v2Outcome {
    let mut offset = 0usize;
    let mut capture = Capture::default();

    loop {
        let remaining = match head.get(offset..) {
            Some(r) => r,
            None => break,
        };

        let tag = header::try_v24(remaining)
            .map(|t| (t, Version::V24))
            .or_else(|| header::try_v23(remaining).map(|t| (t, Version::V23)));

        if let Some((tag, version)) = tag {
            if tag.consumed == 0 {
                break;
            }

            frames::walk_2x(&tag.body, version, subject, sink, &mut capture);
            offset += tag.consumed;
            continue;
        }

        if let Some(tag) = header::try_v22(remaining) {
            if tag.consumed == 0 {
                break;
            }

            frames::walk_22(&tag.body, subject, sink, &mut capture);
            offset += tag.consumed;
            continue;
        }

        break;
    }

    if offset > 0 {
        log::debug!("id3v2: consumed {} bytes across stacked tags", offset);
    }

    Id3v2Outcome {
        id3v2_size: offset as u64,
        duration_secs: capture.duration_secs,
        album_art: capture.album_art,
    }
}
