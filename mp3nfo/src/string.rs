//! ID3 text field decoding (C2).

use crate::io::ByteReader;
use log::warn;

/// The encoding byte that prefixes every ID3v2 text-bearing frame payload.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Encoding {
    /// `0x00` — ISO-8859-1 / Latin-1.
    Latin1,
    /// `0x01` — UTF-16 with a leading BOM.
    Utf16,
    /// `0x02` — UTF-16BE, no BOM (v2.4 only).
    Utf16Be,
    /// `0x03` — UTF-8.
    Utf8,
}

impl Encoding {
    /// Maps the raw encoding byte per spec; unknown values fall back to
    /// Latin-1, matching the source's defensive-decoding posture.
    pub(crate) fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::Latin1,
            0x01 => Self::Utf16,
            0x02 => Self::Utf16Be,
            0x03 => Self::Utf8,
            other => {
                warn!("unknown text encoding byte 0x{:02x}, defaulting to Latin-1", other);
                Self::Latin1
            }
        }
    }

    pub(crate) fn nul_size(&self) -> usize {
        match self {
            Self::Utf8 | Self::Latin1 => 1,
            _ => 2,
        }
    }
}

/// Decodes the rest of `reader` under `encoding`.
pub(crate) fn read(encoding: Encoding, reader: &mut ByteReader) -> String {
    decode(encoding, reader.take_rest())
}

/// Decodes `reader` up to (and consuming) a NUL terminator sized to the
/// encoding. The terminator itself is not included in the returned string.
pub(crate) fn read_terminated(encoding: Encoding, reader: &mut ByteReader) -> String {
    let data = match encoding.nul_size() {
        1 => reader.search(&[0]),
        2 => reader.search(&[0, 0]),
        _ => unreachable!(),
    };

    decode(encoding, data)
}

fn decode(encoding: Encoding, data: &[u8]) -> String {
    let data = match encoding.nul_size() {
        1 => data.strip_suffix(&[0]).unwrap_or(data),
        2 => data.strip_suffix(&[0, 0]).unwrap_or(data),
        _ => unreachable!(),
    };

    match encoding {
        Encoding::Latin1 => decode_latin1(data),
        Encoding::Utf16 => decode_utf16(data),
        Encoding::Utf16Be => decode_utf16be(data),
        Encoding::Utf8 => String::from_utf8_lossy(data).to_string(),
    }
}

fn decode_latin1(data: &[u8]) -> String {
    data.iter().map(|&byte| char::from(byte)).collect()
}

fn decode_utf16(data: &[u8]) -> String {
    if data.len() < 2 {
        return String::new();
    }

    match (data[0], data[1]) {
        (0xFF, 0xFE) => decode_utf16le(&data[2..]),
        (0xFE, 0xFF) => decode_utf16be(&data[2..]),
        _ => {
            warn!("could not determine UTF-16 BOM, defaulting to UTF-16LE");
            decode_utf16le(data)
        }
    }
}

fn decode_utf16be(data: &[u8]) -> String {
    String::from_utf16_lossy(
        &data
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>(),
    )
}

fn decode_utf16le(data: &[u8]) -> String {
    String::from_utf16_lossy(
        &data
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>(),
    )
}
