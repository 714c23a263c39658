//! MPEG Frame Scanner (C7).

use crate::triples::{prefixes, TripleSink};

const MAX_MP3_SCAN_DEEP: usize = 16_768;
const MAX_FRAMES_SCAN: u32 = 512;
const VBR_THRESHOLD: u32 = 16;

const SYNC_MASK: u32 = 0xE0FF;
const MPEG_VER_MASK: u32 = 0x1800;
const LAYER_MASK: u32 = 0x600;
const BITRATE_MASK: u32 = 0xF0_0000;
const FREQ_MASK: u32 = 0xC_0000;
const CH_MASK: u32 = 0xC000_0000;
const PAD_MASK: u32 = 0x2_0000;

/// `[bitrate_index][version/layer column]`, kbps. Index 0 is "free" (not
/// supported here, treated as invalid); index 15 is "reserved". Columns are
/// MPEG-1 Layer I/II/III, then MPEG-2-and-2.5 Layer I/II/III (MPEG-2 and
/// 2.5 share a bitrate table per the MPEG-1/2 spec).
const BITRATE_TABLE: [[u32; 6]; 16] = [
    [0, 0, 0, 0, 0, 0],
    [32, 32, 32, 32, 32, 8],
    [64, 48, 40, 64, 48, 16],
    [96, 56, 48, 96, 56, 24],
    [128, 64, 56, 128, 64, 32],
    [160, 80, 64, 160, 80, 64],
    [192, 96, 80, 192, 96, 80],
    [224, 112, 96, 224, 112, 56],
    [256, 128, 112, 256, 128, 64],
    [288, 160, 128, 288, 160, 128],
    [320, 192, 160, 320, 192, 160],
    [352, 224, 192, 352, 224, 112],
    [384, 256, 224, 384, 256, 128],
    [416, 320, 256, 416, 320, 256],
    [448, 384, 320, 448, 384, 320],
    [0, 0, 0, 0, 0, 0], // reserved index; treated as invalid (rejected before lookup)
];

/// `[sample-rate index][version index: V1=0, V2=1, V2.5=2]`, Hz.
const FREQ_TABLE: [[u32; 3]; 3] = [
    [44_100, 22_050, 11_025],
    [48_000, 24_000, 12_000],
    [32_000, 16_000, 8_000],
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum MpegVersion {
    V1,
    V2,
    V25,
}

impl MpegVersion {
    fn freq_col(self) -> usize {
        match self {
            MpegVersion::V1 => 0,
            MpegVersion::V2 => 1,
            MpegVersion::V25 => 2,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Layer {
    L1,
    L2,
    L3,
}

/// Fixed-per-stream parameters decoded from the first confirmed frame; the
/// scanner assumes version, layer and channel count are constant across
/// frames, mirroring the original extractor.
struct FirstHeader {
    version: MpegVersion,
    layer: Layer,
    channels: u8,
    bitrate_col: usize,
    samples_per_frame_div_8: u32,
    pad_unit: u32,
}

fn decode_version(header: u32) -> Option<MpegVersion> {
    match header & MPEG_VER_MASK {
        0x800 => None, // reserved
        0x1000 => Some(MpegVersion::V2),
        0x1800 => Some(MpegVersion::V1),
        0 => Some(MpegVersion::V25),
        _ => unreachable!(),
    }
}

fn decode_layer(header: u32) -> Option<Layer> {
    match header & LAYER_MASK {
        0x400 => Some(Layer::L2),
        0x200 => Some(Layer::L3),
        0x600 => Some(Layer::L1),
        0 => None, // reserved
        _ => unreachable!(),
    }
}

/// Decodes the fixed-per-stream fields of the first frame header. Rejects
/// reserved version/layer combinations outright (see SPEC_FULL §4.9 item 4).
fn decode_first_header(header: u32) -> Option<FirstHeader> {
    let version = decode_version(header)?;
    let layer = decode_layer(header)?;

    let bitrate_col = match (version, layer) {
        (MpegVersion::V1, Layer::L1) => 0,
        (MpegVersion::V1, Layer::L2) => 1,
        (MpegVersion::V1, Layer::L3) => 2,
        (_, Layer::L1) => 3,
        (_, Layer::L2) => 4,
        (_, Layer::L3) => 5,
    };

    // MPEG-1 Layer I uses a distinct frame-size formula (12-sample
    // numerator, 4-byte padding unit); every other combination uses the
    // 144/72-sample formula with a 1-byte padding unit. The original
    // extractor always uses 144 (MPEG-1) or 72 (MPEG-2/2.5) regardless of
    // layer, which undercounts Layer I frame sizes — spec.md §4.7 states
    // the corrected, layer-aware formula, implemented here.
    let (samples_per_frame_div_8, pad_unit) = match (version, layer) {
        (MpegVersion::V1, Layer::L1) => (48, 4),
        (MpegVersion::V1, _) => (144, 1),
        (_, _) => (72, 1),
    };

    let channels = if header & CH_MASK == CH_MASK { 1 } else { 2 };

    Some(FirstHeader {
        version,
        layer,
        channels,
        bitrate_col,
        samples_per_frame_div_8,
        pad_unit,
    })
}

struct FrameVitals {
    bitrate_kbps: u32,
    sample_rate_hz: u32,
    frame_size: u32,
}

/// Decodes the per-frame-variable fields (bitrate, sample rate, padding)
/// using the fixed-stream parameters from the first header. Returns `None`
/// if the bitrate index is the unsupported "free" (0) or "reserved" (15)
/// value, or the sample-rate index is reserved (3).
fn decode_frame_vitals(header: u32, first: &FirstHeader) -> Option<FrameVitals> {
    let bitrate_idx = ((header & BITRATE_MASK) >> 20) as usize;
    let freq_idx = ((header & FREQ_MASK) >> 18) as usize;

    if bitrate_idx == 0 || bitrate_idx == 15 || freq_idx == 3 {
        return None;
    }

    let bitrate_kbps = BITRATE_TABLE[bitrate_idx][first.bitrate_col];
    let sample_rate_hz = FREQ_TABLE[freq_idx][first.version.freq_col()];
    let pad_bit = (header & PAD_MASK) >> 17;

    let frame_size = first.samples_per_frame_div_8 * bitrate_kbps * 1000 / sample_rate_hz.max(1)
        + first.pad_unit * pad_bit;

    Some(FrameVitals {
        bitrate_kbps,
        sample_rate_hz,
        frame_size,
    })
}

fn read_header(data: &[u8], pos: usize) -> Option<u32> {
    let word = data.get(pos..pos + 4)?;
    Some(u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
}

/// Result of a successful scan: enough to emit stream-level triples and
/// decide on a duration.
pub(crate) struct StreamDesc {
    pub(crate) version: MpegVersion,
    pub(crate) channels: u8,
    pub(crate) sample_rate_hz: u32,
    pub(crate) avg_bitrate_kbps: u32,
    pub(crate) frames: u32,
    pub(crate) length_secs: Option<u64>,
}

/// Locates the first valid MPEG frame at or after `start_offset` (within
/// `MAX_MP3_SCAN_DEEP` bytes) and walks up to `MAX_FRAMES_SCAN` frames to
/// determine CBR/VBR and compute a duration.
///
/// A sync-word match whose frame walk doesn't pan out (invalid
/// bitrate/sample-rate index, or fewer than 2 confirmed frames) is not
/// treated as final failure: the byte-level scan resumes from the next
/// byte, mirroring the original extractor's outer retry loop.
///
/// `duration_secs` is the already-known duration from a `TLEN` frame, if
/// any; when present it is returned unchanged (never overwritten).
pub(crate) fn scan(data: &[u8], start_offset: usize, total_size: u64, duration_secs: Option<u32>) -> Option<StreamDesc> {
    let scan_limit = data.len().min(start_offset + MAX_MP3_SCAN_DEEP);
    let mut candidate = start_offset;

    while candidate + 4 <= scan_limit {
        let header = match read_header(data, candidate) {
            Some(h) => h,
            None => return None,
        };

        if header & SYNC_MASK == SYNC_MASK {
            if let Some(first) = decode_first_header(header) {
                if let Some(desc) =
                    walk_frames(data, candidate, start_offset, header, &first, total_size, duration_secs)
                {
                    return Some(desc);
                }
            }
        }

        candidate += 1;
    }

    None
}

fn walk_frames(
    data: &[u8],
    candidate: usize,
    tag_boundary_offset: usize,
    mut header: u32,
    first: &FirstHeader,
    total_size: u64,
    duration_secs: Option<u32>,
) -> Option<StreamDesc> {
    let mut pos = candidate;
    let mut frames: u32 = 0;
    let mut avg_bps_sum: u32 = 0;
    let mut vbr_flag = false;
    let mut last_sample_rate = 0u32;

    loop {
        frames += 1;

        let vitals = match decode_frame_vitals(header, first) {
            Some(v) => v,
            None => return None,
        };

        last_sample_rate = vitals.sample_rate_hz;
        avg_bps_sum += vitals.bitrate_kbps;
        pos += vitals.frame_size as usize;

        if frames > MAX_FRAMES_SCAN {
            break;
        }

        if avg_bps_sum / frames != vitals.bitrate_kbps {
            vbr_flag = true;
        }

        if pos + 4 > data.len() {
            break;
        }

        if !vbr_flag && frames > VBR_THRESHOLD {
            break;
        }

        header = match read_header(data, pos) {
            Some(h) => h,
            None => break,
        };

        if header & SYNC_MASK != SYNC_MASK {
            break;
        }
    }

    if frames < 2 {
        return None;
    }

    let avg_bps = avg_bps_sum / frames;

    let length_secs = match duration_secs {
        Some(_) => None, // caller keeps the existing value; we report nothing new
        None => {
            if !vbr_flag || frames > VBR_THRESHOLD {
                // Two sequential truncating integer divisions, matching the
                // original's `length / avg_bps / 125` (not one combined
                // division), which can differ from a single division on
                // rounding edge cases. The length is measured from the fixed
                // ID3v2 tag boundary, not from wherever the sync-word scan
                // happened to land.
                let denom = avg_bps.max(1) as u64;
                Some((total_size.saturating_sub(tag_boundary_offset as u64) / denom) / 125)
            } else {
                Some(1152 * u64::from(frames) / last_sample_rate.max(1) as u64)
            }
        }
    };

    Some(StreamDesc {
        version: first.version,
        channels: first.channels,
        sample_rate_hz: last_sample_rate,
        avg_bitrate_kbps: avg_bps,
        frames,
        length_secs,
    })
}

/// Emits the stream-level triples for a successful scan.
pub(crate) fn emit(desc: &StreamDesc, subject: &str, sink: &mut dyn TripleSink) {
    sink.insert(subject, &format!("{}codec", prefixes::NFO), "MPEG");
    sink.insert_with_int(
        subject,
        &format!("{}sampleRate", prefixes::NFO),
        i64::from(desc.sample_rate_hz),
    );
    sink.insert_with_int(
        subject,
        &format!("{}averageBitrate", prefixes::NFO),
        i64::from(desc.avg_bitrate_kbps) * 1000,
    );
    sink.insert_with_int(
        subject,
        &format!("{}channels", prefixes::NFO),
        i64::from(desc.channels),
    );

    if let Some(length) = desc.length_secs {
        sink.insert_with_int(subject, &format!("{}length", prefixes::NMM), length as i64);
    }
}
