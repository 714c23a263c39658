//! Unsynchronisation reversal (C3).
//!
//! ID3's unsynchronisation scheme stuffs a `0x00` after every `0xFF` byte so
//! that tag data can never contain an accidental MPEG sync word. Reversing
//! it means dropping every `0x00` that immediately follows an `0xFF`.

/// Reverses unsynchronisation over `data`, returning a new buffer.
///
/// Ported from the fast single-pass scan credited to TagLib in the teacher's
/// `syncdata::decode`: track the previous byte and only push the current one
/// when it isn't the stuffed `0x00` following an `0xFF`.
pub(crate) fn reverse(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());

    if data.is_empty() {
        return out;
    }

    let mut last = data[0];
    out.push(last);

    for &cur in &data[1..] {
        if last == 0xFF && cur == 0x00 {
            last = cur;
            continue;
        }

        out.push(cur);
        last = cur;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_stuffed_zero() {
        assert_eq!(reverse(&[0xFF, 0x00, 0xFB]), vec![0xFF, 0xFB]);
    }

    #[test]
    fn idempotent_without_ff_00() {
        let data = [0x01, 0x02, 0xFF, 0x01, 0x03];
        assert_eq!(reverse(&data), data.to_vec());
    }

    #[test]
    fn does_not_strip_ff_followed_by_nonzero() {
        assert_eq!(reverse(&[0xFF, 0xAA]), vec![0xFF, 0xAA]);
    }

    #[test]
    fn trailing_ff_alone() {
        assert_eq!(reverse(&[0x01, 0xFF]), vec![0x01, 0xFF]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(reverse(&[]), Vec::<u8>::new());
    }
}
