//! Genre code resolution (C4).

/// The canonical ID3v1/ID3v2 genre table (indices 0–147), reproduced
/// verbatim from the Winamp-derived genre list the original extractor
/// embeds.
pub(crate) const GENRE_NAMES: [&str; 148] = [
    "Blues",
    "Classic Rock",
    "Country",
    "Dance",
    "Disco",
    "Funk",
    "Grunge",
    "Hip-Hop",
    "Jazz",
    "Metal",
    "New Age",
    "Oldies",
    "Other",
    "Pop",
    "R&B",
    "Rap",
    "Reggae",
    "Rock",
    "Techno",
    "Industrial",
    "Alternative",
    "Ska",
    "Death Metal",
    "Pranks",
    "Soundtrack",
    "Euro-Techno",
    "Ambient",
    "Trip-Hop",
    "Vocal",
    "Jazz+Funk",
    "Fusion",
    "Trance",
    "Classical",
    "Instrumental",
    "Acid",
    "House",
    "Game",
    "Sound Clip",
    "Gospel",
    "Noise",
    "Alt. Rock",
    "Bass",
    "Soul",
    "Punk",
    "Space",
    "Meditative",
    "Instrumental Pop",
    "Instrumental Rock",
    "Ethnic",
    "Gothic",
    "Darkwave",
    "Techno-Industrial",
    "Electronic",
    "Pop-Folk",
    "Eurodance",
    "Dream",
    "Southern Rock",
    "Comedy",
    "Cult",
    "Gangsta Rap",
    "Top 40",
    "Christian Rap",
    "Pop/Funk",
    "Jungle",
    "Native American",
    "Cabaret",
    "New Wave",
    "Psychedelic",
    "Rave",
    "Showtunes",
    "Trailer",
    "Lo-Fi",
    "Tribal",
    "Acid Punk",
    "Acid Jazz",
    "Polka",
    "Retro",
    "Musical",
    "Rock & Roll",
    "Hard Rock",
    "Folk",
    "Folk/Rock",
    "National Folk",
    "Swing",
    "Fast-Fusion",
    "Bebob",
    "Latin",
    "Revival",
    "Celtic",
    "Bluegrass",
    "Avantgarde",
    "Gothic Rock",
    "Progressive Rock",
    "Psychedelic Rock",
    "Symphonic Rock",
    "Slow Rock",
    "Big Band",
    "Chorus",
    "Easy Listening",
    "Acoustic",
    "Humour",
    "Speech",
    "Chanson",
    "Opera",
    "Chamber Music",
    "Sonata",
    "Symphony",
    "Booty Bass",
    "Primus",
    "Porn Groove",
    "Satire",
    "Slow Jam",
    "Club",
    "Tango",
    "Samba",
    "Folklore",
    "Ballad",
    "Power Ballad",
    "Rhythmic Soul",
    "Freestyle",
    "Duet",
    "Punk Rock",
    "Drum Solo",
    "A Cappella",
    "Euro-House",
    "Dance Hall",
    "Goa",
    "Drum & Bass",
    "Club-House",
    "Hardcore",
    "Terror",
    "Indie",
    "BritPop",
    "Negerpunk",
    "Polsk Punk",
    "Beat",
    "Christian Gangsta Rap",
    "Heavy Metal",
    "Black Metal",
    "Crossover",
    "Contemporary Christian",
    "Christian Rock",
    "Merengue",
    "Salsa",
    "Thrash Metal",
    "Anime",
    "JPop",
    "Synthpop",
];

/// Resolves a raw `TCON`/ID3v1-genre-byte value to a canonical name.
///
/// Accepts a numeric string (`"17"`), a parenthesised prefix
/// (`"(17)Rock"`), or a plain name. Returns `None` if the resolved value is
/// the literal case-insensitive word `"unknown"`, signaling the caller to
/// drop the genre entirely.
pub(crate) fn resolve(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("unknown") {
        return None;
    }

    if let Some(n) = parse_leading_paren_number(trimmed) {
        if let Some(&name) = GENRE_NAMES.get(n) {
            return Some(name.to_string());
        }
    } else if let Some(n) = parse_trailing_number(trimmed) {
        if let Some(&name) = GENRE_NAMES.get(n) {
            return Some(name.to_string());
        }
    }

    Some(trimmed.to_string())
}

/// Resolves a raw ID3v1 genre byte (0–255) directly.
pub(crate) fn resolve_byte(code: u8) -> Option<String> {
    GENRE_NAMES.get(code as usize).map(|&s| s.to_string())
}

fn parse_leading_paren_number(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('(')?;
    let close = rest.find(')')?;
    let digits = &rest[..close];

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

fn parse_trailing_number(s: &str) -> Option<usize> {
    let digit_start = s.len() - s.bytes().rev().take_while(|b| b.is_ascii_digit()).count();

    if digit_start == s.len() {
        return None;
    }

    s[digit_start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_numeric() {
        assert_eq!(resolve("17"), Some("Rock".to_string()));
    }

    #[test]
    fn resolves_paren_prefix() {
        assert_eq!(resolve("(9)"), Some("Metal".to_string()));
        assert_eq!(resolve("(17)Rock"), Some("Rock".to_string()));
    }

    #[test]
    fn resolves_trailing_digits() {
        assert_eq!(resolve("Genre17"), Some("Rock".to_string()));
    }

    #[test]
    fn passes_through_plain_name() {
        assert_eq!(resolve("Rock"), Some("Rock".to_string()));
    }

    #[test]
    fn drops_unknown_case_insensitive() {
        assert_eq!(resolve("Unknown"), None);
        assert_eq!(resolve("UNKNOWN"), None);
    }

    #[test]
    fn out_of_range_number_passes_through_unchanged() {
        assert_eq!(resolve("(9999)"), Some("(9999)".to_string()));
    }

    #[test]
    fn resolve_byte_valid_and_invalid() {
        assert_eq!(resolve_byte(9), Some("Metal".to_string()));
        assert_eq!(resolve_byte(255), None);
    }

    #[test]
    fn round_trip_equivalence() {
        assert_eq!(resolve("(17)Rock"), resolve("17"));
        assert_eq!(resolve("17"), resolve("Rock"));
    }
}
