//! Triple Emitter (C8) and the external sink/collaborator traits (§6).

/// Nepomuk ontology prefixes used by the predicate/type IRIs below.
pub mod prefixes {
    pub const NIE: &str = "http://www.semanticdesktop.org/ontologies/2007/01/19/nie#";
    pub const NFO: &str = "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#";
    pub const NMM: &str = "http://www.semanticdesktop.org/ontologies/2009/02/19/nmm#";
    pub const NCO: &str = "http://www.semanticdesktop.org/ontologies/2007/03/22/nco#";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// The RDF-style triple sink consumed by the extractor. A consumer must not
/// rely on emission ordering; the sink is a multiset.
pub trait TripleSink {
    fn insert(&mut self, subject: &str, predicate: &str, object: &str);
    fn insert_with_int(&mut self, subject: &str, predicate: &str, value: i64);
    fn find(&self, subject: &str, predicate: &str) -> Option<String>;
}

/// The album-art post-processing collaborator (§6), invoked once per file
/// even when no art was found.
pub trait AlbumArtSink {
    #[allow(clippy::too_many_arguments)]
    fn process_art(
        &mut self,
        bytes: &[u8],
        mime: &str,
        artist_name: Option<&str>,
        album_title: Option<&str>,
        track_hint: Option<&str>,
        source_filename: &str,
    );
}

/// Percent-escapes `value` for embedding in a minted `urn:<kind>:<value>` URI.
/// Only characters outside `[A-Za-z0-9_.~-]` are escaped, matching the
/// conservative subset URI producers typically leave unescaped.
pub(crate) fn percent_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for byte in value.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'~' | b'-' => {
                out.push(*byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }

    out
}

/// Mints `urn:<kind>:<percent-escaped value>`.
pub(crate) fn mint_urn(kind: &str, value: &str) -> String {
    format!("urn:{}:{}", kind, percent_escape(value))
}

/// Mints an entity URI for `value`, types it `rdf_type`, assigns its name
/// via `name_predicate`, and links it from `subject` via `predicate`. Calling
/// this twice for the same `(kind, value)` is idempotent: the sink is
/// expected to de-duplicate identical triples, and every triple produced
/// here is a pure function of its inputs.
pub(crate) fn mint_and_link(
    sink: &mut dyn TripleSink,
    subject: &str,
    predicate: &str,
    kind: &str,
    rdf_type: &str,
    name_predicate: &str,
    value: &str,
) {
    let entity = mint_urn(kind, value);
    sink.insert(&entity, prefixes::RDF_TYPE, rdf_type);
    sink.insert(&entity, name_predicate, value);
    sink.insert(subject, predicate, &entity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(percent_escape("Iron Maiden"), "Iron%20Maiden");
        assert_eq!(percent_escape("AC/DC"), "AC%2FDC");
    }

    #[test]
    fn leaves_safe_characters_alone() {
        assert_eq!(percent_escape("abc_123.~-"), "abc_123.~-");
    }

    #[test]
    fn mint_urn_format() {
        assert_eq!(mint_urn("artist", "Rush"), "urn:artist:Rush");
    }
}
