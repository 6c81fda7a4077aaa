//! Diagram text → shareable rendering-server URL.
//!
//! normalize → zlib deflate (level 9) → 6-bit alphabet → `<server>/<variant>/~1<payload>`.

use crate::utils::error::{GeneratorError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::OnceLock;

pub const DEFAULT_SERVER: &str = "http://www.plantuml.com/plantuml";

const COMPRESSION_LEVEL: u32 = 9;

/// Which rendering the server returns for the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramVariant {
    #[default]
    Svg,
    /// Editable markup rendition of the same diagram.
    Markup,
}

impl DiagramVariant {
    /// The boolean "change" flag selects the markup endpoint.
    pub fn from_change_flag(change: bool) -> Self {
        if change {
            DiagramVariant::Markup
        } else {
            DiagramVariant::Svg
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            DiagramVariant::Svg => "svg",
            DiagramVariant::Markup => "umla",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            DiagramVariant::Svg => "svg",
            DiagramVariant::Markup => "txt",
        }
    }
}

fn percent_escape() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"%u([0-9A-Fa-f]{4})|%([0-9A-Fa-f]{2})"))
        .as_ref()
        .map_err(|e| GeneratorError::ConfigError {
            message: format!("Invalid percent escape pattern: {}", e),
        })
}

/// Undoes `%XX` and `%uXXXX` escapes. Anything else, including a stray `%`,
/// passes through untouched.
pub fn unescape_percent(text: &str) -> Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(text.len());
    let mut last = 0;

    for caps in percent_escape()?.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        units.extend(text[last..whole.start()].encode_utf16());

        let hex = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|group| group.as_str())
            .unwrap_or_default();
        match u16::from_str_radix(hex, 16) {
            Ok(unit) => units.push(unit),
            Err(_) => units.extend(whole.as_str().encode_utf16()),
        }
        last = whole.end();
    }
    units.extend(text[last..].encode_utf16());

    Ok(String::from_utf16_lossy(&units))
}

/// Full-scan passes in fixed order, so `&amp;lt;` becomes `&lt;`, not `<`.
pub fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

pub fn normalize(text: &str) -> Result<String> {
    Ok(unescape_entities(&unescape_percent(text)?))
}

pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let compression_error = |e: std::io::Error| GeneratorError::CompressionError {
        message: e.to_string(),
    };

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(COMPRESSION_LEVEL));
    encoder.write_all(data).map_err(compression_error)?;
    encoder.finish().map_err(compression_error)
}

/// Maps a 6-bit value onto `0-9A-Za-z-_`.
pub fn encode6bit(value: u8) -> char {
    let b = value & 0x3f;
    match b {
        0..=9 => (b'0' + b) as char,
        10..=35 => (b'A' + (b - 10)) as char,
        36..=61 => (b'a' + (b - 36)) as char,
        62 => '-',
        _ => '_',
    }
}

fn append3bytes(out: &mut String, b1: u8, b2: u8, b3: u8) {
    out.push(encode6bit(b1 >> 2));
    out.push(encode6bit(((b1 & 0x3) << 4) | (b2 >> 4)));
    out.push(encode6bit(((b2 & 0xf) << 2) | (b3 >> 6)));
    out.push(encode6bit(b3 & 0x3f));
}

/// Base64-style encoding over the custom alphabet. A short final group is
/// zero-filled and still yields four characters; no padding marker.
pub fn encode64(data: &[u8]) -> String {
    let mut encoded = String::with_capacity(data.len().div_ceil(3) * 4);

    for chunk in data.chunks(3) {
        match *chunk {
            [b1, b2, b3] => append3bytes(&mut encoded, b1, b2, b3),
            [b1, b2] => append3bytes(&mut encoded, b1, b2, 0),
            [b1] => append3bytes(&mut encoded, b1, 0, 0),
            _ => {}
        }
    }

    encoded
}

/// Composes rendering-server URLs for diagram text.
#[derive(Debug, Clone)]
pub struct DiagramUrlEncoder {
    server: String,
}

impl Default for DiagramUrlEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER)
    }
}

impl DiagramUrlEncoder {
    pub fn new(server: impl Into<String>) -> Self {
        let server: String = server.into();
        Self {
            server: server.trim_end_matches('/').to_string(),
        }
    }

    /// Normalized, compressed and encoded payload for `text`.
    pub fn payload(&self, text: &str) -> Result<String> {
        let normalized = normalize(text)?;
        let compressed = deflate(normalized.as_bytes())?;
        tracing::debug!(
            "Compressed {} bytes of diagram text into {} bytes",
            normalized.len(),
            compressed.len()
        );
        Ok(encode64(&compressed))
    }

    pub fn url(&self, text: &str, variant: DiagramVariant) -> Result<String> {
        let payload = self.payload(text)?;
        Ok(format!("{}/{}/~1{}", self.server, variant.path(), payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn decode6bit(c: char) -> u8 {
        match c {
            '0'..='9' => c as u8 - b'0',
            'A'..='Z' => c as u8 - b'A' + 10,
            'a'..='z' => c as u8 - b'a' + 36,
            '-' => 62,
            '_' => 63,
            other => panic!("outside alphabet: {}", other),
        }
    }

    fn decode64(encoded: &str, len: usize) -> Vec<u8> {
        let values: Vec<u8> = encoded.chars().map(decode6bit).collect();
        let mut bytes = Vec::new();
        for group in values.chunks(4) {
            bytes.push((group[0] << 2) | (group[1] >> 4));
            bytes.push((group[1] << 4) | (group[2] >> 2));
            bytes.push((group[2] << 6) | group[3]);
        }
        bytes.truncate(len);
        bytes
    }

    #[test]
    fn test_encode6bit_alphabet() {
        let alphabet: String = (0..64).map(encode6bit).collect();
        assert_eq!(
            alphabet,
            "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_"
        );
    }

    #[test]
    fn test_encode64_known_triplets() {
        assert_eq!(encode64(&[0, 0, 0]), "0000");
        assert_eq!(encode64(&[0xff, 0xff, 0xff]), "____");
        // "Man" is "TWFu" in standard base64: indices 19, 22, 5, 46.
        assert_eq!(encode64(b"Man"), "JM5k");
    }

    #[test]
    fn test_short_tail_is_zero_filled() {
        assert_eq!(encode64(&[0xff]), "_m00");
        assert_eq!(encode64(&[0xff, 0xff]), "__y0");
        assert_eq!(encode64(&[]), "");
    }

    #[test]
    fn test_output_length_and_closure() {
        for len in 0..40usize {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let encoded = encode64(&data);
            assert_eq!(encoded.len(), len.div_ceil(3) * 4);
            assert!(encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }

    #[test]
    fn test_entity_passes_do_not_double_unescape() {
        assert_eq!(unescape_entities("&lt;&gt;&quot;&amp;"), "<>\"&");
        assert_eq!(unescape_entities("a &amp;lt; b"), "a &lt; b");
        assert_eq!(normalize("A -r-> B").unwrap(), "A -r-> B");
    }

    #[test]
    fn test_percent_unescape() {
        assert_eq!(unescape_percent("a%20b").unwrap(), "a b");
        assert_eq!(unescape_percent("%u00e9t%E9").unwrap(), "été");
        assert_eq!(unescape_percent("%uD83D%uDE00").unwrap(), "😀");
        assert_eq!(unescape_percent("100% sure %zz").unwrap(), "100% sure %zz");
        assert_eq!(normalize("%26lt;").unwrap(), "<");
    }

    #[test]
    fn test_single_byte_payload_is_deterministic() {
        let encoder = DiagramUrlEncoder::default();
        let first = encoder.payload("A").unwrap();
        let second = encoder.payload("A").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len() % 4, 0);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_payload_round_trip() {
        let text = "@startuml\nOrder \"1\" -r-o \"0..*\" Customer : places\n@enduml\n";
        let compressed = deflate(text.as_bytes()).unwrap();
        let encoded = encode64(&compressed);

        let decoded = decode64(&encoded, compressed.len());
        assert_eq!(decoded, compressed);

        let mut inflated = String::new();
        ZlibDecoder::new(decoded.as_slice())
            .read_to_string(&mut inflated)
            .unwrap();
        assert_eq!(inflated, text);
    }

    #[test]
    fn test_escaped_payload_inflates_to_normalized_text() {
        let text = "@startuml\nOrder&lt;T&gt; -r-> Customer%20Account : &quot;places&quot; &amp;lt;\n@enduml\n";
        let expected = normalize(text).unwrap();
        assert_eq!(
            expected,
            "@startuml\nOrder<T> -r-> Customer Account : \"places\" &lt;\n@enduml\n"
        );

        let payload = DiagramUrlEncoder::default().payload(text).unwrap();
        let compressed_len = deflate(expected.as_bytes()).unwrap().len();
        let decoded = decode64(&payload, compressed_len);

        let mut inflated = String::new();
        ZlibDecoder::new(decoded.as_slice())
            .read_to_string(&mut inflated)
            .unwrap();
        assert_eq!(inflated, expected);
    }

    #[test]
    fn test_url_variants() {
        let encoder = DiagramUrlEncoder::new("http://localhost:8080/plantuml/");
        let svg = encoder.url("A", DiagramVariant::Svg).unwrap();
        let markup = encoder
            .url("A", DiagramVariant::from_change_flag(true))
            .unwrap();

        assert!(svg.starts_with("http://localhost:8080/plantuml/svg/~1"));
        assert!(markup.starts_with("http://localhost:8080/plantuml/umla/~1"));
        assert_eq!(
            svg.trim_start_matches("http://localhost:8080/plantuml/svg/~1"),
            markup.trim_start_matches("http://localhost:8080/plantuml/umla/~1")
        );
    }
}
