//! Tag string handling.

use crate::core::io::BufStream;
use log::warn;

/// The two text encodings an ID3v2.3 frame can carry.
///
/// The encoding is stored as a single byte at the start of every
/// text-bearing frame body: 0 for [`Latin1`](Encoding::Latin1), 1 for
/// [`Utf16`](Encoding::Utf16). The ID3v2.4-only values 2 and 3 are
/// tolerated on parse (as Latin-1) but never written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Encoding {
    /// ISO-8859-1. Bytes above 0x7F are kept as their code points rather
    /// than re-encoded, so unrecognized single-byte data survives a
    /// round-trip.
    Latin1,
    /// UTF-16 with a leading byte-order mark. Written as big-endian with a
    /// `FE FF` mark; either byte order is accepted when reading.
    Utf16,
}

impl Encoding {
    /// Picks the encoding for a plain string: Latin-1 when every char is
    /// ASCII, UTF-16 otherwise.
    pub fn choose(string: &str) -> Self {
        if string.is_ascii() {
            Encoding::Latin1
        } else {
            Encoding::Utf16
        }
    }

    /// The byte width of this encoding's NUL terminator.
    pub(crate) fn nul_size(&self) -> usize {
        match self {
            Encoding::Latin1 => 1,
            Encoding::Utf16 => 2,
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Latin1
    }
}

/// Consumes the rest of the stream and decodes it as a string. Used for the
/// final field of a frame body, which runs to the end of the frame with no
/// terminator.
pub(crate) fn read(encoding: Encoding, stream: &mut BufStream) -> String {
    decode(encoding, stream.take_rest())
}

/// Consumes the stream up to a NUL terminator and decodes the data before
/// it. The terminator is one byte for Latin-1 and an aligned pair of zero
/// bytes for UTF-16.
pub(crate) fn read_terminated(encoding: Encoding, stream: &mut BufStream) -> String {
    let data = match encoding.nul_size() {
        1 => stream.search(&[0]),
        _ => stream.search(&[0, 0]),
    };

    decode(encoding, data)
}

/// Renders a string without a terminator.
pub(crate) fn render(encoding: Encoding, string: &str) -> Vec<u8> {
    match encoding {
        Encoding::Latin1 => encode_latin1(string),
        Encoding::Utf16 => encode_utf16(string),
    }
}

/// Renders a string plus its NUL terminator.
pub(crate) fn render_terminated(encoding: Encoding, string: &str) -> Vec<u8> {
    let mut result = render(encoding, string);
    result.resize(result.len() + encoding.nul_size(), 0);
    result
}

fn decode(encoding: Encoding, data: &[u8]) -> String {
    // Plenty of writers NUL-terminate fields that don't need it. Those
    // stray terminators would otherwise end up inside the decoded string.
    let data = match encoding.nul_size() {
        1 => data.strip_suffix(&[0]).unwrap_or(data),
        _ => data.strip_suffix(&[0, 0]).unwrap_or(data),
    };

    match encoding {
        Encoding::Latin1 => decode_latin1(data),
        Encoding::Utf16 => decode_utf16(data),
    }
}

fn decode_latin1(data: &[u8]) -> String {
    // Latin-1 code points line up with Unicode scalar values, so the bytes
    // can be reinterpreted as chars directly.
    data.iter().map(|&byte| char::from(byte)).collect()
}

fn decode_utf16(data: &[u8]) -> String {
    if data.len() < 2 {
        return String::new();
    }

    match (data[0], data[1]) {
        (0xFE, 0xFF) => decode_utf16be(&data[2..]),
        (0xFF, 0xFE) => decode_utf16le(&data[2..]),
        _ => {
            warn!("UTF-16 data has no byte-order mark, assuming big-endian");
            decode_utf16be(data)
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

fn encode_latin1(string: &str) -> Vec<u8> {
    // Anything that doesn't fit in one byte is flattened to a ?
    string
        .chars()
        .map(|ch| if u32::from(ch) > 0xFF { b'?' } else { ch as u8 })
        .collect()
}

fn encode_utf16(string: &str) -> Vec<u8> {
    let mut result = vec![0xFE, 0xFF];

    result.extend(string.encode_utf16().flat_map(|unit| unit.to_be_bytes()));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const STR_LATIN1: &str = "caf\u{E9} nr\u{BA} 9";
    const DATA_LATIN1: &[u8] = b"caf\xE9 nr\xBA 9";

    const STR_UNICODE: &str = "日本語 mix";
    const DATA_UTF16BE: &[u8] = b"\xFE\xFF\x65\xE5\x67\x2C\x8A\x9E\x00\x20\x00\x6d\x00\x69\x00\x78";
    const DATA_UTF16LE: &[u8] = b"\xFF\xFE\xE5\x65\x2C\x67\x9E\x8A\x20\x00\x6d\x00\x69\x00\x78\x00";

    #[test]
    fn parse_latin1() {
        assert_eq!(decode(Encoding::Latin1, DATA_LATIN1), STR_LATIN1);
    }

    #[test]
    fn parse_latin1_strips_trailing_nul() {
        assert_eq!(decode(Encoding::Latin1, b"abc\0"), "abc");
    }

    #[test]
    fn parse_utf16_either_byte_order() {
        assert_eq!(decode(Encoding::Utf16, DATA_UTF16BE), STR_UNICODE);
        assert_eq!(decode(Encoding::Utf16, DATA_UTF16LE), STR_UNICODE);
    }

    #[test]
    fn parse_utf16_without_bom_assumes_be() {
        assert_eq!(decode(Encoding::Utf16, &DATA_UTF16BE[2..]), STR_UNICODE);
    }

    #[test]
    fn render_latin1() {
        assert_eq!(render(Encoding::Latin1, STR_LATIN1), DATA_LATIN1);
    }

    #[test]
    fn render_latin1_lossy() {
        assert_eq!(render(Encoding::Latin1, "日本語"), b"???");
    }

    #[test]
    fn render_utf16_is_big_endian_with_bom() {
        assert_eq!(render(Encoding::Utf16, STR_UNICODE), DATA_UTF16BE);
    }

    #[test]
    fn render_utf16_no_stray_nul_pairs() {
        // A terminator pair must be the only aligned 0x0000 unit the
        // decoder can ever see.
        let data = render_terminated(Encoding::Utf16, "日本語テスト");

        let units: Vec<u16> = data[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        assert_eq!(units.iter().filter(|&&unit| unit == 0).count(), 1);
        assert_eq!(units.last(), Some(&0));
    }

    #[test]
    fn parse_terminated() {
        let mut stream = BufStream::new(b"first\0second");

        assert_eq!(read_terminated(Encoding::Latin1, &mut stream), "first");
        assert_eq!(read(Encoding::Latin1, &mut stream), "second");
    }

    #[test]
    fn parse_terminated_utf16() {
        let data = b"\xFE\xFF\x65\xE5\x67\x2C\x8A\x9E\0\0\xFE\xFF\x00\x6f\x00\x6b";
        let mut stream = BufStream::new(data);

        assert_eq!(read_terminated(Encoding::Utf16, &mut stream), "日本語");
        assert_eq!(read(Encoding::Utf16, &mut stream), "ok");
    }

    #[test]
    fn render_terminated_appends_nul() {
        assert_eq!(render_terminated(Encoding::Latin1, "abc"), b"abc\0");

        let utf16 = render_terminated(Encoding::Utf16, "a\u{E9}");
        assert_eq!(&utf16[utf16.len() - 2..], &[0, 0]);
    }

    #[test]
    fn choose_encoding() {
        assert_eq!(Encoding::choose("abc"), Encoding::Latin1);
        assert_eq!(Encoding::choose(""), Encoding::Latin1);
        assert_eq!(Encoding::choose("日本語"), Encoding::Utf16);
        assert_eq!(Encoding::choose("\u{80}"), Encoding::Utf16);
    }
}
