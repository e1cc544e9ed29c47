//! The per-frame text encoding byte.

use crate::core::io::BufStream;
use crate::core::string::Encoding;
use crate::id3v2::Result;
use log::warn;

const FLAG_LATIN1: u8 = 0x00;
const FLAG_UTF16: u8 = 0x01;

pub(crate) fn parse(stream: &mut BufStream) -> Result<Encoding> {
    let encoding = match stream.read_u8()? {
        FLAG_LATIN1 => Encoding::Latin1,
        FLAG_UTF16 => Encoding::Utf16,
        flag => {
            // 2 and 3 are ID3v2.4 values and anything higher is garbage.
            // Either way the sanest reading is single-byte; the frame will
            // be written back as Latin-1.
            warn!("text encoding {} is not an ID3v2.3 value, reading as Latin-1", flag);
            Encoding::Latin1
        }
    };

    Ok(encoding)
}

pub(crate) fn render(encoding: Encoding) -> u8 {
    match encoding {
        Encoding::Latin1 => FLAG_LATIN1,
        Encoding::Utf16 => FLAG_UTF16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_encoding_byte() {
        assert_eq!(
            parse(&mut BufStream::new(b"\x00")).unwrap(),
            Encoding::Latin1
        );
        assert_eq!(parse(&mut BufStream::new(b"\x01")).unwrap(), Encoding::Utf16);
    }

    #[test]
    fn parse_v4_encodings_fall_back_to_latin1() {
        assert_eq!(
            parse(&mut BufStream::new(b"\x02")).unwrap(),
            Encoding::Latin1
        );
        assert_eq!(
            parse(&mut BufStream::new(b"\x03")).unwrap(),
            Encoding::Latin1
        );
    }

    #[test]
    fn render_encoding_byte() {
        assert_eq!(render(Encoding::Latin1), 0x00);
        assert_eq!(render(Encoding::Utf16), 0x01);
    }
}
