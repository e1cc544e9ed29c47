//! Unsynchronized lyrics frames.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::id3v2::frames::{encoding, Language};
use crate::id3v2::Result;
use std::fmt::{self, Display, Formatter};

/// A lyrics frame (`USLT`): encoding byte, three-byte language code, a
/// terminated content descriptor, and the lyrics running to the end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnsyncLyricsFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub desc: String,
    pub lyrics: String,
}

impl UnsyncLyricsFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::new(&stream.read_array()?);
        let desc = string::read_terminated(encoding, stream);
        let lyrics = string::read(encoding, stream);

        Ok(UnsyncLyricsFrame {
            encoding,
            lang,
            desc,
            lyrics,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(self.lang.code());
        result.extend(string::render_terminated(self.encoding, &self.desc));
        result.extend(string::render(self.encoding, &self.lyrics));
        result
    }
}

impl Display for UnsyncLyricsFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.desc.is_empty() {
            writeln!(f, "{}:", self.desc)?;
        }

        write!(f, "{}", self.lyrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USLT_DATA: &[u8] = b"\x00eng\
                               Verse 1\0\
                               Here comes the sun\nLittle darling";

    #[test]
    fn parse_uslt() {
        let frame = UnsyncLyricsFrame::parse(&mut BufStream::new(USLT_DATA)).unwrap();

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.lang.code(), b"eng");
        assert_eq!(frame.desc, "Verse 1");
        assert_eq!(frame.lyrics, "Here comes the sun\nLittle darling");
    }

    #[test]
    fn render_uslt() {
        let frame = UnsyncLyricsFrame {
            encoding: Encoding::Latin1,
            lang: Language::new(b"eng"),
            desc: String::from("Verse 1"),
            lyrics: String::from("Here comes the sun\nLittle darling"),
        };

        assert_eq!(frame.render(), USLT_DATA);
    }
}
