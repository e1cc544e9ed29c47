//! Text information frames.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::id3v2::frames::encoding;
use crate::id3v2::Result;
use std::fmt::{self, Display, Formatter};

/// A plain text frame (`TALB`, `TIT2`, `TYER`, ...): an encoding byte
/// followed by the value, which runs to the end of the frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextInformationFrame {
    pub encoding: Encoding,
    pub text: String,
}

impl TextInformationFrame {
    /// Builds a frame from a plain string, picking the narrowest encoding
    /// that can hold it.
    pub fn new(text: &str) -> Self {
        TextInformationFrame {
            encoding: Encoding::choose(text),
            text: text.to_string(),
        }
    }

    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let encoding = encoding::parse(stream)?;
        let text = string::read(encoding, stream);

        Ok(TextInformationFrame { encoding, text })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(string::render(self.encoding, &self.text));
        result
    }
}

impl Display for TextInformationFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A user-defined text frame (`TXXX`): an encoding byte, a terminated
/// description, and the value running to the end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserTextFrame {
    pub encoding: Encoding,
    pub desc: String,
    pub value: String,
}

impl UserTextFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let encoding = encoding::parse(stream)?;
        let desc = string::read_terminated(encoding, stream);
        let value = string::read(encoding, stream);

        Ok(UserTextFrame {
            encoding,
            desc,
            value,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(string::render_terminated(self.encoding, &self.desc));
        result.extend(string::render(self.encoding, &self.value));
        result
    }
}

impl Display for UserTextFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.desc, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIT2_DATA: &[u8] = b"\x00Hello";
    const TXXX_DATA: &[u8] = b"\x00replaygain_track_gain\0-6.2 dB";

    #[test]
    fn parse_text() {
        let frame = TextInformationFrame::parse(&mut BufStream::new(TIT2_DATA)).unwrap();

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.text, "Hello");
    }

    #[test]
    fn render_text() {
        let frame = TextInformationFrame {
            encoding: Encoding::Latin1,
            text: String::from("Hello"),
        };

        assert_eq!(frame.render(), TIT2_DATA);
    }

    #[test]
    fn text_round_trips_utf16() {
        let frame = TextInformationFrame::new("千と千尋");
        assert_eq!(frame.encoding, Encoding::Utf16);

        let reparsed =
            TextInformationFrame::parse(&mut BufStream::new(&frame.render())).unwrap();
        assert_eq!(reparsed, frame);
    }

    #[test]
    fn text_round_trips_empty() {
        let frame = TextInformationFrame::new("");
        let reparsed =
            TextInformationFrame::parse(&mut BufStream::new(&frame.render())).unwrap();

        assert_eq!(reparsed, frame);
    }

    #[test]
    fn parse_user_text() {
        let frame = UserTextFrame::parse(&mut BufStream::new(TXXX_DATA)).unwrap();

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.desc, "replaygain_track_gain");
        assert_eq!(frame.value, "-6.2 dB");
    }

    #[test]
    fn render_user_text() {
        let frame = UserTextFrame {
            encoding: Encoding::Latin1,
            desc: String::from("replaygain_track_gain"),
            value: String::from("-6.2 dB"),
        };

        assert_eq!(frame.render(), TXXX_DATA);
    }
}
