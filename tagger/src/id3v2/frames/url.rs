//! User-defined URL frames.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::id3v2::frames::encoding;
use crate::id3v2::Result;
use std::fmt::{self, Display, Formatter};

/// A user-defined URL frame (`WXXX`): encoding byte, a terminated
/// description in that encoding, and the URL running to the end. The URL
/// itself is always single-byte.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserUrlFrame {
    pub encoding: Encoding,
    pub desc: String,
    pub url: String,
}

impl UserUrlFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let encoding = encoding::parse(stream)?;
        let desc = string::read_terminated(encoding, stream);
        let url = string::read(Encoding::Latin1, stream);

        Ok(UserUrlFrame {
            encoding,
            desc,
            url,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(string::render_terminated(self.encoding, &self.desc));
        result.extend(string::render(Encoding::Latin1, &self.url));
        result
    }
}

impl Display for UserUrlFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.desc.is_empty() {
            write!(f, "{}", self.url)
        } else {
            write!(f, "{}: {}", self.desc, self.url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WXXX_DATA: &[u8] = b"\x00Store page\0https://example.com/album";

    #[test]
    fn parse_wxxx() {
        let frame = UserUrlFrame::parse(&mut BufStream::new(WXXX_DATA)).unwrap();

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.desc, "Store page");
        assert_eq!(frame.url, "https://example.com/album");
    }

    #[test]
    fn render_wxxx() {
        let frame = UserUrlFrame {
            encoding: Encoding::Latin1,
            desc: String::from("Store page"),
            url: String::from("https://example.com/album"),
        };

        assert_eq!(frame.render(), WXXX_DATA);
    }

    #[test]
    fn wxxx_utf16_desc_keeps_url_single_byte() {
        let frame = UserUrlFrame {
            encoding: Encoding::Utf16,
            desc: String::from("リンク"),
            url: String::from("https://example.com"),
        };

        let rendered = frame.render();
        assert!(rendered.ends_with(b"https://example.com"));

        let reparsed = UserUrlFrame::parse(&mut BufStream::new(&rendered)).unwrap();
        assert_eq!(reparsed, frame);
    }
}
