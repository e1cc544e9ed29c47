//! Terms-of-use frames.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::id3v2::frames::{encoding, Language};
use crate::id3v2::Result;
use std::fmt::{self, Display, Formatter};

/// A terms-of-use frame (`USER`): encoding byte, three-byte language code,
/// and the text running to the end. Unusually, it has no descriptor field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TermsOfUseFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub text: String,
}

impl TermsOfUseFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::new(&stream.read_array()?);
        let text = string::read(encoding, stream);

        Ok(TermsOfUseFrame {
            encoding,
            lang,
            text,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(self.lang.code());
        result.extend(string::render(self.encoding, &self.text));
        result
    }
}

impl Display for TermsOfUseFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_DATA: &[u8] = b"\x00engAll rights reserved.";

    #[test]
    fn parse_user() {
        let frame = TermsOfUseFrame::parse(&mut BufStream::new(USER_DATA)).unwrap();

        assert_eq!(frame.encoding, Encoding::Latin1);
        assert_eq!(frame.lang.code(), b"eng");
        assert_eq!(frame.text, "All rights reserved.");
    }

    #[test]
    fn render_user() {
        let frame = TermsOfUseFrame {
            encoding: Encoding::Latin1,
            lang: Language::new(b"eng"),
            text: String::from("All rights reserved."),
        };

        assert_eq!(frame.render(), USER_DATA);
    }
}
