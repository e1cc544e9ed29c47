//! Comment frames.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::id3v2::frames::{encoding, Language};
use crate::id3v2::Result;
use std::fmt::{self, Display, Formatter};

/// A comment frame (`COMM`): encoding byte, three-byte language code, a
/// terminated short description, and the comment text running to the end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentsFrame {
    pub encoding: Encoding,
    pub lang: Language,
    pub desc: String,
    pub text: String,
}

impl CommentsFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let encoding = encoding::parse(stream)?;
        let lang = Language::new(&stream.read_array()?);
        let desc = string::read_terminated(encoding, stream);
        let text = string::read(encoding, stream);

        Ok(CommentsFrame {
            encoding,
            lang,
            desc,
            text,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(self.lang.code());
        result.extend(string::render_terminated(self.encoding, &self.desc));
        result.extend(string::render(self.encoding, &self.text));
        result
    }
}

impl Display for CommentsFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
