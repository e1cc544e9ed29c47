//! Frame types and the ID registry.

pub mod header;

mod bin;
mod comments;
pub(crate) mod encoding;
mod file;
mod lyrics;
mod owner;
mod text;
mod url;

pub use self::bin::{MusicCdIdFrame, PrivateFrame};
pub use self::comments::CommentsFrame;
pub use self::file::{AttachedPictureFrame, GeneralObjectFrame, PictureType};
pub use self::header::{FrameFlags, FrameHeader};
pub use self::lyrics::UnsyncLyricsFrame;
pub use self::owner::TermsOfUseFrame;
pub use self::text::{TextInformationFrame, UserTextFrame};
pub use self::url::UserUrlFrame;

use crate::core::io::BufStream;
use crate::id3v2::{Error, Result};
use std::convert::TryInto;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A four-byte frame identifier, e.g. `TIT2`.
///
/// Well-formed IDs are uppercase ASCII letters and digits. Decoding keeps
/// whatever bytes the file contained so that an unrecognized ID can be
/// reported faithfully; the constructors callers use are validated.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FrameId([u8; 4]);

impl FrameId {
    /// Creates an ID from a known-good literal.
    ///
    /// # Panics
    /// Panics when `id` is not four uppercase ASCII letters or digits.
    /// Handing this function a malformed ID is a programmer error; parse
    /// untrusted input with [`from_str`](FrameId::from_str) instead.
    pub fn new(id: &[u8; 4]) -> Self {
        if !Self::validate(id) {
            panic!("frame IDs must be four uppercase ASCII letters or digits");
        }

        FrameId(*id)
    }

    pub(crate) fn from_raw(raw: [u8; 4]) -> Self {
        FrameId(raw)
    }

    pub fn inner(&self) -> &[u8; 4] {
        &self.0
    }

    pub(crate) fn contains_nul(&self) -> bool {
        self.0.contains(&0)
    }

    fn validate(id: &[u8; 4]) -> bool {
        id.iter()
            .all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit())
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

#[derive(Debug)]
pub struct FrameIdError(());

impl Display for FrameIdError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "invalid frame ID")
    }
}

impl std::error::Error for FrameIdError {}

impl FromStr for FrameId {
    type Err = FrameIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes: [u8; 4] = s.as_bytes().try_into().map_err(|_| FrameIdError(()))?;

        if !Self::validate(&bytes) {
            return Err(FrameIdError(()));
        }

        Ok(FrameId(bytes))
    }
}

/// A three-byte ISO-639-2 language code, kept as the file wrote it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Language([u8; 3]);

impl Language {
    pub fn new(code: &[u8; 3]) -> Self {
        Language(*code)
    }

    pub fn code(&self) -> &[u8; 3] {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        // ISO-639-2 reserves "xxx" for no linguistic content.
        Language(*b"xxx")
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// The frame kinds this codec understands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameKind {
    TextInformation,
    NonStandardTextInformation,
    Comment,
    AttachedPicture,
    UserDefinedUrl,
    Private,
    UnsynchronizedLyrics,
    UserDefinedTextInformation,
    MusicCdIdentifier,
    GeneralEncapsulationObject,
    TermsOfUse,
}

impl FrameKind {
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FrameKind::TextInformation | FrameKind::NonStandardTextInformation
        )
    }
}

/// Looks up the kind a frame ID decodes as. IDs outside this table cannot
/// be decoded and surface [`Error::UnknownFrameKind`](Error).
pub fn kind_for_id(id: FrameId) -> Option<FrameKind> {
    let kind = match id.inner() {
        b"TALB" | b"TBPM" | b"TCOM" | b"TCON" | b"TCOP" | b"TDAT" | b"TDLY" | b"TENC"
        | b"TEXT" | b"TFLT" | b"TIME" | b"TIT1" | b"TIT2" | b"TIT3" | b"TKEY" | b"TLAN"
        | b"TLEN" | b"TMED" | b"TOAL" | b"TOFN" | b"TOLY" | b"TOPE" | b"TORY" | b"TOWN"
        | b"TPE1" | b"TPE2" | b"TPE3" | b"TPE4" | b"TPOS" | b"TPUB" | b"TRCK" | b"TRDA"
        | b"TRSN" | b"TRSO" | b"TSIZ" | b"TSRC" | b"TSSE" | b"TYER" => FrameKind::TextInformation,

        // Not part of ID3v2.3, but taggers write them anyway.
        b"TCMP" | b"TDRL" | b"TDRC" => FrameKind::NonStandardTextInformation,

        b"COMM" => FrameKind::Comment,
        b"APIC" => FrameKind::AttachedPicture,
        b"WXXX" => FrameKind::UserDefinedUrl,
        b"PRIV" => FrameKind::Private,
        b"USLT" => FrameKind::UnsynchronizedLyrics,
        b"TXXX" => FrameKind::UserDefinedTextInformation,
        b"MCDI" => FrameKind::MusicCdIdentifier,
        b"GEOB" => FrameKind::GeneralEncapsulationObject,
        b"USER" => FrameKind::TermsOfUse,

        _ => return None,
    };

    Some(kind)
}

/// One frame: a header paired with a decoded body.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub header: FrameHeader,
    pub body: FrameBody,
}

impl Frame {
    pub fn new(id: FrameId, body: FrameBody) -> Self {
        Frame {
            header: FrameHeader::new(id),
            body,
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.header.id, self.body)
    }
}

/// The closed set of frame bodies.
///
/// Keeping this a sum type rather than trait objects makes the decode and
/// render dispatch exhaustive: adding a kind without wiring it up is a
/// compile error.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameBody {
    Text(TextInformationFrame),
    UserText(UserTextFrame),
    Comment(CommentsFrame),
    Picture(AttachedPictureFrame),
    UserUrl(UserUrlFrame),
    Private(PrivateFrame),
    Lyrics(UnsyncLyricsFrame),
    CdId(MusicCdIdFrame),
    Object(GeneralObjectFrame),
    TermsOfUse(TermsOfUseFrame),
}

impl FrameBody {
    pub(crate) fn parse(kind: FrameKind, stream: &mut BufStream) -> Result<Self> {
        let body = match kind {
            FrameKind::TextInformation | FrameKind::NonStandardTextInformation => {
                FrameBody::Text(TextInformationFrame::parse(stream)?)
            }
            FrameKind::UserDefinedTextInformation => {
                FrameBody::UserText(UserTextFrame::parse(stream)?)
            }
            FrameKind::Comment => FrameBody::Comment(CommentsFrame::parse(stream)?),
            FrameKind::AttachedPicture => FrameBody::Picture(AttachedPictureFrame::parse(stream)?),
            FrameKind::UserDefinedUrl => FrameBody::UserUrl(UserUrlFrame::parse(stream)?),
            FrameKind::Private => FrameBody::Private(PrivateFrame::parse(stream)?),
            FrameKind::UnsynchronizedLyrics => {
                FrameBody::Lyrics(UnsyncLyricsFrame::parse(stream)?)
            }
            FrameKind::MusicCdIdentifier => FrameBody::CdId(MusicCdIdFrame::parse(stream)?),
            FrameKind::GeneralEncapsulationObject => {
                FrameBody::Object(GeneralObjectFrame::parse(stream)?)
            }
            FrameKind::TermsOfUse => FrameBody::TermsOfUse(TermsOfUseFrame::parse(stream)?),
        };

        Ok(body)
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        match self {
            FrameBody::Text(frame) => frame.render(),
            FrameBody::UserText(frame) => frame.render(),
            FrameBody::Comment(frame) => frame.render(),
            FrameBody::Picture(frame) => frame.render(),
            FrameBody::UserUrl(frame) => frame.render(),
            FrameBody::Private(frame) => frame.render(),
            FrameBody::Lyrics(frame) => frame.render(),
            FrameBody::CdId(frame) => frame.render(),
            FrameBody::Object(frame) => frame.render(),
            FrameBody::TermsOfUse(frame) => frame.render(),
        }
    }
}

impl Display for FrameBody {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            FrameBody::Text(frame) => frame.fmt(f),
            FrameBody::UserText(frame) => frame.fmt(f),
            FrameBody::Comment(frame) => frame.fmt(f),
            FrameBody::Picture(frame) => frame.fmt(f),
            FrameBody::UserUrl(frame) => frame.fmt(f),
            FrameBody::Private(frame) => frame.fmt(f),
            FrameBody::Lyrics(frame) => frame.fmt(f),
            FrameBody::CdId(frame) => frame.fmt(f),
            FrameBody::Object(frame) => frame.fmt(f),
            FrameBody::TermsOfUse(frame) => frame.fmt(f),
        }
    }
}

/// Decodes the next frame from the stream: a ten-byte header, then exactly
/// the declared number of body bytes.
pub(crate) fn parse(stream: &mut BufStream) -> Result<Frame> {
    let header = FrameHeader::parse(stream)?;

    let kind = kind_for_id(header.id).ok_or(Error::UnknownFrameKind(header.id))?;

    let mut body_stream = stream.slice_stream(header.size())?;
    let body = FrameBody::parse(kind, &mut body_stream)?;

    Ok(Frame { header, body })
}

/// Renders a frame, recomputing the header's size field from the body.
pub(crate) fn render(frame: &Frame) -> Vec<u8> {
    let body = frame.body.render();

    let mut result = frame.header.render(body.len()).to_vec();
    result.extend(body);

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_the_table() {
        assert_eq!(
            kind_for_id(FrameId::new(b"TIT2")),
            Some(FrameKind::TextInformation)
        );
        assert_eq!(
            kind_for_id(FrameId::new(b"TCMP")),
            Some(FrameKind::NonStandardTextInformation)
        );
        assert_eq!(kind_for_id(FrameId::new(b"COMM")), Some(FrameKind::Comment));
        assert_eq!(
            kind_for_id(FrameId::new(b"APIC")),
            Some(FrameKind::AttachedPicture)
        );
        assert_eq!(kind_for_id(FrameId::new(b"ZZZZ")), None);
    }

    #[test]
    fn text_kinds_are_text() {
        assert!(FrameKind::TextInformation.is_text());
        assert!(FrameKind::NonStandardTextInformation.is_text());
        assert!(!FrameKind::Comment.is_text());
    }

    #[test]
    fn parse_unknown_id_is_an_error() {
        let mut stream = BufStream::new(b"ZZZZ\x00\x00\x00\x01\x00\x00\x16");

        assert!(matches!(
            parse(&mut stream),
            Err(Error::UnknownFrameKind(id)) if id == FrameId::new(b"ZZZZ")
        ));
    }

    #[test]
    #[should_panic]
    fn new_rejects_lowercase() {
        FrameId::new(b"apic");
    }

    #[test]
    fn id_from_str() {
        assert_eq!(
            "TIT2".parse::<FrameId>().unwrap(),
            FrameId::new(b"TIT2")
        );
        assert!("tit2".parse::<FrameId>().is_err());
        assert!("TOOLONG".parse::<FrameId>().is_err());
    }
}
