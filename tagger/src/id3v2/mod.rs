//! The ID3v2.3 tag codec.
//!
//! A [`Tag`](Tag) is a plain value: a header plus an ordered collection of
//! frames. Reading ([`Tag::read_from`](Tag::read_from)) and writing
//! ([`write::write`](write::write)) are explicit operations that take
//! paths; nothing is buffered behind a file handle or flushed on drop.

pub mod collections;
pub mod frames;
pub mod header;
mod syncdata;
pub mod tag;
pub mod write;

pub use self::collections::FrameCollection;
pub use self::header::{TagFlags, TagHeader};
pub use self::tag::Tag;

use self::frames::FrameId;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

/// The ways reading or editing a tag can fail.
///
/// The codec layer only ever returns these; it never logs, prints, or
/// retries. Callers decide which conditions are fatal for a run and which
/// just skip a file.
#[derive(Debug)]
pub enum Error {
    /// The first three bytes of the file are not `"ID3"`. This is the
    /// recoverable "file has no tag yet" signal.
    NoIdentifier,
    /// The tag is not major version 3. Report and skip.
    UnsupportedVersion { major: u8, revision: u8 },
    /// Fewer than ten bytes were available where a header was expected.
    MalformedHeader,
    /// A frame ID that is not in the registry. The frame cannot be decoded,
    /// and silently dropping it would lose data on the next write.
    UnknownFrameKind(FrameId),
    /// [`FrameCollection::apply`](collections::FrameCollection::apply) was
    /// handed a frame kind its replace rule does not cover.
    UnsupportedApply(FrameId),
    /// An underlying read, write, or truncate failed.
    Io(io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Error::NoIdentifier => write!(f, "no ID3 identifier"),
            Error::UnsupportedVersion { major, revision } => {
                write!(f, "unsupported tag version ID3v2.{}.{}", major, revision)
            }
            Error::MalformedHeader => write!(f, "malformed header"),
            Error::UnknownFrameKind(id) => write!(f, "unknown frame kind {}", id),
            Error::UnsupportedApply(id) => write!(f, "cannot apply frame {}", id),
            Error::Io(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
