//! The tag aggregate.

use crate::core::io::BufStream;
use crate::id3v2::frames::{FrameBody, FrameId};
use crate::id3v2::{Error, FrameCollection, Result, TagHeader};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// A complete ID3v2.3 tag: the header and every frame it carries.
///
/// A `Tag` is a plain value with no attached file handle. Reading and
/// writing are explicit: [`read_from`](Tag::read_from) parses one from the
/// start of a file, and [`write::write`](crate::id3v2::write::write)
/// persists one. There is no state flushed on drop.
pub struct Tag {
    pub header: TagHeader,
    pub frames: FrameCollection,
}

impl Tag {
    /// Builds an empty tag for a file that has none yet.
    pub fn new() -> Self {
        Tag {
            header: TagHeader::new(),
            frames: FrameCollection::new(),
        }
    }

    /// Reads the tag at the start of `path`.
    ///
    /// Fails with [`Error::NoIdentifier`](Error) when the file does not
    /// start with `"ID3"` (the caller's cue to build a fresh tag or skip),
    /// and [`Error::UnsupportedVersion`](Error) for any major version other
    /// than 3.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;

        let mut raw = [0; 10];
        read_fully(&mut file, &mut raw)?;

        let header = TagHeader::parse(raw)?;

        let mut data = vec![0; header.size()];
        read_fully(&mut file, &mut data)?;

        let frames = FrameCollection::parse(&mut BufStream::new(&data))?;

        Ok(Tag { header, frames })
    }

    /// Applies a set of named frame values, then reorders the collection
    /// for serialization. Each entry follows the replace rule of
    /// [`FrameCollection::apply`](FrameCollection::apply).
    pub fn apply_frames<I>(&mut self, frames: I) -> Result<()>
    where
        I: IntoIterator<Item = (FrameId, FrameBody)>,
    {
        for (id, body) in frames {
            self.frames.apply(id, body)?;
        }

        self.frames.order_for_serialization();

        Ok(())
    }

    /// Serializes every frame into the frames payload: the tag region
    /// bytes minus header and padding.
    pub fn marshal(&self) -> Vec<u8> {
        self.frames.render()
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self::new()
    }
}

fn read_fully(file: &mut File, buf: &mut [u8]) -> Result<()> {
    file.read_exact(buf).map_err(|err| {
        if err.kind() == ErrorKind::UnexpectedEof {
            // The file ended inside a region the header promised exists.
            Error::MalformedHeader
        } else {
            Error::Io(err)
        }
    })
}
