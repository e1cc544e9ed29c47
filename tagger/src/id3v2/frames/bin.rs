//! Frames whose payloads are opaque bytes.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::id3v2::Result;
use std::fmt::{self, Display, Formatter};

/// A private frame (`PRIV`): a terminated single-byte owner identifier,
/// then opaque data to the end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrivateFrame {
    pub owner: String,
    pub data: Vec<u8>,
}

impl PrivateFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let owner = string::read_terminated(Encoding::Latin1, stream);
        let data = stream.take_rest().to_vec();

        Ok(PrivateFrame { owner, data })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = string::render_terminated(Encoding::Latin1, &self.owner);
        result.extend(&self.data);
        result
    }
}

impl Display for PrivateFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} [{} bytes]", self.owner, self.data.len())
    }
}

/// A music CD identifier frame (`MCDI`). The table of contents is carried
/// as-is; its internal layout is not decoded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MusicCdIdFrame {
    pub toc: Vec<u8>,
}

impl MusicCdIdFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        Ok(MusicCdIdFrame {
            toc: stream.take_rest().to_vec(),
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        self.toc.clone()
    }
}

impl Display for MusicCdIdFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{} byte table of contents]", self.toc.len())
    }
}
