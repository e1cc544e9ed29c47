use crate::core::io::BufStream;
use crate::id3v2::frames::FrameId;
use crate::id3v2::{syncdata, Error, Result};

const FLAG_TAG_ALTER_PRESERVATION: u8 = 0b1000_0000;
const FLAG_FILE_ALTER_PRESERVATION: u8 = 0b0100_0000;
const FLAG_READ_ONLY: u8 = 0b0010_0000;

const FLAG_COMPRESSION: u8 = 0b0001_0000;
const FLAG_ENCRYPTION: u8 = 0b0000_1000;
const FLAG_GROUPING_IDENTITY: u8 = 0b0000_0100;

/// The ten-byte header before every frame body: a four-byte ID, a plain
/// big-endian body size, and two flag bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameHeader {
    pub id: FrameId,
    pub flags: FrameFlags,
    frame_size: usize,
}

impl FrameHeader {
    pub fn new(id: FrameId) -> Self {
        FrameHeader {
            id,
            flags: FrameFlags::default(),
            frame_size: 0,
        }
    }

    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        if stream.remaining() < 10 {
            return Err(Error::MalformedHeader);
        }

        let id = FrameId::from_raw(stream.read_array()?);
        let frame_size = syncdata::to_u32(stream.read_array()?);

        let status = stream.read_u8()?;
        let format = stream.read_u8()?;

        Ok(FrameHeader {
            id,
            frame_size,
            flags: FrameFlags {
                preserve_tag_on_alteration: status & FLAG_TAG_ALTER_PRESERVATION != 0,
                preserve_file_on_alteration: status & FLAG_FILE_ALTER_PRESERVATION != 0,
                read_only: status & FLAG_READ_ONLY != 0,
                compressed: format & FLAG_COMPRESSION != 0,
                encrypted: format & FLAG_ENCRYPTION != 0,
                grouping_identity: format & FLAG_GROUPING_IDENTITY != 0,
            },
        })
    }

    /// The body size declared when this header was parsed. Rendering
    /// ignores it and measures the body instead.
    pub fn size(&self) -> usize {
        self.frame_size
    }

    pub(crate) fn render(&self, body_size: usize) -> [u8; 10] {
        let id = self.id.inner();
        let size = syncdata::from_u32(body_size);

        let mut status = 0;
        let mut format = 0;

        if self.flags.preserve_tag_on_alteration {
            status |= FLAG_TAG_ALTER_PRESERVATION;
        }
        if self.flags.preserve_file_on_alteration {
            status |= FLAG_FILE_ALTER_PRESERVATION;
        }
        if self.flags.read_only {
            status |= FLAG_READ_ONLY;
        }
        if self.flags.compressed {
            format |= FLAG_COMPRESSION;
        }
        if self.flags.encrypted {
            format |= FLAG_ENCRYPTION;
        }
        if self.flags.grouping_identity {
            format |= FLAG_GROUPING_IDENTITY;
        }

        [
            id[0], id[1], id[2], id[3], size[0], size[1], size[2], size[3], status, format,
        ]
    }
}

/// Frame status and format flags. All six round-trip; the compression and
/// encryption bits are carried but never acted on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FrameFlags {
    pub preserve_tag_on_alteration: bool,
    pub preserve_file_on_alteration: bool,
    pub read_only: bool,
    pub compressed: bool,
    pub encrypted: bool,
    pub grouping_identity: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_frame_header() {
        let mut stream = BufStream::new(b"TXXX\x00\x0A\x71\x7B\xA0\x18");
        let header = FrameHeader::parse(&mut stream).unwrap();

        assert_eq!(header.id, FrameId::new(b"TXXX"));
        assert_eq!(header.size(), 684411);

        assert!(header.flags.preserve_tag_on_alteration);
        assert!(!header.flags.preserve_file_on_alteration);
        assert!(header.flags.read_only);
        assert!(header.flags.compressed);
        assert!(header.flags.encrypted);
        assert!(!header.flags.grouping_identity);
    }

    #[test]
    fn parse_short_header() {
        let mut stream = BufStream::new(b"TIT2\x00\x00");

        assert!(matches!(
            FrameHeader::parse(&mut stream),
            Err(Error::MalformedHeader)
        ));
    }

    #[test]
    fn render_round_trips_flags() {
        let mut header = FrameHeader::new(FrameId::new(b"TALB"));
        header.flags.preserve_file_on_alteration = true;
        header.flags.grouping_identity = true;

        let raw = header.render(5);
        let reparsed = FrameHeader::parse(&mut BufStream::new(&raw)).unwrap();

        assert_eq!(reparsed.id, header.id);
        assert_eq!(reparsed.size(), 5);
        assert_eq!(reparsed.flags, header.flags);
    }
}
