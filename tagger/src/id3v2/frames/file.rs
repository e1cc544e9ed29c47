//! Attached pictures and encapsulated objects.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::id3v2::frames::encoding;
use crate::id3v2::Result;
use log::warn;
use std::fmt::{self, Display, Formatter};
use std::io::{self, ErrorKind};

/// An attached picture frame (`APIC`): encoding byte, a terminated
/// single-byte MIME type, a picture type byte, a terminated description,
/// and the image data running to the end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttachedPictureFrame {
    pub encoding: Encoding,
    pub mime: String,
    pub pic_type: PictureType,
    pub desc: String,
    pub picture: Vec<u8>,
}

impl AttachedPictureFrame {
    // Some files in the wild omit the MIME terminator and the entire
    // description field, so the picture type byte lands directly after the
    // MIME text. A MIME type longer than ten characters flags that layout,
    // and the real boundary is the first byte below the printable ASCII
    // range. Decode accepts it; render always emits the compliant layout.
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let encoding = encoding::parse(stream)?;
        let data = stream.take_rest();

        let mime_bytes = match data.iter().position(|&byte| byte == 0) {
            Some(nul) => &data[..nul],
            None => data,
        };

        let malformed = mime_bytes.len() > 10;

        let (mime, mut pos) = if malformed {
            warn!("APIC MIME type is unterminated, assuming the description is missing");

            match mime_bytes.iter().position(|&byte| byte < 0x20) {
                Some(end) => (latin1(&data[..end]), end),
                // No control byte either; keep the over-long MIME type and
                // read on from where it started.
                None => (latin1(mime_bytes), 0),
            }
        } else {
            (latin1(mime_bytes), mime_bytes.len() + 1)
        };

        let pic_type = PictureType(*data.get(pos).ok_or_else(truncated)?);
        pos += 1;

        let mut rest = BufStream::new(data.get(pos..).ok_or_else(truncated)?);

        let desc = if malformed {
            String::new()
        } else {
            string::read_terminated(encoding, &mut rest)
        };

        let picture = rest.take_rest().to_vec();

        Ok(AttachedPictureFrame {
            encoding,
            mime,
            pic_type,
            desc,
            picture,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(string::render_terminated(Encoding::Latin1, &self.mime));
        result.push(self.pic_type.0);
        result.extend(string::render_terminated(self.encoding, &self.desc));
        result.extend(&self.picture);
        result
    }
}

fn latin1(data: &[u8]) -> String {
    data.iter().map(|&byte| char::from(byte)).collect()
}

fn truncated() -> crate::id3v2::Error {
    io::Error::new(ErrorKind::UnexpectedEof, "picture frame truncated").into()
}

impl Display for AttachedPictureFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} ", self.mime)?;

        if !self.desc.is_empty() {
            write!(f, "\"{}\" ", self.desc)?;
        }

        write!(f, "[{}]", self.pic_type)
    }
}

/// The advisory picture type byte. Unknown values are carried unchanged
/// and simply have no label.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PictureType(pub u8);

impl PictureType {
    pub fn label(&self) -> &'static str {
        match self.0 {
            0x00 => "Other",
            0x01 => "32x32 pixels file icon",
            0x02 => "Other file icon",
            0x03 => "Cover (front)",
            0x04 => "Cover (back)",
            0x05 => "Leaflet page",
            0x06 => "Media",
            0x07 => "Lead artist/lead performer/soloist",
            0x08 => "Artist/performer",
            0x09 => "Conductor",
            0x0A => "Band/Orchestra",
            0x0B => "Composer",
            0x0C => "Lyricist/text writer",
            0x0D => "Recording location",
            0x0E => "During recording",
            0x0F => "During performance",
            0x10 => "Movie/video screen capture",
            0x11 => "A bright coloured fish",
            0x12 => "Illustration",
            0x13 => "Band/artist logotype",
            0x14 => "Publisher/Studio logotype",
            _ => "",
        }
    }
}

impl Display for PictureType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A general encapsulated object frame (`GEOB`): encoding byte, a
/// terminated single-byte MIME type, a terminated filename, a terminated
/// content description, and the object bytes running to the end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneralObjectFrame {
    pub encoding: Encoding,
    pub mime: String,
    pub filename: String,
    pub desc: String,
    pub data: Vec<u8>,
}

impl GeneralObjectFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let encoding = encoding::parse(stream)?;
        let mime = string::read_terminated(Encoding::Latin1, stream);
        let filename = string::read_terminated(encoding, stream);
        let desc = string::read_terminated(encoding, stream);
        let data = stream.take_rest().to_vec();

        Ok(GeneralObjectFrame {
            encoding,
            mime,
            filename,
            desc,
            data,
        })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![encoding::render(self.encoding)];
        result.extend(string::render_terminated(Encoding::Latin1, &self.mime));
        result.extend(string::render_terminated(self.encoding, &self.filename));
        result.extend(string::render_terminated(self.encoding, &self.desc));
        result.extend(&self.data);
        result
    }
}

impl Display for GeneralObjectFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.mime.is_empty() {
            write!(f, "{} ", self.mime)?;
        }

        if !self.filename.is_empty() {
            write!(f, "\"{}\"", self.filename)?;
        }

        if !self.desc.is_empty() {
            write!(f, " [{}]", self.desc)?;
        }

        Ok(())
    }
}
