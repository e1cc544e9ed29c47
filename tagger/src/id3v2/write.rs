//! Sizing and persisting edited tags.
//!
//! An edited tag is written back in one of two ways. If the serialized
//! frames still fit in the region the file already reserves, the region is
//! padded back out to its old size and overwritten in place; the audio
//! payload is never touched. If the frames outgrew the region, the tag is
//! given a fresh allowance of padding and the whole file is rewritten
//! through a temporary, because every audio byte has to move.

use crate::id3v2::{Error, Result, Tag, TagHeader};
use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The padding granted to a tag that outgrew its reserved region. Generous
/// enough that the next few edits fit in place.
pub(crate) const ADDITIONAL_PADDING: usize = 2048;

/// The complete tag region bytes for a tag, plus whether producing them
/// moved the region boundary.
pub struct TagRegion {
    pub bytes: Vec<u8>,
    /// True when the frames no longer fit the reserved region, which
    /// forces a full file rewrite.
    pub grew: bool,
}

/// Serializes the tag and decides its padding: pad back out to the
/// reserved size when the frames fit, or grow by
/// [`ADDITIONAL_PADDING`](ADDITIONAL_PADDING) when they don't. The
/// declared size in the rendered header always matches the actual
/// frames-plus-padding length.
pub fn plan(tag: &Tag) -> TagRegion {
    let payload = tag.marshal();
    let reserved = tag.header.size();

    let (tag_size, padding) = if payload.len() <= reserved {
        (reserved, reserved - payload.len())
    } else {
        (payload.len() + ADDITIONAL_PADDING, ADDITIONAL_PADDING)
    };

    let mut bytes = tag.header.render(tag_size).to_vec();
    bytes.extend(&payload);
    bytes.resize(bytes.len() + padding, 0);

    TagRegion {
        bytes,
        grew: payload.len() > reserved,
    }
}

/// The complete tag region bytes, for callers assembling output themselves.
pub fn output_bytes(tag: &Tag) -> Vec<u8> {
    plan(tag).bytes
}

/// Writes the tag to `dst`, taking the audio payload from `src`.
///
/// When `src` and `dst` are the same file and the region kept its size,
/// only the region bytes are overwritten. Every other case (growth, or a
/// save-as) streams the new region plus the source's audio into a
/// temporary file next to `dst` and moves it into place, so the
/// destination never holds a tag paired with audio at the wrong offset.
pub fn write<P, Q>(tag: &Tag, src: P, dst: Q) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let src = src.as_ref();
    let dst = dst.as_ref();

    let region = plan(tag);

    // The audio offset comes from the source file itself rather than the
    // tag, so writing a freshly built tag to an untagged file keeps every
    // byte of audio.
    let audio_start = audio_offset(src)?;

    if src == dst && region.bytes.len() as u64 == audio_start {
        let mut file = OpenOptions::new().write(true).open(dst)?;
        file.write_all(&region.bytes)?;
        return Ok(());
    }

    let dir = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&region.bytes)?;

    let mut source = File::open(src)?;
    source.seek(SeekFrom::Start(audio_start))?;
    io::copy(&mut source, tmp.as_file_mut())?;

    tmp.persist(dst).map_err(|err| Error::Io(err.error))?;

    Ok(())
}

/// Where the audio payload starts in `path`: after the reserved tag region
/// when the file carries a tag, at byte zero when it doesn't.
fn audio_offset(path: &Path) -> Result<u64> {
    let mut file = File::open(path)?;

    let mut raw = [0; 10];
    if let Err(err) = file.read_exact(&mut raw) {
        if err.kind() == ErrorKind::UnexpectedEof {
            // Too short for any tag header.
            return Ok(0);
        }

        return Err(err.into());
    }

    match TagHeader::parse(raw) {
        Ok(header) => Ok(header.size() as u64 + 10),
        Err(Error::NoIdentifier) => Ok(0),
        Err(err) => Err(err),
    }
}
