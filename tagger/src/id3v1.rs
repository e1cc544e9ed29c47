//! ID3v1 footer removal.
//!
//! An ID3v1 tag is a fixed 128-byte record at the very end of the file,
//! completely separate from the ID3v2 region at the front. This tool only
//! ever removes it; the fields themselves are not decoded.

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

const FOOTER_SIZE: u64 = 128;
const ID_FOOTER: &[u8; 3] = b"TAG";

/// Truncates a trailing ID3v1 footer off the file, returning whether one
/// was found. Files without a footer, including files shorter than 128
/// bytes, are left untouched.
pub fn strip<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let len = file.metadata()?.len();

    if len < FOOTER_SIZE {
        return Ok(false);
    }

    file.seek(SeekFrom::End(-(FOOTER_SIZE as i64)))?;

    let mut id = [0; 3];
    file.read_exact(&mut id)?;

    if &id != ID_FOOTER {
        return Ok(false);
    }

    file.set_len(len - FOOTER_SIZE)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), data).unwrap();
        file
    }

    #[test]
    fn strip_removes_footer() {
        let mut data = b"audio data".to_vec();
        data.extend(b"TAG");
        data.extend(vec![0x16; 125]);

        let file = write_temp(&data);

        assert!(strip(file.path()).unwrap());
        assert_eq!(std::fs::read(file.path()).unwrap(), b"audio data");
    }

    #[test]
    fn strip_leaves_files_without_footer() {
        let data = vec![0x16; 200];
        let file = write_temp(&data);

        assert!(!strip(file.path()).unwrap());
        assert_eq!(std::fs::read(file.path()).unwrap().len(), 200);
    }

    #[test]
    fn strip_leaves_short_files() {
        let file = write_temp(b"tiny");

        assert!(!strip(file.path()).unwrap());
        assert_eq!(std::fs::read(file.path()).unwrap(), b"tiny");
    }

    #[test]
    fn strip_ignores_tag_text_elsewhere() {
        // "TAG" must be exactly 128 bytes from the end to count.
        let mut data = b"TAG at the start".to_vec();
        data.extend(vec![0; 150]);

        let file = write_temp(&data);

        assert!(!strip(file.path()).unwrap());
    }
}
