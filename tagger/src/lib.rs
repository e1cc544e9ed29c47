//! ID3v2.3 metadata reading and writing.
//!
//! tagger reads, edits, and rewrites the ID3v2.3 tag block found at the
//! start of MP3 files. The codec itself never touches the audio payload:
//! edits are padded into the space the tag already reserves whenever
//! possible, and only a tag that outgrows its reserved region forces the
//! rest of the file to be rewritten.
//!
//! The [`config`](config) and [`template`](template) modules sit on top of
//! the codec and turn user-supplied JSON into the frame maps that
//! [`Tag::apply_frames`](id3v2::Tag::apply_frames) consumes. They are the
//! only layers that know about file naming schemes; the codec deals in
//! bytes and paths alone.

#![forbid(unsafe_code)]

mod core;

pub mod config;
pub mod id3v1;
pub mod id3v2;
pub mod template;

pub use crate::core::string::Encoding;
