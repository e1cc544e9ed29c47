use std::io::{self, Write};

use tagger::id3v2::frames::FrameId;
use tagger::id3v2::Tag;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Pretty-prints a tag: a bold path line, a summary, then one line per
/// frame with its ID, its human name when we know one, and its value.
pub fn print_tag(path: &str, tag: &Tag) -> io::Result<()> {
    let mut out = StandardStream::stdout(ColorChoice::Auto);

    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{}", path)?;
    out.reset()?;

    writeln!(
        out,
        "ID3v2.3.{}, {} frame(s), {} bytes reserved",
        tag.header.revision,
        tag.frames.len(),
        tag.header.size()
    )?;

    for frame in &tag.frames {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "  {}", frame.header.id)?;
        out.reset()?;

        if let Some(name) = describe_id(frame.header.id) {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(out, " ({})", name)?;
            out.reset()?;
        }

        write!(out, ": ")?;
        print_value(&mut out, &frame.body.to_string())?;
    }

    Ok(())
}

/// Values can span lines (lyrics, terms of use); continuation lines get
/// indented under the frame ID.
fn print_value(out: &mut StandardStream, value: &str) -> io::Result<()> {
    let mut lines = value.lines();

    writeln!(out, "{}", lines.next().unwrap_or(""))?;

    for line in lines {
        writeln!(out, "      {}", line)?;
    }

    Ok(())
}

fn describe_id(id: FrameId) -> Option<&'static str> {
    let name = match id.inner() {
        b"TALB" => "Album",
        b"TBPM" => "Beats per minute",
        b"TCOM" => "Composer",
        b"TCON" => "Content type",
        b"TCOP" => "Copyright",
        b"TDAT" => "Date",
        b"TDLY" => "Playlist delay",
        b"TENC" => "Encoded by",
        b"TEXT" => "Lyricist",
        b"TFLT" => "File type",
        b"TIME" => "Time",
        b"TIT1" => "Content group",
        b"TIT2" => "Title",
        b"TIT3" => "Subtitle",
        b"TKEY" => "Initial key",
        b"TLAN" => "Language",
        b"TLEN" => "Length",
        b"TMED" => "Media type",
        b"TOAL" => "Original album",
        b"TOFN" => "Original filename",
        b"TOLY" => "Original lyricist",
        b"TOPE" => "Original artist",
        b"TORY" => "Original release year",
        b"TOWN" => "File owner",
        b"TPE1" => "Lead performer",
        b"TPE2" => "Band",
        b"TPE3" => "Conductor",
        b"TPE4" => "Remixed by",
        b"TPOS" => "Part of a set",
        b"TPUB" => "Publisher",
        b"TRCK" => "Track number",
        b"TRDA" => "Recording dates",
        b"TRSN" => "Internet radio station",
        b"TRSO" => "Internet radio station owner",
        b"TSIZ" => "Size",
        b"TSRC" => "ISRC",
        b"TSSE" => "Encoding settings",
        b"TYER" => "Year",
        b"TCMP" => "Compilation",
        b"TDRC" => "Recording time",
        b"TDRL" => "Release time",
        b"COMM" => "Comment",
        b"APIC" => "Attached picture",
        b"WXXX" => "User URL",
        b"PRIV" => "Private data",
        b"USLT" => "Lyrics",
        b"TXXX" => "User text",
        b"MCDI" => "Music CD identifier",
        b"GEOB" => "Encapsulated object",
        b"USER" => "Terms of use",
        _ => return None,
    };

    Some(name)
}
