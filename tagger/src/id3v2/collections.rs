//! The ordered frame sequence inside a tag.

use crate::core::io::BufStream;
use crate::id3v2::frames::{self, Frame, FrameBody, FrameId};
use crate::id3v2::{Error, Result};
use log::warn;
use std::cmp::Ordering;
use std::convert::TryInto;
use std::slice;

const APIC: &[u8; 4] = b"APIC";

/// Every frame in a tag, in the order it will serialize.
///
/// Duplicate IDs are allowed in general (a tag can carry several comments
/// or pictures); only the text-information kinds are limited to one frame
/// per ID, which [`apply`](FrameCollection::apply) enforces.
#[derive(Default)]
pub struct FrameCollection {
    frames: Vec<Frame>,
}

impl FrameCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes frames until the data runs out or padding begins. Padding is
    /// signalled by a zero lead byte; a NUL inside a frame ID means the
    /// writer ran out of real frames too, so the rest of the region is
    /// treated the same way.
    pub(crate) fn parse(stream: &mut BufStream) -> Result<Self> {
        let mut frames = Vec::new();

        while !stream.is_empty() {
            if stream.peek(1)?[0] == 0 {
                break;
            }

            if stream.remaining() >= 4 {
                let id = FrameId::from_raw(stream.peek(4)?.try_into().unwrap());

                if id.contains_nul() {
                    warn!("frame ID contains a NUL byte, treating the rest of the tag as padding");
                    break;
                }
            }

            frames.push(frames::parse(stream)?);
        }

        Ok(FrameCollection { frames })
    }

    /// Replaces a frame by ID. Only the text-information kinds have a
    /// defined replace rule (ID3v2.3 allows one text frame per ID); every
    /// other kind must be edited with [`remove_all`](Self::remove_all) and
    /// [`push`](Self::push) explicitly.
    pub fn apply(&mut self, id: FrameId, body: FrameBody) -> Result<()> {
        match frames::kind_for_id(id) {
            Some(kind) if kind.is_text() => {
                self.remove_all(id);
                self.frames.push(Frame::new(id, body));
                Ok(())
            }
            _ => Err(Error::UnsupportedApply(id)),
        }
    }

    /// Deletes every frame with the given ID. A no-op when none match.
    pub fn remove_all(&mut self, id: FrameId) {
        self.frames.retain(|frame| frame.header.id != id);
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Sorts frames into serialization order: everything but `APIC`
    /// ascending by ID, with every `APIC` frame after every other frame.
    /// The sort is stable, so equal keys keep their relative order.
    pub fn order_for_serialization(&mut self) {
        self.frames.sort_by(serialization_order);
    }

    /// Serializes every frame, in order, into one contiguous payload.
    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = Vec::new();

        for frame in &self.frames {
            result.extend(frames::render(frame));
        }

        result
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|frame| frame.header.id == id)
    }

    pub fn iter(&self) -> slice::Iter<Frame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl<'a> IntoIterator for &'a FrameCollection {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

fn serialization_order(a: &Frame, b: &Frame) -> Ordering {
    match (a.header.id.inner() == APIC, b.header.id.inner() == APIC) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.header.id.cmp(&b.header.id),
    }
}
