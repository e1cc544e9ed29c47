use std::io::{self, Error, ErrorKind};

/// A bounds-checked cursor over a byte slice.
///
/// Frame grammars are all "consume fields left to right", so parsing code
/// reads much better against a cursor that owns the position bookkeeping
/// than against raw slice indexing.
pub(crate) struct BufStream<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> BufStream<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    /// Reads exactly one byte, erroring if the stream is consumed.
    pub fn read_u8(&mut self) -> io::Result<u8> {
        if self.is_empty() {
            return Err(eos_error());
        }

        self.pos += 1;

        Ok(self.src[self.pos - 1])
    }

    /// Reads a big-endian u32.
    pub fn read_u32(&mut self) -> io::Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Reads an array of size `N`, erroring if it cannot be filled.
    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        if self.remaining() < N {
            return Err(eos_error());
        }

        let mut arr = [0; N];
        arr.copy_from_slice(&self.src[self.pos..self.pos + N]);
        self.pos += N;

        Ok(arr)
    }

    /// Peeks at the next `n` bytes without consuming them.
    pub fn peek(&self, n: usize) -> io::Result<&[u8]> {
        if self.remaining() < n {
            return Err(eos_error());
        }

        Ok(&self.src[self.pos..self.pos + n])
    }

    /// Consumes `n` bytes and returns them as a sub-stream.
    pub fn slice_stream(&mut self, n: usize) -> io::Result<BufStream> {
        if self.remaining() < n {
            return Err(eos_error());
        }

        self.pos += n;

        Ok(BufStream::new(&self.src[self.pos - n..self.pos]))
    }

    /// Consumes the stream up to and including `needle`, returning the data
    /// before it. The search advances in `needle`-sized steps so that a
    /// two-byte terminator stays aligned to UTF-16 code units. If the
    /// needle never occurs, the rest of the stream is returned.
    pub fn search(&mut self, needle: &[u8]) -> &[u8] {
        let start = self.pos;

        let mut begin = self.pos;
        let mut end = self.pos + needle.len();

        while end <= self.src.len() {
            if &self.src[begin..end] == needle {
                self.pos = end;

                return &self.src[start..end - needle.len()];
            }

            begin += needle.len();
            end += needle.len();
        }

        self.take_rest()
    }

    /// Consumes and returns all remaining data.
    pub fn take_rest(&mut self) -> &[u8] {
        let rest = &self.src[self.pos..];
        self.pos = self.src.len();
        rest
    }

    pub fn remaining(&self) -> usize {
        self.src.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

fn eos_error() -> Error {
    Error::new(ErrorKind::UnexpectedEof, "end of tag data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_consumes_in_order() {
        let mut stream = BufStream::new(b"\x01\x00\x00\x00\x02rest");

        assert_eq!(stream.read_u8().unwrap(), 0x01);
        assert_eq!(stream.read_u32().unwrap(), 2);
        assert_eq!(stream.take_rest(), b"rest");
        assert!(stream.is_empty());
    }

    #[test]
    fn read_past_end_fails() {
        let mut stream = BufStream::new(b"\x01");

        assert!(stream.read_u32().is_err());
        assert_eq!(stream.read_u8().unwrap(), 0x01);
        assert!(stream.read_u8().is_err());
    }

    #[test]
    fn search_consumes_terminator() {
        let mut stream = BufStream::new(b"abc\0def");

        assert_eq!(stream.search(&[0]), b"abc");
        assert_eq!(stream.take_rest(), b"def");
    }

    #[test]
    fn search_stays_aligned() {
        // The lone 0x00 bytes here are the high halves of UTF-16 code
        // units, not terminators.
        let mut stream = BufStream::new(b"\x00a\x00b\x00\x00cd");

        assert_eq!(stream.search(&[0, 0]), b"\x00a\x00b");
        assert_eq!(stream.take_rest(), b"cd");
    }

    #[test]
    fn search_without_needle_takes_rest() {
        let mut stream = BufStream::new(b"abc");

        assert_eq!(stream.search(&[0]), b"abc");
        assert!(stream.is_empty());
    }
}
