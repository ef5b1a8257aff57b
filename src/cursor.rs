use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;

/// Prefix of every single-packet A2S response.
pub const SIMPLE_RESPONSE_PREFIX: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Sequential little-endian reader over a received datagram.
///
/// Reads never go out of bounds. Variable-length reads are clamped to the
/// remaining data and fixed-width reads treat missing bytes as zero, so a
/// truncated response decodes into zeroed fields instead of an error.
#[derive(Clone, Debug, Default)]
pub struct ByteCursor {
    buf: Bytes,
    pos: usize,
}

impl ByteCursor {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Number of bytes left to read.
    pub fn len(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, buf: impl Into<Bytes>) {
        self.buf = buf.into();
        self.pos = 0;
    }

    /// Returns up to `n` bytes, fewer if the buffer runs out.
    pub fn read_bytes(&mut self, n: usize) -> &[u8] {
        let start = self.pos;
        let end = start.saturating_add(n).min(self.buf.len());
        self.pos = end;
        &self.buf[start..end]
    }

    fn fixed<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0; N];
        let src = self.read_bytes(N);
        out[..src.len()].copy_from_slice(src);
        out
    }

    /// Skips the `FFFFFFFF` prefix and returns the response type character.
    pub fn header(&mut self) -> Option<char> {
        self.read_bytes(SIMPLE_RESPONSE_PREFIX.len());
        self.read_bytes(1).first().map(|&b| char::from(b))
    }

    pub fn byte(&mut self) -> u8 {
        self.fixed::<1>()[0]
    }

    pub fn bool(&mut self) -> bool {
        self.byte() > 0
    }

    pub fn short(&mut self) -> u16 {
        LittleEndian::read_u16(&self.fixed::<2>())
    }

    pub fn int(&mut self) -> i32 {
        LittleEndian::read_i32(&self.fixed::<4>())
    }

    pub fn long(&mut self) -> u64 {
        LittleEndian::read_u64(&self.fixed::<8>())
    }

    pub fn float(&mut self) -> f32 {
        LittleEndian::read_f32(&self.fixed::<4>())
    }

    /// Reads `len` bytes of text, or a null-terminated string when `len` is `None`.
    ///
    /// A missing terminator consumes the rest of the buffer.
    pub fn string(&mut self, len: Option<usize>) -> String {
        match len {
            Some(len) => String::from_utf8_lossy(self.read_bytes(len)).into_owned(),
            None => {
                let rest = &self.buf[self.pos..];
                match rest.iter().position(|&b| b == 0) {
                    Some(end) => {
                        let s = String::from_utf8_lossy(&rest[..end]).into_owned();
                        self.pos += end + 1;
                        s
                    }
                    None => {
                        let s = String::from_utf8_lossy(rest).into_owned();
                        self.pos = self.buf.len();
                        s
                    }
                }
            }
        }
    }

    /// Consumes everything that is left.
    pub fn bytes(&mut self) -> Bytes {
        let out = self.buf.slice(self.pos..);
        self.pos = self.buf.len();
        out
    }
}
