use sysresolver_domain::DomainError;

/// Bounds-checked reader over a complete message buffer.
///
/// A cursor created by [`Cursor::window`] keeps the whole buffer reachable
/// (compression pointers address the full message) but may only advance up
/// to the end of its window. Running off a window is malformation; running
/// off the buffer itself is truncation.
#[derive(Debug, Clone)]
pub(super) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
    windowed: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            end: buf.len(),
            windowed: false,
        }
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// The error for a read of `needed` octets that does not fit.
    pub fn overrun(&self, what: &str, needed: usize) -> DomainError {
        if self.windowed {
            DomainError::MalformedMessage(format!(
                "{} at offset {} runs past RDATA ending at offset {}",
                what, self.pos, self.end
            ))
        } else {
            DomainError::truncated_wire(format!(
                "{} needs {} octets at offset {}, {} remain",
                what,
                needed,
                self.pos,
                self.remaining()
            ))
        }
    }

    pub fn read_bytes(&mut self, len: usize, what: &str) -> Result<&'a [u8], DomainError> {
        if len > self.remaining() {
            return Err(self.overrun(what, len));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, what: &str) -> Result<u8, DomainError> {
        Ok(self.read_bytes(1, what)?[0])
    }

    pub fn read_u16(&mut self, what: &str) -> Result<u16, DomainError> {
        let b = self.read_bytes(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self, what: &str) -> Result<u32, DomainError> {
        let b = self.read_bytes(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_rest(&mut self) -> &'a [u8] {
        let bytes = &self.buf[self.pos..self.end];
        self.pos = self.end;
        bytes
    }

    /// Splits off the next `len` octets as a window and skips past them.
    pub fn window(&mut self, len: usize, what: &str) -> Result<Cursor<'a>, DomainError> {
        if len > self.remaining() {
            return Err(self.overrun(what, len));
        }
        let window = Cursor {
            buf: self.buf,
            pos: self.pos,
            end: self.pos + len,
            windowed: true,
        };
        self.pos += len;
        Ok(window)
    }
}
