//! Positional cursor over a fully-buffered osu!.db image
//!
//! All multi-byte fields in the format are little-endian. The cursor only
//! ever moves forward; a failed fixed-width read leaves it where it was.

use crate::error::{Error, Result};

/// Marker byte that introduces a length-prefixed string.
const STRING_PRESENT: u8 = 0x0b;

/// Forward-only read cursor over a byte slice.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take the next `n` bytes, or fail without moving the cursor.
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Skip `n` bytes without decoding them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// The format only ever writes 0 or 1, but the stable client accepts any
    /// non-zero byte as true; mirror that rather than rejecting the file.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// Read a ULEB128 (unsigned LEB128) encoded integer.
    ///
    /// ULEB128 uses 7 bits per byte for data, with the high bit as a
    /// continuation flag. If the buffer runs out mid-sequence the partial
    /// value is returned: the stable client reads until exhaustion, and
    /// truncated files exist in the wild. A sequence carrying data bits past
    /// bit 63 is an error rather than a silent truncation.
    pub fn read_uleb128(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut result: u64 = 0;
        let mut shift = 0u32;

        loop {
            let byte = match self.buf.get(self.pos) {
                Some(&b) => b,
                None => {
                    tracing::warn!(offset = start, "ULEB128 sequence cut off by end of input");
                    return Ok(result);
                }
            };
            self.pos += 1;

            let bits = (byte & 0x7f) as u64;
            if shift >= u64::BITS {
                if bits != 0 {
                    return Err(Error::VarIntOverflow { offset: start });
                }
            } else {
                let chunk = bits << shift;
                if chunk >> shift != bits {
                    return Err(Error::VarIntOverflow { offset: start });
                }
                result |= chunk;
            }

            // Continuation bit
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
        }

        Ok(result)
    }

    /// Read an osu! format string.
    ///
    /// A 0x0b marker byte introduces a ULEB128 length and that many UTF-8
    /// bytes. Any other marker means the string is absent: exactly one byte
    /// is consumed and the empty string is returned. Absent and
    /// present-but-empty strings are indistinguishable after decode, which
    /// is a property of the format itself.
    pub fn read_string(&mut self) -> Result<String> {
        if self.read_u8()? != STRING_PRESENT {
            return Ok(String::new());
        }

        let length = self.read_uleb128()? as usize;
        let offset = self.pos;
        let bytes = self.take(length)?;

        String::from_utf8(bytes.to_vec()).map_err(|source| Error::InvalidString { offset, source })
    }
}
