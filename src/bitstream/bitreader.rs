//! BitReader: reads a packed bitstream one bit at a time, most significant bit first.
//!
//! The reader is bounded by a bit count rather than the byte length of its buffer, so padding
//! bits in the final byte are never handed out.

const BIT_MASK: u8 = 0x80;

#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    /// Bits left to hand out.
    remaining: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over the first bit_count bits of buffer. Returns None if buffer
    /// holds fewer than bit_count bits.
    pub fn new(buffer: &'a [u8], bit_count: usize) -> Option<Self> {
        if bit_count > buffer.len().saturating_mul(8) {
            return None;
        }
        Some(Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            remaining: bit_count,
        })
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None once bit_count bits have been read.
    pub fn bool_bit(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            return None;
        }
        let bit = self.buffer[self.cursor] & (BIT_MASK >> self.bit_index) != 0;
        self.remaining -= 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit)
    }

    /// Number of bits read so far.
    pub fn position(&self) -> usize {
        self.cursor * 8 + self.bit_index
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.bool_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
