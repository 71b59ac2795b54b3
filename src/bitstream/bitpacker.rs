use log::error;

/// Packs variable length codes into a byte stream, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of code bits written so far, padding excluded.
    bit_count: usize,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the size specified. Call flush()
    /// to push the partial last byte to the buffer before taking the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            bit_count: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all out functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue = (self.queue << 1) | bit as u64;
        self.q_bits += 1;
        self.bit_count += 1;
        self.write_stream();
    }

    /// Puts a sequence of bits on the stream, first bit first.
    pub fn out_bits<I: IntoIterator<Item = bool>>(&mut self, bits: I) {
        bits.into_iter().for_each(|bit| self.out_bit(bit));
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits. Returns the number of padding bits added.
    pub fn flush(&mut self) -> u8 {
        let mut padding = 0;
        if self.q_bits > 0 {
            padding = 8 - self.q_bits;
            self.queue <<= padding; //pad the queue with zeros
            self.q_bits += padding;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
        padding
    }

    /// Flush and hand back the packed bytes together with the exact bit count.
    pub fn finish(mut self) -> (Vec<u8>, usize) {
        self.flush();
        (self.output, self.bit_count)
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]",((self.output.len() * 8) + self.q_bits as usize)/8, ((self.output.len() * 8) + self.q_bits as usize)%8}
    }
}
