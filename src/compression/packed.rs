use std::io::{self, Read, Write};

/// Compressed data: the packed bytes and the number of bits in them that carry codes.
/// Bits past bit_count in the last byte are zero padding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packed {
    pub bytes: Vec<u8>,
    pub bit_count: usize,
}

impl Packed {
    pub fn new(bytes: Vec<u8>, bit_count: usize) -> Self {
        Self { bytes, bit_count }
    }

    /// Padding bits in the final byte.
    pub fn padding(&self) -> usize {
        self.bytes.len() * 8 - self.bit_count.min(self.bytes.len() * 8)
    }

    /// Write the bit count (u64, little endian) followed by the packed bytes.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&(self.bit_count as u64).to_le_bytes())?;
        writer.write_all(&self.bytes)?;
        Ok(())
    }

    /// Read what write_to wrote, up to the end of the source.
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Packed> {
        let mut bit_count_bytes = [0u8; 8];
        reader.read_exact(&mut bit_count_bytes)?;
        let bit_count = u64::from_le_bytes(bit_count_bytes) as usize;

        let mut bytes = Vec::with_capacity((bit_count + 7) / 8);
        reader.read_to_end(&mut bytes)?;

        if bit_count > bytes.len() * 8 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "header promises {} bits, only {} bytes follow",
                    bit_count,
                    bytes.len()
                ),
            ));
        }
        Ok(Packed { bytes, bit_count })
    }
}
