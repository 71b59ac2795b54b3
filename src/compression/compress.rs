use log::{error, info};

use super::packed::Packed;
use crate::bitstream::bitpacker::BitPacker;
use crate::error::HuffmanError;
use crate::huffman_coding::code_table::CodeTable;

/// Encode data with table. Every byte of data must have a code; a byte without one means
/// the table was built from other data and the call fails with UnknownSymbol.
pub fn compress(table: &CodeTable, data: &[u8]) -> Result<Packed, HuffmanError> {
    let mut bp = BitPacker::new(data.len());

    for &byte in data {
        let code = table.get(byte).ok_or_else(|| {
            error!("Byte {} has no code at stream position {}", byte, bp.loc());
            HuffmanError::UnknownSymbol(byte)
        })?;
        bp.out_bits(code.bits().iter().copied());
    }

    let (bytes, bit_count) = bp.finish();
    info!(
        "Compressed {} bytes to {} bytes ({} bits)",
        data.len(),
        bytes.len(),
        bit_count
    );
    Ok(Packed::new(bytes, bit_count))
}
