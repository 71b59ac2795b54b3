use log::{debug, error, info};

use crate::bitstream::bitreader::BitReader;
use crate::error::HuffmanError;
use crate::huffman_coding::tree::HuffmanTree;

/// Decode the first bit_count bits of packed by walking tree from the root: 0 goes left,
/// 1 goes right, and every leaf reached emits its byte and sends the walk back to the root.
///
/// bit_count is expected to end on a code boundary. If it does not, the bits of the
/// unfinished code are dropped.
pub fn decompress(
    tree: &HuffmanTree,
    packed: &[u8],
    bit_count: usize,
) -> Result<Vec<u8>, HuffmanError> {
    let mut br = BitReader::new(packed, bit_count).ok_or_else(|| {
        error!(
            "Asked to decode {} bits from {} bytes of packed data",
            bit_count,
            packed.len()
        );
        HuffmanError::StreamCorruption {
            bit: packed.len() * 8,
            reason: "bit count runs past the end of the packed data",
        }
    })?;

    // Grows with the decoded symbols; the packed size says little about the output size.
    let mut output = Vec::with_capacity(packed.len());
    let root = tree.root();
    let mut node = root;

    while let Some(bit) = br.bool_bit() {
        node = tree.child(node, bit).ok_or_else(|| {
            error!("No branch for bit {} at node {} {}", bit as u8, node, br.loc());
            HuffmanError::StreamCorruption {
                bit: br.position() - 1,
                reason: "no branch in the tree for this bit",
            }
        })?;
        if let Some(byte) = tree.symbol(node) {
            output.push(byte);
            node = root;
        }
    }

    if node != root {
        debug!("Dropped the bits of an unfinished code at the end of the stream");
    }
    info!(
        "Decompressed {} bits ({} bytes) to {} bytes",
        bit_count,
        packed.len(),
        output.len()
    );
    Ok(output)
}
