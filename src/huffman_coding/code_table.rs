//! Turns a built tree into the byte -> code mapping used when compressing.
//!
//! Each code is found by walking from the leaf up to the root, noting a 0 for every left
//! branch and a 1 for every right branch, then reversing the result so it reads root first.
//! Codes can be as long as the tree is deep (up to 255 bits for a badly skewed tree), so
//! they are kept as bit vectors rather than packed into an integer.

use std::fmt::{Display, Formatter};

use log::{debug, info, trace};

use super::tree::HuffmanTree;
use crate::error::HuffmanError;
use crate::tools::freq_count::{FrequencyTable, RANGE_SIZE};

/// One prefix code, first bit (nearest the root) first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if self is a prefix of other (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code for every byte value; bytes missing from the tree have none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; RANGE_SIZE],
}

impl CodeTable {
    /// Derive the code of every leaf of tree, visiting leaves in ascending byte order.
    pub fn build(tree: &HuffmanTree) -> Self {
        let mut codes: [Option<Code>; RANGE_SIZE] = std::array::from_fn(|_| None);

        let leaves = tree.leaves().iter().filter_map(|&l| tree.symbol(l).map(|b| (l, b)));
        for (leaf, byte) in leaves {
            let mut bits: Vec<bool> = tree.path_to_root(leaf).collect();
            bits.reverse();
            let code = Code { bits };
            trace!("{:?} ({}) -> {}", byte as char, byte, code);
            codes[byte as usize] = Some(code);
        }

        let table = Self { codes };
        info!(
            "Code table built: {} codes, longest {} bits",
            table.len(),
            table.max_len()
        );
        debug!("Code table:\n{}", table);
        table
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// (byte, code) for every byte that has a code, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, code)| code.as_ref().map(|c| (i as u8, c)))
    }

    /// Number of bytes with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.is_none())
    }

    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Bits needed to encode data with the given frequencies. UnknownSymbol if a counted
    /// byte has no code, WeightOverflow if the bit count does not fit in a u64.
    pub fn encoded_bits(&self, freqs: &FrequencyTable) -> Result<u64, HuffmanError> {
        freqs.present().try_fold(0_u64, |acc, (byte, count)| {
            let code = self.get(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
            count
                .checked_mul(code.len() as u64)
                .and_then(|bits| acc.checked_add(bits))
                .ok_or(HuffmanError::WeightOverflow)
        })
    }
}

impl Display for CodeTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (byte, code) in self.iter() {
            writeln!(f, "{:>3} {:?}\t{}", byte, byte as char, code)?;
        }
        Ok(())
    }
}
