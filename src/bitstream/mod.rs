//! The bitstream module is the bit level I/O for the coder.
//!
//! Huffman codes have no fixed width, so compressed data is built one bit at a time and packed
//! into bytes with the first code bit in the most significant position. The last byte is
//! padded with zero bits, and the exact number of code bits travels alongside the bytes so the
//! reader knows where the real data ends.
//!
pub mod bitpacker;
pub mod bitreader;
