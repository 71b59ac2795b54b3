//! The compression module ties the pieces together into a coding session.
//!
//! Compression happens in the following steps:
//! - Frequency count: Record how often each byte value occurs.
//! - Tree build: Repeatedly merge the two lightest nodes until a single root remains.
//! - Code table: Walk from each leaf to the root to find its prefix code.
//! - Bit packing: Replace each input byte with its code and pack the bits into bytes.
//!
//! Decompression does not use the code table. It walks the tree bit by bit, starting over at
//! the root every time a leaf is reached, and stops after exactly the number of bits the
//! compressor reported.
//!

pub mod coder;
pub mod compress;
pub mod decompress;
pub mod files;
pub mod packed;
