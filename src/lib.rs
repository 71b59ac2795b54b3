//! Static Huffman coder.
//!
//! Version 0.1.0
//!
//! Derives a prefix code from the byte frequencies of a message, builds the matching code
//! tree, and uses it to pack bytes into a bitstream and to restore them from that bitstream.
//!
//! A coder is a named session. Bytes are recorded (or a saved weight log is loaded), the tree
//! and code table are built once, and the coder then compresses and decompresses:
//!
//! ```
//! use huffman_coder::HuffmanCoder;
//!
//! let text = "this is an example of a huffman tree".as_bytes();
//! let mut coder = HuffmanCoder::new("demo")?;
//! coder.record(text);
//! coder.build_tree()?;
//! coder.build_code_table()?;
//!
//! let packed = coder.compress(text)?;
//! assert!(packed.bit_count < text.len() * 8);
//! assert_eq!(coder.decompress(&packed.bytes, packed.bit_count)?, text);
//! # Ok::<(), huffman_coder::HuffmanError>(())
//! ```
//!
//! The huffc binary wraps this for files:
//!
//! `$> huffc -r corpus.txt` records byte counts into huffc.wlog,
//! `$> huffc -z test.txt` creates test.txt.huff, and
//! `$> huffc -d test.txt.huff` restores test.txt.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::coder::HuffmanCoder;
pub use compression::packed::Packed;
pub use error::{HuffmanError, PersistenceError};
pub use huffman_coding::code_table::{Code, CodeTable};
pub use huffman_coding::tree::HuffmanTree;
pub use tools::freq_count::FrequencyTable;
