//! The huffman module builds static Huffman codes from a byte frequency table.
//!
//! The tree is built greedily: every byte that occurs becomes a leaf weighted by its count,
//! and the two lightest nodes are merged under a new internal node until one root is left.
//! Ties between equal weights are broken by queue order, so the same frequencies always give
//! the same tree and the same codes.
//!
//! A code is the path from the root to a leaf, 0 for left and 1 for right.
//!

pub mod code_table;
pub mod priority_queue;
pub mod tree;
