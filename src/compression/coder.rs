use std::path::{Path, PathBuf};

use log::{error, info, warn};

use super::compress::compress;
use super::decompress::decompress;
use super::packed::Packed;
use crate::error::{HuffmanError, PersistenceError};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::freq_count::FrequencyTable;
use crate::tools::weight_log;

/// Size of the name buffer: names must be shorter than this many bytes. The name also forms
/// the default weight log file name, so it is held to the usual file name limit.
pub const NAME_MAX: usize = 255;

/// A named Huffman coding session: frequencies are recorded, the tree and code table are
/// built once, and the same coder then compresses and decompresses.
///
/// Building the tree drops any earlier code table. Once built, compress and decompress only
/// read the coder, so a `&HuffmanCoder` can be shared between threads.
#[derive(Debug, Clone)]
pub struct HuffmanCoder {
    name: String,
    freqs: FrequencyTable,
    tree: Option<HuffmanTree>,
    code_table: Option<CodeTable>,
}

impl HuffmanCoder {
    /// Create an empty coder. Fails with NameTooLong unless name is under NAME_MAX bytes.
    pub fn new(name: &str) -> Result<Self, HuffmanError> {
        if name.len() >= NAME_MAX {
            error!("Coder name of {} bytes is too long", name.len());
            return Err(HuffmanError::NameTooLong {
                len: name.len(),
                max: NAME_MAX - 1,
            });
        }
        Ok(Self {
            name: name.to_string(),
            freqs: FrequencyTable::new(),
            tree: None,
            code_table: None,
        })
    }

    /// Forget frequencies, tree and code table. The name is kept.
    pub fn reset(&mut self) {
        self.freqs.clear();
        self.tree = None;
        self.code_table = None;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freqs
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn code_table(&self) -> Option<&CodeTable> {
        self.code_table.as_ref()
    }

    /// Add data to the frequency counts.
    pub fn record(&mut self, data: &[u8]) {
        self.freqs.record(data);
    }

    /// Add the whole content of a file to the frequency counts.
    pub fn record_file(&mut self, path: &Path) -> Result<usize, HuffmanError> {
        let size = self
            .freqs
            .record_file(path)
            .map_err(|e| PersistenceError::from_read(path.to_path_buf(), e))?;
        info!("Recorded {} bytes from {}", size, path.display());
        Ok(size)
    }

    /// Where save_frequencies writes and load_frequencies(None) reads.
    pub fn weight_log_path(&self) -> PathBuf {
        weight_log::default_path(&self.name)
    }

    /// Save the frequency counts to the default weight log (`<name>.wlog`).
    pub fn save_frequencies(&self) -> Result<PathBuf, HuffmanError> {
        let path = self.weight_log_path();
        self.save_frequencies_to(&path)?;
        Ok(path)
    }

    pub fn save_frequencies_to(&self, path: &Path) -> Result<(), HuffmanError> {
        weight_log::save(&self.freqs, path)?;
        Ok(())
    }

    /// Replace the frequency counts with those from a weight log (the default one when path
    /// is None) and drop the tree and code table built from the old counts. On failure the
    /// coder is left as it was.
    pub fn load_frequencies(&mut self, path: Option<&Path>) -> Result<(), HuffmanError> {
        let path = path.map_or_else(|| self.weight_log_path(), Path::to_path_buf);
        self.freqs = weight_log::load(&path)?;
        if self.tree.take().is_some() {
            info!("Frequencies reloaded, tree and code table must be rebuilt");
        }
        self.code_table = None;
        Ok(())
    }

    /// Build the tree from the current frequencies, replacing any earlier tree and dropping
    /// the code table that went with it.
    pub fn build_tree(&mut self) -> Result<&HuffmanTree, HuffmanError> {
        self.code_table = None;
        self.tree = None;
        let tree = HuffmanTree::build(&self.freqs).map_err(|e| {
            if let HuffmanError::EmptyAlphabet = e {
                warn!("Coder {} has no recorded bytes", self.name);
            }
            e
        })?;
        Ok(&*self.tree.insert(tree))
    }

    /// Build the code table from the tree. The tree must be built first.
    pub fn build_code_table(&mut self) -> Result<&CodeTable, HuffmanError> {
        let tree = self.tree.as_ref().ok_or(HuffmanError::TreeNotBuilt)?;
        let table = CodeTable::build(tree);
        Ok(&*self.code_table.insert(table))
    }

    /// Build the tree and then the code table.
    pub fn build(&mut self) -> Result<&CodeTable, HuffmanError> {
        self.build_tree()?;
        self.build_code_table()
    }

    /// Encode data with the code table.
    pub fn compress(&self, data: &[u8]) -> Result<Packed, HuffmanError> {
        let table = self
            .code_table
            .as_ref()
            .ok_or(HuffmanError::CodeTableNotBuilt)?;
        compress(table, data)
    }

    /// Decode the first bit_count bits of packed with the tree.
    pub fn decompress(&self, packed: &[u8], bit_count: usize) -> Result<Vec<u8>, HuffmanError> {
        let tree = self.tree.as_ref().ok_or(HuffmanError::TreeNotBuilt)?;
        decompress(tree, packed, bit_count)
    }

    /// Decode a Packed produced by compress.
    pub fn decompress_packed(&self, packed: &Packed) -> Result<Vec<u8>, HuffmanError> {
        self.decompress(&packed.bytes, packed.bit_count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const SAMPLE: &str = "this is an example of a huffman tree";

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("huffc-coder-{}-{}.wlog", tag, std::process::id()))
    }

    fn built(data: &[u8]) -> HuffmanCoder {
        let mut coder = HuffmanCoder::new("test").unwrap();
        coder.record(data);
        coder.build().unwrap();
        coder
    }

    #[test]
    fn name_limit() {
        assert!(HuffmanCoder::new("zpc").is_ok());
        assert!(HuffmanCoder::new(&"n".repeat(NAME_MAX - 1)).is_ok());
        assert!(matches!(
            HuffmanCoder::new(&"n".repeat(NAME_MAX)),
            Err(HuffmanError::NameTooLong { len: 255, max: 254 })
        ));
    }

    #[test]
    fn sample_sentence_round_trip() {
        let coder = built(SAMPLE.as_bytes());
        assert_eq!(coder.tree().unwrap().leaf_count(), 16);
        let packed = coder.compress(SAMPLE.as_bytes()).unwrap();
        assert!(packed.bit_count < SAMPLE.len() * 8);
        let out = coder.decompress(&packed.bytes, packed.bit_count).unwrap();
        assert_eq!(out, SAMPLE.as_bytes());
        assert_eq!(out.len(), 36);
    }

    #[test]
    fn single_symbol_round_trip() {
        let coder = built(b"aaaa");
        let packed = coder.compress(b"aaaa").unwrap();
        assert_eq!(packed.bit_count, 4);
        assert_eq!(packed.bytes, [0]);
        assert_eq!(coder.decompress_packed(&packed).unwrap(), b"aaaa");
    }

    #[test]
    fn empty_record_then_build_fails() {
        let mut coder = HuffmanCoder::new("empty").unwrap();
        coder.record(&[]);
        assert!(coder.frequencies().is_empty());
        assert!(matches!(coder.build_tree(), Err(HuffmanError::EmptyAlphabet)));
        assert!(coder.tree().is_none());
    }

    #[test]
    fn operations_need_their_prerequisites() {
        let mut coder = HuffmanCoder::new("order").unwrap();
        coder.record(b"abc");
        assert!(matches!(
            coder.build_code_table(),
            Err(HuffmanError::TreeNotBuilt)
        ));
        assert!(matches!(
            coder.compress(b"abc"),
            Err(HuffmanError::CodeTableNotBuilt)
        ));
        assert!(matches!(
            coder.decompress(&[0], 1),
            Err(HuffmanError::TreeNotBuilt)
        ));
        coder.build_tree().unwrap();
        assert!(coder.code_table().is_none());
        coder.build_code_table().unwrap();
        coder.build_tree().unwrap();
        assert!(coder.code_table().is_none());
    }

    #[test]
    fn table_from_other_data_works_when_every_byte_is_covered() {
        let coder = built(SAMPLE.as_bytes());
        let covered = b"a fine tree is a nut";
        let packed = coder.compress(covered).unwrap();
        assert_eq!(coder.decompress_packed(&packed).unwrap(), covered);
    }

    #[test]
    fn unknown_byte_is_an_invariant_violation() {
        let coder = built(b"abc");
        let err = coder.compress(b"abz").unwrap_err();
        assert!(matches!(err, HuffmanError::UnknownSymbol(b'z')));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn random_round_trips() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let len = rng.random_range(1..4000);
            let alphabet = rng.random_range(1..=256_usize);
            let data: Vec<u8> = (0..len)
                .map(|_| rng.random_range(0..alphabet) as u8)
                .collect();
            let coder = built(&data);
            let packed = coder.compress(&data).unwrap();
            assert_eq!(coder.decompress_packed(&packed).unwrap(), data);
        }
    }

    #[test]
    fn skewed_distribution_round_trip() {
        // Doubling weights give one code per tree level.
        let mut data = Vec::new();
        for (i, byte) in (b'a'..=b'p').enumerate() {
            data.extend(std::iter::repeat(byte).take(1 << i));
        }
        let coder = built(&data);
        assert_eq!(coder.code_table().unwrap().max_len(), 15);
        let packed = coder.compress(&data).unwrap();
        assert_eq!(coder.decompress_packed(&packed).unwrap(), data);
    }

    #[test]
    fn two_runs_give_identical_codes() {
        let a = built(SAMPLE.as_bytes());
        let b = built(SAMPLE.as_bytes());
        assert_eq!(a.tree(), b.tree());
        assert_eq!(a.code_table(), b.code_table());
        assert_eq!(
            a.compress(SAMPLE.as_bytes()).unwrap(),
            b.compress(SAMPLE.as_bytes()).unwrap()
        );
    }

    #[test]
    fn shared_coder_across_threads() {
        let coder = built(SAMPLE.as_bytes());
        let inputs = ["this is a tree", "an example", "huffman of a"];
        std::thread::scope(|s| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|input| {
                    let coder = &coder;
                    s.spawn(move || {
                        let packed = coder.compress(input.as_bytes()).unwrap();
                        coder.decompress_packed(&packed).unwrap()
                    })
                })
                .collect();
            for (handle, input) in handles.into_iter().zip(inputs) {
                assert_eq!(handle.join().unwrap(), input.as_bytes());
            }
        });
    }

    #[test]
    fn frequencies_survive_save_and_load() {
        let path = temp_path("save-load");
        let mut coder = HuffmanCoder::new("saver").unwrap();
        coder.record(SAMPLE.as_bytes());
        coder.save_frequencies_to(&path).unwrap();

        let mut other = HuffmanCoder::new("loader").unwrap();
        other.load_frequencies(Some(&path)).unwrap();
        assert_eq!(other.frequencies(), coder.frequencies());

        other.build().unwrap();
        coder.build().unwrap();
        assert_eq!(other.code_table(), coder.code_table());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn default_weight_log_path() {
        let dir = std::env::temp_dir().join(format!("huffc-coder-default-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let name = dir.join("zpc");
        let mut coder = HuffmanCoder::new(name.to_str().unwrap()).unwrap();
        coder.record(b"abc");
        let path = coder.save_frequencies().unwrap();
        assert_eq!(path, dir.join("zpc.wlog"));

        coder.reset();
        assert!(coder.frequencies().is_empty());
        coder.load_frequencies(None).unwrap();
        assert_eq!(coder.frequencies().total(), Some(3));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_load_keeps_counts() {
        let path = temp_path("never-written");
        let _ = std::fs::remove_file(&path);
        let mut coder = HuffmanCoder::new("keeper").unwrap();
        coder.record(b"keep me");
        let before = coder.frequencies().clone();
        let err = coder.load_frequencies(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::Persistence(PersistenceError::NotFound(_))
        ));
        assert!(!err.is_invariant_violation());
        assert_eq!(coder.frequencies(), &before);
    }

    #[test]
    fn loading_drops_the_old_tree_and_table() {
        let path = temp_path("reload");
        let mut coder = HuffmanCoder::new("reload").unwrap();
        coder.record(b"xyz");
        coder.save_frequencies_to(&path).unwrap();

        coder.reset();
        coder.record(SAMPLE.as_bytes());
        coder.build().unwrap();
        coder.load_frequencies(Some(&path)).unwrap();
        assert!(coder.tree().is_none());
        assert!(coder.code_table().is_none());
        assert!(matches!(
            coder.compress(b"xyz"),
            Err(HuffmanError::CodeTableNotBuilt)
        ));

        coder.build().unwrap();
        let packed = coder.compress(b"xyz").unwrap();
        assert_eq!(coder.decompress_packed(&packed).unwrap(), b"xyz");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn overflowing_weight_log_is_rejected() {
        let path = temp_path("overflow");
        std::fs::write(&path, "18446744073709551615\n18446744073709551615\n").unwrap();
        let mut coder = HuffmanCoder::new("overflow").unwrap();
        coder.load_frequencies(Some(&path)).unwrap();
        let err = coder.build().unwrap_err();
        assert!(matches!(err, HuffmanError::WeightOverflow));
        assert!(coder.tree().is_none());
        let e: std::io::Error = err.into();
        assert_eq!(e.kind(), std::io::ErrorKind::InvalidInput);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn record_file_counts_bytes() {
        let path = temp_path("record-file");
        std::fs::write(&path, SAMPLE).unwrap();
        let mut coder = HuffmanCoder::new("file").unwrap();
        assert_eq!(coder.record_file(&path).unwrap(), SAMPLE.len());
        assert_eq!(coder.frequencies(), &FrequencyTable::from_bytes(SAMPLE.as_bytes()));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            coder.record_file(&path),
            Err(HuffmanError::Persistence(PersistenceError::NotFound(_)))
        ));
    }
}
