use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of distinct byte values.
pub const RANGE_SIZE: usize = 256;

const READ_CHUNK: usize = 16_000;

/// Occurrence count for every byte value, indexed by the byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; RANGE_SIZE],
}

impl FrequencyTable {
    /// An all-zero table.
    pub fn new() -> Self {
        Self {
            counts: [0; RANGE_SIZE],
        }
    }

    /// Build a table from counts already known (e.g. loaded from a weight log).
    pub fn from_counts(counts: [u64; RANGE_SIZE]) -> Self {
        Self { counts }
    }

    /// Returns a frequency table of the input data.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.record(data);
        table
    }

    /// Add one to the counter of each byte in data. Repeated calls accumulate. A counter
    /// already at u64::MAX (only reachable from loaded counts) stays there.
    pub fn record(&mut self, data: &[u8]) {
        data.iter().for_each(|&el| {
            let count = &mut self.counts[el as usize];
            *count = count.saturating_add(1);
        });
    }

    /// Read a whole source and record every byte. Returns the number of bytes read.
    pub fn record_reader<R: Read>(&mut self, mut source: R) -> io::Result<usize> {
        let mut buf = vec![0_u8; READ_CHUNK];
        let mut total = 0;
        loop {
            let size = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(size) => size,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.record(&buf[..size]);
            total += size;
        }
        Ok(total)
    }

    /// Record every byte of the file at path.
    pub fn record_file(&mut self, path: &Path) -> io::Result<usize> {
        self.record_reader(File::open(path)?)
    }

    /// Count of byte values seen at least once.
    pub fn distinct_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counters, i.e. the number of bytes recorded. None if the sum does not fit
    /// in a u64, which loaded counts can cause.
    pub fn total(&self) -> Option<u64> {
        self.counts
            .iter()
            .try_fold(0_u64, |acc, &count| acc.checked_add(count))
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn counts(&self) -> &[u64; RANGE_SIZE] {
        &self.counts
    }

    /// (byte, count) for every byte with a non-zero count, in ascending byte order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn clear(&mut self) {
        self.counts = [0; RANGE_SIZE];
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record_counts_each_byte() {
        let table = FrequencyTable::from_bytes("this is an example of a huffman tree".as_bytes());
        assert_eq!(table.get(b' '), 7);
        assert_eq!(table.get(b'a'), 4);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.total(), Some(36));
        assert_eq!(table.distinct_count(), 16);
        let max = table.present().max_by_key(|&(_, c)| c).unwrap();
        assert_eq!(max.0, b' ');
    }

    #[test]
    fn record_accumulates() {
        let mut table = FrequencyTable::new();
        table.record(b"ab");
        table.record(b"bc");
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.total(), Some(4));
        assert_eq!(
            table.present().collect::<Vec<_>>(),
            vec![(b'a', 1), (b'b', 2), (b'c', 1)]
        );
    }

    #[test]
    fn empty_record_is_a_no_op() {
        let mut table = FrequencyTable::from_bytes(b"xyz");
        let before = table.clone();
        table.record(&[]);
        assert_eq!(table, before);

        let mut empty = FrequencyTable::new();
        empty.record(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.distinct_count(), 0);
    }

    #[test]
    fn record_reader_matches_record() {
        let data: Vec<u8> = (0..40_000_u32).map(|i| (i * 7 % 251) as u8).collect();
        let mut from_reader = FrequencyTable::new();
        let read = from_reader.record_reader(data.as_slice()).unwrap();
        assert_eq!(read, data.len());
        assert_eq!(from_reader, FrequencyTable::from_bytes(&data));
    }

    #[test]
    fn total_reports_overflow() {
        let mut counts = [0_u64; RANGE_SIZE];
        counts[0] = u64::MAX;
        let mut table = FrequencyTable::from_counts(counts);
        assert_eq!(table.total(), Some(u64::MAX));
        table.record(&[0]);
        assert_eq!(table.get(0), u64::MAX);
        table.record(&[1]);
        assert_eq!(table.total(), None);
    }
}
