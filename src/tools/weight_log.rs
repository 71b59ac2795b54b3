//! The weight log is the persisted form of a frequency table: a text file with one line per
//! byte value, 0 through 255, each line holding the decimal count for that byte.
//!
//! Loading is permissive. A line that does not parse as a count is read as zero, and a file
//! with fewer than 256 lines leaves the remaining counts at zero. Only a missing or unreadable
//! file is an error.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use super::freq_count::{FrequencyTable, RANGE_SIZE};
use crate::error::PersistenceError;

/// Suffix appended to a coder name to get its default weight log path.
pub const WEIGHT_LOG_SUFFIX: &str = ".wlog";

/// Default weight log path for a coder called name.
pub fn default_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", name, WEIGHT_LOG_SUFFIX))
}

/// Write all 256 counters to path, one per line.
pub fn save(table: &FrequencyTable, path: &Path) -> Result<(), PersistenceError> {
    let unwritable = |e: std::io::Error| {
        error!("Could not write weight log {}: {}", path.display(), e);
        PersistenceError::Unwritable(path.to_path_buf(), e)
    };

    let file = File::create(path).map_err(unwritable)?;
    let mut out = BufWriter::new(file);
    for count in table.counts() {
        writeln!(out, "{}", count).map_err(unwritable)?;
    }
    out.flush().map_err(unwritable)?;

    info!(
        "Saved weight log {} ({} byte values present)",
        path.display(),
        table.distinct_count()
    );
    Ok(())
}

/// Read a frequency table from path. Nothing is returned unless the whole file was read.
pub fn load(path: &Path) -> Result<FrequencyTable, PersistenceError> {
    let file = File::open(path).map_err(|e| {
        error!("Could not open weight log {}: {}", path.display(), e);
        PersistenceError::from_read(path.to_path_buf(), e)
    })?;
    let table = parse(BufReader::new(file))
        .map_err(|e| PersistenceError::Unreadable(path.to_path_buf(), e))?;
    info!(
        "Loaded weight log {} ({} byte values present)",
        path.display(),
        table.distinct_count()
    );
    Ok(table)
}

/// Parse weight log lines from any buffered source. Only a failed read is an error; a line
/// that is not a decimal count, UTF-8 or not, reads as 0.
pub fn parse<R: BufRead>(source: R) -> std::io::Result<FrequencyTable> {
    let mut counts = [0_u64; RANGE_SIZE];
    let mut lines = source.split(b'\n');
    for (byte, count) in counts.iter_mut().enumerate() {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                warn!("Weight log ends at line {}, remaining counts set to 0", byte);
                break;
            }
        };
        *count = std::str::from_utf8(&line)
            .ok()
            .and_then(|text| text.trim().parse::<u64>().ok())
            .unwrap_or_else(|| {
                warn!(
                    "Bad weight log line {} ({:?}), count set to 0",
                    byte + 1,
                    String::from_utf8_lossy(&line)
                );
                0
            });
    }
    Ok(FrequencyTable::from_counts(counts))
}
