//! File level operations behind the huffc binary.
//!
//! Compressed files hold only the bit count and the packed bytes. The codes are rebuilt from
//! the weight log each run, so the same log must be used to decompress.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use super::coder::HuffmanCoder;
use super::packed::Packed;
use crate::error::{HuffmanError, PersistenceError};
use crate::tools::cli::{HuffOpts, Mode};

/// Suffix of compressed files.
pub const HUFF_SUFFIX: &str = ".huff";

/// Run the operation selected in opts.
pub fn run(opts: &HuffOpts) -> io::Result<()> {
    let mut coder = HuffmanCoder::new(&opts.name)?;
    let weights = weight_path(opts, &coder);
    match opts.op_mode {
        Mode::Record => record(&mut coder, &weights, &opts.files),
        Mode::Table => {
            println!("{}", table(&mut coder, &weights)?);
            Ok(())
        }
        Mode::Zip => zip(&mut coder, &weights, &opts.files, opts.force_overwrite),
        Mode::Unzip => unzip(&mut coder, &weights, &opts.files, opts.force_overwrite),
    }
}

fn weight_path(opts: &HuffOpts, coder: &HuffmanCoder) -> PathBuf {
    opts.weights
        .as_ref()
        .map_or_else(|| coder.weight_log_path(), PathBuf::from)
}

/// Load the weight log if there is one. Returns false if it does not exist yet.
fn load_if_present(coder: &mut HuffmanCoder, weights: &Path) -> Result<bool, HuffmanError> {
    match coder.load_frequencies(Some(weights)) {
        Ok(()) => Ok(true),
        Err(HuffmanError::Persistence(PersistenceError::NotFound(_))) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Add files to the weight log, creating it if needed.
pub fn record(coder: &mut HuffmanCoder, weights: &Path, files: &[String]) -> io::Result<()> {
    if !load_if_present(coder, weights)? {
        info!("Starting a new weight log {}", weights.display());
    }
    for file in files {
        coder.record_file(Path::new(file))?;
    }
    coder.save_frequencies_to(weights)?;
    Ok(())
}

/// Build the codes from the weight log and return the code table as text.
pub fn table(coder: &mut HuffmanCoder, weights: &Path) -> io::Result<String> {
    coder.load_frequencies(Some(weights))?;
    coder.build()?;
    if let Some(tree) = coder.tree() {
        debug!("\n{}", tree.structure());
    }
    Ok(coder
        .code_table()
        .map(|t| t.to_string())
        .unwrap_or_default())
}

/// Compress each file to <file>.huff. Without a weight log, the input files are recorded into
/// a new one.
pub fn zip(
    coder: &mut HuffmanCoder,
    weights: &Path,
    files: &[String],
    force: bool,
) -> io::Result<()> {
    if !load_if_present(coder, weights)? {
        warn!(
            "No weight log at {}, recording the input to create one",
            weights.display()
        );
        for file in files {
            coder.record_file(Path::new(file))?;
        }
        coder.save_frequencies_to(weights)?;
    }
    coder.build()?;

    for file in files {
        let data = fs::read(file)?;
        let packed = coder.compress(&data)?;
        let out_name = format!("{}{}", file, HUFF_SUFFIX);
        let mut out = BufWriter::new(create_output(Path::new(&out_name), force)?);
        packed.write_to(&mut out)?;
        out.flush()?;
        info!(
            "{}: {} -> {} bytes, written to {}",
            file,
            data.len(),
            packed.bytes.len() + 8,
            out_name
        );
    }
    Ok(())
}

/// Decompress each <file>.huff back to <file>. A name without the suffix gets ".out" added.
pub fn unzip(
    coder: &mut HuffmanCoder,
    weights: &Path,
    files: &[String],
    force: bool,
) -> io::Result<()> {
    coder.load_frequencies(Some(weights))?;
    coder.build()?;

    for file in files {
        let packed = Packed::read_from(&mut BufReader::new(File::open(file)?))?;
        let data = coder.decompress_packed(&packed)?;
        let out_name = match file.strip_suffix(HUFF_SUFFIX) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("{}.out", file),
        };
        let mut out = create_output(Path::new(&out_name), force)?;
        out.write_all(&data)?;
        info!("{}: {} bytes written to {}", file, data.len(), out_name);
    }
    Ok(())
}

fn create_output(path: &Path, force: bool) -> io::Result<File> {
    if path.exists() && !force {
        error!(
            "Output file {} already exists, use -f to overwrite",
            path.display()
        );
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        ));
    }
    File::create(path)
}
