use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::info;

/// Record, Zip, Unzip, Table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Add the input files to the weight log.
    Record,
    /// Compress the input files.
    Zip,
    /// Decompress the input files.
    Unzip,
    /// Print the code table built from the weight log.
    Table,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Static Huffman compressor",
    long_about = "
    Codes are built from a weight log: a text file with the count of every byte value,
    one per line. Record some files into the log, then compress and decompress with the
    codes it gives. Compressing without a log records the input file first."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Coder name. The weight log defaults to <name>.wlog
    #[clap(short = 'n', long = "name", default_value = "huffc")]
    name: String,

    /// Weight log to use instead of <name>.wlog
    #[clap(short = 'w', long = "weights")]
    weights: Option<String>,

    /// Record byte frequencies of the input files into the weight log
    #[clap(short = 'r', long = "record")]
    record: bool,

    /// Perform compression on the input files (the default)
    #[clap(short = 'z', long = "zip")]
    compress: bool,

    /// Perform decompression on the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Print the code table
    #[clap(short = 't', long = "table")]
    table: bool,

    ///Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

#[derive(Debug)]
pub struct HuffOpts {
    /// Coder name, also the stem of the default weight log
    pub name: String,
    /// Explicit weight log path
    pub weights: Option<String>,
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Record/Zip/Unzip/Table
    pub op_mode: Mode,
    /// Log level, 0 (off) to 5 (trace)
    pub verbose: u8,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            name: "huffc".to_string(),
            weights: None,
            files: vec![],
            force_overwrite: false,
            op_mode: Mode::Zip,
            verbose: 3,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Args> for HuffOpts {
    /// When several mode flags are given, decompress wins over zip, zip over table, and
    /// table over record.
    fn from(args: Args) -> Self {
        let op_mode = if args.decompress {
            Mode::Unzip
        } else if args.compress {
            Mode::Zip
        } else if args.table {
            Mode::Table
        } else if args.record {
            Mode::Record
        } else {
            Mode::Zip
        };
        Self {
            name: args.name,
            weights: args.weights,
            files: args.files,
            force_overwrite: args.force,
            op_mode,
            verbose: args.v,
        }
    }
}

/// Parse the command line, set the log level, and report the settings.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from(Args::parse());

    // Set the log level
    match opts.verbose {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.weights {
        Some(w) => info!("Using weight log {}", w),
        None => info!("Using weight log {}.wlog", opts.name),
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> HuffOpts {
        HuffOpts::from(Args::try_parse_from(args).unwrap())
    }

    #[test]
    fn defaults() {
        let opts = parse(&["huffc", "a.txt"]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.name, "huffc");
        assert_eq!(opts.files, vec!["a.txt".to_string()]);
        assert_eq!(opts.weights, None);
        assert_eq!(opts.verbose, 3);
        assert!(!opts.force_overwrite);
    }

    #[test]
    fn mode_flags() {
        assert_eq!(parse(&["huffc", "-r", "a"]).op_mode, Mode::Record);
        assert_eq!(parse(&["huffc", "-t"]).op_mode, Mode::Table);
        assert_eq!(parse(&["huffc", "-d", "a.huff"]).op_mode, Mode::Unzip);
        assert_eq!(parse(&["huffc", "-r", "-d", "a"]).op_mode, Mode::Unzip);
        assert_eq!(Mode::Unzip.to_string(), "Unzip");
    }

    #[test]
    fn names_and_weights() {
        let opts = parse(&["huffc", "-n", "zpc", "-w", "w.wlog", "-f", "-v", "5", "x", "y"]);
        assert_eq!(opts.name, "zpc");
        assert_eq!(opts.weights.as_deref(), Some("w.wlog"));
        assert!(opts.force_overwrite);
        assert_eq!(opts.verbose, 5);
        assert_eq!(opts.files.len(), 2);
    }
}
