//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huffman_coder::compression::files::run;
use huffman_coder::tools::cli::huffopts_init;

use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

fn main() -> Result<(), std::io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let options = huffopts_init();

    //----- Figure how what we need to do and go do it
    let result = run(&options);

    info!("Done.\n");
    result
}
