//! CLI entry point for replaying strokes onto target images

use clap::Parser;
use pointillize::io::cli::{Cli, FileProcessor};

fn main() -> pointillize::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
