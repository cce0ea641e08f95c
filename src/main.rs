//! CLI entry point for the ASCII autostereogram generator

use clap::Parser;
use textstereo::io::cli::{Cli, FileProcessor};

fn main() -> textstereo::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
