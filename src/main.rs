//! Command-line interface for cap-features

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::io::{self, Write};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "cap-features")]
#[command(author, version, about = "Print the cap_features blocks of XML documents", long_about = None)]
struct Cli {
    /// XML documents to process, in order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    log::debug!("processing {} file(s)", cli.files.len());

    if let Err(e) = run(&cli.files) {
        log::debug!("aborting: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(files: &[PathBuf]) -> cap_features::Result<()> {
    // Stdout is line buffered: each report line reaches the pipe as soon as
    // it is produced.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    cap_features::extract_files(files, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
