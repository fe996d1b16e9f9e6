//! `succinct-msa` CLI: build, persist, and inspect succinct MSA encodings.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use succinct_msa::alignment::SuccinctAlignment;
use succinct_msa::config::BuildConfig;

#[derive(Debug, Parser)]
#[command(name = "succinct-msa")]
#[command(about = "Succinct column-oriented encoding for multiple sequence alignments", long_about = None)]
#[command(version)]
struct Cli {
    /// Input FASTA file, or a load directory/archive when `--load` is set.
    #[arg(short, long)]
    file: PathBuf,

    /// Batch width `B`: number of columns built per streaming pass.
    #[arg(short = 'n', long, default_value_t = 1000)]
    ncols: usize,

    /// Input is gzip-compressed.
    #[arg(short, long)]
    compressed: bool,

    /// Print `(L, S)` and `size_in_bytes()` after build or load.
    #[arg(short, long)]
    infos: bool,

    /// Persist the built alignment.
    #[arg(short, long)]
    save: bool,

    /// Directory to persist into when `--save` is set.
    #[arg(long = "save_dir", short = 'd')]
    save_dir: Option<PathBuf>,

    /// Load a previously saved alignment from `--file` instead of building.
    #[arg(short, long)]
    load: bool,
}

fn run(cli: Cli) -> Result<()> {
    let alignment = if cli.load {
        eprintln!("loading alignment from {}", cli.file.display());
        SuccinctAlignment::load(&cli.file)
            .with_context(|| format!("loading alignment from {}", cli.file.display()))?
    } else {
        eprintln!(
            "building alignment from {} (batch width {})",
            cli.file.display(),
            cli.ncols
        );
        let config = BuildConfig::default().batch_width(cli.ncols);
        SuccinctAlignment::build(&cli.file, cli.compressed, &config)
            .with_context(|| format!("building alignment from {}", cli.file.display()))?
    };

    if cli.infos {
        let (cols, rows) = alignment.info();
        println!("L={cols} S={rows} size_in_bytes={}", alignment.size_in_bytes());
    }

    if cli.save {
        let dir = cli
            .save_dir
            .as_ref()
            .context("--save requires --save_dir")?;
        eprintln!("saving alignment to {}", dir.display());
        alignment
            .store(dir)
            .with_context(|| format!("saving alignment to {}", dir.display()))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
