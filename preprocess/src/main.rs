//! Command line front-end for the phosphoproteomics preprocessing tools.
//!
//! `preprocess clean` reduces a raw search-engine export to a deduplicated,
//! phosphosite-keyed intensity table. `preprocess correlate` turns a
//! normalized intensity matrix into a gene-level Spearman correlation
//! matrix and a clustered heatmap.
use anyhow::Context;
use clap::{Parser, Subcommand};
use clustermap::Matrix;
use phospho::{Filter, Raw, RowFilter};
use std::path::PathBuf;
use uniprot::Fasta;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a raw phosphoproteomics dataset into a phosphosite-keyed CSV
    Clean {
        /// Raw dataset (delimited, with named columns)
        #[arg(long)]
        dataset: PathBuf,

        /// Reference proteome FASTA
        #[arg(long)]
        fasta: PathBuf,

        /// Cleaned output CSV
        #[arg(long)]
        output: PathBuf,

        /// Modification annotation to retain
        #[arg(long, default_value = "Phospho (STY)")]
        modification: String,

        /// Minimum site localization probability (exclusive)
        #[arg(long, default_value_t = 0.85)]
        probability: f64,
    },

    /// Correlate grouped gene columns of a normalized matrix and render a
    /// clustered heatmap
    Correlate {
        /// Normalized intensity matrix with a DatasetName index column
        #[arg(long)]
        matrix: PathBuf,

        /// Output CSV for the correlation matrix
        #[arg(long)]
        output: PathBuf,

        /// Output PNG for the clustered heatmap
        #[arg(long)]
        heatmap: PathBuf,

        /// Heatmap edge length in pixels
        #[arg(long, default_value_t = 2000)]
        size: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Clean {
            dataset,
            fasta,
            output,
            modification,
            probability,
        } => {
            let db = Fasta::open(&fasta).with_context(|| {
                format!("failed to load reference proteome `{}`", fasta.display())
            })?;

            let filters = Filter::new()
                .add_row_filter(RowFilter::Modification(&modification))
                .add_row_filter(RowFilter::SingleSite)
                .add_row_filter(RowFilter::SiteProbability(probability));

            Raw::load(&dataset)
                .with_context(|| format!("failed to load dataset `{}`", dataset.display()))?
                .filter(&filters)
                .annotate(&db)
                .identify()
                .log2()
                .aggregate()
                .write(&output)
                .with_context(|| format!("failed to write `{}`", output.display()))?;
        }

        Command::Correlate {
            matrix,
            output,
            heatmap,
            size,
        } => {
            let corr = Matrix::load(&matrix)
                .with_context(|| format!("failed to load matrix `{}`", matrix.display()))?
                .group()
                .spearman()
                .prune();

            corr.write(&output)
                .with_context(|| format!("failed to write `{}`", output.display()))?;

            corr.cluster()
                .render(&heatmap, size)
                .with_context(|| format!("failed to render `{}`", heatmap.display()))?;
        }
    }

    Ok(())
}
