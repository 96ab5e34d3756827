//! Correlation analysis of normalized phosphoproteomics matrices.
//!
//! A [`Matrix`] of per-dataset, per-phosphosite normalized intensities is
//! collapsed to one column per gene, correlated column-against-column with
//! Spearman's rank correlation, pruned of empty rows and columns, and
//! rendered as a hierarchically-clustered heatmap:
//!
//! ```rust,ignore
//! # use clustermap::Matrix;
//! let corr = Matrix::load("NormalisedMatrix-Zscore.csv")?
//!     .group()
//!     .spearman()
//!     .prune();
//! corr.write("correlation_matrix.csv")?;
//! corr.cluster().render("corr_ordered.png", 2000)?;
//! ```

mod cluster;
mod correlate;
mod matrix;
mod render;

pub use correlate::{Correlation, Pruned};
pub use matrix::Matrix;

/// Errors produced while loading, correlating, or rendering matrices
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("plotting error: {0}")]
    Plot(String),
}
