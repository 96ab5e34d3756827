//! Load a reference proteome from a local FASTA file
//!
//! The reference is treated purely as a lookup table: given a peptide
//! backbone sequence, find the first entry (in file order) whose protein
//! sequence contains it, the zero-based offset of that match, and the gene
//! symbol embedded in the entry's description line as a `GN=<symbol>` token.
//!
//! # Example
//!
//! ```rust,ignore
//! # use uniprot::Fasta;
//! let db = Fasta::open("UP000005640_9606.fasta")?;
//! let pos = db.position("SVEPPLSQETFSDLWK");
//! let gene = db.gene_symbol("SVEPPLSQETFSDLWK");
//! ```

pub mod fasta;

pub use fasta::{Entry, Fasta};
