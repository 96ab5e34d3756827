//! Resolve the modified residue, its protein offset, and the parent gene
//! symbol for each filtered row
use crate::{Raw, Row};
use log::info;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use uniprot::Fasta;

/// A row annotated with its resolved phosphosite
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedRow {
    pub row: Row,
    /// The single residue carrying the modification marker
    pub residue: char,
    /// Zero-based offset of the row's plain sequence within the first
    /// reference entry containing it; `None` if no entry matches
    pub position: Option<usize>,
    /// Gene symbol resolved from the reference description lines; `None`
    /// if no matching entry carries a `GN=` token
    pub gene: Option<String>,
}

/// Filtered rows annotated against a reference proteome
#[derive(Clone, Debug, Default)]
pub struct Annotated {
    pub rows: Vec<AnnotatedRow>,
    pub channels: Vec<String>,
}

/// Extract the residue letter immediately preceding a `(ph)` marker.
///
/// Rows with zero or more than one marked residue are ambiguous and yield
/// `None`.
fn modified_residue(marker: &Regex, modified_sequence: &str) -> Option<char> {
    let mut residues = marker
        .captures_iter(modified_sequence)
        .filter_map(|cap| cap[1].chars().next());
    match (residues.next(), residues.next()) {
        (Some(residue), None) => Some(residue),
        _ => None,
    }
}

impl Raw {
    /// Annotate every row against `fasta`, dropping rows whose modified
    /// residue is ambiguous and rows carrying a multi-gene annotation.
    ///
    /// Each distinct plain sequence is scanned against the reference once;
    /// per-row results are read back from the memoized scan. Scans run in
    /// parallel but the reference is always walked in file order, so the
    /// first matching entry wins regardless of thread count.
    pub fn annotate(self, fasta: &Fasta) -> Annotated {
        let marker = Regex::new(r"([A-Z])\(ph\)").unwrap();
        let total = self.rows.len();

        let rows = self
            .rows
            .into_iter()
            .filter_map(|mut row| {
                let residue = modified_residue(&marker, &row.modified_sequence)?;
                if row.gene_names.contains(';') {
                    return None;
                }
                row.sequence = row.sequence.replace('_', "");
                Some((row, residue))
            })
            .collect::<Vec<_>>();

        let distinct = rows
            .iter()
            .map(|(row, _)| row.sequence.as_str())
            .collect::<HashSet<&str>>();

        let memo = distinct
            .into_par_iter()
            .map(|seq| {
                (
                    seq.to_string(),
                    (
                        fasta.position(seq),
                        fasta.gene_symbol(seq).map(String::from),
                    ),
                )
            })
            .collect::<HashMap<String, (Option<usize>, Option<String>)>>();

        let rows = rows
            .into_iter()
            .map(|(row, residue)| {
                let (position, gene) = memo
                    .get(&row.sequence)
                    .cloned()
                    .unwrap_or((None, None));
                AnnotatedRow {
                    row,
                    residue,
                    position,
                    gene,
                }
            })
            .collect::<Vec<AnnotatedRow>>();

        info!(
            "{} of {} rows carry an unambiguous single-gene phosphosite",
            rows.len(),
            total
        );

        Annotated {
            rows,
            channels: self.channels,
        }
    }
}
