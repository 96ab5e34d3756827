//! FASTA parsing and ordered sequence lookup
use memchr::{memchr_iter, Memchr};
use std::fs::File;
use std::io::{self, prelude::*};
use std::path::Path;
use std::str;

/// Generalized wrapper around [`Memchr`] iterator for splitting `&[u8]`
/// slices by a byte.
struct Pitchfork<'a> {
    pos: usize,
    haystack: &'a [u8],
    inner: Memchr<'a>,
}

impl<'a> Pitchfork<'a> {
    pub fn new(needle: u8, haystack: &'a [u8]) -> Self {
        Self {
            pos: 0,
            haystack,
            inner: memchr_iter(needle, haystack),
        }
    }
}

impl<'a> Iterator for Pitchfork<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let end = match self.inner.next() {
            Some(e) => e,
            None => {
                if self.pos < self.haystack.len() {
                    self.haystack.len()
                } else {
                    return None;
                }
            }
        };
        let slice = &self.haystack[self.pos..end];
        self.pos = end + 1;
        Some(slice)
    }
}

/// A single reference proteome entry
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// UniProt accession, e.g. `P04637` from a `sp|P04637|P53_HUMAN` header
    pub accession: String,
    /// Full description line, without the leading `>`
    pub description: String,
    /// Protein sequence, concatenated across wrapped lines
    pub sequence: String,
}

impl Entry {
    /// Extract the gene symbol from the `GN=<symbol>` token of the
    /// description line. Returns `None` if the token is absent or empty.
    pub fn gene_symbol(&self) -> Option<&str> {
        let start = self.description.find("GN=")? + 3;
        let rest = &self.description[start..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end == 0 {
            None
        } else {
            Some(&rest[..end])
        }
    }
}

/// A reference proteome, preserving the order of entries in the source file.
///
/// Order matters: lookups return the *first* entry containing a query
/// sequence, so two databases with the same entries in a different order are
/// not interchangeable.
#[derive(Debug, Clone, Default)]
pub struct Fasta {
    pub entries: Vec<Entry>,
}

fn accession(description: &str) -> &str {
    let first = description.split_whitespace().next().unwrap_or(description);
    let mut fields = first.split('|');
    match (fields.next(), fields.next()) {
        (_, Some(acc)) => acc,
        (Some(token), _) => token,
        _ => description,
    }
}

impl Fasta {
    /// Read and parse a FASTA file
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Fasta> {
        let mut buf = Vec::new();
        File::open(path)?.read_to_end(&mut buf)?;
        Fasta::from_bytes(&buf)
    }

    /// Parse FASTA data from an in-memory buffer
    pub fn from_bytes(buf: &[u8]) -> io::Result<Fasta> {
        let invalid = |_| io::Error::from(io::ErrorKind::InvalidData);

        let mut entries = Vec::new();
        let mut description: Option<String> = None;
        let mut sequence = String::new();

        for line in Pitchfork::new(b'\n', buf) {
            let line = str::from_utf8(line).map_err(invalid)?.trim_end();
            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix('>') {
                if let Some(desc) = description.take() {
                    entries.push(Entry {
                        accession: accession(&desc).to_string(),
                        description: desc,
                        sequence: std::mem::take(&mut sequence),
                    });
                }
                description = Some(header.to_string());
            } else if description.is_some() {
                sequence.push_str(line);
            } else {
                // Sequence data before any header
                return Err(io::Error::from(io::ErrorKind::InvalidData));
            }
        }
        if let Some(desc) = description {
            entries.push(Entry {
                accession: accession(&desc).to_string(),
                description: desc,
                sequence,
            });
        }

        Ok(Fasta { entries })
    }

    /// Zero-based offset of `seq` within the first entry (in file order)
    /// whose protein sequence contains it
    pub fn position(&self, seq: &str) -> Option<usize> {
        self.entries.iter().find_map(|e| e.sequence.find(seq))
    }

    /// Gene symbol for `seq`: scan entries in file order, and for every
    /// entry containing `seq`, try to extract a `GN=` symbol. The first
    /// symbol successfully extracted wins; matching entries without a
    /// parsable token are passed over.
    ///
    /// Note that this scan may settle on a different entry than
    /// [`Fasta::position`] when a sequence occurs in several proteins.
    pub fn gene_symbol(&self, seq: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|e| e.sequence.contains(seq))
            .find_map(Entry::gene_symbol)
    }
}
