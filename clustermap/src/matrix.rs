//! Loading and column-grouping of normalized intensity matrices
use crate::correlate::{self, Correlation};
use crate::Error;
use log::info;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A normalized intensity matrix: datasets on rows, measurement columns
/// named `GENE_site`
#[derive(Clone, Debug, Default)]
pub struct Matrix {
    /// Row index (dataset names)
    pub index: Vec<String>,
    pub columns: Vec<String>,
    /// Row-major values; `None` where the field is blank or not numeric
    pub values: Vec<Vec<Option<f64>>>,
}

impl Matrix {
    /// Load a matrix from a comma-delimited file. The `DatasetName` column
    /// becomes the row index; all other columns are data.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Matrix, Error> {
        let matrix = Matrix::from_reader(File::open(path.as_ref())?)?;
        info!(
            "loaded {} datasets x {} columns from {}",
            matrix.index.len(),
            matrix.columns.len(),
            path.as_ref().display()
        );
        Ok(matrix)
    }

    /// Parse a matrix from any reader
    pub fn from_reader<R: Read>(rdr: R) -> Result<Matrix, Error> {
        let mut rdr = csv::Reader::from_reader(rdr);
        let headers = rdr.headers()?.clone();

        let name = headers
            .iter()
            .position(|h| h == "DatasetName")
            .ok_or(Error::MissingColumn("DatasetName"))?;
        let columns = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != name)
            .map(|(_, h)| h.to_string())
            .collect::<Vec<String>>();

        let mut index = Vec::new();
        let mut values = Vec::new();
        for record in rdr.records() {
            let record = record?;
            index.push(record.get(name).unwrap_or_default().to_string());
            values.push(
                record
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != name)
                    .map(|(_, s)| s.trim().parse::<f64>().ok())
                    .collect(),
            );
        }

        Ok(Matrix {
            index,
            columns,
            values,
        })
    }

    /// Collapse columns sharing a gene prefix (the part before the first
    /// `_`) into a single column holding their per-row mean, skipping
    /// missing values. Grouped columns are ordered alphabetically.
    pub fn group(self) -> Matrix {
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, column) in self.columns.iter().enumerate() {
            let prefix = column.split('_').next().unwrap_or(column);
            groups.entry(prefix).or_default().push(idx);
        }

        let values = self
            .values
            .iter()
            .map(|row| {
                groups
                    .values()
                    .map(|members| {
                        correlate::mean(members.iter().map(|&idx| row.get(idx).copied().flatten()))
                    })
                    .collect()
            })
            .collect();
        let columns = groups.keys().map(|k| k.to_string()).collect::<Vec<_>>();
        info!(
            "grouped {} columns into {} genes",
            self.columns.len(),
            columns.len()
        );

        Matrix {
            index: self.index,
            columns,
            values,
        }
    }

    /// Spearman rank correlation of every column against every other,
    /// over pairwise-complete observations
    pub fn spearman(&self) -> Correlation {
        correlate::spearman_matrix(self)
    }
}
