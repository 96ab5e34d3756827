//! Spearman rank correlation over pairwise-complete observations
use crate::cluster;
use crate::{Error, Matrix};
use log::info;
use std::cmp::Ordering;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Arithmetic mean over the values present, skipping missing and NaN
/// entries. Returns `None` when nothing remains.
pub(crate) fn mean<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// 1-based ranks with ties replaced by their average rank
fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // positions i..=j share the average of ranks i+1..=j+1
        let avg = (i + j + 2) as f64 / 2.0;
        for k in i..=j {
            ranks[order[k]] = avg;
        }
        i = j + 1;
    }
    ranks
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mx) * (b - my);
        vx += (a - mx).powi(2);
        vy += (b - my).powi(2);
    }
    let denom = (vx * vy).sqrt();
    if denom == 0.0 {
        None
    } else {
        Some(cov / denom)
    }
}

/// Spearman correlation of two columns over rows where both are present
pub(crate) fn spearman(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
            _ => None,
        })
        .unzip();
    if xs.len() < 2 {
        return None;
    }
    pearson(&ranks(&xs), &ranks(&ys))
}

pub(crate) fn spearman_matrix(matrix: &Matrix) -> Correlation {
    let n = matrix.columns.len();
    let column = |idx: usize| -> Vec<Option<f64>> {
        matrix
            .values
            .iter()
            .map(|row| row.get(idx).copied().flatten())
            .collect()
    };
    let columns: Vec<Vec<Option<f64>>> = (0..n).map(column).collect();

    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                // a column correlates perfectly with itself whenever a
                // correlation is defined at all
                columns[i]
                    .iter()
                    .filter(|v| v.map(|v| !v.is_nan()).unwrap_or(false))
                    .nth(1)
                    .map(|_| 1.0)
            } else {
                spearman(&columns[i], &columns[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Correlation {
        labels: matrix.columns.clone(),
        values,
    }
}

/// A symmetric gene-by-gene correlation matrix
#[derive(Clone, Debug, Default)]
pub struct Correlation {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl Correlation {
    /// Drop rows/columns with no defined correlation at all, fill the
    /// remaining undefined entries with zero, then drop rows/columns that
    /// are entirely zero
    pub fn prune(self) -> Pruned {
        let keep: Vec<usize> = (0..self.labels.len())
            .filter(|&i| self.values[i].iter().any(Option::is_some))
            .collect();

        let filled: Vec<Vec<f64>> = keep
            .iter()
            .map(|&i| {
                keep.iter()
                    .map(|&j| self.values[i][j].unwrap_or(0.0))
                    .collect()
            })
            .collect();

        let nonzero: Vec<usize> = (0..keep.len())
            .filter(|&i| filled[i].iter().any(|&v| v != 0.0))
            .collect();
        info!(
            "pruned correlation matrix from {} to {} genes",
            self.labels.len(),
            nonzero.len()
        );

        Pruned {
            labels: nonzero
                .iter()
                .map(|&i| self.labels[keep[i]].clone())
                .collect(),
            values: nonzero
                .iter()
                .map(|&i| nonzero.iter().map(|&j| filled[i][j]).collect())
                .collect(),
        }
    }
}

/// A pruned correlation matrix with every entry defined
#[derive(Clone, Debug, Default)]
pub struct Pruned {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl Pruned {
    /// Write the matrix as CSV, with the row index in the first column
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        self.write_to(File::create(path)?)
    }

    pub fn write_to<W: Write>(&self, wtr: W) -> Result<(), Error> {
        let mut wtr = csv::Writer::from_writer(wtr);
        wtr.write_record(
            std::iter::once("").chain(self.labels.iter().map(String::as_str)),
        )?;
        for (label, row) in self.labels.iter().zip(&self.values) {
            wtr.write_record(
                std::iter::once(label.clone()).chain(row.iter().map(|v| v.to_string())),
            )?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Reorder rows and columns by complete-linkage hierarchical
    /// clustering on Euclidean distances
    pub fn cluster(self) -> Pruned {
        let order = cluster::complete_linkage_order(&self.values);
        Pruned {
            labels: order.iter().map(|&i| self.labels[i].clone()).collect(),
            values: order
                .iter()
                .map(|&i| order.iter().map(|&j| self.values[i][j]).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rank_ties_average() {
        assert_eq!(ranks(&[10.0, 20.0, 30.0]), vec![1.0, 2.0, 3.0]);
        assert_eq!(ranks(&[10.0, 20.0, 20.0, 30.0]), vec![1.0, 2.5, 2.5, 4.0]);
    }

    #[test]
    fn monotone_pairs() {
        let x = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let up = vec![Some(10.0), Some(100.0), Some(1000.0), Some(10000.0)];
        let down = vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0)];
        assert_eq!(spearman(&x, &up), Some(1.0));
        assert_eq!(spearman(&x, &down), Some(-1.0));
    }

    #[test]
    fn pairwise_complete_observations() {
        let x = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        let y = vec![Some(1.0), Some(2.0), Some(3.0), None];
        // only rows 0 and 2 are complete
        assert_eq!(spearman(&x, &y), Some(1.0));
        // a single complete pair is not enough
        let z = vec![Some(1.0), None, None, None];
        assert_eq!(spearman(&x, &z), None);
    }

    #[test]
    fn constant_columns_have_no_correlation() {
        let x = vec![Some(1.0), Some(2.0), Some(3.0)];
        let c = vec![Some(5.0), Some(5.0), Some(5.0)];
        assert_eq!(spearman(&x, &c), None);
    }

    #[test]
    fn prune_drops_empty_then_zero() {
        let corr = Correlation {
            labels: vec!["A".into(), "B".into(), "C".into()],
            values: vec![
                vec![Some(1.0), Some(0.5), None],
                vec![Some(0.5), Some(1.0), None],
                vec![None, None, None],
            ],
        };
        let pruned = corr.prune();
        assert_eq!(pruned.labels, vec!["A", "B"]);
        assert_eq!(pruned.values, vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
    }

    #[test]
    fn written_matrix_carries_the_index() {
        let pruned = Pruned {
            labels: vec!["A".into(), "B".into()],
            values: vec![vec![1.0, 0.5], vec![0.5, 1.0]],
        };
        let mut out = Vec::new();
        pruned.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ",A,B\nA,1,0.5\nB,0.5,1\n"
        );
    }
}
