//! Complete-linkage agglomerative clustering for heatmap ordering
use std::mem;

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Return a row permutation placing similar rows next to each other.
///
/// Clusters are merged greedily by complete linkage (the distance between
/// two clusters is the largest pairwise Euclidean distance between their
/// members), with ties broken by lowest index so the ordering is stable
/// across runs. The permutation is the concatenation of cluster members in
/// merge order.
pub fn complete_linkage_order(rows: &[Vec<f64>]) -> Vec<usize> {
    let n = rows.len();
    if n < 2 {
        return (0..n).collect();
    }

    let mut dist = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i + 1..n {
            let d = euclidean(&rows[i], &rows[j]);
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut alive: Vec<bool> = vec![true; n];

    for _ in 0..n - 1 {
        let mut best = (0, 0, f64::INFINITY);
        for i in 0..n {
            if !alive[i] {
                continue;
            }
            for j in i + 1..n {
                if alive[j] && dist[i][j] < best.2 {
                    best = (i, j, dist[i][j]);
                }
            }
        }

        let (i, j, _) = best;
        let absorbed = mem::take(&mut members[j]);
        members[i].extend(absorbed);
        alive[j] = false;

        // Lance-Williams update for complete linkage
        for k in 0..n {
            if alive[k] && k != i {
                let d = dist[i][k].max(dist[j][k]);
                dist[i][k] = d;
                dist[k][i] = d;
            }
        }
    }

    let root = alive.iter().position(|&a| a).unwrap_or(0);
    mem::take(&mut members[root])
}
