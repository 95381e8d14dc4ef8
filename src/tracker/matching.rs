//! Association of existing tracks with incoming hand centroids.

use ndarray::Array2;

use crate::tracker::rect::Point;

/// Cost assigned to the padding cells of a non-square matrix before solving.
const PADDING_COST: f64 = 1e6;

/// Compute the Euclidean distance matrix between tracks (rows) and detections (columns).
pub fn euclidean_distance(track_points: &[Point], det_points: &[Point]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_points.len(), det_points.len()));
    for (i, t) in track_points.iter().enumerate() {
        for (j, d) in det_points.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(t, d);
        }
    }
    dists
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

impl AssignmentResult {
    fn empty(num_rows: usize, num_cols: usize) -> Self {
        Self {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: (0..num_cols).collect(),
        }
    }

    fn from_masks(matches: Vec<(usize, usize)>, rows: &[bool], cols: &[bool]) -> Self {
        let unused = |mask: &[bool]| -> Vec<usize> {
            mask.iter()
                .enumerate()
                .filter_map(|(i, &used)| if used { None } else { Some(i) })
                .collect()
        };
        Self {
            unmatched_tracks: unused(rows),
            unmatched_detections: unused(cols),
            matches,
        }
    }
}

/// One-pass greedy assignment.
///
/// Each row's best column is fixed up front (first minimum wins). Rows are then
/// visited in ascending order of that minimum distance, ties keeping row order.
/// A row whose best column was already taken by an earlier row stays unmatched;
/// it is never offered its second-best column. There is no distance gate.
pub fn greedy_assignment(cost_matrix: &Array2<f32>) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();
    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::empty(num_rows, num_cols);
    }

    let best: Vec<(usize, f32)> = cost_matrix
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = (0, f32::INFINITY);
            for (j, &d) in row.iter().enumerate() {
                if d < best.1 {
                    best = (j, d);
                }
            }
            best
        })
        .collect();

    let mut order: Vec<usize> = (0..num_rows).collect();
    order.sort_by(|&a, &b| best[a].1.total_cmp(&best[b].1));

    let mut used_rows = vec![false; num_rows];
    let mut used_cols = vec![false; num_cols];
    let mut matches = Vec::new();

    for row in order {
        let (col, _) = best[row];
        if used_rows[row] || used_cols[col] {
            continue;
        }
        used_rows[row] = true;
        used_cols[col] = true;
        matches.push((row, col));
    }

    AssignmentResult::from_masks(matches, &used_rows, &used_cols)
}

/// Globally optimal assignment (Jonker-Volgenant) with a maximum-distance gate.
///
/// Pairs whose cost exceeds `max_distance` are rejected and both sides are
/// reported unmatched.
pub fn linear_assignment(cost_matrix: &Array2<f32>, max_distance: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();
    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::empty(num_rows, num_cols);
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), PADDING_COST);
    for i in 0..num_rows {
        for j in 0..num_cols {
            padded[[i, j]] = (cost_matrix[[i, j]] as f64).min(PADDING_COST);
        }
    }

    let mut used_rows = vec![false; num_rows];
    let mut used_cols = vec![false; num_cols];
    let mut matches = Vec::new();

    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row, &col) in row_to_col.iter().enumerate().take(num_rows) {
                if col < num_cols && cost_matrix[[row, col]] <= max_distance {
                    used_rows[row] = true;
                    used_cols[col] = true;
                    matches.push((row, col));
                }
            }
        }
        Err(err) => {
            tracing::warn!("linear assignment failed, leaving all pairs unmatched: {err:?}");
        }
    }

    AssignmentResult::from_masks(matches, &used_rows, &used_cols)
}
