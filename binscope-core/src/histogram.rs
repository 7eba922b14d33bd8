use crate::sample::Sample;
use crate::state::BinningState;
use serde::{Deserialize, Serialize};

/// `n + 1` uniformly spaced edges over `[left, right]`, last edge pinned to `right`.
pub fn uniform_edges(left: f64, right: f64, n: usize) -> Vec<f64> {
    let n = n.max(1);
    let span = right - left;
    let mut edges: Vec<f64> = (0..=n)
        .map(|i| left + span * i as f64 / n as f64)
        .collect();
    edges[n] = right;
    edges
}

/// Bin index of `v` for the given edges; `[e_i, e_{i+1})` except the closed last bin.
pub fn bin_index(edges: &[f64], v: f64) -> Option<usize> {
    let n = edges.len().checked_sub(1).filter(|&n| n > 0)?;
    let (left, right) = (edges[0], edges[n]);
    if !(left..=right).contains(&v) {
        return None;
    }
    if v == right {
        return Some(n - 1);
    }
    let width = (right - left) / n as f64;
    let mut idx = (((v - left) / width) as usize).min(n - 1);
    // the quotient can land one bin off near an edge
    if v < edges[idx] && idx > 0 {
        idx -= 1;
    } else if v >= edges[idx + 1] && idx + 1 < n {
        idx += 1;
    }
    Some(idx)
}

/// Weighted and unweighted counts of one sample over fixed edges.
pub fn fill(edges: &[f64], sample: &Sample) -> (Vec<f64>, Vec<u64>) {
    let n = edges.len().saturating_sub(1);
    let mut weighted = vec![0.0; n];
    let mut unweighted = vec![0u64; n];
    for (v, w) in sample.events() {
        if let Some(i) = bin_index(edges, v) {
            weighted[i] += w;
            unweighted[i] += 1;
        }
    }
    (weighted, unweighted)
}

/// Everything one frame needs, recomputed from the raw samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSnapshot {
    pub edges: Vec<f64>,
    pub display_edges: Vec<f64>,
    pub data_weighted: Vec<f64>,
    pub data_display: Vec<f64>,
    pub data_unweighted: Vec<u64>,
    pub acceptance_weighted: Vec<f64>,
    pub acceptance_unweighted: Vec<u64>,
}

impl HistogramSnapshot {
    pub fn n_bins(&self) -> usize {
        self.data_unweighted.len()
    }
}

/// Bin both samples at the state's primary resolution and, independently, the data
/// sample at the display resolution.
pub fn recompute(state: &BinningState, data: &Sample, acceptance: &Sample) -> HistogramSnapshot {
    let edges = uniform_edges(state.left(), state.right(), state.n_bins());
    let display_edges = uniform_edges(state.left(), state.right(), state.n_bins_display());
    let (data_weighted, data_unweighted) = fill(&edges, data);
    let (data_display, _) = fill(&display_edges, data);
    let (acceptance_weighted, acceptance_unweighted) = fill(&edges, acceptance);
    HistogramSnapshot {
        edges,
        display_edges,
        data_weighted,
        data_display,
        data_unweighted,
        acceptance_weighted,
        acceptance_unweighted,
    }
}
