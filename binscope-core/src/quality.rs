use crate::histogram::HistogramSnapshot;
use serde::{Deserialize, Serialize};

/// Advisory data-sufficiency signal for the current binning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub min_data_count: u64,
    /// acceptance/data per bin: `inf` when only data is empty, `NaN` when both are
    pub ratios: Vec<f64>,
    /// smallest defined ratio; `None` when every bin is undefined
    pub min_ratio: Option<f64>,
    pub ratio_target: f64,
}

impl QualityMetrics {
    pub fn meets_target(&self) -> bool {
        self.min_ratio.is_some_and(|r| r > self.ratio_target)
    }
}

pub fn acceptance_ratio(acceptance: u64, data: u64) -> f64 {
    match (acceptance, data) {
        (0, 0) => f64::NAN,
        (_, 0) => f64::INFINITY,
        (a, d) => a as f64 / d as f64,
    }
}

pub fn assess(snapshot: &HistogramSnapshot, ratio_target: f64) -> QualityMetrics {
    let min_data_count = snapshot.data_unweighted.iter().copied().min().unwrap_or(0);
    let ratios: Vec<f64> = snapshot
        .acceptance_unweighted
        .iter()
        .zip(&snapshot.data_unweighted)
        .map(|(&a, &d)| acceptance_ratio(a, d))
        .collect();
    let min_ratio = ratios
        .iter()
        .copied()
        .filter(|r| r.is_finite())
        .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |m| m.min(r))));
    QualityMetrics {
        min_data_count,
        ratios,
        min_ratio,
        ratio_target,
    }
}

/// `undefined`, `inf` or the ratio with two decimals.
pub fn fmt_ratio(r: Option<f64>) -> String {
    match r {
        None => "undefined".into(),
        Some(r) if r.is_nan() => "undefined".into(),
        Some(r) if r.is_infinite() => "inf".into(),
        Some(r) => format!("{r:.2}"),
    }
}
