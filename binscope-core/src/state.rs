use crate::sample::Sample;
use binscope_common::{Binning, BinscopeError, Result};

/// Step sizes cycled through by `x`/`X`.
pub const INCREMENT_LADDER: [f64; 4] = [0.001, 0.01, 0.1, 1.0];

/// Bin count used when nothing else is configured.
pub const DEFAULT_BINS: usize = 20;

/// Operator key symbols understood by the explorer. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    FewerBins,
    MoreBins,
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    IncrementDown,
    IncrementUp,
    Confirm,
    Other,
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match c {
            'n' => Self::FewerBins,
            'N' => Self::MoreBins,
            'l' => Self::LeftDown,
            'L' => Self::LeftUp,
            'r' => Self::RightDown,
            'R' => Self::RightUp,
            'x' => Self::IncrementDown,
            'X' => Self::IncrementUp,
            'q' => Self::Confirm,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Confirm,
}

/// Beyond this magnitude an f64 has no sub-0.001 resolution left to round away.
const ROUND_LIMIT: f64 = 1e15;

fn round_to(x: f64, places: i32) -> f64 {
    if x.abs() >= ROUND_LIMIT {
        return x;
    }
    let m = 10f64.powi(places);
    (x * m).round() / m
}

/// Edges are snapped to this many decimals after every mutation.
const EDGE_DECIMALS: i32 = 3;

fn snap(x: f64) -> f64 {
    round_to(x, EDGE_DECIMALS)
}

/// Clamp to the non-negative axis, folding `-0.0` into `0.0`.
fn non_negative(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        x
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinningState {
    left: f64,
    right: f64,
    n_bins: usize,
    n_bins_display: usize,
    increment_index: usize,
}

impl BinningState {
    /// Validated constructor. The display bin count starts equal to `n_bins`.
    pub fn new(n_bins: usize, left: f64, right: f64) -> Result<Self> {
        if n_bins == 0 {
            return Err(BinscopeError::InvalidBinning("bin count must be at least 1".into()));
        }
        if !left.is_finite() || !right.is_finite() {
            return Err(BinscopeError::InvalidBinning("edges must be finite".into()));
        }
        if left < 0.0 {
            return Err(BinscopeError::InvalidBinning(format!("left edge {left} is negative")));
        }
        if left >= right {
            return Err(BinscopeError::InvalidBinning(format!(
                "left edge {left} must be below right edge {right}"
            )));
        }
        Ok(Self {
            left,
            right,
            n_bins,
            n_bins_display: n_bins,
            increment_index: 0,
        })
    }

    /// Initial state from the data range: edges rounded to two decimals.
    pub fn from_sample(data: &Sample, n_bins: usize) -> Result<Self> {
        let (min, max) = data
            .range()
            .ok_or_else(|| BinscopeError::EmptySample("data sample has no events".into()))?;
        let left = non_negative(round_to(min, 2));
        let mut right = round_to(max, 2);
        if right <= left {
            right = left + 1.0;
        }
        Self::new(n_bins.max(1), left, right)
    }

    pub fn left(&self) -> f64 {
        self.left
    }
    pub fn right(&self) -> f64 {
        self.right
    }
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }
    pub fn n_bins_display(&self) -> usize {
        self.n_bins_display
    }
    pub fn increment_index(&self) -> usize {
        self.increment_index
    }
    pub fn increment(&self) -> f64 {
        INCREMENT_LADDER[self.increment_index]
    }
    pub fn bin_width(&self) -> f64 {
        (self.right - self.left) / self.n_bins as f64
    }

    pub fn binning(&self) -> Binning {
        Binning {
            n_bins: self.n_bins,
            left: self.left,
            right: self.right,
        }
    }

    /// Display resolution can never exceed the drawable column count.
    pub fn clamp_display(&mut self, draw_width: usize) {
        let width = draw_width.max(1);
        if self.n_bins_display > width {
            self.n_bins_display = width;
        }
    }

    /// Apply one key, then re-clamp the display bin count to `draw_width`.
    pub fn apply(&mut self, key: Key, draw_width: usize) -> Flow {
        let inc = self.increment();
        let ladder = INCREMENT_LADDER.len();
        match key {
            Key::FewerBins => {
                self.n_bins = self.n_bins.saturating_sub(1).max(1);
                self.n_bins_display = self.n_bins;
            }
            Key::MoreBins => {
                self.n_bins += 1;
                self.n_bins_display = self.n_bins;
            }
            Key::LeftDown => {
                self.left = non_negative(snap(self.left - inc));
            }
            Key::LeftUp => {
                let next = snap(self.left + inc);
                if next < self.right {
                    self.left = next;
                }
            }
            Key::RightDown => {
                let next = snap(self.right - inc);
                if next > self.left {
                    self.right = next;
                }
            }
            Key::RightUp => {
                let next = snap(self.right + inc);
                if next.is_finite() {
                    self.right = next;
                }
            }
            Key::IncrementDown => {
                self.increment_index = (self.increment_index + ladder - 1) % ladder;
            }
            Key::IncrementUp => {
                self.increment_index = (self.increment_index + 1) % ladder;
            }
            Key::Confirm => return Flow::Confirm,
            Key::Other => return Flow::Continue,
        }
        self.clamp_display(draw_width);
        Flow::Continue
    }
}
