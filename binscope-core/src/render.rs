//! Bar geometry for the histogram panel.
//!
//! Pure functions only: counts and panel size in, per-column draw instructions out.
//! The terminal adapter turns a [`ColumnBar`] into glyphs with [`ColumnBar::glyph_at`].

/// Partial-cell glyphs from empty to full, indexed by eighths.
pub const BAR_GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Vertical sub-cell resolution.
pub const EIGHTHS: usize = 8;

/// Columns taken by the left and right border.
pub const BORDER_COLS: u16 = 2;
/// Rows taken by the box border, four status rows and the footer.
pub const RESERVED_ROWS: u16 = 2 + 4 + 1;

/// Terminal size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn draw_width(&self) -> usize {
        self.width.saturating_sub(BORDER_COLS).max(1) as usize
    }

    pub fn draw_height(&self) -> usize {
        self.height.saturating_sub(RESERVED_ROWS).max(1) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBar {
    pub column: usize,
    pub source_bin: usize,
    pub full_cells: usize,
    /// eighths in the partial cell above the full ones, 0..=7
    pub remainder: usize,
}

impl ColumnBar {
    pub fn is_empty(&self) -> bool {
        self.full_cells == 0 && self.remainder == 0
    }

    /// Glyph for the cell `row` rows above the baseline.
    pub fn glyph_at(&self, row: usize) -> char {
        if row < self.full_cells {
            BAR_GLYPHS[EIGHTHS]
        } else if row == self.full_cells {
            BAR_GLYPHS[self.remainder]
        } else {
            BAR_GLYPHS[0]
        }
    }
}

/// Screen column `c` shows source bin `floor(c * bins / width)`.
pub fn source_bin(column: usize, bins: usize, draw_width: usize) -> usize {
    if draw_width == 0 {
        return 0;
    }
    (column * bins / draw_width).min(bins.saturating_sub(1))
}

/// Map `counts` onto a `draw_width` x `draw_height` panel.
pub fn render_bars(counts: &[f64], draw_width: usize, draw_height: usize) -> Vec<ColumnBar> {
    let total = draw_height * EIGHTHS;
    let max = counts.iter().cloned().fold(0.0_f64, f64::max);
    let empty = counts.is_empty() || !max.is_finite() || max <= 0.0;
    (0..draw_width)
        .map(|column| {
            let bin = source_bin(column, counts.len(), draw_width);
            if empty {
                return ColumnBar {
                    column,
                    source_bin: bin,
                    full_cells: 0,
                    remainder: 0,
                };
            }
            // count * (h*8) / max rather than count * scale keeps the tallest bar exact
            let eighths = (counts[bin] * total as f64 / max).clamp(0.0, total as f64);
            let full_cells = (eighths / EIGHTHS as f64).floor() as usize;
            let remainder = (eighths % EIGHTHS as f64).floor() as usize;
            ColumnBar {
                column,
                source_bin: bin,
                full_cells,
                remainder,
            }
        })
        .collect()
}
