pub mod histogram;
pub mod quality;
pub mod reader;
pub mod render;
pub mod sample;
pub mod scanner;
pub mod state;

pub use binscope_common::{Binning, BinscopeError, Result};
pub use histogram::{bin_index, recompute, uniform_edges, HistogramSnapshot};
pub use quality::{acceptance_ratio, assess, fmt_ratio, QualityMetrics};
pub use reader::{load_sample, read_sample_file, source_files, SampleSource};
pub use render::{render_bars, ColumnBar, Geometry, BAR_GLYPHS};
pub use sample::Sample;
pub use scanner::{resolve_paths, SampleFormat};
pub use state::{BinningState, Flow, Key, DEFAULT_BINS, INCREMENT_LADDER};
