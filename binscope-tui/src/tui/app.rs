use crate::tui::console::Console;
use binscope_common::{Binning, Config};
use binscope_core::{
    assess, recompute, render_bars, BinningState, ColumnBar, Flow, Geometry, QualityMetrics,
    Sample,
};

/// One fully computed frame, ready for any console to draw.
#[derive(Debug, Clone)]
pub struct Scene {
    pub geometry: Geometry,
    pub state: BinningState,
    pub bars: Vec<ColumnBar>,
    pub draw_height: usize,
    pub metrics: QualityMetrics,
}

pub struct App {
    pub state: BinningState,
    pub data: Sample,
    pub acceptance: Sample,
    pub ratio_target: f64,
    pub fallback: Geometry,
}

impl App {
    pub fn new(state: BinningState, data: Sample, acceptance: Sample, config: &Config) -> Self {
        Self {
            state,
            data,
            acceptance,
            ratio_target: config.binning.ratio_target,
            fallback: Geometry::new(
                config.display.fallback_width,
                config.display.fallback_height,
            ),
        }
    }

    pub fn geometry(&self, console: &impl Console) -> Geometry {
        match console.size() {
            Ok((w, h)) => Geometry::new(w, h),
            Err(e) => {
                tracing::warn!(error = %e, "terminal size unavailable, using fallback geometry");
                self.fallback
            }
        }
    }

    /// Re-clamp the display resolution for `geometry` and rebuild everything drawn.
    pub fn frame(&mut self, geometry: Geometry) -> Scene {
        let draw_width = geometry.draw_width();
        let draw_height = geometry.draw_height();
        self.state.clamp_display(draw_width);
        let snapshot = recompute(&self.state, &self.data, &self.acceptance);
        let metrics = assess(&snapshot, self.ratio_target);
        let bars = render_bars(&snapshot.data_display, draw_width, draw_height);
        Scene {
            geometry,
            state: self.state,
            bars,
            draw_height,
            metrics,
        }
    }

    /// Draw, wait for one key, apply it; repeat until the confirm key.
    pub fn run(&mut self, console: &mut impl Console) -> anyhow::Result<Binning> {
        tracing::info!(
            n_bins = self.state.n_bins(),
            left = self.state.left(),
            right = self.state.right(),
            data_events = self.data.len(),
            acceptance_events = self.acceptance.len(),
            "explorer started"
        );
        loop {
            let geometry = self.geometry(&*console);
            let scene = self.frame(geometry);
            console.draw(&scene)?;
            let key = console.read_key()?;
            let flow = self.state.apply(key, geometry.draw_width());
            tracing::debug!(
                ?key,
                n_bins = self.state.n_bins(),
                n_bins_display = self.state.n_bins_display(),
                left = self.state.left(),
                right = self.state.right(),
                increment = self.state.increment(),
                "key applied"
            );
            if flow == Flow::Confirm {
                let binning = self.state.binning();
                tracing::info!(?binning, "binning confirmed");
                return Ok(binning);
            }
        }
    }
}
