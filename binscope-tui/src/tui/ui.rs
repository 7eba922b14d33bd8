use crate::tui::app::Scene;
use crate::tui::theme::Theme;
use binscope_core::{fmt_ratio, INCREMENT_LADDER};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, scene: &Scene, theme: &Theme, border: BorderType) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    render_histogram(frame, scene, chunks[0], theme, border);
    render_status(frame, scene, &chunks[1..5], theme);
    render_footer(frame, scene, chunks[5], theme);
}

fn render_histogram(frame: &mut Frame, scene: &Scene, area: Rect, theme: &Theme, border: BorderType) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border)
        .border_style(Style::default().fg(theme.border))
        .title(" binscope ");
    let inner = block.inner(area);
    let rows = (inner.height as usize).min(scene.draw_height);
    // top row first; row index counts up from the baseline
    let lines: Vec<Line> = (0..rows)
        .rev()
        .map(|row| Line::from(scene.bars.iter().map(|b| b.glyph_at(row)).collect::<String>()))
        .collect();
    let pad = inner.height as usize - rows;
    let lines: Vec<Line> = std::iter::repeat(Line::from(""))
        .take(pad)
        .chain(lines)
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.bar).bg(theme.bg))
            .block(block),
        area,
    );
}

fn hint(keys: &str, theme: &Theme) -> Span<'static> {
    Span::styled(format!(" {keys:<4} "), Style::default().fg(theme.muted))
}

fn label(name: &str) -> Span<'static> {
    Span::raw(format!("{name:<10}"))
}

fn render_status(frame: &mut Frame, scene: &Scene, rows: &[Rect], theme: &Theme) {
    let s = &scene.state;
    let bins = if s.n_bins_display() == s.n_bins() {
        format!("{}", s.n_bins())
    } else {
        format!("{} (display {})", s.n_bins(), s.n_bins_display())
    };
    let mut ladder = vec![hint("x/X", theme), label("Increment")];
    for (i, step) in INCREMENT_LADDER.iter().enumerate() {
        let style = if i == s.increment_index() {
            Style::default().fg(theme.highlight).add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        ladder.push(Span::styled(format!(" {step} "), style));
        ladder.push(Span::raw(" "));
    }
    let lines = [
        Line::from(vec![hint("n/N", theme), label("Bins"), Span::raw(bins)]),
        Line::from(vec![hint("l/L", theme), label("Left"), Span::raw(format!("{:.3}", s.left()))]),
        Line::from(vec![hint("r/R", theme), label("Right"), Span::raw(format!("{:.3}", s.right()))]),
        Line::from(ladder),
    ];
    for (line, area) in lines.into_iter().zip(rows) {
        frame.render_widget(Paragraph::new(line).style(Style::default().fg(theme.fg).bg(theme.bg)), *area);
    }
}

fn render_footer(frame: &mut Frame, scene: &Scene, area: Rect, theme: &Theme) {
    let m = &scene.metrics;
    let ratio_style = if m.meets_target() {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.warning)
    };
    let line = Line::from(vec![
        Span::raw(format!(" bin width {:.4} | min count {} | min ratio ", scene.state.bin_width(), m.min_data_count)),
        Span::styled(fmt_ratio(m.min_ratio), ratio_style),
        Span::raw(format!(" (target > {}) | ", m.ratio_target)),
        Span::styled("q: confirm", Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().fg(theme.fg).bg(theme.bg)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::App;
    use binscope_common::Config;
    use binscope_core::{BinningState, Geometry, Sample};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App, w: u16, h: u16) -> Vec<String> {
        let scene = app.frame(Geometry::new(w, h));
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|f| render(f, &scene, &Theme::dark(), BorderType::Plain))
            .unwrap();
        let cells = terminal.backend().buffer().content().to_vec();
        (0..h as usize)
            .map(|y| {
                cells[y * w as usize..(y + 1) * w as usize]
                    .iter()
                    .map(|c| c.symbol())
                    .collect()
            })
            .collect()
    }

    fn app(values: Vec<f64>, state: BinningState) -> App {
        let data = Sample::unweighted(values).unwrap();
        App::new(state, data, Sample::default(), &Config::default())
    }

    #[test]
    fn full_bar_fills_panel_height() {
        let mut a = app(vec![5.0; 10], BinningState::new(1, 0.0, 10.0).unwrap());
        // 11 rows: 2 border + 4 histogram + 4 status + 1 footer
        let rows = draw(&mut a, 12, 11);
        for row in &rows[1..5] {
            let inner: String = row.chars().skip(1).take(10).collect();
            assert_eq!(inner, "█".repeat(10), "{row}");
        }
        assert!(rows[5].starts_with('└'));
    }

    #[test]
    fn status_rows_and_footer() {
        let mut a = app(vec![1.0, 2.0, 9.0], BinningState::new(4, 1.0, 9.0).unwrap());
        let rows = draw(&mut a, 80, 16);
        assert!(rows[11].contains("Bins") && rows[11].contains('4'));
        assert!(rows[12].contains("Left") && rows[12].contains("1.000"));
        assert!(rows[13].contains("Right") && rows[13].contains("9.000"));
        assert!(rows[14].contains("Increment") && rows[14].contains("0.001"));
        assert!(rows[15].contains("bin width 2.0000"));
        assert!(rows[15].contains("min ratio 0.00"));
        assert!(rows[15].contains("q: confirm"));
    }

    #[test]
    fn empty_range_draws_no_bars() {
        let mut a = app(vec![50.0, 60.0], BinningState::new(3, 0.0, 10.0).unwrap());
        let rows = draw(&mut a, 80, 12);
        let panel: String = rows[1..5].concat();
        assert!(!panel.chars().any(|c| ('▁'..='█').contains(&c)));
        assert!(rows[11].contains("undefined"));
    }
}
