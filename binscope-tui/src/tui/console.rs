use crate::tui::app::Scene;
use crate::tui::events::map_event;
use crate::tui::theme::{border_type, Theme};
use crate::tui::ui::render;
use binscope_common::DisplayConfig;
use binscope_core::Key;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::BorderType, Terminal};
use std::io::{self, Stdout};

/// The terminal as the explorer sees it: a size, a full-frame draw and a blocking key read.
pub trait Console {
    fn size(&self) -> io::Result<(u16, u16)>;
    fn draw(&mut self, scene: &Scene) -> anyhow::Result<()>;
    fn read_key(&mut self) -> anyhow::Result<Key>;
}

/// Raw-mode alternate-screen console; the terminal is restored on drop.
pub struct TerminalConsole {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    border: BorderType,
}

impl TerminalConsole {
    pub fn open(display: &DisplayConfig) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            theme: Theme::from_name(&display.theme),
            border: border_type(display.border),
        })
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

impl Console for TerminalConsole {
    fn size(&self) -> io::Result<(u16, u16)> {
        let (w, h) = crossterm::terminal::size()?;
        if w == 0 || h == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "terminal reported zero size"));
        }
        Ok((w, h))
    }

    fn draw(&mut self, scene: &Scene) -> anyhow::Result<()> {
        let (theme, border) = (&self.theme, self.border);
        self.terminal.draw(|f| render(f, scene, theme, border))?;
        Ok(())
    }

    fn read_key(&mut self) -> anyhow::Result<Key> {
        loop {
            if let Some(key) = map_event(event::read()?) {
                return Ok(key);
            }
        }
    }
}
