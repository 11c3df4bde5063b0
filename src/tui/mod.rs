use std::io;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Frame;
use ratatui::Terminal;

use crate::errors::LedgerError;

use self::actions::TuiAction;

pub mod actions;
mod editor;
pub mod period;
pub mod screen;
pub mod theme;

/// Runs `widget` full screen until it asks to exit.
///
/// The terminal is restored even when drawing fails.
pub fn open_widget(widget: &mut impl TuiWidget) -> Result<(), LedgerError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, widget);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    widget: &mut impl TuiWidget,
) -> Result<(), LedgerError> {
    loop {
        terminal.draw(|f| widget.render(f))?;
        if let Some(TuiAction::Exit) = widget.handle_events() {
            return Ok(());
        }
    }
}

pub trait TuiWidget {
    fn handle_events(&mut self) -> Option<TuiAction>;
    fn render(&mut self, frame: &mut Frame);
}
