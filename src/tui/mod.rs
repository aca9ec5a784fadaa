//! Live terminal plotter for supply, storage and load attributes.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Plotter state driven by the simulation.
pub mod runtime;
mod style;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::ScenarioConfig;
use runtime::App;

type Backend = CrosstermBackend<Stdout>;

/// Raw-mode alternate screen, restored when dropped.
struct Screen {
    terminal: Terminal<Backend>,
}

impl Screen {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(e)
            }
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Plots a validated scenario until the user quits.
///
/// # Errors
///
/// Returns any terminal I/O failure. The terminal is restored either way.
pub fn run(scenario: ScenarioConfig, name: &str) -> io::Result<()> {
    let mut screen = Screen::enter()?;
    let mut app = App::new(scenario, name);
    event_loop(&mut screen.terminal, &mut app)
}

/// Draws, waits for input until the next tick is due, then advances.
fn event_loop(terminal: &mut Terminal<Backend>, app: &mut App) -> io::Result<()> {
    while !app.quit {
        terminal.draw(|frame| layout::render(frame, app))?;

        let interval = Duration::from_millis(app.tick_interval_ms());
        let wait = (app.last_tick + interval).saturating_duration_since(Instant::now());
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = controls::action_for(key) {
                    app.apply(action);
                }
            }
        }

        let due = app.last_tick.elapsed() >= interval;
        if due && !app.paused && !app.is_finished() {
            app.tick();
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}
