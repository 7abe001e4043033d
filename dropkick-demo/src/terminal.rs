//! Raw-mode terminal with panic-safe teardown.

use std::io::{self, Stdout, Write};
use std::panic;
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout })
    }

    /// Wait up to `timeout` for input; drains everything already queued.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<event::Event>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }

    /// Repaint the whole screen with `lines`.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        queue!(self.stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for (row, line) in lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            write!(self.stdout, "{line}")?;
        }
        self.stdout.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}
