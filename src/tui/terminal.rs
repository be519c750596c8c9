use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

/// Raw mode plus alternate screen, restored on drop unless [`leave`](Self::leave)
/// already did it.
pub(in crate::tui) struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub(in crate::tui) fn enter() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = crossterm::execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        Ok(Self { active: true })
    }

    /// Restore the terminal, reporting failures.
    pub(in crate::tui) fn leave(mut self) -> anyhow::Result<()> {
        self.active = false;
        disable_raw_mode()?;
        crossterm::execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), Show, LeaveAlternateScreen);
    }
}
