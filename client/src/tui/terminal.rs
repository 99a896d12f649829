//! Terminal setup and RAII restoration.
//!
//! [`Tui`] enters raw mode and the alternate screen on creation and restores
//! the terminal on drop. [`install_panic_hook`] restores it before a panic
//! message is printed, so a crash never leaves the shell in raw mode.
//!
//! ```ignore
//! use taskpad_client::tui::{install_panic_hook, Tui};
//!
//! install_panic_hook();
//! let mut tui = Tui::new()?;
//! tui.draw(|frame| { /* render */ })?;
//! // Terminal restored when `tui` goes out of scope
//! ```

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::TuiError;

/// Best-effort terminal restoration. Errors are ignored since the terminal
/// may already be in a bad state.
fn reset_terminal() {
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Installs a panic hook that restores the terminal before delegating to the
/// previous hook.
///
/// Call once, before creating a [`Tui`].
pub fn install_panic_hook() {
    let previous_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        reset_terminal();
        previous_hook(panic_info);
    }));
}

/// A ratatui terminal that restores the original terminal state on drop.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl Tui {
    /// Enables raw mode, enters the alternate screen, and hides the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::TerminalInit`] if any step fails; steps already
    /// taken are undone first.
    pub fn new() -> Result<Self, TuiError> {
        enable_raw_mode().map_err(TuiError::TerminalInit)?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(TuiError::TerminalInit(e));
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(t) => t,
            Err(e) => {
                reset_terminal();
                return Err(TuiError::TerminalInit(e));
            }
        };

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::Render`] if the frame cannot be flushed.
    pub fn draw<F>(&mut self, f: F) -> Result<(), TuiError>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f).map_err(TuiError::Render)?;
        Ok(())
    }

    /// Restores the terminal, propagating errors. Later calls and the drop
    /// handler become no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::Restore`] if the terminal cannot be reset.
    pub fn restore(&mut self) -> Result<(), TuiError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        execute!(io::stdout(), Show, LeaveAlternateScreen).map_err(TuiError::Restore)?;
        disable_raw_mode().map_err(TuiError::Restore)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if !self.restored {
            reset_terminal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Creating a Tui needs a real terminal; these only check the API surface.

    #[test]
    fn tui_struct_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Tui>();
    }

    #[test]
    fn install_panic_hook_can_be_called_twice() {
        install_panic_hook();
        install_panic_hook();
        let _ = panic::take_hook();
    }
}
