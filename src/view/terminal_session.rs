//! Scoped terminal acquisition.
//!
//! Raw mode, the alternate screen and mouse capture are held by a
//! [`TerminalSession`] and released when it is dropped, on every exit path.
//! Where the terminal supports it, escape-code disambiguation is pushed too,
//! so that Cmd/Super modified keys are reported.

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use std::io;
use tracing::{info, warn};

/// Switches the terminal in and out of interactive mode.
pub trait TerminalControl {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the first step that failed.
    fn acquire(&mut self) -> io::Result<()>;

    /// Undo [`Self::acquire`].
    ///
    /// # Errors
    ///
    /// Returns the first I/O error hit while restoring.
    fn release(&mut self) -> io::Result<()>;

    /// Whether the terminal can report modifiers such as Super.
    fn supports_keyboard_enhancement(&mut self) -> bool {
        false
    }

    /// Ask the terminal to disambiguate escape codes.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from writing the request.
    fn push_keyboard_enhancement(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Undo [`Self::push_keyboard_enhancement`].
    ///
    /// # Errors
    ///
    /// Returns the I/O error from writing the request.
    fn pop_keyboard_enhancement(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Real terminal on stdout.
#[derive(Debug, Default)]
pub struct CrosstermControl;

impl TerminalControl for CrosstermControl {
    fn acquire(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let entered = io::stdout()
            .execute(EnterAlternateScreen)
            .and_then(|out| out.execute(EnableMouseCapture).map(|_| ()));
        if let Err(error) = entered {
            // Leave the shell usable even if setup stopped half way.
            let _ = self.release();
            return Err(error);
        }
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        let mouse = stdout.execute(DisableMouseCapture).map(|_| ());
        let screen = stdout.execute(LeaveAlternateScreen).map(|_| ());
        let raw = disable_raw_mode();
        mouse.and(screen).and(raw)
    }

    fn supports_keyboard_enhancement(&mut self) -> bool {
        supports_keyboard_enhancement().unwrap_or(false)
    }

    fn push_keyboard_enhancement(&mut self) -> io::Result<()> {
        io::stdout()
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
            ))
            .map(|_| ())
    }

    fn pop_keyboard_enhancement(&mut self) -> io::Result<()> {
        io::stdout()
            .execute(PopKeyboardEnhancementFlags)
            .map(|_| ())
    }
}

/// Guard holding the terminal in interactive mode.
#[must_use = "the terminal is restored as soon as the session is dropped"]
pub struct TerminalSession<C: TerminalControl> {
    control: C,
    active: bool,
    keyboard_enhanced: bool,
}

impl<C: TerminalControl> TerminalSession<C> {
    /// Put the terminal into interactive mode.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the terminal cannot be switched.
    pub fn acquire(mut control: C) -> io::Result<Self> {
        control.acquire()?;
        let keyboard_enhanced = control.supports_keyboard_enhancement()
            && match control.push_keyboard_enhancement() {
                Ok(()) => true,
                Err(error) => {
                    warn!(%error, "Failed to enable keyboard enhancement");
                    false
                }
            };
        info!(keyboard_enhanced, "Terminal acquired");
        Ok(Self {
            control,
            active: true,
            keyboard_enhanced,
        })
    }

    /// Whether Super-modified keys will be reported.
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// False once the terminal has been restored.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Restore the terminal now, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from restoring the terminal.
    pub fn release(mut self) -> io::Result<()> {
        self.release_once()
    }

    fn release_once(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let popped = if self.keyboard_enhanced {
            self.keyboard_enhanced = false;
            self.control.pop_keyboard_enhancement()
        } else {
            Ok(())
        };
        let result = popped.and(self.control.release());
        info!("Terminal released");
        result
    }
}

impl<C: TerminalControl> Drop for TerminalSession<C> {
    fn drop(&mut self) {
        if let Err(error) = self.release_once() {
            warn!(%error, "Failed to restore terminal");
        }
    }
}
