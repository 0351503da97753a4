//! Terminal setup and restoration

use std::io::stdout;

use bugbuddy_core::prelude::*;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Enter the alternate screen with bracketed paste
///
/// Dropped files arrive as pasted paths.
pub fn init() -> Result<ratatui::DefaultTerminal> {
    let terminal = ratatui::try_init()
        .map_err(|e| Error::TerminalInit(e.to_string()))?;
    execute!(stdout(), EnableBracketedPaste)
        .map_err(|e| Error::terminal(format!("Failed to enable bracketed paste: {}", e)))?;
    Ok(terminal)
}

/// Leave the alternate screen and undo everything `init` and
/// `set_mouse_capture` turned on
pub fn restore() {
    if let Err(e) = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste) {
        warn!("Failed to reset terminal modes: {}", e);
    }
    ratatui::restore();
}

/// Turn pointer tracking on or off
pub fn set_mouse_capture(enabled: bool) -> Result<()> {
    let result = if enabled {
        execute!(stdout(), EnableMouseCapture)
    } else {
        execute!(stdout(), DisableMouseCapture)
    };
    result.map_err(|e| Error::terminal(format!("Failed to toggle mouse capture: {}", e)))?;
    debug!("Mouse capture {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}
