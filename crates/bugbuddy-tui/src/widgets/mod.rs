//! Custom widget components

mod confidence_meter;
mod nav_bar;
mod status_bar;
mod text_input;

pub use confidence_meter::ConfidenceMeter;
pub use nav_bar::NavBar;
pub use status_bar::StatusBar;
pub use text_input::TextInput;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for an animation frame
pub fn spinner(frame: u64) -> &'static str {
    SPINNER_FRAMES[(frame % SPINNER_FRAMES.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), spinner(10));
        assert_ne!(spinner(0), spinner(1));
    }
}
