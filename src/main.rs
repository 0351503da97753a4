//! BugBuddy - a terminal bug explainer
//!
//! This is the binary entry point. All logic lives in the workspace crates.

mod headless;

use std::path::PathBuf;

use clap::Parser;

use bugbuddy_app::config::{load_settings, Settings};
use bugbuddy_app::Engine;
use bugbuddy_core::Theme;

/// BugBuddy - paste an error, get an explanation and a suggested fix
#[derive(Parser, Debug)]
#[command(name = "bugbuddy")]
#[command(about = "A terminal bug explainer with analysis history", long_about = None)]
struct Args {
    /// Config file (default: <config dir>/bugbuddy/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial theme
    #[arg(long, value_name = "light|dark")]
    theme: Option<Theme>,

    /// Simulated analysis latency in milliseconds
    #[arg(long, value_name = "N")]
    delay_ms: Option<u64>,

    /// Turn off the particle field and the mascot
    #[arg(long)]
    no_decorations: bool,

    /// Run one analysis and print JSON events instead of starting the TUI
    #[arg(long, requires = "error")]
    headless: bool,

    /// Error text to analyze (headless mode)
    #[arg(long, value_name = "TEXT", requires = "headless")]
    error: Option<String>,

    /// Screenshot to attach (headless mode)
    #[arg(long, value_name = "PATH", requires = "headless")]
    image: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded settings
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(theme) = self.theme {
            settings.ui.theme = theme;
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.analysis.delay_ms = delay_ms;
        }
        if self.no_decorations {
            settings.ui.disable_decorations();
        }
        settings
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    bugbuddy_core::logging::init()?;

    let settings = args.apply(load_settings(args.config.as_deref()));

    if args.headless {
        let error_text = args.error.as_deref().unwrap_or_default();
        headless::run_headless(settings, error_text, args.image.as_deref()).await?;
    } else {
        bugbuddy_tui::run(Engine::new(settings)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "bugbuddy",
            "--theme",
            "light",
            "--delay-ms",
            "0",
            "--no-decorations",
        ]);
        let settings = args.apply(Settings::default());

        assert_eq!(settings.ui.theme, Theme::Light);
        assert_eq!(settings.analysis.delay_ms, 0);
        assert!(!settings.ui.decorations_enabled());
    }

    #[test]
    fn test_no_flags_keep_file_values() {
        let mut file = Settings::default();
        file.analysis.delay_ms = 750;
        let settings = Args::parse_from(["bugbuddy"]).apply(file.clone());
        assert_eq!(settings, file);
    }

    #[test]
    fn test_headless_requires_error() {
        assert!(Args::try_parse_from(["bugbuddy", "--headless"]).is_err());
        assert!(Args::try_parse_from(["bugbuddy", "--error", "boom"]).is_err());

        let args = Args::try_parse_from(["bugbuddy", "--headless", "--error", "boom"]).unwrap();
        assert!(args.headless);
        assert_eq!(args.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(Args::try_parse_from(["bugbuddy", "--theme", "sepia"]).is_err());
    }
}
