//! Main TUI runner - entry point and event loop

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use bugbuddy_app::message::Message;
use bugbuddy_app::Engine;
use bugbuddy_core::prelude::*;

use crate::decoration::Decorations;
use crate::{event, render, terminal};

/// Run the TUI until the user quits or a signal arrives
pub async fn run(mut engine: Engine) -> Result<()> {
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    engine.start_signal_handler();

    let ui = &engine.state.settings.ui;
    let mut decorations = Decorations::new(ui.particle_count, engine.state.app().theme);
    info!(
        "TUI started (tick: {}ms, particles: {}, mascot: {})",
        ui.tick_rate_ms, ui.particles, ui.mascot
    );

    let result = run_loop(&mut term, &mut engine, &mut decorations);

    engine.shutdown().await;
    terminal::restore();

    if let Err(e) = &result {
        error!("TUI loop failed: {}", e);
    }
    result
}

/// Main event loop
fn run_loop(
    term: &mut ratatui::DefaultTerminal,
    engine: &mut Engine,
    decorations: &mut Decorations,
) -> Result<()> {
    let tick_rate = Duration::from_millis(engine.state.settings.ui.tick_rate_ms.max(1));
    let mut last_tick = Instant::now();
    let mut mouse_captured = false;

    while !engine.should_quit() {
        // Results from background tasks and the signal handler
        engine.drain_pending_messages();

        let size = term.size()?;
        decorations.sync(&engine.state, Rect::new(0, 0, size.width, size.height));

        let wants_pointer = decorations.wants_pointer();
        if wants_pointer != mouse_captured {
            terminal::set_mouse_capture(wants_pointer)?;
            mouse_captured = wants_pointer;
        }

        term.draw(|frame| render::view(frame, &engine.state, decorations))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        match event::poll(timeout)? {
            // Ticks are driven by elapsed time below, not by idle polls
            Some(Message::Tick) | None => {}
            Some(message) => engine.process_message(message),
        }

        if last_tick.elapsed() >= tick_rate {
            let now = Instant::now();
            decorations.tick(now, engine.state.pointer);
            engine.process_message(Message::Tick);
            last_tick = now;
        }
    }

    Ok(())
}
