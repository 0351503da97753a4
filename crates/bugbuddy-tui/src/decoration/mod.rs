//! Ambient decorations: the particle field and the landing page mascot
//!
//! Decorations only read the theme, the elapsed time and the pointer. They
//! never touch application state, so turning them off changes nothing but
//! the picture.
//!
//! [`Decorations`] decides which decorations are mounted and where. It is
//! synced once per frame with the application state and the screen size:
//! - a decoration is mounted when its setting is on (and, for the mascot,
//!   the landing page is shown);
//! - a changed target area (resize, navigation) remounts it;
//! - a theme change is forwarded to every mounted decoration.

mod mascot;
mod particles;

pub use mascot::Mascot;
pub use particles::Particles;

use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use bugbuddy_app::state::AppState;
use bugbuddy_core::prelude::*;
use bugbuddy_core::{Page, Theme};

use crate::layout;
use crate::pages::landing;

/// Longest step a single tick may advance animations
const MAX_TICK_STEP: Duration = Duration::from_millis(200);

/// An ambient animation drawn on top of (or behind) the page
pub trait Decoration {
    fn name(&self) -> &'static str;

    /// Start drawing into `area`. Mounting again replaces the previous area
    /// and resets the animation state.
    fn mount(&mut self, area: Rect);

    fn on_theme_change(&mut self, theme: Theme);

    /// Advance the animation. `pointer` is the last known pointer cell.
    fn tick(&mut self, elapsed: Duration, pointer: Option<(u16, u16)>);

    fn render(&self, area: Rect, buf: &mut Buffer);

    /// Stop drawing and drop all animation state
    fn unmount(&mut self);

    fn mounted_area(&self) -> Option<Rect>;

    fn is_mounted(&self) -> bool {
        self.mounted_area().is_some()
    }

    /// True while the decoration reacts to pointer movement
    fn wants_pointer(&self) -> bool {
        false
    }
}

/// Mount a decoration into `target`, or unmount it when `target` is `None`
fn sync_one(decoration: &mut dyn Decoration, target: Option<Rect>, theme: Theme) {
    match (decoration.mounted_area(), target) {
        (current, Some(area)) if current != Some(area) => {
            debug!("Mounting {} at {:?}", decoration.name(), area);
            decoration.on_theme_change(theme);
            decoration.mount(area);
        }
        (Some(_), None) => {
            debug!("Unmounting {}", decoration.name());
            decoration.unmount();
        }
        _ => {}
    }
}

/// Owner of every decoration
pub struct Decorations {
    particles: Particles,
    mascot: Mascot,
    theme: Theme,
    last_tick: Option<Instant>,
}

impl Decorations {
    pub fn new(particle_count: usize, theme: Theme) -> Self {
        Self {
            particles: Particles::new(particle_count, theme),
            mascot: Mascot::new(theme),
            theme,
            last_tick: None,
        }
    }

    /// Deterministic particle placement for tests
    #[cfg(test)]
    pub fn with_seed(particle_count: usize, theme: Theme, seed: u64) -> Self {
        Self {
            particles: Particles::with_seed(particle_count, theme, seed),
            ..Self::new(particle_count, theme)
        }
    }

    /// Match mounts to settings, page, theme and screen size
    pub fn sync(&mut self, state: &AppState, screen: Rect) {
        let ui = &state.settings.ui;
        let app = state.app();

        if app.theme != self.theme {
            self.theme = app.theme;
            for decoration in self.all_mut() {
                if decoration.is_mounted() {
                    decoration.on_theme_change(app.theme);
                }
            }
        }

        let content = layout::create(screen).content;
        let particle_target = ui.particles.then_some(content);
        let mascot_target = (ui.mascot && app.current_page == Page::Landing)
            .then(|| landing::mascot_area(layout::page_area(screen)));

        let theme = self.theme;
        sync_one(&mut self.particles, particle_target, theme);
        sync_one(&mut self.mascot, mascot_target, theme);
    }

    /// Advance mounted decorations to `now`
    pub fn tick(&mut self, now: Instant, pointer: Option<(u16, u16)>) {
        let elapsed = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).min(MAX_TICK_STEP))
            .unwrap_or_default();
        self.last_tick = Some(now);

        for decoration in self.all_mut() {
            if decoration.is_mounted() {
                decoration.tick(elapsed, pointer);
            }
        }
    }

    /// Draw mounted decorations over a rendered page
    pub fn render(&self, buf: &mut Buffer) {
        let layers: [&dyn Decoration; 2] = [&self.particles, &self.mascot];
        for decoration in layers {
            if let Some(area) = decoration.mounted_area() {
                decoration.render(area, buf);
            }
        }
    }

    /// True when any mounted decoration follows the pointer
    pub fn wants_pointer(&self) -> bool {
        self.particles.wants_pointer() || self.mascot.wants_pointer()
    }

    pub fn any_mounted(&self) -> bool {
        self.particles.is_mounted() || self.mascot.is_mounted()
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn mascot(&self) -> &Mascot {
        &self.mascot
    }

    fn all_mut(&mut self) -> [&mut dyn Decoration; 2] {
        [&mut self.particles, &mut self.mascot]
    }
}
