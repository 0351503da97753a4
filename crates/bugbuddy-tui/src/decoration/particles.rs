//! Drifting particle field
//!
//! Particles orbit the centre of their area slowly and twinkle. Each one
//! keeps three colour seeds in `0..1` which are mapped onto the channel
//! ranges of the current theme, so a theme change recolours the field
//! without re-seeding it.
//!
//! Particles sit behind the page: they are drawn after it, but only into
//! blank cells that still show the theme background.

use std::f32::consts::TAU;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use bugbuddy_core::Theme;

use super::Decoration;
use crate::theme::Palette;

const GLYPHS: [char; 4] = ['·', '∙', '•', '✦'];

/// Base angular speed of the field in radians per second
const ROTATION_SPEED: f32 = 0.05;

/// Per-channel colour range `(min, max)` in `0.0..=1.0`
type ChannelRanges = [(f32, f32); 3];

const DARK_RANGES: ChannelRanges = [(0.3, 1.0), (0.2, 1.0), (1.0, 1.0)];
const LIGHT_RANGES: ChannelRanges = [(0.2, 1.0), (0.1, 1.0), (0.8, 1.0)];

#[derive(Debug, Clone)]
struct Particle {
    /// Distance from the centre, as a fraction of the half extent
    radius: f32,
    angle: f32,
    /// Extra angular speed on top of [`ROTATION_SPEED`]
    spin: f32,
    glyph: char,
    color_seed: [f32; 3],
    /// Twinkle phase in radians
    phase: f32,
}

impl Particle {
    fn random(rng: &mut StdRng) -> Self {
        Self {
            radius: rng.gen_range(0.05..1.0),
            angle: rng.gen_range(0.0..TAU),
            spin: rng.gen_range(-0.02..0.04),
            glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
            color_seed: [rng.gen(), rng.gen(), rng.gen()],
            phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Cell of the particle relative to the area origin
    fn position(&self, area: Rect) -> (u16, u16) {
        let half_w = f32::from(area.width) / 2.0;
        let half_h = f32::from(area.height) / 2.0;
        let x = half_w + self.radius * self.angle.cos() * half_w;
        let y = half_h + self.radius * self.angle.sin() * half_h;
        (x as u16, y as u16)
    }

    /// Dim particles use the smallest glyph
    fn visible_glyph(&self) -> char {
        if self.phase.sin() < -0.6 {
            GLYPHS[0]
        } else {
            self.glyph
        }
    }
}

/// Map colour seeds onto the theme's channel ranges
pub fn particle_color(theme: Theme, seed: [f32; 3]) -> Color {
    let ranges = match theme {
        Theme::Dark => DARK_RANGES,
        Theme::Light => LIGHT_RANGES,
    };
    let channel = |i: usize| {
        let (min, max) = ranges[i];
        ((min + (max - min) * seed[i].clamp(0.0, 1.0)) * 255.0).round() as u8
    };
    Color::Rgb(channel(0), channel(1), channel(2))
}

pub struct Particles {
    rng: StdRng,
    count: usize,
    particles: Vec<Particle>,
    area: Option<Rect>,
    theme: Theme,
}

impl Particles {
    pub fn new(count: usize, theme: Theme) -> Self {
        Self::from_rng(count, theme, StdRng::from_entropy())
    }

    pub fn with_seed(count: usize, theme: Theme, seed: u64) -> Self {
        Self::from_rng(count, theme, StdRng::seed_from_u64(seed))
    }

    fn from_rng(count: usize, theme: Theme, rng: StdRng) -> Self {
        Self {
            rng,
            count,
            particles: Vec::new(),
            area: None,
            theme,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Background colour of the theme; only cells showing it are drawn on
    pub fn backdrop(&self) -> Color {
        Palette::new(self.theme, &Default::default()).background
    }

    /// Current colours, in particle order
    pub fn colors(&self) -> Vec<Color> {
        self.particles
            .iter()
            .map(|p| particle_color(self.theme, p.color_seed))
            .collect()
    }
}

impl Decoration for Particles {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn mount(&mut self, area: Rect) {
        let rng = &mut self.rng;
        self.particles = (0..self.count).map(|_| Particle::random(rng)).collect();
        self.area = Some(area);
    }

    fn on_theme_change(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn tick(&mut self, elapsed: Duration, _pointer: Option<(u16, u16)>) {
        let dt = elapsed.as_secs_f32();
        for particle in &mut self.particles {
            particle.angle = (particle.angle + (ROTATION_SPEED + particle.spin) * dt) % TAU;
            particle.phase = (particle.phase + 2.0 * dt) % TAU;
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        let backdrop = self.backdrop();
        for particle in &self.particles {
            let (dx, dy) = particle.position(area);
            if dx >= area.width || dy >= area.height {
                continue;
            }
            if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                if cell.symbol() == " " && cell.bg == backdrop {
                    cell.set_char(particle.visible_glyph())
                        .set_fg(particle_color(self.theme, particle.color_seed));
                }
            }
        }
    }

    fn unmount(&mut self) {
        self.particles = Vec::new();
        self.area = None;
    }

    fn mounted_area(&self) -> Option<Rect> {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    const AREA: Rect = Rect::new(0, 3, 80, 20);

    fn mounted(seed: u64) -> Particles {
        let mut particles = Particles::with_seed(30, Theme::Dark, seed);
        particles.mount(AREA);
        particles
    }

    #[test]
    fn test_mount_seeds_count() {
        let particles = mounted(1);
        assert_eq!(particles.len(), 30);
        assert_eq!(particles.mounted_area(), Some(AREA));
    }

    #[test]
    fn test_unmount_drops_particles() {
        let mut particles = mounted(1);
        particles.unmount();
        assert!(particles.is_empty());
        assert!(!particles.is_mounted());
    }

    #[test]
    fn test_dark_palette_is_bluish() {
        let particles = mounted(2);
        for color in particles.colors() {
            let Color::Rgb(r, g, b) = color else {
                panic!("expected rgb colour");
            };
            assert_eq!(b, 255);
            assert!(r >= 76, "red {} below range", r);
            assert!(g >= 51, "green {} below range", g);
        }
    }

    #[test]
    fn test_theme_change_recolours_without_reseeding() {
        let mut particles = mounted(3);
        let dark = particles.colors();
        particles.on_theme_change(Theme::Light);
        let light = particles.colors();

        assert_eq!(particles.len(), 30);
        assert_ne!(dark, light);
        for color in light {
            let Color::Rgb(_, _, b) = color else {
                panic!("expected rgb colour");
            };
            assert!(b >= 204);
        }
    }

    #[test]
    fn test_particle_color_bounds() {
        assert_eq!(particle_color(Theme::Dark, [0.0; 3]), Color::Rgb(77, 51, 255));
        assert_eq!(particle_color(Theme::Dark, [1.0; 3]), Color::Rgb(255, 255, 255));
        let Color::Rgb(r, _, b) = particle_color(Theme::Light, [0.0; 3]) else {
            panic!("expected rgb colour");
        };
        assert_eq!((r, b), (51, 204));
    }

    #[test]
    fn test_tick_rotates() {
        let mut particles = mounted(4);
        let before: Vec<f32> = particles.particles.iter().map(|p| p.angle).collect();
        particles.tick(Duration::from_secs(1), None);
        let after: Vec<f32> = particles.particles.iter().map(|p| p.angle).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_render_stays_inside_area() {
        let particles = mounted(5);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        buf.set_style(buf.area, Style::default().bg(particles.backdrop()));
        particles.render(AREA, &mut buf);

        let mut drawn = 0;
        for y in 0..24u16 {
            for x in 0..80u16 {
                if buf[(x, y)].symbol() != " " {
                    assert!(AREA.contains((x, y).into()), "particle outside at {},{}", x, y);
                    drawn += 1;
                }
            }
        }
        assert!(drawn > 0);
    }

    #[test]
    fn test_render_skips_occupied_cells() {
        let particles = mounted(6);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        // Text on the backdrop, and a card with its own background
        buf.set_style(buf.area, Style::default().bg(particles.backdrop()));
        buf.set_string(0, 3, "x".repeat(80), Style::default());
        buf.set_style(Rect::new(0, 4, 80, 20), Style::default().bg(Color::Rgb(1, 2, 3)));

        particles.render(AREA, &mut buf);

        for y in 3..24u16 {
            for x in 0..80u16 {
                let symbol = buf[(x, y)].symbol();
                assert!(symbol == "x" || symbol == " ", "drawn over {},{}", x, y);
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = mounted(9);
        let b = mounted(9);
        assert_eq!(a.colors(), b.colors());
    }
}
