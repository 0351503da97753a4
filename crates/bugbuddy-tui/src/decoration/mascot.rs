//! The BugBuddy mascot
//!
//! A six-legged bug whose pupils follow the pointer and whose wings flap.
//! The sprite is built from `(column, text, part)` segments so each part can
//! be coloured separately.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use bugbuddy_core::Theme;

use super::Decoration;
use crate::theme::palette::{MASCOT_BODY, MASCOT_HEAD, MASCOT_LEGS, MASCOT_WING};

pub const SPRITE_WIDTH: u16 = 24;
pub const SPRITE_HEIGHT: u16 = 10;

/// Time per wing position
const WING_BEAT: Duration = Duration::from_millis(250);

/// Eye sockets: (column, row) of the leftmost cell, each three cells wide
const EYES: [(u16, u16); 2] = [(8, 3), (13, 3)];

const EYE_WHITE: Color = Color::Rgb(255, 255, 255);
const PUPIL: Color = Color::Rgb(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Antenna,
    Head,
    Body,
    Wing,
    Legs,
}

type Segment = (u16, &'static str, Part);

const WINGS_UP: &[(u16, &[Segment])] = &[
    (3, &[(1, "▁▂▃", Part::Wing), (20, "▃▂▁", Part::Wing)]),
    (4, &[(0, "◥████", Part::Wing), (19, "████◤", Part::Wing)]),
    (5, &[(2, "◥██", Part::Wing), (19, "██◤", Part::Wing)]),
];

const WINGS_DOWN: &[(u16, &[Segment])] = &[
    (5, &[(2, "◢██", Part::Wing), (19, "██◣", Part::Wing)]),
    (6, &[(0, "◢████", Part::Wing), (19, "████◣", Part::Wing)]),
    (7, &[(1, "▔▔▔", Part::Wing), (20, "▔▔▔", Part::Wing)]),
];

/// Drawn after the wings, in order
const BODY: &[(u16, &[Segment])] = &[
    (0, &[(6, "╲", Part::Antenna), (17, "╱", Part::Antenna)]),
    (1, &[(7, "╲", Part::Antenna), (16, "╱", Part::Antenna)]),
    (2, &[(8, "▄██████▄", Part::Head)]),
    (3, &[(7, "█", Part::Head), (11, "██", Part::Head), (16, "█", Part::Head)]),
    (4, &[(7, "▀████████▀", Part::Head)]),
    (5, &[(8, "▐██████▌", Part::Body)]),
    (
        6,
        &[(4, "╲━━", Part::Legs), (8, "████████", Part::Body), (16, "━━╱", Part::Legs)],
    ),
    (
        7,
        &[(4, "━━━━", Part::Legs), (8, "████████", Part::Body), (16, "━━━━", Part::Legs)],
    ),
    (
        8,
        &[(4, "╱━━", Part::Legs), (8, "████████", Part::Body), (16, "━━╲", Part::Legs)],
    ),
    (9, &[(9, "▀████▀", Part::Body)]),
];

pub struct Mascot {
    area: Option<Rect>,
    theme: Theme,
    /// Animation time since mount
    elapsed: Duration,
    /// Pupil offset per axis, each in -1..=1
    gaze: (i8, i8),
}

impl Mascot {
    pub fn new(theme: Theme) -> Self {
        Self {
            area: None,
            theme,
            elapsed: Duration::ZERO,
            gaze: (0, 0),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn gaze(&self) -> (i8, i8) {
        self.gaze
    }

    pub fn wings_up(&self) -> bool {
        (self.elapsed.as_millis() / WING_BEAT.as_millis()) % 2 == 0
    }

    /// Top-left corner of the sprite, centred in the mounted area
    fn origin(&self, area: Rect) -> (u16, u16) {
        (
            area.x + area.width.saturating_sub(SPRITE_WIDTH) / 2,
            area.y + area.height.saturating_sub(SPRITE_HEIGHT) / 2,
        )
    }

    fn color(&self, part: Part) -> Color {
        match part {
            Part::Antenna => match self.theme {
                Theme::Dark => Color::Rgb(156, 163, 175),
                Theme::Light => Color::Rgb(55, 65, 81),
            },
            Part::Head => MASCOT_HEAD,
            Part::Body => MASCOT_BODY,
            Part::Wing => MASCOT_WING,
            Part::Legs => MASCOT_LEGS,
        }
    }

    fn look_at(&mut self, pointer: (u16, u16)) {
        let Some(area) = self.area else {
            return;
        };
        let (ox, oy) = self.origin(area);
        // Midpoint between the two eyes
        let eye_x = i32::from(ox) + i32::from(EYES[0].0 + EYES[1].0 + 2) / 2;
        let eye_y = i32::from(oy) + i32::from(EYES[0].1);

        let dx = i32::from(pointer.0) - eye_x;
        let dy = i32::from(pointer.1) - eye_y;

        // Terminal cells are about twice as tall as wide
        let step = |d: i32, dead_zone: i32| -> i8 {
            if d > dead_zone {
                1
            } else if d < -dead_zone {
                -1
            } else {
                0
            }
        };
        self.gaze = (step(dx, 2), step(dy, 1));
    }
}

/// Write `text` starting at `(x, y)`, clipped to `clip`
fn put(buf: &mut Buffer, clip: Rect, x: u16, y: u16, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as u16;
        if cx >= clip.right() || y >= clip.bottom() || cx < clip.x || y < clip.y {
            continue;
        }
        if let Some(cell) = buf.cell_mut((cx, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

impl Decoration for Mascot {
    fn name(&self) -> &'static str {
        "mascot"
    }

    fn mount(&mut self, area: Rect) {
        self.area = Some(area);
        self.elapsed = Duration::ZERO;
        self.gaze = (0, 0);
    }

    fn on_theme_change(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn tick(&mut self, elapsed: Duration, pointer: Option<(u16, u16)>) {
        self.elapsed += elapsed;
        if let Some(pointer) = pointer {
            self.look_at(pointer);
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let clip = area.intersection(buf.area);
        if clip.is_empty() {
            return;
        }
        let (ox, oy) = self.origin(area);

        let wings = if self.wings_up() { WINGS_UP } else { WINGS_DOWN };
        for (row, segments) in wings.iter().chain(BODY.iter()) {
            for (col, text, part) in segments.iter() {
                let style = Style::default().fg(self.color(*part));
                put(buf, clip, ox + col, oy + row, text, style);
            }
        }

        let (gx, gy) = self.gaze;
        let pupil = match gy {
            -1 => "▀",
            1 => "▄",
            _ => "●",
        };
        let white = Style::default().fg(PUPIL).bg(EYE_WHITE);
        for (col, row) in EYES {
            put(buf, clip, ox + col, oy + row, "   ", white);
            let pupil_col = (i32::from(col) + 1 + i32::from(gx)) as u16;
            put(buf, clip, ox + pupil_col, oy + row, pupil, white);
        }
    }

    fn unmount(&mut self) {
        self.area = None;
        self.elapsed = Duration::ZERO;
        self.gaze = (0, 0);
    }

    fn mounted_area(&self) -> Option<Rect> {
        self.area
    }

    fn wants_pointer(&self) -> bool {
        self.area.is_some()
    }
}
