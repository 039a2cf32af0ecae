// File: crates/area-chart-core/src/scene.rs
// Summary: Backend-agnostic display list produced by a render pass (colors, strokes, commands).

use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;
use crate::geometry::{Point, Rect};

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Default series stroke.
    pub const CHART_LINE_PRIMARY: Self = Self::rgb(37, 99, 235);
    pub const GRID: Self = Self::rgb(229, 229, 229);
    pub const CROSSHAIR: Self = Self::rgb(163, 163, 163);
    pub const LABEL: Self = Self::rgb(64, 64, 64);
    pub const TOOLTIP_BACKGROUND: Self = Self::rgba(23, 23, 23, 235);
    pub const SELECTION: Self = Self::rgba(37, 99, 235, 40);

    /// Same color with the alpha channel scaled by `opacity` (0..=1).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// `#rrggbb` without alpha.
    pub fn to_hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChartError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|_| invalid());
        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Dash pattern as (on, off) lengths.
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    pub const fn solid(color: Color, width: f32) -> Self {
        Self { color, width, dash: None }
    }

    pub const fn dashed(color: Color, width: f32, on: f32, off: f32) -> Self {
        Self { color, width, dash: Some((on, off)) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    /// Offset subsequent commands until the matching `PopTranslate`.
    PushTranslate { dx: f64, dy: f64 },
    PopTranslate,
    /// Clip subsequent commands to a rectangle until the matching `PopClip`.
    PushClip(Rect),
    PopClip,
    Rect { rect: Rect, fill: Color, stroke: Option<Stroke> },
    Line { from: Point, to: Point, stroke: Stroke },
    Polyline { points: Vec<Point>, stroke: Stroke },
    /// Filled region between a polyline and a horizontal baseline.
    Area { points: Vec<Point>, baseline: f64, fill: Color },
    Circle { center: Point, radius: f64, fill: Color, stroke: Option<Stroke> },
    /// Text drawn with its baseline at `position.y`.
    Text { position: Point, text: String, size: f32, color: Color, anchor: TextAnchor },
}

/// Ordered display list for one chart frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    commands: Vec<RenderCommand>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize { self.commands.len() }
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    /// Run `draw` with commands offset by (dx, dy).
    pub fn translated(&mut self, dx: f64, dy: f64, draw: impl FnOnce(&mut Scene)) {
        self.push(RenderCommand::PushTranslate { dx, dy });
        draw(self);
        self.push(RenderCommand::PopTranslate);
    }

    /// Run `draw` with commands clipped to `rect`.
    pub fn clipped(&mut self, rect: Rect, draw: impl FnOnce(&mut Scene)) {
        self.push(RenderCommand::PushClip(rect));
        draw(self);
        self.push(RenderCommand::PopClip);
    }
}
