use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Displacement, Offset, Position, Shape};

/// Stable handle for a body: its index in the owning [`crate::Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub(crate) u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BodyKind {
    #[default]
    Movable,
    /// Immovable, e.g. the arena boundary. Never liftable, always blocks.
    Fixed,
}

impl BodyKind {
    pub fn is_fixed(self) -> bool {
        matches!(self, BodyKind::Fixed)
    }
}

/// Display attribute. The kernel never interprets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 128, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const GRAY: Color = Color::rgb(220, 220, 220);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A rigid collection of occupied cells anchored at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    name: String,
    position: Position,
    shape: Shape,
    color: Color,
    kind: BodyKind,
}

impl Body {
    pub fn new(name: impl Into<String>, shape: Shape, position: impl Into<Position>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            shape,
            color: Color::BLACK,
            kind: BodyKind::Movable,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn fixed(self) -> Self {
        self.with_kind(BodyKind::Fixed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Occupied cells in world coordinates.
    pub fn world_cells(&self) -> impl Iterator<Item = Offset> + '_ {
        let position = self.position;
        self.shape.cells().map(move |c| position.cell(c))
    }

    pub(crate) fn translate(&mut self, d: Displacement) {
        self.position = self.position.translated(d);
    }
}
