//! Occupied-cell sets built from lines, hollow rectangles and unions.

use std::collections::BTreeSet;

use crate::{Offset, WorldError};

/// Horizontal run of `w` cells starting at `(x, y)`.
pub fn hline(x: i32, y: i32, w: i32) -> Vec<Offset> {
    (x..x + w).map(|i| Offset::new(i, y)).collect()
}

/// Vertical run of `h` cells starting at `(x, y)`.
pub fn vline(x: i32, y: i32, h: i32) -> Vec<Offset> {
    (y..y + h).map(|j| Offset::new(x, j)).collect()
}

/// Border of a `w` x `h` rectangle anchored at the origin.
///
/// Only the perimeter is produced: `rect(5, 5)` yields the 16 outline cells and none of the
/// 9 interior ones, so bodies built from it are hollow and only their outline can touch.
pub fn rect(w: i32, h: i32) -> Vec<Offset> {
    let mut cells = hline(0, 0, w);
    cells.extend(hline(0, h - 1, w));
    cells.extend(vline(0, 1, h - 2));
    cells.extend(vline(w - 1, 1, h - 2));
    cells
}

/// Inclusive axis-aligned bounds of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Offset,
    pub max: Offset,
}

impl Bounds {
    fn around(cells: &BTreeSet<Offset>) -> Option<Self> {
        let mut iter = cells.iter().copied();
        let first = iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for c in iter {
            bounds.min.x = bounds.min.x.min(c.x);
            bounds.min.y = bounds.min.y.min(c.y);
            bounds.max.x = bounds.max.x.max(c.x);
            bounds.max.y = bounds.max.y.max(c.y);
        }
        Some(bounds)
    }

    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            min: self.min.shifted(dx, dy),
            max: self.max.shifted(dx, dy),
        }
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }
}

/// A non-empty, immutable set of cell offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: BTreeSet<Offset>,
    bounds: Bounds,
}

impl Shape {
    pub fn new<I, O>(cells: I) -> Result<Self, WorldError>
    where
        I: IntoIterator<Item = O>,
        O: Into<Offset>,
    {
        let cells: BTreeSet<Offset> = cells.into_iter().map(Into::into).collect();
        let bounds = Bounds::around(&cells).ok_or(WorldError::EmptyShape)?;
        Ok(Self { cells, bounds })
    }

    pub fn builder() -> ShapeBuilder {
        ShapeBuilder::default()
    }

    /// Hollow `w` x `h` rectangle.
    pub fn rect(w: i32, h: i32) -> Result<Self, WorldError> {
        Self::new(rect(w, h))
    }

    pub fn contains(&self, cell: Offset) -> bool {
        self.cells.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Offset> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn union(&self, other: &Shape) -> Shape {
        let cells: BTreeSet<Offset> = self.cells.union(&other.cells).copied().collect();
        let bounds = Bounds {
            min: Offset::new(
                self.bounds.min.x.min(other.bounds.min.x),
                self.bounds.min.y.min(other.bounds.min.y),
            ),
            max: Offset::new(
                self.bounds.max.x.max(other.bounds.max.x),
                self.bounds.max.y.max(other.bounds.max.y),
            ),
        };
        Shape { cells, bounds }
    }
}

/// Accumulates primitive cell sets; duplicates collapse.
#[derive(Debug, Clone, Default)]
pub struct ShapeBuilder {
    cells: BTreeSet<Offset>,
}

impl ShapeBuilder {
    pub fn hline(mut self, x: i32, y: i32, w: i32) -> Self {
        self.cells.extend(hline(x, y, w));
        self
    }

    pub fn vline(mut self, x: i32, y: i32, h: i32) -> Self {
        self.cells.extend(vline(x, y, h));
        self
    }

    pub fn rect(self, w: i32, h: i32) -> Self {
        self.rect_at(0, 0, w, h)
    }

    pub fn rect_at(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.cells
            .extend(rect(w, h).into_iter().map(|c| c.shifted(x, y)));
        self
    }

    pub fn cells<I, O>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Offset>,
    {
        self.cells.extend(cells.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Shape, WorldError> {
        Shape::new(self.cells)
    }
}
