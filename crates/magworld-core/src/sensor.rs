use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BodyId, Displacement, Registry};

/// Cardinal directions, in the order touch sensors report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Unit step; north is `-y`.
    pub const fn delta(self) -> Displacement {
        match self {
            Direction::West => Displacement::new(-1, 0),
            Direction::East => Displacement::new(1, 0),
            Direction::North => Displacement::new(0, -1),
            Direction::South => Displacement::new(0, 1),
        }
    }

    /// The direction of an axis-aligned unit displacement, if it is one.
    pub fn from_delta(d: Displacement) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| dir.delta() == d)
    }
}

/// One-hop contact per cardinal direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Touch {
    pub west: bool,
    pub east: bool,
    pub north: bool,
    pub south: bool,
}

impl Touch {
    pub fn sense(registry: &Registry, body: BodyId) -> Self {
        let probe = |dir: Direction| !registry.neighbors(body, dir.delta()).is_empty();
        Self {
            west: probe(Direction::West),
            east: probe(Direction::East),
            north: probe(Direction::North),
            south: probe(Direction::South),
        }
    }

    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::West => self.west,
            Direction::East => self.east,
            Direction::North => self.north,
            Direction::South => self.south,
        }
    }

    pub fn any(&self) -> bool {
        self.west || self.east || self.north || self.south
    }
}

impl fmt::Display for Touch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |b: bool| if b { '1' } else { '0' };
        write!(
            f,
            "{} {} {} {}",
            bit(self.west),
            bit(self.east),
            bit(self.north),
            bit(self.south)
        )
    }
}

/// What the agent can know after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sensors {
    /// Motion actually made this tick; zero when blocked or idle.
    pub realized: Displacement,
    pub touch: Touch,
    /// Tracked but not consulted by contact resolution.
    pub magnetism: bool,
}

impl Sensors {
    pub fn is_moving(&self) -> bool {
        !self.realized.is_zero()
    }

    pub fn motion(&self) -> Option<Direction> {
        Direction::from_delta(self.realized)
    }
}
