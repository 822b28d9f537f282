//! Static world layouts.

use crate::{Body, Color, Registry, Shape, World, WorldError};

pub const AGENT: &str = "agent";
pub const ARENA: &str = "arena";

/// The reference world: a 13x13 agent inside a walled 190x190 arena with a few props.
pub fn demo() -> Result<World, WorldError> {
    let mut registry = Registry::new();

    let agent =
        registry.insert(Body::new(AGENT, Shape::rect(13, 13)?, (30, 50)).with_color(Color::RED))?;

    let arena = Shape::builder()
        .rect(190, 190)
        .hline(12, 110, 170)
        .vline(100, 5, 20)
        .vline(100, 50, 130)
        .vline(102, 5, 20)
        .vline(102, 50, 130)
        .build()?;
    registry.insert(Body::new(ARENA, arena, (4, 4)).with_color(Color::GRAY).fixed())?;

    let props = [
        ("blue", 10, 10, (30, 30), Color::BLUE),
        ("door", 1, 50, (105, 20), Color::BLUE),
        ("green", 10, 10, (60, 30), Color::GREEN),
        ("orange", 5, 10, (60, 20), Color::ORANGE),
        ("reward", 2, 2, (13, 125), Color::ORANGE),
    ];
    for (name, w, h, at, color) in props {
        registry.insert(Body::new(name, Shape::rect(w, h)?, at).with_color(color))?;
    }

    let l_shape = Shape::builder()
        .hline(0, 0, 4)
        .vline(4, 0, 15)
        .hline(4, 15, 3)
        .vline(7, 15, 4)
        .hline(0, 19, 8)
        .vline(0, 0, 19)
        .build()?;
    registry.insert(Body::new("L", l_shape, (70, 20)))?;

    World::new(registry, agent)
}
