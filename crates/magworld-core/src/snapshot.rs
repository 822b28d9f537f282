//! Owned, per-tick views of the world for renderers and controllers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BodyId, BodyKind, Color, Direction, Offset, Position, Sensors, Touch, World};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyView {
    pub id: BodyId,
    pub name: String,
    pub position: Position,
    pub color: Color,
    pub kind: BodyKind,
    pub held: bool,
    /// Offsets relative to `position`.
    pub cells: Vec<Offset>,
}

impl BodyView {
    pub fn world_cells(&self) -> impl Iterator<Item = Offset> + '_ {
        self.cells.iter().map(move |c| self.position.cell(*c))
    }
}

/// Sensor-only frame: what the agent could know without seeing the world.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlindView {
    pub agent_cells: Vec<Offset>,
    pub touch: Touch,
    pub magnetism: bool,
    pub moving: bool,
    /// Set only for axis-aligned motion.
    pub motion: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum RenderFrame {
    Full { bodies: Vec<BodyView> },
    Blind(BlindView),
}

/// Everything published after one tick. Readers never see a half-applied step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldSnapshot {
    pub tick: u64,
    pub agent: BodyId,
    pub sensors: Sensors,
    pub temp_stop: bool,
    pub contacts: Option<Vec<BodyId>>,
    pub holding: Vec<BodyId>,
    pub bodies: Vec<BodyView>,
}

impl WorldSnapshot {
    pub fn body(&self, id: BodyId) -> Option<&BodyView> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn agent_view(&self) -> Option<&BodyView> {
        self.body(self.agent)
    }

    pub fn blind(&self) -> BlindView {
        BlindView {
            agent_cells: self
                .agent_view()
                .map(|b| b.cells.clone())
                .unwrap_or_default(),
            touch: self.sensors.touch,
            magnetism: self.sensors.magnetism,
            moving: self.sensors.is_moving(),
            motion: self.sensors.motion(),
        }
    }

    pub fn frame(&self, blind: bool) -> RenderFrame {
        if blind {
            RenderFrame::Blind(self.blind())
        } else {
            RenderFrame::Full {
                bodies: self.bodies.clone(),
            }
        }
    }
}

impl World {
    pub fn snapshot(&self) -> WorldSnapshot {
        let bodies = self
            .registry()
            .iter()
            .map(|(id, body)| BodyView {
                id,
                name: body.name().to_string(),
                position: body.position(),
                color: body.color(),
                kind: body.kind(),
                held: id != self.agent() && self.is_holding(id),
                cells: body.shape().cells().collect(),
            })
            .collect();

        WorldSnapshot {
            tick: self.tick(),
            agent: self.agent(),
            sensors: *self.sensors(),
            temp_stop: self.temp_stop(),
            contacts: self.contacts().map(|c| c.iter().copied().collect()),
            holding: self.holding().iter().copied().collect(),
            bodies,
        }
    }

    pub fn blind_view(&self) -> BlindView {
        let sensors = self.sensors();
        BlindView {
            agent_cells: self.agent_body().shape().cells().collect(),
            touch: sensors.touch,
            magnetism: sensors.magnetism,
            moving: sensors.is_moving(),
            motion: sensors.motion(),
        }
    }
}
