#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BodyId, Displacement};

/// Notable transitions during an evolution step.
///
/// Plain data so it can be recorded during simulation and inspected or rendered later.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum WorldEvent {
    /// The contact set changed while moving; motion is latched off until idle.
    CollisionStop { tick: u64, contacts: Vec<BodyId> },
    /// A non-zero request produced no motion.
    Blocked {
        tick: u64,
        requested: Displacement,
        by_fixed: bool,
    },
    PickedUp { tick: u64, bodies: Vec<BodyId> },
    Dropped { tick: u64, bodies: Vec<BodyId> },
    Moved {
        tick: u64,
        displacement: Displacement,
        carried: usize,
    },
    MagnetismToggled { tick: u64, enabled: bool },
}

impl WorldEvent {
    pub fn tick(&self) -> u64 {
        match self {
            WorldEvent::CollisionStop { tick, .. }
            | WorldEvent::Blocked { tick, .. }
            | WorldEvent::PickedUp { tick, .. }
            | WorldEvent::Dropped { tick, .. }
            | WorldEvent::Moved { tick, .. }
            | WorldEvent::MagnetismToggled { tick, .. } => *tick,
        }
    }
}

pub trait EventSink {
    fn emit(&mut self, event: WorldEvent);
}

#[derive(Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&mut self, _event: WorldEvent) {}
}

#[derive(Debug, Default)]
pub struct VecEventSink {
    pub events: Vec<WorldEvent>,
}

impl EventSink for VecEventSink {
    fn emit(&mut self, event: WorldEvent) {
        self.events.push(event);
    }
}

impl VecEventSink {
    pub fn take(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }
}
