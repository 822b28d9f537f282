//! World state and the per-tick evolution step.

use tracing::{debug, info};

use crate::{
    Body, BodyId, BodySet, Displacement, EventSink, Intent, NullEventSink, Registry, Sensors,
    Touch, WorldError, WorldEvent,
};

/// Outcome of one [`World::evolve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub tick: u64,
    pub attempting: bool,
    pub requested: Displacement,
    pub realized: Displacement,
    /// The contact set changed this tick and latched `temp_stop`.
    pub collided: bool,
    /// A remaining (non-held) contact is fixed.
    pub fixed_contact: bool,
}

/// The single mutable simulation state: bodies plus contact, carry and sensor bookkeeping.
#[derive(Debug, Clone)]
pub struct World {
    registry: Registry,
    agent: BodyId,
    contacts: Option<BodySet>,
    holding: BodySet,
    temp_stop: bool,
    magnetism: bool,
    sensors: Sensors,
    tick: u64,
}

impl World {
    pub fn new(registry: Registry, agent: BodyId) -> Result<Self, WorldError> {
        let body = registry.get(agent).ok_or(WorldError::UnknownBody(agent))?;
        if body.kind().is_fixed() {
            return Err(WorldError::FixedAgent(body.name().to_string()));
        }
        let sensors = Sensors {
            realized: Displacement::ZERO,
            touch: Touch::sense(&registry, agent),
            magnetism: false,
        };
        Ok(Self {
            registry,
            agent,
            contacts: None,
            holding: BodySet::new(),
            temp_stop: false,
            magnetism: false,
            sensors,
            tick: 0,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn agent(&self) -> BodyId {
        self.agent
    }

    pub fn agent_body(&self) -> &Body {
        self.registry.body(self.agent)
    }

    /// Contact subtree from the last attempting tick, minus held bodies; `None` while idle.
    pub fn contacts(&self) -> Option<&BodySet> {
        self.contacts.as_ref()
    }

    pub fn holding(&self) -> &BodySet {
        &self.holding
    }

    pub fn is_holding(&self, id: BodyId) -> bool {
        self.holding.contains(&id)
    }

    pub fn temp_stop(&self) -> bool {
        self.temp_stop
    }

    pub fn magnetism(&self) -> bool {
        self.magnetism
    }

    pub fn sensors(&self) -> &Sensors {
        &self.sensors
    }

    /// Number of completed evolution steps.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn evolve(&mut self, intent: &Intent) -> StepReport {
        self.evolve_with(intent, &mut NullEventSink)
    }

    pub fn evolve_with(&mut self, intent: &Intent, events: &mut dyn EventSink) -> StepReport {
        let tick = self.tick;

        if intent.toggle_magnetism {
            self.magnetism = !self.magnetism;
            events.emit(WorldEvent::MagnetismToggled {
                tick,
                enabled: self.magnetism,
            });
        }

        let requested = intent.motion.unit();
        let report = if intent.is_attempting() {
            self.attempt(tick, requested, intent, events)
        } else {
            self.rest(tick)
        };

        self.sensors = Sensors {
            realized: report.realized,
            touch: Touch::sense(&self.registry, self.agent),
            magnetism: self.magnetism,
        };
        self.tick += 1;
        report
    }

    fn rest(&mut self, tick: u64) -> StepReport {
        self.contacts = None;
        self.temp_stop = false;
        StepReport {
            tick,
            attempting: false,
            requested: Displacement::ZERO,
            realized: Displacement::ZERO,
            collided: false,
            fixed_contact: false,
        }
    }

    fn attempt(
        &mut self,
        tick: u64,
        requested: Displacement,
        intent: &Intent,
        events: &mut dyn EventSink,
    ) -> StepReport {
        let previous = self.contacts.take();
        let mut contacts = self.registry.contact_subtree(self.agent, requested);

        if intent.pickup {
            self.holding = self.registry.self_and_all_pickable_neighbors(self.agent);
            info!(
                tick,
                holding = ?self.registry.names(&self.holding),
                "Picked up"
            );
            events.emit(WorldEvent::PickedUp {
                tick,
                bodies: self.holding.iter().copied().collect(),
            });
        }
        if intent.drop {
            let dropped = std::mem::take(&mut self.holding);
            if !dropped.is_empty() {
                info!(tick, dropped = ?self.registry.names(&dropped), "Dropped");
                events.emit(WorldEvent::Dropped {
                    tick,
                    bodies: dropped.into_iter().collect(),
                });
            }
        }

        contacts.retain(|id| !self.holding.contains(id));

        let collided = matches!(&previous, Some(prev) if *prev != contacts);
        if collided {
            self.temp_stop = true;
            info!(
                tick,
                contacts = ?self.registry.names(&contacts),
                "Collision, stopping"
            );
            events.emit(WorldEvent::CollisionStop {
                tick,
                contacts: contacts.iter().copied().collect(),
            });
        }

        let fixed_contact = contacts
            .iter()
            .any(|id| self.registry.body(*id).kind().is_fixed());
        let realized = if self.temp_stop || fixed_contact {
            Displacement::ZERO
        } else {
            requested
        };

        debug!(
            tick,
            contacts = ?self.registry.names(&contacts),
            holding = ?self.registry.names(&self.holding),
            temp_stop = self.temp_stop,
            "Evolved"
        );

        if realized.is_zero() {
            if !requested.is_zero() {
                events.emit(WorldEvent::Blocked {
                    tick,
                    requested,
                    by_fixed: fixed_contact,
                });
            }
        } else {
            self.registry.body_mut(self.agent).translate(realized);
            let mut carried = 0;
            for &id in &self.holding {
                if id == self.agent {
                    continue;
                }
                self.registry.body_mut(id).translate(realized);
                carried += 1;
            }
            events.emit(WorldEvent::Moved {
                tick,
                displacement: realized,
                carried,
            });
        }

        self.contacts = Some(contacts);
        StepReport {
            tick,
            attempting: true,
            requested,
            realized,
            collided,
            fixed_contact,
        }
    }
}
