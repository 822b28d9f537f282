//! Turn-based driver: evolve, publish, let the controller react.

use tracing::trace;

use crate::{
    Command, Controller, EventSink, Intent, StepReport, TickContext, World, WorldSnapshot,
};

/// Result of one [`Simulation::step`].
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub report: StepReport,
    pub snapshot: WorldSnapshot,
    /// Render mode in effect for this snapshot.
    pub blind: bool,
    /// Effectors chosen for the next tick.
    pub next: Intent,
    pub quit: bool,
}

pub struct Simulation<C: Controller> {
    world: World,
    controller: C,
    effectors: Intent,
    blind: bool,
    seed: u64,
}

impl<C: Controller> Simulation<C> {
    pub fn new(world: World, controller: C) -> Self {
        Self {
            world,
            controller,
            effectors: Intent::IDLE,
            blind: false,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_blind_mode(mut self, blind: bool) -> Self {
        self.blind = blind;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn blind_mode(&self) -> bool {
        self.blind
    }

    /// evolve(effectors) -> snapshot -> behave(sensors) -> next effectors.
    pub fn step(&mut self, events: &mut dyn EventSink) -> TickOutput {
        let report = self.world.evolve_with(&self.effectors, events);
        let snapshot = self.world.snapshot();
        let shown_blind = self.blind;

        let ctx = TickContext {
            tick: report.tick,
            seed: self.seed,
        };
        let (next, quit) = match self.controller.behave(&ctx, self.world.sensors()) {
            Command::Act(intent) => (intent, false),
            Command::Quit => (Intent::IDLE, true),
        };
        if next.toggle_blind {
            self.blind = !self.blind;
        }
        self.effectors = next;

        let sensors = self.world.sensors();
        trace!(
            tick = report.tick,
            mdx = next.motion.dx,
            mdy = next.motion.dy,
            magnetism = sensors.magnetism,
            adx = sensors.realized.dx,
            ady = sensors.realized.dy,
            touch = %sensors.touch,
            "Tick"
        );

        TickOutput {
            report,
            snapshot,
            blind: shown_blind,
            next,
            quit,
        }
    }
}
