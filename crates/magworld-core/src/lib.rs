//! Deterministic grid-body world: contact propagation, carrying and touch sensing.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod body;
pub mod contact;
pub mod controller;
pub mod error;
pub mod event;
pub mod geom;
pub mod layout;
pub mod registry;
pub mod rng;
pub mod sensor;
pub mod shape;
pub mod sim;
pub mod snapshot;
pub mod tick;
pub mod world;

pub use body::{Body, BodyId, BodyKind, Color};
pub use contact::{overlaps, BodySet};
pub use controller::{Command, Controller, Intent, ScriptedController, WanderController};
pub use error::WorldError;
pub use event::{EventSink, NullEventSink, VecEventSink, WorldEvent};
pub use geom::{Displacement, Offset, Position};
pub use registry::Registry;
pub use rng::{DeterministicRng, SplitMix64};
pub use sensor::{Direction, Sensors, Touch};
pub use shape::{hline, rect, vline, Bounds, Shape, ShapeBuilder};
pub use sim::{Simulation, TickOutput};
pub use snapshot::{BlindView, BodyView, RenderFrame, WorldSnapshot};
pub use tick::TickContext;
pub use world::{StepReport, World};
