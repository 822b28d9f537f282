//! Controller seam: whatever decides the agent's next move.

use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng::DeterministicRng;
use crate::{Direction, Displacement, Sensors, SplitMix64, TickContext, WorldError};

/// Effector values for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Intent {
    /// Requested displacement; components are clamped to `{-1, 0, 1}` on evaluation.
    pub motion: Displacement,
    pub pickup: bool,
    pub drop: bool,
    /// Edge-triggered: flips once per intent that sets it.
    pub toggle_magnetism: bool,
    /// Edge-triggered; consumed by the driver, not the world.
    pub toggle_blind: bool,
}

impl Intent {
    pub const IDLE: Intent = Intent {
        motion: Displacement::ZERO,
        pickup: false,
        drop: false,
        toggle_magnetism: false,
        toggle_blind: false,
    };

    pub fn moving(dx: i32, dy: i32) -> Self {
        Self {
            motion: Displacement::new(dx, dy).unit(),
            ..Self::IDLE
        }
    }

    pub fn step(dir: Direction) -> Self {
        Self {
            motion: dir.delta(),
            ..Self::IDLE
        }
    }

    pub fn pickup() -> Self {
        Self {
            pickup: true,
            ..Self::IDLE
        }
    }

    pub fn drop() -> Self {
        Self {
            drop: true,
            ..Self::IDLE
        }
    }

    pub fn toggle_magnetism() -> Self {
        Self {
            toggle_magnetism: true,
            ..Self::IDLE
        }
    }

    pub fn toggle_blind() -> Self {
        Self {
            toggle_blind: true,
            ..Self::IDLE
        }
    }

    /// Motion, pickup or drop requested. Toggles alone leave the world idle.
    pub fn is_attempting(&self) -> bool {
        !self.motion.is_zero() || self.pickup || self.drop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(Intent),
    Quit,
}

pub trait Controller {
    fn behave(&mut self, ctx: &TickContext, sensors: &Sensors) -> Command;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn behave(&mut self, ctx: &TickContext, sensors: &Sensors) -> Command {
        (**self).behave(ctx, sensors)
    }
}

/// Replays a key script.
///
/// Keys: `h`/`l` west/east, `k`/`j` north/south, `p` pickup, `d` drop, `m` magnetism,
/// `b` blind mode, `.` idle, `q` quit. A key may be followed by a repeat count (`l12`) of at
/// most [`ScriptedController::MAX_REPEAT`].
/// Held keys (moves, pickup, drop) stay down for the count and are then released for one
/// idle tick, so `l3 l3` bumps twice where `l6` pushes on. Whitespace is ignored.
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    queue: VecDeque<Command>,
}

impl ScriptedController {
    /// Largest repeat count a single key accepts.
    pub const MAX_REPEAT: u32 = 10_000;

    pub fn parse(script: &str) -> Result<Self, WorldError> {
        let mut out = Self::default();
        out.push_script(script)?;
        Ok(out)
    }

    /// Append more script; on error nothing is appended.
    pub fn push_script(&mut self, script: &str) -> Result<(), WorldError> {
        let mut parsed = VecDeque::new();
        let chars: Vec<(usize, char)> = script.char_indices().collect();
        let mut i = 0;
        while i < chars.len() {
            let (offset, key) = chars[i];
            i += 1;
            if key.is_whitespace() {
                continue;
            }

            let start = i;
            while i < chars.len() && chars[i].1.is_ascii_digit() {
                i += 1;
            }
            let count = if start == i {
                1
            } else {
                let digits: String = chars[start..i].iter().map(|(_, c)| *c).collect();
                digits
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n <= Self::MAX_REPEAT)
                    .ok_or(WorldError::ScriptCount { offset })?
            };

            let held = match key {
                'h' => Some(Intent::step(Direction::West)),
                'l' => Some(Intent::step(Direction::East)),
                'k' => Some(Intent::step(Direction::North)),
                'j' => Some(Intent::step(Direction::South)),
                'p' => Some(Intent::pickup()),
                'd' => Some(Intent::drop()),
                _ => None,
            };

            match (key, held) {
                (_, Some(intent)) => {
                    if count == 0 {
                        continue;
                    }
                    parsed.extend((0..count).map(|_| Command::Act(intent)));
                    parsed.push_back(Command::Act(Intent::IDLE));
                }
                ('.', None) => {
                    parsed.extend((0..count).map(|_| Command::Act(Intent::IDLE)));
                }
                ('m', None) => {
                    parsed.extend((0..count).map(|_| Command::Act(Intent::toggle_magnetism())));
                }
                ('b', None) => {
                    parsed.extend((0..count).map(|_| Command::Act(Intent::toggle_blind())));
                }
                ('q', None) => parsed.push_back(Command::Quit),
                _ => return Err(WorldError::ScriptKey { key, offset }),
            }
        }
        self.queue.extend(parsed);
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Next scripted command, if any, without the quit-on-exhaustion rule.
    pub fn next_command(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }
}

impl Controller for ScriptedController {
    fn behave(&mut self, _ctx: &TickContext, _sensors: &Sensors) -> Command {
        self.next_command().unwrap_or(Command::Quit)
    }
}

const WANDER_STREAM: u64 = 0x3A6D_0000_0000_0001;

/// Seeded random walk: picks a direction, holds it for a few ticks, releases, repeats.
///
/// Releases early when the touch sensor reports contact in the held direction and the last
/// tick realized no motion. Occasionally picks up or drops whatever is adjacent.
#[derive(Debug, Clone)]
pub struct WanderController {
    max_hold: u32,
    rng: Option<SplitMix64>,
    held: Option<(Direction, u32)>,
    release_next: bool,
}

impl WanderController {
    pub fn new(max_hold: u32) -> Self {
        Self {
            max_hold: max_hold.max(1),
            rng: None,
            held: None,
            release_next: false,
        }
    }
}

impl Default for WanderController {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Controller for WanderController {
    fn behave(&mut self, ctx: &TickContext, sensors: &Sensors) -> Command {
        if let Some((dir, remaining)) = self.held.take() {
            let blocked = !sensors.is_moving() && sensors.touch.get(dir);
            if remaining > 0 && !blocked {
                self.held = Some((dir, remaining - 1));
                return Command::Act(Intent::step(dir));
            }
            return Command::Act(Intent::IDLE);
        }
        if self.release_next {
            self.release_next = false;
            return Command::Act(Intent::IDLE);
        }

        let rng = self.rng.get_or_insert_with(|| ctx.rng(WANDER_STREAM));
        match rng.next_below(16) {
            0 => {
                self.release_next = true;
                Command::Act(Intent::pickup())
            }
            1 => {
                self.release_next = true;
                Command::Act(Intent::drop())
            }
            _ => {
                let dir = Direction::ALL[rng.next_below(4) as usize];
                let hold = 1 + rng.next_below(self.max_hold);
                self.held = Some((dir, hold - 1));
                Command::Act(Intent::step(dir))
            }
        }
    }
}
