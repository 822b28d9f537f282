//! Contact graph queries over a [`Registry`].
//!
//! Two bodies are in contact under a candidate displacement when translating the mover by that
//! displacement makes one of its cells coincide with one of the other body's cells. The contact
//! subtree is the transitive closure of that relation starting from one body.

use std::collections::BTreeSet;

use crate::{Body, BodyId, Direction, Displacement, Registry};

/// Deterministically ordered set of body ids.
pub type BodySet = BTreeSet<BodyId>;

/// True iff `mover`, translated by `d`, shares a cell with `other`.
///
/// Identity is not checked here; see [`Registry::contacts`].
pub fn overlaps(mover: &Body, d: Displacement, other: &Body) -> bool {
    // Offset that maps a mover cell into `other`'s local frame.
    let ox = mover.position().x + d.dx - other.position().x;
    let oy = mover.position().y + d.dy - other.position().y;

    let moved = mover.shape().bounds().shifted(ox, oy);
    if !moved.intersects(&other.shape().bounds()) {
        return false;
    }

    // Probe from the smaller set; membership is symmetric.
    if mover.shape().len() <= other.shape().len() {
        mover
            .shape()
            .cells()
            .any(|c| other.shape().contains(c.shifted(ox, oy)))
    } else {
        other
            .shape()
            .cells()
            .any(|c| mover.shape().contains(c.shifted(-ox, -oy)))
    }
}

impl Registry {
    /// Would moving `mover` by `d` put it on top of `other`? A body never contacts itself.
    pub fn contacts(&self, mover: BodyId, d: Displacement, other: BodyId) -> bool {
        if mover == other {
            return false;
        }
        match (self.get(mover), self.get(other)) {
            (Some(m), Some(o)) => overlaps(m, d, o),
            _ => false,
        }
    }

    /// Every other body `body` would touch after moving by `d`.
    pub fn neighbors(&self, body: BodyId, d: Displacement) -> BodySet {
        let Some(mover) = self.get(body) else {
            return BodySet::new();
        };
        self.iter()
            .filter(|(id, other)| *id != body && overlaps(mover, d, other))
            .map(|(id, _)| id)
            .collect()
    }

    /// Transitive closure of [`Registry::neighbors`] under one displacement, including `body`.
    ///
    /// Explicit worklist plus visited set, so cycles (shapes nested inside each other) and long
    /// chains terminate without recursion.
    pub fn contact_subtree(&self, body: BodyId, d: Displacement) -> BodySet {
        let mut visited = BodySet::new();
        if !self.contains(body) {
            return visited;
        }

        let mut stack = vec![body];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            for n in self.neighbors(id, d) {
                if !visited.contains(&n) {
                    stack.push(n);
                }
            }
        }
        visited
    }

    /// `body` plus every non-fixed body one cardinal step away: what a pickup can lift.
    pub fn self_and_all_pickable_neighbors(&self, body: BodyId) -> BodySet {
        let mut out = BodySet::new();
        if !self.contains(body) {
            return out;
        }
        out.insert(body);
        for dir in Direction::ALL {
            for n in self.neighbors(body, dir.delta()) {
                if !self.body(n).kind().is_fixed() {
                    out.insert(n);
                }
            }
        }
        out
    }
}
