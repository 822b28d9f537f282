use std::collections::BTreeMap;

use crate::{Body, BodyId, WorldError};

/// Owns every body for the lifetime of a run.
///
/// Ids are dense indices handed out in insertion order; bodies are never removed.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    bodies: Vec<Body>,
    names: BTreeMap<String, BodyId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: Body) -> Result<BodyId, WorldError> {
        if self.names.contains_key(body.name()) {
            return Err(WorldError::DuplicateName(body.name().to_string()));
        }
        let id = BodyId(self.bodies.len() as u32);
        self.names.insert(body.name().to_string(), id);
        self.bodies.push(body);
        Ok(id)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        id.index() < self.bodies.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(idx, body)| (BodyId(idx as u32), body))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Names for diagnostics, in id order.
    pub fn names<'a>(&'a self, ids: impl IntoIterator<Item = &'a BodyId>) -> Vec<&'a str> {
        ids.into_iter()
            .filter_map(|id| self.get(*id))
            .map(Body::name)
            .collect()
    }

    // Callers only pass ids minted by this registry.
    pub(crate) fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.index()]
    }

    pub(crate) fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.index()]
    }
}
