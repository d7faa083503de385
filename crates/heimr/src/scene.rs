//! # Scene — The Stock World Host
//!
//! A [`Scene`] owns one [`World`] per loaded context, including a default
//! world that exists for the scene's whole lifetime and backs the root
//! context. The [`ContextManager`](crate::context::ContextManager) drives it
//! exclusively through the [`WorldHost`] trait, so engines with their own
//! world ownership can substitute their scene type without touching the
//! context layer.

use std::collections::HashMap;

use crate::context::{ContextId, WorldHost};
use crate::ecs::World;

/// Owns the worlds backing a scene's contexts.
pub struct Scene {
    default_id: ContextId,
    worlds: HashMap<ContextId, World>,
}

impl Scene {
    /// Create a scene whose permanent default world backs `default_id` (the
    /// root context).
    pub fn new(default_id: impl Into<ContextId>) -> Self {
        let default_id = default_id.into();
        let mut worlds = HashMap::new();
        worlds.insert(default_id.clone(), World::new(default_id.as_str()));
        Self { default_id, worlds }
    }

    /// Number of currently loaded worlds (the default counts).
    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// Borrow two distinct worlds mutably at once, as needed by
    /// [`World::move_entity`] to migrate an entity subtree between contexts.
    ///
    /// Returns `None` if either world is not loaded or the ids are equal.
    pub fn worlds_pair_mut(
        &mut self,
        a: &ContextId,
        b: &ContextId,
    ) -> Option<(&mut World, &mut World)> {
        if a == b {
            return None;
        }
        let [first, second] = self.worlds.get_disjoint_mut([a, b]);
        Some((first?, second?))
    }
}

impl WorldHost for Scene {
    fn default_world_id(&self) -> &ContextId {
        &self.default_id
    }

    fn default_world(&mut self) -> &mut World {
        let id = self.default_id.clone();
        self.worlds
            .get_mut(&id)
            .unwrap_or_else(|| panic!("default world `{}` missing", id))
    }

    fn world(&self, id: &ContextId) -> Option<&World> {
        self.worlds.get(id)
    }

    fn world_mut(&mut self, id: &ContextId) -> Option<&mut World> {
        self.worlds.get_mut(id)
    }

    fn has_world(&self, id: &ContextId) -> bool {
        self.worlds.contains_key(id)
    }

    fn load_additional_world(&mut self, id: &ContextId) -> &mut World {
        self.worlds
            .entry(id.clone())
            .or_insert_with(|| World::new(id.as_str()))
    }

    fn unload_world(&mut self, id: &ContextId) {
        if id == &self.default_id {
            return;
        }
        self.worlds.remove(id);
    }
}
