//! # Spatial Context Manager
//!
//! The orchestrator of the context layer. Owns the definition registry, the
//! focused context id, and the [`WorldHost`] that actually holds worlds, and
//! composes stack computation + policy derivation into the queries render and
//! gameplay collaborators consume.
//!
//! Everything here is recomputed per call and never memoized: definitions
//! registered between ticks are reflected immediately, and there is no cache
//! to invalidate on focus transitions.
//!
//! ## Lifecycle invariants
//!
//! - The root context's world (the host's default world) exists for the
//!   scene's whole lifetime and can never be unloaded.
//! - The focused context's world is always loaded; `set_focused_context`
//!   loads the target *then* updates focus with no suspension point between
//!   the two steps, so a single-threaded caller can never observe "world
//!   loaded, focus not yet updated" or the reverse.
//! - A context's setup routine runs exactly once per manager lifetime, on
//!   first load. A failing setup tears the fresh world back down and leaves
//!   the context not-loaded.

use std::collections::HashSet;

use log::{debug, info};

use crate::ecs::World;
use crate::error::{ContextError, Result};

use super::definition::{ContextDefinition, ContextId, ContextPolicy};
use super::policy::{DerivedContextSets, derive};
use super::registry::DefinitionRegistry;
use super::stack::compute_stack;

/// The narrow boundary a host "scene" exposes to the manager.
///
/// The manager is written purely against this trait, decoupling it from any
/// concrete scene or engine type. See [`Scene`](crate::scene::Scene) for the
/// stock implementation.
pub trait WorldHost {
    /// Id of the permanently-present default world (the root context).
    fn default_world_id(&self) -> &ContextId;
    fn default_world(&mut self) -> &mut World;
    fn world(&self, id: &ContextId) -> Option<&World>;
    fn world_mut(&mut self, id: &ContextId) -> Option<&mut World>;
    fn has_world(&self, id: &ContextId) -> bool;
    /// Create (or return) the world backing `id`.
    fn load_additional_world(&mut self, id: &ContextId) -> &mut World;
    /// Drop the world backing `id` and all its entities. Never called for
    /// the default world.
    fn unload_world(&mut self, id: &ContextId);
}

/// How context `b` relates to context `a` in the parent hierarchy.
///
/// Used by collaborators (e.g. a build/placement tool) to decide whether an
/// action targeting a hovered context is permitted relative to the focused
/// one — typically only [`Same`](ContextRelationship::Same) or
/// [`Ancestor`](ContextRelationship::Ancestor) targets are allowed, to avoid
/// writing into out-of-scope simulated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRelationship {
    Same,
    /// `b` is an ancestor of `a`.
    Ancestor,
    /// `b` is a descendant of `a`.
    Descendant,
    Unrelated,
}

/// Orchestrates world lifecycle, focus transitions, and relationship queries
/// for a host scene.
pub struct ContextManager<H: WorldHost> {
    host: H,
    registry: DefinitionRegistry,
    focused: ContextId,
    /// Contexts whose one-time setup has completed. Persists across
    /// unload/reload: setup runs once per manager lifetime, full stop.
    setup_done: HashSet<ContextId>,
}

impl<H: WorldHost> ContextManager<H> {
    /// Wrap a host. Focus starts on the host's default world — the root
    /// context, which always exists.
    pub fn new(host: H) -> Self {
        let focused = host.default_world_id().clone();
        Self {
            host,
            registry: DefinitionRegistry::new(),
            focused,
            setup_done: HashSet::new(),
        }
    }

    /// Register a context definition, validating its parent chain eagerly.
    pub fn register(&mut self, def: ContextDefinition) -> Result<()> {
        self.registry.register(def)
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// The host scene, for collaborators needing direct world access.
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ── World lifecycle ──────────────────────────────────────────────

    /// Guarantee that `id`'s world exists, running its one-time setup if it
    /// has never run. Idempotent: calling twice never re-runs setup.
    ///
    /// Unregistered contexts without a pre-existing world (i.e. anything but
    /// the root) are an error. A failing setup tears the freshly created
    /// world down and propagates.
    pub fn ensure_world_loaded(&mut self, id: &ContextId) -> Result<&mut World> {
        if !self.host.has_world(id) {
            if !self.registry.contains(id) {
                return Err(ContextError::UnknownContext(id.clone()));
            }
            info!("loading world for context `{id}`");
            self.host.load_additional_world(id);
            if let Err(err) = self.run_setup_once(id) {
                self.host.unload_world(id);
                return Err(err);
            }
        } else {
            self.run_setup_once(id)?;
        }
        self.host
            .world_mut(id)
            .ok_or_else(|| ContextError::WorldNotLoaded(id.clone()))
    }

    fn run_setup_once(&mut self, id: &ContextId) -> Result<()> {
        if self.setup_done.contains(id) {
            return Ok(());
        }
        if let Some(def) = self.registry.get(id) {
            if let Some(setup) = &def.setup {
                let world = self
                    .host
                    .world_mut(id)
                    .ok_or_else(|| ContextError::WorldNotLoaded(id.clone()))?;
                debug!("running setup for context `{id}`");
                setup(world).map_err(|source| ContextError::Setup {
                    id: id.clone(),
                    source,
                })?;
            }
        }
        self.setup_done.insert(id.clone());
        Ok(())
    }

    /// Switch focus to `id`, loading its world first if needed.
    ///
    /// The load and the focus update happen with no suspension point between
    /// them; from a single-threaded caller's perspective the transition is
    /// atomic.
    pub fn set_focused_context(&mut self, id: &ContextId) -> Result<()> {
        self.ensure_world_loaded(id)?;
        if &self.focused != id {
            info!("focus transition: `{}` -> `{}`", self.focused, id);
        }
        self.focused = id.clone();
        Ok(())
    }

    /// Unload `id`'s world, dropping all its entities.
    ///
    /// The focused and root contexts can never be unloaded; refocus first or
    /// pick another context. The one-time-setup mark is *not* cleared — a
    /// later reload yields an empty world (setup runs once per lifetime).
    pub fn unload_world(&mut self, id: &ContextId) -> Result<()> {
        if id == &self.focused {
            return Err(ContextError::UnloadFocusedContext(id.clone()));
        }
        if id == self.host.default_world_id() {
            return Err(ContextError::UnloadRootContext(id.clone()));
        }
        if !self.host.has_world(id) {
            return Err(ContextError::WorldNotLoaded(id.clone()));
        }
        info!("unloading world for context `{id}`");
        self.host.unload_world(id);
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn focused_context(&self) -> &ContextId {
        &self.focused
    }

    /// The focused context's world.
    ///
    /// Always available: focus never points at an unloaded world.
    pub fn focused_world(&mut self) -> Result<&mut World> {
        let focused = self.focused.clone();
        self.require_world(&focused)
    }

    pub fn world(&self, id: &ContextId) -> Option<&World> {
        self.host.world(id)
    }

    pub fn world_mut(&mut self, id: &ContextId) -> Option<&mut World> {
        self.host.world_mut(id)
    }

    /// Like [`world_mut`](Self::world_mut) but a missing world is an error —
    /// a sequencing bug in the caller, not a condition to retry.
    pub fn require_world(&mut self, id: &ContextId) -> Result<&mut World> {
        self.host
            .world_mut(id)
            .ok_or_else(|| ContextError::WorldNotLoaded(id.clone()))
    }

    /// The focused context's ancestor chain, focused-first. Recomputed per
    /// call against the live registry.
    pub fn context_stack(&self) -> Result<Vec<ContextId>> {
        compute_stack(&self.focused, |c| self.registry.parent_of(c).cloned())
    }

    fn derived_sets(&self) -> Result<DerivedContextSets> {
        let stack = self.context_stack()?;
        let policy = self
            .registry
            .get(&self.focused)
            .map(|def| def.policy)
            .unwrap_or(ContextPolicy::FOCUSED_ONLY);
        Ok(derive(&stack, policy))
    }

    /// Contexts to draw, root-first, per the focused context's visibility
    /// policy.
    pub fn visible_contexts(&self) -> Result<Vec<ContextId>> {
        Ok(self.derived_sets()?.visible)
    }

    /// Contexts to tick, focused-first, per the focused context's simulation
    /// policy.
    pub fn simulated_contexts(&self) -> Result<Vec<ContextId>> {
        Ok(self.derived_sets()?.simulated)
    }

    /// How `b` relates to `a` in the parent hierarchy.
    pub fn relationship(&self, a: &ContextId, b: &ContextId) -> Result<ContextRelationship> {
        if a == b {
            return Ok(ContextRelationship::Same);
        }
        let ancestors_of_a = compute_stack(a, |c| self.registry.parent_of(c).cloned())?;
        if ancestors_of_a.contains(b) {
            return Ok(ContextRelationship::Ancestor);
        }
        let ancestors_of_b = compute_stack(b, |c| self.registry.parent_of(c).cloned())?;
        if ancestors_of_b.contains(a) {
            return Ok(ContextRelationship::Descendant);
        }
        Ok(ContextRelationship::Unrelated)
    }
}
