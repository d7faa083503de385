//! # Portal Trigger — Focus Transitions Driven by World Markers
//!
//! A [`Portal`] is an entity marker in a world that, when activated, requests
//! a focus transition to another context. The core does not define trigger
//! geometry — whether the player overlaps a doorway is a collision
//! collaborator's concern, supplied through [`PortalHooks::should_activate`].
//!
//! Each portal is either **inactive** (the default) or momentarily
//! **activating**; activation collapses back to inactive within the same
//! tick, so no state is stored on the portal itself. At most one portal
//! activates per tick: the scan honors the first match and returns, which
//! rules out re-entrant focus changes inside a single tick.

use log::debug;

use crate::ecs::{Entity, World};
use crate::error::Result;
use crate::math::Vec2;

use super::definition::ContextId;
use super::manager::{ContextManager, WorldHost};

/// What happens to the traveler when a portal fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalMode {
    /// Just shift focus to the target context.
    Enter,
    /// Shift focus and ask the collaborator to relocate the traveler to
    /// [`Portal::spawn_point`] via [`PortalHooks::on_teleport`].
    Teleport,
}

/// Marker component: this entity is a doorway into another context.
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub target: ContextId,
    pub mode: PortalMode,
    /// Where a teleported traveler should appear in the target world.
    pub spawn_point: Vec2,
}

impl Portal {
    pub fn new(target: impl Into<ContextId>) -> Self {
        Self {
            target: target.into(),
            mode: PortalMode::Enter,
            spawn_point: Vec2::ZERO,
        }
    }

    pub fn teleport(target: impl Into<ContextId>, spawn_point: Vec2) -> Self {
        Self {
            target: target.into(),
            mode: PortalMode::Teleport,
            spawn_point,
        }
    }
}

/// What a hook sees: the world currently bound to focus, the portal entity,
/// its component data, and the focused context id.
///
/// For [`should_activate`](PortalHooks::should_activate) the world and id are
/// the pre-transition ones; for the post-activation hooks they are the
/// target's.
pub struct PortalArgs<'a> {
    pub world: &'a mut World,
    pub entity: Entity,
    pub portal: &'a Portal,
    pub focused: &'a ContextId,
}

/// Collaborator-supplied portal behavior.
///
/// The core never swallows hook errors or panics — a throwing predicate
/// propagates to preserve causality for debugging.
pub trait PortalHooks {
    /// Decide whether this portal fires this tick (e.g. collision overlap
    /// between the player and the portal entity).
    fn should_activate(&mut self, args: PortalArgs<'_>) -> bool;

    /// Runs after every successful activation, against the target world.
    fn on_enter(&mut self, args: PortalArgs<'_>) {
        let _ = args;
    }

    /// Runs after [`on_enter`](Self::on_enter) for [`PortalMode::Teleport`]
    /// portals — the place to relocate the player to the portal's spawn
    /// point.
    fn on_teleport(&mut self, args: PortalArgs<'_>) {
        let _ = args;
    }
}

/// Per-tick portal scan over the focused world.
///
/// Returns the activated portal entity, or `None` if nothing fired. Only the
/// first activating portal is honored. On activation the target world is
/// loaded (running its setup if needed) and focus moves before any
/// post-activation hook runs; a failing load propagates and leaves focus
/// unchanged.
pub fn run_portal_triggers<H: WorldHost>(
    manager: &mut ContextManager<H>,
    hooks: &mut dyn PortalHooks,
) -> Result<Option<Entity>> {
    let focused = manager.focused_context().clone();

    let portals: Vec<(Entity, Portal)> = {
        let world = manager.require_world(&focused)?;
        world
            .entities_with::<Portal>()
            .into_iter()
            .filter_map(|e| world.get::<Portal>(e).map(|p| (e, p.clone())))
            .collect()
    };

    for (entity, portal) in portals {
        let fired = {
            let world = manager.require_world(&focused)?;
            hooks.should_activate(PortalArgs {
                world,
                entity,
                portal: &portal,
                focused: &focused,
            })
        };
        if !fired {
            continue;
        }

        debug!(
            "portal {:?} activating: `{}` -> `{}`",
            entity, focused, portal.target
        );
        manager.set_focused_context(&portal.target)?;

        let target = portal.target.clone();
        let world = manager.require_world(&target)?;
        hooks.on_enter(PortalArgs {
            world,
            entity,
            portal: &portal,
            focused: &target,
        });
        if portal.mode == PortalMode::Teleport {
            let world = manager.require_world(&target)?;
            hooks.on_teleport(PortalArgs {
                world,
                entity,
                portal: &portal,
                focused: &target,
            });
        }
        return Ok(Some(entity));
    }

    Ok(None)
}
