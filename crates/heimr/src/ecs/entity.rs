//! # Entity — Lightweight Identifiers for Game Objects
//!
//! An [`Entity`] is just a number — it doesn't "contain" anything. Instead, a
//! [`World`](super::world::World) maps entities to their components. This
//! separation of identity from data is the core insight of the ECS pattern.
//!
//! ## Design: Process-Unique, Never Reused
//!
//! Ids come from a single process-wide counter and are never recycled. That
//! costs nothing at this scale and buys two properties the multi-world layer
//! depends on:
//!
//! - **World independence.** An entity can be relocated from one
//!   [`World`](super::world::World) to another and every handle to it —
//!   including [`Parent`](super::hierarchy::Parent) links inside the moved
//!   subtree — stays valid, because the id means the same thing everywhere.
//! - **No stale-handle aliasing.** A handle to a destroyed entity can never
//!   accidentally resolve to a newer entity, so there is no need for the
//!   generation counters engines with id recycling carry.
//!
//! ## Comparison
//!
//! - **hecs / bevy_ecs**: recycle indices and pair them with a generation.
//!   Correct, but ids are then only meaningful within one world.
//! - **EnTT (C++)**: same packed index + version approach.
//!
//! A `u64` counter outlives any realistic session (spawning a million
//! entities per second exhausts it after ~585,000 years).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ENTITY: AtomicU64 = AtomicU64::new(1);

/// A lightweight handle to an entity.
///
/// Entities are created via [`World::create`](super::world::World::create)
/// and destroyed via [`World::destroy`](super::world::World::destroy). Ids
/// are unique across the whole process, so a handle stays meaningful when
/// its entity migrates between worlds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u64);

impl Entity {
    /// Allocate a fresh, process-unique entity id.
    pub(crate) fn allocate() -> Self {
        Entity(NEXT_ENTITY.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id. Useful for diagnostics, not for general use.
    pub fn to_bits(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
