//! # Sparse-Set ECS With Multiple Worlds
//!
//! A deliberately simple Entity Component System built for a multi-world
//! engine. Storage follows the sparse-set pattern used by
//! [EnTT](https://github.com/skypjack/entt) and sparse-set Rust ECS crates:
//! one dense array per component type, cache-friendly to iterate, O(1) to
//! poke.
//!
//! ## Module Overview
//!
//! - [`entity`] — Process-unique, never-reused entity IDs
//! - [`store`] — Per-type dense-array + index-map storage
//! - [`world`] — Isolated entity container; many coexist per process
//! - [`hierarchy`] — Parent links, subtree walks, world-space transforms
//!
//! The unusual bit is [`World::move_entity`]: because entity ids are unique
//! across the process rather than per world, an entity and its whole subtree
//! can migrate between worlds while every handle and parent link stays valid.

pub mod entity;
pub mod hierarchy;
pub(crate) mod store;
pub mod world;

pub use entity::Entity;
pub use hierarchy::{
    MAX_HIERARCHY_DEPTH, Parent, children_of, collect_subtree, resolve_world_transform,
};
pub use world::{ComponentSet, EntityBuilder, World};
