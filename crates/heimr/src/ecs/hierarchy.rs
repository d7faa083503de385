//! # Entity Hierarchies — Parent Links and World-Space Transforms
//!
//! A [`Parent`] component links an entity to another entity *in the same
//! world*, forming a forest. The engine does not enforce acyclicity, so every
//! walk here is depth-bounded: a misconfigured (cyclic) graph degrades into a
//! recoverable failure instead of a hang.
//!
//! ## Usage
//!
//! ```ignore
//! let parent = world.spawn().insert(Transform::from_xy(100.0, 50.0)).id();
//! let child = world
//!     .spawn()
//!     .insert(Parent(parent))
//!     .insert(Transform::from_xy(10.0, 0.0))
//!     .id();
//!
//! // Composed world-space transform: (110, 50).
//! let matrix = resolve_world_transform(&world, child).unwrap();
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

use crate::math::Mat4;
use crate::math::Transform;

use super::entity::Entity;
use super::world::World;

/// Marks an entity as a child of another entity in the same world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

/// Upper bound on parent-chain length. Exceeding it means the graph is
/// misconfigured (usually a cycle); walks give up rather than hang.
pub const MAX_HIERARCHY_DEPTH: usize = 64;

/// Compose an entity's world-space transform by walking its [`Parent`] chain
/// up to a root and folding local transforms down.
///
/// Entities without a [`Transform`](crate::math::Transform) contribute
/// identity. Returns `None` if the entity is not in the world or the chain
/// exceeds [`MAX_HIERARCHY_DEPTH`] — render code should skip drawing rather
/// than crash.
pub fn resolve_world_transform(world: &World, entity: Entity) -> Option<Mat4> {
    if !world.contains(entity) {
        return None;
    }

    // Walk up, collecting local matrices leaf-first.
    let mut chain = Vec::new();
    let mut current = entity;
    loop {
        if chain.len() >= MAX_HIERARCHY_DEPTH {
            return None;
        }
        let local = world
            .get::<Transform>(current)
            .map(Transform::matrix)
            .unwrap_or(Mat4::IDENTITY);
        chain.push(local);
        match world.get::<Parent>(current) {
            Some(parent) => current = parent.0,
            None => break,
        }
    }

    // Fold root-first: world = root * ... * parent * local.
    let mut matrix = Mat4::IDENTITY;
    for local in chain.iter().rev() {
        matrix *= *local;
    }
    Some(matrix)
}

/// Direct children of an entity: every entity whose [`Parent`] points at it.
pub fn children_of(world: &World, entity: Entity) -> Vec<Entity> {
    world
        .entities_with::<Parent>()
        .into_iter()
        .filter(|&e| world.get::<Parent>(e).is_some_and(|p| p.0 == entity))
        .collect()
}

/// The entity plus all its descendants, BFS order.
///
/// Builds the child adjacency once from the [`Parent`] store, so cost is
/// linear in the number of parented entities. A visited set guards against
/// malformed (cyclic) graphs.
pub fn collect_subtree(world: &World, entity: Entity) -> Vec<Entity> {
    let mut children: HashMap<Entity, Vec<Entity>> = HashMap::new();
    for e in world.entities_with::<Parent>() {
        if let Some(parent) = world.get::<Parent>(e) {
            children.entry(parent.0).or_default().push(e);
        }
    }

    let mut result = Vec::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([entity]);
    while let Some(current) = queue.pop_front() {
        if !seen.insert(current) {
            continue;
        }
        result.push(current);
        if let Some(kids) = children.get(&current) {
            queue.extend(kids.iter().copied());
        }
    }
    result
}
