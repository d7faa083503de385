//! # World — An Isolated Entity Container
//!
//! A [`World`] owns a set of entities and their components. Unlike the usual
//! single-world ECS, a process holds *many* worlds at once — one per loaded
//! spatial context — and entities (with their whole parent/child subtree) can
//! be relocated between them without invalidating any handles.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ World "overworld"                              │
//! │                                                │
//! │  alive: BTreeSet<Entity>                       │
//! │                                                │
//! │  stores: HashMap<TypeId, Box<dyn Store>>       │
//! │    one SparseSet<T> per component type         │
//! │                                                │
//! │  names: String ↔ Entity lookup                 │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure modes
//!
//! Reading from an unknown entity (`get`, `has`) returns an absent value
//! rather than erroring — per-tick polling code expects this, and treating it
//! as exceptional would be both noisy and slow. `destroy` and `move_entity`
//! on an unknown entity are no-ops returning `false`.

use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};

use super::entity::Entity;
use super::hierarchy::collect_subtree;
use super::store::{ComponentStore, SparseSet};

/// An isolated container of entities and their components.
///
/// Identified by the string id of the spatial context it backs.
pub struct World {
    id: String,
    /// All entities currently living in this world, including those with no
    /// components. Ordered so `all()` is deterministic.
    alive: BTreeSet<Entity>,
    /// One sparse set per component type.
    stores: HashMap<TypeId, Box<dyn ComponentStore>>,
    /// Named entity lookup: name → entity.
    names: HashMap<String, Entity>,
    /// Reverse lookup: entity → name.
    names_reverse: HashMap<Entity, String>,
}

impl World {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alive: BTreeSet::new(),
            stores: HashMap::new(),
            names: HashMap::new(),
            names_reverse: HashMap::new(),
        }
    }

    /// The id of the context this world backs.
    pub fn id(&self) -> &str {
        &self.id
    }

    // ── Entity Management ────────────────────────────────────────────

    /// Create an entity with no components. The id is unique across the
    /// whole process, not just this world.
    pub fn create(&mut self) -> Entity {
        let entity = Entity::allocate();
        self.alive.insert(entity);
        entity
    }

    /// Create an entity and return a builder for chaining components.
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let entity = self.create();
        EntityBuilder { world: self, entity }
    }

    /// Create a named entity and return a builder for chaining components.
    ///
    /// The name can later be used to look up the entity with [`named`].
    ///
    /// # Panics
    ///
    /// Panics if the name is already in use in this world.
    ///
    /// [`named`]: World::named
    pub fn spawn_named(&mut self, name: &str) -> EntityBuilder<'_> {
        let entity = self.create();
        self.name_entity(entity, name);
        EntityBuilder { world: self, entity }
    }

    /// Check if an entity lives in this world.
    pub fn contains(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// Number of entities in this world.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// All entities in this world, in id order.
    pub fn all(&self) -> Vec<Entity> {
        self.alive.iter().copied().collect()
    }

    // ── Named Entities ───────────────────────────────────────────────

    /// Get the entity with the given name.
    ///
    /// # Panics
    ///
    /// Panics if no entity has that name.
    pub fn named(&self, name: &str) -> Entity {
        *self
            .names
            .get(name)
            .unwrap_or_else(|| panic!("No entity named \"{}\" in world `{}`", name, self.id))
    }

    /// Try to get the entity with the given name. Returns `None` if not found.
    pub fn try_named(&self, name: &str) -> Option<Entity> {
        self.names.get(name).copied()
    }

    fn name_entity(&mut self, entity: Entity, name: &str) {
        if let Some(&existing) = self.names.get(name) {
            panic!(
                "Name \"{}\" is already used by entity {:?} (tried to assign to {:?})",
                name, existing, entity
            );
        }
        self.names.insert(name.to_string(), entity);
        self.names_reverse.insert(entity, name.to_string());
    }

    // ── Per-Entity Component Access ──────────────────────────────────

    fn store<T: 'static + Send + Sync>(&self) -> Option<&SparseSet<T>> {
        self.stores
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<SparseSet<T>>()
    }

    fn store_mut<T: 'static + Send + Sync>(&mut self) -> Option<&mut SparseSet<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
    }

    /// Add a component to an entity, replacing any existing value of the
    /// same type.
    ///
    /// # Panics
    ///
    /// Panics if the entity does not live in this world.
    pub fn insert<T: 'static + Send + Sync>(&mut self, entity: Entity, component: T) {
        assert!(
            self.alive.contains(&entity),
            "Cannot insert component `{}` on entity {:?} not in world `{}`",
            std::any::type_name::<T>(),
            entity,
            self.id
        );
        self.stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseSet::<T>::new()))
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
            .unwrap_or_else(|| panic!("store type mismatch for `{}`", std::any::type_name::<T>()))
            .insert(entity, component);
    }

    /// Get a shared reference to a component. `None` if the entity doesn't
    /// have it (or isn't in this world).
    pub fn get<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        self.store::<T>()?.get(entity)
    }

    /// Get a mutable reference to a component. `None` if the entity doesn't
    /// have it (or isn't in this world).
    pub fn get_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<&mut T> {
        self.store_mut::<T>()?.get_mut(entity)
    }

    /// Check whether an entity has a component of type `T`.
    pub fn has<T: 'static + Send + Sync>(&self, entity: Entity) -> bool {
        self.store::<T>().is_some_and(|s| s.contains(entity))
    }

    /// Remove a component from an entity. Returns `true` if it was present.
    pub fn remove<T: 'static + Send + Sync>(&mut self, entity: Entity) -> bool {
        self.store_mut::<T>()
            .is_some_and(|s| s.take_value(entity).is_some())
    }

    // ── Iteration / Query ────────────────────────────────────────────

    /// All entities holding a component of type `T`, in store order.
    pub fn entities_with<T: 'static + Send + Sync>(&self) -> Vec<Entity> {
        self.stores
            .get(&TypeId::of::<T>())
            .map(|s| s.entities().to_vec())
            .unwrap_or_default()
    }

    /// All entities that have *every* component type in the tuple `S`.
    ///
    /// Iterates the smallest store and probes the rest, so cost is
    /// proportional to the rarest component.
    ///
    /// # Example
    ///
    /// ```ignore
    /// for entity in world.query::<(Transform, Portal)>() {
    ///     // entity has both components
    /// }
    /// ```
    pub fn query<S: ComponentSet>(&self) -> Vec<Entity> {
        let type_ids = S::type_ids();
        let mut stores = Vec::with_capacity(type_ids.len());
        for tid in &type_ids {
            match self.stores.get(tid) {
                Some(store) => stores.push(store),
                None => return Vec::new(),
            }
        }
        let Some(smallest) = (0..stores.len()).min_by_key(|&i| stores[i].len()) else {
            return Vec::new();
        };
        stores[smallest]
            .entities()
            .iter()
            .copied()
            .filter(|&e| {
                stores
                    .iter()
                    .enumerate()
                    .all(|(i, s)| i == smallest || s.contains(e))
            })
            .collect()
    }

    // ── Destroy / Move ───────────────────────────────────────────────

    /// Destroy an entity and every descendant reachable through
    /// [`Parent`](super::hierarchy::Parent) links in this world, removing
    /// all their components and names.
    ///
    /// Returns `false` (no-op) if the entity is not in this world.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.alive.contains(&entity) {
            return false;
        }
        let subtree = collect_subtree(self, entity);
        for &e in &subtree {
            for store in self.stores.values_mut() {
                store.remove(e);
            }
            if let Some(name) = self.names_reverse.remove(&e) {
                self.names.remove(&name);
            }
            self.alive.remove(&e);
        }
        debug!(
            "destroyed {} entit{} in world `{}`",
            subtree.len(),
            if subtree.len() == 1 { "y" } else { "ies" },
            self.id
        );
        true
    }

    /// Relocate an entity and its full descendant subtree into `target`,
    /// removing them from this world. Components, names, and
    /// [`Parent`](super::hierarchy::Parent) links all survive — ids are
    /// world-independent, so links inside the subtree stay valid.
    ///
    /// Returns `false` (no-op) if the entity is not in this world.
    pub fn move_entity(&mut self, entity: Entity, target: &mut World) -> bool {
        if !self.alive.contains(&entity) {
            return false;
        }
        let subtree = collect_subtree(self, entity);

        for (tid, store) in self.stores.iter_mut() {
            for &e in &subtree {
                if let Some(boxed) = store.take(e) {
                    target
                        .stores
                        .entry(*tid)
                        .or_insert_with(|| store.new_empty())
                        .insert_boxed(e, boxed);
                }
            }
        }

        for &e in &subtree {
            self.alive.remove(&e);
            target.alive.insert(e);
            if let Some(name) = self.names_reverse.remove(&e) {
                self.names.remove(&name);
                if target.names.contains_key(&name) {
                    warn!(
                        "dropping name \"{}\" of migrated entity {:?}: already taken in `{}`",
                        name, e, target.id
                    );
                } else {
                    target.names.insert(name.clone(), e);
                    target.names_reverse.insert(e, name);
                }
            }
        }

        debug!(
            "moved {} entit{} from `{}` to `{}`",
            subtree.len(),
            if subtree.len() == 1 { "y" } else { "ies" },
            self.id,
            target.id
        );
        true
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("id", &self.id)
            .field("entities", &self.alive.len())
            .finish_non_exhaustive()
    }
}

// ── EntityBuilder ────────────────────────────────────────────────────────

/// Builder for adding components to a freshly created entity.
///
/// Returned by [`World::spawn`] and [`World::spawn_named`].
///
/// # Example
///
/// ```ignore
/// let player = world
///     .spawn_named("player")
///     .insert(Transform::from_xy(0.0, 0.0))
///     .insert(Velocity::default())
///     .id();
/// ```
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityBuilder<'w> {
    /// Add a component to this entity.
    pub fn insert<T: 'static + Send + Sync>(self, component: T) -> Self {
        self.world.insert(self.entity, component);
        self
    }

    /// Get the entity ID.
    pub fn id(&self) -> Entity {
        self.entity
    }
}

// ── ComponentSet (tuple support) ─────────────────────────────────────────

/// Tuples of component types usable with [`World::query`].
///
/// Implemented for tuples up to 8 elements. Each component must be
/// `'static + Send + Sync`.
pub trait ComponentSet {
    fn type_ids() -> Vec<TypeId>;
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: 'static + Send + Sync),+> ComponentSet for ($($T,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$T>()),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::hierarchy::Parent;

    #[derive(Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }
    #[derive(Debug, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }
    struct Health(u32);
    struct Marker;

    #[test]
    fn create_insert_get() {
        let mut world = World::new("test");
        let e = world.create();
        world.insert(e, Position { x: 1.0, y: 2.0 });

        let pos = world.get::<Position>(e).unwrap();
        assert_eq!(pos.x, 1.0);
        assert!(world.get::<Velocity>(e).is_none());
        assert!(world.has::<Position>(e));
        assert!(!world.has::<Velocity>(e));
    }

    #[test]
    fn insert_replaces_existing() {
        let mut world = World::new("test");
        let e = world.create();
        world.insert(e, Health(50));
        world.insert(e, Health(100));
        assert_eq!(world.get::<Health>(e).unwrap().0, 100);
    }

    #[test]
    fn remove_component() {
        let mut world = World::new("test");
        let e = world.create();
        world.insert(e, Marker);
        assert!(world.remove::<Marker>(e));
        assert!(!world.has::<Marker>(e));
        assert!(!world.remove::<Marker>(e));
    }

    #[test]
    fn unknown_entity_reads_are_no_ops() {
        let mut a = World::new("a");
        let mut b = World::new("b");
        let stranger = b.create();

        assert!(a.get::<Position>(stranger).is_none());
        assert!(!a.has::<Position>(stranger));
        assert!(!a.remove::<Position>(stranger));
        assert!(!a.destroy(stranger));
        assert!(!a.move_entity(stranger, &mut b));
    }

    #[test]
    fn query_intersects_stores() {
        let mut world = World::new("test");
        let e1 = world
            .spawn()
            .insert(Position { x: 0.0, y: 0.0 })
            .insert(Velocity { dx: 1.0, dy: 0.0 })
            .id();
        let _e2 = world.spawn().insert(Position { x: 1.0, y: 1.0 }).id();
        let _e3 = world.spawn().insert(Velocity { dx: 2.0, dy: 0.0 }).id();

        let both = world.query::<(Position, Velocity)>();
        assert_eq!(both, vec![e1]);
        assert_eq!(world.query::<(Position,)>().len(), 2);
        assert!(world.query::<(Marker,)>().is_empty());
    }

    #[test]
    fn destroy_cascades_to_descendants() {
        let mut world = World::new("test");
        let root = world.create();
        let child = world.spawn().insert(Parent(root)).id();
        let grandchild = world.spawn().insert(Parent(child)).id();
        let sibling = world.create();

        assert!(world.destroy(root));

        assert!(!world.contains(root));
        assert!(!world.contains(child));
        assert!(!world.contains(grandchild));
        assert!(world.contains(sibling));
        assert_eq!(world.all(), vec![sibling]);
    }

    #[test]
    fn destroy_leaf_keeps_parent() {
        let mut world = World::new("test");
        let root = world.create();
        let child = world.spawn().insert(Parent(root)).id();

        assert!(world.destroy(child));
        assert!(world.contains(root));
        assert!(!world.contains(child));
    }

    #[test]
    fn move_preserves_structure() {
        let mut source = World::new("source");
        let mut target = World::new("target");

        let root = source.spawn().insert(Position { x: 5.0, y: 5.0 }).id();
        let child = source.spawn().insert(Parent(root)).id();
        let grandchild = source.spawn().insert(Parent(child)).id();
        let sibling = source.create();

        assert!(source.move_entity(root, &mut target));

        assert_eq!(target.all(), vec![root, child, grandchild]);
        assert_eq!(source.all(), vec![sibling]);

        // Parent links survived the move unchanged.
        assert_eq!(target.get::<Parent>(child).unwrap().0, root);
        assert_eq!(target.get::<Parent>(grandchild).unwrap().0, child);
        // Components came along, and nothing was duplicated.
        assert_eq!(target.get::<Position>(root).unwrap().x, 5.0);
        assert!(source.get::<Position>(root).is_none());
    }

    #[test]
    fn move_carries_names() {
        let mut source = World::new("source");
        let mut target = World::new("target");

        let player = source.spawn_named("player").insert(Marker).id();
        source.move_entity(player, &mut target);

        assert_eq!(target.try_named("player"), Some(player));
        assert!(source.try_named("player").is_none());
    }

    #[test]
    fn named_lookup() {
        let mut world = World::new("test");
        let e = world.spawn_named("boss").id();
        assert_eq!(world.named("boss"), e);
        assert_eq!(world.try_named("boss"), Some(e));
        assert!(world.try_named("ghost").is_none());
    }

    #[test]
    #[should_panic(expected = "already used")]
    fn duplicate_name_panics() {
        let mut world = World::new("test");
        world.spawn_named("hero");
        world.spawn_named("hero");
    }

    #[test]
    fn destroy_cleans_up_name() {
        let mut world = World::new("test");
        let e = world.spawn_named("temp").id();
        world.destroy(e);
        assert!(world.try_named("temp").is_none());
    }

    #[test]
    fn debug_shows_id_and_entity_count() {
        let mut world = World::new("overworld");
        world.create();
        world.create();

        let repr = format!("{world:?}");
        assert!(repr.contains("overworld"));
        assert!(repr.contains('2'));
    }

    #[test]
    #[should_panic(expected = "not in world")]
    fn insert_on_foreign_entity_panics() {
        let mut a = World::new("a");
        let mut b = World::new("b");
        let e = b.create();
        a.insert(e, Marker);
    }
}
