//! # Component Storage — Sparse Sets
//!
//! Each component type gets its own [`SparseSet`]: a dense array of values, a
//! parallel dense array of owning entities, and an index map from entity to
//! dense slot. Lookup, insert, and remove are O(1) expected; iterating "all
//! entities with component T" walks a contiguous array.
//!
//! ```text
//! dense:    [Pos(1,2), Pos(9,9), Pos(4,0)]   ← component values, packed
//! entities: [  e7,       e3,       e12    ]   ← same order as dense
//! index:    { e7→0, e3→1, e12→2 }             ← entity → dense slot
//! ```
//!
//! Removal swap-removes the dense slot and patches the index of whichever
//! entity got swapped in, keeping the arrays packed.
//!
//! The [`ComponentStore`] trait erases the component type so the
//! [`World`](super::world::World) can cascade destroys and relocate whole
//! subtrees between worlds without knowing any concrete component types.

use std::any::Any;
use std::collections::HashMap;

use super::entity::Entity;

/// Type-erased view of a [`SparseSet`], used for operations that must touch
/// every store regardless of component type (destroy cascades, cross-world
/// moves).
pub(crate) trait ComponentStore {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Does this store hold a component for `entity`?
    fn contains(&self, entity: Entity) -> bool;

    /// Remove `entity`'s component, dropping it. Returns `true` if present.
    fn remove(&mut self, entity: Entity) -> bool;

    /// Remove `entity`'s component and return it boxed, for re-insertion
    /// into another world's store of the same type.
    fn take(&mut self, entity: Entity) -> Option<Box<dyn Any + Send + Sync>>;

    /// Insert a boxed component previously obtained from [`take`] on a store
    /// of the same concrete type.
    ///
    /// # Panics
    ///
    /// Panics if the boxed value is not of this store's component type.
    fn insert_boxed(&mut self, entity: Entity, value: Box<dyn Any + Send + Sync>);

    /// Create an empty store of the same concrete type.
    fn new_empty(&self) -> Box<dyn ComponentStore>;

    /// All entities holding this component, in dense order.
    fn entities(&self) -> &[Entity];

    fn len(&self) -> usize;
}

/// Dense-array + index-map storage for one component type.
pub(crate) struct SparseSet<T> {
    dense: Vec<T>,
    entities: Vec<Entity>,
    index: HashMap<Entity, usize>,
}

impl<T: 'static + Send + Sync> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a component for `entity`, replacing any existing value.
    pub fn insert(&mut self, entity: Entity, value: T) {
        if let Some(&slot) = self.index.get(&entity) {
            self.dense[slot] = value;
        } else {
            self.index.insert(entity, self.dense.len());
            self.dense.push(value);
            self.entities.push(entity);
        }
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        let slot = *self.index.get(&entity)?;
        Some(&self.dense[slot])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = *self.index.get(&entity)?;
        Some(&mut self.dense[slot])
    }

    /// Remove and return `entity`'s component. Swap-removes to keep the
    /// dense arrays packed, patching the swapped entity's index.
    pub fn take_value(&mut self, entity: Entity) -> Option<T> {
        let slot = self.index.remove(&entity)?;
        let value = self.dense.swap_remove(slot);
        self.entities.swap_remove(slot);
        if slot < self.entities.len() {
            self.index.insert(self.entities[slot], slot);
        }
        Some(value)
    }
}

impl<T: 'static + Send + Sync> ComponentStore for SparseSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    fn remove(&mut self, entity: Entity) -> bool {
        self.take_value(entity).is_some()
    }

    fn take(&mut self, entity: Entity) -> Option<Box<dyn Any + Send + Sync>> {
        self.take_value(entity)
            .map(|v| Box::new(v) as Box<dyn Any + Send + Sync>)
    }

    fn insert_boxed(&mut self, entity: Entity, value: Box<dyn Any + Send + Sync>) {
        let value = value
            .downcast::<T>()
            .unwrap_or_else(|_| panic!("component type mismatch in insert_boxed"));
        self.insert(entity, *value);
    }

    fn new_empty(&self) -> Box<dyn ComponentStore> {
        Box::new(SparseSet::<T>::new())
    }

    fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn len(&self) -> usize {
        self.dense.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut set = SparseSet::new();
        let e = Entity::allocate();
        set.insert(e, 42u32);
        assert_eq!(set.get(e), Some(&42));

        set.insert(e, 99);
        assert_eq!(set.get(e), Some(&99));
        assert_eq!(set.len(), 1);

        assert_eq!(set.take_value(e), Some(99));
        assert_eq!(set.get(e), None);
        assert!(set.take_value(e).is_none());
    }

    #[test]
    fn swap_remove_patches_index() {
        let mut set = SparseSet::new();
        let a = Entity::allocate();
        let b = Entity::allocate();
        let c = Entity::allocate();
        set.insert(a, 1u32);
        set.insert(b, 2);
        set.insert(c, 3);

        // Removing the first slot swaps `c` into it.
        set.take_value(a);
        assert_eq!(set.get(b), Some(&2));
        assert_eq!(set.get(c), Some(&3));
        assert_eq!(set.entities().len(), 2);
    }

    #[test]
    fn take_and_insert_boxed_round_trip() {
        let mut src = SparseSet::new();
        let e = Entity::allocate();
        src.insert(e, String::from("hello"));

        let mut dst = src.new_empty();
        let boxed = ComponentStore::take(&mut src, e).unwrap();
        dst.insert_boxed(e, boxed);

        let dst = dst.as_any().downcast_ref::<SparseSet<String>>().unwrap();
        assert_eq!(dst.get(e).map(String::as_str), Some("hello"));
        assert_eq!(src.len(), 0);
    }
}
