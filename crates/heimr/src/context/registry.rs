//! Context definition registry.
//!
//! The static table of context id → definition. Registration validates the
//! parent chain eagerly so misconfiguration (dangling parents, cycles)
//! surfaces at scene construction, not on first focus transition at runtime.

use std::collections::HashMap;

use crate::error::{ContextError, Result};

use super::definition::{ContextDefinition, ContextId};
use super::stack::compute_stack;

/// Table of registered [`ContextDefinition`]s.
#[derive(Default)]
pub struct DefinitionRegistry {
    defs: HashMap<ContextId, ContextDefinition>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, eagerly validating its parent chain.
    ///
    /// Fails fast with [`ContextError::UnknownParentContext`] if the parent
    /// is not yet registered (register parents before children), or
    /// [`ContextError::ContextCycle`] if the chain would revisit an id. On
    /// error the registry is left as it was.
    pub fn register(&mut self, def: ContextDefinition) -> Result<()> {
        if let Some(parent) = &def.parent_id {
            if parent != &def.id && !self.defs.contains_key(parent) {
                return Err(ContextError::UnknownParentContext {
                    id: def.id.clone(),
                    parent: parent.clone(),
                });
            }
        }

        let id = def.id.clone();
        let previous = self.defs.insert(id.clone(), def);
        if let Err(err) = compute_stack(&id, |c| self.parent_of(c).cloned()) {
            // Roll back so a bad re-registration can't corrupt the table.
            match previous {
                Some(old) => {
                    self.defs.insert(id, old);
                }
                None => {
                    self.defs.remove(&id);
                }
            }
            return Err(err);
        }
        Ok(())
    }

    pub fn get(&self, id: &ContextId) -> Option<&ContextDefinition> {
        self.defs.get(id)
    }

    pub fn contains(&self, id: &ContextId) -> bool {
        self.defs.contains_key(id)
    }

    /// The registered parent of a context, `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &ContextId) -> Option<&ContextId> {
        self.defs.get(id)?.parent_id.as_ref()
    }

    /// All registered context ids, unordered.
    pub fn ids(&self) -> impl Iterator<Item = &ContextId> {
        self.defs.keys()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ContextId {
        ContextId::from(s)
    }

    #[test]
    fn register_and_query() {
        let mut registry = DefinitionRegistry::new();
        registry.register(ContextDefinition::new("root")).unwrap();
        registry
            .register(ContextDefinition::new("house").with_parent("root"))
            .unwrap();

        assert!(registry.contains(&id("root")));
        assert_eq!(registry.parent_of(&id("house")), Some(&id("root")));
        assert_eq!(registry.parent_of(&id("root")), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn dangling_parent_fails_fast() {
        let mut registry = DefinitionRegistry::new();
        let err = registry
            .register(ContextDefinition::new("house").with_parent("nowhere"))
            .unwrap_err();
        assert!(matches!(err, ContextError::UnknownParentContext { .. }));
        assert!(!registry.contains(&id("house")));
    }

    #[test]
    fn self_parent_is_rejected_as_cycle() {
        let mut registry = DefinitionRegistry::new();
        let err = registry
            .register(ContextDefinition::new("ouroboros").with_parent("ouroboros"))
            .unwrap_err();
        assert!(matches!(err, ContextError::ContextCycle { .. }));
        assert!(!registry.contains(&id("ouroboros")));
    }

    #[test]
    fn re_registration_cycle_rolls_back() {
        let mut registry = DefinitionRegistry::new();
        registry.register(ContextDefinition::new("a")).unwrap();
        registry
            .register(ContextDefinition::new("b").with_parent("a"))
            .unwrap();

        // Re-registering `a` under `b` would close a loop.
        let err = registry
            .register(ContextDefinition::new("a").with_parent("b"))
            .unwrap_err();
        assert!(matches!(err, ContextError::ContextCycle { .. }));
        // Old definition survives.
        assert_eq!(registry.parent_of(&id("a")), None);
    }
}
