//! Context stack computation.
//!
//! The stack is the focused context's ancestor chain, focused-first:
//! `[focused, parent(focused), ..., root]`. It is a pure function of the
//! parent resolver and is recomputed on every call — never cached — so
//! definitions registered between calls are reflected immediately.

use std::collections::HashSet;

use crate::error::{ContextError, Result};

use super::definition::ContextId;

/// Walk `focused`'s parent chain to a root.
///
/// `parent_of` returns a context's parent, or `None` for a root. Any id seen
/// twice means the chain is cyclic; the error names the offending id rather
/// than looping forever.
pub fn compute_stack<F>(focused: &ContextId, mut parent_of: F) -> Result<Vec<ContextId>>
where
    F: FnMut(&ContextId) -> Option<ContextId>,
{
    let mut stack = Vec::new();
    let mut seen = HashSet::new();
    let mut current = focused.clone();
    loop {
        if !seen.insert(current.clone()) {
            return Err(ContextError::ContextCycle { id: current });
        }
        stack.push(current.clone());
        match parent_of(&current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    Ok(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn id(s: &str) -> ContextId {
        ContextId::from(s)
    }

    fn resolver(edges: &[(&str, &str)]) -> impl FnMut(&ContextId) -> Option<ContextId> {
        let map: HashMap<ContextId, ContextId> = edges
            .iter()
            .map(|(child, parent)| (id(child), id(parent)))
            .collect();
        move |c: &ContextId| map.get(c).cloned()
    }

    #[test]
    fn singleton_stack() {
        let stack = compute_stack(&id("root"), resolver(&[])).unwrap();
        assert_eq!(stack, vec![id("root")]);
    }

    #[test]
    fn chain_is_focused_first() {
        let stack = compute_stack(
            &id("basement"),
            resolver(&[("basement", "house"), ("house", "root")]),
        )
        .unwrap();
        assert_eq!(stack, vec![id("basement"), id("house"), id("root")]);
    }

    #[test]
    fn terminates_at_parentless_node() {
        let stack = compute_stack(&id("a"), resolver(&[("a", "b")])).unwrap();
        assert_eq!(stack.last(), Some(&id("b")));
    }

    #[test]
    fn cycle_is_an_error_naming_an_offender() {
        let err = compute_stack(&id("a"), resolver(&[("a", "b"), ("b", "c"), ("c", "a")]))
            .unwrap_err();
        match err {
            ContextError::ContextCycle { id: offender } => {
                assert_eq!(offender, id("a"));
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let err = compute_stack(&id("a"), resolver(&[("a", "a")])).unwrap_err();
        assert!(matches!(err, ContextError::ContextCycle { .. }));
    }

    #[test]
    fn reflects_resolver_changes_between_calls() {
        // No caching: the same focused id yields different stacks when the
        // resolver changes.
        let first = compute_stack(&id("a"), resolver(&[])).unwrap();
        assert_eq!(first.len(), 1);
        let second = compute_stack(&id("a"), resolver(&[("a", "b")])).unwrap();
        assert_eq!(second.len(), 2);
    }
}
