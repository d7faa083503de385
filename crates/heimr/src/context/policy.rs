//! Policy derivation — turning a stack into visible/simulated context sets.

use super::definition::{ContextId, ContextPolicy, PolicyScope};

/// Ordered context-id sets derived from a stack and the focused context's
/// policy. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedContextSets {
    /// Draw order: root-first, focused-last.
    pub visible: Vec<ContextId>,
    /// Tick order: focused-first.
    pub simulated: Vec<ContextId>,
}

/// Derive the visible and simulated sets from a focused-first `stack`.
///
/// - `visible` is the stack reversed (root-first) when the visibility scope
///   is `Stack`, else just the focused context.
/// - `simulated` is the stack as-is (focused-first) when the simulation scope
///   is `Stack`, else just the focused context.
///
/// The focused context is always in both sets regardless of policy. Pure,
/// O(n) in stack length.
pub fn derive(stack: &[ContextId], policy: ContextPolicy) -> DerivedContextSets {
    let focused_only = |stack: &[ContextId]| stack.first().cloned().into_iter().collect();

    let visible = match policy.visibility {
        PolicyScope::Stack => stack.iter().rev().cloned().collect(),
        PolicyScope::FocusedOnly => focused_only(stack),
    };
    let simulated = match policy.simulation {
        PolicyScope::Stack => stack.to_vec(),
        PolicyScope::FocusedOnly => focused_only(stack),
    };

    DerivedContextSets { visible, simulated }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ContextId> {
        names.iter().map(|&n| ContextId::from(n)).collect()
    }

    #[test]
    fn stack_policy_reverses_visible_keeps_simulated() {
        let stack = ids(&["basement", "house", "root"]);
        let sets = derive(&stack, ContextPolicy::STACK);
        assert_eq!(sets.visible, ids(&["root", "house", "basement"]));
        assert_eq!(sets.simulated, stack);
    }

    #[test]
    fn focused_only_policy_yields_singletons() {
        let stack = ids(&["basement", "house", "root"]);
        let sets = derive(&stack, ContextPolicy::FOCUSED_ONLY);
        assert_eq!(sets.visible, ids(&["basement"]));
        assert_eq!(sets.simulated, ids(&["basement"]));
    }

    #[test]
    fn mixed_policy() {
        let stack = ids(&["house", "root"]);
        let policy = ContextPolicy {
            visibility: PolicyScope::Stack,
            simulation: PolicyScope::FocusedOnly,
        };
        let sets = derive(&stack, policy);
        assert_eq!(sets.visible, ids(&["root", "house"]));
        assert_eq!(sets.simulated, ids(&["house"]));
    }

    #[test]
    fn singleton_stack_is_policy_invariant() {
        let stack = ids(&["only"]);
        for policy in [ContextPolicy::FOCUSED_ONLY, ContextPolicy::STACK] {
            let sets = derive(&stack, policy);
            assert_eq!(sets.visible, stack);
            assert_eq!(sets.simulated, stack);
        }
    }

    #[test]
    fn empty_stack_yields_empty_sets() {
        let sets = derive(&[], ContextPolicy::STACK);
        assert!(sets.visible.is_empty());
        assert!(sets.simulated.is_empty());
    }
}
