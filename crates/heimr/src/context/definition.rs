//! Context identity, policy, and definition types.

use std::fmt;

use crate::ecs::World;
use crate::error::SetupError;

/// Unique identifier for a spatial context.
///
/// A newtype rather than a raw `String` so context ids cannot be mixed up
/// with arbitrary identifiers at compile time. Equality is value equality;
/// one id per scene is reserved as the root context and coincides with the
/// id of the scene's permanently-present default world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(String);

impl ContextId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContextId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContextId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How many levels of the context stack participate in an activity while a
/// context is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyScope {
    /// Only the focused context.
    #[default]
    FocusedOnly,
    /// The focused context and its whole ancestor stack.
    Stack,
}

/// Governs how much of the focused context's ancestry keeps rendering and
/// ticking.
///
/// The policy in effect is always read from the *currently focused* context's
/// definition — "how much of my ancestry should remain visible/simulated
/// while I am focused" — never merged across the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextPolicy {
    pub visibility: PolicyScope,
    pub simulation: PolicyScope,
}

impl ContextPolicy {
    /// Focused-only visibility and simulation (the default).
    pub const FOCUSED_ONLY: Self = Self {
        visibility: PolicyScope::FocusedOnly,
        simulation: PolicyScope::FocusedOnly,
    };

    /// Whole-stack visibility and simulation.
    pub const STACK: Self = Self {
        visibility: PolicyScope::Stack,
        simulation: PolicyScope::Stack,
    };
}

/// One-time world population routine, run lazily on first load.
///
/// A failure propagates out of
/// [`ensure_world_loaded`](super::manager::ContextManager::ensure_world_loaded)
/// and leaves the context not-loaded.
pub type SetupFn = Box<dyn Fn(&mut World) -> Result<(), SetupError>>;

/// Static description of a spatial context: its place in the hierarchy, its
/// visibility/simulation policy, and how to populate its world.
///
/// Registered once per context before first use, alive for the scene's
/// lifetime.
///
/// # Example
///
/// ```ignore
/// let house = ContextDefinition::new("house")
///     .with_parent("overworld")
///     .with_policy(ContextPolicy::FOCUSED_ONLY)
///     .with_setup(|world| {
///         world.spawn_named("door").insert(Transform::from_xy(0.0, -40.0));
///         Ok(())
///     });
/// manager.register(house)?;
/// ```
pub struct ContextDefinition {
    pub id: ContextId,
    /// Establishes the ancestor chain used by stack computation. `None` only
    /// for the root context.
    pub parent_id: Option<ContextId>,
    pub policy: ContextPolicy,
    /// Invoked exactly once, lazily, the first time this context's world is
    /// loaded.
    pub setup: Option<SetupFn>,
}

impl ContextDefinition {
    pub fn new(id: impl Into<ContextId>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            policy: ContextPolicy::default(),
            setup: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ContextId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn with_policy(mut self, policy: ContextPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_setup(
        mut self,
        setup: impl Fn(&mut World) -> Result<(), SetupError> + 'static,
    ) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }
}

impl fmt::Debug for ContextDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextDefinition")
            .field("id", &self.id)
            .field("parent_id", &self.parent_id)
            .field("policy", &self.policy)
            .field("setup", &self.setup.as_ref().map(|_| "..."))
            .finish()
    }
}
