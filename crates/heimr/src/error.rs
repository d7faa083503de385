//! Errors raised by the context layer.
//!
//! Missing entities or components are *not* errors — per-tick polling code
//! expects absent values, so [`World::get`](crate::ecs::World::get) and
//! friends return `None`/`false` instead. The variants here cover context
//! misconfiguration and lifecycle misuse, which must surface loudly.

use thiserror::Error;

use crate::context::ContextId;

/// Convenience alias used throughout the context layer.
pub type Result<T> = std::result::Result<T, ContextError>;

/// Boxed error returned by context setup routines.
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from context registration, stack computation, and world lifecycle.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The parent chain revisits a context id. Raised eagerly at registration
    /// and again by stack computation, since tolerating it would loop forever.
    #[error("context parent chain contains a cycle at `{id}`")]
    ContextCycle { id: ContextId },

    /// The context id has no registered definition.
    #[error("context `{0}` is not registered")]
    UnknownContext(ContextId),

    /// A definition names a parent that has not been registered.
    #[error("context `{id}` names unregistered parent `{parent}`")]
    UnknownParentContext { id: ContextId, parent: ContextId },

    /// The focused context's world may never be unloaded.
    #[error("cannot unload `{0}`: it is the focused context")]
    UnloadFocusedContext(ContextId),

    /// The root context's world exists for the scene's whole lifetime.
    #[error("cannot unload `{0}`: it is the root context")]
    UnloadRootContext(ContextId),

    /// A context id has no backing world. Signals a sequencing bug in the
    /// caller — `ensure_world_loaded` should have run first.
    #[error("no world is loaded for context `{0}`")]
    WorldNotLoaded(ContextId),

    /// A context setup routine failed. The world it was populating has been
    /// torn down; the context remains not-loaded.
    #[error("setup for context `{id}` failed")]
    Setup {
        id: ContextId,
        #[source]
        source: SetupError,
    },
}
