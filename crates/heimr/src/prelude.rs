//! Common imports: `use heimr::prelude::*;`

pub use crate::context::{
    ContextDefinition, ContextId, ContextManager, ContextPolicy, ContextRelationship,
    PolicyScope, Portal, PortalArgs, PortalHooks, PortalMode, WorldHost, run_portal_triggers,
};
pub use crate::ecs::{Entity, Parent, World, resolve_world_transform};
pub use crate::error::{ContextError, Result};
pub use crate::math::{Mat4, Quat, Transform, Vec2, Vec3};
pub use crate::scene::Scene;
