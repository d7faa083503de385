//! # Heimr — Multi-World Runtime Core for a 2D Entity-Component Engine
//!
//! Heimr partitions simulated game state into independently-loadable
//! **spatial contexts** — logical sub-worlds like "overworld", "house
//! interior", "dungeon" — each backed by its own entity store, with explicit
//! rules for which contexts are simulated, which are rendered, and how
//! entities migrate between them as the player's focus changes.
//!
//! Start with `use heimr::prelude::*`, build a [`Scene`](scene::Scene), wrap
//! it in a [`ContextManager`](context::ContextManager), and register your
//! [`ContextDefinition`](context::ContextDefinition)s.
//!
//! Rendering, physics, input, and asset loading are collaborators, not part
//! of this crate; they consume the manager's query API and the per-world
//! entity stores.

pub mod context;
pub mod ecs;
pub mod error;
pub mod math;
pub mod prelude;
pub mod scene;
