//! # Spatial Contexts — World Virtualization
//!
//! Partitions game state into independently-loadable **spatial contexts**
//! (logical sub-worlds: "overworld", "house interior", "dungeon"), each
//! backed by its own [`World`](crate::ecs::World), with explicit rules for
//! which contexts are simulated, which are rendered, and how entities move
//! between them as the player's focus changes.
//!
//! ## Module Overview
//!
//! - [`definition`] — [`ContextId`], policies, and [`ContextDefinition`]
//! - [`registry`] — id → definition table with eager parent-chain validation
//! - [`stack`] — ancestor-chain computation with cycle detection
//! - [`policy`] — stack + policy → ordered visible/simulated sets
//! - [`manager`] — world lifecycle, focus transitions, relationship queries
//! - [`portal`] — per-tick transition triggers
//!
//! ## Control flow
//!
//! Each simulation tick the owning scene asks the [`ContextManager`] for the
//! focused context and binds gameplay systems to its world. When a
//! [`Portal`] activates, focus shifts (loading the target world on first
//! use); render collaborators ask for [`visible_contexts`] and draw each
//! world's entities parent→focused.
//!
//! [`visible_contexts`]: ContextManager::visible_contexts

pub mod definition;
pub mod manager;
pub mod policy;
pub mod portal;
pub mod registry;
pub mod stack;

pub use definition::{ContextDefinition, ContextId, ContextPolicy, PolicyScope, SetupFn};
pub use manager::{ContextManager, ContextRelationship, WorldHost};
pub use policy::{DerivedContextSets, derive};
pub use portal::{Portal, PortalArgs, PortalHooks, PortalMode, run_portal_triggers};
pub use registry::DefinitionRegistry;
pub use stack::compute_stack;
