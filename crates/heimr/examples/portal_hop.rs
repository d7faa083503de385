//! Portal Hop — focus transitions between an overworld and a house interior.
//!
//! A headless tour of the context layer: the player walks toward a door in
//! the overworld, steps through a teleport portal into the house (loaded
//! lazily, setup run once), then leaves through the return door. Each tick
//! logs the focused context and the derived visible/simulated sets.
//!
//! Run with: `RUST_LOG=info cargo run -p heimr --example portal_hop`

use heimr::prelude::*;

/// Activate a portal when the player stands within arm's reach of it.
struct ProximityHooks {
    reach: f32,
    pending_spawn: Option<Vec2>,
}

impl PortalHooks for ProximityHooks {
    fn should_activate(&mut self, args: PortalArgs<'_>) -> bool {
        let Some(player) = args.world.try_named("player") else {
            return false;
        };
        let (Some(player_tf), Some(portal_tf)) = (
            args.world.get::<Transform>(player),
            args.world.get::<Transform>(args.entity),
        ) else {
            return false;
        };
        player_tf
            .translation
            .truncate()
            .distance(portal_tf.translation.truncate())
            < self.reach
    }

    fn on_enter(&mut self, args: PortalArgs<'_>) {
        log::info!("entered `{}` via portal {:?}", args.focused, args.entity);
    }

    fn on_teleport(&mut self, args: PortalArgs<'_>) {
        self.pending_spawn = Some(args.portal.spawn_point);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut mgr = ContextManager::new(Scene::new("overworld"));

    // The overworld stays visible (but paused) underneath interiors.
    mgr.register(
        ContextDefinition::new("overworld").with_policy(ContextPolicy::STACK),
    )?;
    mgr.register(
        ContextDefinition::new("house")
            .with_parent("overworld")
            .with_policy(ContextPolicy {
                visibility: PolicyScope::Stack,
                simulation: PolicyScope::FocusedOnly,
            })
            .with_setup(|world| {
                world
                    .spawn_named("fireplace")
                    .insert(Transform::from_xy(40.0, 20.0));
                // The way back out.
                world
                    .spawn_named("front-door")
                    .insert(Transform::from_xy(60.0, -10.0))
                    .insert(Portal::teleport("overworld", Vec2::new(0.0, 0.0)));
                Ok(())
            }),
    )?;

    // Populate the overworld: the player and the door into the house.
    {
        let overworld = mgr.focused_world()?;
        overworld
            .spawn_named("player")
            .insert(Transform::from_xy(0.0, 0.0));
        overworld
            .spawn_named("house-door")
            .insert(Transform::from_xy(50.0, 0.0))
            .insert(Portal::teleport("house", Vec2::new(0.0, -10.0)));
    }

    let mut hooks = ProximityHooks {
        reach: 8.0,
        pending_spawn: None,
    };

    for tick in 0..24 {
        // Gameplay system: the player walks toward positive x.
        {
            let world = mgr.focused_world()?;
            if let Some(player) = world.try_named("player") {
                if let Some(tf) = world.get_mut::<Transform>(player) {
                    tf.translation.x += 10.0;
                }
            }
        }

        let previous = mgr.focused_context().clone();
        if run_portal_triggers(&mut mgr, &mut hooks)?.is_some() {
            relocate_player(&mut mgr, &previous, hooks.pending_spawn.take());
        }

        log::info!(
            "tick {:>2}: focused=`{}` visible={:?} simulated={:?}",
            tick,
            mgr.focused_context(),
            mgr.visible_contexts()?,
            mgr.simulated_contexts()?,
        );
    }

    let rel = mgr.relationship(&"house".into(), &"overworld".into())?;
    log::info!("house is {rel:?} of overworld");
    Ok(())
}

/// Move the player (and anything parented under them) into the newly focused
/// world, placing them at the portal's spawn point.
fn relocate_player(mgr: &mut ContextManager<Scene>, from: &ContextId, spawn: Option<Vec2>) {
    let to = mgr.focused_context().clone();
    let Some((source, target)) = mgr.host_mut().worlds_pair_mut(from, &to) else {
        return;
    };
    let Some(player) = source.try_named("player") else {
        return;
    };
    source.move_entity(player, target);
    if let (Some(spawn), Some(tf)) = (spawn, target.get_mut::<Transform>(player)) {
        tf.translation = spawn.extend(0.0);
    }
}
