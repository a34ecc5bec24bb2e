//! Player physics: gravity, integration and platform collision.
//!
//! Collision rules against each platform, in priority order:
//! 1. land on top: falling (or resting) and the previous bottom edge was at
//!    or above the platform top -> snap onto it, zero `vy`, grounded.
//! 2. hit from below: rising and the previous top edge was at or below the
//!    platform bottom -> snap under it, zero `vy`.
//! 3. side push: any other overlap pushes the player out of the side
//!    opposite its horizontal velocity.

use invasion_core::components::{Body, PlayerState};
use invasion_core::constants::GRAVITY;
use invasion_core::enums::EntityKind;
use invasion_core::types::{Aabb, EntityId};

use crate::world::World;

/// Run one physics step for the player. Returns the new top-left position.
pub fn run(world: &mut World, player: EntityId, world_width: f64) -> Option<glam::DVec2> {
    let platforms: Vec<Aabb> = world
        .ids_of_kind(EntityKind::Platform)
        .into_iter()
        .filter_map(|id| world.body(id).map(|b| b.bounds))
        .collect();

    let handle = world.handle(player)?;
    let (body, state) = world
        .ecs_mut()
        .query_one_mut::<(&mut Body, &mut PlayerState)>(handle)
        .ok()?;
    step_player(body, state, &platforms, world_width);
    Some(body.bounds.pos)
}

/// One tick of player motion against a fixed set of platforms.
pub fn step_player(body: &mut Body, state: &mut PlayerState, platforms: &[Aabb], world_width: f64) {
    if !(state.grounded && !state.jumping) {
        body.velocity.y += GRAVITY;
    }

    let previous = body.bounds;
    body.integrate();

    let max_x = (world_width - body.bounds.size.x).max(0.0);
    body.bounds.pos.x = body.bounds.pos.x.clamp(0.0, max_x);

    state.grounded = false;
    for platform in platforms {
        resolve_platform(body, state, &previous, platform);
    }
}

fn resolve_platform(body: &mut Body, state: &mut PlayerState, previous: &Aabb, platform: &Aabb) {
    let bounds = body.bounds;
    if !bounds.overlaps_horizontally(platform) {
        return;
    }

    // Resting exactly on the top edge counts as landing, otherwise a grounded
    // player without gravity would lose contact every other tick.
    if body.velocity.y >= 0.0
        && previous.bottom() <= platform.top()
        && bounds.bottom() >= platform.top()
    {
        body.bounds.pos.y = platform.top() - bounds.size.y;
        body.velocity.y = 0.0;
        state.grounded = true;
        state.jumping = false;
        return;
    }

    if !bounds.collides(platform) {
        return;
    }

    if body.velocity.y < 0.0 && previous.top() >= platform.bottom() {
        body.bounds.pos.y = platform.bottom();
        body.velocity.y = 0.0;
        return;
    }

    let push_left = if body.velocity.x > 0.0 {
        true
    } else if body.velocity.x < 0.0 {
        false
    } else {
        bounds.center().x < platform.center().x
    };
    body.bounds.pos.x = if push_left {
        platform.left() - bounds.size.x
    } else {
        platform.right()
    };
}
