//! Enemy and projectile update: translation, despawn, contact damage and hits.

use hecs::Entity;
use tracing::debug;

use invasion_core::components::{Body, EnemyTraits, PlayerState, ProjectileTraits, Vitals};
use invasion_core::constants::{CONTACT_DAMAGE, ENEMY_DESPAWN_MARGIN, PROJECTILE_DESPAWN_MARGIN};
use invasion_core::enums::{EntityKind, ProjectileSource};
use invasion_core::events::GameEvent;
use invasion_core::rules;
use invasion_core::shared::SharedGameState;
use invasion_core::types::{Aabb, EntityId};

use crate::wave::WaveState;
use crate::world::World;

/// What the projectile pass did this tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    pub hits: u32,
    pub kills: u32,
    /// The kill that first reached the wave target happened this tick.
    pub wave_target_reached: bool,
}

/// Move every enemy, drop the ones that left the horizontal band and apply
/// contact damage to the player. Returns the number of contact hits.
///
/// With `contact_cooldown_secs == 0.0` an overlapping enemy damages the player
/// on every tick of the overlap.
pub fn update_enemies(
    world: &mut World,
    shared: &SharedGameState,
    world_width: f64,
    now_secs: f64,
    contact_cooldown_secs: f64,
    despawn_buffer: &mut Vec<EntityId>,
) -> u32 {
    despawn_buffer.clear();

    let player = world.player().and_then(|id| {
        let body = world.body(id)?;
        let state = world.get::<PlayerState>(id)?;
        Some((body.bounds, state.invincible))
    });

    let mut hits = 0;
    for (id, handle) in world.handles_of_kind(EntityKind::Enemy) {
        let Ok((body, traits)) = world
            .ecs_mut()
            .query_one_mut::<(&mut Body, &mut EnemyTraits)>(handle)
        else {
            continue;
        };

        body.integrate();
        let x = body.bounds.pos.x;
        if x < -ENEMY_DESPAWN_MARGIN || x > world_width + ENEMY_DESPAWN_MARGIN {
            despawn_buffer.push(id);
            continue;
        }

        let Some((player_box, invincible)) = player else {
            continue;
        };
        if invincible || !body.bounds.collides(&player_box) {
            continue;
        }

        let ready = contact_cooldown_secs <= 0.0
            || traits
                .last_contact_secs
                .map_or(true, |last| now_secs - last >= contact_cooldown_secs);
        if ready {
            traits.last_contact_secs = Some(now_secs);
            shared.apply_damage(CONTACT_DAMAGE);
            hits += 1;
        }
    }

    for id in despawn_buffer.drain(..) {
        debug!(%id, "enemy left the world");
        world.remove_entity(id);
    }
    hits
}

/// Move every projectile, drop the off-screen ones and resolve hits against
/// enemies. The first enemy (in creation order) a projectile overlaps takes
/// the damage and the projectile is destroyed.
pub fn update_projectiles(
    world: &mut World,
    shared: &SharedGameState,
    wave: &mut WaveState,
    events: &mut Vec<GameEvent>,
    world_width: f64,
    world_height: f64,
) -> HitReport {
    let mut report = HitReport::default();
    let enemies = world.handles_of_kind(EntityKind::Enemy);

    for (projectile_id, handle) in world.handles_of_kind(EntityKind::Projectile) {
        let Ok((body, traits)) = world
            .ecs_mut()
            .query_one_mut::<(&mut Body, &ProjectileTraits)>(handle)
        else {
            continue;
        };

        body.integrate();
        let bounds = body.bounds;
        let (damage, source) = (traits.damage, traits.source);

        let margin = PROJECTILE_DESPAWN_MARGIN;
        if bounds.left() < -margin
            || bounds.left() > world_width + margin
            || bounds.top() < -margin
            || bounds.top() > world_height + margin
        {
            world.remove_entity(projectile_id);
            continue;
        }

        if source != ProjectileSource::Player {
            continue;
        }

        let Some(&(enemy_id, enemy_handle)) = enemies.iter().find(|(id, h)| {
            world.contains(*id)
                && world
                    .ecs()
                    .get::<&Body>(*h)
                    .is_ok_and(|enemy| bounds.collides(&enemy.bounds))
        }) else {
            continue;
        };

        report.hits += 1;
        if let Some(kill) = damage_enemy(world, enemy_handle, damage) {
            let points = rules::kill_score(kill.traits.enemy_type, wave.number);
            shared.add_score(points);
            report.kills += 1;
            if wave.register_kill() {
                report.wave_target_reached = true;
            }

            let center = kill.bounds.center();
            events.push(GameEvent::Explosion {
                x: center.x,
                y: center.y,
                enemy_type: kill.traits.enemy_type,
                wave: kill.traits.wave,
            });
            debug!(%enemy_id, points, "enemy destroyed");
            world.remove_entity(enemy_id);
        }
        world.remove_entity(projectile_id);
    }

    report
}

struct Kill {
    bounds: Aabb,
    traits: EnemyTraits,
}

/// Subtract `damage` from an enemy. Returns the enemy's data if it died.
fn damage_enemy(world: &mut World, handle: Entity, damage: i32) -> Option<Kill> {
    let (body, vitals, traits) = world
        .ecs_mut()
        .query_one_mut::<(&Body, &mut Vitals, &EnemyTraits)>(handle)
        .ok()?;
    vitals.health -= damage;
    if vitals.health > 0 {
        return None;
    }
    vitals.active = false;
    Some(Kill {
        bounds: body.bounds,
        traits: *traits,
    })
}
