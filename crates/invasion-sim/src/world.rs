//! Entity & world store.
//!
//! Entities live in a hecs world; each kind has its own component set and so
//! its own archetype, which serves as the kind-indexed collection. A global
//! id -> handle map sits beside it. Creation and removal update both in the
//! same `&mut self` call, so no caller can observe one without the other.

use std::collections::HashMap;

use hecs::Entity;

use invasion_core::components::*;
use invasion_core::enums::EntityKind;
use invasion_core::state::{EntityView, KindView};
use invasion_core::types::EntityId;

/// Authoritative entity store. Only the simulation mutates it.
pub struct World {
    ecs: hecs::World,
    index: HashMap<EntityId, Entity>,
    next_id: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            ecs: hecs::World::new(),
            index: HashMap::new(),
            next_id: 0,
        }
    }

    /// Allocate a new id and insert an entity of `kind` with default
    /// kind-specific data. Never fails.
    pub fn create_entity(
        &mut self,
        kind: EntityKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let body = Body::new(x, y, width, height);
        let vitals = Vitals::new(default_health(kind));
        let handle = match kind {
            EntityKind::Player => self
                .ecs
                .spawn((id, kind, body, vitals, PlayerState::default())),
            EntityKind::Enemy => self
                .ecs
                .spawn((id, kind, body, vitals, EnemyTraits::default())),
            EntityKind::Platform => self.ecs.spawn((id, kind, body, vitals, Platform)),
            EntityKind::Projectile => self
                .ecs
                .spawn((id, kind, body, vitals, ProjectileTraits::default())),
            EntityKind::Powerup => self
                .ecs
                .spawn((id, kind, body, vitals, PowerupTraits::default())),
        };
        self.index.insert(id, handle);
        id
    }

    /// Delete `id` from the global map and its kind collection.
    /// Removing an unknown id is a no-op and returns `false`.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        match self.index.remove(&id) {
            Some(handle) => {
                let _ = self.ecs.despawn(handle);
                true
            }
            None => false,
        }
    }

    /// Remove every entity. The id counter keeps running.
    pub fn clear(&mut self) {
        self.ecs.clear();
        self.index.clear();
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        let handle = *self.index.get(&id)?;
        self.ecs.get::<&EntityKind>(handle).ok().map(|k| *k)
    }

    /// Ids in the kind collection for `kind`, in creation order.
    pub fn ids_of_kind(&self, kind: EntityKind) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = match kind {
            EntityKind::Player => self.ids_with::<PlayerState>(),
            EntityKind::Enemy => self.ids_with::<EnemyTraits>(),
            EntityKind::Platform => self.ids_with::<Platform>(),
            EntityKind::Projectile => self.ids_with::<ProjectileTraits>(),
            EntityKind::Powerup => self.ids_with::<PowerupTraits>(),
        };
        ids.sort();
        ids
    }

    fn ids_with<T: hecs::Component>(&self) -> Vec<EntityId> {
        self.ecs
            .query::<(&EntityId, &T)>()
            .iter()
            .map(|(_, (id, _))| *id)
            .collect()
    }

    /// Handles of the kind collection for `kind`, in creation order.
    pub(crate) fn handles_of_kind(&self, kind: EntityKind) -> Vec<(EntityId, Entity)> {
        self.ids_of_kind(kind)
            .into_iter()
            .filter_map(|id| self.index.get(&id).map(|h| (id, *h)))
            .collect()
    }

    /// The player entity, if one exists.
    pub fn player(&self) -> Option<EntityId> {
        self.ids_of_kind(EntityKind::Player).first().copied()
    }

    pub fn handle(&self, id: EntityId) -> Option<Entity> {
        self.index.get(&id).copied()
    }

    pub fn body(&self, id: EntityId) -> Option<Body> {
        let handle = self.handle(id)?;
        self.ecs.get::<&Body>(handle).ok().map(|b| *b)
    }

    pub fn vitals(&self, id: EntityId) -> Option<Vitals> {
        let handle = self.handle(id)?;
        self.ecs.get::<&Vitals>(handle).ok().map(|v| *v)
    }

    /// Mutable access to one component of `id`.
    pub fn get_mut<T: hecs::Component>(&mut self, id: EntityId) -> Option<hecs::RefMut<'_, T>> {
        let handle = self.handle(id)?;
        self.ecs.get::<&mut T>(handle).ok()
    }

    /// Read one component of `id` by value.
    pub fn get<T: hecs::Component + Copy>(&self, id: EntityId) -> Option<T> {
        let handle = self.handle(id)?;
        self.ecs.get::<&T>(handle).ok().map(|c| *c)
    }

    pub fn ecs(&self) -> &hecs::World {
        &self.ecs
    }

    pub(crate) fn ecs_mut(&mut self) -> &mut hecs::World {
        &mut self.ecs
    }

    /// Render-ready copy of every entity, ordered by id.
    pub fn snapshot(&self) -> Vec<EntityView> {
        let mut views: Vec<EntityView> = self
            .ecs
            .query::<(
                &EntityId,
                &EntityKind,
                &Body,
                &Vitals,
                Option<&PlayerState>,
                Option<&EnemyTraits>,
                Option<&ProjectileTraits>,
                Option<&PowerupTraits>,
            )>()
            .iter()
            .map(
                |(_, (id, kind, body, vitals, player, enemy, projectile, powerup))| EntityView {
                    id: *id,
                    x: body.bounds.pos.x,
                    y: body.bounds.pos.y,
                    width: body.bounds.size.x,
                    height: body.bounds.size.y,
                    vx: body.velocity.x,
                    vy: body.velocity.y,
                    health: vitals.health,
                    active: vitals.active,
                    detail: kind_view(*kind, player, enemy, projectile, powerup),
                },
            )
            .collect();

        views.sort_by_key(|v| v.id);
        views
    }
}

fn kind_view(
    kind: EntityKind,
    player: Option<&PlayerState>,
    enemy: Option<&EnemyTraits>,
    projectile: Option<&ProjectileTraits>,
    powerup: Option<&PowerupTraits>,
) -> KindView {
    match kind {
        EntityKind::Player => {
            let p = player.copied().unwrap_or_default();
            KindView::Player {
                grounded: p.grounded,
                invincible: p.invincible,
            }
        }
        EntityKind::Enemy => {
            let e = enemy.copied().unwrap_or_default();
            KindView::Enemy {
                enemy_type: e.enemy_type,
                wave: e.wave,
            }
        }
        EntityKind::Platform => KindView::Platform,
        EntityKind::Projectile => {
            let p = projectile.copied().unwrap_or_default();
            KindView::Projectile {
                damage: p.damage,
                source: p.source,
                weapon_type: p.weapon_type,
                direction: p.direction,
            }
        }
        EntityKind::Powerup => KindView::Powerup {
            powerup_type: powerup.copied().unwrap_or_default().powerup_type,
        },
    }
}
