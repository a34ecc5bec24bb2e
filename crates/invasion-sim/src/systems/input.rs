//! Input interpreter: edge detection and the game-state machine.
//!
//! Input frames arrive as `held` maps plus optional explicit `key_press`
//! maps. Once per tick the buffered frames are folded into one
//! [`TickInput`]: the keys held at the end of the tick, and the keys that
//! went down during it (held now but not in the previous frame, or flagged
//! explicitly).

use invasion_core::commands::InputFrame;
use invasion_core::components::{Body, PlayerState};
use invasion_core::constants::{JUMP_POWER, PLAYER_SPEED};
use invasion_core::enums::{GameState, Key, KeySet, WeaponType};
use invasion_core::types::EntityId;

use crate::world::World;
use crate::world_setup;

/// Keys for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: KeySet,
    pub pressed: KeySet,
}

/// Buffers input frames between ticks and diffs held state across frames.
#[derive(Debug, Default)]
pub struct InputTracker {
    previous_held: KeySet,
    pending: Vec<InputFrame>,
}

impl InputTracker {
    pub fn queue(&mut self, frame: InputFrame) {
        self.pending.push(frame);
    }

    /// Fold every buffered frame into this tick's input.
    ///
    /// With no new frame the held set carries over and nothing is pressed.
    pub fn sample(&mut self) -> TickInput {
        let mut held = self.previous_held;
        let mut pressed = KeySet::empty();
        for frame in self.pending.drain(..) {
            let now = frame.held();
            pressed = pressed.union(now.difference(held)).union(frame.pressed());
            held = now;
        }
        self.previous_held = held;
        TickInput { held, pressed }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// A discrete state-machine action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Decide the state-machine action for this tick's pressed keys.
///
/// The quit key wins in any state. Space starts from the menu and restarts
/// after game over; escape toggles pause and quits from the menu and the
/// game-over screen.
pub fn control(state: GameState, pressed: KeySet) -> Option<Control> {
    if pressed.contains(Key::Quit) {
        return Some(Control::Quit);
    }
    let space = pressed.contains(Key::Space);
    let escape = pressed.contains(Key::Escape);
    match state {
        GameState::Menu if space => Some(Control::Start),
        GameState::Menu if escape => Some(Control::Quit),
        GameState::Playing if escape => Some(Control::Pause),
        GameState::Paused if escape => Some(Control::Resume),
        GameState::GameOver if space => Some(Control::Restart),
        GameState::GameOver if escape => Some(Control::Quit),
        _ => None,
    }
}

/// Set horizontal velocity from held arrows, update facing and start a jump
/// if up was pressed while grounded.
pub fn apply_movement(world: &mut World, player: EntityId, input: &TickInput, facing_right: &mut bool) {
    let Some(handle) = world.handle(player) else {
        return;
    };
    let Ok((body, state)) = world
        .ecs_mut()
        .query_one_mut::<(&mut Body, &mut PlayerState)>(handle)
    else {
        return;
    };

    body.velocity.x = if input.held.contains(Key::Left) {
        *facing_right = false;
        -PLAYER_SPEED
    } else if input.held.contains(Key::Right) {
        *facing_right = true;
        PLAYER_SPEED
    } else {
        0.0
    };

    if input.pressed.contains(Key::Up) && state.grounded {
        body.velocity.y = -JUMP_POWER;
        state.grounded = false;
        state.jumping = true;
    }
}

/// Last shot time per weapon, in simulation seconds.
#[derive(Debug, Clone, Copy)]
pub struct WeaponCooldowns {
    primary: f64,
    secondary: f64,
}

impl Default for WeaponCooldowns {
    fn default() -> Self {
        Self {
            primary: f64::NEG_INFINITY,
            secondary: f64::NEG_INFINITY,
        }
    }
}

impl WeaponCooldowns {
    /// Record a shot at `now_secs` if the weapon's cooldown has elapsed.
    pub fn try_fire(&mut self, weapon: WeaponType, now_secs: f64) -> bool {
        let last = match weapon {
            WeaponType::Primary => &mut self.primary,
            WeaponType::Secondary => &mut self.secondary,
        };
        // Small tolerance so a cooldown that is a whole number of ticks is
        // not lost to float rounding.
        if now_secs - *last + 1e-9 < world_setup::weapon_cooldown(weapon) {
            return false;
        }
        *last = now_secs;
        true
    }
}

/// Fire the weapons requested this tick. Primary fires while held, secondary
/// on a press. Returns the projectiles spawned.
pub fn fire_weapons(
    world: &mut World,
    player: EntityId,
    input: &TickInput,
    cooldowns: &mut WeaponCooldowns,
    now_secs: f64,
    facing_right: bool,
) -> Vec<EntityId> {
    let Some(body) = world.body(player) else {
        return Vec::new();
    };
    let origin = body.bounds.center();
    let direction = if facing_right { 1.0 } else { -1.0 };

    let mut spawned = Vec::new();
    let requests = [
        (WeaponType::Primary, input.held.contains(Key::AttackPrimary)),
        (WeaponType::Secondary, input.pressed.contains(Key::AttackSecondary)),
    ];
    for (weapon, wanted) in requests {
        if wanted && cooldowns.try_fire(weapon, now_secs) {
            spawned.push(world_setup::spawn_projectile(world, weapon, origin, direction));
        }
    }
    spawned
}
