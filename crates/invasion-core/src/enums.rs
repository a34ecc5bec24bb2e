//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game state shared with the presentation side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Which kind-indexed collection an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Enemy,
    Platform,
    Projectile,
    Powerup,
}

/// Enemy archetype. Serialized as its numeric tier (1, 2 or 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EnemyType {
    /// Balanced health and speed.
    #[default]
    Basic,
    /// More health, slower.
    Tough,
    /// Less health, faster.
    Fast,
}

impl EnemyType {
    pub const ALL: [EnemyType; 3] = [EnemyType::Basic, EnemyType::Tough, EnemyType::Fast];

    /// Numeric tier used on the wire and in the score formula.
    pub fn tier(self) -> u8 {
        match self {
            EnemyType::Basic => 1,
            EnemyType::Tough => 2,
            EnemyType::Fast => 3,
        }
    }

    /// Health at wave 1.
    pub fn base_health(self) -> i32 {
        match self {
            EnemyType::Basic => 30,
            EnemyType::Tough => 50,
            EnemyType::Fast => 20,
        }
    }

    pub fn speed_multiplier(self) -> f64 {
        match self {
            EnemyType::Basic => 1.0,
            EnemyType::Tough => 0.7,
            EnemyType::Fast => 1.5,
        }
    }
}

impl From<EnemyType> for u8 {
    fn from(value: EnemyType) -> Self {
        value.tier()
    }
}

impl TryFrom<u8> for EnemyType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EnemyType::Basic),
            2 => Ok(EnemyType::Tough),
            3 => Ok(EnemyType::Fast),
            other => Err(format!("unknown enemy type {other}")),
        }
    }
}

/// Player weapon slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    /// Rapid fire, low damage. Fires while held.
    #[default]
    Primary,
    /// Slow heavy shot. Fires once per key press.
    Secondary,
}

/// Who fired a projectile. Only the player shoots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileSource {
    #[default]
    Player,
}

/// Powerup effect. Serialized as its numeric id (1, 2 or 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PowerupType {
    #[default]
    Health,
    Score,
    Invincibility,
}

impl PowerupType {
    pub const ALL: [PowerupType; 3] = [
        PowerupType::Health,
        PowerupType::Score,
        PowerupType::Invincibility,
    ];

    pub fn id(self) -> u8 {
        match self {
            PowerupType::Health => 1,
            PowerupType::Score => 2,
            PowerupType::Invincibility => 3,
        }
    }
}

impl From<PowerupType> for u8 {
    fn from(value: PowerupType) -> Self {
        value.id()
    }
}

impl TryFrom<u8> for PowerupType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PowerupType::Health),
            2 => Ok(PowerupType::Score),
            3 => Ok(PowerupType::Invincibility),
            other => Err(format!("unknown powerup type {other}")),
        }
    }
}

/// Keys the input interpreter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Jump.
    Up,
    /// Start from the menu, restart after game over.
    Space,
    /// Pause/resume, or quit from the menu and game-over screens.
    Escape,
    /// Quit from any state.
    Quit,
    AttackPrimary,
    AttackSecondary,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Space,
        Key::Escape,
        Key::Quit,
        Key::AttackPrimary,
        Key::AttackSecondary,
    ];

    /// Name used in the `keys` / `key_press` maps of an input message.
    pub fn name(self) -> &'static str {
        match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
            Key::Space => "space",
            Key::Escape => "escape",
            Key::Quit => "q",
            Key::AttackPrimary => "z",
            Key::AttackSecondary => "x",
        }
    }

    pub fn from_name(name: &str) -> Option<Key> {
        Key::ALL.into_iter().find(|k| k.name() == name)
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A compact set of keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet(u16);

impl KeySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: KeySet) -> KeySet {
        KeySet(self.0 | other.0)
    }

    /// Keys in `self` that are not in `other`.
    pub fn difference(self, other: KeySet) -> KeySet {
        KeySet(self.0 & !other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = Key> {
        Key::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}
