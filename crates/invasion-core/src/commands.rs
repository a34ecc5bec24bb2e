//! Messages sent from the presentation side to the simulation.
//!
//! On the wire every message is a JSON object with a `type` discriminator.
//! `input` and `exit_game` are understood here; any other type is kept as
//! `InboundMessage::Other` so that a different consumer of the same channel
//! can still pick it up.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{Key, KeySet};
use crate::error::ProtocolError;

/// One frame of keyboard state from the presentation side.
///
/// `keys` maps key name to "currently held", `key_press` maps key name to
/// "pressed since the previous frame". Unknown key names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    #[serde(default)]
    pub keys: HashMap<String, bool>,
    #[serde(default)]
    pub key_press: HashMap<String, bool>,
}

impl InputFrame {
    /// Build a frame from held keys and explicitly pressed keys.
    pub fn new(held: &[Key], pressed: &[Key]) -> Self {
        Self {
            keys: held.iter().map(|k| (k.name().to_owned(), true)).collect(),
            key_press: pressed.iter().map(|k| (k.name().to_owned(), true)).collect(),
        }
    }

    pub fn held(&self) -> KeySet {
        to_key_set(&self.keys)
    }

    pub fn pressed(&self) -> KeySet {
        to_key_set(&self.key_press)
    }
}

fn to_key_set(map: &HashMap<String, bool>) -> KeySet {
    map.iter()
        .filter(|(_, down)| **down)
        .filter_map(|(name, _)| Key::from_name(name))
        .collect()
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Input(InputFrame),
    ExitGame,
    /// A message addressed to some other consumer; preserved verbatim.
    Other(Value),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum KnownInbound {
    Input(InputFrame),
    ExitGame,
}

impl InboundMessage {
    /// Decode one message from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let kind = match &value {
            Value::Object(map) => match map.get("type") {
                Some(Value::String(kind)) => kind.clone(),
                _ => return Err(ProtocolError::MissingType),
            },
            _ => return Err(ProtocolError::NotAnObject),
        };

        match kind.as_str() {
            "input" | "exit_game" => {
                let known: KnownInbound =
                    serde_json::from_value(value).map_err(|e| ProtocolError::InvalidPayload {
                        kind,
                        reason: e.to_string(),
                    })?;
                Ok(match known {
                    KnownInbound::Input(frame) => InboundMessage::Input(frame),
                    KnownInbound::ExitGame => InboundMessage::ExitGame,
                })
            }
            _ => Ok(InboundMessage::Other(value)),
        }
    }

    pub fn to_value(&self) -> Value {
        let known = match self {
            InboundMessage::Input(frame) => KnownInbound::Input(frame.clone()),
            InboundMessage::ExitGame => KnownInbound::ExitGame,
            InboundMessage::Other(value) => return value.clone(),
        };
        serde_json::to_value(known).unwrap_or(Value::Null)
    }

    /// Whether the simulation loop consumes this message.
    pub fn is_for_simulation(&self) -> bool {
        !matches!(self, InboundMessage::Other(_))
    }
}
