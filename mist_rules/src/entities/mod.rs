//! Entity definitions: characters and the themes they own.

mod character;
mod theme;

pub use character::*;
pub use theme::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for characters, themes, and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entity ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty entity ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of actor a [`Character`] record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    /// A player character.
    #[default]
    Character,
    Threat,
    Crew,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
        assert_eq!(EntityId::nil(), EntityId::from_uuid(Uuid::nil()));
    }

    #[test]
    fn test_character_kind_serde() {
        let json = serde_json::to_string(&CharacterKind::Threat).unwrap();
        assert_eq!(json, "\"threat\"");
    }
}
