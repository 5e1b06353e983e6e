//! Game mechanics: theme categories, moves, and essences.

mod essence;

pub use essence::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::entities::EntityId;
use crate::error::RulesError;

/// Category tag a themebook gives its themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThemeType {
    /// The "Self" category; `Self` is reserved in Rust.
    #[serde(rename = "Self")]
    Self_,
    Noise,
    Mythos,
}

impl ThemeType {
    pub const ALL: [ThemeType; 3] = [ThemeType::Self_, ThemeType::Noise, ThemeType::Mythos];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeType::Self_ => "Self",
            ThemeType::Noise => "Noise",
            ThemeType::Mythos => "Mythos",
        }
    }
}

impl FromStr for ThemeType {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RulesError::UnknownThemeType(s.to_string()))
    }
}

impl std::fmt::Display for ThemeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Move categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MoveCategory {
    #[default]
    Core,
    Special,
    /// Stop Holding Back.
    #[serde(rename = "SHB")]
    Shb,
    Custom,
}

impl FromStr for MoveCategory {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Core" => Ok(MoveCategory::Core),
            "Special" => Ok(MoveCategory::Special),
            "SHB" => Ok(MoveCategory::Shb),
            "Custom" => Ok(MoveCategory::Custom),
            other => Err(RulesError::UnknownMoveCategory(other.to_string())),
        }
    }
}

/// A narrative move a player can roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub category: MoveCategory,
}

impl Move {
    pub fn new(name: impl Into<String>, category: MoveCategory) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            category,
        }
    }

    pub fn is_stop_holding_back(&self) -> bool {
        self.category == MoveCategory::Shb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_names() {
        assert_eq!("Self".parse::<ThemeType>().unwrap(), ThemeType::Self_);
        assert_eq!("Mythos".parse::<ThemeType>().unwrap(), ThemeType::Mythos);
        assert!("Logos".parse::<ThemeType>().is_err());
        assert_eq!(serde_json::to_string(&ThemeType::Self_).unwrap(), "\"Self\"");
    }

    #[test]
    fn test_move_category() {
        assert_eq!("SHB".parse::<MoveCategory>().unwrap(), MoveCategory::Shb);
        assert!(Move::new("Stop Holding Back", MoveCategory::Shb).is_stop_holding_back());
        assert!(!Move::new("Face Danger", MoveCategory::Core).is_stop_holding_back());
    }
}
