//! Theme and themebook definitions.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::mechanics::ThemeType;

/// The rulebook entry a theme was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Themebook {
    pub name: String,
    /// Category tag carried by every theme built from this book.
    pub subtype: Option<ThemeType>,
    /// Custom wording for the decrease mechanic, e.g. "Decay".
    #[serde(default)]
    pub fade_type: Option<String>,
}

impl Themebook {
    /// Create a themebook with the given category.
    pub fn new(name: impl Into<String>, subtype: Option<ThemeType>) -> Self {
        Self {
            name: name.into(),
            subtype,
            fade_type: None,
        }
    }

    /// Set a custom fade wording.
    pub fn with_fade_type(mut self, fade_type: impl Into<String>) -> Self {
        self.fade_type = Some(fade_type.into());
        self
    }
}

/// Where on the sheet a theme sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSlot {
    #[default]
    Main,
    Loadout,
    Crew,
}

/// Default wording family for the decrease mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeType {
    Fade,
    Crack,
    /// Crew themes use both words.
    Crew,
}

impl FadeType {
    /// Localization key for this fade type. `Crew` has no single key.
    pub fn localization_key(&self) -> Option<&'static str> {
        match self {
            FadeType::Fade => Some("CityOfMist.terms.fade"),
            FadeType::Crack => Some("CityOfMist.terms.crack"),
            FadeType::Crew => None,
        }
    }
}

/// A narrative component owned by a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: EntityId,
    pub name: String,
    pub themebook: Option<Themebook>,
    #[serde(default)]
    pub slot: ThemeSlot,
    /// Freshly gained theme that has not settled yet.
    #[serde(default)]
    pub nascent: bool,
}

impl Theme {
    /// Create a main theme from a themebook.
    pub fn new(name: impl Into<String>, themebook: Option<Themebook>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            themebook,
            slot: ThemeSlot::Main,
            nascent: false,
        }
    }

    /// Shorthand for a main theme whose themebook carries `theme_type`.
    pub fn of_type(name: impl Into<String>, theme_type: ThemeType) -> Self {
        let name = name.into();
        let book = Themebook::new(format!("{name} book"), Some(theme_type));
        Self::new(name, Some(book))
    }

    pub fn with_slot(mut self, slot: ThemeSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn with_nascent(mut self, nascent: bool) -> Self {
        self.nascent = nascent;
        self
    }

    /// The category tag, resolved through the themebook.
    pub fn theme_type(&self) -> Option<ThemeType> {
        self.themebook.as_ref().and_then(|book| book.subtype)
    }

    /// Fade wording used when the themebook does not name one.
    pub fn default_fade(&self) -> FadeType {
        if self.slot == ThemeSlot::Crew {
            return FadeType::Crew;
        }
        match self.theme_type() {
            Some(ThemeType::Mythos) => FadeType::Fade,
            _ => FadeType::Crack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_comes_from_themebook() {
        let theme = Theme::of_type("Hacker", ThemeType::Noise);
        assert_eq!(theme.theme_type(), Some(ThemeType::Noise));

        let loose = Theme::new("Unbound", None);
        assert_eq!(loose.theme_type(), None);

        let untyped = Theme::new("Odd", Some(Themebook::new("Odd", None)));
        assert_eq!(untyped.theme_type(), None);
    }

    #[test]
    fn test_default_fade() {
        assert_eq!(Theme::of_type("Oracle", ThemeType::Mythos).default_fade(), FadeType::Fade);
        assert_eq!(Theme::of_type("Cop", ThemeType::Self_).default_fade(), FadeType::Crack);
        let crew = Theme::of_type("Gang", ThemeType::Self_).with_slot(ThemeSlot::Crew);
        assert_eq!(crew.default_fade(), FadeType::Crew);
        assert!(FadeType::Crew.localization_key().is_none());
    }
}
