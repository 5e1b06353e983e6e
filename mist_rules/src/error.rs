//! Error types for rule data parsing.

use thiserror::Error;

/// Errors raised when turning loose data into rule types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A theme type name that is not one of Self, Noise, or Mythos.
    #[error("unknown theme type: {0}")]
    UnknownThemeType(String),

    /// An essence name that does not match any declared essence.
    #[error("unknown essence: {0}")]
    UnknownEssence(String),

    /// A move category name that is not recognized.
    #[error("unknown move category: {0}")]
    UnknownMoveCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_theme_type() {
        let err = RulesError::UnknownThemeType("Logos".into());
        assert_eq!(err.to_string(), "unknown theme type: Logos");
    }

    #[test]
    fn display_unknown_essence() {
        let err = RulesError::UnknownEssence("Ghost".into());
        assert_eq!(err.to_string(), "unknown essence: Ghost");
    }
}
