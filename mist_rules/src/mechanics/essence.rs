//! Essence: a character classification derived from its theme categories.
//!
//! Only the *set* of distinct categories matters. Repeats and ordering are
//! ignored, and themes without a category do not contribute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use super::ThemeType;
use crate::entities::Theme;
use crate::error::RulesError;

/// Essence outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Essence {
    /// All Noise.
    Singularity,
    /// All Mythos of different types. Never produced by [`classify`].
    Conduit,
    /// All Mythos of the same type. Never produced by [`classify`].
    Avatar,
    /// Self + Noise.
    Cyborg,
    /// All three categories.
    Nexus,
    /// All Self.
    Real,
    /// Mythos + Noise.
    Transhuman,
    /// Self + Mythos.
    Spiritualist,
    /// No essence can be derived.
    #[default]
    Undetermined,
}

/// Outcome of [`classify`].
pub type EssenceResult = Essence;

impl Essence {
    pub fn system_name(&self) -> &'static str {
        match self {
            Essence::Singularity => "Singularity",
            Essence::Conduit => "Conduit",
            Essence::Avatar => "Avatar",
            Essence::Cyborg => "Cyborg",
            Essence::Nexus => "Nexus",
            Essence::Real => "Real",
            Essence::Transhuman => "Transhuman",
            Essence::Spiritualist => "Spiritualist",
            Essence::Undetermined => "Undetermined",
        }
    }

    pub fn is_determined(&self) -> bool {
        *self != Essence::Undetermined
    }
}

impl FromStr for Essence {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [Essence; 9] = [
            Essence::Singularity,
            Essence::Conduit,
            Essence::Avatar,
            Essence::Cyborg,
            Essence::Nexus,
            Essence::Real,
            Essence::Transhuman,
            Essence::Spiritualist,
            Essence::Undetermined,
        ];
        ALL.into_iter()
            .find(|e| e.system_name() == s)
            .ok_or_else(|| RulesError::UnknownEssence(s.to_string()))
    }
}

impl std::fmt::Display for Essence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.system_name())
    }
}

/// Classify a multiset of theme categories.
///
/// - no category: `Undetermined`
/// - one category: Noise is `Singularity`, Self is `Real`, Mythos alone is `Undetermined`
/// - two categories: decided by the one that is missing (no Mythos is
///   `Cyborg`, no Noise is `Spiritualist`, no Self is `Transhuman`)
/// - all three: `Nexus`
pub fn classify<I>(tags: I) -> EssenceResult
where
    I: IntoIterator<Item = ThemeType>,
{
    let distinct: BTreeSet<ThemeType> = tags.into_iter().collect();

    match distinct.len() {
        0 => Essence::Undetermined,
        1 => match distinct.first() {
            Some(ThemeType::Noise) => Essence::Singularity,
            Some(ThemeType::Self_) => Essence::Real,
            Some(ThemeType::Mythos) | None => Essence::Undetermined,
        },
        2 => {
            if !distinct.contains(&ThemeType::Mythos) {
                Essence::Cyborg
            } else if !distinct.contains(&ThemeType::Noise) {
                Essence::Spiritualist
            } else {
                Essence::Transhuman
            }
        }
        3 => Essence::Nexus,
        _ => Essence::Undetermined,
    }
}

/// Classify themes by their resolvable categories.
pub fn classify_themes<'a, I>(themes: I) -> EssenceResult
where
    I: IntoIterator<Item = &'a Theme>,
{
    classify(themes.into_iter().filter_map(Theme::theme_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ThemeType::{Mythos, Noise, Self_};

    #[test]
    fn test_empty_is_undetermined() {
        assert_eq!(classify(Vec::new()), Essence::Undetermined);
    }

    #[test]
    fn test_single_category() {
        assert_eq!(classify([Self_]), Essence::Real);
        assert_eq!(classify([Noise]), Essence::Singularity);
        assert_eq!(classify([Mythos]), Essence::Undetermined);
    }

    #[test]
    fn test_pairs_use_missing_category() {
        assert_eq!(classify([Self_, Noise]), Essence::Cyborg);
        assert_eq!(classify([Self_, Mythos]), Essence::Spiritualist);
        assert_eq!(classify([Noise, Mythos]), Essence::Transhuman);
    }

    #[test]
    fn test_all_three_is_nexus() {
        assert_eq!(classify([Self_, Noise, Mythos]), Essence::Nexus);
    }

    #[test]
    fn test_duplicates_and_order_ignored() {
        assert_eq!(classify([Noise, Noise, Noise]), Essence::Singularity);
        assert_eq!(classify([Mythos, Self_, Self_, Mythos]), Essence::Spiritualist);
        assert_eq!(
            classify([Mythos, Noise, Self_, Noise]),
            classify([Self_, Noise, Mythos])
        );
    }

    #[test]
    fn test_repeat_calls_agree() {
        let tags = vec![Noise, Self_];
        assert_eq!(classify(tags.clone()), classify(tags));
    }

    #[test]
    fn test_untagged_themes_ignored() {
        let themes = vec![
            Theme::of_type("Hacker", Noise),
            Theme::new("Blank", None),
            Theme::of_type("Drone Pilot", Noise),
        ];
        assert_eq!(classify_themes(&themes), Essence::Singularity);
    }

    #[test]
    fn test_dead_members_never_produced() {
        let sets: Vec<Vec<ThemeType>> = vec![
            vec![],
            vec![Self_],
            vec![Noise],
            vec![Mythos],
            vec![Self_, Noise],
            vec![Self_, Mythos],
            vec![Noise, Mythos],
            vec![Self_, Noise, Mythos],
        ];
        for set in sets {
            let essence = classify(set);
            assert_ne!(essence, Essence::Conduit);
            assert_ne!(essence, Essence::Avatar);
        }
    }

    #[test]
    fn test_essence_names_round_trip() {
        assert_eq!("Nexus".parse::<Essence>().unwrap(), Essence::Nexus);
        assert!("Ghost".parse::<Essence>().is_err());
        assert!(!Essence::Undetermined.is_determined());
    }
}
