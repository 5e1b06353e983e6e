//! Character events and the Essence effect they drive.
//!
//! Theme creation arrives as a typed [`ThemeEvent`] rather than through an
//! ambient subscription. The [`EssenceHandler`] runs the read, classify and
//! maybe-mutate sequence to completion for one event at a time; delivering
//! events for the same character one after another is the caller's job.

use async_trait::async_trait;
use mist_rules::{classify_themes, Character, CharacterKind, EntityId, Essence};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::controller::SystemController;
use crate::error::{Result, SystemError};
use crate::settings::keys;
use crate::system::OTHERSCAPE;

/// Main themes a character needs before a new theme can settle on creation.
pub const NEXUS_THEME_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeAction {
    Created,
}

/// A change to one of a character's themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeEvent {
    pub character_id: EntityId,
    pub theme_id: EntityId,
    pub action: ThemeAction,
}

impl ThemeEvent {
    pub fn created(character_id: EntityId, theme_id: EntityId) -> Self {
        Self {
            character_id,
            theme_id,
            action: ThemeAction::Created,
        }
    }
}

/// Where characters live. Owned by the host.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn character(&self, id: EntityId) -> Result<Option<Character>>;

    async fn set_essence(&self, id: EntityId, essence: Essence) -> Result<()>;

    async fn set_theme_nascent(&self, character: EntityId, theme: EntityId, nascent: bool)
        -> Result<()>;
}

/// In-process character store.
#[derive(Debug, Default)]
pub struct MemoryCharacterStore {
    characters: RwLock<HashMap<EntityId, Character>>,
}

impl MemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, character: Character) -> EntityId {
        let id = character.id;
        self.characters.write().await.insert(id, character);
        id
    }
}

#[async_trait]
impl CharacterStore for MemoryCharacterStore {
    async fn character(&self, id: EntityId) -> Result<Option<Character>> {
        Ok(self.characters.read().await.get(&id).cloned())
    }

    async fn set_essence(&self, id: EntityId, essence: Essence) -> Result<()> {
        let mut characters = self.characters.write().await;
        let character = characters
            .get_mut(&id)
            .ok_or(SystemError::CharacterNotFound(id))?;
        character.essence = Some(essence);
        Ok(())
    }

    async fn set_theme_nascent(
        &self,
        character: EntityId,
        theme: EntityId,
        nascent: bool,
    ) -> Result<()> {
        let mut characters = self.characters.write().await;
        let owner = characters
            .get_mut(&character)
            .ok_or(SystemError::CharacterNotFound(character))?;
        let theme_ref = owner
            .theme_mut(theme)
            .ok_or(SystemError::ThemeNotFound { character, theme })?;
        theme_ref.nascent = nascent;
        Ok(())
    }
}

/// Why an event produced no Essence work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Otherscape is not the active system.
    Inactive,
    /// Threats and crews have no essence.
    NotACharacter,
    AutoEssenceDisabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EssenceOutcome {
    Skipped(SkipReason),
    Recomputed {
        previous: Option<Essence>,
        essence: Essence,
        nascent_cleared: bool,
    },
}

/// Recomputes essence when a theme is created and settles the new theme of
/// a character that stays a Nexus.
pub struct EssenceHandler {
    store: Arc<dyn CharacterStore>,
}

impl EssenceHandler {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    /// Handle one theme event on behalf of `acting_user`.
    ///
    /// The new theme's `nascent` flag is cleared only when the character has
    /// at least four main themes, was a Nexus before, is still a Nexus, and
    /// `acting_user` owns it.
    pub async fn handle(
        &self,
        controller: &SystemController,
        event: &ThemeEvent,
        acting_user: EntityId,
    ) -> Result<EssenceOutcome> {
        match event.action {
            ThemeAction::Created => {}
        }

        if !controller.is_active(OTHERSCAPE).await {
            return Ok(EssenceOutcome::Skipped(SkipReason::Inactive));
        }

        let character = self
            .store
            .character(event.character_id)
            .await?
            .ok_or(SystemError::CharacterNotFound(event.character_id))?;
        if character.kind != CharacterKind::Character {
            return Ok(EssenceOutcome::Skipped(SkipReason::NotACharacter));
        }

        let auto_essence = controller.setting(keys::AUTO_ESSENCE).await?;
        if auto_essence != Some(Value::Bool(true)) {
            return Ok(EssenceOutcome::Skipped(SkipReason::AutoEssenceDisabled));
        }

        let previous = character.essence;
        let main_themes = character.main_themes();
        let essence = classify_themes(main_themes.iter().copied());
        if essence.is_determined() {
            self.store.set_essence(character.id, essence).await?;
        }

        let settled = main_themes.len() >= NEXUS_THEME_THRESHOLD
            && previous == Some(Essence::Nexus)
            && essence == Essence::Nexus
            && character.is_owned_by(acting_user);
        if settled {
            self.store
                .set_theme_nascent(character.id, event.theme_id, false)
                .await?;
        }

        tracing::debug!(
            character = %character.id,
            previous = ?previous,
            essence = %essence,
            nascent_cleared = settled,
            "essence recomputed"
        );
        Ok(EssenceOutcome::Recomputed {
            previous,
            essence,
            nascent_cleared: settled,
        })
    }
}
