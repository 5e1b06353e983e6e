//! Registry of rule systems, keyed by [`SystemName`].
//!
//! Built mutably at startup (directly or through the registration phase),
//! then frozen behind an `Arc` and shared with every consumer.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::{Result, SystemError};
use crate::host::{Localizer, Notifier};
use crate::system::{CityOfMistSystem, OtherscapeSystem, RuleSystem, SystemName};

/// A startup self-registration handler.
pub type RegistrationHandler = Box<dyn FnOnce(&mut SystemRegistry) -> Result<()> + Send>;

/// Central registry for all rule systems.
pub struct SystemRegistry {
    systems: HashMap<SystemName, Arc<dyn RuleSystem>>,
    /// Served when the configured system is not registered.
    fallback: Arc<dyn RuleSystem>,
    registration_phase_done: bool,
}

impl SystemRegistry {
    /// Creates an empty registry that falls back to classic City of Mist.
    #[must_use]
    pub fn new() -> Self {
        Self::with_default(Arc::new(CityOfMistSystem::new()))
    }

    /// Creates an empty registry with a custom fallback.
    #[must_use]
    pub fn with_default(fallback: Arc<dyn RuleSystem>) -> Self {
        Self {
            systems: HashMap::new(),
            fallback,
            registration_phase_done: false,
        }
    }

    /// Creates a registry holding both shipped systems.
    #[must_use]
    pub fn with_builtin_systems() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CityOfMistSystem::new()));
        registry.register(Arc::new(OtherscapeSystem::new()));
        registry
    }

    /// Registers a system under its name, replacing any previous binding.
    /// Returns the replaced system.
    pub fn register(&mut self, system: Arc<dyn RuleSystem>) -> Option<Arc<dyn RuleSystem>> {
        let name = system.name();
        tracing::info!(system = %name, "rules system registered");
        self.systems.insert(name, system)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn RuleSystem>> {
        self.systems.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.systems.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<SystemName> {
        let mut names: Vec<_> = self.systems.keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn fallback(&self) -> &Arc<dyn RuleSystem> {
        &self.fallback
    }

    /// Name to localized label, for every registered system.
    pub fn list_selectable(&self, i18n: &dyn Localizer) -> BTreeMap<SystemName, String> {
        self.systems
            .iter()
            .map(|(name, system)| (name.clone(), system.label(i18n)))
            .collect()
    }

    /// The system registered as `configured`, or the fallback.
    ///
    /// A miss notifies the user once and never fails.
    pub fn resolve(&self, configured: &str, notifier: &dyn Notifier) -> Arc<dyn RuleSystem> {
        if let Some(system) = self.systems.get(configured) {
            return system.clone();
        }
        tracing::warn!(
            configured,
            fallback = %self.fallback.name(),
            "configured rules system not registered"
        );
        let error = SystemError::UnknownSystem(configured.to_string());
        notifier.error(&format!("{error}, defaulting to {}", self.fallback.name()));
        self.fallback.clone()
    }

    /// Style tags of every registered system.
    pub fn style_tags(&self) -> Vec<String> {
        self.names().iter().map(SystemName::style_tag).collect()
    }

    /// Runs the startup self-registration phase.
    ///
    /// Only the first call has any effect. A failing handler is logged and
    /// skipped; the others still run. Returns how many handlers succeeded.
    pub fn run_registration_phase(&mut self, handlers: Vec<RegistrationHandler>) -> usize {
        if self.registration_phase_done {
            tracing::warn!("registration phase already ran, ignoring");
            return 0;
        }
        self.registration_phase_done = true;

        let mut succeeded = 0;
        for handler in handlers {
            match handler(self) {
                Ok(()) => succeeded += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "rules system registration handler failed");
                }
            }
        }
        succeeded
    }
}

impl Default for SystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}
