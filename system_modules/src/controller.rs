//! Active system resolution and the switch protocol.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::error::{Result, SystemError};
use crate::host::{Host, StyleSurface};
use crate::registry::SystemRegistry;
use crate::settings::keys;
use crate::system::{RuleSystem, SystemName, CITY_OF_MIST};

/// Steps of a system switch, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchStep {
    Persist,
    OnChangeTo,
    Activate,
}

impl std::fmt::Display for SwitchStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let step = match self {
            SwitchStep::Persist => "persist",
            SwitchStep::OnChangeTo => "on_change_to",
            SwitchStep::Activate => "activate",
        };
        f.write_str(step)
    }
}

/// A switch that stopped part way.
#[derive(Debug, Error)]
#[error("switch to {target:?} failed at {step}: {source}")]
pub struct SwitchError {
    pub target: String,
    pub step: SwitchStep,
    #[source]
    pub source: SystemError,
}

fn failed_at(target: &str, step: SwitchStep) -> impl FnOnce(SystemError) -> SwitchError + '_ {
    move |source| SwitchError {
        target: target.to_string(),
        step,
        source,
    }
}

/// Resolves and switches the active rule system.
///
/// The configured name lives in the settings store under `baseSystem` and is
/// resolved against the registry on every access.
pub struct SystemController {
    registry: Arc<SystemRegistry>,
    host: Host,
}

impl SystemController {
    pub fn new(registry: Arc<SystemRegistry>, host: Host) -> Self {
        Self { registry, host }
    }

    pub fn registry(&self) -> &SystemRegistry {
        &self.registry
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The configured system name; `city-of-mist` when nothing is stored.
    /// A stored non-string value is returned in its JSON form, so it never
    /// matches a registered system.
    pub async fn configured_name(&self) -> Result<String> {
        let stored = self.host.settings.get(keys::BASE_SYSTEM).await?;
        Ok(match stored {
            Some(Value::String(name)) => name,
            Some(other) => other.to_string(),
            None => CITY_OF_MIST.to_string(),
        })
    }

    /// The active system. Always yields a system; an unreadable or
    /// unregistered configuration resolves to the registry fallback.
    pub async fn active(&self) -> Arc<dyn RuleSystem> {
        let configured = match self.configured_name().await {
            Ok(name) => name,
            Err(e) => {
                let fallback = self.registry.fallback().clone();
                tracing::warn!(
                    error = %e,
                    fallback = %fallback.name(),
                    "could not read configured rules system"
                );
                self.host.notifier.error(&format!(
                    "Could not read the configured system ({e}), defaulting to {}",
                    fallback.name()
                ));
                return fallback;
            }
        };
        self.registry
            .resolve(&configured, self.host.notifier.as_ref())
    }

    pub async fn is_active(&self, name: &str) -> bool {
        self.active().await.name().as_str() == name
    }

    /// Switch to `name`: persist it, then run the new system's
    /// `on_change_to` and `activate` hooks, in that order.
    ///
    /// Returns `false` if any step fails. Later steps are skipped and
    /// earlier ones are not rolled back.
    pub async fn set_active(&self, name: &str) -> bool {
        match self.switch_to(name).await {
            Ok(()) => {
                tracing::info!(system = name, "rules system activated");
                true
            }
            Err(e) => {
                tracing::error!(
                    system = name,
                    step = %e.step,
                    error = %e.source,
                    "failed to switch rules system"
                );
                false
            }
        }
    }

    async fn switch_to(&self, name: &str) -> std::result::Result<(), SwitchError> {
        self.host
            .settings
            .set(keys::BASE_SYSTEM, Value::from(name))
            .await
            .map_err(failed_at(name, SwitchStep::Persist))?;

        let system = self.registry.resolve(name, self.host.notifier.as_ref());
        system
            .on_change_to(&self.host)
            .await
            .map_err(failed_at(name, SwitchStep::OnChangeTo))?;
        system
            .activate(&self.host)
            .await
            .map_err(failed_at(name, SwitchStep::Activate))?;
        Ok(())
    }

    /// Make `system`'s style tag the only one applied among registered systems.
    pub fn set_active_style(&self, system: &dyn RuleSystem, surface: &dyn StyleSurface) {
        let active = system.name().style_tag();
        let inactive: Vec<String> = self
            .registry
            .style_tags()
            .into_iter()
            .filter(|tag| *tag != active)
            .collect();
        surface.apply_styles(&active, &inactive);
    }

    /// A setting's stored value, or the active system's schema default.
    pub async fn setting(&self, key: &str) -> Result<Option<Value>> {
        if let Some(value) = self.host.settings.get(key).await? {
            return Ok(Some(value));
        }
        let active = self.active().await;
        Ok(active.system_settings().default_for(key).cloned())
    }

    pub fn list_selectable(&self) -> BTreeMap<SystemName, String> {
        self.registry.list_selectable(self.host.localizer.as_ref())
    }
}
