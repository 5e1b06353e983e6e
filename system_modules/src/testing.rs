//! Recording test doubles for host collaborators and rule systems.
//!
//! Every double can share a [`CallLog`], so a test can assert the order in
//! which settings writes and lifecycle hooks happened.
//!
//! ```
//! use system_modules::testing::{CallLog, TestHost};
//!
//! let log = CallLog::new();
//! let host = TestHost::new(log.clone());
//! assert!(log.entries().is_empty());
//! assert_eq!(host.notifier.messages().len(), 0);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, SystemError};
use crate::host::{Host, KeyLocalizer, Notifier, SettingsRegistrar, StyleSurface, TemplateRenderer};
use crate::settings::{MemorySettingsStore, SettingDescriptor, SettingsStore};
use crate::system::{HeaderTable, RuleSystem, SystemFamily, SystemName};
use mist_rules::Theme;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Ordered record of calls across doubles.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        lock(&self.0).push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        lock(&self.0).clone()
    }

    /// Position of the first entry equal to `entry`.
    pub fn position(&self, entry: &str) -> Option<usize> {
        lock(&self.0).iter().position(|e| e == entry)
    }

    pub fn count(&self, entry: &str) -> usize {
        lock(&self.0).iter().filter(|e| *e == entry).count()
    }
}

/// Settings store that logs `set:<key>` and can be told to fail reads or writes.
#[derive(Debug, Default)]
pub struct RecordingSettingsStore {
    inner: MemorySettingsStore,
    log: CallLog,
    fail_on_set: Mutex<Option<String>>,
    fail_on_get: Mutex<Option<String>>,
}

impl RecordingSettingsStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: MemorySettingsStore::new(),
            log,
            fail_on_set: Mutex::new(None),
            fail_on_get: Mutex::new(None),
        }
    }

    /// Reject every later write to `key`.
    pub fn fail_on_set(&self, key: &str) {
        *lock(&self.fail_on_set) = Some(key.to_string());
    }

    /// Fail every later read of `key`.
    pub fn fail_on_get(&self, key: &str) {
        *lock(&self.fail_on_get) = Some(key.to_string());
    }

    /// Read a value without going through the async trait.
    pub async fn value(&self, key: &str) -> Option<Value> {
        self.inner.snapshot().await.get(key).cloned()
    }
}

#[async_trait]
impl SettingsStore for RecordingSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let unreadable = lock(&self.fail_on_get).as_deref() == Some(key);
        if unreadable {
            return Err(SystemError::settings(key, "store unreadable"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let rejected = lock(&self.fail_on_set).as_deref() == Some(key);
        if rejected {
            self.log.push(format!("set-rejected:{key}"));
            return Err(SystemError::settings(key, "store rejected write"));
        }
        self.log.push(format!("set:{key}"));
        self.inner.set(key, value).await
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }
}

/// Registrar that logs `register:<key>`.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    log: CallLog,
    registered: Mutex<Vec<(String, SettingDescriptor)>>,
}

impl RecordingRegistrar {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            registered: Mutex::new(Vec::new()),
        }
    }

    pub fn registered(&self) -> Vec<(String, SettingDescriptor)> {
        lock(&self.registered).clone()
    }
}

impl SettingsRegistrar for RecordingRegistrar {
    fn register_setting(&self, key: &str, descriptor: &SettingDescriptor) -> Result<()> {
        self.log.push(format!("register:{key}"));
        lock(&self.registered).push((key.to_string(), descriptor.clone()));
        Ok(())
    }
}

/// Renders `<template>|<compact json>`.
#[derive(Debug, Default)]
pub struct EchoRenderer;

#[async_trait]
impl TemplateRenderer for EchoRenderer {
    async fn render(&self, template: &str, data: Value) -> Result<String> {
        Ok(format!("{template}|{data}"))
    }
}

#[derive(Debug, Default)]
pub struct RecordingStyles {
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingStyles {
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        lock(&self.calls).clone()
    }
}

impl StyleSurface for RecordingStyles {
    fn apply_styles(&self, add: &str, remove: &[String]) {
        lock(&self.calls).push((add.to_string(), remove.to_vec()));
    }
}

/// A [`Host`] assembled from recording doubles, with typed handles kept.
pub struct TestHost {
    pub settings: Arc<RecordingSettingsStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub registrar: Arc<RecordingRegistrar>,
    pub log: CallLog,
}

impl TestHost {
    pub fn new(log: CallLog) -> Self {
        Self {
            settings: Arc::new(RecordingSettingsStore::new(log.clone())),
            notifier: Arc::new(RecordingNotifier::default()),
            registrar: Arc::new(RecordingRegistrar::new(log.clone())),
            log,
        }
    }

    pub fn host(&self) -> Host {
        Host {
            settings: self.settings.clone(),
            notifier: self.notifier.clone(),
            localizer: Arc::new(KeyLocalizer),
            registrar: self.registrar.clone(),
            renderer: Arc::new(EchoRenderer),
        }
    }
}

const FAKE_HEADERS: HeaderTable = HeaderTable {
    character: "fake/character.hbs",
    threat: "fake/threat.hbs",
    crew: "fake/crew.hbs",
};

/// Which lifecycle hook a [`FakeSystem`] should fail in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    OnChangeTo,
    Activate,
}

/// Rule system with a fixed label that logs `<name>:on_change_to` and
/// `<name>:activate`.
pub struct FakeSystem {
    name: SystemName,
    label: &'static str,
    log: CallLog,
    fail_at: Option<FailAt>,
}

impl FakeSystem {
    pub fn new(name: &str, label: &'static str, log: CallLog) -> Result<Self> {
        Ok(Self {
            name: SystemName::new(name)?,
            label,
            log,
            fail_at: None,
        })
    }

    pub fn failing(mut self, at: FailAt) -> Self {
        self.fail_at = Some(at);
        self
    }

    fn hook(&self, hook: &'static str, fails: bool) -> Result<()> {
        self.log.push(format!("{}:{hook}", self.name));
        if fails {
            return Err(SystemError::Hook {
                system: self.name.clone(),
                hook,
                message: "fake failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RuleSystem for FakeSystem {
    fn name(&self) -> SystemName {
        self.name.clone()
    }

    fn label_key(&self) -> &'static str {
        self.label
    }

    fn starter_name(&self) -> &'static str {
        "Fake"
    }

    fn family(&self) -> SystemFamily {
        SystemFamily::CityOfMist
    }

    fn theme_increase_name(&self, _theme: &Theme, _i18n: &dyn crate::host::Localizer) -> String {
        "grow".into()
    }

    fn theme_decrease_name(&self, _theme: &Theme, _i18n: &dyn crate::host::Localizer) -> String {
        "shrink".into()
    }

    fn downtime_template(&self) -> &'static str {
        "fake/downtime.hbs"
    }

    fn header_table(&self) -> &HeaderTable {
        &FAKE_HEADERS
    }

    async fn on_change_to(&self, host: &Host) -> Result<()> {
        self.family().on_change_to(host).await?;
        self.hook("on_change_to", self.fail_at == Some(FailAt::OnChangeTo))
    }

    async fn activate(&self, _host: &Host) -> Result<()> {
        self.hook("activate", self.fail_at == Some(FailAt::Activate))
    }
}
