//! Settings: the persistence seam and the schema each system contributes.

mod schema;

pub use schema::*;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;

/// Setting keys the systems read and write.
pub mod keys {
    /// Name of the configured active system.
    pub const BASE_SYSTEM: &str = "baseSystem";
    /// Which system's move list is loaded.
    pub const MOVES_INCLUDE: &str = "movesInclude";
    pub const SYSTEM: &str = "system";
    /// Whether characters get a loadout theme slot.
    pub const LOADOUT_THEME: &str = "loadoutTheme";
    /// Recompute essence automatically when themes change.
    pub const AUTO_ESSENCE: &str = "autoEssence";
}

/// Durable key/value persistence.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Resolves once the value is durably stored.
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// In-process settings store.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a TOML document. Nested tables become dotted keys.
    ///
    /// ```toml
    /// baseSystem = "otherscape"
    /// autoEssence = false
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(source)?;
        let mut values = HashMap::new();
        flatten_table("", &table, &mut values)?;
        Ok(Self {
            values: RwLock::new(values),
        })
    }

    pub async fn snapshot(&self) -> HashMap<String, Value> {
        self.values.read().await.clone()
    }
}

fn flatten_table(
    prefix: &str,
    table: &toml::Table,
    out: &mut HashMap<String, Value>,
) -> Result<()> {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(inner) => flatten_table(&full_key, inner, out)?,
            other => {
                out.insert(full_key, serde_json::to_value(other)?);
            }
        }
    }
    Ok(())
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_set_then_get() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get(keys::BASE_SYSTEM).await.unwrap(), None);

        store.set(keys::BASE_SYSTEM, json!("otherscape")).await.unwrap();
        assert_eq!(
            store.get(keys::BASE_SYSTEM).await.unwrap(),
            Some(json!("otherscape"))
        );
    }

    #[tokio::test]
    async fn test_from_toml_flattens_tables() {
        let store = MemorySettingsStore::from_toml_str(
            r#"
            baseSystem = "otherscape"
            autoEssence = false

            [tracker]
            size = 3
            "#,
        )
        .unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.get("baseSystem"), Some(&json!("otherscape")));
        assert_eq!(snapshot.get("autoEssence"), Some(&json!(false)));
        assert_eq!(snapshot.get("tracker.size"), Some(&json!(3)));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(MemorySettingsStore::from_toml_str("baseSystem = ").is_err());
    }
}
