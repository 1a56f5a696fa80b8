//! # Settings Registry Service
//!
//! A typed settings system for the file manager.
//!
//! ## Philosophy
//!
//! - **Typed settings**: All settings have explicit types, not stringly-typed
//! - **Layered**: Read-only defaults + per-user overrides
//! - **Deterministic**: Settings are serializable and reproducible
//! - **Testable**: All settings logic can be tested independently
//!
//! ## Example
//!
//! ```
//! use services_settings::{create_default_registry, keys, FileManagerSettings, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_user_override("admin", keys::NAME_DISPLAY_LIMIT, SettingValue::Integer(20));
//!
//! let settings = FileManagerSettings::for_user(&registry, "admin");
//! assert_eq!(settings.name_display_limit, 20);
//! ```

pub mod file_manager;
pub mod persistence;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use file_manager::{keys, AcceptRule, FileManagerSettings, NavigationPolicy};

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if this key starts with the given prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// String value
    String(String),
    /// List of strings
    StringList(Vec<String>),
}

impl SettingValue {
    /// Tries to get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Tries to get as string list
    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            SettingValue::StringList(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
            SettingValue::StringList(v) => write!(f, "{:?}", v),
        }
    }
}

/// User ID type
pub type UserId = String;

/// Settings registry
#[derive(Debug, Clone)]
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    /// User-specific overrides
    user_overrides: BTreeMap<UserId, BTreeMap<SettingKey, SettingValue>>,
}

impl SettingsRegistry {
    /// Creates a new, empty settings registry
    pub fn new() -> Self {
        Self {
            defaults: BTreeMap::new(),
            user_overrides: BTreeMap::new(),
        }
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets a user-specific override
    pub fn set_user_override(
        &mut self,
        user_id: impl Into<UserId>,
        key: impl Into<SettingKey>,
        value: SettingValue,
    ) {
        self.user_overrides
            .entry(user_id.into())
            .or_default()
            .insert(key.into(), value);
    }

    /// Removes a user-specific override
    pub fn remove_user_override(&mut self, user_id: &str, key: &SettingKey) -> bool {
        self.user_overrides
            .get_mut(user_id)
            .map(|settings| settings.remove(key).is_some())
            .unwrap_or(false)
    }

    /// Gets the effective setting value for a user (override or default)
    pub fn get(&self, user_id: &str, key: &SettingKey) -> Option<&SettingValue> {
        self.get_user_override(user_id, key)
            .or_else(|| self.defaults.get(key))
    }

    /// Gets the default value for a setting
    pub fn get_default(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    /// Gets the user override (if any) for a setting
    pub fn get_user_override(&self, user_id: &str, key: &SettingKey) -> Option<&SettingValue> {
        self.user_overrides
            .get(user_id)
            .and_then(|settings| settings.get(key))
    }

    /// Returns all default setting keys
    pub fn list_defaults(&self) -> Vec<SettingKey> {
        self.defaults.keys().cloned().collect()
    }

    /// Returns all user overrides for a specific user
    pub fn list_user_overrides(&self, user_id: &str) -> Vec<SettingKey> {
        self.user_overrides
            .get(user_id)
            .map(|settings| settings.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Exports all user overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<UserId, BTreeMap<SettingKey, SettingValue>> {
        self.user_overrides.clone()
    }

    /// Imports user overrides (replaces existing overrides)
    pub fn import_overrides(
        &mut self,
        overrides: BTreeMap<UserId, BTreeMap<SettingKey, SettingValue>>,
    ) {
        self.user_overrides = overrides;
    }
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a settings registry with the file manager defaults registered
pub fn create_default_registry() -> SettingsRegistry {
    let mut registry = SettingsRegistry::new();
    file_manager::register_defaults(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_key_starts_with() {
        let key = SettingKey::new("file_manager.root_label");
        assert!(key.starts_with("file_manager"));
        assert!(!key.starts_with("editor"));
        assert_eq!(key.as_str(), "file_manager.root_label");
    }

    #[test]
    fn test_setting_value_accessors() {
        assert_eq!(SettingValue::Boolean(true).as_boolean(), Some(true));
        assert_eq!(SettingValue::Integer(42).as_integer(), Some(42));
        assert_eq!(SettingValue::Integer(42).as_boolean(), None);
        assert_eq!(SettingValue::String("x".to_string()).as_string(), Some("x"));

        let list = SettingValue::StringList(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            list.as_string_list(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_registry_set_user_override() {
        let mut registry = SettingsRegistry::new();

        registry.register_default("test.key", SettingValue::Integer(42));
        registry.set_user_override("user1", "test.key", SettingValue::Integer(100));

        let value = registry.get("user1", &SettingKey::new("test.key"));
        assert_eq!(value, Some(&SettingValue::Integer(100)));

        let value = registry.get("user2", &SettingKey::new("test.key"));
        assert_eq!(value, Some(&SettingValue::Integer(42)));
    }

    #[test]
    fn test_registry_remove_user_override() {
        let mut registry = SettingsRegistry::new();

        registry.register_default("test.key", SettingValue::Integer(42));
        registry.set_user_override("user1", "test.key", SettingValue::Integer(100));

        assert!(registry.remove_user_override("user1", &SettingKey::new("test.key")));
        assert_eq!(
            registry.get("user1", &SettingKey::new("test.key")),
            Some(&SettingValue::Integer(42))
        );
        assert!(!registry.remove_user_override("user1", &SettingKey::new("test.key")));
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = SettingsRegistry::new();
        assert_eq!(registry.get("user1", &SettingKey::new("nonexistent")), None);
    }

    #[test]
    fn test_registry_list_user_overrides() {
        let mut registry = SettingsRegistry::new();

        registry.set_user_override("user1", "test.key1", SettingValue::Integer(1));
        registry.set_user_override("user1", "test.key2", SettingValue::Integer(2));
        registry.set_user_override("user2", "test.key3", SettingValue::Integer(3));

        assert_eq!(registry.list_user_overrides("user1").len(), 2);
        assert_eq!(registry.list_user_overrides("user2").len(), 1);
        assert_eq!(registry.list_user_overrides("user3").len(), 0);
    }

    #[test]
    fn test_export_import_overrides() {
        let mut registry = SettingsRegistry::new();
        registry.set_user_override("user1", "test.key", SettingValue::Boolean(false));

        let exported = registry.export_overrides();
        let mut other = SettingsRegistry::new();
        other.import_overrides(exported);

        assert_eq!(
            other.get("user1", &SettingKey::new("test.key")),
            Some(&SettingValue::Boolean(false))
        );
    }

    #[test]
    fn test_create_default_registry() {
        let registry = create_default_registry();

        let label = registry.get("anyone", &SettingKey::new(keys::ROOT_LABEL));
        assert_eq!(label, Some(&SettingValue::String("File Manager".to_string())));
        assert_eq!(registry.list_defaults().len(), 4);
    }
}
