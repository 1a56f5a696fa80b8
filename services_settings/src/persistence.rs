//! Settings persistence layer
//!
//! This module handles loading and saving settings overrides as versioned
//! JSON, either as bytes or as a file on disk.

use crate::{SettingKey, SettingValue, SettingsRegistry, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Serializable container for settings overrides
/// Uses BTreeMap for stable ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverridesData {
    /// Version of the settings format
    pub version: u32,
    /// User-specific overrides (stable ordering via BTreeMap)
    pub user_overrides: BTreeMap<UserId, BTreeMap<String, SettingValue>>,
}

impl SettingsOverridesData {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    /// Creates a new empty settings data
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            user_overrides: BTreeMap::new(),
        }
    }

    /// Captures the overrides currently held by a registry
    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        let mut data = Self::new();
        for (user_id, settings) in registry.export_overrides() {
            let user_settings = settings
                .into_iter()
                .map(|(key, value)| (key.as_str().to_string(), value))
                .collect();
            data.user_overrides.insert(user_id, user_settings);
        }
        data
    }

    /// Replaces the overrides of a registry with this data
    pub fn apply_to(&self, registry: &mut SettingsRegistry) {
        let overrides = self
            .user_overrides
            .iter()
            .map(|(user_id, settings)| {
                let settings = settings
                    .iter()
                    .map(|(key, value)| (SettingKey::new(key.as_str()), value.clone()))
                    .collect();
                (user_id.clone(), settings)
            })
            .collect();
        registry.import_overrides(overrides);
    }
}

impl Default for SettingsOverridesData {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to serialize settings
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    /// Failed to deserialize settings
    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    /// Unsupported settings version
    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    /// Reading or writing the settings file failed
    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes settings overrides to JSON bytes
pub fn serialize_overrides(data: &SettingsOverridesData) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(data)
        .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Deserializes settings overrides from JSON bytes
pub fn deserialize_overrides(bytes: &[u8]) -> PersistenceResult<SettingsOverridesData> {
    let data: SettingsOverridesData = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    if data.version != SettingsOverridesData::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Loads settings overrides from a JSON file
pub fn load_overrides_from_path(
    path: impl AsRef<Path>,
) -> PersistenceResult<SettingsOverridesData> {
    let bytes = std::fs::read(path)?;
    deserialize_overrides(&bytes)
}

/// Writes settings overrides to a JSON file, replacing any previous content
pub fn save_overrides_to_path(
    path: impl AsRef<Path>,
    data: &SettingsOverridesData,
) -> PersistenceResult<()> {
    let bytes = serialize_overrides(data)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_default_registry, keys, FileManagerSettings, NavigationPolicy};

    fn sample_data() -> SettingsOverridesData {
        let mut data = SettingsOverridesData::new();
        let mut admin = BTreeMap::new();
        admin.insert(
            keys::NAVIGATION_POLICY.to_string(),
            SettingValue::String("validate".to_string()),
        );
        data.user_overrides.insert("admin".to_string(), admin);
        data
    }

    #[test]
    fn test_settings_data_creation() {
        let data = SettingsOverridesData::new();
        assert_eq!(data.version, SettingsOverridesData::CURRENT_VERSION);
        assert!(data.user_overrides.is_empty());
    }

    #[test]
    fn test_registry_capture_and_apply() {
        let mut registry = create_default_registry();
        registry.set_user_override("admin", keys::NAME_DISPLAY_LIMIT, SettingValue::Integer(8));

        let data = SettingsOverridesData::from_registry(&registry);
        let mut fresh = create_default_registry();
        data.apply_to(&mut fresh);

        assert_eq!(FileManagerSettings::for_user(&fresh, "admin").name_display_limit, 8);
    }

    #[test]
    fn test_serialize_deserialize() {
        let data = sample_data();
        let bytes = serialize_overrides(&data).unwrap();
        assert_eq!(deserialize_overrides(&bytes).unwrap(), data);
    }

    #[test]
    fn test_deserialize_invalid_json() {
        let result = deserialize_overrides(b"{ invalid json }");
        assert!(matches!(result, Err(PersistenceError::DeserializationFailed(_))));
    }

    #[test]
    fn test_deserialize_unsupported_version() {
        let json = r#"{ "version": 999, "user_overrides": {} }"#;
        let result = deserialize_overrides(json.as_bytes());
        assert!(matches!(result, Err(PersistenceError::UnsupportedVersion(999))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        save_overrides_to_path(&path, &sample_data()).unwrap();
        let loaded = load_overrides_from_path(&path).unwrap();

        let mut registry = create_default_registry();
        loaded.apply_to(&mut registry);
        assert_eq!(
            FileManagerSettings::for_user(&registry, "admin").navigation_policy,
            NavigationPolicy::Validate
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_overrides_from_path(dir.path().join("absent.json"));
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }

    #[test]
    fn test_stable_key_ordering_in_json() {
        let mut data = SettingsOverridesData::new();
        let mut settings = BTreeMap::new();
        settings.insert("z_key".to_string(), SettingValue::Integer(1));
        settings.insert("a_key".to_string(), SettingValue::Integer(2));
        data.user_overrides.insert("user1".to_string(), settings);

        let bytes = serialize_overrides(&data).unwrap();
        let json_str = std::str::from_utf8(&bytes).unwrap();
        assert!(json_str.find("a_key").unwrap() < json_str.find("z_key").unwrap());
    }
}
