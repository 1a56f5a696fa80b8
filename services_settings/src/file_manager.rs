//! Typed file manager settings
//!
//! The registry stores loosely typed values; this module reads them into a
//! [`FileManagerSettings`] the file manager can use directly. Missing or
//! mistyped values fall back to the built-in defaults.

use crate::{SettingKey, SettingValue, SettingsRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Setting keys used by the file manager
pub mod keys {
    pub const ROOT_LABEL: &str = "file_manager.root_label";
    pub const NAME_DISPLAY_LIMIT: &str = "file_manager.name_display_limit";
    pub const DROP_ZONE_ACCEPT: &str = "file_manager.drop_zone_accept";
    pub const NAVIGATION_POLICY: &str = "file_manager.navigation_policy";
}

const DEFAULT_ROOT_LABEL: &str = "File Manager";
const DEFAULT_NAME_DISPLAY_LIMIT: usize = 15;
const DEFAULT_DROP_ZONE_ACCEPT: [&str; 5] = ["image/*", ".pdf", ".docx", ".txt", ".xlsx"];

/// How navigation requests from the presentation layer are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavigationPolicy {
    /// Trust the caller: any known folder may be entered and breadcrumb
    /// indices past the end are clamped
    #[default]
    Trust,
    /// Reject folders that are not children of the current folder and
    /// breadcrumb indices outside the current path
    Validate,
}

impl FromStr for NavigationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trust" => Ok(NavigationPolicy::Trust),
            "validate" => Ok(NavigationPolicy::Validate),
            other => Err(format!("unknown navigation policy: {}", other)),
        }
    }
}

impl fmt::Display for NavigationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationPolicy::Trust => write!(f, "trust"),
            NavigationPolicy::Validate => write!(f, "validate"),
        }
    }
}

/// One entry of an upload accept list
///
/// Written either as a MIME pattern (`image/*`, `text/plain`) or as a file
/// extension (`.pdf`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptRule {
    /// Any MIME type under the given top-level type
    MimeWildcard(String),
    /// An exact MIME type
    MimeExact(String),
    /// A file name extension, stored lowercase without the dot
    Extension(String),
}

impl AcceptRule {
    /// Parses a single accept entry; blank entries yield `None`
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim().to_ascii_lowercase();
        if entry.is_empty() {
            return None;
        }
        if let Some(ext) = entry.strip_prefix('.') {
            return (!ext.is_empty()).then(|| AcceptRule::Extension(ext.to_string()));
        }
        match entry.split_once('/') {
            Some((top, "*")) => Some(AcceptRule::MimeWildcard(top.to_string())),
            Some(_) => Some(AcceptRule::MimeExact(entry)),
            None => None,
        }
    }

    /// Parses a comma-separated accept list such as `"image/*, .pdf"`
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',').filter_map(Self::parse).collect()
    }

    /// Returns true if a file with this name and MIME type satisfies the rule
    pub fn matches(&self, file_name: &str, mime_type: &str) -> bool {
        let mime_type = mime_type.to_ascii_lowercase();
        match self {
            AcceptRule::MimeWildcard(top) => mime_type
                .split_once('/')
                .map(|(t, _)| t == top)
                .unwrap_or(false),
            AcceptRule::MimeExact(exact) => mime_type == *exact,
            AcceptRule::Extension(ext) => file_name
                .rsplit_once('.')
                .map(|(_, e)| e.eq_ignore_ascii_case(ext))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for AcceptRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptRule::MimeWildcard(top) => write!(f, "{}/*", top),
            AcceptRule::MimeExact(exact) => write!(f, "{}", exact),
            AcceptRule::Extension(ext) => write!(f, ".{}", ext),
        }
    }
}

/// Effective settings for one file manager instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileManagerSettings {
    /// Label of the root breadcrumb and the title shown at root
    pub root_label: String,
    /// Number of characters of a file name shown on its card
    pub name_display_limit: usize,
    /// Accept list applied to drop-zone uploads
    pub drop_zone_accept: Vec<AcceptRule>,
    /// Navigation checking policy
    pub navigation_policy: NavigationPolicy,
}

impl FileManagerSettings {
    /// Reads the effective settings for a user
    pub fn for_user(registry: &SettingsRegistry, user_id: &str) -> Self {
        let defaults = Self::default();
        let get = |key: &str| registry.get(user_id, &SettingKey::new(key));

        let root_label = get(keys::ROOT_LABEL)
            .and_then(SettingValue::as_string)
            .map(str::to_string)
            .unwrap_or(defaults.root_label);

        let name_display_limit = get(keys::NAME_DISPLAY_LIMIT)
            .and_then(SettingValue::as_integer)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.name_display_limit);

        let drop_zone_accept = get(keys::DROP_ZONE_ACCEPT)
            .and_then(SettingValue::as_string_list)
            .map(|entries| entries.iter().filter_map(|e| AcceptRule::parse(e)).collect())
            .unwrap_or(defaults.drop_zone_accept);

        let navigation_policy = get(keys::NAVIGATION_POLICY)
            .and_then(SettingValue::as_string)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.navigation_policy);

        Self {
            root_label,
            name_display_limit,
            drop_zone_accept,
            navigation_policy,
        }
    }

    /// Returns true if a drop-zone upload with this name and MIME type is accepted
    ///
    /// An empty accept list accepts everything.
    pub fn drop_zone_accepts(&self, file_name: &str, mime_type: &str) -> bool {
        self.drop_zone_accept.is_empty()
            || self
                .drop_zone_accept
                .iter()
                .any(|rule| rule.matches(file_name, mime_type))
    }
}

impl Default for FileManagerSettings {
    fn default() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            name_display_limit: DEFAULT_NAME_DISPLAY_LIMIT,
            drop_zone_accept: DEFAULT_DROP_ZONE_ACCEPT
                .iter()
                .filter_map(|e| AcceptRule::parse(e))
                .collect(),
            navigation_policy: NavigationPolicy::default(),
        }
    }
}

/// Registers the file manager defaults in a registry
pub(crate) fn register_defaults(registry: &mut SettingsRegistry) {
    registry.register_default(
        keys::ROOT_LABEL,
        SettingValue::String(DEFAULT_ROOT_LABEL.to_string()),
    );
    registry.register_default(
        keys::NAME_DISPLAY_LIMIT,
        SettingValue::Integer(DEFAULT_NAME_DISPLAY_LIMIT as i64),
    );
    registry.register_default(
        keys::DROP_ZONE_ACCEPT,
        SettingValue::StringList(
            DEFAULT_DROP_ZONE_ACCEPT
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
    );
    registry.register_default(
        keys::NAVIGATION_POLICY,
        SettingValue::String(NavigationPolicy::default().to_string()),
    );
}
