//! Session gate
//!
//! Decides whether the dashboard is reachable, and owns the file manager
//! while it is. Logging out discards the whole session: store, navigation
//! and every thumbnail handle.
//!
//! ## Non-Goals
//!
//! This is NOT authentication. Checking credentials is delegated to a
//! [`CredentialVerifier`]; a deployment that needs real sign-in plugs in a
//! verifier backed by an identity provider. [`DemoCredentials`] only exists
//! so the dashboard can be exercised end to end.

use crate::clock::{Clock, SystemClock};
use crate::manager::FileManager;
use core_types::SessionId;
use services_logger::{LogEntry, LogSink, TracingLogSink};
use services_settings::persistence::{
    load_overrides_from_path, save_overrides_to_path, PersistenceError, SettingsOverridesData,
};
use services_settings::{FileManagerSettings, SettingsRegistry};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the session gate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The verifier refused the username/password pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Login was attempted while a session is open
    #[error("A session is already active")]
    AlreadyActive,

    /// Logout was attempted without an open session
    #[error("No session is active")]
    NotActive,
}

/// Checks a username/password pair
pub trait CredentialVerifier {
    /// Returns true if the pair may open a session
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Fixed username/password pair for demos
///
/// Compares against two configured strings. It provides no protection and
/// must not guard anything real.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCredentials {
    username: String,
    password: String,
}

impl DemoCredentials {
    /// Creates a verifier accepting exactly this pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for DemoCredentials {
    fn default() -> Self {
        Self::new("admin", "password")
    }
}

impl CredentialVerifier for DemoCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[derive(Debug)]
struct ActiveSession {
    username: String,
    manager: FileManager,
}

/// Route guard between the login screen and the dashboard
pub struct SessionGate<V: CredentialVerifier> {
    verifier: V,
    settings: SettingsRegistry,
    settings_path: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn LogSink>,
    active: Option<ActiveSession>,
}

impl<V: CredentialVerifier> SessionGate<V> {
    /// Creates a gate on the system clock, logging through `tracing`
    pub fn new(verifier: V, settings: SettingsRegistry) -> Self {
        Self::with_parts(
            verifier,
            settings,
            Arc::new(SystemClock),
            Arc::new(TracingLogSink),
        )
    }

    /// Creates a gate from explicit parts
    pub fn with_parts(
        verifier: V,
        settings: SettingsRegistry,
        clock: Arc<dyn Clock>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            verifier,
            settings,
            settings_path: None,
            clock,
            log,
            active: None,
        }
    }

    /// Backs the per-user overrides with a JSON file
    ///
    /// Overrides stored at `path` replace the ones already in the registry.
    /// A missing file leaves the registry as it is. A file that cannot be read
    /// or parsed is logged and ignored.
    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match load_overrides_from_path(&path) {
            Ok(data) => {
                data.apply_to(&mut self.settings);
                self.log.log(
                    LogEntry::info("settings loaded")
                        .with_field("path", path.display())
                        .with_field("users", data.user_overrides.len()),
                );
            }
            Err(PersistenceError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                self.log.log(
                    LogEntry::debug("settings file missing").with_field("path", path.display()),
                );
            }
            Err(err) => {
                self.log.log(
                    LogEntry::warn("settings file ignored")
                        .with_field("path", path.display())
                        .with_field("error", err),
                );
            }
        }
        self.settings_path = Some(path);
        self
    }

    /// File the overrides are saved to, if any
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }

    /// Writes the current overrides to the settings file
    ///
    /// Does nothing when the gate has no settings file.
    pub fn save_settings(&self) -> Result<(), PersistenceError> {
        let Some(path) = &self.settings_path else {
            return Ok(());
        };
        save_overrides_to_path(path, &SettingsOverridesData::from_registry(&self.settings))?;
        self.log
            .log(LogEntry::info("settings saved").with_field("path", path.display()));
        Ok(())
    }

    /// Opens a session and returns its fresh, empty file manager
    ///
    /// The file manager uses the effective settings of `username`.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<&mut FileManager, SessionError> {
        if self.active.is_some() {
            return Err(SessionError::AlreadyActive);
        }
        if !self.verifier.verify(username, password) {
            self.log
                .log(LogEntry::warn("login rejected").with_field("username", username));
            return Err(SessionError::InvalidCredentials);
        }

        let session = SessionId::new();
        let settings = FileManagerSettings::for_user(&self.settings, username);
        let manager = FileManager::with_parts(
            session,
            settings,
            Arc::clone(&self.clock),
            Arc::clone(&self.log),
        );
        self.log.log(
            LogEntry::info("session started")
                .with_source(session)
                .with_field("username", username),
        );

        let active = self.active.insert(ActiveSession {
            username: username.to_string(),
            manager,
        });
        Ok(&mut active.manager)
    }

    /// Ends the active session
    ///
    /// Returns the number of thumbnail handles released.
    pub fn logout(&mut self) -> Result<usize, SessionError> {
        let active = self.active.take().ok_or(SessionError::NotActive)?;
        Ok(active.manager.end_session())
    }

    /// Returns true while a session is active
    pub fn is_authenticated(&self) -> bool {
        self.active.is_some()
    }

    /// Username of the active session
    pub fn username(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.username.as_str())
    }

    /// The active file manager
    pub fn file_manager(&self) -> Option<&FileManager> {
        self.active.as_ref().map(|a| &a.manager)
    }

    /// The active file manager, mutably
    pub fn file_manager_mut(&mut self) -> Option<&mut FileManager> {
        self.active.as_mut().map(|a| &mut a.manager)
    }

    /// The settings registry the gate reads per-user settings from
    pub fn settings_mut(&mut self) -> &mut SettingsRegistry {
        &mut self.settings
    }
}
