//! # File Manager Service
//!
//! The state and behavior behind a folder/file dashboard, with no rendering
//! of its own.
//!
//! ## Philosophy
//!
//! - **One owner**: All state lives in a [`FileManager`]; nothing else mutates it
//! - **Observers read, never write**: The presentation layer subscribes and
//!   receives a [`DashboardView`] after each change
//! - **Deterministic**: Time comes from a [`Clock`], logs go to a `LogSink`
//! - **Session-scoped**: Everything, thumbnails included, is discarded on logout
//!
//! ## Example
//!
//! ```
//! use services_file_manager::{FileManager, UploadSource};
//! use services_settings::FileManagerSettings;
//! use node_store::RawFile;
//!
//! let mut fm = FileManager::new(FileManagerSettings::default());
//! let docs = fm.create_folder("Docs").unwrap();
//! fm.enter_folder(docs).unwrap();
//! fm.upload(vec![RawFile::new("cat.png", "image/png", vec![0])], UploadSource::Picker).unwrap();
//!
//! let view = fm.view();
//! assert_eq!(view.title, "Folder: Docs");
//! assert!(view.files[0].thumbnail.is_some());
//!
//! fm.jump_to_breadcrumb(-1).unwrap();
//! assert!(fm.current_folder().is_none());
//! ```

pub mod clock;
pub mod manager;
pub mod navigation;
pub mod observer;
pub mod session;
pub mod upload;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::FileManager;
pub use navigation::{NavigationError, NavigationStack, ROOT_BREADCRUMB};
pub use observer::{FileManagerObserver, ObserverId};
pub use session::{CredentialVerifier, DemoCredentials, SessionError, SessionGate};
pub use upload::{RejectedFile, UploadOutcome, UploadSource};
pub use view::{Breadcrumb, DashboardView, FileCard, FolderCard, SidebarSection};
