//! The file manager controller
//!
//! [`FileManager`] is the single owner of a session's state: the node store,
//! the navigation stack and the dashboard's transient UI flags. Every
//! mutation goes through one of its methods, which logs the action, bumps
//! the revision and notifies observers.

use crate::clock::{Clock, SystemClock};
use crate::navigation::{NavigationError, NavigationStack};
use crate::observer::{FileManagerObserver, ObserverId, ObserverRegistry};
use crate::upload::{screen_uploads, UploadOutcome, UploadSource};
use crate::view::{self, DashboardView, SidebarSection};
use core_types::{NodeId, SessionId};
use node_store::{Folder, NodeStore, RawFile, StoreError, VisibleContents};
use services_logger::{LogEntry, LogSink, TracingLogSink};
use services_settings::FileManagerSettings;
use std::fmt;
use std::sync::Arc;

/// Dashboard state for one session
pub struct FileManager {
    session: SessionId,
    store: NodeStore,
    navigation: NavigationStack,
    menu_open: bool,
    dialog_open: bool,
    folder_name_draft: String,
    sidebar: SidebarSection,
    revision: u64,
    settings: FileManagerSettings,
    clock: Arc<dyn Clock>,
    log: Arc<dyn LogSink>,
    observers: ObserverRegistry,
}

impl FileManager {
    /// Creates a file manager on the system clock, logging through `tracing`
    pub fn new(settings: FileManagerSettings) -> Self {
        Self::with_parts(
            SessionId::new(),
            settings,
            Arc::new(SystemClock),
            Arc::new(TracingLogSink),
        )
    }

    /// Creates a file manager from explicit parts
    pub fn with_parts(
        session: SessionId,
        settings: FileManagerSettings,
        clock: Arc<dyn Clock>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            session,
            store: NodeStore::new(),
            navigation: NavigationStack::new(),
            menu_open: false,
            dialog_open: false,
            folder_name_draft: String::new(),
            sidebar: SidebarSection::default(),
            revision: 0,
            settings,
            clock,
            log,
            observers: ObserverRegistry::default(),
        }
    }

    // ---- folders ----

    /// Creates a folder named `name` inside the open folder
    ///
    /// A blank name creates nothing and returns
    /// [`StoreError::BlankFolderName`]. Either way the create dialog and the
    /// "New" menu are closed afterwards.
    pub fn create_folder(&mut self, name: &str) -> Result<NodeId, StoreError> {
        let parent = self.navigation.current_id();
        let now = self.clock.now();
        let result = self.store.create_folder(name, parent, now).map(|f| f.id);

        match &result {
            Ok(id) => self.log(
                LogEntry::info("folder created")
                    .with_field("id", id)
                    .with_field("name", name)
                    .with_field("parent", describe(parent)),
            ),
            Err(StoreError::BlankFolderName) => {
                self.log(LogEntry::debug("blank folder name ignored"))
            }
            Err(err) => self.log(LogEntry::warn("folder creation failed").with_field("error", err)),
        }

        self.dialog_open = false;
        self.menu_open = false;
        self.changed();
        result
    }

    /// Submits the create dialog using the current name draft
    ///
    /// The draft is cleared whether or not a folder was created.
    pub fn submit_create_folder(&mut self) -> Result<NodeId, StoreError> {
        let name = std::mem::take(&mut self.folder_name_draft);
        self.create_folder(&name)
    }

    // ---- uploads ----

    /// Adds uploaded files to the open folder
    ///
    /// Drop-zone uploads are screened against the accept list first; picker
    /// uploads are taken as they are.
    pub fn upload(
        &mut self,
        files: Vec<RawFile>,
        source: UploadSource,
    ) -> Result<UploadOutcome, StoreError> {
        let folder = self.navigation.current_id();
        let now = self.clock.now();
        let (accepted, rejected) = screen_uploads(files, source, &self.settings);

        let added: Vec<NodeId> = self
            .store
            .add_files(accepted, folder, now)?
            .iter()
            .map(|f| f.id)
            .collect();

        if !added.is_empty() {
            self.log(
                LogEntry::info("files added")
                    .with_field("count", added.len())
                    .with_field("folder", describe(folder))
                    .with_field("source", format!("{:?}", source)),
            );
        }
        for file in &rejected {
            self.log(
                LogEntry::warn("upload rejected")
                    .with_field("name", &file.name)
                    .with_field("mime_type", &file.mime_type),
            );
        }

        self.changed();
        Ok(UploadOutcome { added, rejected })
    }

    // ---- navigation ----

    /// Opens a folder
    ///
    /// The folder should be one of the visible children of the open folder.
    /// Whether that is checked depends on the navigation policy.
    pub fn enter_folder(&mut self, id: NodeId) -> Result<(), NavigationError> {
        let folder = self
            .store
            .folder(id)
            .cloned()
            .ok_or(StoreError::UnknownFolder(id))?;
        let name = folder.name.clone();
        self.navigation.enter(folder, self.settings.navigation_policy)?;

        self.log(
            LogEntry::debug("folder entered")
                .with_field("id", id)
                .with_field("name", name)
                .with_field("depth", self.navigation.depth()),
        );
        self.changed();
        Ok(())
    }

    /// Jumps to a breadcrumb; `-1` returns to the root
    pub fn jump_to_breadcrumb(&mut self, index: isize) -> Result<(), NavigationError> {
        self.navigation
            .jump_to_breadcrumb(index, self.settings.navigation_policy)?;

        self.log(
            LogEntry::debug("breadcrumb jump")
                .with_field("index", index)
                .with_field("depth", self.navigation.depth()),
        );
        self.changed();
        Ok(())
    }

    // ---- menu, dialog and sidebar ----

    /// Opens the "New" menu
    pub fn open_menu(&mut self) {
        self.menu_open = true;
        self.changed();
    }

    /// Closes the "New" menu
    pub fn close_menu(&mut self) {
        self.menu_open = false;
        self.changed();
    }

    /// Opens the create-folder dialog
    pub fn open_create_dialog(&mut self) {
        self.dialog_open = true;
        self.changed();
    }

    /// Closes the create-folder dialog without creating anything
    ///
    /// The draft is kept, so reopening the dialog shows it again.
    pub fn cancel_create_dialog(&mut self) {
        self.dialog_open = false;
        self.changed();
    }

    /// Replaces the folder-name draft
    pub fn set_folder_name_draft(&mut self, draft: impl Into<String>) {
        self.folder_name_draft = draft.into();
        self.changed();
    }

    /// Selects a sidebar section
    pub fn select_sidebar(&mut self, section: SidebarSection) {
        self.sidebar = section;
        self.changed();
    }

    // ---- queries ----

    /// Folders and files inside the open folder, in creation order
    pub fn list_visible(&self) -> VisibleContents<'_> {
        self.store.list_visible(self.navigation.current_id())
    }

    /// The open folder, or `None` at the root
    pub fn current_folder(&self) -> Option<&Folder> {
        self.navigation.current()
    }

    /// Path from the root to the open folder
    pub fn breadcrumbs(&self) -> &[Folder] {
        self.navigation.path()
    }

    /// The navigation stack
    pub fn navigation(&self) -> &NavigationStack {
        &self.navigation
    }

    /// The underlying node store
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Effective settings
    pub fn settings(&self) -> &FileManagerSettings {
        &self.settings
    }

    /// Session this file manager belongs to
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Returns true while the "New" menu is open
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Returns true while the create-folder dialog is open
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Text typed into the create-folder dialog so far
    pub fn folder_name_draft(&self) -> &str {
        &self.folder_name_draft
    }

    /// Selected sidebar section
    pub fn sidebar(&self) -> SidebarSection {
        self.sidebar
    }

    /// Number of state changes so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Builds the dashboard view for the current state
    pub fn view(&self) -> DashboardView {
        let contents = self.list_visible();
        let root_label = &self.settings.root_label;
        DashboardView {
            revision: self.revision,
            title: view::title(root_label, self.current_folder()),
            breadcrumbs: view::breadcrumbs(root_label, self.navigation.path()),
            folders: contents.folders.iter().map(|f| view::folder_card(f)).collect(),
            files: contents
                .files
                .iter()
                .map(|f| view::file_card(f, self.settings.name_display_limit))
                .collect(),
            menu_open: self.menu_open,
            dialog_open: self.dialog_open,
            folder_name_draft: self.folder_name_draft.clone(),
            sidebar: self.sidebar,
        }
    }

    // ---- observers ----

    /// Registers an observer; it is called after every later change
    pub fn subscribe(&mut self, observer: impl FileManagerObserver + 'static) -> ObserverId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ---- lifecycle ----

    /// Ends the session, releasing every thumbnail handle
    ///
    /// Returns the number of handles released.
    pub fn end_session(mut self) -> usize {
        let released = self.store.release_thumbnails();
        self.log(
            LogEntry::info("session ended")
                .with_field("thumbnails_released", released)
                .with_field("folders", self.store.folder_count())
                .with_field("files", self.store.file_count()),
        );
        released
    }

    fn log(&self, entry: LogEntry) {
        self.log.log(entry.with_source(self.session));
    }

    fn changed(&mut self) {
        self.revision += 1;
        if !self.observers.is_empty() {
            let view = self.view();
            self.observers.notify(&view);
        }
    }
}

impl fmt::Debug for FileManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileManager")
            .field("session", &self.session)
            .field("store", &self.store)
            .field("navigation", &self.navigation)
            .field("menu_open", &self.menu_open)
            .field("dialog_open", &self.dialog_open)
            .field("folder_name_draft", &self.folder_name_draft)
            .field("sidebar", &self.sidebar)
            .field("revision", &self.revision)
            .field("settings", &self.settings)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

fn describe(folder: Option<NodeId>) -> String {
    folder
        .map(|id| id.to_string())
        .unwrap_or_else(|| "root".to_string())
}
