//! Navigation stack and breadcrumb jumps
//!
//! The stack holds the folders from the root down to the open folder. The
//! open folder is the last element; an empty stack means the root is open.
//!
//! Callers are expected to enter only folders that are children of the open
//! folder and to jump only to indices on the current path. Under
//! [`NavigationPolicy::Trust`] those expectations are taken on faith. Under
//! [`NavigationPolicy::Validate`] violations are reported as errors and the
//! stack is left untouched.

use core_types::NodeId;
use node_store::{Folder, StoreError};
use serde::{Deserialize, Serialize};
use services_settings::NavigationPolicy;
use thiserror::Error;

/// Breadcrumb index that stands for the root
pub const ROOT_BREADCRUMB: isize = -1;

/// Errors raised while navigating
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The target folder does not exist
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The folder is not a direct child of the open folder
    #[error("{folder} is not a child of {}", describe_folder(.current))]
    NotAChild {
        folder: NodeId,
        current: Option<NodeId>,
    },

    /// The breadcrumb index is not on the current path
    #[error("Breadcrumb index {index} out of range for path depth {depth}")]
    BreadcrumbOutOfRange { index: isize, depth: usize },
}

fn describe_folder(folder: &Option<NodeId>) -> String {
    match folder {
        Some(id) => id.to_string(),
        None => "root".to_string(),
    }
}

/// Path from the root to the open folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStack {
    folders: Vec<Folder>,
}

impl NavigationStack {
    /// Creates a stack positioned at the root
    pub fn new() -> Self {
        Self::default()
    }

    /// The open folder, or `None` at the root
    pub fn current(&self) -> Option<&Folder> {
        self.folders.last()
    }

    /// Id of the open folder, or `None` at the root
    pub fn current_id(&self) -> Option<NodeId> {
        self.current().map(|f| f.id)
    }

    /// Folders from the root down to the open folder
    pub fn path(&self) -> &[Folder] {
        &self.folders
    }

    /// Number of folders on the path
    pub fn depth(&self) -> usize {
        self.folders.len()
    }

    /// Returns true when the root is open
    pub fn is_at_root(&self) -> bool {
        self.folders.is_empty()
    }

    /// Opens `folder`, pushing it onto the path
    pub fn enter(
        &mut self,
        folder: Folder,
        policy: NavigationPolicy,
    ) -> Result<(), NavigationError> {
        let current = self.current_id();
        if policy == NavigationPolicy::Validate && folder.parent_id != current {
            return Err(NavigationError::NotAChild {
                folder: folder.id,
                current,
            });
        }
        self.folders.push(folder);
        Ok(())
    }

    /// Truncates the path to `index + 1` folders
    ///
    /// `-1` returns to the root. Indices below `-1` are always rejected; an
    /// index at or past the depth is clamped under `Trust` and rejected under
    /// `Validate`.
    pub fn jump_to_breadcrumb(
        &mut self,
        index: isize,
        policy: NavigationPolicy,
    ) -> Result<Option<&Folder>, NavigationError> {
        let depth = self.depth();
        let out_of_range = NavigationError::BreadcrumbOutOfRange { index, depth };

        if index < ROOT_BREADCRUMB {
            return Err(out_of_range);
        }
        let keep = match index.checked_add(1).and_then(|k| usize::try_from(k).ok()) {
            Some(keep) if keep <= depth => keep,
            _ if policy == NavigationPolicy::Validate => return Err(out_of_range),
            _ => depth,
        };

        self.folders.truncate(keep);
        Ok(self.current())
    }

    /// Returns to the root
    pub fn reset(&mut self) {
        self.folders.clear();
    }

    /// Returns true if every folder's parent is the folder before it
    pub fn is_consistent(&self) -> bool {
        let mut expected_parent = None;
        for folder in &self.folders {
            if folder.parent_id != expected_parent {
                return false;
            }
            expected_parent = Some(folder.id);
        }
        true
    }
}
