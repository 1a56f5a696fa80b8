//! Read-only dashboard view
//!
//! The presentation layer never touches file manager state directly. It is
//! handed a [`DashboardView`] after every change and renders from that.

use chrono::{DateTime, Datelike, Utc};
use core_types::{NodeId, Timestamp};
use node_store::{File, Folder, ThumbnailRef};
use serde::{Deserialize, Serialize};

use crate::navigation::ROOT_BREADCRUMB;

/// Sidebar sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SidebarSection {
    /// The file browser
    #[default]
    Files,
    /// The help page
    Help,
}

/// One breadcrumb link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Text of the link
    pub label: String,
    /// Index to pass to `jump_to_breadcrumb` (`-1` for the root link)
    pub index: isize,
    /// Folder the link leads to, `None` for the root
    pub folder_id: Option<NodeId>,
}

/// A folder tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCard {
    /// Folder to enter when the tile is clicked
    pub id: NodeId,
    /// Folder name, shown in full
    pub name: String,
}

/// A file tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCard {
    /// The file node
    pub id: NodeId,
    /// Shortened name shown on the tile
    pub display_name: String,
    /// Full name, shown on hover
    pub name: String,
    /// MIME type the file was stored with
    pub mime_type: String,
    /// Upload date, e.g. "March 3rd 2024"
    pub uploaded_on: String,
    /// Preview handle for images
    pub thumbnail: Option<ThumbnailRef>,
}

/// Everything the presentation layer needs to draw the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Bumped on every state change
    pub revision: u64,
    /// Heading: the root label, or "Folder: <name>" inside a folder
    pub title: String,
    /// Root link followed by one link per open folder
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Subfolders of the open folder, in creation order
    pub folders: Vec<FolderCard>,
    /// Files in the open folder, in upload order
    pub files: Vec<FileCard>,
    /// Whether the "New" menu is open
    pub menu_open: bool,
    /// Whether the create-folder dialog is open
    pub dialog_open: bool,
    /// Current text of the create-folder input
    pub folder_name_draft: String,
    /// Selected sidebar section
    pub sidebar: SidebarSection,
}

/// Builds the breadcrumb trail: the root link followed by one link per folder
pub(crate) fn breadcrumbs(root_label: &str, path: &[Folder]) -> Vec<Breadcrumb> {
    let mut crumbs = Vec::with_capacity(path.len() + 1);
    crumbs.push(Breadcrumb {
        label: root_label.to_string(),
        index: ROOT_BREADCRUMB,
        folder_id: None,
    });
    crumbs.extend(path.iter().enumerate().map(|(i, folder)| Breadcrumb {
        label: folder.name.clone(),
        index: i as isize,
        folder_id: Some(folder.id),
    }));
    crumbs
}

/// Title above the grid
pub(crate) fn title(root_label: &str, current: Option<&Folder>) -> String {
    match current {
        Some(folder) => format!("Folder: {}", folder.name),
        None => root_label.to_string(),
    }
}

pub(crate) fn folder_card(folder: &Folder) -> FolderCard {
    FolderCard {
        id: folder.id,
        name: folder.name.clone(),
    }
}

pub(crate) fn file_card(file: &File, name_display_limit: usize) -> FileCard {
    FileCard {
        id: file.id,
        display_name: display_name(&file.name, name_display_limit),
        name: file.name.clone(),
        mime_type: file.mime_type.clone(),
        uploaded_on: format_upload_date(file.uploaded_at),
        thumbnail: file.thumbnail,
    }
}

/// First `limit` characters of the name followed by an ellipsis
pub fn display_name(name: &str, limit: usize) -> String {
    let head: String = name.chars().take(limit).collect();
    format!("{}...", head)
}

/// Formats a timestamp as "Month Do YYYY" in UTC
pub fn format_upload_date(at: Timestamp) -> String {
    let secs = i64::try_from(at.as_secs()).unwrap_or(i64::MAX);
    match DateTime::<Utc>::from_timestamp(secs, at.subsec_nanos()) {
        Some(date) => format!(
            "{} {}{} {}",
            date.format("%B"),
            date.day(),
            ordinal_suffix(date.day()),
            date.year()
        ),
        None => String::new(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
