//! Folder and file node types

use crate::thumbnail::ThumbnailRef;
use core_types::{NodeId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A folder that can contain other nodes
    Folder,
    /// An uploaded file
    File,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Folder => write!(f, "folder"),
            NodeKind::File => write!(f, "file"),
        }
    }
}

/// A folder node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique node id
    pub id: NodeId,
    /// Display name, never blank
    pub name: String,
    /// Containing folder, `None` for root
    pub parent_id: Option<NodeId>,
    /// Creation time
    pub created_at: Timestamp,
}

/// A file node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Unique node id
    pub id: NodeId,
    /// Display name as supplied by the uploader
    pub name: String,
    /// MIME type, inferred from the name when the uploader gave none
    pub mime_type: String,
    /// Size of the uploaded content in bytes
    pub size: usize,
    /// Containing folder, `None` for root
    pub folder_id: Option<NodeId>,
    /// Upload time
    pub uploaded_at: Timestamp,
    /// Preview handle, present only for images
    pub thumbnail: Option<ThumbnailRef>,
}

impl File {
    /// Returns true if this file is an image
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

/// Borrowed view of either kind of node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Folder(&'a Folder),
    File(&'a File),
}

impl<'a> NodeRef<'a> {
    /// Returns the node id
    pub fn id(&self) -> NodeId {
        match self {
            NodeRef::Folder(folder) => folder.id,
            NodeRef::File(file) => file.id,
        }
    }

    /// Returns the display name
    pub fn name(&self) -> &'a str {
        match self {
            NodeRef::Folder(folder) => &folder.name,
            NodeRef::File(file) => &file.name,
        }
    }

    /// Returns the kind of node
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Folder(_) => NodeKind::Folder,
            NodeRef::File(_) => NodeKind::File,
        }
    }

    /// Returns the containing folder
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            NodeRef::Folder(folder) => folder.parent_id,
            NodeRef::File(file) => file.folder_id,
        }
    }
}

/// A file as handed over by an uploader (file picker or drop zone)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// File name
    pub name: String,
    /// MIME type reported by the uploader, possibly empty
    pub mime_type: String,
    /// File content
    pub bytes: Vec<u8>,
}

impl RawFile {
    /// Creates a raw file
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Returns the reported MIME type, or one guessed from the file name
    pub fn effective_mime_type(&self) -> String {
        let reported = self.mime_type.trim();
        if reported.is_empty() {
            mime_guess::from_path(&self.name)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        } else {
            reported.to_string()
        }
    }
}

/// Returns true if the MIME type names an image
pub(crate) fn is_image_mime(mime_type: &str) -> bool {
    match mime_type.parse::<mime::Mime>() {
        Ok(parsed) => parsed.type_() == mime::IMAGE,
        Err(_) => mime_type.to_ascii_lowercase().starts_with("image/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_mime_type_prefers_reported() {
        let raw = RawFile::new("photo.txt", "image/png", vec![1, 2, 3]);
        assert_eq!(raw.effective_mime_type(), "image/png");
    }

    #[test]
    fn test_effective_mime_type_guesses_from_name() {
        let raw = RawFile::new("photo.jpg", "", Vec::new());
        assert_eq!(raw.effective_mime_type(), "image/jpeg");

        let raw = RawFile::new("report.pdf", "  ", Vec::new());
        assert_eq!(raw.effective_mime_type(), "application/pdf");
    }

    #[test]
    fn test_effective_mime_type_unknown_extension() {
        let raw = RawFile::new("blob.zzzunknown", "", Vec::new());
        assert_eq!(raw.effective_mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/svg+xml"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn test_node_ref_accessors() {
        let parent = NodeId::from_parts(1, 1);
        let folder = Folder {
            id: NodeId::from_parts(2, 2),
            name: "Docs".to_string(),
            parent_id: Some(parent),
            created_at: Timestamp::from_millis(2),
        };

        let node = NodeRef::Folder(&folder);
        assert_eq!(node.id(), folder.id);
        assert_eq!(node.name(), "Docs");
        assert_eq!(node.kind(), NodeKind::Folder);
        assert_eq!(node.parent(), Some(parent));
    }
}
