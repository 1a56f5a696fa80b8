//! Upload screening
//!
//! Files arrive either from the file picker, which takes anything, or from
//! the drop zone, which only takes what the configured accept list allows.

use core_types::NodeId;
use node_store::RawFile;
use serde::{Deserialize, Serialize};
use services_settings::FileManagerSettings;

/// Where an upload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadSource {
    /// The "Add File" picker
    Picker,
    /// The drag-and-drop zone
    DropZone,
}

/// A file turned away by the drop-zone accept list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedFile {
    /// Name of the rejected file
    pub name: String,
    /// MIME type the accept list was checked against
    pub mime_type: String,
}

/// Result of an upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Ids of the files added, in input order
    pub added: Vec<NodeId>,
    /// Files that were not accepted
    pub rejected: Vec<RejectedFile>,
}

/// Splits an upload into accepted and rejected files, preserving order
pub fn screen_uploads(
    files: Vec<RawFile>,
    source: UploadSource,
    settings: &FileManagerSettings,
) -> (Vec<RawFile>, Vec<RejectedFile>) {
    if source == UploadSource::Picker {
        return (files, Vec::new());
    }

    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();
    for file in files {
        let mime_type = file.effective_mime_type();
        if settings.drop_zone_accepts(&file.name, &mime_type) {
            accepted.push(file);
        } else {
            rejected.push(RejectedFile {
                name: file.name,
                mime_type,
            });
        }
    }
    (accepted, rejected)
}
