//! Thumbnail preview handles
//!
//! Every image upload gets a [`ThumbnailRef`], an opaque URL-like handle the
//! presentation layer can render from. The bytes behind a handle are held by
//! a [`ThumbnailRegistry`] until the owning session ends and every handle is
//! released. A released handle resolves to nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque preview handle, rendered as `blob:<uuid>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThumbnailRef(Uuid);

impl ThumbnailRef {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Returns the URL form of the handle
    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ThumbnailRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:{}", self.0)
    }
}

/// Preview content kept alive by a live handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailSource {
    /// MIME type of the content
    pub mime_type: String,
    /// Raw content
    pub bytes: Arc<[u8]>,
}

/// Owner of every live thumbnail handle
#[derive(Debug, Default)]
pub struct ThumbnailRegistry {
    live: HashMap<ThumbnailRef, ThumbnailSource>,
    released: u64,
}

impl ThumbnailRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers preview content and returns its handle
    ///
    /// The registry takes ownership of `bytes` without copying them.
    pub fn create(&mut self, mime_type: impl Into<String>, bytes: Vec<u8>) -> ThumbnailRef {
        let handle = ThumbnailRef::new();
        self.live.insert(
            handle,
            ThumbnailSource {
                mime_type: mime_type.into(),
                bytes: Arc::from(bytes),
            },
        );
        handle
    }

    /// Resolves a handle to its content, if still live
    pub fn resolve(&self, handle: &ThumbnailRef) -> Option<&ThumbnailSource> {
        self.live.get(handle)
    }

    /// Releases every live handle and returns how many were released
    pub fn release_all(&mut self) -> usize {
        let count = self.live.len();
        self.live.clear();
        self.released += count as u64;
        count
    }

    /// Number of live handles
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of handles released over the registry's lifetime
    pub fn released_count(&self) -> u64 {
        self.released
    }
}
