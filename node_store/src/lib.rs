//! # Node Store
//!
//! An in-memory hierarchy of folders and files kept as two flat, append-only
//! collections linked by parent references.
//!
//! ## Design
//!
//! - A folder points at its parent folder; `None` means the root
//! - A file points at its containing folder; `None` means the root
//! - Listing a folder is a linear filter over both collections, in creation order
//! - Image files carry a [`ThumbnailRef`] whose preview bytes live in the
//!   store's [`ThumbnailRegistry`] until explicitly released
//!
//! The store owns no notion of "current folder"; callers pass it in.

pub mod node;
pub mod store;
pub mod thumbnail;

pub use node::{File, Folder, NodeKind, NodeRef, RawFile};
pub use store::{NodeStore, StoreError, VisibleContents};
pub use thumbnail::{ThumbnailRef, ThumbnailRegistry};
