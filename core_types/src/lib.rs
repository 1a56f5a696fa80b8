//! # Core Types
//!
//! This crate defines the fundamental types shared by the file manager crates.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Identifiers are typed and cannot be confused.
//! - **Time is a value**: Timestamps are passed in, never read from ambient state.
//!
//! ## Key Types
//!
//! - [`NodeId`]: Unique identifier for a folder or file node
//! - [`SessionId`]: Unique identifier for a logged-in session
//! - [`Timestamp`]: A point in wall-clock time, in nanoseconds since the Unix epoch

pub mod ids;
pub mod time;

pub use ids::{NodeId, SessionId};
pub use time::Timestamp;
