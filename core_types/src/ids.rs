//! Unique identifiers for file manager entities

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a folder or file node
///
/// A node id is the creation time in milliseconds plus a random tiebreaker,
/// so two nodes minted in the same millisecond still differ. Ids order by
/// creation time first.
///
/// Folders and files share one id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
    created_ms: u64,
    tiebreak: u64,
}

impl NodeId {
    /// Creates a node id for the given creation time with a random tiebreaker
    pub fn new(created_at: Timestamp) -> Self {
        Self::from_parts(created_at.as_millis(), random_u64())
    }

    /// Creates a node id from explicit parts
    pub fn from_parts(created_ms: u64, tiebreak: u64) -> Self {
        Self {
            created_ms,
            tiebreak,
        }
    }

    /// Returns the creation time in milliseconds since the epoch
    pub fn created_ms(&self) -> u64 {
        self.created_ms
    }

    /// Returns the random tiebreaker
    pub fn tiebreak(&self) -> u64 {
        self.tiebreak
    }

    /// Returns a sibling id with the same creation time and a fresh tiebreaker
    pub fn redraw(&self) -> Self {
        Self::from_parts(self.created_ms, random_u64())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}-{:016x}", self.created_ms, self.tiebreak)
    }
}

/// Unique identifier for a logged-in session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

fn random_u64() -> u64 {
    // The low 64 bits of a v4 UUID are random apart from two variant bits.
    Uuid::new_v4().as_u128() as u64
}
