// SPDX-License-Identifier: MIT OR Apache-2.0
//! Owners of animation channels.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a channel owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    /// Create a new random owner ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of owning entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OwnerKind {
    /// A top-level object
    #[default]
    Object,
    /// A bone within an armature; bones group independently of their
    /// armature object
    Bone,
}

/// The entity (object or bone) that a set of channels belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    /// Unique owner ID
    pub id: OwnerId,
    /// Display name
    pub name: String,
    /// Owner kind
    pub kind: OwnerKind,
}

impl Owner {
    /// Create an object owner
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            id: OwnerId::new(),
            name: name.into(),
            kind: OwnerKind::Object,
        }
    }

    /// Create a bone owner
    pub fn bone(name: impl Into<String>) -> Self {
        Self {
            id: OwnerId::new(),
            name: name.into(),
            kind: OwnerKind::Bone,
        }
    }
}
