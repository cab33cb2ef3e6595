// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions for the timeline model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(pub Uuid);

impl KeyframeId {
    /// Create a new random keyframe ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KeyframeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A keyframe on a channel.
///
/// Tangents are stored relative to the key's own position, so moving a
/// key in time leaves its tangent data untouched. Restoring a key's
/// snapshot time therefore restores the key exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyframe {
    /// Unique keyframe ID
    pub id: KeyframeId,
    /// Time in frames
    pub time: f32,
    /// Value at this keyframe
    pub value: f32,
    /// In-tangent, relative to the key position
    pub in_tangent: Option<[f32; 2]>,
    /// Out-tangent, relative to the key position
    pub out_tangent: Option<[f32; 2]>,
    /// Whether this keyframe is selected
    pub selected: bool,
}

impl Keyframe {
    /// Create a new unselected keyframe
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            id: KeyframeId::new(),
            time,
            value,
            in_tangent: None,
            out_tangent: None,
            selected: false,
        }
    }

    /// Set relative tangents
    pub fn with_tangents(mut self, in_tangent: [f32; 2], out_tangent: [f32; 2]) -> Self {
        self.in_tangent = Some(in_tangent);
        self.out_tangent = Some(out_tangent);
        self
    }

    /// Mark the keyframe as selected
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}
