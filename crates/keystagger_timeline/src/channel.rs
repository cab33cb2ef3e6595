// SPDX-License-Identifier: MIT OR Apache-2.0
//! Channel definitions for the timeline model.

use crate::keyframe::{Keyframe, KeyframeId};
use crate::owner::OwnerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub Uuid);

impl ChannelId {
    /// Create a new random channel ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single animation curve: one property's track of keyframes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Unique channel ID
    pub id: ChannelId,
    /// Animated property path (e.g. `location`)
    pub property: String,
    /// Component index within the property (e.g. 1 for Y)
    pub array_index: usize,
    /// Owning entity
    pub owner: OwnerId,
    /// Stable position in the host's hierarchical listing
    pub outliner_index: u32,
    /// Whether the channel header itself is selected (as opposed to
    /// individual keyframes on it)
    pub header_selected: bool,
    /// Keyframes, kept sorted by time
    keyframes: Vec<Keyframe>,
}

impl Channel {
    /// Create a new empty channel
    pub fn new(property: impl Into<String>, array_index: usize, owner: OwnerId) -> Self {
        Self {
            id: ChannelId::new(),
            property: property.into(),
            array_index,
            owner,
            outliner_index: 0,
            header_selected: false,
            keyframes: Vec::new(),
        }
    }

    /// Set the outliner position
    pub fn with_outliner_index(mut self, index: u32) -> Self {
        self.outliner_index = index;
        self
    }

    /// Add a keyframe, keeping the channel sorted by time
    pub fn add_keyframe(&mut self, keyframe: Keyframe) -> KeyframeId {
        let id = keyframe.id;
        self.keyframes.push(keyframe);
        self.sort_keyframes();
        id
    }

    /// Remove a keyframe
    pub fn remove_keyframe(&mut self, keyframe_id: KeyframeId) {
        self.keyframes.retain(|k| k.id != keyframe_id);
    }

    /// Sort keyframes by time
    fn sort_keyframes(&mut self) {
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Get keyframe by ID
    pub fn keyframe(&self, keyframe_id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.id == keyframe_id)
    }

    /// Get mutable keyframe by ID
    pub fn keyframe_mut(&mut self, keyframe_id: KeyframeId) -> Option<&mut Keyframe> {
        self.keyframes.iter_mut().find(|k| k.id == keyframe_id)
    }

    /// Move a keyframe to a new time, re-sorting the channel
    pub fn move_keyframe(&mut self, keyframe_id: KeyframeId, new_time: f32) -> bool {
        let Some(kf) = self.keyframe_mut(keyframe_id) else {
            return false;
        };
        kf.time = new_time;
        self.sort_keyframes();
        true
    }

    /// Iterate over the selected keyframes
    pub fn selected_keyframes(&self) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.iter().filter(|k| k.selected)
    }

    /// Select every keyframe on the channel
    pub fn select_all_keys(&mut self) {
        for kf in &mut self.keyframes {
            kf.selected = true;
        }
    }

    /// Get keyframe count
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Get all keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Human-readable channel label, e.g. `location[1]`
    pub fn label(&self) -> String {
        format!("{}[{}]", self.property, self.array_index)
    }
}
