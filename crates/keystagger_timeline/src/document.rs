// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document containing owners and their channels.

use crate::channel::{Channel, ChannelId};
use crate::owner::{Owner, OwnerId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An animation document: the host-owned data a gesture edits in place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document name
    pub name: String,
    /// Owners by ID, in insertion order
    owners: IndexMap<OwnerId, Owner>,
    /// Channels by ID, in insertion order
    channels: IndexMap<ChannelId, Channel>,
}

impl Document {
    /// Create a new empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owners: IndexMap::new(),
            channels: IndexMap::new(),
        }
    }

    /// Add an owner
    pub fn add_owner(&mut self, owner: Owner) -> OwnerId {
        let id = owner.id;
        self.owners.insert(id, owner);
        id
    }

    /// Get an owner by ID
    pub fn owner(&self, owner_id: OwnerId) -> Option<&Owner> {
        self.owners.get(&owner_id)
    }

    /// Add a channel
    pub fn add_channel(&mut self, channel: Channel) -> ChannelId {
        let id = channel.id;
        self.channels.insert(id, channel);
        id
    }

    /// Remove a channel
    pub fn remove_channel(&mut self, channel_id: ChannelId) -> Option<Channel> {
        self.channels.swap_remove(&channel_id)
    }

    /// Get a channel by ID
    pub fn channel(&self, channel_id: ChannelId) -> Option<&Channel> {
        self.channels.get(&channel_id)
    }

    /// Get a mutable channel by ID
    pub fn channel_mut(&mut self, channel_id: ChannelId) -> Option<&mut Channel> {
        self.channels.get_mut(&channel_id)
    }

    /// Iterate over channels in insertion order
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Iterate over mutable channels in insertion order
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut Channel> {
        self.channels.values_mut()
    }

    /// Get channel count
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Count selected keyframes across all channels
    pub fn selected_key_count(&self) -> usize {
        self.channels
            .values()
            .map(|c| c.selected_keyframes().count())
            .sum()
    }
}
