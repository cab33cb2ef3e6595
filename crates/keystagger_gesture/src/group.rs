// SPDX-License-Identifier: MIT OR Apache-2.0
//! Selection grouping for the stagger gesture.
//!
//! Selected keyframes are partitioned into ordered groups; a group's
//! 0-based index is its stagger multiplier. Grouping happens once per
//! gesture and is immutable for the life of the session.

use crate::host::KeyHandle;
use indexmap::IndexMap;
use keystagger_timeline::{ChannelId, OwnerId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Grouping unit for the stagger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupingMode {
    /// One group per channel
    #[default]
    PerChannel,
    /// One group per owning object/bone; all of an owner's channels
    /// collapse into one group
    PerOwner,
}

impl GroupingMode {
    /// The opposite grouping unit
    pub fn inverted(self) -> Self {
        match self {
            Self::PerChannel => Self::PerOwner,
            Self::PerOwner => Self::PerChannel,
        }
    }
}

/// Ordering of groups along the stair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderingMode {
    /// Ascending by each group's minimum outliner position
    #[default]
    OutlinerOrder,
    /// Ascending by each group's earliest selected keyframe time
    EarliestTime,
}

/// Final arrangement of the sorted group sequence along the stair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupArrangement {
    /// Sorted order as-is
    #[default]
    Forward,
    /// Sorted order reversed, so the last group anchors the stair
    Reverse,
    /// Deterministic shuffle of the sorted order; the same seed over
    /// the same sorted sequence always yields the same arrangement
    Random {
        /// Shuffle seed
        seed: u64,
    },
}

/// Key identifying one group's bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Grouped by channel
    Channel(ChannelId),
    /// Grouped by owning entity
    Owner(OwnerId),
}

/// An ordered collection of keyframes receiving the same stagger multiple
#[derive(Debug, Clone)]
pub struct Group {
    /// 0-based position in the ordered sequence; the stagger multiplier
    pub index: usize,
    /// Bucket key this group was built from
    pub key: GroupKey,
    /// Member keyframe handles
    pub members: Vec<KeyHandle>,
}

impl Group {
    /// Minimum outliner position over the members
    fn min_outliner_index(&self) -> u32 {
        self.members
            .iter()
            .map(|h| h.outliner_index)
            .min()
            .unwrap_or(u32::MAX)
    }

    /// Earliest original keyframe time over the members
    fn earliest_time(&self) -> f32 {
        self.members
            .iter()
            .map(|h| h.time)
            .fold(f32::INFINITY, f32::min)
    }
}

/// Partition selected keyframes into ordered groups using one grouping
/// unit for the whole selection.
///
/// Empty input yields an empty sequence and the gesture is a no-op.
pub fn group_selection(
    handles: &[KeyHandle],
    mode: GroupingMode,
    ordering: OrderingMode,
) -> Vec<Group> {
    bucket_and_order(handles, ordering, |handle| match mode {
        GroupingMode::PerChannel => GroupKey::Channel(handle.channel),
        GroupingMode::PerOwner => GroupKey::Owner(handle.owner),
    })
}

/// Partition with per-channel auto-detection of the grouping unit.
///
/// A handle whose channel header is selected as a whole resolves
/// per-channel; otherwise per-owner. `invert` flips the resolved choice,
/// so the explicit modifier always has the final say over the detection.
pub fn group_selection_auto(
    handles: &[KeyHandle],
    invert: bool,
    ordering: OrderingMode,
) -> Vec<Group> {
    bucket_and_order(handles, ordering, |handle| {
        let mut mode = if handle.header_selected {
            GroupingMode::PerChannel
        } else {
            GroupingMode::PerOwner
        };
        if invert {
            mode = mode.inverted();
        }
        match mode {
            GroupingMode::PerChannel => GroupKey::Channel(handle.channel),
            GroupingMode::PerOwner => GroupKey::Owner(handle.owner),
        }
    })
}

/// Bucket handles by key, order the buckets, assign stagger indices.
///
/// The bucket map is insertion-ordered and both sorts are stable, so
/// ties resolve to the first-encountered key.
fn bucket_and_order(
    handles: &[KeyHandle],
    ordering: OrderingMode,
    key_of: impl Fn(&KeyHandle) -> GroupKey,
) -> Vec<Group> {
    let mut buckets: IndexMap<GroupKey, Vec<KeyHandle>> = IndexMap::new();
    for handle in handles {
        buckets.entry(key_of(handle)).or_default().push(*handle);
    }

    let mut groups: Vec<Group> = buckets
        .into_iter()
        .map(|(key, members)| Group {
            index: 0,
            key,
            members,
        })
        .collect();

    match ordering {
        OrderingMode::OutlinerOrder => {
            groups.sort_by_key(Group::min_outliner_index);
        }
        OrderingMode::EarliestTime => {
            groups.sort_by(|a, b| {
                a.earliest_time()
                    .total_cmp(&b.earliest_time())
                    .then_with(|| a.min_outliner_index().cmp(&b.min_outliner_index()))
            });
        }
    }

    for (index, group) in groups.iter_mut().enumerate() {
        group.index = index;
    }
    groups
}

/// Rearrange an ordered group sequence in place and reassign stagger
/// indices.
///
/// Permutes exactly the sequence it is given. Callers that reshuffle
/// with a new seed must rearrange a fresh copy of the sorted base
/// sequence, not a previous shuffle.
pub fn arrange_groups(groups: &mut [Group], arrangement: GroupArrangement) {
    match arrangement {
        GroupArrangement::Forward => {}
        GroupArrangement::Reverse => groups.reverse(),
        GroupArrangement::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            groups.shuffle(&mut rng);
        }
    }
    for (index, group) in groups.iter_mut().enumerate() {
        group.index = index;
    }
}
