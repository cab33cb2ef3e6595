// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drag session state for one stagger gesture.
//!
//! A session snapshots the selection once at gesture start; every later
//! write is computed from that snapshot, so repeated drag updates are
//! idempotent and cancelling restores the exact original times.

use crate::group::{
    arrange_groups, group_selection, group_selection_auto, Group, GroupArrangement, GroupingMode,
    OrderingMode,
};
use crate::host::StaggerHost;
use crate::offset::{offset_for, quantize};
use thiserror::Error;

/// Session errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No keyframes were selected at gesture start
    #[error("no keyframes selected")]
    EmptySelection,
}

/// How the grouping unit is chosen at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingChoice {
    /// One unit for the whole selection
    Fixed(GroupingMode),
    /// Per-channel detection from header selection; `invert` flips each
    /// resolved choice
    Auto {
        /// Flip the detected unit per handle
        invert: bool,
    },
}

/// Terminal and live states of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Drag in progress
    Active,
    /// Offsets made permanent
    Committed,
    /// Snapshot restored
    Cancelled,
}

/// Transient state for one stagger gesture
#[derive(Debug)]
pub struct DragSession {
    /// Groups with snapshot times, in the currently arranged order
    groups: Vec<Group>,
    /// The sorted sequence before any arrangement; reshuffles restart
    /// from here
    base_groups: Vec<Group>,
    arrangement: GroupArrangement,
    base_unit: f32,
    /// Last applied quantized step; used to skip redundant writes
    last_step: Option<f32>,
    status: SessionStatus,
}

impl DragSession {
    /// Snapshot the host's selection and group it.
    ///
    /// Group membership is immutable afterwards; selection changes in
    /// the host mid-gesture are ignored. Only a [`reseed`] of a random
    /// arrangement can rearrange the stair.
    ///
    /// [`reseed`]: Self::reseed
    pub fn begin<H: StaggerHost>(
        host: &H,
        grouping: GroupingChoice,
        ordering: OrderingMode,
        arrangement: GroupArrangement,
        base_unit: f32,
    ) -> Result<Self, SessionError> {
        let handles = host.selected_keys();
        if handles.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let base_groups = match grouping {
            GroupingChoice::Fixed(mode) => group_selection(&handles, mode, ordering),
            GroupingChoice::Auto { invert } => group_selection_auto(&handles, invert, ordering),
        };
        let mut groups = base_groups.clone();
        arrange_groups(&mut groups, arrangement);
        tracing::debug!(
            keys = handles.len(),
            groups = groups.len(),
            ?grouping,
            ?ordering,
            ?arrangement,
            "stagger session started"
        );

        Ok(Self {
            groups,
            base_groups,
            arrangement,
            base_unit,
            last_step: None,
            status: SessionStatus::Active,
        })
    }

    /// Apply the stagger for the current drag delta and return the
    /// quantized per-group step.
    ///
    /// Writes are skipped entirely when the step has not changed since
    /// the last application. Handles that have vanished from the host
    /// are skipped individually; the gesture continues.
    pub fn apply<H: StaggerHost>(&mut self, host: &mut H, delta: f32) -> f32 {
        let step = quantize(delta, self.base_unit);
        if self.status != SessionStatus::Active || self.last_step == Some(step) {
            return step;
        }

        for group in &self.groups {
            let offset = offset_for(group.index, delta, self.base_unit);
            for member in &group.members {
                if !host.set_key_time(member.channel, member.keyframe, member.time + offset) {
                    tracing::debug!(keyframe = ?member.keyframe, "skipping vanished keyframe");
                }
            }
        }
        self.last_step = Some(step);
        step
    }

    /// Reshuffle a random stair with a new seed and re-apply the
    /// current step.
    ///
    /// The shuffle restarts from the sorted base sequence, so the
    /// result depends only on the seed, not on the shuffle history.
    /// Returns the re-applied step; `None` when the session is not
    /// active or the arrangement is not random.
    pub fn reseed<H: StaggerHost>(&mut self, host: &mut H, seed: u64) -> Option<f32> {
        if self.status != SessionStatus::Active {
            return None;
        }
        let GroupArrangement::Random { .. } = self.arrangement else {
            return None;
        };

        self.arrangement = GroupArrangement::Random { seed };
        let mut groups = self.base_groups.clone();
        arrange_groups(&mut groups, self.arrangement);
        self.groups = groups;

        // The stair indices moved under the keys, so the unchanged-step
        // shortcut must not suppress this rewrite
        let step = self.step();
        self.last_step = None;
        Some(self.apply(host, step))
    }

    /// Make the last applied times permanent
    pub fn commit(&mut self) {
        if self.status == SessionStatus::Active {
            self.status = SessionStatus::Committed;
        }
    }

    /// Restore every member to its exact snapshot time
    pub fn cancel<H: StaggerHost>(&mut self, host: &mut H) {
        if self.status != SessionStatus::Active {
            return;
        }
        for group in &self.groups {
            for member in &group.members {
                host.set_key_time(member.channel, member.keyframe, member.time);
            }
        }
        self.status = SessionStatus::Cancelled;
    }

    /// Status line for on-screen display
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "Offset: {:.1} frames | Groups: {}",
            self.step(),
            self.groups.len()
        );
        if let GroupArrangement::Random { seed } = self.arrangement {
            line.push_str(&format!(" | Seed: {seed}"));
        }
        line
    }

    /// The current shuffle seed; `None` unless the arrangement is
    /// random
    pub fn seed(&self) -> Option<u64> {
        match self.arrangement {
            GroupArrangement::Random { seed } => Some(seed),
            _ => None,
        }
    }

    /// Last applied quantized step, 0 before the first move
    pub fn step(&self) -> f32 {
        self.last_step.unwrap_or(0.0)
    }

    /// Number of groups in the stair
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The computed groups, in stagger order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Current session status
    pub fn status(&self) -> SessionStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DocumentHost;
    use keystagger_timeline::{Channel, ChannelId, Document, Keyframe, KeyframeId, Owner};

    /// Channels A, B, C with one selected key each at the given times.
    fn document(times: [f32; 3]) -> (Document, Vec<(ChannelId, KeyframeId)>) {
        let mut doc = Document::new("Session test");
        let mut ids = Vec::new();
        for (i, time) in times.into_iter().enumerate() {
            let owner = doc.add_owner(Owner::object(format!("Object.{i:03}")));
            let mut ch = Channel::new("location", 0, owner).with_outliner_index(i as u32);
            let kf = ch.add_keyframe(Keyframe::new(time, 0.0).selected());
            let ch_id = doc.add_channel(ch);
            ids.push((ch_id, kf));
        }
        (doc, ids)
    }

    fn times(host: &DocumentHost<'_>, ids: &[(ChannelId, KeyframeId)]) -> Vec<f32> {
        ids.iter()
            .map(|(ch, kf)| {
                host.document()
                    .channel(*ch)
                    .unwrap()
                    .keyframe(*kf)
                    .unwrap()
                    .time
            })
            .collect()
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let mut doc = Document::new("Empty");
        let host = DocumentHost::new(&mut doc);
        let result = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Forward,
            1.0,
        );
        assert_eq!(result.unwrap_err(), SessionError::EmptySelection);
    }

    /// Earliest-time ordering over times [10, 5, 20]: the stair is
    /// B, A, C, so a one-frame delta yields B=5, A=11, C=22.
    #[test]
    fn test_earliest_time_stair() {
        let (mut doc, ids) = document([10.0, 5.0, 20.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::EarliestTime,
            GroupArrangement::Forward,
            1.0,
        )
        .unwrap();

        let step = session.apply(&mut host, 1.0);
        assert_eq!(step, 1.0);
        assert_eq!(times(&host, &ids), vec![11.0, 5.0, 22.0]);
    }

    #[test]
    fn test_outliner_stair_with_unit_delta() {
        let (mut doc, ids) = document([1.0, 1.0, 1.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Forward,
            1.0,
        )
        .unwrap();

        session.apply(&mut host, 3.0);
        assert_eq!(times(&host, &ids), vec![1.0, 4.0, 7.0]);
    }

    /// Updates are computed from the snapshot, not cumulatively.
    #[test]
    fn test_repeated_updates_are_idempotent() {
        let (mut doc, ids) = document([2.0, 4.0, 6.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Forward,
            1.0,
        )
        .unwrap();

        session.apply(&mut host, 5.0);
        session.apply(&mut host, -2.0);
        session.apply(&mut host, 1.0);
        assert_eq!(times(&host, &ids), vec![2.0, 5.0, 8.0]);

        session.apply(&mut host, 0.0);
        assert_eq!(times(&host, &ids), vec![2.0, 4.0, 6.0]);
    }

    /// Reversed stair over outliner order: the last channel anchors
    /// and the first climbs highest.
    #[test]
    fn test_reverse_arrangement_stair() {
        let (mut doc, ids) = document([1.0, 1.0, 1.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Reverse,
            1.0,
        )
        .unwrap();

        session.apply(&mut host, 2.0);
        assert_eq!(times(&host, &ids), vec![5.0, 3.0, 1.0]);
    }

    /// Changing the seed mid-gesture reshuffles from the sorted base
    /// order and re-applies the current step, so returning to a seed
    /// reproduces its exact stair.
    #[test]
    fn test_reseed_reapplies_current_step() {
        let (mut doc, ids) = document([0.0, 0.0, 0.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Random { seed: 42 },
            1.0,
        )
        .unwrap();
        assert_eq!(session.seed(), Some(42));

        session.apply(&mut host, 2.0);
        let seed_42_times = times(&host, &ids);
        let mut sorted = seed_42_times.clone();
        sorted.sort_by(f32::total_cmp);
        assert_eq!(sorted, vec![0.0, 2.0, 4.0]);

        assert_eq!(session.reseed(&mut host, 43), Some(2.0));
        let mut sorted = times(&host, &ids);
        sorted.sort_by(f32::total_cmp);
        assert_eq!(sorted, vec![0.0, 2.0, 4.0]);

        assert_eq!(session.reseed(&mut host, 42), Some(2.0));
        assert_eq!(times(&host, &ids), seed_42_times);
    }

    #[test]
    fn test_reseed_requires_random_arrangement() {
        let (mut doc, _ids) = document([0.0, 0.0, 0.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Forward,
            1.0,
        )
        .unwrap();

        assert_eq!(session.seed(), None);
        assert_eq!(session.reseed(&mut host, 7), None);
    }

    #[test]
    fn test_cancel_restores_bit_for_bit() {
        // Times with no exact f32 representation
        let original = [0.1f32 + 0.2, 10.0 / 3.0, 7.77];
        let (mut doc, ids) = document(original);
        let mut host = DocumentHost::new(&mut doc);
        let before: Vec<u32> = times(&host, &ids).iter().map(|t| t.to_bits()).collect();
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Forward,
            1.0,
        )
        .unwrap();
        session.apply(&mut host, 13.0);
        session.cancel(&mut host);

        let after: Vec<u32> = times(&host, &ids).iter().map(|t| t.to_bits()).collect();
        assert_eq!(before, after);
        assert_eq!(session.status(), SessionStatus::Cancelled);
    }

    #[test]
    fn test_vanished_keyframe_is_skipped() {
        let (mut doc, ids) = document([1.0, 2.0, 3.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Forward,
            1.0,
        )
        .unwrap();

        // Delete the middle channel's key behind the session's back
        let (ch, kf) = ids[1];
        host.document_mut()
            .channel_mut(ch)
            .unwrap()
            .remove_keyframe(kf);

        session.apply(&mut host, 2.0);
        let survivors = [ids[0], ids[2]];
        assert_eq!(times(&host, &survivors), vec![1.0, 7.0]);
    }

    #[test]
    fn test_status_line_contents() {
        let (mut doc, _ids) = document([1.0, 2.0, 3.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Forward,
            1.0,
        )
        .unwrap();

        assert_eq!(session.status_line(), "Offset: 0.0 frames | Groups: 3");
        session.apply(&mut host, 2.2);
        assert_eq!(session.status_line(), "Offset: 2.0 frames | Groups: 3");
    }

    #[test]
    fn test_terminal_states_reject_further_writes() {
        let (mut doc, ids) = document([1.0, 2.0, 3.0]);
        let mut host = DocumentHost::new(&mut doc);
        let mut session = DragSession::begin(
            &host,
            GroupingChoice::Fixed(GroupingMode::PerChannel),
            OrderingMode::OutlinerOrder,
            GroupArrangement::Forward,
            1.0,
        )
        .unwrap();

        session.apply(&mut host, 1.0);
        session.commit();
        assert_eq!(session.status(), SessionStatus::Committed);

        session.apply(&mut host, 9.0);
        session.cancel(&mut host);
        assert_eq!(session.status(), SessionStatus::Committed);
        assert_eq!(times(&host, &ids), vec![1.0, 3.0, 5.0]);
    }
}
