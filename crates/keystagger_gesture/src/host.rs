// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host interface for the stagger gesture.
//!
//! The gesture core never touches host data directly: it reads a
//! snapshot of selected keyframe handles at gesture start and writes new
//! key times back through [`StaggerHost`]. The host also provides the
//! per-gesture undo boundary and a sink for the status line.

use keystagger_timeline::{ChannelId, Document, KeyframeId, OwnerId};

/// Snapshot descriptor of one selected keyframe.
///
/// `time` is the original time captured at gesture start; it is never
/// updated during the gesture, so every applied offset is computed
/// relative to the same starting state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyHandle {
    /// The keyframe being moved
    pub keyframe: KeyframeId,
    /// Channel the keyframe lives on
    pub channel: ChannelId,
    /// Entity the channel belongs to
    pub owner: OwnerId,
    /// Channel's stable position in the host's hierarchical listing
    pub outliner_index: u32,
    /// Original time in frames
    pub time: f32,
    /// Whether the channel's header is selected as a whole
    pub header_selected: bool,
}

/// The host application, as seen by the gesture core
pub trait StaggerHost {
    /// Enumerate the currently selected keyframes
    fn selected_keys(&self) -> Vec<KeyHandle>;

    /// Set a keyframe's time. Returns `false` when the handle no longer
    /// exists in the host, in which case the write is skipped and the
    /// gesture continues.
    fn set_key_time(&mut self, channel: ChannelId, keyframe: KeyframeId, time: f32) -> bool;

    /// Open the undo step that will span the whole gesture
    fn begin_undo_step(&mut self, label: &str);

    /// Make the open undo step permanent
    fn commit_undo_step(&mut self);

    /// Drop the open undo step without recording it
    fn discard_undo_step(&mut self);

    /// Display a short status line while the gesture is live
    fn show_status(&mut self, text: &str);

    /// Remove the status line
    fn clear_status(&mut self);
}

/// Reference host over an in-memory [`Document`].
///
/// Undo steps and status strings are recorded rather than acted on, so
/// tests can observe the gesture's side effects on the host boundary.
#[derive(Debug)]
pub struct DocumentHost<'a> {
    document: &'a mut Document,
    open_step: Option<String>,
    /// Labels of committed undo steps, in order
    pub committed_steps: Vec<String>,
    /// Labels of discarded undo steps, in order
    pub discarded_steps: Vec<String>,
    /// Currently displayed status line, if any
    pub status: Option<String>,
}

impl<'a> DocumentHost<'a> {
    /// Wrap a document
    pub fn new(document: &'a mut Document) -> Self {
        Self {
            document,
            open_step: None,
            committed_steps: Vec::new(),
            discarded_steps: Vec::new(),
            status: None,
        }
    }

    /// Access the wrapped document
    pub fn document(&self) -> &Document {
        self.document
    }

    /// Mutable access to the wrapped document
    pub fn document_mut(&mut self) -> &mut Document {
        self.document
    }
}

impl StaggerHost for DocumentHost<'_> {
    fn selected_keys(&self) -> Vec<KeyHandle> {
        let mut handles = Vec::new();
        for channel in self.document.channels() {
            for kf in channel.selected_keyframes() {
                handles.push(KeyHandle {
                    keyframe: kf.id,
                    channel: channel.id,
                    owner: channel.owner,
                    outliner_index: channel.outliner_index,
                    time: kf.time,
                    header_selected: channel.header_selected,
                });
            }
        }
        handles
    }

    fn set_key_time(&mut self, channel: ChannelId, keyframe: KeyframeId, time: f32) -> bool {
        let Some(channel) = self.document.channel_mut(channel) else {
            return false;
        };
        channel.move_keyframe(keyframe, time)
    }

    fn begin_undo_step(&mut self, label: &str) {
        self.open_step = Some(label.to_string());
    }

    fn commit_undo_step(&mut self) {
        if let Some(label) = self.open_step.take() {
            self.committed_steps.push(label);
        }
    }

    fn discard_undo_step(&mut self) {
        if let Some(label) = self.open_step.take() {
            self.discarded_steps.push(label);
        }
    }

    fn show_status(&mut self, text: &str) {
        self.status = Some(text.to_string());
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystagger_timeline::{Channel, Keyframe, Owner};

    fn sample_document() -> Document {
        let mut doc = Document::new("Host test");
        let owner = doc.add_owner(Owner::object("Cube"));
        let mut ch = Channel::new("location", 0, owner).with_outliner_index(3);
        ch.add_keyframe(Keyframe::new(1.0, 0.0).selected());
        ch.add_keyframe(Keyframe::new(8.0, 0.0));
        doc.add_channel(ch);
        doc
    }

    #[test]
    fn test_selected_keys_exposes_channel_context() {
        let mut doc = sample_document();
        let host = DocumentHost::new(&mut doc);

        let handles = host.selected_keys();
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].time, 1.0);
        assert_eq!(handles[0].outliner_index, 3);
        assert!(!handles[0].header_selected);
    }

    #[test]
    fn test_set_key_time_reports_missing_handles() {
        let mut doc = sample_document();
        let handle = DocumentHost::new(&mut doc).selected_keys()[0];

        let mut host = DocumentHost::new(&mut doc);
        assert!(host.set_key_time(handle.channel, handle.keyframe, 4.0));
        assert!(!host.set_key_time(handle.channel, KeyframeId::new(), 4.0));
        assert!(!host.set_key_time(ChannelId::new(), handle.keyframe, 4.0));
    }

    #[test]
    fn test_undo_step_bookkeeping() {
        let mut doc = sample_document();
        let mut host = DocumentHost::new(&mut doc);

        host.begin_undo_step("Stagger Keys");
        host.commit_undo_step();
        host.begin_undo_step("Stagger Keys");
        host.discard_undo_step();
        // Commit without an open step is a no-op
        host.commit_undo_step();

        assert_eq!(host.committed_steps, vec!["Stagger Keys"]);
        assert_eq!(host.discarded_steps, vec!["Stagger Keys"]);
    }
}
