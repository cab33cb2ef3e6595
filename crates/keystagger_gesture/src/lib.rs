// SPDX-License-Identifier: MIT OR Apache-2.0
//! Staggered keyframe offset gesture for KeyStagger.
//!
//! Given the selected keyframes of an animation timeline, a drag
//! gesture shifts channel groups by increasing multiples of a base time
//! offset, producing a stair-step pattern.
//!
//! ## Architecture
//!
//! Three pieces compose the gesture loop:
//! - Selection grouping ([`group`]): partition the selection into
//!   ordered groups; a group's index is its stagger multiplier
//! - Offset math ([`offset`]): pure quantize-and-scale functions
//! - The session and controller ([`session`], [`controller`]): a state
//!   machine fed discrete input events, applying offsets through the
//!   [`host::StaggerHost`] trait
//!
//! The host application delivers selected-key snapshots, modifier
//! state, and drag deltas, and receives key-time writes, an undo-step
//! boundary per gesture, and a status line.

pub mod config;
pub mod controller;
pub mod group;
pub mod host;
pub mod offset;
pub mod session;

pub use config::StaggerConfig;
pub use controller::{GestureController, GestureEvent, GestureOutcome, Modifiers};
pub use group::{
    arrange_groups, group_selection, group_selection_auto, Group, GroupArrangement, GroupKey,
    GroupingMode, OrderingMode,
};
pub use host::{DocumentHost, KeyHandle, StaggerHost};
pub use offset::{offset_for, pixels_to_frames, quantize, DEFAULT_PIXELS_PER_FRAME};
pub use session::{DragSession, GroupingChoice, SessionError, SessionStatus};
