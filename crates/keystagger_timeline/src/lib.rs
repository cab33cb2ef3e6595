// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory animation timeline model for KeyStagger.
//!
//! This crate provides the data the stagger gesture operates on:
//! - Keyframes with selection flags and relative tangents
//! - Channels (one animated property's curve) with outliner ordering
//! - Owners (objects and bones) that channels belong to
//! - A `Document` aggregating owners and channels
//!
//! The gesture core in `keystagger_gesture` only sees this data through
//! its host trait; the concrete types here double as the reference host
//! used in tests.

pub mod channel;
pub mod document;
pub mod keyframe;
pub mod owner;

pub use channel::{Channel, ChannelId};
pub use document::Document;
pub use keyframe::{Keyframe, KeyframeId};
pub use owner::{Owner, OwnerId, OwnerKind};
