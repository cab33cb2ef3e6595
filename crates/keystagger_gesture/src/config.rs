// SPDX-License-Identifier: MIT OR Apache-2.0
//! Gesture configuration.

use crate::group::{GroupArrangement, OrderingMode};
use crate::offset::DEFAULT_PIXELS_PER_FRAME;
use serde::{Deserialize, Serialize};

/// Configuration consumed at gesture start.
///
/// The host loads this once per session and passes it in explicitly;
/// the gesture core never reads ambient preference state. The first
/// three fields mirror the host's persisted preferences, the rest are
/// the drag tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaggerConfig {
    /// Default group ordering when no modifier overrides it
    pub default_ordering: OrderingMode,
    /// Arrangement of the ordered groups along the stair; a random
    /// arrangement carries its shuffle seed here
    pub arrangement: GroupArrangement,
    /// Detect the grouping unit from channel-header selection
    pub auto_grouping: bool,
    /// Quantization step in frames (1.0 = whole frames)
    pub base_unit: f32,
    /// Drag scale applied to pixel-space move events
    pub pixels_per_frame: f32,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            default_ordering: OrderingMode::OutlinerOrder,
            arrangement: GroupArrangement::Forward,
            auto_grouping: true,
            base_unit: 1.0,
            pixels_per_frame: DEFAULT_PIXELS_PER_FRAME,
        }
    }
}
