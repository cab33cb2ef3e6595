// SPDX-License-Identifier: MIT OR Apache-2.0
//! Stagger offset math.
//!
//! All functions here are pure: identical inputs always yield identical
//! output, so the preview status line and the applied offsets can never
//! disagree. No clamping to scene bounds happens here; that is a host
//! concern.

/// Default drag distance, in pixels, that maps to one frame
pub const DEFAULT_PIXELS_PER_FRAME: f32 = 10.0;

/// Quantize a raw drag delta to the nearest multiple of `base_unit`,
/// rounding half away from zero. A non-positive unit yields 0.
pub fn quantize(delta: f32, base_unit: f32) -> f32 {
    if base_unit <= 0.0 {
        return 0.0;
    }
    (delta / base_unit).round() * base_unit
}

/// Time offset for one group: the quantized drag delta scaled linearly
/// by the group's stagger index. Group 0 is always unshifted.
pub fn offset_for(group_index: usize, delta: f32, base_unit: f32) -> f32 {
    group_index as f32 * quantize(delta, base_unit)
}

/// Convert a pixel-space drag distance to frames.
///
/// Hosts that deliver deltas in view/time units skip this; hosts with
/// raw pointer deltas route through it so the pixel-to-unit ratio stays
/// a single swappable function.
pub fn pixels_to_frames(pixels: f32, pixels_per_frame: f32) -> f32 {
    if pixels_per_frame <= 0.0 {
        return 0.0;
    }
    pixels / pixels_per_frame
}
