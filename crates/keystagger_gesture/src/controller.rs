// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interactive gesture state machine.
//!
//! The controller is host-agnostic: the host's input dispatch feeds it
//! discrete [`GestureEvent`]s on the thread that owns the animation
//! data, and every event is fully applied before `handle_event`
//! returns. Nothing is remembered across gestures.

use crate::config::StaggerConfig;
use crate::group::{GroupingMode, OrderingMode};
use crate::host::StaggerHost;
use crate::offset::pixels_to_frames;
use crate::session::{DragSession, GroupingChoice, SessionError};

/// Label for the undo step spanning one gesture
const UNDO_LABEL: &str = "Stagger Keys";

/// Modifier-key state resolved by the host at gesture start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Swap the grouping unit (per channel vs per owner)
    pub invert_grouping: bool,
    /// Order groups by earliest selected key time instead of the
    /// configured default
    pub use_time_order: bool,
}

/// One discrete input event, delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Drag started with the trigger modifier held
    Begin {
        /// Modifier state at the moment the drag began
        modifiers: Modifiers,
    },
    /// Pointer moved; cumulative drag delta since gesture start, in
    /// frames
    Move {
        /// Cumulative drag delta in frames
        delta: f32,
    },
    /// Pointer moved, reported in raw screen pixels; converted to
    /// frames through [`StaggerConfig::pixels_per_frame`]
    MovePixels {
        /// Cumulative drag delta in pixels
        pixels: f32,
    },
    /// Scroll input nudging the shuffle seed of a random stair; the
    /// current step is re-applied over the new arrangement
    AdjustSeed {
        /// Signed seed increment, one per scroll notch
        delta: i64,
    },
    /// Gesture-end input: the applied times become permanent
    Finish,
    /// Explicit cancel: all keys return to their snapshot times
    Cancel,
}

/// What a delivered event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Event did not apply in the current state (or the selection was
    /// empty at Begin)
    Ignored,
    /// A session started
    Started {
        /// Number of groups in the stair
        groups: usize,
    },
    /// Offsets were recomputed
    Updated {
        /// The quantized per-group step, in frames
        step: f32,
    },
    /// Gesture committed; times are permanent
    Committed,
    /// Gesture cancelled; snapshot restored
    Cancelled,
}

enum ControllerState {
    Idle,
    Active(DragSession),
}

/// Owns the interactive stagger session
pub struct GestureController {
    config: StaggerConfig,
    state: ControllerState,
}

impl GestureController {
    /// Create a controller with the given configuration
    pub fn new(config: StaggerConfig) -> Self {
        Self {
            config,
            state: ControllerState::Idle,
        }
    }

    /// Whether a gesture is currently live
    pub fn is_active(&self) -> bool {
        matches!(self.state, ControllerState::Active(_))
    }

    /// The active session, if any
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            ControllerState::Idle => None,
            ControllerState::Active(session) => Some(session),
        }
    }

    /// Feed one input event through the state machine
    pub fn handle_event<H: StaggerHost>(
        &mut self,
        host: &mut H,
        event: GestureEvent,
    ) -> GestureOutcome {
        if let GestureEvent::Begin { modifiers } = event {
            return if self.is_active() {
                GestureOutcome::Ignored
            } else {
                self.begin(host, modifiers)
            };
        }

        let ControllerState::Active(session) = &mut self.state else {
            return GestureOutcome::Ignored;
        };
        match event {
            GestureEvent::Move { delta } => {
                let step = session.apply(host, delta);
                let status = session.status_line();
                host.show_status(&status);
                GestureOutcome::Updated { step }
            }
            GestureEvent::MovePixels { pixels } => {
                let delta = pixels_to_frames(pixels, self.config.pixels_per_frame);
                let step = session.apply(host, delta);
                let status = session.status_line();
                host.show_status(&status);
                GestureOutcome::Updated { step }
            }
            GestureEvent::AdjustSeed { delta } => {
                let Some(seed) = session.seed() else {
                    return GestureOutcome::Ignored;
                };
                match session.reseed(host, seed.wrapping_add_signed(delta)) {
                    Some(step) => {
                        let status = session.status_line();
                        host.show_status(&status);
                        GestureOutcome::Updated { step }
                    }
                    None => GestureOutcome::Ignored,
                }
            }
            GestureEvent::Finish => {
                session.commit();
                host.commit_undo_step();
                host.clear_status();
                self.state = ControllerState::Idle;
                GestureOutcome::Committed
            }
            GestureEvent::Cancel => {
                session.cancel(host);
                host.discard_undo_step();
                host.clear_status();
                self.state = ControllerState::Idle;
                GestureOutcome::Cancelled
            }
            GestureEvent::Begin { .. } => GestureOutcome::Ignored,
        }
    }

    fn begin<H: StaggerHost>(&mut self, host: &mut H, modifiers: Modifiers) -> GestureOutcome {
        let grouping = self.resolve_grouping(modifiers);
        let ordering = self.resolve_ordering(modifiers);

        let mut session = match DragSession::begin(
            host,
            grouping,
            ordering,
            self.config.arrangement,
            self.config.base_unit,
        ) {
            Ok(session) => session,
            Err(SessionError::EmptySelection) => {
                tracing::debug!("stagger gesture ignored: nothing selected");
                return GestureOutcome::Ignored;
            }
        };

        host.begin_undo_step(UNDO_LABEL);
        // Anchor at zero delta so the status line is live before the
        // first move arrives
        session.apply(host, 0.0);
        let status = session.status_line();
        host.show_status(&status);
        let groups = session.group_count();
        self.state = ControllerState::Active(session);
        GestureOutcome::Started { groups }
    }

    /// Ordering: the time-order modifier forces earliest-time ordering,
    /// otherwise the configured default applies
    fn resolve_ordering(&self, modifiers: Modifiers) -> OrderingMode {
        if modifiers.use_time_order {
            OrderingMode::EarliestTime
        } else {
            self.config.default_ordering
        }
    }

    /// Grouping: auto-detection when enabled, with the invert modifier
    /// applied after detection; otherwise per-channel, inverted by the
    /// modifier
    fn resolve_grouping(&self, modifiers: Modifiers) -> GroupingChoice {
        if self.config.auto_grouping {
            GroupingChoice::Auto {
                invert: modifiers.invert_grouping,
            }
        } else {
            let mut mode = GroupingMode::PerChannel;
            if modifiers.invert_grouping {
                mode = mode.inverted();
            }
            GroupingChoice::Fixed(mode)
        }
    }
}
