// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering::SeqCst};
use std::time::{Duration, Instant};

// ── Timing ──────────────────────────────────────────
const INPUT_POLL_MS: u64 = 20;
const ENFORCE_POLL_MS: u64 = 100;
const REVEAL_WINDOW_MS: u64 = 10_000;
const REVEAL_DEBOUNCE_MS: u64 = 120;  // empirisch, gegen Key-Repeat von Win
const DISMISS_DEBOUNCE_MS: u64 = 60;
const PULSE_PAUSE_MS: u64 = 50;
const PULSE_COUNT: u32 = 2;

/// Every interval the two loops run on. The debounce and pulse values were
/// tuned against one Explorer build and may need adjusting elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub input_poll: Duration,
    pub enforce_poll: Duration,
    pub reveal_window: Duration,
    pub reveal_debounce: Duration,
    pub dismiss_debounce: Duration,
    pub pulse_pause: Duration,
    pub pulse_count: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            input_poll: Duration::from_millis(INPUT_POLL_MS),
            enforce_poll: Duration::from_millis(ENFORCE_POLL_MS),
            reveal_window: Duration::from_millis(REVEAL_WINDOW_MS),
            reveal_debounce: Duration::from_millis(REVEAL_DEBOUNCE_MS),
            dismiss_debounce: Duration::from_millis(DISMISS_DEBOUNCE_MS),
            pulse_pause: Duration::from_millis(PULSE_PAUSE_MS),
            pulse_count: PULSE_COUNT,
        }
    }
}

// ── Geteilter State ─────────────────────────────────
/// Flags shared between the coordinator and the enforcement thread.
///
/// Single writer: only the coordinator stores. The enforcement thread only
/// loads `desired_hidden`, `temporarily_visible` and `exit_requested`. Each
/// field is atomic on its own; no transition needs more than that, but the
/// coordinator's store order inside a transition matters (see `coordinator`).
///
/// `temporarily_visible` implies `!desired_hidden` once a transition is done.
#[derive(Debug)]
pub struct VisibilityState {
    desired_hidden: AtomicBool,
    temporarily_visible: AtomicBool,
    deadline_ns: AtomicU64,  // relativ zu `epoch`
    exit_requested: AtomicBool,
    epoch: Instant,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::with_epoch(Instant::now())
    }

    pub fn with_epoch(epoch: Instant) -> Self {
        VisibilityState {
            desired_hidden: AtomicBool::new(true),
            temporarily_visible: AtomicBool::new(false),
            deadline_ns: AtomicU64::new(0),
            exit_requested: AtomicBool::new(false),
            epoch,
        }
    }

    pub fn desired_hidden(&self) -> bool { self.desired_hidden.load(SeqCst) }
    pub fn temporarily_visible(&self) -> bool { self.temporarily_visible.load(SeqCst) }
    pub fn exit_requested(&self) -> bool { self.exit_requested.load(SeqCst) }

    pub fn set_desired_hidden(&self, v: bool) { self.desired_hidden.store(v, SeqCst); }
    pub fn set_temporarily_visible(&self, v: bool) { self.temporarily_visible.store(v, SeqCst); }
    pub fn request_exit(&self) { self.exit_requested.store(true, SeqCst); }

    /// Only meaningful while `temporarily_visible`.
    pub fn reveal_deadline(&self) -> Instant {
        self.epoch + Duration::from_nanos(self.deadline_ns.load(SeqCst))
    }

    pub fn arm_deadline(&self, at: Instant) {
        self.deadline_ns.store(self.offset(at), SeqCst);
    }

    pub fn deadline_passed(&self, now: Instant) -> bool {
        self.offset(now) >= self.deadline_ns.load(SeqCst)
    }

    fn offset(&self, t: Instant) -> u64 {
        t.saturating_duration_since(self.epoch).as_nanos() as u64
    }
}

impl Default for VisibilityState {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden_not_revealed() {
        let st = VisibilityState::new();
        assert!(st.desired_hidden());
        assert!(!st.temporarily_visible());
        assert!(!st.exit_requested());
    }

    #[test]
    fn deadline_round_trips_exactly() {
        let epoch = Instant::now();
        let st = VisibilityState::with_epoch(epoch);
        let at = epoch + Duration::from_nanos(1_234_567_891);
        st.arm_deadline(at);
        assert_eq!(st.reveal_deadline(), at);
    }

    #[test]
    fn deadline_passes_at_not_before() {
        let epoch = Instant::now();
        let st = VisibilityState::with_epoch(epoch);
        let at = epoch + Duration::from_secs(10);
        st.arm_deadline(at);
        assert!(!st.deadline_passed(at - Duration::from_nanos(1)));
        assert!(st.deadline_passed(at));
        assert!(st.deadline_passed(at + Duration::from_millis(20)));
    }

    #[test]
    fn default_timing_matches_constants() {
        let t = Timing::default();
        assert_eq!(t.reveal_window, Duration::from_secs(10));
        assert_eq!(t.input_poll, Duration::from_millis(20));
        assert_eq!(t.enforce_poll, Duration::from_millis(100));
        assert_eq!(t.pulse_count, 2);
    }
}
