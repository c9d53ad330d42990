// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// ── Sichtbarkeit ────────────────────────────────────
// Show/Hide der Explorer-Leisten. Alles idempotent, Fehler werden nur geloggt.

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;
use crate::error::ShellResult;
use crate::shell::{Desktop, Rect, Surface};
use crate::state::Timing;

/// Off-screen 1x1 parking spot. Layout code that assumes the bar sits at its
/// usual position finds nothing there.
pub const PARK_RECT: Rect = Rect::at(-10000, -10000, 1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideMode {
    /// Show→hide pulse before the force-hide. Explorer sometimes ignores a
    /// plain hide on a bar that was never fully realized this session.
    Pulse,
    /// Force-hide only. Used right after a reveal, where a pulse would flash.
    Direct,
}

pub struct VisibilityDriver<D: Desktop> {
    desktop: Arc<D>,
    pulse_pause: Duration,
    pulse_count: u32,
}

impl<D: Desktop> Clone for VisibilityDriver<D> {
    fn clone(&self) -> Self {
        VisibilityDriver {
            desktop: Arc::clone(&self.desktop),
            pulse_pause: self.pulse_pause,
            pulse_count: self.pulse_count,
        }
    }
}

impl<D: Desktop> VisibilityDriver<D> {
    pub fn new(desktop: Arc<D>, timing: &Timing) -> Self {
        VisibilityDriver {
            desktop,
            pulse_pause: timing.pulse_pause,
            pulse_count: timing.pulse_count,
        }
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// Hide and park off-screen. Safe to repeat on an already hidden bar.
    pub fn force_hide_one(&self, s: Surface) {
        check(self.desktop.hide(s), "hide", s);
        check(self.desktop.place(s, PARK_RECT), "park", s);
    }

    pub fn hide(&self, surfaces: &[Surface], mode: HideMode) {
        for &s in surfaces {
            if mode == HideMode::Pulse {
                for _ in 0..self.pulse_count {
                    check(self.desktop.show_no_activate(s), "pulse show", s);
                    thread::sleep(self.pulse_pause);
                    check(self.desktop.hide(s), "pulse hide", s);
                    thread::sleep(self.pulse_pause);
                }
            }
            self.force_hide_one(s);
        }
    }

    pub fn show(&self, surfaces: &[Surface]) {
        for &s in surfaces {
            check(self.desktop.show_no_activate(s), "show", s);
        }
    }
}

fn check(r: ShellResult<()>, what: &str, s: Surface) {
    if let Err(e) = r {
        debug!("{} 0x{:X}: {}", what, s.0, e);
    }
}
