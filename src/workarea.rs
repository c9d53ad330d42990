// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// ── Work Area ───────────────────────────────────────
// Nutzbares Desktop-Rechteck: einmal sichern, auf Vollbild erweitern,
// zurückschreiben. Nur aufrufen wenn `Targets::layout_safe()`.

use std::sync::{Arc, OnceLock};
use tracing::{debug, info};
use crate::shell::{Desktop, Rect};

pub struct WorkAreaManager<D: Desktop> {
    desktop: Arc<D>,
    snapshot: OnceLock<Rect>,
}

impl<D: Desktop> WorkAreaManager<D> {
    pub fn new(desktop: Arc<D>) -> Self {
        WorkAreaManager { desktop, snapshot: OnceLock::new() }
    }

    pub fn snapshot(&self) -> Option<Rect> {
        self.snapshot.get().copied()
    }

    /// Captures the current work area once. Later calls keep the first
    /// capture, which is the pre-launch rectangle, never an expanded one.
    pub fn save_current(&self) {
        if self.snapshot.get().is_some() { return; }
        match self.desktop.work_area() {
            Ok(r) => {
                let _ = self.snapshot.set(r);
                info!("work area saved: {:?}", r);
            }
            Err(e) => debug!("work area: {}", e),
        }
    }

    /// No-op without a snapshot: an expansion nothing can undo would
    /// outlive the process.
    pub fn expand_to_full_screen(&self) {
        if self.snapshot().is_none() {
            debug!("work area: no snapshot, not expanding");
            return;
        }
        let full = self.desktop.screen_bounds();
        self.apply(full);
    }

    /// No-op without a snapshot.
    pub fn restore_saved(&self) {
        if let Some(r) = self.snapshot() {
            self.apply(r);
        }
    }

    fn apply(&self, r: Rect) {
        match self.desktop.set_work_area(r) {
            Ok(()) => self.desktop.broadcast_work_area_change(),
            Err(e) => debug!("work area {:?}: {}", r, e),
        }
    }
}
