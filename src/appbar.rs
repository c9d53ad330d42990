// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// ── AppBar State ────────────────────────────────────
// ABM_SETSTATE auf der primären Leiste, beim Beenden alten Wert zurück.

use tracing::{debug, info};
use crate::shell::{Desktop, Surface};

pub const ABS_AUTOHIDE: u32 = 0x0000_0001;

/// Remembers the appbar state found at startup so shutdown can write back
/// exactly that value.
#[derive(Debug, Default)]
pub struct AppbarGuard {
    engaged: Option<(Surface, u32)>,
}

impl AppbarGuard {
    pub fn engage(desktop: &dyn Desktop, primary: Option<Surface>) -> Self {
        let Some(bar) = primary else {
            debug!("appbar: no primary bar");
            return AppbarGuard::default();
        };
        let previous = desktop.appbar_state(bar);
        if let Err(e) = desktop.set_appbar_state(bar, ABS_AUTOHIDE) {
            debug!("appbar: {}", e);
        }
        info!("appbar: auto-hide requested (was 0x{:X})", previous);
        AppbarGuard { engaged: Some((bar, previous)) }
    }

    /// Reverts once; later calls do nothing.
    pub fn release(&mut self, desktop: &dyn Desktop) {
        if let Some((bar, previous)) = self.engaged.take() {
            if let Err(e) = desktop.set_appbar_state(bar, previous) {
                debug!("appbar revert: {}", e);
            }
            info!("appbar: state 0x{:X} restored", previous);
        }
    }
}
