// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// Hides the Explorer taskbar. Win shows it for 10 seconds (Win again hides it
// at once), Alt+` exits and puts everything back.

#![windows_subsystem = "windows"]
#![cfg_attr(not(windows), allow(dead_code))]

mod appbar;
mod coordinator;
mod discovery;
mod driver;
mod enforce;
mod error;
mod logging;
mod shell;
mod state;
mod workarea;
#[cfg(windows)]
mod win32;
#[cfg(test)]
mod testing;

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use std::sync::Arc;
    use tracing::{error, info, warn};
    use crate::coordinator::Coordinator;
    use crate::state::Timing;
    use crate::win32::{InstanceLock, Win32Desktop, Win32Keyboard};

    // Ohne Log-Datei weiterlaufen, es gibt ohnehin keine Konsole
    let _log_guard = logging::init().ok();

    // ── Single-Instance Guard ───────────────────────
    let _instance = match InstanceLock::acquire() {
        Ok(Some(lock)) => Some(lock),
        Ok(None) => {
            info!("another instance is running, exiting");
            return Ok(());
        }
        Err(e) => {
            warn!("instance lock unavailable: {}", e);
            None
        }
    };

    info!("=== TaskbarHider START ===");
    let coordinator = match Coordinator::start(Arc::new(Win32Desktop), Win32Keyboard, Timing::default()) {
        Ok(c) => c,
        Err(e) => {
            error!("startup failed: {:#}", e);
            return Err(e);
        }
    };
    coordinator.run();
    info!("=== TaskbarHider EXIT ===");
    Ok(())
}

#[cfg(not(windows))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("taskbar-hider drives the Windows Explorer shell and only runs on Windows")
}
