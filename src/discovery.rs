// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// ── Taskbar-Erkennung ───────────────────────────────
// Explorer-eigene Leisten vs. fremde (YASB, StartAllBack, ...) trennen.

use tracing::{debug, info};
use crate::shell::{Desktop, Surface, TrayClass};

const SHELL_EXE: &str = "explorer.exe";

/// Known taskbar replacements. Exact, case-insensitive name match.
pub const TASKBAR_MANAGERS: [&str; 7] = [
    "yasb.exe", "taskbarx.exe", "explorerpatcher.exe", "startallback.exe",
    "translucent-tb.exe", "rainmeter.exe", "displayfusion.exe",
];

/// What discovery found at startup. Never refreshed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    /// Bars owned by Explorer: the ones we hide.
    pub owned: Vec<Surface>,
    /// Bars of the tray classes owned by some other process. Never touched.
    pub foreign: Vec<Surface>,
    /// Appbar messages go here: the first Explorer bar, or the first
    /// `Shell_TrayWnd` when Explorer owns none.
    pub primary: Option<Surface>,
    pub third_party_running: bool,
}

impl Targets {
    /// Work area may only be expanded/restored when no other tool manages
    /// layout; two managers would fight over the rectangle.
    pub fn layout_safe(&self) -> bool {
        !self.third_party_running && self.foreign.is_empty()
    }
}

pub fn discover(desktop: &dyn Desktop) -> Targets {
    let mut t = Targets {
        third_party_running: manager_running(desktop.process_names().as_slice()),
        ..Targets::default()
    };
    let mut first_tray = None;
    for class in TrayClass::ALL {
        for hwnd in desktop.find_taskbars(class) {
            if t.owned.contains(&hwnd) || t.foreign.contains(&hwnd) { continue; }
            if class == TrayClass::Primary && first_tray.is_none() {
                first_tray = Some(hwnd);
            }
            let image = desktop.owner_image(hwnd);
            match image.as_deref() {
                Some(path) if is_shell_image(path) => t.owned.push(hwnd),
                _ => {
                    debug!("discover: 0x{:X} ({}) owned by {:?}", hwnd.0, class.class_name(), image);
                    t.foreign.push(hwnd);
                }
            }
        }
    }
    t.primary = t.owned.first().copied().or(first_tray);
    info!(
        "discover: {} explorer bars, {} foreign bars, managers running={}",
        t.owned.len(), t.foreign.len(), t.third_party_running
    );
    t
}

/// True iff the last path segment is the shell executable. Accepts both
/// separators, ignores case.
pub fn is_shell_image(path: &str) -> bool {
    let file = path.rsplit(['\\', '/']).next().unwrap_or("");
    file.to_lowercase() == SHELL_EXE
}

pub fn manager_running<S: AsRef<str>>(names: &[S]) -> bool {
    names.iter().any(|n| {
        let n = n.as_ref().to_lowercase();
        TASKBAR_MANAGERS.iter().any(|m| *m == n)
    })
}
