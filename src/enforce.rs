// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// ── Enforcement-Thread ──────────────────────────────
// Explorer zeigt seine Leiste von selbst wieder an (Monitorwechsel,
// Auflösungswechsel, interne Timer). Dieser Thread drückt sie wieder weg.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};
use crate::driver::VisibilityDriver;
use crate::shell::{Desktop, Surface};
use crate::state::VisibilityState;

/// One enforcement tick. Returns how many bars had to be re-hidden.
/// Reads the shared flags only, never writes them.
pub fn enforce_once<D: Desktop>(
    state: &VisibilityState,
    driver: &VisibilityDriver<D>,
    surfaces: &[Surface],
) -> usize {
    if !state.desired_hidden() || state.temporarily_visible() {
        return 0;
    }
    let mut rehidden = 0;
    for &s in surfaces {
        if driver.desktop().is_visible(s) {
            driver.force_hide_one(s);
            rehidden += 1;
        }
    }
    rehidden
}

pub struct Enforcer {
    handle: Option<JoinHandle<()>>,
}

impl Enforcer {
    pub fn spawn<D: Desktop + 'static>(
        state: Arc<VisibilityState>,
        driver: VisibilityDriver<D>,
        surfaces: Vec<Surface>,
        interval: Duration,
    ) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name("enforcer".into())
            .spawn(move || {
                info!("enforcer: START ({} bars, every {:?})", surfaces.len(), interval);
                while !state.exit_requested() {
                    let n = enforce_once(&state, &driver, &surfaces);
                    if n > 0 {
                        debug!("enforcer: re-hid {} bar(s)", n);
                    }
                    thread::sleep(interval);
                }
                info!("enforcer: STOP");
            })?;
        Ok(Enforcer { handle: Some(handle) })
    }

    /// Waits for the current tick to finish. `exit_requested` must already
    /// be set, otherwise this blocks forever.
    pub fn join(&mut self) {
        if let Some(h) = self.handle.take() {
            if h.join().is_err() {
                debug!("enforcer: thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::TrayClass;
    use crate::testing::{quick_timing, FakeDesktop};
    use std::time::Instant;

    fn setup() -> (Arc<FakeDesktop>, VisibilityDriver<FakeDesktop>, Surface) {
        let d = Arc::new(FakeDesktop::new());
        let bar = d.add_bar(TrayClass::Primary, Some("explorer.exe"));
        (d.clone(), VisibilityDriver::new(d, &quick_timing()), bar)
    }

    #[test]
    fn rehides_only_when_desired_hidden() {
        let (d, drv, bar) = setup();
        let st = VisibilityState::new();
        assert_eq!(enforce_once(&st, &drv, &[bar]), 1);
        assert!(!d.window(bar).visible);
        assert_eq!(enforce_once(&st, &drv, &[bar]), 0);

        d.set_visible(bar, true);
        st.set_desired_hidden(false);
        assert_eq!(enforce_once(&st, &drv, &[bar]), 0);
        assert!(d.window(bar).visible);
    }

    #[test]
    fn leaves_revealed_bars_alone() {
        let (d, drv, bar) = setup();
        let st = VisibilityState::new();
        st.set_temporarily_visible(true);
        assert_eq!(enforce_once(&st, &drv, &[bar]), 0);
        assert!(d.window(bar).visible);
    }

    #[test]
    fn thread_fights_back_and_stops_on_exit() {
        let (d, drv, bar) = setup();
        let st = Arc::new(VisibilityState::new());
        let mut enf = Enforcer::spawn(st.clone(), drv, vec![bar], Duration::from_millis(2))
            .expect("spawn");

        let start = Instant::now();
        while d.window(bar).visible && start.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(!d.window(bar).visible);

        // Explorer zeigt die Leiste erneut
        d.set_visible(bar, true);
        let start = Instant::now();
        while d.window(bar).visible && start.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(!d.window(bar).visible);

        st.request_exit();
        enf.join();
        d.set_visible(bar, true);
        thread::sleep(Duration::from_millis(10));
        assert!(d.window(bar).visible);
    }
}
