// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// ── Koordinator ─────────────────────────────────────
// Hauptschleife: Tasten pollen, Hidden ⇄ Revealed → Exiting, beim Beenden
// alles zurückstellen.
//
// Store-Reihenfolge pro Übergang ist Absicht: die Flags werden vor den
// Treiber-Aufrufen gesetzt, sonst versteckt der Enforcer eine Leiste, die
// gerade eingeblendet wird.

use std::sync::Arc;
use std::thread;
use std::time::Instant;
use anyhow::Context;
use tracing::{debug, info};
use crate::appbar::AppbarGuard;
use crate::discovery::{discover, Targets};
use crate::driver::{HideMode, VisibilityDriver};
use crate::enforce::Enforcer;
use crate::shell::{Desktop, Keyboard, Keys};
use crate::state::{Timing, VisibilityState};
use crate::workarea::WorkAreaManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Revealed,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Coordinator<D: Desktop + 'static, K: Keyboard> {
    desktop: Arc<D>,
    keyboard: K,
    state: Arc<VisibilityState>,
    targets: Targets,
    driver: VisibilityDriver<D>,
    work_area: WorkAreaManager<D>,
    appbar: AppbarGuard,
    timing: Timing,
    enforcer: Option<Enforcer>,
    exit_latched: bool,
    reveal_latched: bool,
    /// Reveal-key samples before this instant are ignored and not latched.
    quiet_until: Option<Instant>,
    exiting: bool,
    restored: bool,
}

impl<D: Desktop + 'static, K: Keyboard> Coordinator<D, K> {
    /// Discovery, snapshot, appbar, first hide, work area, enforcer. In that
    /// order. If the enforcer cannot start, the shell is restored on drop.
    pub fn start(desktop: Arc<D>, keyboard: K, timing: Timing) -> anyhow::Result<Self> {
        let state = Arc::new(VisibilityState::new());
        let targets = discover(&*desktop);
        let work_area = WorkAreaManager::new(Arc::clone(&desktop));
        work_area.save_current();
        let appbar = AppbarGuard::engage(&*desktop, targets.primary);

        let driver = VisibilityDriver::new(Arc::clone(&desktop), &timing);
        state.set_desired_hidden(true);
        driver.hide(&targets.owned, HideMode::Pulse);
        if targets.layout_safe() {
            work_area.expand_to_full_screen();
        }

        let mut c = Coordinator {
            desktop,
            keyboard,
            state,
            targets,
            driver,
            work_area,
            appbar,
            timing,
            enforcer: None,
            exit_latched: false,
            reveal_latched: false,
            quiet_until: None,
            exiting: false,
            restored: false,
        };
        let enforcer = Enforcer::spawn(
            Arc::clone(&c.state),
            c.driver.clone(),
            c.targets.owned.clone(),
            c.timing.enforce_poll,
        )
        .context("spawning enforcement thread")?;
        c.enforcer = Some(enforcer);
        info!("coordinator: READY");
        Ok(c)
    }

    #[cfg(test)]
    pub fn state(&self) -> &VisibilityState { &self.state }
    #[cfg(test)]
    pub fn targets(&self) -> &Targets { &self.targets }

    pub fn phase(&self) -> Phase {
        if self.exiting || self.state.exit_requested() {
            Phase::Exiting
        } else if self.state.temporarily_visible() {
            Phase::Revealed
        } else {
            Phase::Hidden
        }
    }

    /// Polls until the exit gesture, then restores the shell.
    pub fn run(mut self) {
        loop {
            let keys = self.keyboard.poll();
            if self.tick(Instant::now(), keys) == Flow::Exit {
                break;
            }
            thread::sleep(self.timing.input_poll);
        }
        self.shutdown();
    }

    /// One poll of the state machine. Edges are detected against the
    /// previous call's `keys`.
    pub fn tick(&mut self, now: Instant, keys: Keys) -> Flow {
        if self.exiting {
            return Flow::Exit;
        }

        let before = self.phase();
        let combo = keys.exit_combo();
        if combo && !self.exit_latched {
            self.exiting = true;
            info!("exit gesture: {:?} -> {:?}", before, self.phase());
            return Flow::Exit;
        }
        self.exit_latched = combo;

        match self.quiet_until {
            Some(until) if now < until => {}
            _ => {
                self.quiet_until = None;
                if keys.reveal && !self.reveal_latched {
                    if self.state.temporarily_visible() {
                        self.dismiss_early(now);
                    } else {
                        self.reveal(now);
                    }
                }
                self.reveal_latched = keys.reveal;
            }
        }

        if self.state.temporarily_visible() && self.state.deadline_passed(now) {
            info!("reveal: timeout");
            self.conceal(HideMode::Pulse);
        }

        let after = self.phase();
        if after != before {
            debug!("phase: {:?} -> {:?}", before, after);
        }
        Flow::Continue
    }

    fn reveal(&mut self, now: Instant) {
        self.state.set_temporarily_visible(true);
        self.state.set_desired_hidden(false);
        self.driver.show(&self.targets.owned);
        if self.targets.layout_safe() {
            self.work_area.restore_saved();
        }
        self.state.arm_deadline(now + self.timing.reveal_window);
        self.quiet_until = Some(now + self.timing.reveal_debounce);
        info!("reveal: shown for {:?}", self.timing.reveal_window);
        debug!("reveal: deadline {:?}", self.state.reveal_deadline());
    }

    /// Second press while revealed. The bars were shown moments ago, a pulse
    /// here would be a visible double flash.
    fn dismiss_early(&mut self, now: Instant) {
        info!("reveal: dismissed early");
        self.conceal(HideMode::Direct);
        self.quiet_until = Some(now + self.timing.dismiss_debounce);
    }

    fn conceal(&mut self, mode: HideMode) {
        self.keyboard.dismiss_start_menu();
        self.state.set_desired_hidden(true);
        self.state.set_temporarily_visible(false);
        self.driver.hide(&self.targets.owned, mode);
        if self.targets.layout_safe() {
            self.work_area.expand_to_full_screen();
        }
    }

    /// Stop the enforcer, wait for it, then show everything and put the work
    /// area and appbar state back. Runs at most once.
    pub fn shutdown(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        self.exiting = true;
        self.state.request_exit();
        if let Some(mut enforcer) = self.enforcer.take() {
            enforcer.join();
        }

        self.state.set_desired_hidden(false);
        self.driver.show(&self.targets.owned);
        self.work_area.restore_saved();
        self.appbar.release(&*self.desktop);
        info!("shutdown: shell restored");
    }
}

impl<D: Desktop + 'static, K: Keyboard> Drop for Coordinator<D, K> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
