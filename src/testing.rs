// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory `Desktop`/`Keyboard` for the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};
use std::sync::Mutex;
use std::time::Duration;
use crate::error::{ShellError, ShellResult};
use crate::shell::{Desktop, Keyboard, Keys, Rect, Surface, TrayClass};
use crate::state::Timing;

pub const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);
pub const TASKBAR_WORK_AREA: Rect = Rect::new(0, 0, 1920, 1032);
pub const BAR_RECT: Rect = Rect::new(0, 1032, 1920, 1080);
pub const ABS_ALWAYSONTOP: u32 = 0x0000_0002;

/// Default timing without the pulse pauses and with a fast enforcer.
pub fn quick_timing() -> Timing {
    Timing {
        input_poll: Duration::from_millis(1),
        enforce_poll: Duration::from_millis(2),
        pulse_pause: Duration::ZERO,
        ..Timing::default()
    }
}

/// Effective calls, in order. Failed calls are not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Show(Surface),
    Hide(Surface),
    Place(Surface, Rect),
    SetWorkArea(Rect),
    Broadcast,
    SetAppbar(Surface, u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeWindow {
    pub class: TrayClass,
    pub image: Option<String>,
    pub visible: bool,
    pub rect: Rect,
    pub failing: bool,
}

struct Inner {
    windows: Vec<(Surface, FakeWindow)>,
    processes: Vec<String>,
    work_area: Rect,
    work_area_fails: bool,
    work_area_read_fails: bool,
    appbar: u32,
    calls: Vec<Call>,
}

pub struct FakeDesktop {
    inner: Mutex<Inner>,
}

impl FakeDesktop {
    pub fn new() -> Self {
        FakeDesktop {
            inner: Mutex::new(Inner {
                windows: Vec::new(),
                processes: vec!["System".into(), "explorer.exe".into()],
                work_area: TASKBAR_WORK_AREA,
                work_area_fails: false,
                work_area_read_fails: false,
                appbar: ABS_ALWAYSONTOP,
                calls: Vec::new(),
            }),
        }
    }

    pub fn add_bar(&self, class: TrayClass, image: Option<&str>) -> Surface {
        let mut g = self.inner.lock().unwrap();
        let s = Surface(0x1000 + g.windows.len() as isize * 0x10);
        g.windows.push((s, FakeWindow {
            class,
            image: image.map(str::to_string),
            visible: true,
            rect: BAR_RECT,
            failing: false,
        }));
        s
    }

    pub fn set_processes(&self, names: &[&str]) {
        self.inner.lock().unwrap().processes = names.iter().map(|n| n.to_string()).collect();
    }

    pub fn window(&self, s: Surface) -> FakeWindow {
        let g = self.inner.lock().unwrap();
        g.windows.iter().find(|(h, _)| *h == s).map(|(_, w)| w.clone()).expect("unknown surface")
    }

    /// Simulates Explorer changing visibility on its own.
    pub fn set_visible(&self, s: Surface, visible: bool) {
        self.with_window(s, |w| w.visible = visible);
    }

    pub fn fail_window(&self, s: Surface, failing: bool) {
        self.with_window(s, |w| w.failing = failing);
    }

    pub fn fail_work_area(&self, fails: bool) {
        self.inner.lock().unwrap().work_area_fails = fails;
    }

    /// Only `SPI_GETWORKAREA` fails, writes still go through.
    pub fn fail_work_area_read(&self, fails: bool) {
        self.inner.lock().unwrap().work_area_read_fails = fails;
    }

    pub fn current_work_area(&self) -> Rect { self.inner.lock().unwrap().work_area }
    pub fn appbar(&self) -> u32 { self.inner.lock().unwrap().appbar }
    pub fn calls(&self) -> Vec<Call> { self.inner.lock().unwrap().calls.clone() }
    pub fn clear_calls(&self) { self.inner.lock().unwrap().calls.clear(); }

    fn with_window<R>(&self, s: Surface, f: impl FnOnce(&mut FakeWindow) -> R) -> R {
        let mut g = self.inner.lock().unwrap();
        let (_, w) = g.windows.iter_mut().find(|(h, _)| *h == s).expect("unknown surface");
        f(w)
    }

    fn mutate(&self, s: Surface, call: Call, f: impl FnOnce(&mut FakeWindow)) -> ShellResult<()> {
        let mut g = self.inner.lock().unwrap();
        let Some((_, w)) = g.windows.iter_mut().find(|(h, _)| *h == s) else {
            return Err(ShellError::os("fake", "invalid window handle"));
        };
        if w.failing {
            return Err(ShellError::os("fake", "access denied"));
        }
        f(w);
        g.calls.push(call);
        Ok(())
    }
}

impl Desktop for FakeDesktop {
    fn find_taskbars(&self, class: TrayClass) -> Vec<Surface> {
        let g = self.inner.lock().unwrap();
        g.windows.iter().filter(|(_, w)| w.class == class).map(|(s, _)| *s).collect()
    }

    fn owner_image(&self, surface: Surface) -> Option<String> {
        self.window(surface).image
    }

    fn process_names(&self) -> Vec<String> {
        self.inner.lock().unwrap().processes.clone()
    }

    fn is_visible(&self, surface: Surface) -> bool {
        self.window(surface).visible
    }

    fn show_no_activate(&self, surface: Surface) -> ShellResult<()> {
        self.mutate(surface, Call::Show(surface), |w| w.visible = true)
    }

    fn hide(&self, surface: Surface) -> ShellResult<()> {
        self.mutate(surface, Call::Hide(surface), |w| w.visible = false)
    }

    fn place(&self, surface: Surface, rect: Rect) -> ShellResult<()> {
        self.mutate(surface, Call::Place(surface, rect), |w| w.rect = rect)
    }

    fn work_area(&self) -> ShellResult<Rect> {
        let g = self.inner.lock().unwrap();
        if g.work_area_fails || g.work_area_read_fails {
            return Err(ShellError::os("SPI_GETWORKAREA", "fake failure"));
        }
        Ok(g.work_area)
    }

    fn set_work_area(&self, rect: Rect) -> ShellResult<()> {
        let mut g = self.inner.lock().unwrap();
        if g.work_area_fails {
            return Err(ShellError::os("SPI_SETWORKAREA", "fake failure"));
        }
        g.work_area = rect;
        g.calls.push(Call::SetWorkArea(rect));
        Ok(())
    }

    fn screen_bounds(&self) -> Rect { SCREEN }

    fn broadcast_work_area_change(&self) {
        self.inner.lock().unwrap().calls.push(Call::Broadcast);
    }

    fn appbar_state(&self, _surface: Surface) -> u32 {
        self.appbar()
    }

    fn set_appbar_state(&self, surface: Surface, state: u32) -> ShellResult<()> {
        let mut g = self.inner.lock().unwrap();
        g.appbar = state;
        g.calls.push(Call::SetAppbar(surface, state));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeKeyboard {
    keys: Mutex<Keys>,
    escapes: AtomicUsize,
}

impl FakeKeyboard {
    pub fn press(&self, keys: Keys) { *self.keys.lock().unwrap() = keys; }
    pub fn escapes(&self) -> usize { self.escapes.load(SeqCst) }
}

impl Keyboard for FakeKeyboard {
    fn poll(&self) -> Keys { *self.keys.lock().unwrap() }
    fn dismiss_start_menu(&self) { self.escapes.fetch_add(1, SeqCst); }
}
