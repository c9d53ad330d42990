// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Boundary zur Shell: the two traits the core is written against, plus the
//! plain value types that cross them. The Win32 backend lives in `win32.rs`.

use std::sync::Arc;
use crate::error::ShellResult;

/// Opaque handle of one taskbar window (an `HWND` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Surface(pub isize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect { left, top, right, bottom }
    }

    pub const fn at(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { left: x, top: y, right: x + w, bottom: y + h }
    }

    pub fn width(&self) -> i32 { self.right - self.left }
    pub fn height(&self) -> i32 { self.bottom - self.top }
}

/// The two taskbar window classes Explorer creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayClass {
    /// `Shell_TrayWnd`, the bar on the primary monitor.
    Primary,
    /// `Shell_SecondaryTrayWnd`, one per additional monitor.
    Secondary,
}

impl TrayClass {
    pub const ALL: [TrayClass; 2] = [TrayClass::Primary, TrayClass::Secondary];

    pub fn class_name(self) -> &'static str {
        match self {
            TrayClass::Primary => "Shell_TrayWnd",
            TrayClass::Secondary => "Shell_SecondaryTrayWnd",
        }
    }
}

/// Window, work-area, appbar and process queries. Every mutation is
/// best-effort: an `Err` is logged by the caller and otherwise ignored.
pub trait Desktop: Send + Sync {
    /// All top-level windows of `class`, in z-order.
    fn find_taskbars(&self, class: TrayClass) -> Vec<Surface>;
    /// Full image path of the process owning `surface`, if it can be queried.
    fn owner_image(&self, surface: Surface) -> Option<String>;
    /// Executable names of all running processes.
    fn process_names(&self) -> Vec<String>;

    fn is_visible(&self, surface: Surface) -> bool;
    /// Show without activating, focus stays where the user left it.
    fn show_no_activate(&self, surface: Surface) -> ShellResult<()>;
    fn hide(&self, surface: Surface) -> ShellResult<()>;
    /// Move/resize without touching z-order or activation.
    fn place(&self, surface: Surface, rect: Rect) -> ShellResult<()>;

    fn work_area(&self) -> ShellResult<Rect>;
    fn set_work_area(&self, rect: Rect) -> ShellResult<()>;
    fn screen_bounds(&self) -> Rect;
    /// Tell every top-level window the work area changed.
    fn broadcast_work_area_change(&self);

    fn appbar_state(&self, surface: Surface) -> u32;
    fn set_appbar_state(&self, surface: Surface, state: u32) -> ShellResult<()>;
}

/// Physical key state of the three watched keys at one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Keys {
    /// Alt
    pub exit_modifier: bool,
    /// Backtick (`VK_OEM_3`)
    pub exit_key: bool,
    /// Left or right Win
    pub reveal: bool,
}

impl Keys {
    pub fn exit_combo(&self) -> bool {
        self.exit_modifier && self.exit_key
    }
}

pub trait Keyboard {
    fn poll(&self) -> Keys;
    /// Escape pulse, closes the Start menu a Win press may have opened.
    fn dismiss_start_menu(&self);
}

impl<K: Keyboard + ?Sized> Keyboard for Arc<K> {
    fn poll(&self) -> Keys { (**self).poll() }
    fn dismiss_start_menu(&self) { (**self).dismiss_start_menu() }
}
