// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// ── Win32 Backend ───────────────────────────────────
// Alle Shell-Aufrufe. Nur dieses Modul ist unsafe.

use std::ffi::c_void;
use std::mem;
use std::thread;
use std::time::Duration;
use tracing::debug;
use windows::core::{w, PCWSTR, PWSTR};
use windows::Win32::Foundation::{
    CloseHandle, GetLastError, ERROR_ALREADY_EXISTS, FALSE, HANDLE, HWND, LPARAM, RECT, WPARAM,
};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W, TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{
    CreateMutexW, OpenProcess, QueryFullProcessImageNameW,
    PROCESS_NAME_FORMAT, PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::Input::KeyboardAndMouse::*;
use windows::Win32::UI::Shell::{SHAppBarMessage, APPBARDATA};
use windows::Win32::UI::WindowsAndMessaging::*;
use crate::error::{ShellError, ShellResult};
use crate::shell::{Desktop, Keyboard, Keys, Rect, Surface, TrayClass};

const ABM_GETSTATE: u32 = 0x0000_0004;
const ABM_SETSTATE: u32 = 0x0000_000A;
const SPIF_PERSIST: SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS =
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0x0001 | 0x0002);  // UPDATEINIFILE | SENDCHANGE
const BROADCAST_TIMEOUT_MS: u32 = 1000;
const ESCAPE_HOLD: Duration = Duration::from_millis(20);
const IMAGE_PATH_MAX: usize = 1024;

fn hwnd(s: Surface) -> HWND { HWND(s.0 as *mut c_void) }

fn class_name(class: TrayClass) -> PCWSTR {
    match class {
        TrayClass::Primary => w!("Shell_TrayWnd"),
        TrayClass::Secondary => w!("Shell_SecondaryTrayWnd"),
    }
}

fn to_rect(r: Rect) -> RECT {
    RECT { left: r.left, top: r.top, right: r.right, bottom: r.bottom }
}

fn appbar_data(s: Surface) -> APPBARDATA {
    APPBARDATA {
        cbSize: mem::size_of::<APPBARDATA>() as u32,
        hWnd: hwnd(s),
        ..Default::default()
    }
}

pub struct Win32Desktop;

impl Desktop for Win32Desktop {
    fn find_taskbars(&self, class: TrayClass) -> Vec<Surface> {
        let cls = class_name(class);
        let mut found = Vec::new();
        let mut prev = HWND::default();
        loop {
            match unsafe { FindWindowExW(HWND::default(), prev, cls, PCWSTR::null()) } {
                Ok(h) if !h.0.is_null() => {
                    found.push(Surface(h.0 as isize));
                    prev = h;
                }
                _ => break,
            }
        }
        found
    }

    fn owner_image(&self, surface: Surface) -> Option<String> {
        unsafe {
            let mut pid: u32 = 0;
            GetWindowThreadProcessId(hwnd(surface), Some(&mut pid));
            if pid == 0 { return None; }
            let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, FALSE, pid).ok()?;
            let mut buf = [0u16; IMAGE_PATH_MAX];
            let mut len = buf.len() as u32;
            let ok = QueryFullProcessImageNameW(
                handle, PROCESS_NAME_FORMAT(0), PWSTR(buf.as_mut_ptr()), &mut len,
            );
            let _ = CloseHandle(handle);
            ok.ok()?;
            Some(String::from_utf16_lossy(&buf[..len as usize]))
        }
    }

    fn process_names(&self) -> Vec<String> {
        unsafe {
            let snap = match CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) {
                Ok(h) => h,
                Err(e) => {
                    debug!("process snapshot: {}", e);
                    return Vec::new();
                }
            };
            let mut entry = PROCESSENTRY32W {
                dwSize: mem::size_of::<PROCESSENTRY32W>() as u32,
                ..Default::default()
            };
            let mut names = Vec::new();
            if Process32FirstW(snap, &mut entry).is_ok() {
                loop {
                    let exe = &entry.szExeFile;
                    let len = exe.iter().position(|&c| c == 0).unwrap_or(exe.len());
                    names.push(String::from_utf16_lossy(&exe[..len]));
                    if Process32NextW(snap, &mut entry).is_err() { break; }
                }
            }
            let _ = CloseHandle(snap);
            names
        }
    }

    fn is_visible(&self, surface: Surface) -> bool {
        unsafe { IsWindowVisible(hwnd(surface)).as_bool() }
    }

    // ShowWindow liefert den vorherigen Zustand, keinen Fehler
    fn show_no_activate(&self, surface: Surface) -> ShellResult<()> {
        unsafe { let _ = ShowWindow(hwnd(surface), SW_SHOWNOACTIVATE); }
        Ok(())
    }

    fn hide(&self, surface: Surface) -> ShellResult<()> {
        unsafe { let _ = ShowWindow(hwnd(surface), SW_HIDE); }
        Ok(())
    }

    fn place(&self, surface: Surface, r: Rect) -> ShellResult<()> {
        unsafe {
            SetWindowPos(
                hwnd(surface), HWND::default(),
                r.left, r.top, r.width(), r.height(),
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )
        }
        .map_err(|e| ShellError::os("SetWindowPos", e))
    }

    fn work_area(&self) -> ShellResult<Rect> {
        let mut rc = RECT::default();
        unsafe {
            SystemParametersInfoW(
                SPI_GETWORKAREA, 0,
                Some(&mut rc as *mut RECT as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| ShellError::os("SPI_GETWORKAREA", e))?;
        Ok(Rect::new(rc.left, rc.top, rc.right, rc.bottom))
    }

    fn set_work_area(&self, r: Rect) -> ShellResult<()> {
        let mut rc = to_rect(r);
        unsafe {
            SystemParametersInfoW(
                SPI_SETWORKAREA, 0,
                Some(&mut rc as *mut RECT as *mut c_void),
                SPIF_PERSIST,
            )
        }
        .map_err(|e| ShellError::os("SPI_SETWORKAREA", e))
    }

    fn screen_bounds(&self) -> Rect {
        unsafe { Rect::new(0, 0, GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
    }

    fn broadcast_work_area_change(&self) {
        // Mit Timeout: ein hängendes Fenster darf die Hauptschleife nicht blockieren
        unsafe {
            let _ = SendMessageTimeoutW(
                HWND_BROADCAST, WM_SETTINGCHANGE,
                WPARAM(SPI_SETWORKAREA.0 as usize), LPARAM(0),
                SMTO_ABORTIFHUNG, BROADCAST_TIMEOUT_MS, None,
            );
        }
    }

    fn appbar_state(&self, surface: Surface) -> u32 {
        let mut abd = appbar_data(surface);
        unsafe { SHAppBarMessage(ABM_GETSTATE, &mut abd) as u32 }
    }

    fn set_appbar_state(&self, surface: Surface, state: u32) -> ShellResult<()> {
        let mut abd = appbar_data(surface);
        abd.lParam = LPARAM(state as isize);
        unsafe { SHAppBarMessage(ABM_SETSTATE, &mut abd); }
        Ok(())
    }
}

// ── Tastatur ────────────────────────────────────────
pub struct Win32Keyboard;

fn key_down(vk: VIRTUAL_KEY) -> bool {
    unsafe { (GetAsyncKeyState(vk.0 as i32) as u16 & 0x8000) != 0 }
}

unsafe fn send_key(vk: VIRTUAL_KEY, up: bool) {
    let flags = if up { KEYEVENTF_KEYUP } else { KEYBD_EVENT_FLAGS(0) };
    let input = [INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk, wScan: 0,
                dwFlags: flags,
                time: 0, dwExtraInfo: 0,
            },
        },
    }];
    SendInput(&input, mem::size_of::<INPUT>() as i32);
}

impl Keyboard for Win32Keyboard {
    fn poll(&self) -> Keys {
        Keys {
            exit_modifier: key_down(VK_MENU),
            exit_key: key_down(VK_OEM_3),
            reveal: key_down(VK_LWIN) || key_down(VK_RWIN),
        }
    }

    fn dismiss_start_menu(&self) {
        unsafe {
            send_key(VK_ESCAPE, false);
            thread::sleep(ESCAPE_HOLD);
            send_key(VK_ESCAPE, true);
        }
    }
}

// ── Single-Instance Guard ───────────────────────────
/// Named mutex held for the process lifetime. A second instance would save
/// the already expanded work area as its "original".
pub struct InstanceLock(HANDLE);

impl InstanceLock {
    /// `Ok(None)` if another instance holds the lock.
    pub fn acquire() -> ShellResult<Option<Self>> {
        unsafe {
            let h = CreateMutexW(None, FALSE, w!("Local\\TaskbarHider.SingleInstance"))?;
            if GetLastError() == ERROR_ALREADY_EXISTS {
                let _ = CloseHandle(h);
                return Ok(None);
            }
            Ok(Some(InstanceLock(h)))
        }
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        unsafe { let _ = CloseHandle(self.0); }
    }
}
