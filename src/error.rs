// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::Display;
use thiserror::Error;

/// Failure of a single shell call. Never fatal: callers log it and move on,
/// the next enforcement tick or hotkey event re-applies the same state.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{call} failed: {message}")]
    Os { call: &'static str, message: String },
}

impl ShellError {
    pub fn os(call: &'static str, err: impl Display) -> Self {
        ShellError::Os { call, message: err.to_string() }
    }
}

#[cfg(windows)]
impl From<windows_core::Error> for ShellError {
    fn from(err: windows_core::Error) -> Self {
        ShellError::Os { call: "win32", message: err.to_string() }
    }
}

pub type ShellResult<T> = Result<T, ShellError>;
