// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

// ── Logging ─────────────────────────────────────────
// Kein Konsolenfenster: alles geht in eine Datei neben der EXE
// (Fallback: Temp-Verzeichnis). Level über RUST_LOG, Standard "info".

use std::path::{Path, PathBuf};
use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "taskbar_hider.log";
const DEFAULT_FILTER: &str = "info";

/// Directory of the running executable, or the temp dir if that is unknown.
pub fn log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(std::env::temp_dir)
}

fn appender_in(preferred: &Path, fallback: &Path) -> anyhow::Result<RollingFileAppender> {
    let build = |dir: &Path| {
        RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE)
            .build(dir)
    };
    build(preferred)
        .or_else(|_| build(fallback))
        .context("opening log file")
}

/// Installs the global subscriber. Keep the guard alive until exit, dropping
/// it flushes the writer thread.
pub fn init() -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(appender_in(&log_dir(), &std::env::temp_dir())?);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing subscriber")?;
    Ok(guard)
}
