// TaskbarHider — Explorer Taskbar Suppression Agent
// Copyright (C) 2026  Martin Gehrken (IamLumae)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// SPDX-License-Identifier: AGPL-3.0-or-later

fn main() {
    // Ressourcen nur für Windows-Targets einbetten
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }
    let mut res = winresource::WindowsResource::new();
    res.set("ProductName", "TaskbarHider")
        .set("FileDescription", "Hides the Explorer taskbar, Win reveals it for 10s, Alt+` exits")
        .set("OriginalFilename", "taskbar-hider.exe");
    if let Err(e) = res.compile() {
        println!("cargo:warning=winresource: {}", e);
    }
}
