// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

/// The host details that go into a User-Agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    /// How the process was invoked; may be empty.
    pub argv0: String,
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn current() -> Self {
        Platform {
            argv0: std::env::args_os()
                .next()
                .map(|a| a.to_string_lossy().into_owned())
                .unwrap_or_default(),
            os: std::env::consts::OS.to_string(),
            arch: arch_name(std::env::consts::ARCH).to_string(),
        }
    }
}

/// Translate a Rust target architecture into the name release artifacts and
/// User-Agents use for it ("amd64", "arm64", ...).
pub fn arch_name(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
