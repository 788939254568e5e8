// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

//! Build-time injected literals.
//!
//! The packaging pipeline sets the `BUILDINFO_*` environment variables when
//! compiling this crate.  Any variable that is not set falls back to the
//! "unknown" sentinel, except the vendor, which falls back to "oss".

/// Sentinel used for every identifier that was not injected.
pub const UNKNOWN: &str = "unknown";

/// Vendor reported when the build pipeline does not provide one.
pub const DEFAULT_VENDOR: &str = "oss";

/// Version of the toolchain that compiled this crate.
pub const RUNTIME_VERSION: &str = env!("VERGEN_RUSTC_SEMVER");

const fn or_default(
    value: Option<&'static str>,
    default: &'static str,
) -> &'static str {
    match value {
        Some(v) => v,
        None => default,
    }
}

/// The raw identifiers supplied to the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildLiterals {
    pub version: &'static str,
    pub git_revision: &'static str,
    pub status: &'static str,
    pub tag: &'static str,
    pub hub: &'static str,
    pub vendor: &'static str,
}

impl BuildLiterals {
    /// The literals captured when this crate was compiled.
    pub const COMPILED: BuildLiterals = BuildLiterals {
        version: or_default(option_env!("BUILDINFO_VERSION"), UNKNOWN),
        git_revision: or_default(
            option_env!("BUILDINFO_GIT_REVISION"),
            UNKNOWN,
        ),
        status: or_default(option_env!("BUILDINFO_STATUS"), UNKNOWN),
        tag: or_default(option_env!("BUILDINFO_TAG"), UNKNOWN),
        hub: or_default(option_env!("BUILDINFO_HUB"), UNKNOWN),
        vendor: or_default(option_env!("BUILDINFO_VENDOR"), DEFAULT_VENDOR),
    };

    /// Literals for a build in which nothing was injected.
    pub const NONE: BuildLiterals = BuildLiterals {
        version: UNKNOWN,
        git_revision: UNKNOWN,
        status: UNKNOWN,
        tag: UNKNOWN,
        hub: UNKNOWN,
        vendor: DEFAULT_VENDOR,
    };
}

impl Default for BuildLiterals {
    fn default() -> Self {
        Self::NONE
    }
}
