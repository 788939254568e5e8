// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

// Literals substituted into the binary by the packaging pipeline.  Each one
// is read with `option_env!` in `src/literals.rs`.
const INJECTED: &[&str] = &[
    "BUILDINFO_VERSION",
    "BUILDINFO_GIT_REVISION",
    "BUILDINFO_STATUS",
    "BUILDINFO_TAG",
    "BUILDINFO_HUB",
    "BUILDINFO_VENDOR",
];

fn main() -> anyhow::Result<()> {
    for var in INJECTED {
        println!("cargo:rerun-if-env-changed={var}");
    }

    // The rustc semver doubles as the runtime version of the record.
    vergen::EmitBuilder::builder().rustc_semver().emit()
}
