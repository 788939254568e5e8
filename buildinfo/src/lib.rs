// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

//! Build version metadata.
//!
//! A [`BuildInfo`] is built once, at startup, from the literals injected at
//! compile time and then handed to whatever needs it.  It can be rendered as
//! a compact status line, a User-Agent, a long debug dump, or the legacy
//! `Key: value` report, and serialized under fixed external key names.

pub mod errors;
pub mod info;
pub mod legacy;
pub mod literals;
pub mod mesh;
pub mod platform;
pub mod wire;

pub use errors::ParseError;
pub use info::BuildInfo;
pub use info::DockerBuildInfo;
pub use info::Field;
pub use legacy::parse_legacy;
pub use legacy::parse_legacy_onto;
pub use literals::BuildLiterals;
pub use mesh::MeshInfo;
pub use mesh::ProxyInfo;
pub use mesh::ServerInfo;
pub use platform::Platform;
