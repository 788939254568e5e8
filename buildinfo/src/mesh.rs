// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

//! Version reports gathered from the components of a mesh.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::info::BuildInfo;

/// The version of a single control plane component.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, JsonSchema, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerInfo {
    pub component: String,
    pub info: BuildInfo,
}

/// The versions of all control plane components.
pub type MeshInfo = Vec<ServerInfo>;

/// The version of a single data plane proxy.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, JsonSchema, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProxyInfo {
    #[serde(rename = "ID")]
    pub id: String,
    pub istio_version: String,
}

/// Everything reporting one particular version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionGroup<'a> {
    pub version: &'a str,
    /// Component names or proxy ids, in the order they were reported.
    pub members: Vec<&'a str>,
}

fn group<'a>(
    reports: impl Iterator<Item = (&'a str, &'a str)>,
) -> Vec<VersionGroup<'a>> {
    let mut groups = BTreeMap::<&str, Vec<&str>>::new();
    for (version, member) in reports {
        groups.entry(version).or_default().push(member);
    }
    groups
        .into_iter()
        .map(|(version, members)| VersionGroup { version, members })
        .collect()
}

/// Group control plane components by the version they report, ordered by
/// version string.
pub fn mesh_versions(mesh: &[ServerInfo]) -> Vec<VersionGroup<'_>> {
    group(
        mesh.iter()
            .map(|s| (s.info.version.as_str(), s.component.as_str())),
    )
}

/// Group proxies by the version they report, ordered by version string.
pub fn proxy_versions(proxies: &[ProxyInfo]) -> Vec<VersionGroup<'_>> {
    group(
        proxies
            .iter()
            .map(|p| (p.istio_version.as_str(), p.id.as_str())),
    )
}

/// The single version shared by every component, if there is one.
pub fn common_version(mesh: &[ServerInfo]) -> Option<&str> {
    match mesh_versions(mesh).as_slice() {
        [only] => Some(only.version),
        _ => None,
    }
}
