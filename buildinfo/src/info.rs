// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

//! The build information record and its renderers.

use std::fmt;
use std::path::is_separator;
use std::path::MAIN_SEPARATOR;

use crate::literals::BuildLiterals;
use crate::literals::DEFAULT_VENDOR;
use crate::literals::RUNTIME_VERSION;
use crate::literals::UNKNOWN;
use crate::platform::Platform;

/// Version information describing how a binary was built.
///
/// Every field is a plain string.  Anything that was not provided holds the
/// literal "unknown", which downstream consumers may match on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub git_revision: String,
    /// Toolchain that compiled the binary.
    pub runtime_version: String,
    pub build_status: String,
    pub git_tag: String,
    /// Who built the binary.
    pub vendor: String,
}

/// Names each field of a [`BuildInfo`], in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Version,
    GitRevision,
    RuntimeVersion,
    BuildStatus,
    GitTag,
    Vendor,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Version,
        Field::GitRevision,
        Field::RuntimeVersion,
        Field::BuildStatus,
        Field::GitTag,
        Field::Vendor,
    ];

    /// The key used for this field in legacy reports and the long form.
    pub const fn label(self) -> &'static str {
        match self {
            Field::Version => "Version",
            Field::GitRevision => "GitRevision",
            Field::RuntimeVersion => "GolangVersion",
            Field::BuildStatus => "BuildStatus",
            Field::GitTag => "GitTag",
            Field::Vendor => "Vendor",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        BuildInfo {
            version: UNKNOWN.to_string(),
            git_revision: UNKNOWN.to_string(),
            runtime_version: UNKNOWN.to_string(),
            build_status: UNKNOWN.to_string(),
            git_tag: UNKNOWN.to_string(),
            vendor: DEFAULT_VENDOR.to_string(),
        }
    }
}

impl BuildInfo {
    pub fn from_literals(lit: &BuildLiterals, runtime_version: &str) -> Self {
        BuildInfo {
            version: lit.version.to_string(),
            git_revision: lit.git_revision.to_string(),
            runtime_version: runtime_version.to_string(),
            build_status: lit.status.to_string(),
            git_tag: lit.tag.to_string(),
            vendor: lit.vendor.to_string(),
        }
    }

    /// The build information compiled into this binary.
    pub fn current() -> Self {
        Self::from_literals(&BuildLiterals::COMPILED, RUNTIME_VERSION)
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Version => &self.version,
            Field::GitRevision => &self.git_revision,
            Field::RuntimeVersion => &self.runtime_version,
            Field::BuildStatus => &self.build_status,
            Field::GitTag => &self.git_tag,
            Field::Vendor => &self.vendor,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Version => &mut self.version,
            Field::GitRevision => &mut self.git_revision,
            Field::RuntimeVersion => &mut self.runtime_version,
            Field::BuildStatus => &mut self.build_status,
            Field::GitTag => &mut self.git_tag,
            Field::Vendor => &mut self.vendor,
        };
        *slot = value.into();
    }

    /// Single-line form: `<version>-<git revision>-<build status>`.
    ///
    /// Hyphens inside the fields are not escaped, so the output cannot be
    /// split back apart reliably.
    pub fn to_compact_string(&self) -> String {
        self.to_string()
    }

    /// A User-Agent identifying this binary, e.g.
    /// `istioctl/1.11.2 (linux/amd64) istio/oss`.
    pub fn user_agent(&self, argv0: &str, os: &str, arch: &str) -> String {
        format!(
            "{}/{} ({}/{}) istio/{}",
            program_name(argv0),
            self.version,
            os,
            arch,
            self.vendor
        )
    }

    pub fn user_agent_for(&self, platform: &Platform) -> String {
        self.user_agent(&platform.argv0, &platform.os, &platform.arch)
    }

    /// User-Agent for the running process.
    pub fn current_user_agent(&self) -> String {
        self.user_agent_for(&Platform::current())
    }

    /// Debug-oriented dump naming every field.  The layout is not a stable
    /// format.
    pub fn long_form(&self) -> String {
        let fields = Field::ALL
            .iter()
            .map(|f| format!("{}:{:?}", f.label(), self.get(*f)))
            .collect::<Vec<String>>();
        format!("BuildInfo{{{}}}", fields.join(", "))
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.version, self.git_revision, self.build_status
        )
    }
}

// Last component of the invocation path, after dropping trailing
// separators.  A path made only of separators is the root itself.
fn program_name(argv0: &str) -> String {
    if argv0.is_empty() {
        return UNKNOWN.to_string();
    }
    let trimmed = argv0.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return MAIN_SEPARATOR.to_string();
    }
    trimmed
        .rsplit(is_separator)
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

/// Image coordinates the binary was published under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DockerBuildInfo {
    pub hub: String,
    pub tag: String,
}

impl DockerBuildInfo {
    /// The version literal doubles as the image tag.
    pub fn from_literals(lit: &BuildLiterals) -> Self {
        DockerBuildInfo {
            hub: lit.hub.to_string(),
            tag: lit.version.to_string(),
        }
    }

    pub fn current() -> Self {
        Self::from_literals(&BuildLiterals::COMPILED)
    }

    /// Full reference for `image`, e.g. `docker.io/istio/pilot:1.20.0`.
    pub fn image_ref(&self, image: &str) -> String {
        format!("{}/{}:{}", self.hub, image, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BuildInfo {
        BuildInfo {
            version: "1.20.0".to_string(),
            git_revision: "0ab1c2d".to_string(),
            runtime_version: "1.78.0".to_string(),
            build_status: "Clean".to_string(),
            git_tag: "1.20.0".to_string(),
            vendor: "oss".to_string(),
        }
    }

    #[test]
    fn test_default_is_unknown() {
        let info = BuildInfo::default();
        for f in Field::ALL {
            let want = if f == Field::Vendor { "oss" } else { "unknown" };
            assert_eq!(info.get(f), want, "field {f}");
        }
    }

    #[test]
    fn test_compact() {
        let info = sample();
        assert_eq!(info.to_compact_string(), "1.20.0-0ab1c2d-Clean");
        assert_eq!(format!("{info}"), info.to_compact_string());

        // Embedded hyphens are passed through untouched.
        let info = BuildInfo {
            version: "1.20.0-rc.1".to_string(),
            ..sample()
        };
        assert_eq!(info.to_compact_string(), "1.20.0-rc.1-0ab1c2d-Clean");
    }

    #[test]
    fn test_user_agent() {
        let info = sample();
        assert_eq!(
            info.user_agent("/usr/bin/istioctl", "linux", "amd64"),
            "istioctl/1.20.0 (linux/amd64) istio/oss"
        );
        assert!(info
            .user_agent("", "linux", "amd64")
            .starts_with("unknown/"));
        assert!(info.user_agent("istioctl", "darwin", "arm64").starts_with(
            "istioctl/1.20.0 (darwin/arm64)"
        ));

        let vendored = BuildInfo {
            vendor: "Google".to_string(),
            ..sample()
        };
        assert!(vendored
            .user_agent("/usr/local/bin/pilot-agent", "linux", "arm64")
            .ends_with(" istio/Google"));
    }

    #[test]
    fn test_user_agent_for_platform() {
        let platform = Platform {
            argv0: "./out/istioctl".to_string(),
            os: "linux".to_string(),
            arch: "ppc64".to_string(),
        };
        assert_eq!(
            sample().user_agent_for(&platform),
            "istioctl/1.20.0 (linux/ppc64) istio/oss"
        );
    }

    #[test]
    fn test_program_name() {
        assert_eq!(program_name(""), "unknown");
        assert_eq!(program_name("pilot-discovery"), "pilot-discovery");
        assert_eq!(program_name("/usr/bin/istioctl"), "istioctl");
        assert_eq!(program_name("/usr/bin/istioctl/"), "istioctl");

        // Only an empty path is unknown; dot segments and the root are
        // reported as written.
        let root = MAIN_SEPARATOR.to_string();
        assert_eq!(program_name("/"), root);
        assert_eq!(program_name("//"), root);
        assert_eq!(program_name("."), ".");
        assert_eq!(program_name(".."), "..");
        assert_eq!(program_name("foo/.."), "..");
    }

    #[test]
    fn test_current_user_agent() {
        let info = sample();
        let ua = info.current_user_agent();
        assert!(ua.ends_with(" istio/oss"), "{ua}");
        assert!(ua.contains(&format!("({}/", std::env::consts::OS)), "{ua}");
        assert!(!ua.starts_with("unknown/"), "{ua}");
    }

    #[test]
    fn test_long_form_names_every_field() {
        let info = sample();
        let long = info.long_form();
        for f in Field::ALL {
            assert!(long.contains(f.label()), "{long} is missing {f}");
            assert!(long.contains(&format!("{:?}", info.get(f))));
        }
    }

    #[test]
    fn test_from_literals() {
        let lit = BuildLiterals {
            version: "1.20.0",
            git_revision: "0ab1c2d",
            status: "Modified",
            tag: "1.20.0",
            hub: "docker.io/istio",
            vendor: "oss",
        };
        let info = BuildInfo::from_literals(&lit, "1.78.0");
        assert_eq!(info.build_status, "Modified");
        assert_eq!(info.runtime_version, "1.78.0");

        let docker = DockerBuildInfo::from_literals(&lit);
        assert_eq!(docker.hub, "docker.io/istio");
        assert_eq!(docker.tag, "1.20.0");
        assert_eq!(docker.image_ref("pilot"), "docker.io/istio/pilot:1.20.0");
    }

    #[test]
    fn test_set_and_get() {
        let mut info = BuildInfo::default();
        info.set(Field::GitTag, "1.19.3");
        assert_eq!(info.git_tag, "1.19.3");
        assert_eq!(info.get(Field::GitTag), "1.19.3");
    }
}
