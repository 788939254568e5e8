// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

//! Reading and writing the plain-text `Key: value` report printed by older
//! components' `--version` output.

use std::str::FromStr;

use crate::errors::ParseError;
use crate::info::BuildInfo;
use crate::info::Field;

/// Fields carried by a legacy report.  The vendor never appears in one.
pub const LEGACY_FIELDS: [Field; 5] = [
    Field::Version,
    Field::GitRevision,
    Field::RuntimeVersion,
    Field::BuildStatus,
    Field::GitTag,
];

fn legacy_field(key: &str) -> Option<Field> {
    LEGACY_FIELDS.iter().copied().find(|f| f.label() == key)
}

/// Parse a legacy report onto the default record.
pub fn parse_legacy(text: &str) -> Result<BuildInfo, ParseError> {
    parse_legacy_onto(BuildInfo::default(), text)
}

/// Parse a legacy report, starting from `base`.  Fields missing from the
/// report keep the value they have in `base`.
///
/// Keys are matched exactly and only the first ':' of a line separates the
/// key from its value.  Unrecognized keys are skipped, since older
/// components report fields this crate does not know about.
pub fn parse_legacy_onto(
    base: BuildInfo,
    text: &str,
) -> Result<BuildInfo, ParseError> {
    let mut info = base;
    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidField(line.to_string()))?;
        if let Some(field) = legacy_field(key) {
            info.set(field, value.trim());
        }
    }
    Ok(info)
}

impl BuildInfo {
    /// Render the fields a legacy report carries, one `Key: value` per line.
    pub fn legacy_form(&self) -> String {
        LEGACY_FIELDS
            .iter()
            .map(|f| format!("{}: {}\n", f.label(), self.get(*f)))
            .collect()
    }
}

impl FromStr for BuildInfo {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_legacy(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        let info = parse_legacy("Version: 1.2.3\nGitRevision: abcd\n").unwrap();
        assert_eq!(info.version, "1.2.3");
        assert_eq!(info.git_revision, "abcd");
        assert_eq!(info.runtime_version, "unknown");
        assert_eq!(info.build_status, "unknown");
        assert_eq!(info.git_tag, "unknown");
        assert_eq!(info.vendor, "oss");
    }

    #[test]
    fn test_parse_blank_input() {
        assert_eq!(parse_legacy("").unwrap(), BuildInfo::default());
        assert_eq!(parse_legacy("\n\n  \n").unwrap(), BuildInfo::default());
        assert_eq!(parse_legacy("\t\r\n").unwrap(), BuildInfo::default());
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = parse_legacy("BadLineNoColon\n").unwrap_err();
        assert_eq!(err, ParseError::InvalidField("BadLineNoColon".to_string()));
        assert_eq!(err.fragment(), "BadLineNoColon");
        assert_eq!(
            err.to_string(),
            "invalid BuildInfo input, field 'BadLineNoColon' is not valid"
        );

        // Fields parsed before the bad line are discarded with it.
        let err =
            parse_legacy("Version: 1.2.3\nbogus\nGitTag: 1.2.3").unwrap_err();
        assert_eq!(err.fragment(), "bogus");
    }

    #[test]
    fn test_parse_skips_unknown_keys() {
        let info = parse_legacy("Unknown: ignored\nVersion: 9.9.9\n").unwrap();
        assert_eq!(info.version, "9.9.9");
        assert_eq!(
            info,
            BuildInfo {
                version: "9.9.9".to_string(),
                ..BuildInfo::default()
            }
        );
    }

    #[test]
    fn test_parse_last_occurrence_wins() {
        let info = parse_legacy("Version: a\nVersion: b\n").unwrap();
        assert_eq!(info.version, "b");
    }

    #[test]
    fn test_parse_value_details() {
        // Only the first ':' separates, and only the value is trimmed.
        let info = parse_legacy(
            "GitRevision:   sha:1234  \n version: 2.0\nBuildStatus:\n",
        )
        .unwrap();
        assert_eq!(info.git_revision, "sha:1234");
        assert_eq!(info.version, "unknown");
        assert_eq!(info.build_status, "");

        // Keys are case sensitive.
        let info = parse_legacy("VERSION: 1\ngittag: 2\n").unwrap();
        assert_eq!(info, BuildInfo::default());
    }

    #[test]
    fn test_parse_onto_base() {
        let base = BuildInfo {
            vendor: "Google".to_string(),
            git_tag: "1.11.6".to_string(),
            ..BuildInfo::default()
        };
        let info = parse_legacy_onto(
            base,
            "Version: 1.11.6\nGolangVersion: go1.16.7\nBuildStatus: Clean\n",
        )
        .unwrap();
        assert_eq!(info.version, "1.11.6");
        assert_eq!(info.runtime_version, "go1.16.7");
        assert_eq!(info.git_tag, "1.11.6");
        assert_eq!(info.vendor, "Google");
    }

    #[test]
    fn test_from_str() {
        let info: BuildInfo = "GitTag: 1.0.0".parse().unwrap();
        assert_eq!(info.git_tag, "1.0.0");
        assert!("no separator".parse::<BuildInfo>().is_err());
    }

    #[test]
    fn test_legacy_form_parses_back() {
        let info = BuildInfo {
            version: "1.20.0".to_string(),
            git_revision: "0ab1c2d".to_string(),
            runtime_version: "1.78.0".to_string(),
            build_status: "Modified".to_string(),
            git_tag: "1.20.0-rc.0".to_string(),
            vendor: "oss".to_string(),
        };
        let text = info.legacy_form();
        assert!(text.starts_with("Version: 1.20.0\nGitRevision: 0ab1c2d\n"));
        assert!(!text.contains("Vendor"));
        assert_eq!(parse_legacy(&text).unwrap(), info);
    }

    #[test]
    fn test_compact_form_is_lossy() {
        let info = BuildInfo {
            version: "1.20.0".to_string(),
            git_revision: "0ab1c2d".to_string(),
            build_status: "Clean".to_string(),
            ..BuildInfo::default()
        };
        // No ':' anywhere, so the compact line is rejected outright.
        assert!(parse_legacy(&info.to_compact_string()).is_err());
    }
}
