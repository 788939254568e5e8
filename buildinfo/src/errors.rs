// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2025 Oxide Computer Company

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A non-blank line in a legacy version report had no ':' separator.
    /// Carries the offending line as it appeared in the input.
    #[error("invalid BuildInfo input, field '{0}' is not valid")]
    InvalidField(String),
}

impl ParseError {
    /// The fragment of input that could not be parsed.
    pub fn fragment(&self) -> &str {
        match self {
            ParseError::InvalidField(f) => f,
        }
    }
}
