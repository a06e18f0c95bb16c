// Copyright 2026 The studyhub developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

/// An opaque marker identifying the version of a loaded document.
///
/// Tokens are compared for equality only. They carry no ordering: a token
/// taken from an HTTP `Last-Modified` header and one generated locally are
/// both just strings that either match the previous load or don't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshnessToken(String);

impl FreshnessToken {
    pub fn new(value: impl Into<String>) -> Self {
        FreshnessToken(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FreshnessToken {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_textual() {
        let a = FreshnessToken::new("Mon, 20 Jan 2025 10:00:00 GMT");
        let b = FreshnessToken::new("Mon, 20 Jan 2025 10:00:00 GMT");
        let c = FreshnessToken::new("2025-01-20T10:00:00+00:00");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "Mon, 20 Jan 2025 10:00:00 GMT");
    }
}
