// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 The Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Match, Regex};

/// Matching that only succeeds at the very start of the input, the
/// equivalent of `string.search(pattern) === 0`.
pub trait RegexConsume {
    fn matches_start<'a>(&self, s: &'a str) -> bool {
        self.find_start(s).is_some()
    }

    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>>;
}

impl RegexConsume for Regex {
    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>> {
        let found = self.find(s)?;
        if found.start() != 0 {
            return None
        }
        Some(found)
    }
}

static GROUP_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\\$(\\d)").expect("Invalid constant pattern!")
});

/// Metadata formats reference groups as `$1`. The regex crate reads `$1x`
/// as a group named `1x`, so every reference is braced: `${1}x`.
pub fn to_replacement(format: &str) -> Cow<'_, str> {
    GROUP_REFERENCE.replace_all(format, "$${${1}}")
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::{RegexConsume, to_replacement};

    #[test]
    fn find_start_requires_match_at_zero() {
        let regex = Regex::new("2|5[56]").unwrap();
        assert!(regex.matches_start("207"));
        assert!(regex.matches_start("556"));
        assert!(!regex.matches_start("1207"));
    }

    #[test]
    fn group_references_are_braced() {
        assert_eq!("${1} ${2}-${3}", to_replacement("$1 $2-$3"));
        assert_eq!("x${1}x", to_replacement("x$1x"));
        assert_eq!("NA", to_replacement("NA"));

        let regex = Regex::new("(\\d{2})(\\d{2})").unwrap();
        assert_eq!("12x34", regex.replace("1234", &*to_replacement("$1x$2")));
    }
}
