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

use std::sync::Arc;

use regex::Regex;

use crate::{phonenumberutil::helper_constants::VALID_PUNCTUATION, regexp_cache::RegexCache};

pub(crate) struct PhoneNumberRegExpsAndMappings {
    /// Cache for the patterns found in metadata. Shared with the matcher.
    pub regexp_cache: Arc<RegexCache>,

    /// Finds the first group reference of a number format. The first group is
    /// not always `$1` since some countries don't use the first group of the
    /// national pattern (e.g. Argentina), so any digit is accepted.
    pub first_group_capturing_pattern: Regex,

    /// A format is only used for as-you-type formatting when every group it
    /// outputs is separated by punctuation alone and the first group is
    /// present, so no entered digit gets lost or reordered.
    pub is_format_eligible_as_you_type_formatting_regex: Regex,

    /// Matches a national prefix formatting rule that does not add anything
    /// but optional parentheses around the first group. Unbalanced
    /// parentheses are allowed.
    pub formatting_rule_has_first_group_only_regex: Regex,

    /// Separators between a national prefix and the first group in a
    /// formatting rule.
    pub national_prefix_separators_pattern: Regex,

    /// A `[...]` character class of a leading digits or format pattern.
    pub character_class_pattern: Regex,

    /// A national prefix for parsing pattern containing anything other than
    /// digits and character classes can match more than one prefix, so
    /// extraction of the national number may be retried once more digits
    /// are known.
    pub complex_national_prefix_pattern: Regex,

    /// A run of punctuation, replaced by a single space in international
    /// templates.
    pub separator_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    pub fn new() -> Self {
        Self {
            regexp_cache: Arc::new(RegexCache::with_capacity(128)),
            first_group_capturing_pattern: Regex::new("(\\$\\d)").unwrap(),
            // it'll be initialized only once, so we can use slow format!
            is_format_eligible_as_you_type_formatting_regex: Regex::new(
                &format!("^[{}]*\\$1[{}]*(?:\\$\\d[{}]*)*$", VALID_PUNCTUATION, VALID_PUNCTUATION, VALID_PUNCTUATION)
            ).unwrap(),
            formatting_rule_has_first_group_only_regex: Regex::new("^\\(?\\$1\\)?$").unwrap(),
            national_prefix_separators_pattern: Regex::new("[- ]").unwrap(),
            character_class_pattern: Regex::new("\\[([^\\[\\]])*\\]").unwrap(),
            complex_national_prefix_pattern: Regex::new("[^\\d\\[\\]]").unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PhoneNumberRegExpsAndMappings;

    #[test]
    fn check_regexps_are_compiling() {
        super::PhoneNumberRegExpsAndMappings::new();
    }

    #[test]
    fn eligible_formats_keep_digits_in_order() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        let eligible = &reg_exps.is_format_eligible_as_you_type_formatting_regex;
        assert!(eligible.is_match("$1 $2-$3"));
        assert!(eligible.is_match("($1) $2-$3"));
        assert!(eligible.is_match("$1/$2"));
        assert!(!eligible.is_match("$1 $2 ext"));
        assert!(!eligible.is_match("$2 $1x"));
    }

    #[test]
    fn first_group_only_rules() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        let first_group_only = &reg_exps.formatting_rule_has_first_group_only_regex;
        assert!(first_group_only.is_match("$1"));
        assert!(first_group_only.is_match("($1)"));
        assert!(first_group_only.is_match("($1"));
        assert!(!first_group_only.is_match("0$1"));
        assert!(!first_group_only.is_match("8 ($1)"));
    }

    #[test]
    fn separators_collapse_to_space() {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        assert_eq!("8 916 123 45 67", reg_exps.separator_pattern.replace_all("8 (916) 123-45-67", " ").trim());
    }
}
