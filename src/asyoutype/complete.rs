// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
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

//! Formatting of a national significant number that already has a possible
//! length, bypassing the templates.

use super::{
    formatter::{
        apply_international_separator_style, separator_after_national_prefix,
        should_try_national_prefix_formatting_rule,
    },
    state::AsYouTypeState,
    template_util::parse_digits,
};
use crate::{
    phonemetadata::NumberFormat,
    phonenumberutil::{numbering_plan::NumberingPlan, phonenumberutil::PhoneNumberUtil},
    regex_util::to_replacement,
    regexp_cache::InvalidRegexError,
};

/// Formats the national significant number with `format` if its pattern
/// matches the whole number.
///
/// The national prefix formatting rule is tried first when it applies. A
/// result is returned only when its digits are exactly the national digits
/// typed by the user.
pub(super) fn format_complete_number(
    util: &PhoneNumberUtil,
    plan: NumberingPlan<'_>,
    format: &NumberFormat,
    state: &AsYouTypeState<'_>,
) -> Result<Option<String>, InvalidRegexError> {
    let full_pattern = util.reg_exps().regexp_cache.get_full_match_regex(format.pattern())?;
    if !full_pattern.is_match(state.national_significant_number()) {
        return Ok(None);
    }
    if should_try_national_prefix_formatting_rule(util, format, state) {
        if let Some(formatted) = format_national_number(util, plan, format, state, true)? {
            return Ok(Some(formatted));
        }
    }
    format_national_number(util, plan, format, state, false)
}

fn format_national_number(
    util: &PhoneNumberUtil,
    plan: NumberingPlan<'_>,
    format: &NumberFormat,
    state: &AsYouTypeState<'_>,
    use_national_prefix_formatting_rule: bool,
) -> Result<Option<String>, InvalidRegexError> {
    let national_significant_number = state.national_significant_number();
    let pattern = util.reg_exps().regexp_cache.get_regex(format.pattern())?;

    let mut formatted = if state.international {
        let Some(international_format) = plan.international_format(format) else {
            return Ok(None);
        };
        let formatted = pattern.replace(national_significant_number, &*to_replacement(international_format));
        apply_international_separator_style(util, &formatted)
    } else if use_national_prefix_formatting_rule && !format.national_prefix_formatting_rule().is_empty() {
        let national_format = util.reg_exps().first_group_capturing_pattern.replace(
            format.format(),
            &*to_replacement(format.national_prefix_formatting_rule()),
        );
        pattern
            .replace(national_significant_number, &*to_replacement(&national_format))
            .into_owned()
    } else {
        pattern
            .replace(national_significant_number, &*to_replacement(format.format()))
            .into_owned()
    };

    if !use_national_prefix_formatting_rule {
        if let Some(national_prefix) = &state.national_prefix {
            formatted = fast_cat::concat_str!(
                national_prefix,
                separator_after_national_prefix(util, plan, format),
                &formatted
            );
        } else if let Some(complex_prefix) = &state.complex_prefix_before_national_significant_number {
            formatted = fast_cat::concat_str!(complex_prefix, " ", &formatted);
        }
    }

    // A format may drop or reorder digits, the user must see all of them.
    if parse_digits(&formatted) != state.national_digits() {
        return Ok(None);
    }
    Ok(Some(formatted))
}
