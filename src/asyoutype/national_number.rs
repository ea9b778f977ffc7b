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

//! Splitting of typed digits into prefixes and the national significant
//! number.

use log::trace;

use crate::{
    errors::ValidationError,
    phonenumberutil::{
        helper_constants::MAX_LENGTH_COUNTRY_CODE, numbering_plan::NumberingPlan,
        phonenumberutil::PhoneNumberUtil,
    },
    regex_util::{RegexConsume, to_replacement},
    regexp_cache::InvalidRegexError,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct ExtractedNationalNumber {
    pub national_number: String,
    pub national_prefix: Option<String>,
    pub carrier_code: Option<String>,
}

impl ExtractedNationalNumber {
    fn unchanged(number: &str) -> Self {
        Self { national_number: number.to_owned(), ..Default::default() }
    }
}

/// Strips the national prefix and the carrier code from the beginning of
/// `number`. The number may still be incomplete, so the result is not
/// checked against the plan's number patterns.
pub(super) fn extract_national_number_from_possibly_incomplete_number(
    util: &PhoneNumberUtil,
    plan: NumberingPlan<'_>,
    number: &str,
) -> Result<ExtractedNationalNumber, InvalidRegexError> {
    let Some(national_prefix_for_parsing) = plan.national_prefix_for_parsing() else {
        return Ok(ExtractedNationalNumber::unchanged(number));
    };
    if number.is_empty() {
        return Ok(ExtractedNationalNumber::unchanged(number));
    }
    let prefix_pattern = util.reg_exps().regexp_cache.get_prefix_regex(national_prefix_for_parsing)?;
    let Some(prefix_match) = prefix_pattern.captures(number) else {
        return Ok(ExtractedNationalNumber::unchanged(number));
    };

    let captured_groups_count = prefix_match.len() - 1;
    let first_group = prefix_match.get(1).map(|group| group.as_str());
    let has_captured_groups = captured_groups_count > 0
        && prefix_match
            .get(captured_groups_count)
            .is_some_and(|group| !group.is_empty());

    let (national_number, carrier_code) = match plan.national_prefix_transform_rule() {
        Some(transform_rule) if has_captured_groups => {
            let national_number = prefix_pattern
                .replace(number, &*to_replacement(transform_rule))
                .into_owned();
            let carrier_code = if captured_groups_count > 1 { first_group } else { None };
            (national_number, carrier_code)
        }
        _ => {
            let prefix_len = prefix_match.get(0).map(|whole| whole.end()).unwrap_or(0);
            let carrier_code = if has_captured_groups { first_group } else { None };
            (number[prefix_len..].to_owned(), carrier_code)
        }
    };

    let national_prefix = if has_captured_groups {
        // The national prefix is whatever precedes the carrier code, as long
        // as it is the plan's national prefix.
        first_group
            .and_then(|group| number.find(group))
            .map(|position| &number[..position])
            .filter(|possible_prefix| Some(*possible_prefix) == plan.national_prefix())
            .map(str::to_owned)
    } else {
        prefix_match
            .get(0)
            .map(|whole| whole.as_str())
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_owned)
    };

    Ok(ExtractedNationalNumber {
        national_number,
        national_prefix,
        carrier_code: carrier_code.filter(|code| !code.is_empty()).map(str::to_owned),
    })
}

/// Strips the national prefix from a complete number, keeping it when the
/// result would not be a plausible national number.
pub(super) fn extract_national_number(
    util: &PhoneNumberUtil,
    plan: NumberingPlan<'_>,
    number: &str,
) -> Result<ExtractedNationalNumber, InvalidRegexError> {
    let extracted = extract_national_number_from_possibly_incomplete_number(util, plan, number)?;
    if extracted.national_number == number {
        return Ok(extracted);
    }
    let general_desc = plan.general_desc();
    // Number "before" is valid while "after" is not: the prefix was part of
    // the number.
    if util.matches_national_number_pattern(number, general_desc)
        && !util.matches_national_number_pattern(&extracted.national_number, general_desc) {
        return Ok(ExtractedNationalNumber::unchanged(number));
    }
    if !general_desc.possible_length.is_empty()
        && !is_possible_incomplete_national_number(util, plan, &extracted.national_number) {
        return Ok(ExtractedNationalNumber::unchanged(number));
    }
    Ok(extracted)
}

fn is_possible_incomplete_national_number(util: &PhoneNumberUtil, plan: NumberingPlan<'_>, national_number: &str) -> bool {
    !matches!(
        util.test_number_length(national_number, plan.metadata()),
        Err(ValidationError::TooShort | ValidationError::InvalidLength)
    )
}

/// Strips the international dialling prefix of the plan from `number`.
///
/// Returns `None` when the number does not start with the prefix, or the
/// prefix is followed by `0`, which no calling code starts with.
pub(super) fn strip_idd_prefix<'a>(
    util: &PhoneNumberUtil,
    plan: NumberingPlan<'_>,
    number: &'a str,
) -> Result<Option<&'a str>, InvalidRegexError> {
    let Some(international_prefix) = plan.international_prefix() else {
        return Ok(None);
    };
    let idd_pattern = util.reg_exps().regexp_cache.get_regex(international_prefix)?;
    let Some(idd_match) = idd_pattern.find_start(number) else {
        return Ok(None);
    };
    let rest = &number[idd_match.end()..];
    if rest.starts_with('0') {
        return Ok(None);
    }
    Ok(Some(rest))
}

/// Reads a calling code from the beginning of digits typed after a plus
/// sign. The shortest known code wins, `0` never starts one.
pub(super) fn extract_calling_code<'a>(util: &PhoneNumberUtil, digits: &'a str) -> Option<(i32, &'a str)> {
    if digits.is_empty() || digits.starts_with('0') {
        return None;
    }
    (1..=MAX_LENGTH_COUNTRY_CODE.min(digits.len()))
        .filter_map(|len| {
            let calling_code = digits[..len].parse::<i32>().ok()?;
            Some((calling_code, &digits[len..]))
        })
        .find(|(calling_code, _)| util.has_calling_code(*calling_code))
}

/// Detects an international number typed without the plus sign, which
/// starts with the calling code of the default plan.
///
/// Returns the calling code when the digits don't fit the default plan as
/// a national number but do once the calling code is dropped, or when they
/// are too long for a national number.
pub(super) fn extract_calling_code_from_international_number_without_plus_sign(
    util: &PhoneNumberUtil,
    plan: NumberingPlan<'_>,
    number: &str,
) -> Result<Option<i32>, InvalidRegexError> {
    let calling_code = plan.calling_code();
    let mut buf = itoa::Buffer::new();
    let calling_code_str = buf.format(calling_code);
    let Some(possible_shorter_number) = number.strip_prefix(calling_code_str) else {
        return Ok(None);
    };
    let general_desc = plan.general_desc();
    let possible_shorter_national_number =
        extract_national_number(util, plan, possible_shorter_number)?.national_number;
    let national_number = extract_national_number(util, plan, number)?.national_number;

    if (!util.matches_national_number_pattern(&national_number, general_desc)
        && util.matches_national_number_pattern(&possible_shorter_national_number, general_desc))
        || util.test_number_length(&national_number, plan.metadata()) == Err(ValidationError::TooLong) {
        trace!("Number '{number}' starts with calling code {calling_code} typed without a plus sign");
        return Ok(Some(calling_code));
    }
    Ok(None)
}
