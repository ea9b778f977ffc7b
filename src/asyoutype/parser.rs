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

use log::trace;

use super::{
    national_number::{
        ExtractedNationalNumber, extract_calling_code,
        extract_calling_code_from_international_number_without_plus_sign,
        extract_national_number_from_possibly_incomplete_number, strip_idd_prefix,
    },
    state::{AsYouTypeState, Defaults, StateChanges},
};
use crate::{
    phonenumberutil::{
        helper_constants::PLUS_CHARS, numbering_plan::NumberingPlan,
        phonenumberutil::PhoneNumberUtil,
    },
    regexp_cache::InvalidRegexError,
};

/// Digits are accumulated until there are this many, then the default
/// plan's international dialling prefix is looked for.
const MIN_DIGITS_FOR_IDD_PREFIX: usize = 3;

#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct ParsedInput {
    /// ASCII digits found in the input chunk.
    pub digits: String,
    /// The chunk only started an international number, no digit is known
    /// yet.
    pub just_leading_plus: bool,
}

/// Splits the digits typed so far into an international dialling prefix,
/// a calling code, a national prefix and the national significant number.
pub(super) struct AsYouTypeParser<'m> {
    defaults: Defaults<'m>,
    has_extracted_national_significant_number: bool,
}

impl<'m> AsYouTypeParser<'m> {
    pub fn new(defaults: Defaults<'m>) -> Self {
        Self { defaults, has_extracted_national_significant_number: false }
    }

    pub fn reset(&mut self) {
        self.has_extracted_national_significant_number = false;
    }

    pub fn input(
        &mut self,
        text: &str,
        state: &mut AsYouTypeState<'m>,
    ) -> Result<(ParsedInput, StateChanges), InvalidRegexError> {
        let (digits, has_plus) = extract_digits_and_plus(text);
        let mut changes = StateChanges::none();
        let mut just_leading_plus = false;
        if has_plus && state.digits.is_empty() {
            state.leading_plus = true;
            changes |= state.start_international_number(None, None);
            just_leading_plus = digits.is_empty();
        }
        if !digits.is_empty() {
            changes |= self.input_digits(&digits, state)?;
        }
        Ok((ParsedInput { digits, just_leading_plus }, changes))
    }

    fn input_digits(&mut self, next_digits: &str, state: &mut AsYouTypeState<'m>) -> Result<StateChanges, InvalidRegexError> {
        let digits_count = state.digits.len();
        let has_received_three_leading_digits = digits_count < MIN_DIGITS_FOR_IDD_PREFIX
            && digits_count + next_digits.len() >= MIN_DIGITS_FOR_IDD_PREFIX;
        state.append_digits(next_digits);

        let mut changes = StateChanges::none();
        if has_received_three_leading_digits {
            if let Some(idd_changes) = self.extract_idd_prefix(state)? {
                changes |= idd_changes;
            }
        }

        if Self::is_waiting_for_calling_code(state) {
            match self.extract_calling_code(state) {
                Some(calling_code_changes) => changes |= calling_code_changes,
                None => return Ok(changes),
            }
        } else {
            state.append_national_significant_number_digits(next_digits);
        }

        if !state.international && !self.has_extracted_national_significant_number {
            if let Some(extracted_changes) = self.extract_national_significant_number(state)? {
                changes |= extracted_changes;
            }
        }
        Ok(changes)
    }

    fn is_waiting_for_calling_code(state: &AsYouTypeState<'m>) -> bool {
        state.international && state.calling_code().is_none()
    }

    /// Tries another split of the typed digits after they could not be
    /// formatted. Returns `None` when no other split was found.
    pub fn re_extract_national_significant_number(
        &mut self,
        state: &mut AsYouTypeState<'m>,
    ) -> Result<Option<StateChanges>, InvalidRegexError> {
        if let Some(changes) = self.extract_another_national_significant_number(state)? {
            return Ok(Some(changes));
        }
        if let Some(mut changes) = self.extract_idd_prefix(state)? {
            changes |= self.extract_calling_code_and_national_significant_number(state)?;
            return Ok(Some(changes));
        }
        if let Some(mut changes) = self.fix_missing_plus(state)? {
            changes |= self.extract_calling_code_and_national_significant_number(state)?;
            return Ok(Some(changes));
        }
        Ok(None)
    }

    fn extract_national_significant_number(
        &mut self,
        state: &mut AsYouTypeState<'m>,
    ) -> Result<Option<StateChanges>, InvalidRegexError> {
        let Some(plan) = state.plan() else {
            return Ok(None);
        };
        let national_digits = state.national_digits().to_owned();
        let extracted = extract_national_number_from_possibly_incomplete_number(state.util(), plan, &national_digits)?;
        if extracted.national_number == national_digits {
            return Ok(None);
        }
        Ok(Some(self.on_extracted_national_number(extracted, &national_digits, state)))
    }

    /// With a national prefix for parsing that can match more than one
    /// prefix, the split may change as digits arrive, so it's retried.
    fn extract_another_national_significant_number(
        &mut self,
        state: &mut AsYouTypeState<'m>,
    ) -> Result<Option<StateChanges>, InvalidRegexError> {
        if !self.has_extracted_national_significant_number {
            return self.extract_national_significant_number(state);
        }
        let Some(plan) = state.plan() else {
            return Ok(None);
        };
        if !Self::could_possibly_extract_another_national_significant_number(state.util(), plan) {
            return Ok(None);
        }
        let national_digits = state.national_digits().to_owned();
        let extracted = extract_national_number_from_possibly_incomplete_number(state.util(), plan, &national_digits)?;
        if extracted.national_number == state.national_significant_number() {
            return Ok(None);
        }
        Ok(Some(self.on_extracted_national_number(extracted, &national_digits, state)))
    }

    fn could_possibly_extract_another_national_significant_number(util: &PhoneNumberUtil, plan: NumberingPlan<'_>) -> bool {
        plan.national_prefix_for_parsing()
            .is_some_and(|pattern| util.reg_exps().complex_national_prefix_pattern.is_match(pattern))
    }

    fn on_extracted_national_number(
        &mut self,
        extracted: ExtractedNationalNumber,
        national_digits: &str,
        state: &mut AsYouTypeState<'m>,
    ) -> StateChanges {
        let mut matches_input = false;
        let mut complex_prefix = None;
        let national_number = &extracted.national_number;
        if let Some(index) = national_digits.rfind(national_number.as_str()) {
            if index + national_number.len() == national_digits.len() {
                matches_input = true;
                let prefix_before_national_number = &national_digits[..index];
                if !prefix_before_national_number.is_empty()
                    && extracted.national_prefix.as_deref() != Some(prefix_before_national_number) {
                    complex_prefix = Some(prefix_before_national_number.to_owned());
                }
            }
        }
        trace!(
            "Extracted national significant number '{}' from '{}', national prefix {:?}, carrier code {:?}",
            national_number, national_digits, extracted.national_prefix, extracted.carrier_code
        );

        state.national_prefix = extracted.national_prefix;
        state.carrier_code = extracted.carrier_code;
        state.complex_prefix_before_national_significant_number = complex_prefix;
        state.national_significant_number_matches_input = matches_input;
        let _ = state.set_national_significant_number(extracted.national_number);
        self.has_extracted_national_significant_number = true;
        StateChanges::national_significant_number()
    }

    fn default_plan(&self, util: &'m PhoneNumberUtil) -> Option<NumberingPlan<'m>> {
        util.select_numbering_plan(self.defaults.country, self.defaults.calling_code)
    }

    fn extract_idd_prefix(&mut self, state: &mut AsYouTypeState<'m>) -> Result<Option<StateChanges>, InvalidRegexError> {
        if state.international || state.idd_prefix.is_some() {
            return Ok(None);
        }
        let Some(plan) = self.default_plan(state.util()) else {
            return Ok(None);
        };
        let Some(number_without_idd) = strip_idd_prefix(state.util(), plan, &state.digits)? else {
            return Ok(None);
        };
        let idd_prefix_len = state.digits.len() - number_without_idd.len();
        if idd_prefix_len == 0 {
            return Ok(None);
        }
        let idd_prefix = state.digits[..idd_prefix_len].to_owned();
        trace!("Found international dialling prefix '{}' in '{}'", idd_prefix, state.digits);
        state.idd_prefix = Some(idd_prefix);
        Ok(Some(self.start_international_number(state, None, None)))
    }

    fn start_international_number(
        &mut self,
        state: &mut AsYouTypeState<'m>,
        country: Option<&'m str>,
        calling_code: Option<i32>,
    ) -> StateChanges {
        let had_national_significant_number = !state.national_significant_number().is_empty();
        let mut changes = state.start_international_number(country, calling_code);
        // The national prefix and carrier code of a national split no
        // longer apply.
        changes |= state.reset_national_significant_number();
        if had_national_significant_number {
            changes |= StateChanges::national_significant_number();
        }
        self.has_extracted_national_significant_number = false;
        changes
    }

    /// Reads the calling code following the plus sign or the international
    /// dialling prefix. The digits after it become the national significant
    /// number.
    fn extract_calling_code(&mut self, state: &mut AsYouTypeState<'m>) -> Option<StateChanges> {
        let (calling_code, national_significant_number) = extract_calling_code(
            state.util(),
            state.digits_without_international_prefix(),
        )
        .map(|(code, rest)| (code, rest.to_owned()))?;
        let changes = state.set_calling_code(Some(calling_code));
        Some(changes | state.set_national_significant_number(national_significant_number))
    }

    fn extract_calling_code_and_national_significant_number(
        &mut self,
        state: &mut AsYouTypeState<'m>,
    ) -> Result<StateChanges, InvalidRegexError> {
        let Some(mut changes) = self.extract_calling_code(state) else {
            return Ok(StateChanges::none());
        };
        if let Some(extracted_changes) = self.extract_national_significant_number(state)? {
            changes |= extracted_changes;
        }
        Ok(changes)
    }

    fn fix_missing_plus(&mut self, state: &mut AsYouTypeState<'m>) -> Result<Option<StateChanges>, InvalidRegexError> {
        if state.international {
            return Ok(None);
        }
        let Some(plan) = self.default_plan(state.util()) else {
            return Ok(None);
        };
        let Some(calling_code) = extract_calling_code_from_international_number_without_plus_sign(
            state.util(), plan, &state.digits
        )? else {
            return Ok(None);
        };
        state.missing_plus = true;
        let country = state.country();
        Ok(Some(self.start_international_number(state, country, Some(calling_code))))
    }
}

/// Returns the digits of the input chunk, converted to ASCII, and whether a
/// plus sign precedes the first of them. Other characters are dropped.
pub(super) fn extract_digits_and_plus(text: &str) -> (String, bool) {
    let normalized = dec_from_char::normalize_decimals(text);
    let mut digits = String::with_capacity(text.len());
    let mut has_plus = false;
    for char in normalized.chars() {
        if char.is_ascii_digit() {
            digits.push(char);
        } else if digits.is_empty() && PLUS_CHARS.contains(char) {
            has_plus = true;
        }
    }
    (digits, has_plus)
}

#[cfg(test)]
mod tests {
    use super::extract_digits_and_plus;

    #[test]
    fn extracts_digits_and_leading_plus() {
        assert_eq!(("442079".to_owned(), true), extract_digits_and_plus("+44 (20) 79"));
        assert_eq!(("12".to_owned(), true), extract_digits_and_plus("\u{FF0B}12"));
        assert_eq!(("12".to_owned(), false), extract_digits_and_plus("1+2"));
        assert_eq!((String::new(), true), extract_digits_and_plus("+"));
        assert_eq!((String::new(), false), extract_digits_and_plus("abc-"));
    }

    #[test]
    fn converts_unicode_digits() {
        assert_eq!(("123".to_owned(), false), extract_digits_and_plus("\u{0661}\u{0662}\u{0663}"));
        assert_eq!(("45".to_owned(), false), extract_digits_and_plus("\u{FF14}\u{FF15}"));
    }
}
