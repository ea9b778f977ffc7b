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
    complete::format_complete_number,
    pattern_matcher::PatternMatcher,
    state::AsYouTypeState,
    template_util::{
        cut_and_strip_non_paired_parens, mask_digits, parse_digits, populate_template_with_digits,
    },
};
use crate::{
    NumberLengthType,
    phonemetadata::NumberFormat,
    phonenumberutil::{
        helper_constants::{
            DIGIT_PLACEHOLDER, DUMMY_DIGIT, LONGEST_DUMMY_PHONE_NUMBER, MIN_LEADING_DIGITS_LENGTH,
            PLUS_SIGN,
        },
        numbering_plan::NumberingPlan,
        phonenumberutil::PhoneNumberUtil,
    },
    regex_util::to_replacement,
    regexp_cache::InvalidRegexError,
};

/// Keeps the formats of the selected plan that still fit the digits typed
/// so far and renders the national number through one of them.
pub(super) struct AsYouTypeFormatter<'m> {
    util: &'m PhoneNumberUtil,
    plan: Option<NumberingPlan<'m>>,
    matching_formats: Vec<&'m NumberFormat>,
    chosen_format: Option<&'m NumberFormat>,
    /// Template of the whole number, including the international prefix and
    /// the calling code.
    template: Option<String>,
    populated_national_number_template: Option<String>,
    /// Index of the last digit put into the populated template.
    populated_national_number_template_position: Option<usize>,
}

impl<'m> AsYouTypeFormatter<'m> {
    pub fn new(util: &'m PhoneNumberUtil) -> Self {
        Self {
            util,
            plan: None,
            matching_formats: Vec::new(),
            chosen_format: None,
            template: None,
            populated_national_number_template: None,
            populated_national_number_template_position: None,
        }
    }

    /// Reloads the candidate formats of `plan`.
    pub fn reset(&mut self, plan: Option<NumberingPlan<'m>>, state: &AsYouTypeState<'m>) -> Result<(), InvalidRegexError> {
        self.plan = plan;
        self.reset_format();
        self.matching_formats = plan
            .map(|plan| plan.formats().iter().collect())
            .unwrap_or_default();
        if !state.national_significant_number().is_empty() {
            self.narrow_down_matching_formats(state)?;
        }
        Ok(())
    }

    fn reset_format(&mut self) {
        self.chosen_format = None;
        self.template = None;
        self.populated_national_number_template = None;
        self.populated_national_number_template_position = None;
    }

    fn is_chosen(&self, format: &NumberFormat) -> bool {
        self.chosen_format.is_some_and(|chosen| std::ptr::eq(chosen, format))
    }

    /// Drops the formats whose leading digits no longer match the national
    /// significant number or that can't be used with the typed national
    /// prefix.
    pub fn narrow_down_matching_formats(&mut self, state: &AsYouTypeState<'m>) -> Result<(), InvalidRegexError> {
        let national_significant_number = state.national_significant_number();
        let leading_digits_pattern_index = national_significant_number
            .len()
            .saturating_sub(MIN_LEADING_DIGITS_LENGTH);

        let mut narrowed = Vec::with_capacity(self.matching_formats.len());
        for &format in &self.matching_formats {
            if format_suits(self.util, format, state)
                && self.format_matches(format, national_significant_number, leading_digits_pattern_index)? {
                narrowed.push(format);
            }
        }
        trace!(
            "Narrowed formats for '{}' from {} to {}",
            national_significant_number,
            self.matching_formats.len(),
            narrowed.len()
        );
        self.matching_formats = narrowed;

        if let Some(chosen) = self.chosen_format {
            if !self.matching_formats.iter().any(|format| std::ptr::eq(*format, chosen)) {
                self.reset_format();
            }
        }
        Ok(())
    }

    fn format_matches(
        &self,
        format: &NumberFormat,
        national_significant_number: &str,
        leading_digits_pattern_index: usize,
    ) -> Result<bool, InvalidRegexError> {
        let leading_digits_patterns = &format.leading_digits_pattern;
        if leading_digits_patterns.is_empty() {
            return Ok(true);
        }
        let index = leading_digits_pattern_index.min(leading_digits_patterns.len() - 1);
        let leading_digits_pattern = &leading_digits_patterns[index];

        // A regex can't tell whether a couple of digits may still grow into
        // a match, so short numbers go through the pattern matcher.
        if national_significant_number.len() < MIN_LEADING_DIGITS_LENGTH {
            return Ok(match PatternMatcher::new(leading_digits_pattern) {
                Ok(matcher) => matcher.match_prefix(national_significant_number),
                Err(err) => {
                    trace!("Leading digits pattern '{leading_digits_pattern}' treated as matching: {err}");
                    true
                }
            });
        }
        let pattern = self.util.reg_exps().regexp_cache.get_prefix_regex(leading_digits_pattern)?;
        Ok(pattern.is_match(national_significant_number))
    }

    /// Formats the national part of the number.
    ///
    /// `next_digits` are the digits typed by the last input. Returns `None`
    /// when no format can take the number.
    pub fn format(&mut self, next_digits: &str, state: &AsYouTypeState<'m>) -> Result<Option<String>, InvalidRegexError> {
        let Some(plan) = self.plan else {
            return Ok(None);
        };
        if self.can_format_complete_number(plan, state) {
            for format in self.matching_formats.clone() {
                let Some(formatted) = format_complete_number(self.util, plan, format, state)? else {
                    continue;
                };
                trace!("Formatted complete number '{}' as '{}'", state.national_significant_number(), formatted);
                self.reset_format();
                self.chosen_format = Some(format);
                self.set_national_number_template(mask_digits(&formatted, DIGIT_PLACEHOLDER), state);
                self.populated_national_number_template_position = formatted.rfind(|char: char| char.is_ascii_digit());
                self.populated_national_number_template = Some(formatted.clone());
                return Ok(Some(formatted));
            }
        }
        self.format_national_number_with_next_digits(plan, next_digits, state)
    }

    fn can_format_complete_number(&self, plan: NumberingPlan<'m>, state: &AsYouTypeState<'m>) -> bool {
        self.util.test_number_length(state.national_significant_number(), plan.metadata())
            == Ok(NumberLengthType::IsPossible)
    }

    fn format_national_number_with_next_digits(
        &mut self,
        plan: NumberingPlan<'m>,
        next_digits: &str,
        state: &AsYouTypeState<'m>,
    ) -> Result<Option<String>, InvalidRegexError> {
        let previously_chosen_format = self.chosen_format;
        let Some(chosen_format) = self.choose_format(plan, state)? else {
            return Ok(None);
        };
        let is_same_format = previously_chosen_format.is_some_and(|previous| std::ptr::eq(previous, chosen_format));
        // A newly chosen template is empty, all national digits go in.
        if is_same_format {
            Ok(self.format_next_national_number_digits(next_digits))
        } else {
            Ok(self.format_next_national_number_digits(state.national_digits()))
        }
    }

    fn format_next_national_number_digits(&mut self, digits: &str) -> Option<String> {
        let populated = populate_template_with_digits(
            self.populated_national_number_template.as_deref()?,
            self.populated_national_number_template_position,
            digits,
        );
        let Some((populated, position)) = populated else {
            trace!("Template of chosen format has no room for '{digits}'");
            self.reset_format();
            return None;
        };
        let cut_before_index = position.map_or(0, |position| position + 1);
        let formatted = cut_and_strip_non_paired_parens(&populated, cut_before_index);
        self.populated_national_number_template = Some(populated);
        self.populated_national_number_template_position = position;
        Some(formatted)
    }

    /// Picks the first candidate format that a template can be built for.
    /// The chosen format is kept while it stays a candidate.
    fn choose_format(&mut self, plan: NumberingPlan<'m>, state: &AsYouTypeState<'m>) -> Result<Option<&'m NumberFormat>, InvalidRegexError> {
        for format in self.matching_formats.clone() {
            if self.is_chosen(format) {
                break;
            }
            let Some(number_format) = format_for_style(plan, format, state.international) else {
                continue;
            };
            if !self.util.reg_exps().is_format_eligible_as_you_type_formatting_regex.is_match(number_format) {
                continue;
            }
            if !self.create_template_for_format(plan, format, state)? {
                self.matching_formats.retain(|candidate| !std::ptr::eq(*candidate, format));
                continue;
            }
            trace!("Chose format '{}' -> '{}'", format.pattern(), number_format);
            self.chosen_format = Some(format);
            break;
        }
        if self.chosen_format.is_none() {
            self.reset_format();
        }
        Ok(self.chosen_format)
    }

    fn create_template_for_format(
        &mut self,
        plan: NumberingPlan<'m>,
        format: &'m NumberFormat,
        state: &AsYouTypeState<'m>,
    ) -> Result<bool, InvalidRegexError> {
        // Alternations inside a number pattern can't be turned into a
        // single template.
        if format.pattern().contains('|') {
            return Ok(false);
        }
        let Some(template) = self.get_template_for_format(plan, format, state)? else {
            return Ok(false);
        };
        self.set_national_number_template(template, state);
        Ok(true)
    }

    fn get_template_for_format(
        &self,
        plan: NumberingPlan<'m>,
        format: &'m NumberFormat,
        state: &AsYouTypeState<'m>,
    ) -> Result<Option<String>, InvalidRegexError> {
        let reg_exps = self.util.reg_exps();
        let national_significant_number = state.national_significant_number();

        // "[1-5]" and literal digits become "\d" so that the dummy number
        // matches the longest number the pattern accepts.
        let pattern = reg_exps.character_class_pattern.replace_all(format.pattern(), "\\d");
        let pattern = replace_standalone_digits(&pattern);
        let number_pattern = reg_exps.regexp_cache.get_regex(&pattern)?;
        let Some(longest_match) = number_pattern.find(LONGEST_DUMMY_PHONE_NUMBER) else {
            return Ok(None);
        };
        let mut digits = longest_match.as_str().to_owned();
        if national_significant_number.len() > digits.len() {
            return Ok(None);
        }
        let national_number_dummy_digits = mask_digits(national_significant_number, DUMMY_DIGIT);
        if reg_exps.regexp_cache.get_full_match_regex(&pattern)?.is_match(&national_number_dummy_digits) {
            digits = national_number_dummy_digits;
        }

        let Some(mut number_format) = format_for_style(plan, format, state.international).map(str::to_owned) else {
            return Ok(None);
        };
        let mut national_prefix_included_in_template = false;
        if should_try_national_prefix_formatting_rule(self.util, format, state) {
            let rule = format.national_prefix_formatting_rule();
            let national_prefix = state.national_prefix.as_deref().unwrap_or_default();
            // The rule goes into the template only if it adds exactly the
            // national prefix the user typed.
            if parse_digits(rule) == fast_cat::concat_str!(national_prefix, "1") {
                number_format = reg_exps
                    .first_group_capturing_pattern
                    .replace(&number_format, &*to_replacement(rule))
                    .into_owned();
                number_format = mask_leading_digits(&number_format, national_prefix.len());
                national_prefix_included_in_template = true;
            }
        }

        let mut template = number_pattern
            .replace(&digits, &*to_replacement(&number_format))
            .replace(DUMMY_DIGIT, &DIGIT_PLACEHOLDER.to_string());

        if !national_prefix_included_in_template {
            if let Some(complex_prefix) = &state.complex_prefix_before_national_significant_number {
                template = fast_cat::concat_str!(&placeholders(complex_prefix.len()), " ", &template);
            } else if let Some(national_prefix) = &state.national_prefix {
                template = fast_cat::concat_str!(
                    &placeholders(national_prefix.len()),
                    separator_after_national_prefix(self.util, plan, format),
                    &template
                );
            }
        }
        if state.international {
            template = apply_international_separator_style(self.util, &template);
        }
        Ok(Some(template))
    }

    fn set_national_number_template(&mut self, template: String, state: &AsYouTypeState<'m>) {
        self.template = Some(if state.international {
            let international_prefix = international_prefix_before_calling_code(state, true);
            let calling_code_len = state
                .calling_code()
                .map(|code| itoa::Buffer::new().format(code).len())
                .unwrap_or(0);
            fast_cat::concat_str!(
                &mask_international_prefix(&international_prefix),
                &placeholders(calling_code_len),
                " ",
                &template
            )
        } else {
            template.clone()
        });
        self.populated_national_number_template = Some(template);
        self.populated_national_number_template_position = None;
    }

    /// The template of the chosen format, cut after the placeholder of the
    /// last typed digit.
    pub fn get_template(&self, state: &AsYouTypeState<'m>) -> Option<String> {
        let template = self.template.as_deref()?;
        let international_prefix_len = if state.international {
            international_prefix_before_calling_code(state, false).len()
        } else {
            0
        };
        let typed_count = international_prefix_len + state.digits_without_international_prefix().len();
        let last_typed_index = template
            .match_indices(DIGIT_PLACEHOLDER)
            .take(typed_count)
            .last()
            .map(|(index, _)| index);
        let cut_before_index = last_typed_index.map_or(0, |index| index + 1);
        Some(cut_and_strip_non_paired_parens(template, cut_before_index))
    }
}

/// The prefix shown before the calling code of an international number.
///
/// `spacing` adds a space after an international dialling prefix.
pub(super) fn international_prefix_before_calling_code<'s>(state: &'s AsYouTypeState<'_>, spacing: bool) -> std::borrow::Cow<'s, str> {
    match &state.idd_prefix {
        Some(idd_prefix) if spacing => fast_cat::concat_str!(idd_prefix, " ").into(),
        Some(idd_prefix) => idd_prefix.as_str().into(),
        None if state.missing_plus => "".into(),
        None => PLUS_SIGN.into(),
    }
}

fn mask_international_prefix(prefix: &str) -> String {
    prefix
        .chars()
        .map(|char| if char.is_ascii_digit() || char == '+' { DIGIT_PLACEHOLDER } else { char })
        .collect()
}

fn placeholders(count: usize) -> String {
    std::iter::repeat_n(DIGIT_PLACEHOLDER, count).collect()
}

/// Replaces the first `count` ASCII digits of `string` with placeholders.
fn mask_leading_digits(string: &str, count: usize) -> String {
    let mut remaining = count;
    string
        .chars()
        .map(|char| {
            if remaining > 0 && char.is_ascii_digit() {
                remaining -= 1;
                DIGIT_PLACEHOLDER
            } else {
                char
            }
        })
        .collect()
}

/// Replaces a literal digit of a number pattern with `\d` unless it is part
/// of a `{n,m}` quantifier, i.e. one of the two characters after it is `,`
/// or `}`.
fn replace_standalone_digits(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut replaced = String::with_capacity(pattern.len() * 2);
    for (index, &char) in chars.iter().enumerate() {
        let is_standalone = char.is_ascii_digit()
            && chars
                .get(index + 1..index + 3)
                .is_some_and(|next| next.iter().all(|next| *next != ',' && *next != '}'));
        if is_standalone {
            replaced.push_str("\\d");
        } else {
            replaced.push(char);
        }
    }
    replaced
}

/// The format used for the current input style. `None` for formats that
/// must not be used internationally.
fn format_for_style<'m>(plan: NumberingPlan<'m>, format: &'m NumberFormat, international: bool) -> Option<&'m str> {
    if international {
        plan.international_format(format)
    } else {
        Some(format.format())
    }
}

/// Whether the formatting rule of `format` adds a national prefix rather
/// than optional parentheses around the first group.
fn uses_national_prefix(util: &PhoneNumberUtil, format: &NumberFormat) -> bool {
    let rule = format.national_prefix_formatting_rule();
    !rule.is_empty() && !util.reg_exps().formatting_rule_has_first_group_only_regex.is_match(rule)
}

/// A format can't render a typed national prefix it has no place for, and
/// a format requiring the national prefix is unusable without one.
fn format_suits(util: &PhoneNumberUtil, format: &NumberFormat, state: &AsYouTypeState<'_>) -> bool {
    let uses_national_prefix = uses_national_prefix(util, format);
    let optional = format.national_prefix_optional_when_formatting();
    if state.national_prefix.is_some() && !uses_national_prefix && !optional {
        return false;
    }
    if !state.international && state.national_prefix.is_none() && uses_national_prefix && !optional {
        return false;
    }
    true
}

pub(super) fn should_try_national_prefix_formatting_rule(
    util: &PhoneNumberUtil,
    format: &NumberFormat,
    state: &AsYouTypeState<'_>,
) -> bool {
    if format.national_prefix_formatting_rule().is_empty() {
        return false;
    }
    let uses_national_prefix = uses_national_prefix(util, format);
    (uses_national_prefix && state.national_prefix.is_some()) || (!uses_national_prefix && !state.international)
}

pub(super) fn separator_after_national_prefix(
    util: &PhoneNumberUtil,
    plan: NumberingPlan<'_>,
    format: &NumberFormat,
) -> &'static str {
    if plan.is_nanpa()
        || util
            .reg_exps()
            .national_prefix_separators_pattern
            .is_match(format.national_prefix_formatting_rule()) {
        " "
    } else {
        ""
    }
}

/// Collapses punctuation to single spaces, as international numbers are
/// written.
pub(super) fn apply_international_separator_style(util: &PhoneNumberUtil, formatted: &str) -> String {
    util.reg_exps()
        .separator_pattern
        .replace_all(formatted, " ")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::{mask_leading_digits, replace_standalone_digits};

    #[test]
    fn standalone_digits_are_generalized() {
        assert_eq!("(\\d{3})(\\d{4})", replace_standalone_digits("(\\d{3})(\\d{4})"));
        assert_eq!("(\\d\\d\\d)(\\d{4})", replace_standalone_digits("(800)(\\d{4})"));
        assert_eq!("(\\d{10,11})", replace_standalone_digits("(\\d{10,11})"));
    }

    #[test]
    fn masks_national_prefix_digits() {
        assert_eq!("x ($1) $2-$3-$4", mask_leading_digits("8 ($1) $2-$3-$4", 1));
        assert_eq!("$1 $2", mask_leading_digits("$1 $2", 0));
    }
}
