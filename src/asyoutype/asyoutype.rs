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

use std::borrow::Cow;

use log::{trace, warn};

use super::{
    country_resolver::{ResolvedCountry, resolve_country},
    formatter::{AsYouTypeFormatter, international_prefix_before_calling_code},
    options::AsYouTypeOptions,
    parser::AsYouTypeParser,
    state::{AsYouTypeState, Defaults, StateChanges},
};
use crate::{
    PHONE_NUMBER_UTIL,
    phonenumber::PhoneNumber,
    phonenumberutil::{
        errors::RegexResultExt, helper_constants::PLUS_SIGN, phonenumberutil::PhoneNumberUtil,
    },
    regexp_cache::InvalidRegexError,
};

/// Formats a phone number while it is being typed.
///
/// Every call to [`input`](Self::input) takes the next characters typed by
/// the user and returns the whole number formatted so far:
///
/// ```
/// use asyoutype::{AsYouType, AsYouTypeOptions};
///
/// let mut formatter = AsYouType::new(AsYouTypeOptions::from("US"));
/// assert_eq!("222-33", formatter.input("22233"));
/// assert_eq!("(222) 333-4444", formatter.input("34444"));
/// assert_eq!(Some("+12223334444".to_owned()), formatter.get_number_value());
/// ```
///
/// A session is owned by a single caller. The numbering plan database is
/// shared and may be used by any number of sessions at once.
pub struct AsYouType<'m> {
    util: &'m PhoneNumberUtil,
    defaults: Defaults<'m>,
    state: AsYouTypeState<'m>,
    parser: AsYouTypeParser<'m>,
    formatter: AsYouTypeFormatter<'m>,
    formatted_output: String,
}

impl AsYouType<'static> {
    /// Creates a session using the numbering plans compiled into the
    /// library.
    pub fn new(options: AsYouTypeOptions) -> Self {
        Self::with_util(options, &PHONE_NUMBER_UTIL)
    }
}

impl<'m> AsYouType<'m> {
    pub fn with_util(options: AsYouTypeOptions, util: &'m PhoneNumberUtil) -> Self {
        let defaults = Self::resolve_defaults(util, &options);
        let mut as_you_type = Self {
            util,
            defaults,
            state: AsYouTypeState::new(util, defaults),
            parser: AsYouTypeParser::new(defaults),
            formatter: AsYouTypeFormatter::new(util),
            formatted_output: String::new(),
        };
        as_you_type.reset();
        as_you_type
    }

    fn resolve_defaults(util: &'m PhoneNumberUtil, options: &AsYouTypeOptions) -> Defaults<'m> {
        let country = options.default_country.as_deref().and_then(|country| {
            let metadata = util.get_metadata_for_region(country);
            if metadata.is_none() {
                warn!("Unknown default country '{country}' is ignored");
            }
            metadata.map(|metadata| metadata.id())
        });
        if country.is_some() {
            return Defaults { country, calling_code: None };
        }
        let calling_code = options.default_calling_code.as_deref().and_then(|calling_code| {
            let parsed = calling_code
                .parse::<i32>()
                .ok()
                .filter(|code| util.has_calling_code(*code));
            if parsed.is_none() {
                warn!("Unknown default calling code '{calling_code}' is ignored");
            }
            parsed
        });
        Defaults { country, calling_code }
    }

    /// Takes the next typed characters and returns the whole number
    /// formatted so far.
    ///
    /// Characters other than digits and a plus sign starting the number are
    /// ignored.
    pub fn input(&mut self, text: &str) -> &str {
        self.try_input(text).into_public();
        &self.formatted_output
    }

    fn try_input(&mut self, text: &str) -> Result<(), InvalidRegexError> {
        let (parsed, changes) = self.parser.input(text, &mut self.state)?;
        self.on_state_changes(changes)?;

        if parsed.just_leading_plus {
            self.formatted_output = PLUS_SIGN.to_owned();
            return Ok(());
        }
        if parsed.digits.is_empty() {
            return Ok(());
        }

        self.determine_country_if_needed()?;
        if !self.state.national_significant_number().is_empty() {
            self.formatter.narrow_down_matching_formats(&self.state)?;
        }
        let formatted = match self.try_format(&parsed.digits)? {
            Some(formatted) => Some(formatted),
            None => self.try_format_after_resplit()?,
        };
        self.formatted_output = match formatted {
            Some(formatted) => self.get_full_number(&formatted),
            None => self.get_non_formatted_number(),
        };
        Ok(())
    }

    fn try_format(&mut self, next_digits: &str) -> Result<Option<String>, InvalidRegexError> {
        if self.state.plan().is_none() {
            return Ok(None);
        }
        self.formatter.format(next_digits, &self.state)
    }

    /// Splits the digits once more and formats the new national number.
    fn try_format_after_resplit(&mut self) -> Result<Option<String>, InvalidRegexError> {
        let Some(changes) = self.parser.re_extract_national_significant_number(&mut self.state)? else {
            return Ok(None);
        };
        self.on_state_changes(changes)?;
        self.determine_country_if_needed()?;
        let national_digits = self.state.national_digits().to_owned();
        if national_digits.is_empty() {
            return Ok(None);
        }
        self.formatter.format(&national_digits, &self.state)
    }

    fn on_state_changes(&mut self, changes: StateChanges) -> Result<(), InvalidRegexError> {
        if changes.is_empty() {
            return Ok(());
        }
        if changes.national_significant_number {
            self.determine_country_if_needed()?;
        }
        self.formatter.reset(self.state.plan(), &self.state)
    }

    fn is_calling_code_ambiguous(&self) -> bool {
        self.state
            .calling_code()
            .is_some_and(|code| self.util.get_country_codes_for_calling_code(code).len() > 1)
    }

    fn determine_country_if_needed(&mut self) -> Result<(), InvalidRegexError> {
        if self.state.country().is_some() && !self.is_calling_code_ambiguous() {
            return Ok(());
        }
        let calling_code = if self.state.international {
            self.state.calling_code()
        } else {
            self.defaults.calling_code
        };
        let resolved = resolve_country(
            self.util,
            calling_code,
            self.state.national_significant_number(),
            self.defaults.country,
        )?;
        let changes = match resolved {
            Some(ResolvedCountry::Confirmed(country)) => {
                self.state.country_confirmed = true;
                self.state.set_country(Some(country))
            }
            // A confirmed country stays until the calling code changes.
            _ if self.state.country_confirmed => StateChanges::none(),
            resolved => self.state.set_country(resolved.map(|resolved| resolved.country())),
        };
        if changes.country {
            trace!("Country is now {:?} ({:?})", self.state.country(), resolved);
            self.formatter.reset(self.state.plan(), &self.state)?;
        }
        Ok(())
    }

    /// Prepends the international prefix and the calling code to the
    /// national part of an international number.
    fn get_full_number(&self, formatted_national_number: &str) -> String {
        if !self.state.international {
            return formatted_national_number.to_owned();
        }
        let text: Cow<'_, str> = match self.state.calling_code() {
            None => self.state.digits_without_international_prefix().into(),
            Some(calling_code) => {
                let mut buf = itoa::Buffer::new();
                let calling_code = buf.format(calling_code);
                if formatted_national_number.is_empty() {
                    calling_code.to_owned().into()
                } else {
                    fast_cat::concat_str!(calling_code, " ", formatted_national_number).into()
                }
            }
        };
        let prefix = international_prefix_before_calling_code(&self.state, !text.is_empty());
        fast_cat::concat_str!(&*prefix, &*text)
    }

    fn get_non_formatted_number(&self) -> String {
        if !self.state.national_significant_number_matches_input {
            return self.get_full_number(self.state.national_digits());
        }
        let national_significant_number = self.state.national_significant_number();
        let prefix = self
            .state
            .complex_prefix_before_national_significant_number
            .as_deref()
            .or(self.state.national_prefix.as_deref());
        match prefix {
            Some(prefix) => self.get_full_number(&fast_cat::concat_str!(prefix, national_significant_number)),
            None => self.get_full_number(national_significant_number),
        }
    }

    /// Clears everything typed so far. The options are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.state.reset(self.defaults);
        self.parser.reset();
        self.formatter.reset(self.state.plan(), &self.state).into_public();
        self.formatted_output.clear();
        self
    }

    /// Whether the number was typed with a leading plus sign.
    ///
    /// Numbers typed with an international dialling prefix or with a
    /// calling code but no plus sign are formatted as international ones,
    /// yet this still returns `false` for them.
    pub fn is_international(&self) -> bool {
        self.state.leading_plus
    }

    /// The calling code of a number typed in international format.
    pub fn get_calling_code(&self) -> Option<String> {
        if !self.state.international {
            return None;
        }
        self.state
            .calling_code()
            .map(|code| itoa::Buffer::new().format(code).to_owned())
    }

    /// The country of the number. `None` before any digit is typed and for
    /// non-geographic calling codes.
    pub fn get_country(&self) -> Option<&'m str> {
        if self.state.digits.is_empty() {
            return None;
        }
        self.state.country()
    }

    /// The number typed so far in E.164 format.
    ///
    /// `None` if no digit has been typed, or the number is typed in
    /// national format without a default country or calling code.
    pub fn get_number_value(&self) -> Option<String> {
        let state = &self.state;
        if state.digits.is_empty() {
            return None;
        }
        let mut buf = itoa::Buffer::new();
        if state.international {
            return Some(match state.calling_code() {
                Some(calling_code) => fast_cat::concat_str!(
                    PLUS_SIGN,
                    buf.format(calling_code),
                    state.national_significant_number()
                ),
                None => fast_cat::concat_str!(PLUS_SIGN, &state.digits),
            });
        }
        let calling_code = self.national_calling_code()?;
        Some(fast_cat::concat_str!(PLUS_SIGN, buf.format(calling_code), state.national_significant_number()))
    }

    /// The calling code of the known country, else the calling code of the
    /// session.
    fn national_calling_code(&self) -> Option<i32> {
        match self.state.country() {
            Some(_) => self.state.plan().map(|plan| plan.calling_code()),
            None => self.state.calling_code(),
        }
    }

    /// The number typed so far.
    ///
    /// `None` if no national significant number digit has been typed, if
    /// neither the country nor the calling code is known, or if the national
    /// number is too long to be stored.
    pub fn get_number(&self) -> Option<PhoneNumber> {
        let state = &self.state;
        let national_significant_number = state.national_significant_number();
        if national_significant_number.is_empty() {
            return None;
        }
        let calling_code = self.national_calling_code()?;
        let national_number = national_significant_number.parse::<u64>().ok()?;

        let mut phone_number = PhoneNumber::new();
        phone_number.set_country_code(calling_code);
        phone_number.set_national_number(national_number);
        if national_significant_number.len() > 1 && national_significant_number.starts_with('0') {
            phone_number.set_italian_leading_zero(true);
            let leading_zeros = national_significant_number
                .chars()
                .take_while(|char| *char == '0')
                .count()
                .min(national_significant_number.len() - 1);
            if leading_zeros > 1 {
                phone_number.set_number_of_leading_zeros(leading_zeros as i32);
            }
        }
        if let Some(carrier_code) = &state.carrier_code {
            phone_number.set_preferred_domestic_carrier_code(carrier_code.clone());
        }
        Some(phone_number)
    }

    /// Whether the number typed so far has a possible length.
    pub fn is_possible(&self) -> bool {
        self.get_number()
            .is_some_and(|phone_number| self.util.is_possible_number(&phone_number))
    }

    /// Whether the number typed so far is a valid number.
    pub fn is_valid(&self) -> bool {
        let Some(phone_number) = self.get_number() else {
            return false;
        };
        match self.state.country() {
            Some(country) => self.util.is_valid_number_for_region(&phone_number, country),
            None => self.util.is_valid_number(&phone_number).into_public(),
        }
    }

    /// The national significant number typed so far.
    pub fn get_national_significant_number(&self) -> &str {
        self.state.national_significant_number()
    }

    /// Carrier selection code typed before the national number.
    pub fn get_carrier_code(&self) -> Option<&str> {
        self.state.carrier_code.as_deref()
    }

    /// The typed digits, preceded by the plus sign if the number started
    /// with one.
    pub fn get_chars(&self) -> String {
        if self.state.leading_plus {
            fast_cat::concat_str!(PLUS_SIGN, &self.state.digits)
        } else {
            self.state.digits.clone()
        }
    }

    /// The template of the number typed so far, `x` standing for each
    /// digit. Empty while no format fits the number.
    pub fn get_template(&self) -> String {
        self.formatter.get_template(&self.state).unwrap_or_default()
    }
}

impl std::fmt::Debug for AsYouType<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsYouType")
            .field("defaults", &self.defaults)
            .field("digits", &self.state.digits)
            .field("formatted_output", &self.formatted_output)
            .finish()
    }
}
