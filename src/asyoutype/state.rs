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

use std::ops::{BitOr, BitOrAssign};

use log::trace;

use crate::phonenumberutil::{numbering_plan::NumberingPlan, phonenumberutil::PhoneNumberUtil};

/// Fields of the session state changed by a mutation. Mutating methods
/// return it instead of notifying observers, the session reacts to it.
#[must_use]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct StateChanges {
    pub country: bool,
    pub calling_code: bool,
    /// The national significant number was split again from the digits,
    /// not merely extended with newly typed digits.
    pub national_significant_number: bool,
}

impl StateChanges {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn national_significant_number() -> Self {
        Self { national_significant_number: true, ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        !(self.country || self.calling_code || self.national_significant_number)
    }
}

impl BitOr for StateChanges {
    type Output = StateChanges;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            country: self.country || rhs.country,
            calling_code: self.calling_code || rhs.calling_code,
            national_significant_number: self.national_significant_number || rhs.national_significant_number,
        }
    }
}

impl BitOrAssign for StateChanges {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Validated session defaults.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct Defaults<'m> {
    pub country: Option<&'m str>,
    pub calling_code: Option<i32>,
}

/// Everything known about the number typed so far.
pub(super) struct AsYouTypeState<'m> {
    util: &'m PhoneNumberUtil,
    plan: Option<NumberingPlan<'m>>,

    country: Option<&'m str>,
    calling_code: Option<i32>,
    national_significant_number: String,

    /// Set once a country was picked by an unambiguous match of the
    /// national number. Cleared only when the calling code changes.
    pub country_confirmed: bool,
    /// The input started with a plus sign.
    pub leading_plus: bool,
    /// The digits start with a calling code, announced by a plus sign, an
    /// international dialling prefix or nothing at all.
    pub international: bool,
    /// The calling code was typed without a plus sign.
    pub missing_plus: bool,
    pub idd_prefix: Option<String>,
    pub digits: String,
    pub national_significant_number_matches_input: bool,
    pub national_prefix: Option<String>,
    pub carrier_code: Option<String>,
    pub complex_prefix_before_national_significant_number: Option<String>,
}

impl<'m> AsYouTypeState<'m> {
    pub fn new(util: &'m PhoneNumberUtil, defaults: Defaults<'m>) -> Self {
        let mut state = Self {
            util,
            plan: None,
            country: None,
            calling_code: None,
            national_significant_number: String::new(),
            country_confirmed: false,
            leading_plus: false,
            international: false,
            missing_plus: false,
            idd_prefix: None,
            digits: String::new(),
            national_significant_number_matches_input: true,
            national_prefix: None,
            carrier_code: None,
            complex_prefix_before_national_significant_number: None,
        };
        state.reset(defaults);
        state
    }

    /// Reinitializes every field. The only way to undo a mutation.
    pub fn reset(&mut self, defaults: Defaults<'m>) {
        self.leading_plus = false;
        self.international = false;
        self.missing_plus = false;
        self.idd_prefix = None;
        self.digits.clear();
        self.country = defaults.country;
        self.calling_code = defaults.calling_code;
        self.country_confirmed = false;
        self.plan = self.util.select_numbering_plan(self.country, self.calling_code);
        let _ = self.reset_national_significant_number();
    }

    pub fn util(&self) -> &'m PhoneNumberUtil {
        self.util
    }

    pub fn plan(&self) -> Option<NumberingPlan<'m>> {
        self.plan
    }

    pub fn country(&self) -> Option<&'m str> {
        self.country
    }

    pub fn calling_code(&self) -> Option<i32> {
        self.calling_code
    }

    pub fn national_significant_number(&self) -> &str {
        &self.national_significant_number
    }

    pub fn set_country(&mut self, country: Option<&'m str>) -> StateChanges {
        if self.country == country {
            return StateChanges::none();
        }
        trace!("Country changed from {:?} to {:?}", self.country, country);
        self.country = country;
        self.select_numbering_plan();
        StateChanges { country: true, ..StateChanges::default() }
    }

    pub fn set_calling_code(&mut self, calling_code: Option<i32>) -> StateChanges {
        if self.calling_code == calling_code {
            return StateChanges::none();
        }
        trace!("Calling code changed from {:?} to {:?}", self.calling_code, calling_code);
        self.calling_code = calling_code;
        self.country_confirmed = false;
        self.select_numbering_plan();
        StateChanges { calling_code: true, ..StateChanges::default() }
    }

    fn select_numbering_plan(&mut self) {
        self.plan = self.util.select_numbering_plan(self.country, self.calling_code);
    }

    pub fn start_international_number(&mut self, country: Option<&'m str>, calling_code: Option<i32>) -> StateChanges {
        self.international = true;
        self.set_country(country) | self.set_calling_code(calling_code)
    }

    pub fn append_digits(&mut self, digits: &str) {
        self.digits.push_str(digits);
    }

    /// Appending digits keeps the current split of the number, so it is
    /// not reported as a change.
    pub fn append_national_significant_number_digits(&mut self, digits: &str) {
        self.national_significant_number.push_str(digits);
    }

    pub fn set_national_significant_number(&mut self, national_significant_number: String) -> StateChanges {
        if self.national_significant_number == national_significant_number {
            return StateChanges::none();
        }
        self.national_significant_number = national_significant_number;
        StateChanges::national_significant_number()
    }

    /// Makes every national digit part of the national significant number.
    pub fn reset_national_significant_number(&mut self) -> StateChanges {
        self.national_significant_number_matches_input = true;
        self.national_prefix = None;
        self.carrier_code = None;
        self.complex_prefix_before_national_significant_number = None;
        let national_digits = self.national_digits().to_owned();
        self.set_national_significant_number(national_digits)
    }

    fn calling_code_len(&self) -> usize {
        self.calling_code
            .map(|code| itoa::Buffer::new().format(code).len())
            .unwrap_or(0)
    }

    /// Digits after the international dialling prefix, if one was typed.
    pub fn digits_without_international_prefix(&self) -> &str {
        match (&self.idd_prefix, self.international) {
            (Some(idd_prefix), true) => self.digits.get(idd_prefix.len()..).unwrap_or_default(),
            _ => &self.digits,
        }
    }

    /// Digits after the international dialling prefix and the calling code.
    pub fn national_digits(&self) -> &str {
        if !self.international {
            return &self.digits;
        }
        self.digits_without_international_prefix()
            .get(self.calling_code_len()..)
            .unwrap_or_default()
    }
}
