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

use crate::{
    PhoneNumberType,
    phonenumberutil::phonenumberutil::PhoneNumberUtil,
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
};

/// Country picked for a calling code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ResolvedCountry<'m> {
    /// The national number belongs to this country only, or the calling
    /// code has a single country.
    Confirmed(&'m str),
    /// Nothing decisive is known yet, the most likely country is used.
    Assumed(&'m str),
}

impl<'m> ResolvedCountry<'m> {
    pub fn country(&self) -> &'m str {
        match self {
            Self::Confirmed(country) | Self::Assumed(country) => country,
        }
    }
}

/// Picks the country of a calling code for the national significant number
/// typed so far.
///
/// Countries are tried main country first. A country with leading digits
/// is confirmed as soon as they match. Other countries are confirmed when
/// the number is a valid number of theirs, `default_country` winning if
/// several are. Without a match the default country, if it has the calling
/// code, or the main country is assumed. Non-geographic calling codes have
/// no country.
pub(super) fn resolve_country<'m>(
    util: &'m PhoneNumberUtil,
    calling_code: Option<i32>,
    national_significant_number: &str,
    default_country: Option<&str>,
) -> Result<Option<ResolvedCountry<'m>>, InvalidRegexError> {
    let Some(calling_code) = calling_code else {
        return Ok(None);
    };
    if util.is_non_geographic_calling_code(calling_code) {
        return Ok(None);
    }
    let countries = util.get_country_codes_for_calling_code(calling_code);
    let (main_country, other_countries) = match countries.as_slice() {
        [] => return Ok(None),
        [country] => return Ok(Some(ResolvedCountry::Confirmed(*country))),
        [main_country, other_countries @ ..] => (*main_country, other_countries),
    };

    if !national_significant_number.is_empty() {
        let mut first_match = None;
        for &country in std::iter::once(&main_country).chain(other_countries) {
            let Some(metadata) = util.get_metadata_for_region(country) else {
                continue;
            };
            if metadata.has_leading_digits() {
                let leading_digits = util.reg_exps().regexp_cache.get_regex(metadata.leading_digits())?;
                if leading_digits.matches_start(national_significant_number) {
                    trace!("Leading digits of '{national_significant_number}' confirm country {country}");
                    return Ok(Some(ResolvedCountry::Confirmed(country)));
                }
            } else if util.get_number_type_helper(national_significant_number, metadata) != PhoneNumberType::Unknown {
                if default_country == Some(country) {
                    return Ok(Some(ResolvedCountry::Confirmed(country)));
                }
                first_match.get_or_insert(country);
            }
        }
        if let Some(country) = first_match {
            trace!("Number '{national_significant_number}' confirms country {country}");
            return Ok(Some(ResolvedCountry::Confirmed(country)));
        }
    }

    let assumed = default_country
        .and_then(|default| countries.iter().copied().find(|country| *country == default))
        .unwrap_or(main_country);
    Ok(Some(ResolvedCountry::Assumed(assumed)))
}

#[cfg(test)]
mod tests {
    use super::{ResolvedCountry, resolve_country};
    use crate::PhoneNumberUtil;

    fn get_util() -> PhoneNumberUtil {
        PhoneNumberUtil::from_text_metadata(
            r#"
            metadata {
              id: "AA"
              country_code: 999
              main_country_for_code: true
              general_desc { national_number_pattern: "\\d{6}" possible_length: 6 }
              fixed_line { national_number_pattern: "[1-4]\\d{5}" }
            }
            metadata {
              id: "BB"
              country_code: 999
              general_desc { national_number_pattern: "\\d{6}" possible_length: 6 }
              fixed_line { national_number_pattern: "\\d{6}" }
            }
            metadata {
              id: "CC"
              country_code: 999
              leading_digits: "5"
              general_desc { national_number_pattern: "5\\d{5}" possible_length: 6 }
              fixed_line { national_number_pattern: "5\\d{5}" }
            }
            metadata {
              id: "DD"
              country_code: 998
              general_desc { national_number_pattern: "\\d{6}" possible_length: 6 }
            }
            metadata {
              id: "001"
              country_code: 888
              general_desc { national_number_pattern: "\\d{6}" possible_length: 6 }
            }
            "#,
        )
        .expect("Metadata should be valid")
    }

    #[test]
    fn main_country_wins_among_matches() {
        let util = get_util();
        assert_eq!(Ok(Some(ResolvedCountry::Confirmed("AA"))), resolve_country(&util, Some(999), "123456", None));
        // Only BB has numbers starting with 6.
        assert_eq!(Ok(Some(ResolvedCountry::Confirmed("BB"))), resolve_country(&util, Some(999), "623456", None));
    }

    #[test]
    fn default_country_wins_among_matches() {
        let util = get_util();
        assert_eq!(
            Ok(Some(ResolvedCountry::Confirmed("BB"))),
            resolve_country(&util, Some(999), "123456", Some("BB"))
        );
        // Not a number of the default country.
        assert_eq!(
            Ok(Some(ResolvedCountry::Confirmed("AA"))),
            resolve_country(&util, Some(999), "123456", Some("DD"))
        );
    }

    #[test]
    fn leading_digits_confirm_country() {
        let util = get_util();
        assert_eq!(Ok(Some(ResolvedCountry::Confirmed("CC"))), resolve_country(&util, Some(999), "5", None));
        assert_eq!(Ok(Some(ResolvedCountry::Confirmed("CC"))), resolve_country(&util, Some(999), "512345", None));
    }

    #[test]
    fn country_is_assumed_without_match() {
        let util = get_util();
        assert_eq!(Ok(Some(ResolvedCountry::Assumed("AA"))), resolve_country(&util, Some(999), "", None));
        assert_eq!(Ok(Some(ResolvedCountry::Assumed("AA"))), resolve_country(&util, Some(999), "12", None));
        assert_eq!(Ok(Some(ResolvedCountry::Assumed("BB"))), resolve_country(&util, Some(999), "12", Some("BB")));
        assert_eq!(Ok(Some(ResolvedCountry::Assumed("AA"))), resolve_country(&util, Some(999), "12", Some("DD")));
    }

    #[test]
    fn single_country_is_confirmed() {
        let util = get_util();
        assert_eq!(Ok(Some(ResolvedCountry::Confirmed("DD"))), resolve_country(&util, Some(998), "", None));
        assert_eq!("DD", resolve_country(&util, Some(998), "1", None).unwrap().unwrap().country());
    }

    #[test]
    fn no_country_for_unknown_or_non_geographic_codes() {
        let util = get_util();
        assert_eq!(Ok(None), resolve_country(&util, None, "123456", None));
        assert_eq!(Ok(None), resolve_country(&util, Some(997), "123456", None));
        assert_eq!(Ok(None), resolve_country(&util, Some(888), "123456", None));
    }
}
