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

use std::collections::{HashMap, VecDeque};

use log::{trace, warn};

use super::{
    NumberLengthType, PhoneNumberType,
    errors::{MetadataError, ValidationError},
    helper_constants::REGION_CODE_FOR_NON_GEO_ENTITY,
    helper_functions::{
        self, expand_formatting_rules, load_compiled_metadata, parse_metadata,
        test_number_length_with_unknown_type,
    },
    numbering_plan::NumberingPlan,
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
};
use crate::{
    i18n,
    interfaces::MatcherApi,
    proto_gen::{
        phonemetadata::{PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc},
        phonenumber::PhoneNumber,
    },
    regex_based_matcher::RegexBasedMatcher,
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
};

/// The numbering-plan database: metadata of every country and
/// non-geographic entity, indexed for the lookups needed while a number is
/// being typed, plus number validation.
pub struct PhoneNumberUtil {
    /// An API for validation checking.
    matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions.
    reg_exps: PhoneNumberRegExpsAndMappings,

    /// A mapping from a country calling code to the region codes which denote
    /// the regions represented by that country calling code. Regions under
    /// NANPA share the country calling code 1 and Russia and Kazakhstan share
    /// the country calling code 7. The main country for a code is always
    /// first. This is implemented as a sorted vector to achieve better
    /// performance.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// A mapping from a region code to a PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// A mapping from a country calling code for a non-geographical entity to the
    /// PhoneMetadata for that country calling code. Examples of the country
    /// calling codes include 800 (International Toll Free Service) and 808
    /// (International Shared Cost Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,
}

impl PhoneNumberUtil {
    /// Loads the metadata compiled into the library.
    pub(super) fn new() -> Result<Self, MetadataError> {
        Self::new_for_metadata(load_compiled_metadata()?)
    }

    /// Loads a `PhoneMetadataCollection` written in protobuf text format.
    pub fn from_text_metadata(text: &str) -> Result<Self, MetadataError> {
        Self::new_for_metadata(parse_metadata(text)?)
    }

    pub fn new_for_metadata(metadata_collection: PhoneMetadataCollection) -> Result<Self, MetadataError> {
        let reg_exps = PhoneNumberRegExpsAndMappings::new();
        let mut instance = Self {
            matcher_api: Box::new(RegexBasedMatcher::new(reg_exps.regexp_cache.clone())),
            reg_exps,
            country_calling_code_to_region_code_map: Default::default(),
            region_to_metadata_map: Default::default(),
            country_code_to_non_geographical_metadata_map: Default::default(),
        };
        // Storing data in a temporary map to make it easier to find other regions
        // that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        for mut metadata in metadata_collection.metadata {
            let region_code = metadata.id().to_owned();
            if i18n::RegionCode::get_unknown() == region_code {
                continue;
            }
            if !metadata.has_country_code() {
                return Err(MetadataError::MissingCountryCode(region_code));
            }
            instance.validate_patterns(&metadata)?;

            let national_prefix = metadata.national_prefix().to_owned();
            expand_formatting_rules(&mut metadata.number_format, &national_prefix);
            expand_formatting_rules(&mut metadata.intl_number_format, &national_prefix);

            let main_country_code = metadata.main_country_for_code();
            let country_calling_code = metadata.country_code();
            if i18n::RegionCode::un001() == region_code {
                if instance.country_code_to_non_geographical_metadata_map.contains_key(&country_calling_code) {
                    return Err(MetadataError::DuplicateRegion(region_code));
                }
                instance
                    .country_code_to_non_geographical_metadata_map
                    .insert(country_calling_code, metadata);
            } else {
                if instance.region_to_metadata_map.contains_key(&region_code) {
                    return Err(MetadataError::DuplicateRegion(region_code));
                }
                instance
                    .region_to_metadata_map
                    .insert(region_code.clone(), metadata);
            }

            let region_codes = country_calling_code_to_region_map
                .entry(country_calling_code)
                .or_default();
            if main_country_code {
                region_codes.push_front(region_code);
            } else {
                region_codes.push_back(region_code);
            }
        }

        instance.country_calling_code_to_region_code_map.extend(
            country_calling_code_to_region_map.into_iter().map(| (k, v) | {
                (k, Vec::from(v))
            })
        );
        // Sort all the pairs in ascending order according to country calling code.
        instance
            .country_calling_code_to_region_code_map
            .sort_by_key(|(a, _)| *a);
        Ok(instance)
    }

    /// Compiles every pattern of the metadata so that broken metadata is
    /// rejected at load time rather than while a number is typed.
    fn validate_patterns(&self, metadata: &PhoneMetadata) -> Result<(), InvalidRegexError> {
        let cache = &self.reg_exps.regexp_cache;
        let descs = PhoneNumberType::iter_descs(metadata);
        for desc in descs {
            if desc.has_national_number_pattern() {
                cache.get_full_match_regex(desc.national_number_pattern())?;
            }
        }
        for pattern in [
            metadata.international_prefix(),
            metadata.national_prefix_for_parsing(),
            metadata.leading_digits(),
        ] {
            if !pattern.is_empty() {
                cache.get_regex(pattern)?;
            }
        }
        for format in metadata.number_format.iter().chain(metadata.intl_number_format.iter()) {
            cache.get_regex(format.pattern())?;
            for leading_digits in &format.leading_digits_pattern {
                cache.get_regex(leading_digits)?;
            }
        }
        Ok(())
    }

    pub(crate) fn reg_exps(&self) -> &PhoneNumberRegExpsAndMappings {
        &self.reg_exps
    }

    pub fn has_country(&self, region_code: &str) -> bool {
        self.region_to_metadata_map.contains_key(region_code)
    }

    pub fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata_map.get(region_code)
    }

    /// Metadata of a non-geographic entity such as +800, which has no
    /// country of its own.
    pub fn get_metadata_for_non_geographical_entity(&self, country_calling_code: i32) -> Option<&PhoneMetadata> {
        self.country_code_to_non_geographical_metadata_map.get(&country_calling_code)
    }

    /// Countries present in the loaded metadata, in no particular order.
    /// Non-geographic entities are not included.
    pub fn get_supported_regions(&self) -> Vec<&str> {
        self.region_to_metadata_map.keys().map(|k| k.as_str()).collect()
    }

    // Returns the region codes that matches the specific country calling code,
    // the non-geographic entity code included. In the case of no region code
    // being found, the list is empty.
    fn get_region_codes_for_country_calling_code(
        &self,
        country_calling_code: i32,
    ) -> &[String] {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| self.country_calling_code_to_region_code_map[index].1.as_slice())
            .unwrap_or_default()
    }

    /// Returns the countries using the calling code, main country first.
    /// Non-geographic entities are not countries and are never returned.
    pub fn get_country_codes_for_calling_code(&self, country_calling_code: i32) -> Vec<&str> {
        self.get_region_codes_for_country_calling_code(country_calling_code)
            .iter()
            .map(|code| code.as_str())
            .filter(|code| *code != REGION_CODE_FOR_NON_GEO_ENTITY)
            .collect()
    }

    pub fn has_calling_code(&self, country_calling_code: i32) -> bool {
        !self.get_region_codes_for_country_calling_code(country_calling_code).is_empty()
    }

    pub fn is_non_geographic_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_code_to_non_geographical_metadata_map.contains_key(&country_calling_code)
    }

    pub fn get_calling_code_for_country(&self, region_code: &str) -> Option<i32> {
        self.region_to_metadata_map
            .get(region_code)
            .map(|metadata| metadata.country_code())
            .or_else(|| {
                warn!("Invalid or unknown region code provided: {}", region_code);
                None
            })
    }

    /// Returns the region code that matches the specific country calling code.
    /// In the case of no region code being found, the unknown region code will be
    /// returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.get_region_codes_for_country_calling_code(country_calling_code)
            .first()
            .map(|code| code.as_str())
            .unwrap_or(i18n::RegionCode::get_unknown())
    }

    fn get_metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
            self.country_code_to_non_geographical_metadata_map
                .get(&country_calling_code)
        } else {
            self.region_to_metadata_map.get(region_code)
        }
    }

    /// Selects the numbering plan for a country, a calling code or both.
    ///
    /// A country is only used when it belongs to the given calling code.
    /// Otherwise the plan of the main country for the calling code is
    /// selected, or the non-geographic entity having that code.
    pub fn select_numbering_plan(
        &self,
        region_code: Option<&str>,
        country_calling_code: Option<i32>,
    ) -> Option<NumberingPlan<'_>> {
        let country_metadata = region_code.and_then(|code| self.region_to_metadata_map.get(code));
        let metadata = match (country_metadata, country_calling_code) {
            (Some(metadata), None) => metadata,
            (Some(metadata), Some(code)) if metadata.country_code() == code => metadata,
            (_, Some(code)) => {
                let main_region = self.get_region_code_for_country_code(code);
                self.get_metadata_for_region_or_calling_code(code, main_region)?
            }
            (None, None) => return None,
        };
        let main_region = self.get_region_code_for_country_code(metadata.country_code());
        let main_metadata = self.region_to_metadata_map.get(main_region);
        Some(NumberingPlan::new(metadata, main_metadata))
    }

    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        // If leading zero(s) have been set, we prefix this now. Note this is not a
        // national prefix.
        let zeros_start = if phone_number.italian_leading_zero() {
            "0".repeat(phone_number.number_of_leading_zeros().max(0) as usize)
        } else {
            String::new()
        };

        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());
        fast_cat::concat_str!(&zeros_start, national_number)
    }

    /// Returns the type of a national number in the given country, or for
    /// the non-geographic entity when `region_code` is `001`.
    pub fn get_number_type(&self, national_number: &str, region_code: &str, country_calling_code: i32) -> PhoneNumberType {
        let Some(metadata) = self
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return PhoneNumberType::Unknown
        };
        self.get_number_type_helper(national_number, metadata)
    }

    /// Returns the region of a number, resolving calling codes shared by
    /// several regions with their leading digits and number patterns.
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> Result<&str, InvalidRegexError> {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.get_region_codes_for_country_calling_code(country_calling_code);
        if region_codes.is_empty() {
            trace!("Missing/invalid country calling code ({})", country_calling_code);
            return Ok(i18n::RegionCode::get_unknown())
        }
        if region_codes.len() == 1 {
            return Ok(region_codes[0].as_str())
        }
        let national_number = Self::get_national_significant_number(phone_number);
        for code in region_codes {
            // Metadata cannot be missing because the region codes come from the
            // country calling code map.
            let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_calling_code, code) else {
                continue;
            };
            if metadata.has_leading_digits() {
                if self.reg_exps.regexp_cache
                    .get_regex(metadata.leading_digits())?
                    .matches_start(&national_number) {
                    return Ok(code.as_str())
                }
            } else if self.get_number_type_helper(&national_number, metadata) != PhoneNumberType::Unknown {
                return Ok(code.as_str());
            }
        }
        Ok(i18n::RegionCode::get_unknown())
    }

    pub(crate) fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, &metadata.general_desc) {
            trace!("Number '{national_number}' type unknown - doesn't match general national number pattern");
            return PhoneNumberType::Unknown
        }
        if self.is_number_matching_desc(national_number, &metadata.premium_rate) {
            trace!("Number '{national_number}' is a premium number.");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, &metadata.toll_free) {
            trace!("Number '{national_number}' is a toll-free number.");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, &metadata.shared_cost) {
            trace!("Number '{national_number}' is a shared cost number.");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, &metadata.voip) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, &metadata.personal_number) {
            trace!("Number '{national_number}' is a personal number.");
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, &metadata.pager) {
            trace!("Number '{national_number}' is a pager number.");
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, &metadata.uan) {
            trace!("Number '{national_number}' is a UAN.");
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, &metadata.voicemail) {
            trace!("Number '{national_number}' is a voicemail number.");
            return PhoneNumberType::VoiceMail;
        }

        let is_fixed_line = self.is_number_matching_desc(national_number, &metadata.fixed_line);
        if is_fixed_line {
            if metadata.same_mobile_and_fixed_line_pattern() {
                trace!("Number '{national_number}': fixed-line and mobile patterns equal,\
                 number is fixed-line or mobile");
                return PhoneNumberType::FixedLineOrMobile;
            }
            else if self.is_number_matching_desc(national_number, &metadata.mobile) {
                trace!("Number '{national_number}': Fixed-line and mobile patterns differ, but number is \
                        still fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if certain
        // that the patterns for mobile and fixed line aren't the same.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, &metadata.mobile) {
            trace!("Number '{national_number}' is a mobile number.");
            return PhoneNumberType::Mobile;
        }
        trace!("Number '{national_number}' type unknown - doesn't match any specific number type pattern.");
        PhoneNumberType::Unknown
    }

    pub(crate) fn is_number_matching_desc(
        &self,
        national_number: &str,
        number_desc: &PhoneNumberDesc
    ) -> bool {
        // Check if any possible number lengths are present; if so, we use them to
        // avoid checking the validation pattern if they don't match. If they are
        // absent, this means they match the general description, which we have
        // already checked before checking a specific number type.
        let actual_length = national_number.len() as i32;
        if !number_desc.possible_length.is_empty() && !number_desc.possible_length.contains(&actual_length) {
            return false;
        }
        // very common name, so specify mod
        helper_functions::is_match(self.matcher_api.as_ref(), national_number, number_desc)
    }

    /// Returns whether the national number matches the national number
    /// pattern of the description, ignoring possible lengths.
    pub(crate) fn matches_national_number_pattern(
        &self,
        national_number: &str,
        number_desc: &PhoneNumberDesc
    ) -> bool {
        helper_functions::is_match(self.matcher_api.as_ref(), national_number, number_desc)
    }

    /// Checks the length of a national number against the possible lengths
    /// of the plan.
    pub fn test_number_length(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> Result<NumberLengthType, ValidationError> {
        test_number_length_with_unknown_type(national_number, metadata)
    }

    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> Result<bool, InvalidRegexError> {
        let region_code = self.get_region_code_for_number(phone_number)?;
        Ok(self.is_valid_number_for_region(phone_number, region_code))
    }

    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code) else {
            return false;
        };
        if REGION_CODE_FOR_NON_GEO_ENTITY != region_code && country_code != metadata.country_code() {
            // Either the region code was invalid, or the country calling code for
            // this number does not match that of the region code.
            return false;
        }
        let national_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_number, metadata) != PhoneNumberType::Unknown
    }

    /// Checks whether a number has a possible length for its calling code.
    /// Local-only lengths are counted as possible.
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    pub fn is_possible_number_with_reason(&self, phone_number: &PhoneNumber) -> Result<NumberLengthType, ValidationError> {
        let national_number = Self::get_national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Metadata of the main region is used since all regions sharing a
        // calling code have the same possible lengths.
        let region_code = self.get_region_code_for_country_code(country_code);
        let Some(metadata) = self.get_metadata_for_region_or_calling_code(country_code, region_code) else {
            return Err(ValidationError::InvalidCountryCode);
        };
        test_number_length_with_unknown_type(&national_number, metadata)
    }
}

impl PhoneNumberType {
    /// Number descriptions of a region in the order their types are tested.
    pub(super) fn iter_descs(metadata: &PhoneMetadata) -> impl Iterator<Item = &PhoneNumberDesc> {
        use strum::IntoEnumIterator;
        PhoneNumberType::iter()
            .filter(|number_type| *number_type != PhoneNumberType::FixedLineOrMobile)
            .map(move |number_type| helper_functions::get_number_desc_by_type(metadata, number_type))
    }
}
