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

use crate::{
    generated::metadata::METADATA,
    interfaces::MatcherApi,
    proto_gen::phonemetadata::{
        NumberFormat, PhoneMetadata, PhoneMetadataCollection, PhoneNumberDesc,
    },
};

use super::{
    NumberLengthType, PhoneNumberType,
    errors::{MetadataError, ValidationError},
    helper_constants::{FIRST_GROUP_PLACEHOLDER, NATIONAL_PREFIX_PLACEHOLDER},
};

/// Loads metadata from the text format collection compiled into the library.
pub(super) fn load_compiled_metadata() -> Result<PhoneMetadataCollection, MetadataError> {
    parse_metadata(METADATA)
}

/// Parses a text format `PhoneMetadataCollection`.
pub(super) fn parse_metadata(text: &str) -> Result<PhoneMetadataCollection, MetadataError> {
    protobuf::text_format::parse_from_str::<PhoneMetadataCollection>(text)
        .map_err(|err| MetadataError::InvalidTextFormat(err.to_string()))
}

/// Returns a pointer to the description inside the metadata of the appropriate
/// type.
pub(super) fn get_number_desc_by_type(
    metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> &PhoneNumberDesc {
    match phone_number_type {
        PhoneNumberType::PremiumRate => &metadata.premium_rate,
        PhoneNumberType::TollFree => &metadata.toll_free,
        PhoneNumberType::Mobile => &metadata.mobile,
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => &metadata.fixed_line,
        PhoneNumberType::SharedCost => &metadata.shared_cost,
        PhoneNumberType::VoIP => &metadata.voip,
        PhoneNumberType::PersonalNumber => &metadata.personal_number,
        PhoneNumberType::Pager => &metadata.pager,
        PhoneNumberType::UAN => &metadata.uan,
        PhoneNumberType::VoiceMail => &metadata.voicemail,
        // Instead of the default case, we only match `Unknown`
        PhoneNumberType::Unknown => &metadata.general_desc,
    }
}

/// Returns `true` if there is any possible number data set for a particular
/// PhoneNumberDesc.
pub(super) fn desc_has_possible_number_data(desc: &PhoneNumberDesc) -> bool {
    // If this is empty, it means numbers of this type inherit from the "general
    // desc" -> the value "-1" means that no numbers exist for this type.
    desc.possible_length.len() != 1
        || desc
            .possible_length
            .first()
            .is_some_and(|l| *l != -1)
}

/// Helper method to check a number against possible lengths for this number
/// type, and determine whether it matches, or is too short or too long.
pub(super) fn test_number_length(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
    phone_number_type: PhoneNumberType,
) -> Result<NumberLengthType, ValidationError> {
    let desc_for_type = get_number_desc_by_type(phone_metadata, phone_number_type);
    // Where a sub-description has the same possible lengths as the general
    // desc they are omitted, so we fall back to the general desc.
    let mut possible_lengths = if desc_for_type.possible_length.is_empty() {
        phone_metadata.general_desc.possible_length.clone()
    } else {
        desc_for_type.possible_length.clone()
    };

    let mut local_lengths = desc_for_type.possible_length_local_only.clone();
    if phone_number_type == PhoneNumberType::FixedLineOrMobile {
        let fixed_line_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::FixedLine);
        if !desc_has_possible_number_data(fixed_line_desc) {
            // No fixed-line data (true for some non-geographical entities), so
            // we just check mobile.
            return test_number_length(phone_number, phone_metadata, PhoneNumberType::Mobile);
        }
        let mobile_desc = get_number_desc_by_type(phone_metadata, PhoneNumberType::Mobile);
        if desc_has_possible_number_data(mobile_desc) {
            let len_to_append = if mobile_desc.possible_length.is_empty() {
                &phone_metadata.general_desc.possible_length
            } else {
                &mobile_desc.possible_length
            };
            possible_lengths.extend_from_slice(len_to_append);
            possible_lengths.sort();

            local_lengths.extend_from_slice(&mobile_desc.possible_length_local_only);
            local_lengths.sort();
        }
    }

    // -1 here means the type is not supported at all.
    let (Some(&minimum_length), Some(&maximum_length)) = (possible_lengths.first(), possible_lengths.last()) else {
        return Err(ValidationError::InvalidLength);
    };
    if minimum_length == -1 {
        return Err(ValidationError::InvalidLength);
    }

    let actual_length = phone_number.chars().count() as i32;
    // Local-only lengths never overlap with possible lengths.
    if local_lengths.contains(&actual_length) {
        return Ok(NumberLengthType::IsPossibleLocalOnly);
    }

    if minimum_length == actual_length {
        Ok(NumberLengthType::IsPossible)
    } else if minimum_length > actual_length {
        Err(ValidationError::TooShort)
    } else if maximum_length < actual_length {
        Err(ValidationError::TooLong)
    } else if possible_lengths[1..].contains(&actual_length) {
        Ok(NumberLengthType::IsPossible)
    } else {
        Err(ValidationError::InvalidLength)
    }
}

/// Helper method to check a number against possible lengths for this region,
/// based on the metadata being passed in, and determine whether it matches, or
/// is too short or too long.
pub(super) fn test_number_length_with_unknown_type(
    phone_number: &str,
    phone_metadata: &PhoneMetadata,
) -> Result<NumberLengthType, ValidationError> {
    test_number_length(phone_number, phone_metadata, PhoneNumberType::Unknown)
}

/// Determines whether the given number is a national number match for the given
/// PhoneNumberDesc. Does not check against possible lengths!
pub(super) fn is_match(
    matcher_api: &dyn MatcherApi,
    number: &str,
    number_desc: &PhoneNumberDesc,
) -> bool {
    matcher_api.match_national_number(number, number_desc, false)
}

/// Replaces `$NP` with the national prefix and `$FG` with the first group
/// reference in the formatting rules of the given formats.
pub(super) fn expand_formatting_rules(formats: &mut [NumberFormat], national_prefix: &str) {
    for format in formats {
        if !format.has_national_prefix_formatting_rule() {
            continue;
        }
        let rule = format
            .national_prefix_formatting_rule()
            .replace(NATIONAL_PREFIX_PLACEHOLDER, national_prefix)
            .replace(FIRST_GROUP_PLACEHOLDER, "$1");
        format.set_national_prefix_formatting_rule(rule);
    }
}
