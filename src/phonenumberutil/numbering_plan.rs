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

use crate::proto_gen::phonemetadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc};

use super::helper_constants::{NANPA_COUNTRY_CODE, REGION_CODE_FOR_NON_GEO_ENTITY};

/// Marks an international format that must not be used.
const NO_INTERNATIONAL_FORMAT: &str = "NA";

/// The numbering plan selected for a country or a non-geographic calling
/// code.
///
/// Countries sharing a calling code often don't declare number formats of
/// their own and use the formats of the main country for the code instead.
#[derive(Clone, Copy)]
pub struct NumberingPlan<'m> {
    metadata: &'m PhoneMetadata,
    formats_source: &'m PhoneMetadata,
}

impl<'m> NumberingPlan<'m> {
    pub(super) fn new(metadata: &'m PhoneMetadata, main_metadata: Option<&'m PhoneMetadata>) -> Self {
        let formats_source = match main_metadata {
            Some(main) if metadata.number_format.is_empty() => main,
            _ => metadata,
        };
        Self { metadata, formats_source }
    }

    pub fn metadata(&self) -> &'m PhoneMetadata {
        self.metadata
    }

    /// Region code of the plan, `001` for non-geographic entities.
    pub fn id(&self) -> &'m str {
        self.metadata.id()
    }

    pub fn calling_code(&self) -> i32 {
        self.metadata.country_code()
    }

    pub fn is_non_geographic(&self) -> bool {
        self.metadata.id() == REGION_CODE_FOR_NON_GEO_ENTITY
    }

    pub fn is_nanpa(&self) -> bool {
        self.metadata.country_code() == NANPA_COUNTRY_CODE
    }

    pub fn formats(&self) -> &'m [NumberFormat] {
        &self.formats_source.number_format
    }

    /// Returns the format used when the number is dialled internationally,
    /// or `None` when the format is national only.
    pub fn international_format(&self, format: &'m NumberFormat) -> Option<&'m str> {
        let intl_formats = &self.formats_source.intl_number_format;
        if intl_formats.is_empty() {
            return Some(format.format());
        }
        intl_formats
            .iter()
            .find(|intl| intl.pattern() == format.pattern())
            .map(|intl| intl.format())
            .filter(|intl| *intl != NO_INTERNATIONAL_FORMAT)
    }

    pub fn national_prefix(&self) -> Option<&'m str> {
        Some(self.metadata.national_prefix()).filter(|prefix| !prefix.is_empty())
    }

    /// Pattern matching every prefix that may precede a national number.
    /// Falls back to the national prefix itself.
    pub fn national_prefix_for_parsing(&self) -> Option<&'m str> {
        Some(self.metadata.national_prefix_for_parsing())
            .filter(|pattern| !pattern.is_empty())
            .or_else(|| self.national_prefix())
    }

    pub fn national_prefix_transform_rule(&self) -> Option<&'m str> {
        Some(self.metadata.national_prefix_transform_rule()).filter(|rule| !rule.is_empty())
    }

    pub fn international_prefix(&self) -> Option<&'m str> {
        Some(self.metadata.international_prefix()).filter(|prefix| !prefix.is_empty())
    }

    /// Leading digits pattern telling apart countries sharing a calling code.
    pub fn leading_digits(&self) -> Option<&'m str> {
        Some(self.metadata.leading_digits()).filter(|pattern| !pattern.is_empty())
    }

    pub fn general_desc(&self) -> &'m PhoneNumberDesc {
        &self.metadata.general_desc
    }
}

impl std::fmt::Debug for NumberingPlan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberingPlan")
            .field("id", &self.id())
            .field("calling_code", &self.calling_code())
            .field("formats_source", &self.formats_source.id())
            .finish()
    }
}
