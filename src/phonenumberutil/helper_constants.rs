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

/// The maximum length of the country calling code.
pub const MAX_LENGTH_COUNTRY_CODE: usize = 3;
pub const PLUS_CHARS: &'static str = "+\u{FF0B}";
pub const PLUS_SIGN: &'static str = "+";

// Punctuation allowed between the groups of a formatted number: dashes,
// slashes, full stops, white space, brackets, parentheses and tildes.
// Full-width variants are also present. Unlike the parsing variant this
// one does not accept the letter 'x' since it is the digit placeholder.
pub const VALID_PUNCTUATION: &'static str = "\\-\
\u{2010}-\u{2015}\u{2212}\u{30FC}\u{FF0D}\u{FF0F}/\u{FF0E}. \u{00A0}\
\u{00AD}\u{200B}\u{2060}\u{3000}()\u{FF08}\u{FF09}\u{FF3B}\
\u{FF3D}\\[\\]~\u{2053}\u{223C}\u{FF5E}";

pub const REGION_CODE_FOR_NON_GEO_ENTITY: &'static str = "001";

pub const NANPA_COUNTRY_CODE: i32 = 1;

// Placeholders used by formatting rules in metadata.
pub const NATIONAL_PREFIX_PLACEHOLDER: &'static str = "$NP";
pub const FIRST_GROUP_PLACEHOLDER: &'static str = "$FG";

/// Character used in templates in place of a digit that is not entered yet.
pub const DIGIT_PLACEHOLDER: char = 'x';
/// Any digit works here as long as every format pattern accepts it in every
/// position, which holds for `9`.
pub const DUMMY_DIGIT: char = '9';
/// A number this long is used to find the longest number a format pattern
/// can produce. 15 is the longest number allowed by ITU-T E.164.
pub const LONGEST_DUMMY_PHONE_NUMBER: &'static str = "999999999999999";
/// `leading_digits_pattern` entries are indexed by the number of digits
/// after the third one. Fewer digits than this select the first pattern.
pub const MIN_LEADING_DIGITS_LENGTH: usize = 3;
