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

use strum::EnumIter;

/// Categorizes phone numbers based on their primary use.
///
/// The order of variants is the order in which a national number is tested
/// against the number descriptions of a region.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    /// Numbers charging the caller more than a normal call.
    PremiumRate,
    /// Numbers that are free for the caller.
    TollFree,
    /// The cost of the call is split between the caller and the recipient.
    SharedCost,
    /// Voice over IP numbers.
    VoIP,
    /// Numbers routed to a person rather than a location or a device.
    PersonalNumber,
    Pager,
    /// Universal access numbers.
    UAN,
    VoiceMail,
    /// Landline numbers tied to a geographic location.
    FixedLine,
    /// Numbers assigned to wireless devices.
    Mobile,
    /// Used where fixed-line and mobile numbers share the same ranges
    /// (e.g. the USA) and can't be told apart.
    FixedLineOrMobile,
    /// The number does not match any known pattern for its region.
    Unknown,
}

/// Represents the possible outcomes when checking if a phone number's length is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberLengthType {
    /// The length matches the length of a complete, dialable number.
    IsPossible,
    /// The length is too short for a full national number but matches
    /// numbers dialable within a local area (without the area code).
    IsPossibleLocalOnly,
}
