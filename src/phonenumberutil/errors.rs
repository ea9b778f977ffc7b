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

use thiserror::Error;

pub use crate::regexp_cache::InvalidRegexError;

/// Errors raised while loading a metadata collection.
#[derive(Debug, PartialEq, Error)]
pub enum MetadataError {
    #[error("Failed to parse metadata: {0}")]
    InvalidTextFormat(String),
    #[error("Metadata for region {0} is declared twice")]
    DuplicateRegion(String),
    #[error("Region {0} has no country calling code")]
    MissingCountryCode(String),
    #[error("{0}")]
    InvalidRegex(#[from] InvalidRegexError),
}

/// Possible outcomes when testing if a national number is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The number has an invalid country calling code.
    #[error("The number has an invalid country calling code")]
    InvalidCountryCode,
    /// The number is shorter than all valid numbers for this region.
    #[error("The number is shorter than all valid numbers for this region")]
    TooShort,
    /// The number length lies between the shortest and the longest valid
    /// numbers for this region but matches none of them. Also returned when
    /// there are no numbers of the requested type at all.
    #[error("The number length does not match any valid number length for this region")]
    InvalidLength,
    /// The number is longer than all valid numbers for this region.
    #[error("The number is longer than all valid numbers for this region")]
    TooLong,
}

/// Regex errors can only come from broken metadata, which is validated when
/// the library is loaded.
pub(crate) trait RegexResultExt<T> {
    fn into_public(self) -> T;
}

impl<T> RegexResultExt<T> for Result<T, InvalidRegexError> {
    fn into_public(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) =>
                panic!("A valid regex is expected in metadata; this indicates a library bug! {}", err)
        }
    }
}
