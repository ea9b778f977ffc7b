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

/// Configuration of an [`AsYouType`](super::AsYouType) session.
///
/// `default_country` is used for numbers typed without a calling code.
/// `default_calling_code` is used for the same purpose only when no
/// default country is given, e.g. for non-geographic entities.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AsYouTypeOptions {
    pub default_country: Option<String>,
    pub default_calling_code: Option<String>,
}

impl AsYouTypeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = Some(country.into());
        self
    }

    pub fn with_default_calling_code(mut self, calling_code: impl Into<String>) -> Self {
        self.default_calling_code = Some(calling_code.into());
        self
    }
}

impl From<&str> for AsYouTypeOptions {
    /// Options with the given default country.
    fn from(default_country: &str) -> Self {
        Self::new().with_default_country(default_country)
    }
}

#[cfg(test)]
mod tests {
    use super::AsYouTypeOptions;

    #[test]
    fn builds_options() {
        let options = AsYouTypeOptions::new()
            .with_default_country("RU")
            .with_default_calling_code("7");
        assert_eq!(Some("RU"), options.default_country.as_deref());
        assert_eq!(Some("7"), options.default_calling_code.as_deref());
        assert_eq!(AsYouTypeOptions::new().with_default_country("GB"), AsYouTypeOptions::from("GB"));
    }
}
