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

//! Formatting of phone numbers while they are typed.
//!
//! The session state is written by the parser, read by the formatter and
//! the country resolver, and the session reacts to the changes the parser
//! reports.

mod asyoutype;
mod complete;
mod country_resolver;
mod formatter;
mod national_number;
mod options;
mod parser;
mod pattern_matcher;
mod state;
mod template_util;

pub use asyoutype::AsYouType;
pub use options::AsYouTypeOptions;
