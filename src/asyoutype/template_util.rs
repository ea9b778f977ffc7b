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

use crate::phonenumberutil::helper_constants::DIGIT_PLACEHOLDER;

/// Fills the placeholders of `template` following `position` with `digits`.
///
/// Returns the populated template and the position of the last filled
/// placeholder, or `None` when there are more digits than placeholders.
pub(super) fn populate_template_with_digits(
    template: &str,
    position: Option<usize>,
    digits: &str,
) -> Option<(String, Option<usize>)> {
    let mut template = template.to_owned();
    let mut position = position;
    for digit in digits.chars() {
        let search_from = position.map_or(0, |position| position + 1);
        let next = template.get(search_from..)?.find(DIGIT_PLACEHOLDER)? + search_from;
        template.replace_range(next..next + DIGIT_PLACEHOLDER.len_utf8(), digit.encode_utf8(&mut [0; 4]));
        position = Some(next);
    }
    Some((template, position))
}

/// Cuts the string before `cut_before_index` and removes parentheses left
/// unpaired by the cut. A closing parenthesis right at the cut is kept.
pub(super) fn cut_and_strip_non_paired_parens(string: &str, cut_before_index: usize) -> String {
    let mut cut_before_index = cut_before_index.min(string.len());
    if string[cut_before_index..].starts_with(')') {
        cut_before_index += 1;
    }
    strip_non_paired_parens(&string[..cut_before_index])
}

/// Removes opening parentheses that are never closed.
pub(super) fn strip_non_paired_parens(string: &str) -> String {
    let mut dangling_braces = Vec::new();
    for (index, char) in string.char_indices() {
        match char {
            '(' => dangling_braces.push(index),
            ')' => {
                dangling_braces.pop();
            }
            _ => {}
        }
    }
    if dangling_braces.is_empty() {
        return string.to_owned();
    }
    let mut cleared_string = String::with_capacity(string.len());
    let mut start = 0;
    for index in dangling_braces {
        cleared_string.push_str(&string[start..index]);
        start = index + 1;
    }
    cleared_string.push_str(&string[start..]);
    cleared_string
}

/// Replaces every ASCII digit of `string` with `placeholder`.
pub(super) fn mask_digits(string: &str, placeholder: char) -> String {
    string
        .chars()
        .map(|char| if char.is_ascii_digit() { placeholder } else { char })
        .collect()
}

/// Keeps ASCII digits only.
pub(super) fn parse_digits(string: &str) -> String {
    string.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populates_placeholders_in_order() {
        let (template, position) = populate_template_with_digits("(xxx) xxx-xxxx", None, "222").unwrap();
        assert_eq!("(222) xxx-xxxx", template);
        assert_eq!(Some(3), position);

        let (template, position) = populate_template_with_digits(&template, position, "33").unwrap();
        assert_eq!("(222) 33x-xxxx", template);
        assert_eq!(Some(7), position);
    }

    #[test]
    fn too_many_digits_for_template() {
        assert_eq!(None, populate_template_with_digits("xx-x", None, "1234"));
        assert_eq!(None, populate_template_with_digits("12-3", Some(3), "4"));
    }

    #[test]
    fn cuts_after_last_digit() {
        assert_eq!("(222) 3", cut_and_strip_non_paired_parens("(222) 3xx-xxxx", 7));
        assert_eq!("22", cut_and_strip_non_paired_parens("(22x) xxx-xxxx", 3));
        assert_eq!("(222)", cut_and_strip_non_paired_parens("(222) xxx-xxxx", 4));
    }

    #[test]
    fn strips_only_dangling_opening_parens() {
        assert_eq!("1 23", strip_non_paired_parens("1 (23"));
        assert_eq!("(1) 23", strip_non_paired_parens("(1) 23"));
        assert_eq!("1) 23", strip_non_paired_parens("1) 23"));
        assert_eq!("8 916", strip_non_paired_parens("8 (916"));
    }

    #[test]
    fn masks_and_parses_digits() {
        assert_eq!("xxx xx-xx", mask_digits("123 45-67", 'x'));
        assert_eq!("1234567", parse_digits("(123) 45-67"));
    }
}
