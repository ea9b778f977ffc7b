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

//! Matching of leading digits patterns against numbers shorter than the
//! patterns themselves, which a regex can't tell apart from a mismatch.
//!
//! Only the subset of regex syntax found in leading digits patterns is
//! supported: digits, `\d`, character classes with ranges, groups and
//! alternation.

use std::{iter::Peekable, str::CharIndices};

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub(super) enum PatternSyntaxError {
    #[error("Unsupported character '{0}' at {1}")]
    UnsupportedCharacter(char, usize),
    #[error("Unsupported escape sequence '\\{0}' at {1}")]
    UnsupportedEscape(char, usize),
    #[error("Unclosed group or character class")]
    Unclosed,
    #[error("Unexpected ')' at {0}")]
    UnexpectedClosingParen(usize),
    #[error("Empty character class at {0}")]
    EmptyClass(usize),
}

#[derive(Debug, PartialEq, Eq)]
enum Node {
    Digit(char),
    AnyDigit,
    Class { ranges: Vec<(char, char)>, negated: bool },
    Sequence(Vec<Node>),
    Alternation(Vec<Node>),
}

impl Node {
    fn matches_char(&self, char: char) -> bool {
        match self {
            Node::Digit(digit) => *digit == char,
            Node::AnyDigit => char.is_ascii_digit(),
            Node::Class { ranges, negated } => {
                ranges.iter().any(|(from, to)| (*from..=*to).contains(&char)) != *negated
            }
            Node::Sequence(_) | Node::Alternation(_) => false,
        }
    }

    /// Returns every input position the node can end at when started at
    /// `start`. Running out of input counts as a match of whatever is left
    /// of the pattern.
    fn end_positions(&self, input: &[char], start: usize) -> Vec<usize> {
        match self {
            Node::Sequence(nodes) => {
                let mut positions = vec![start];
                for node in nodes {
                    let mut next_positions: Vec<usize> = positions
                        .iter()
                        .flat_map(|position| node.end_positions(input, *position))
                        .collect();
                    next_positions.sort_unstable();
                    next_positions.dedup();
                    if next_positions.is_empty() {
                        return next_positions;
                    }
                    positions = next_positions;
                }
                positions
            }
            Node::Alternation(alternatives) => {
                let mut positions: Vec<usize> = alternatives
                    .iter()
                    .flat_map(|alternative| alternative.end_positions(input, start))
                    .collect();
                positions.sort_unstable();
                positions.dedup();
                positions
            }
            _ => match input.get(start) {
                None => vec![start],
                Some(char) if self.matches_char(*char) => vec![start + 1],
                Some(_) => Vec::new(),
            },
        }
    }
}

/// A parsed leading digits pattern.
#[derive(Debug)]
pub(super) struct PatternMatcher {
    root: Node,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, PatternSyntaxError> {
        let mut parser = PatternParser { chars: pattern.char_indices().peekable() };
        let root = parser.parse_alternation()?;
        if let Some((index, _)) = parser.chars.next() {
            return Err(PatternSyntaxError::UnexpectedClosingParen(index));
        }
        Ok(Self { root })
    }

    /// Returns whether `digits` match the pattern or are the beginning of a
    /// match. Digits left over after a complete match are allowed.
    pub fn match_prefix(&self, digits: &str) -> bool {
        let input: Vec<char> = digits.chars().collect();
        !self.root.end_positions(&input, 0).is_empty()
    }
}

struct PatternParser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl PatternParser<'_> {
    fn parse_alternation(&mut self) -> Result<Node, PatternSyntaxError> {
        let mut alternatives = vec![self.parse_sequence()?];
        while let Some((_, '|')) = self.chars.peek() {
            self.chars.next();
            alternatives.push(self.parse_sequence()?);
        }
        Ok(if alternatives.len() == 1 {
            alternatives.remove(0)
        } else {
            Node::Alternation(alternatives)
        })
    }

    fn parse_sequence(&mut self) -> Result<Node, PatternSyntaxError> {
        let mut nodes = Vec::new();
        while let Some(&(index, char)) = self.chars.peek() {
            match char {
                '|' | ')' => break,
                '(' => {
                    self.chars.next();
                    if let Some((_, '?')) = self.chars.peek() {
                        self.chars.next();
                        match self.chars.next() {
                            Some((_, ':')) => {}
                            Some((index, char)) => return Err(PatternSyntaxError::UnsupportedCharacter(char, index)),
                            None => return Err(PatternSyntaxError::Unclosed),
                        }
                    }
                    let group = self.parse_alternation()?;
                    match self.chars.next() {
                        Some((_, ')')) => nodes.push(group),
                        _ => return Err(PatternSyntaxError::Unclosed),
                    }
                }
                '[' => {
                    self.chars.next();
                    nodes.push(self.parse_class(index)?);
                }
                '\\' => {
                    self.chars.next();
                    match self.chars.next() {
                        Some((_, 'd')) => nodes.push(Node::AnyDigit),
                        Some((index, char)) => return Err(PatternSyntaxError::UnsupportedEscape(char, index)),
                        None => return Err(PatternSyntaxError::Unclosed),
                    }
                }
                '0'..='9' => {
                    self.chars.next();
                    nodes.push(Node::Digit(char));
                }
                _ => return Err(PatternSyntaxError::UnsupportedCharacter(char, index)),
            }
        }
        Ok(Node::Sequence(nodes))
    }

    fn parse_class(&mut self, start: usize) -> Result<Node, PatternSyntaxError> {
        let mut ranges = Vec::new();
        let negated = matches!(self.chars.peek(), Some((_, '^')));
        if negated {
            self.chars.next();
        }
        loop {
            let Some((index, char)) = self.chars.next() else {
                return Err(PatternSyntaxError::Unclosed);
            };
            match char {
                ']' => break,
                '0'..='9' => {
                    if let Some((_, '-')) = self.chars.peek() {
                        self.chars.next();
                        match self.chars.next() {
                            Some((_, to @ '0'..='9')) => ranges.push((char, to)),
                            Some((index, char)) => return Err(PatternSyntaxError::UnsupportedCharacter(char, index)),
                            None => return Err(PatternSyntaxError::Unclosed),
                        }
                    } else {
                        ranges.push((char, char));
                    }
                }
                _ => return Err(PatternSyntaxError::UnsupportedCharacter(char, index)),
            }
        }
        if ranges.is_empty() {
            return Err(PatternSyntaxError::EmptyClass(start));
        }
        Ok(Node::Class { ranges, negated })
    }
}

#[cfg(test)]
mod tests {
    use super::{PatternMatcher, PatternSyntaxError};

    fn matches(pattern: &str, digits: &str) -> bool {
        PatternMatcher::new(pattern).unwrap().match_prefix(digits)
    }

    #[test]
    fn matches_partial_input() {
        assert!(matches("2|5[56]|7(?:0|6[013-9])", "7"));
        assert!(matches("2|5[56]|7(?:0|6[013-9])", "76"));
        assert!(!matches("2|5[56]|7(?:0|6[013-9])", "72"));
        assert!(!matches("2|5[56]|7(?:0|6[013-9])", "1"));
        assert!(matches("1(?:[2-69][02-9]|[78])|[389]", "12"));
        assert!(!matches("1(?:[2-69][02-9]|[78])|[389]", "11"));
    }

    #[test]
    fn allows_digits_after_complete_match() {
        assert!(matches("[2-9]", "22"));
        assert!(matches("0[26]", "02"));
        assert!(!matches("0[26]", "03"));
        assert!(matches("\\d", "8"));
    }

    #[test]
    fn negated_class() {
        assert!(matches("[^0]1", "21"));
        assert!(!matches("[^0]1", "01"));
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert_eq!(
            PatternSyntaxError::UnsupportedCharacter('{', 2),
            PatternMatcher::new("\\d{3}").unwrap_err()
        );
        assert_eq!(PatternSyntaxError::Unclosed, PatternMatcher::new("(?:12").unwrap_err());
        assert_eq!(
            PatternSyntaxError::UnexpectedClosingParen(2),
            PatternMatcher::new("12)").unwrap_err()
        );
        assert!(PatternMatcher::new("\\s").is_err());
    }
}
