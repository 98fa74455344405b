// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Splitting a raw command line into G-code words.
//!
//! Comments are stripped first, over the raw text, so a `(...)` span can sit
//! anywhere on the line, even between a letter and its digits.  The cleaned
//! line is then scanned for words: a single ASCII letter followed by the
//! longest run of characters from `[0-9.+-]`.  The value is kept as text;
//! numeric interpretation is up to the consumer, so a single malformed value
//! never poisons the whole line.

use itertools::Itertools;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "gcode.pest"]
struct LineParser;

/// A single word, e.g. `X-10.5`.  The letter is normalized to uppercase.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub letter: char,
    pub value: String,
}

impl Word {
    /// The numeric interpretation of the value, if it has one.
    pub fn value_num(&self) -> Option<f64> {
        self.value.parse().ok()
    }
}

/// A tokenized command line, cleaned of comments and junk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    /// True if the line starts with the `$H` homing shortcut.
    pub home: bool,
    pub words: Vec<Word>,
}

/// Remove `(...)` comment spans (non-greedy, any number of them) and cut the
/// line at the first `;` outside such a span.
fn strip_comments(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut in_comment = false;
    for ch in input.chars() {
        match ch {
            ')' if in_comment => in_comment = false,
            '(' => in_comment = true,
            _ if in_comment => (),
            ';' => break,
            _ => cleaned.push(ch),
        }
    }
    cleaned
}

/// Tokenize one command line.
///
/// Comments (both `(...)` spans and `;` to end of line) are stripped before
/// the scan, and unrecognized characters are dropped silently; any input is
/// accepted, so this cannot fail.  A `$H` is only honored before the first
/// word.
pub fn tokenize(input: &str) -> Line {
    let input = strip_comments(input);
    let mut line = Line::default();
    let mut pairs = match LineParser::parse(Rule::line, &input) {
        Ok(pairs) => pairs,
        Err(_) => return line,
    };
    let parsed = match pairs.next() {
        Some(pair) => pair,
        None => return line,
    };
    for pair in parsed.into_inner() {
        match pair.as_rule() {
            Rule::home => {
                if line.words.is_empty() {
                    line.home = true;
                }
            }
            Rule::word => {
                let (letter, value) = pair.into_inner().collect_tuple().expect("two children");
                let letter = letter.as_str().chars().next().expect("one letter");
                line.words.push(Word {
                    letter: letter.to_ascii_uppercase(),
                    value: value.as_str().to_owned(),
                });
            }
            _ => (),
        }
    }
    line
}
