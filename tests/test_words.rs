// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use gmove::words::tokenize;

fn letters(input: &str) -> Vec<char> {
    tokenize(input).words.iter().map(|w| w.letter).collect()
}

#[test]
fn test_comments() {
    assert!(tokenize("(note) ").words.is_empty());
    assert!(tokenize("   ; just a comment").words.is_empty());
    assert!(tokenize("").words.is_empty());
    assert!(tokenize("   \t ").words.is_empty());

    // inline spans are non-greedy and can occur several times
    assert_eq!(letters("(a) G1 (b) X5 (c)"), vec!['G', 'X']);
    assert_eq!(letters("(a)(b)G1"), vec!['G']);

    // everything after ";" is dropped, but a ";" inside parens is guarded
    assert_eq!(letters("G1 X5 ; Y9"), vec!['G', 'X']);
    assert_eq!(letters("(a;b) G1"), vec!['G']);

    // stripping happens before the word scan, so a span may straddle a
    // letter and its digits
    let line = tokenize("G(a)1 X5");
    assert_eq!(line.words.len(), 2);
    assert_eq!(line.words[0].letter, 'G');
    assert_eq!(line.words[0].value, "1");
    let line = tokenize("X1(gap)0.5");
    assert_eq!(line.words[0].value_num(), Some(10.5));
}

#[test]
fn test_words() {
    let line = tokenize("g1 x-10.5 F+600");
    assert_eq!(line.words.len(), 3);
    // letters are case-insensitive and normalized to uppercase
    assert_eq!(line.words[0].letter, 'G');
    assert_eq!(line.words[1].letter, 'X');
    assert_eq!(line.words[1].value, "-10.5");
    assert_eq!(line.words[1].value_num(), Some(-10.5));
    assert_eq!(line.words[2].value_num(), Some(600.0));

    // values are kept as text; malformed ones surface as None, not errors
    let line = tokenize("X1.2.3 G");
    assert_eq!(line.words[0].value, "1.2.3");
    assert_eq!(line.words[0].value_num(), None);
    assert_eq!(line.words[1].value, "");
    assert_eq!(line.words[1].value_num(), None);

    assert_eq!(tokenize("Y-.5").words[0].value_num(), Some(-0.5));
    assert_eq!(tokenize("Z5.").words[0].value_num(), Some(5.0));
}

#[test]
fn test_junk_is_skipped() {
    assert_eq!(letters("@#G1 %X2!"), vec!['G', 'X']);
    // a space between letter and value splits the word
    let line = tokenize("G 1");
    assert_eq!(line.words.len(), 1);
    assert_eq!(line.words[0].value, "");
}

#[test]
fn test_home() {
    assert!(tokenize("$H").home);
    assert!(tokenize("  $H").home);
    assert!(tokenize("(c) $H").home);
    // only honored before the first word
    assert!(!tokenize("G1 $H").home);
    assert!(!tokenize("").home);
}
