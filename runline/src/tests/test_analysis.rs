// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::analysis::{Analysis, analyze_text};
use crate::{CodeUnitFlags, IcuUnicode, Text};

fn analyze(text: impl Into<Text>) -> Analysis {
    analyze_text(&IcuUnicode::new(), &text.into())
}

fn indices(analysis: &Analysis, predicate: impl Fn(CodeUnitFlags) -> bool) -> Vec<usize> {
    analysis
        .flags
        .iter()
        .enumerate()
        .filter(|(_, flags)| predicate(**flags))
        .map(|(index, _)| index)
        .collect()
}

#[test]
fn flags_for_spaces_and_newlines() {
    let analysis = analyze("a b\nc");
    assert_eq!(analysis.flags.len(), 6);
    assert_eq!(indices(&analysis, CodeUnitFlags::is_whitespace), [1, 3]);
    assert_eq!(indices(&analysis, CodeUnitFlags::is_soft_break), [2]);
    assert_eq!(indices(&analysis, CodeUnitFlags::is_hard_break), [4]);
    assert_eq!(
        indices(&analysis, CodeUnitFlags::is_grapheme_start),
        [0, 1, 2, 3, 4, 5]
    );
}

#[test]
fn no_break_at_text_edges() {
    let analysis = analyze("\nab\n");
    // The break after the final newline would land on the sentinel.
    assert_eq!(indices(&analysis, CodeUnitFlags::is_hard_break), [1]);
    assert!(!analysis.flags[0].is_hard_break());
    assert!(!analysis.flags[4].is_hard_break());
}

#[test]
fn crlf_is_one_grapheme() {
    let analysis = analyze("a\r\nb");
    assert_eq!(indices(&analysis, CodeUnitFlags::is_whitespace), [1, 2]);
    assert_eq!(indices(&analysis, CodeUnitFlags::is_hard_break), [3]);
    assert!(!analysis.flags[2].is_grapheme_start());
}

#[test]
fn no_break_space_is_not_whitespace() {
    let analysis = analyze("a\u{00A0}b");
    assert!(indices(&analysis, CodeUnitFlags::is_whitespace).is_empty());
    assert!(indices(&analysis, CodeUnitFlags::is_soft_break).is_empty());
}

#[test]
fn surrogate_pairs_map_both_ways() {
    let analysis = analyze("a\u{1F600}b");
    assert_eq!(analysis.utf8.len(), 6);
    assert_eq!(analysis.flags.len(), 5);
    assert_eq!(
        indices(&analysis, CodeUnitFlags::is_grapheme_start),
        [0, 1, 3, 4]
    );
    assert_eq!(analysis.to_utf16(1), 1);
    assert_eq!(analysis.to_utf16(5), 3);
    assert_eq!(analysis.to_utf16(6), 4);
    assert_eq!(analysis.to_utf8(1), 1);
    // The low surrogate belongs to the same code point.
    assert_eq!(analysis.to_utf8(2), 1);
    assert_eq!(analysis.to_utf8(3), 5);
}

#[test]
fn unpaired_surrogate_is_replaced() {
    let analysis = analyze(vec![0x61_u16, 0xD800, 0x62]);
    assert_eq!(analysis.utf8, "a\u{FFFD}b");
    assert_eq!(analysis.flags.len(), 4);
    assert_eq!(analysis.to_utf16(1), 1);
    assert_eq!(analysis.to_utf16(4), 2);
    assert!(analysis.flags[1].is_grapheme_start());
}

#[test]
fn combining_marks_extend_graphemes() {
    let analysis = analyze("e\u{0301}x");
    assert_eq!(indices(&analysis, CodeUnitFlags::is_grapheme_start), [0, 2, 3]);
}

#[test]
fn empty_text_has_sentinel_only() {
    let analysis = analyze("");
    assert_eq!(analysis.flags.len(), 1);
    assert!(analysis.flags[0].is_grapheme_start());
    assert!(!analysis.flags[0].is_soft_break());
}

#[test]
fn breaks_require_grapheme_start() {
    let mut flags = CodeUnitFlags::SOFT_BREAK_BEFORE;
    assert!(!flags.is_soft_break());
    flags.insert(CodeUnitFlags::GRAPHEME_START);
    assert!(flags.is_soft_break());
    assert!(!flags.is_hard_break());
    assert_eq!(format!("{flags:?}"), "{SOFT, GRAPHEME}");
}
