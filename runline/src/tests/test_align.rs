// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{TestContext, TestFont, layout_with};
use crate::{Alignment, AlignmentOptions, Direction, FontBlock, Processor, Size};

fn offsets<F>(processor: &Processor<F>) -> Vec<f32> {
    processor
        .lines()
        .iter()
        .map(|line| line.metrics().offset)
        .collect()
}

fn aligned(
    text: &str,
    direction: Direction,
    alignment: Alignment,
    width: f32,
) -> Processor<TestFont> {
    layout_with(
        text,
        TestFont::new(),
        direction,
        alignment,
        Size::width_only(width),
    )
}

#[test]
fn ltr_offsets() {
    let text = "hello world!";
    // Lines: "hello" (50), "world!" (60).
    let cases = [
        (Alignment::Start, [0., 0.]),
        (Alignment::Left, [0., 0.]),
        (Alignment::End, [15., 5.]),
        (Alignment::Right, [15., 5.]),
        (Alignment::Center, [7.5, 2.5]),
    ];
    for (alignment, expected) in cases {
        let processor = aligned(text, Direction::LeftToRight, alignment, 65.);
        assert_eq!(offsets(&processor), expected, "{alignment:?}");
    }
}

#[test]
fn rtl_start_is_right() {
    // alef bet, space, gimel dalet
    let text = "\u{05D0}\u{05D1} \u{05D2}\u{05D3}";
    let processor = aligned(text, Direction::RightToLeft, Alignment::Start, 100.);
    assert_eq!(offsets(&processor), [50.]);
    let processor = aligned(text, Direction::RightToLeft, Alignment::End, 100.);
    assert_eq!(offsets(&processor), [0.]);
    let processor = aligned(text, Direction::RightToLeft, Alignment::Left, 100.);
    assert_eq!(offsets(&processor), [0.]);
}

#[test]
fn rtl_trailing_whitespace_hangs_left() {
    let text = "\u{05D0}\u{05D1} ";
    let processor = aligned(text, Direction::RightToLeft, Alignment::Start, 100.);
    let metrics = processor.lines()[0].metrics();
    assert_eq!(metrics.width, 20.);
    assert_eq!(metrics.trailing_whitespace, 10.);
    assert_eq!(metrics.offset, 70.);
}

#[test]
fn justify_distributes_free_space() {
    // Lines: "a b c" (50, two interior spaces) and "d".
    let processor = aligned("a b c d", Direction::LeftToRight, Alignment::Justified, 55.);
    let [first, last] = processor.lines() else {
        panic!("expected two lines");
    };
    assert_eq!(first.num_spaces(), 2);
    assert_eq!(first.justify_gap(), 2.5);
    assert_eq!(first.metrics().offset, 0.);
    // The last line is start aligned.
    assert_eq!(last.justify_gap(), 0.);
    assert_eq!(last.metrics().offset, 0.);
}

#[test]
fn justify_skips_explicit_breaks_and_single_words() {
    let processor = aligned("a b\nc d", Direction::LeftToRight, Alignment::Justified, 100.);
    for line in processor.lines() {
        assert_eq!(line.justify_gap(), 0.);
    }

    // "abc" breaks at a space but has no interior gap to stretch.
    let processor = aligned("abc defg", Direction::LeftToRight, Alignment::Justified, 45.);
    assert_eq!(processor.lines()[0].num_spaces(), 0);
    assert_eq!(processor.lines()[0].justify_gap(), 0.);
}

#[test]
fn overflowing_lines_stay_put() {
    let processor = aligned("abc", Direction::LeftToRight, Alignment::Right, 15.);
    // Emergency-broken lines "a", "b", "c" fit; a single oversized unit does not.
    assert_eq!(offsets(&processor), [5., 5., 5.]);

    let processor = aligned("a", Direction::LeftToRight, Alignment::Right, 4.);
    assert_eq!(offsets(&processor), [0.]);

    let mut lcx = TestContext::new();
    lcx.set_alignment_options(AlignmentOptions {
        align_when_overflowing: true,
    });
    let processor = lcx
        .layout(
            "a",
            &[FontBlock::new(0..1, TestFont::new())],
            Direction::LeftToRight,
            Alignment::Right,
            Size::width_only(4.),
        )
        .unwrap();
    assert_eq!(offsets(&processor), [-6.]);
}

#[test]
fn unbounded_width_aligns_to_widest_line() {
    let processor = aligned("abcd\nab", Direction::LeftToRight, Alignment::Center, f32::INFINITY);
    assert_eq!(offsets(&processor), [0., 10.]);
}

#[test]
fn realign_keeps_lines() {
    let mut processor = aligned("hello world!", Direction::LeftToRight, Alignment::Start, 65.);
    let lines: Vec<_> = processor.lines().iter().map(|l| l.full_text_range()).collect();
    processor.set_alignment(Alignment::Right);
    assert_eq!(processor.alignment(), Alignment::Right);
    assert_eq!(offsets(&processor), [15., 5.]);
    processor.set_alignment(Alignment::Right);
    assert_eq!(offsets(&processor), [15., 5.]);
    let after: Vec<_> = processor.lines().iter().map(|l| l.full_text_range()).collect();
    assert_eq!(lines, after);
}
