// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod brush;
mod engines;
mod fonts;
mod visitor;

pub(crate) use brush::ColorBrush;
pub(crate) use engines::{FailingShaper, FailingUnicode, TestFont, TestShaper};
pub(crate) use fonts::{dejavu_sans, layout_dejavu};
pub(crate) use visitor::{Event, RecordingVisitor};

use crate::{Alignment, Direction, FontBlock, LayoutContext, Processor, Size};

pub(crate) type TestContext = LayoutContext<crate::IcuUnicode, TestShaper>;

/// Lays out `text` with a single [`TestFont`] block.
pub(crate) fn layout_with(
    text: &str,
    font: TestFont,
    direction: Direction,
    alignment: Alignment,
    size: Size,
) -> Processor<TestFont> {
    let mut lcx = TestContext::new();
    let len = text.encode_utf16().count();
    lcx.layout(text, &[FontBlock::new(0..len, font)], direction, alignment, size)
        .unwrap()
}

/// Lays out left-to-right, start aligned `text` with the default test font.
pub(crate) fn layout(text: &str, size: Size) -> Processor<TestFont> {
    layout_with(
        text,
        TestFont::new(),
        Direction::LeftToRight,
        Alignment::Start,
        size,
    )
}

/// The visible text of each line.
pub(crate) fn line_texts<F>(processor: &Processor<F>) -> Vec<String> {
    processor
        .lines()
        .iter()
        .map(|line| processor.text().substring(line.text_range()))
        .collect()
}
