// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic engines for tests.

use core::ops::Range;
use std::cell::Cell;
use std::rc::Rc;

use crate::{
    Error, LineBreak, Point, Result, RunMetrics, ShapedRun, ShapingEngine, UnicodeEngine,
};

/// Glyph id emitted for a ligature.
pub(crate) const LIGATURE_GLYPH: u32 = 0xFB01;

/// A monospaced font: every glyph advances by `advance`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestFont {
    pub(crate) advance: f32,
    /// Character sequence shaped into a single [`LIGATURE_GLYPH`].
    pub(crate) ligature: Option<&'static str>,
    /// Explicit visual order, as logical glyph indices, for a single piece.
    pub(crate) visual_order: Option<Vec<usize>>,
}

impl TestFont {
    pub(crate) fn new() -> Self {
        Self {
            advance: 10.,
            ligature: None,
            visual_order: None,
        }
    }

    pub(crate) fn with_ligature(mut self, ligature: &'static str) -> Self {
        self.ligature = Some(ligature);
        self
    }

    pub(crate) fn with_visual_order(mut self, order: Vec<usize>) -> Self {
        self.visual_order = Some(order);
        self
    }
}

/// Shapes one glyph per character (glyph id = code point), reversing
/// right-to-left pieces. Counts its calls.
#[derive(Clone, Debug, Default)]
pub(crate) struct TestShaper {
    pub(crate) calls: Rc<Cell<usize>>,
}

impl ShapingEngine for TestShaper {
    type Font = TestFont;

    fn try_new() -> Result<Self> {
        Ok(Self::default())
    }

    fn shape(
        &mut self,
        text: &str,
        range: Range<usize>,
        font: &TestFont,
        bidi_level: u8,
        mut sink: impl FnMut(ShapedRun<'_, TestFont>),
    ) -> Result<()> {
        self.calls.set(self.calls.get() + 1);

        let piece = &text[range.clone()];
        let mut logical = Vec::new();
        let mut chars = piece.char_indices();
        while let Some((offset, ch)) = chars.next() {
            let cluster = range.start + offset;
            if let Some(ligature) = font.ligature {
                if piece[offset..].starts_with(ligature) {
                    logical.push((LIGATURE_GLYPH, cluster));
                    for _ in 1..ligature.chars().count() {
                        chars.next();
                    }
                    continue;
                }
            }
            logical.push((ch as u32, cluster));
        }

        let visual: Vec<(u32, usize)> = match &font.visual_order {
            Some(order) => order.iter().map(|&index| logical[index]).collect(),
            None if bidi_level & 1 != 0 => logical.into_iter().rev().collect(),
            None => logical,
        };
        let glyphs: Vec<u32> = visual.iter().map(|&(glyph, _)| glyph).collect();
        let clusters: Vec<usize> = visual.iter().map(|&(_, cluster)| cluster).collect();
        let positions: Vec<Point> = (0..=glyphs.len())
            .map(|index| Point::new(index as f32 * font.advance, 0.))
            .collect();

        sink(ShapedRun {
            font,
            glyphs: &glyphs,
            positions: &positions,
            offsets: &[],
            clusters: &clusters,
            text_range: range,
            bidi_level,
            metrics: RunMetrics {
                ascent: 8.,
                descent: 2.,
                leading: 0.,
            },
        });
        Ok(())
    }
}

/// A shaping engine that can never be constructed.
#[derive(Debug)]
pub(crate) struct FailingShaper;

impl ShapingEngine for FailingShaper {
    type Font = TestFont;

    fn try_new() -> Result<Self> {
        Err(Error::ShaperUnavailable("no shaping backend".into()))
    }

    fn shape(
        &mut self,
        _text: &str,
        _range: Range<usize>,
        _font: &TestFont,
        _bidi_level: u8,
        _sink: impl FnMut(ShapedRun<'_, TestFont>),
    ) -> Result<()> {
        Err(Error::Shaping("no shaping backend".into()))
    }
}

/// A Unicode engine that can never be constructed.
#[derive(Debug)]
pub(crate) struct FailingUnicode;

impl UnicodeEngine for FailingUnicode {
    fn try_new() -> Result<Self> {
        Err(Error::UnicodeUnavailable("no segmentation data".into()))
    }

    fn is_whitespace(&self, ch: char) -> bool {
        ch.is_whitespace()
    }

    fn for_each_line_break(&self, _text: &str, _f: impl FnMut(usize, LineBreak)) {}

    fn for_each_grapheme_start(&self, _text: &str, _f: impl FnMut(usize)) {}
}
