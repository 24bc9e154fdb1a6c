// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unicode engine backed by ICU4X compiled data.

use core::fmt;

use icu_properties::props::{LineBreak as LineBreakClass, WhiteSpace};
use icu_properties::{
    CodePointMapData, CodePointMapDataBorrowed, CodePointSetData, CodePointSetDataBorrowed,
};
use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::{
    GraphemeClusterSegmenter, GraphemeClusterSegmenterBorrowed, LineSegmenter,
    LineSegmenterBorrowed,
};

use super::{LineBreak, UnicodeEngine};
use crate::Result;

/// [`UnicodeEngine`] using the ICU4X segmenters and property tables.
pub struct IcuUnicode {
    grapheme_segmenter: GraphemeClusterSegmenterBorrowed<'static>,
    line_segmenter: LineSegmenterBorrowed<'static>,
    white_space: CodePointSetDataBorrowed<'static>,
    line_break: CodePointMapDataBorrowed<'static, LineBreakClass>,
}

impl IcuUnicode {
    /// Creates the engine from the data compiled into the binary.
    pub fn new() -> Self {
        Self {
            grapheme_segmenter: GraphemeClusterSegmenter::new(),
            line_segmenter: LineSegmenter::new_auto(LineBreakOptions::default()),
            white_space: CodePointSetData::new::<WhiteSpace>(),
            line_break: CodePointMapData::<LineBreakClass>::new(),
        }
    }

    fn is_mandatory(&self, ch: char) -> bool {
        matches!(
            self.line_break.get(ch),
            LineBreakClass::MandatoryBreak
                | LineBreakClass::CarriageReturn
                | LineBreakClass::LineFeed
                | LineBreakClass::NextLine
        )
    }
}

impl Default for IcuUnicode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IcuUnicode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcuUnicode").finish_non_exhaustive()
    }
}

impl UnicodeEngine for IcuUnicode {
    fn try_new() -> Result<Self> {
        Ok(Self::new())
    }

    fn is_whitespace(&self, ch: char) -> bool {
        // No-break spaces are glue: they never hang at the end of a line.
        self.white_space.contains(ch) && self.line_break.get(ch) != LineBreakClass::Glue
    }

    fn for_each_line_break(&self, text: &str, mut f: impl FnMut(usize, LineBreak)) {
        for index in self.line_segmenter.segment_str(text) {
            if index == 0 || index >= text.len() {
                continue;
            }
            let kind = match text[..index].chars().next_back() {
                Some(ch) if self.is_mandatory(ch) => LineBreak::Hard,
                _ => LineBreak::Soft,
            };
            f(index, kind);
        }
    }

    fn for_each_grapheme_start(&self, text: &str, mut f: impl FnMut(usize)) {
        for index in self.grapheme_segmenter.segment_str(text) {
            f(index);
        }
    }
}
