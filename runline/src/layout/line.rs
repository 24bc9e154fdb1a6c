// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use smallvec::SmallVec;

use super::{BreakReason, Run};

/// Position of a glyph within the run list.
///
/// `glyph` is a logical index: it counts glyphs in text order, which for
/// right-to-left runs is the reverse of storage order.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GlyphPos {
    /// Index of the run.
    pub run: usize,
    /// Logical glyph index within the run.
    pub glyph: usize,
}

impl GlyphPos {
    /// Creates a new glyph position.
    pub const fn new(run: usize, glyph: usize) -> Self {
        Self { run, glyph }
    }
}

/// Metrics information for a line.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct LineMetrics {
    /// Typographic ascent.
    pub ascent: f32,
    /// Typographic descent.
    pub descent: f32,
    /// Typographic leading.
    pub leading: f32,
    /// The absolute line height (in layout units).
    pub line_height: f32,
    /// Offset to the baseline from the top of the layout.
    pub baseline: f32,
    /// Offset for alignment.
    pub offset: f32,
    /// Advance of the line, excluding trailing whitespace.
    pub width: f32,
    /// Full advance of the line, including trailing whitespace.
    pub advance: f32,
    /// Advance of trailing whitespace.
    pub trailing_whitespace: f32,
}

impl LineMetrics {
    /// Returns the top of the line box.
    pub fn top(&self) -> f32 {
        self.baseline - self.ascent - self.leading * 0.5
    }

    /// Returns the bottom of the line box.
    pub fn bottom(&self) -> f32 {
        self.top() + self.line_height
    }
}

/// A single line of laid out text.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Line {
    pub(crate) text_range: Range<usize>,
    pub(crate) full_text_range: Range<usize>,
    pub(crate) metrics: LineMetrics,
    pub(crate) runs: SmallVec<[usize; 4]>,
    pub(crate) begin: GlyphPos,
    pub(crate) end: GlyphPos,
    pub(crate) break_reason: BreakReason,
    pub(crate) num_spaces: usize,
    pub(crate) justify_gap: f32,
}

impl Line {
    /// Returns the range of visible text, without trailing whitespace.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// Returns the range of text including trailing whitespace and any line
    /// terminator.
    pub fn full_text_range(&self) -> Range<usize> {
        self.full_text_range.clone()
    }

    /// Returns the metrics for the line.
    pub fn metrics(&self) -> &LineMetrics {
        &self.metrics
    }

    /// Returns the indices of the runs on this line, in visual order.
    pub fn runs(&self) -> &[usize] {
        &self.runs
    }

    /// Returns the position of the logically first glyph of the line.
    pub fn begin(&self) -> GlyphPos {
        self.begin
    }

    /// Returns the position after the logically last glyph of the line.
    ///
    /// `end.run` is the last run that contributes glyphs.
    pub fn end(&self) -> GlyphPos {
        self.end
    }

    /// Returns why the line ended.
    pub fn break_reason(&self) -> BreakReason {
        self.break_reason
    }

    /// Returns the number of interior whitespace clusters.
    pub fn num_spaces(&self) -> usize {
        self.num_spaces
    }

    /// Returns the extra advance added after each interior whitespace cluster
    /// by justification.
    pub fn justify_gap(&self) -> f32 {
        self.justify_gap
    }

    /// Returns the storage range of the glyphs of `run` on this line.
    pub fn glyph_range<F>(&self, run_index: usize, run: &Run<F>) -> Range<usize> {
        if run_index < self.begin.run || run_index > self.end.run {
            return 0..0;
        }
        let start = if run_index == self.begin.run {
            self.begin.glyph
        } else {
            0
        };
        let end = if run_index == self.end.run {
            self.end.glyph
        } else {
            run.len()
        };
        if start >= end {
            return 0..0;
        }
        run.storage_range(start..end)
    }
}
