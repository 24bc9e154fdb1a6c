// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::Point;

/// Metrics information for a run.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct RunMetrics {
    /// Typographic ascent.
    pub ascent: f32,
    /// Typographic descent, as a positive distance below the baseline.
    pub descent: f32,
    /// Typographic leading.
    pub leading: f32,
}

/// A sequence of glyphs shaped with one font at one bidi level.
///
/// Glyphs are stored in visual order, exactly as the shaping engine produced
/// them. For right-to-left runs the first stored glyph therefore belongs to
/// the logically last cluster.
#[derive(Clone, Debug)]
pub struct Run<F> {
    pub(crate) font: F,
    pub(crate) glyphs: Vec<u32>,
    pub(crate) positions: Vec<Point>,
    pub(crate) offsets: Vec<Point>,
    pub(crate) clusters: Vec<usize>,
    pub(crate) text_range: Range<usize>,
    pub(crate) bidi_level: u8,
    pub(crate) metrics: RunMetrics,
}

impl<F> Run<F> {
    /// Returns the font the run was shaped with.
    pub fn font(&self) -> &F {
        &self.font
    }

    /// Returns the glyph identifiers.
    pub fn glyphs(&self) -> &[u32] {
        &self.glyphs
    }

    /// Returns the pen positions: one per glyph plus the final pen position.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Returns the per-glyph offset from the pen position.
    pub fn offset(&self, glyph: usize) -> Point {
        self.offsets.get(glyph).copied().unwrap_or(Point::ZERO)
    }

    /// Returns the cluster (code unit index of the first character) of each glyph.
    pub fn clusters(&self) -> &[usize] {
        &self.clusters
    }

    /// Returns the range of text covered by the run.
    pub fn text_range(&self) -> Range<usize> {
        self.text_range.clone()
    }

    /// Returns the bidi embedding level.
    pub fn bidi_level(&self) -> u8 {
        self.bidi_level
    }

    /// Returns `true` if the run is right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.bidi_level & 1 != 0
    }

    /// Returns the vertical metrics of the run.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Returns the number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if the run has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns the advance of the glyphs in the storage range `glyphs`.
    pub fn advance_of(&self, glyphs: Range<usize>) -> f32 {
        if glyphs.is_empty() {
            return 0.;
        }
        self.positions[glyphs.end].x - self.positions[glyphs.start].x
    }

    /// Returns the total advance of the run.
    pub fn advance(&self) -> f32 {
        self.advance_of(0..self.len())
    }

    /// Converts a logical glyph index to a storage index.
    ///
    /// Logical order walks clusters in text order; for right-to-left runs
    /// this is the reverse of storage order.
    pub(crate) fn storage_index(&self, logical: usize) -> usize {
        if self.is_rtl() {
            self.len() - 1 - logical
        } else {
            logical
        }
    }

    /// Converts a logical glyph range to a storage range.
    pub(crate) fn storage_range(&self, logical: Range<usize>) -> Range<usize> {
        if self.is_rtl() {
            self.len() - logical.end..self.len() - logical.start
        } else {
            logical
        }
    }
}
