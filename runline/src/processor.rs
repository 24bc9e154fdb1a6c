// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::analysis::CodeUnitFlags;
use crate::layout::alignment::align;
use crate::layout::wrap::wrap;
use crate::visit::collect_outputs;
use crate::{
    Alignment, AlignmentOptions, DecorBlock, Direction, Line, Run, Size, Text, TextOutput,
};

/// A shaped text and its current lines.
///
/// Created by [`LayoutContext::layout`](crate::LayoutContext::layout). The
/// runs never change after shaping; the lines are rebuilt by
/// [`LayoutContext::relayout`](crate::LayoutContext::relayout).
#[derive(Clone, Debug)]
pub struct Processor<F> {
    pub(crate) text: Text,
    pub(crate) flags: Vec<CodeUnitFlags>,
    pub(crate) runs: Vec<Run<F>>,
    pub(crate) lines: Vec<Line>,
    pub(crate) size: Size,
    pub(crate) direction: Direction,
    pub(crate) alignment: Alignment,
    pub(crate) options: AlignmentOptions,
    pub(crate) truncated: bool,
}

impl<F> Processor<F> {
    /// Returns the text.
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// Returns the per code unit flags, including the end sentinel.
    pub fn flags(&self) -> &[CodeUnitFlags] {
        &self.flags
    }

    /// Returns the shaped runs in logical order.
    pub fn runs(&self) -> &[Run<F>] {
        &self.runs
    }

    /// Returns the lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the size the lines were wrapped for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the base direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Returns the alignment options.
    pub fn alignment_options(&self) -> AlignmentOptions {
        self.options
    }

    /// Returns `true` if the height limit cut off part of the text.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Width of the widest line, excluding trailing whitespace.
    pub fn width(&self) -> f32 {
        self.lines
            .iter()
            .map(|line| line.metrics.width)
            .max_by(f32::total_cmp)
            .unwrap_or(0.)
    }

    /// Total height of the lines.
    pub fn height(&self) -> f32 {
        self.lines
            .last()
            .map_or(0., |line| line.metrics.bottom())
    }

    /// Changes the alignment, keeping the current line breaks.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
        self.align();
    }

    /// Returns one paintable output per decorated segment.
    pub fn decorate<B: Clone + Default>(&self, blocks: &[DecorBlock<B>]) -> Vec<TextOutput<F, B>>
    where
        F: Clone,
    {
        collect_outputs(self, blocks)
    }

    /// Wraps and aligns the runs for `size`; returns whether the line
    /// boundaries changed.
    pub(crate) fn rewrap(&mut self, size: Size) -> bool {
        let previous: Vec<Range<usize>> = self.lines.iter().map(Line::full_text_range).collect();
        self.lines.clear();

        let output = wrap(&self.runs, &self.flags, size);
        self.lines = output.lines;
        self.truncated = output.truncated;
        self.size = size;
        self.align();

        previous.len() != self.lines.len()
            || previous
                .iter()
                .zip(&self.lines)
                .any(|(range, line)| *range != line.full_text_range)
    }

    fn align(&mut self) {
        align(
            &mut self.lines,
            self.size.width,
            self.alignment,
            self.direction,
            self.options,
        );
    }
}
