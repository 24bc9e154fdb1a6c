// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual order traversal of a laid out text.
//!
//! Lines are replayed top to bottom, runs in visual order and glyphs in
//! storage order. Consecutive glyphs are grouped into segments: in plain mode
//! a segment is the part of a run on a line, in decorated mode a segment is
//! additionally cut wherever the decoration block changes.

mod decor;

use core::ops::Range;

pub use decor::{Background, DecorBlock, GlyphBlob, TextOutput, sort_decor_blocks};
pub(crate) use decor::collect_outputs;

use crate::analysis::cluster_end;
use crate::layout::Line;
use crate::{Point, Processor};

/// A line as seen by a [`Visitor`].
#[derive(Copy, Clone, Debug)]
pub struct LineInfo<'a> {
    /// Index of the line.
    pub index: usize,
    /// The line itself.
    pub line: &'a Line,
}

/// A segment of consecutive glyphs of one run, as seen by a [`Visitor`].
#[derive(Clone, Debug)]
pub struct RunInfo<'a, F> {
    /// The font of the run.
    pub font: &'a F,
    /// Index of the run in [`Processor::runs`].
    pub run_index: usize,
    /// Storage range of the glyphs within the run.
    pub glyph_range: Range<usize>,
    /// Glyph identifiers.
    pub glyphs: &'a [u32],
    /// Absolute position of each glyph.
    pub positions: &'a [Point],
    /// Range of text covered by the glyphs.
    pub text_range: Range<usize>,
    /// Whether the run is right-to-left.
    pub is_rtl: bool,
    /// Horizontal position of the segment's left edge.
    pub x: f32,
    /// Advance of the segment, including justification.
    pub advance: f32,
    /// Baseline of the line.
    pub baseline: f32,
}

/// Receives the contents of a layout in visual order.
pub trait Visitor<F, B = ()> {
    /// Called before the segments of a line.
    fn on_begin_line(&mut self, line: &LineInfo<'_>) {
        let _ = line;
    }

    /// Called for each segment; `decor` is the decoration block covering it in
    /// decorated mode.
    fn on_glyphs(&mut self, run: &RunInfo<'_, F>, decor: Option<&DecorBlock<B>>);

    /// Called after the segments of a line.
    fn on_end_line(&mut self, line: &LineInfo<'_>) {
        let _ = line;
    }
}

/// Visits every line and run segment of `processor`.
pub fn visit<F, B, V: Visitor<F, B>>(processor: &Processor<F>, visitor: &mut V) {
    walk(processor, &[], |_| None, visitor);
}

/// Visits `processor`, splitting segments along the decoration `blocks`.
///
/// The blocks are normalized with [`sort_decor_blocks`] first.
pub fn visit_decorated<F, B, V>(processor: &Processor<F>, blocks: &[DecorBlock<B>], visitor: &mut V)
where
    B: Clone + Default,
    V: Visitor<F, B>,
{
    let blocks = sort_decor_blocks(blocks, processor.flags());
    walk(
        processor,
        &blocks,
        |cluster| Some(blocks.partition_point(|block| block.range.end <= cluster)),
        visitor,
    );
}

/// Shared segment walk: a new segment opens whenever `key` changes between
/// consecutive glyphs. `key` maps a cluster index to an index into `blocks`.
fn walk<F, B, V: Visitor<F, B>>(
    processor: &Processor<F>,
    blocks: &[DecorBlock<B>],
    key: impl Fn(usize) -> Option<usize>,
    visitor: &mut V,
) {
    let flags = processor.flags();
    let runs = processor.runs();
    let mut positions = Vec::new();

    for (index, line) in processor.lines().iter().enumerate() {
        let info = LineInfo { index, line };
        visitor.on_begin_line(&info);

        let metrics = line.metrics();
        let baseline = metrics.baseline;
        let gap = line.justify_gap();
        let visible = line.text_range();
        let is_interior_space = |cluster: usize| {
            gap != 0.
                && visible.contains(&cluster)
                && flags[cluster].is_whitespace()
                && flags[cluster].is_grapheme_start()
        };

        let mut x = metrics.offset;
        for &run_index in line.runs() {
            let run = &runs[run_index];
            let range = line.glyph_range(run_index, run);
            if range.is_empty() {
                continue;
            }

            let mut segment_start = range.start;
            let mut segment_x = x;
            let mut current = key(run.clusters[range.start]);
            positions.clear();

            for glyph in range.clone() {
                let cluster = run.clusters[glyph];
                let glyph_key = key(cluster);
                if glyph != segment_start && glyph_key != current {
                    emit(
                        visitor,
                        processor,
                        run_index,
                        segment_start..glyph,
                        &positions,
                        current.and_then(|index| blocks.get(index)),
                        segment_x,
                        x,
                        baseline,
                    );
                    segment_start = glyph;
                    segment_x = x;
                    positions.clear();
                }
                current = glyph_key;

                let offset = run.offset(glyph);
                positions.push(Point::new(x + offset.x, baseline + offset.y));
                x += run.positions[glyph + 1].x - run.positions[glyph].x;

                let ends_cluster = glyph + 1 == range.end || run.clusters[glyph + 1] != cluster;
                if ends_cluster && is_interior_space(cluster) {
                    x += gap;
                }
            }
            emit(
                visitor,
                processor,
                run_index,
                segment_start..range.end,
                &positions,
                current.and_then(|index| blocks.get(index)),
                segment_x,
                x,
                baseline,
            );
        }

        visitor.on_end_line(&info);
    }
}

fn emit<F, B, V: Visitor<F, B>>(
    visitor: &mut V,
    processor: &Processor<F>,
    run_index: usize,
    glyph_range: Range<usize>,
    positions: &[Point],
    decor: Option<&DecorBlock<B>>,
    start_x: f32,
    end_x: f32,
    baseline: f32,
) {
    let run = &processor.runs()[run_index];
    let clusters = &run.clusters[glyph_range.clone()];
    let start = clusters.iter().copied().min().unwrap_or(0);
    let last = clusters.iter().copied().max().unwrap_or(0);
    let info = RunInfo {
        font: &run.font,
        run_index,
        glyph_range: glyph_range.clone(),
        glyphs: &run.glyphs[glyph_range],
        positions,
        text_range: start..cluster_end(processor.flags(), last),
        is_rtl: run.is_rtl(),
        x: start_x,
        advance: end_x - start_x,
        baseline,
    };
    visitor.on_glyphs(&info, decor);
}
