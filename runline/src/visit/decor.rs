// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoration blocks and paintable output.

use core::ops::Range;

use super::{LineInfo, RunInfo, Visitor, visit_decorated};
use crate::analysis::CodeUnitFlags;
use crate::{Point, Processor, Rect};

/// Paint for a range of text.
#[derive(Clone, PartialEq, Debug)]
pub struct DecorBlock<B> {
    /// Paint for the glyphs.
    pub foreground: B,
    /// Paint for the area behind the glyphs.
    pub background: Option<B>,
    /// Range of code units.
    pub range: Range<usize>,
}

impl<B> DecorBlock<B> {
    /// Creates a block with a foreground paint only.
    pub fn new(range: Range<usize>, foreground: B) -> Self {
        Self {
            foreground,
            background: None,
            range,
        }
    }

    /// Sets the background paint.
    pub fn with_background(mut self, background: B) -> Self {
        self.background = Some(background);
        self
    }
}

/// Glyphs that share one font, positioned relative to an origin.
#[derive(Clone, Debug)]
pub struct GlyphBlob<F> {
    /// The font of the glyphs.
    pub font: F,
    /// Glyph identifiers.
    pub glyphs: Vec<u32>,
    /// Glyph positions relative to the output offset.
    pub positions: Vec<Point>,
}

/// Background of a [`TextOutput`].
#[derive(Clone, PartialEq, Debug)]
pub struct Background<B> {
    /// Paint for the rectangle.
    pub paint: B,
    /// Area covered by the segment on its line.
    pub rect: Rect,
}

/// One paintable segment of text.
#[derive(Clone, Debug)]
pub struct TextOutput<F, B> {
    /// The glyphs.
    pub blob: GlyphBlob<F>,
    /// Foreground paint.
    pub paint: B,
    /// Origin of the blob: the segment start on the baseline.
    pub offset: Point,
    /// Optional background.
    pub background: Option<Background<B>>,
}

/// Normalizes caller supplied decoration blocks.
///
/// Ranges are clamped to the text and their edges moved back to the nearest
/// grapheme start. Empty blocks are dropped. Where blocks overlap, the one
/// starting first keeps the overlapping text (on ties, the one given first).
/// Gaps are filled with blocks carrying the default foreground and no
/// background, so the result covers the whole text in order.
pub fn sort_decor_blocks<B: Clone + Default>(
    blocks: &[DecorBlock<B>],
    flags: &[CodeUnitFlags],
) -> Vec<DecorBlock<B>> {
    let text_len = flags.len().saturating_sub(1);
    let snap = |index: usize| {
        let mut index = index.min(text_len);
        while index > 0 && index < text_len && !flags[index].is_grapheme_start() {
            index -= 1;
        }
        index
    };

    let mut adjusted = 0;
    let mut dropped = 0;
    let mut sorted: Vec<DecorBlock<B>> = blocks
        .iter()
        .filter_map(|block| {
            let range = snap(block.range.start)..snap(block.range.end);
            if range.is_empty() {
                dropped += 1;
                return None;
            }
            if range != block.range {
                adjusted += 1;
            }
            Some(DecorBlock {
                range,
                ..block.clone()
            })
        })
        .collect();
    // Stable, so equal starts keep the caller's order.
    sorted.sort_by_key(|block| block.range.start);

    let mut normalized = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut covered = 0;
    let mut hidden = 0;
    for mut block in sorted {
        if block.range.end <= covered {
            hidden += 1;
            continue;
        }
        if block.range.start > covered {
            normalized.push(DecorBlock::new(covered..block.range.start, B::default()));
        }
        block.range.start = block.range.start.max(covered);
        covered = block.range.end;
        normalized.push(block);
    }
    if covered < text_len {
        normalized.push(DecorBlock::new(covered..text_len, B::default()));
    }

    if adjusted != 0 || dropped != 0 || hidden != 0 {
        log::debug!(
            "normalized {} decoration blocks: {adjusted} clamped, {dropped} empty, {hidden} overlapped",
            blocks.len()
        );
    }
    normalized
}

struct OutputCollector<F, B> {
    line_top: f32,
    line_height: f32,
    outputs: Vec<TextOutput<F, B>>,
}

impl<F: Clone, B: Clone> Visitor<F, B> for OutputCollector<F, B> {
    fn on_begin_line(&mut self, line: &LineInfo<'_>) {
        let metrics = line.line.metrics();
        self.line_top = metrics.top();
        self.line_height = metrics.line_height;
    }

    fn on_glyphs(&mut self, run: &RunInfo<'_, F>, decor: Option<&DecorBlock<B>>) {
        let Some(decor) = decor else {
            return;
        };
        let offset = Point::new(run.x, run.baseline);
        self.outputs.push(TextOutput {
            blob: GlyphBlob {
                font: run.font.clone(),
                glyphs: run.glyphs.to_vec(),
                positions: run
                    .positions
                    .iter()
                    .map(|pos| Point::new(pos.x - offset.x, pos.y - offset.y))
                    .collect(),
            },
            paint: decor.foreground.clone(),
            offset,
            background: decor.background.clone().map(|paint| Background {
                paint,
                rect: Rect {
                    x: run.x,
                    y: self.line_top,
                    width: run.advance,
                    height: self.line_height,
                },
            }),
        });
    }
}

/// Collects one [`TextOutput`] per decorated segment.
pub(crate) fn collect_outputs<F: Clone, B: Clone + Default>(
    processor: &Processor<F>,
    blocks: &[DecorBlock<B>],
) -> Vec<TextOutput<F, B>> {
    let mut collector = OutputCollector {
        line_top: 0.,
        line_height: 0.,
        outputs: Vec::new(),
    };
    visit_decorated(processor, blocks, &mut collector);
    collector.outputs
}
