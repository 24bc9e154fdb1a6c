// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaping result ingestion.
//!
//! The shaper resolves bidi levels for the whole text, hands each font block
//! to a [`ShapingEngine`] one level run at a time, and stores every engine
//! callback as a [`Run`] in canonical (UTF-16) index space.

mod harfrust_engine;

use core::ops::Range;

use unicode_bidi::{BidiInfo, Level};

use crate::analysis::{Analysis, CodeUnitFlags};
use crate::layout::{Direction, Run, RunMetrics};
use crate::{Error, Point, Result};

pub use harfrust_engine::{HarfrustShaper, ShapingFont};

/// Assignment of a font to a range of text, in code units.
#[derive(Clone, PartialEq, Debug)]
pub struct FontBlock<F> {
    /// Range of code units.
    pub range: Range<usize>,
    /// The font used for the range.
    pub font: F,
}

impl<F> FontBlock<F> {
    /// Creates a new font block.
    pub fn new(range: Range<usize>, font: F) -> Self {
        Self { range, font }
    }
}

/// One shaped piece of text as reported by a [`ShapingEngine`].
///
/// All text indices are native: UTF-8 byte offsets into the text handed to
/// [`ShapingEngine::shape`].
#[derive(Debug)]
pub struct ShapedRun<'a, F> {
    /// The font the glyphs belong to.
    pub font: &'a F,
    /// Glyph identifiers in visual order.
    pub glyphs: &'a [u32],
    /// Pen positions; one more than there are glyphs.
    pub positions: &'a [Point],
    /// Per-glyph offsets from the pen position. May be empty.
    pub offsets: &'a [Point],
    /// Byte offset of the first character of each glyph's cluster.
    pub clusters: &'a [usize],
    /// Byte range of the text covered by these glyphs.
    pub text_range: Range<usize>,
    /// Bidi embedding level the piece was shaped at.
    pub bidi_level: u8,
    /// Vertical metrics of the font at its size.
    pub metrics: RunMetrics,
}

/// Turns text into positioned glyphs.
///
/// For each call to [`shape`](Self::shape) the engine reports one or more
/// [`ShapedRun`]s through `sink`, in logical order, together covering
/// `range`.
pub trait ShapingEngine: Sized {
    /// Font handle accepted by the engine.
    type Font: Clone;

    /// Constructs the engine.
    fn try_new() -> Result<Self>;

    /// Shapes `text[range]` with `font` at `bidi_level`.
    ///
    /// The whole `text` is passed so that engines can use the surrounding
    /// context.
    fn shape(
        &mut self,
        text: &str,
        range: Range<usize>,
        font: &Self::Font,
        bidi_level: u8,
        sink: impl FnMut(ShapedRun<'_, Self::Font>),
    ) -> Result<()>;
}

/// Shapes every font block and returns the runs in logical order.
///
/// Marks the glyph start flags of `analysis` as a side effect.
pub(crate) fn shape_text<S: ShapingEngine>(
    engine: &mut S,
    analysis: &mut Analysis,
    blocks: &[FontBlock<S::Font>],
    direction: Direction,
) -> Result<Vec<Run<S::Font>>> {
    let text_len = analysis.flags.len() - 1;
    validate_blocks(blocks, text_len)?;

    let mut runs = Vec::new();
    if text_len != 0 {
        let base_level = match direction {
            Direction::LeftToRight => Level::ltr(),
            Direction::RightToLeft => Level::rtl(),
        };
        let bidi = BidiInfo::new(&analysis.utf8, Some(base_level));
        let levels = &bidi.levels;

        let analysis = &*analysis;
        for block in blocks {
            let start = analysis.to_utf8(block.range.start);
            let end = analysis.to_utf8(block.range.end);
            for piece in split_levels(levels, start..end) {
                let level = levels[piece.start].number();
                engine.shape(&analysis.utf8, piece, &block.font, level, |shaped| {
                    log::trace!(
                        "shaped {} glyphs for bytes {:?} at level {}",
                        shaped.glyphs.len(),
                        shaped.text_range,
                        shaped.bidi_level
                    );
                    runs.push(ingest(shaped, analysis));
                })?;
            }
        }
    }

    for run in &runs {
        for &cluster in &run.clusters {
            analysis.flags[cluster].insert(CodeUnitFlags::GLYPH_START);
        }
    }
    analysis.flags[text_len].insert(CodeUnitFlags::GLYPH_START);
    Ok(runs)
}

fn validate_blocks<F>(blocks: &[FontBlock<F>], text_len: usize) -> Result<()> {
    let mut expected = 0;
    for block in blocks {
        let range = &block.range;
        if range.start != expected || range.end < range.start || range.end > text_len {
            return Err(Error::FontBlocks {
                expected,
                found: range.clone(),
            });
        }
        expected = range.end;
    }
    if expected != text_len {
        return Err(Error::FontBlocks {
            expected,
            found: text_len..text_len,
        });
    }
    Ok(())
}

/// Splits a byte range wherever the resolved bidi level changes.
fn split_levels(levels: &[Level], range: Range<usize>) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut start = range.start;
    for index in range.clone().skip(1) {
        if levels[index] != levels[start] {
            pieces.push(start..index);
            start = index;
        }
    }
    if start < range.end {
        pieces.push(start..range.end);
    }
    pieces
}

/// Copies an engine result into a run, moving every index into code units.
fn ingest<F: Clone>(shaped: ShapedRun<'_, F>, analysis: &Analysis) -> Run<F> {
    debug_assert_eq!(shaped.positions.len(), shaped.glyphs.len() + 1);
    debug_assert_eq!(shaped.clusters.len(), shaped.glyphs.len());
    debug_assert!(shaped.offsets.is_empty() || shaped.offsets.len() == shaped.glyphs.len());
    Run {
        font: shaped.font.clone(),
        glyphs: shaped.glyphs.to_vec(),
        positions: shaped.positions.to_vec(),
        offsets: shaped.offsets.to_vec(),
        clusters: shaped
            .clusters
            .iter()
            .map(|&cluster| analysis.to_utf16(cluster))
            .collect(),
        text_range: analysis.to_utf16(shaped.text_range.start)
            ..analysis.to_utf16(shaped.text_range.end),
        bidi_level: shaped.bidi_level,
        metrics: shaped.metrics,
    }
}
