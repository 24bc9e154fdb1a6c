// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{DecorBlock, LineInfo, Point, RunInfo, Visitor};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event<B> {
    BeginLine(usize),
    Glyphs {
        /// The glyph ids decoded back into characters.
        text: String,
        x: f32,
        advance: f32,
        positions: Vec<Point>,
        paint: Option<B>,
    },
    EndLine(usize),
}

/// Records every callback.
#[derive(Debug)]
pub(crate) struct RecordingVisitor<B> {
    pub(crate) events: Vec<Event<B>>,
}

impl<B> RecordingVisitor<B> {
    pub(crate) fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Text and paint of each segment, in order.
    pub(crate) fn segments(&self) -> Vec<(String, Option<B>)>
    where
        B: Clone,
    {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Glyphs { text, paint, .. } => Some((text.clone(), paint.clone())),
                _ => None,
            })
            .collect()
    }
}

impl<F, B: Clone> Visitor<F, B> for RecordingVisitor<B> {
    fn on_begin_line(&mut self, line: &LineInfo<'_>) {
        self.events.push(Event::BeginLine(line.index));
    }

    fn on_glyphs(&mut self, run: &RunInfo<'_, F>, decor: Option<&DecorBlock<B>>) {
        self.events.push(Event::Glyphs {
            text: run
                .glyphs
                .iter()
                .map(|&glyph| char::from_u32(glyph).unwrap_or('\u{FFFD}'))
                .collect(),
            x: run.x,
            advance: run.advance,
            positions: run.positions.to_vec(),
            paint: decor.map(|block| block.foreground.clone()),
        });
    }

    fn on_end_line(&mut self, line: &LineInfo<'_>) {
        self.events.push(Event::EndLine(line.index));
    }
}
