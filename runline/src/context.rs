// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context for layout.

use core::fmt;

use crate::analysis::analyze_text;
use crate::shape::shape_text;
use crate::{
    Alignment, AlignmentOptions, Direction, FontBlock, HarfrustShaper, IcuUnicode, Processor,
    Result, ShapingEngine, Size, Text, UnicodeEngine,
};

/// Context for building text layouts.
///
/// Owns the Unicode and shaping engines. Each engine is constructed on first
/// use unless one was supplied with [`with_engines`](Self::with_engines).
pub struct LayoutContext<U = IcuUnicode, S = HarfrustShaper> {
    unicode: Option<U>,
    shaper: Option<S>,
    alignment_options: AlignmentOptions,
}

impl<U: UnicodeEngine, S: ShapingEngine> LayoutContext<U, S> {
    /// Creates a context that constructs its engines lazily.
    pub fn new() -> Self {
        Self {
            unicode: None,
            shaper: None,
            alignment_options: AlignmentOptions::default(),
        }
    }

    /// Creates a context with pre-built engines.
    pub fn with_engines(unicode: U, shaper: S) -> Self {
        Self {
            unicode: Some(unicode),
            shaper: Some(shaper),
            alignment_options: AlignmentOptions::default(),
        }
    }

    /// Returns the alignment options given to new processors.
    pub fn alignment_options(&self) -> AlignmentOptions {
        self.alignment_options
    }

    /// Sets the alignment options given to new processors.
    pub fn set_alignment_options(&mut self, options: AlignmentOptions) {
        self.alignment_options = options;
    }

    /// Returns the shaping engine, if it has been constructed.
    pub fn shaper(&self) -> Option<&S> {
        self.shaper.as_ref()
    }

    /// Analyzes, shapes, wraps and aligns `text`.
    ///
    /// `font_blocks` must be sorted and cover the whole text without gaps.
    /// Fails if an engine cannot be constructed, if the font blocks are
    /// invalid, or if shaping fails.
    pub fn layout(
        &mut self,
        text: impl Into<Text>,
        font_blocks: &[FontBlock<S::Font>],
        direction: Direction,
        alignment: Alignment,
        size: Size,
    ) -> Result<Processor<S::Font>> {
        let text = text.into();
        let unicode = engine(&mut self.unicode, U::try_new)?;
        let shaper = engine(&mut self.shaper, S::try_new)?;

        let mut analysis = analyze_text(unicode, &text);
        let runs = shape_text(shaper, &mut analysis, font_blocks, direction)?;
        log::debug!(
            "shaped {} runs from {} font blocks over {} code units",
            runs.len(),
            font_blocks.len(),
            text.len()
        );

        let mut processor = Processor {
            text,
            flags: analysis.flags,
            runs,
            lines: Vec::new(),
            size,
            direction,
            alignment,
            options: self.alignment_options,
            truncated: false,
        };
        processor.rewrap(size);
        log::debug!(
            "wrapped into {} lines for {:?}{}",
            processor.lines.len(),
            size,
            if processor.truncated { " (truncated)" } else { "" }
        );
        Ok(processor)
    }

    /// Re-wraps `processor` for a new size without shaping again.
    ///
    /// Returns `true` if the line boundaries changed.
    pub fn relayout(&self, processor: &mut Processor<S::Font>, size: Size) -> bool {
        let changed = processor.rewrap(size);
        log::debug!(
            "relayout for {:?}: {} lines, boundaries {}",
            size,
            processor.lines.len(),
            if changed { "changed" } else { "unchanged" }
        );
        changed
    }
}

impl<U: UnicodeEngine, S: ShapingEngine> Default for LayoutContext<U, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, S> fmt::Debug for LayoutContext<U, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutContext")
            .field("unicode_ready", &self.unicode.is_some())
            .field("shaper_ready", &self.shaper.is_some())
            .field("alignment_options", &self.alignment_options)
            .finish()
    }
}

/// Returns the engine in `slot`, constructing it first if needed.
fn engine<T>(slot: &mut Option<T>, make: impl FnOnce() -> Result<T>) -> Result<&mut T> {
    let engine = match slot.take() {
        Some(engine) => engine,
        None => make()?,
    };
    Ok(slot.insert(engine))
}
