// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain text layout over shaped runs.
//!
//! Runline takes a UTF-16 text and a list of font blocks, and produces lines of
//! positioned glyphs:
//!
//! 1. [`analysis`] classifies each code unit (whitespace, break opportunities,
//!    grapheme starts) through a [`UnicodeEngine`].
//! 2. [`shape`] invokes a [`ShapingEngine`] per font block and stores the result
//!    as [`Run`]s in canonical (UTF-16) index space.
//! 3. The wrapper breaks runs into [`Line`]s for a requested [`Size`], and the
//!    formatter aligns them.
//! 4. [`visit`] replays the lines in visual order, optionally split along
//!    caller-supplied [`DecorBlock`]s, and [`Processor::decorate`] collects the
//!    paintable [`TextOutput`]s.
//!
//! ```no_run
//! use runline::{Alignment, Direction, FontBlock, LayoutContext, Size};
//! # fn font() -> runline::ShapingFont { unimplemented!() }
//!
//! let mut lcx: LayoutContext = LayoutContext::new();
//! let text = "Hello world";
//! let blocks = [FontBlock::new(0..text.len(), font())];
//! let mut processor = lcx
//!     .layout(text, &blocks, Direction::LeftToRight, Alignment::Start, Size::width_only(200.0))
//!     .unwrap();
//! lcx.relayout(&mut processor, Size::width_only(80.0));
//! ```

pub mod analysis;
pub mod context;
pub mod layout;
pub mod shape;
pub mod visit;

mod error;
mod lru_cache;
mod processor;
mod text;
mod util;

#[cfg(test)]
mod tests;

pub use analysis::icu::IcuUnicode;
pub use analysis::{CodeUnitFlags, LineBreak, UnicodeEngine};
pub use context::LayoutContext;
pub use error::{Error, Result};
pub use layout::{
    Alignment, AlignmentOptions, BreakReason, Direction, GlyphPos, Line, LineMetrics, Run,
    RunMetrics,
};
pub use processor::Processor;
pub use shape::{FontBlock, HarfrustShaper, ShapedRun, ShapingEngine, ShapingFont};
pub use text::Text;
pub use util::{Point, Rect, Size};
pub use visit::{
    Background, DecorBlock, GlyphBlob, LineInfo, RunInfo, TextOutput, Visitor, sort_decor_blocks,
    visit, visit_decorated,
};
