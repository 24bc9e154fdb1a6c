// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout types.

pub(crate) mod alignment;
mod line;
mod run;
pub(crate) mod wrap;

pub use alignment::AlignmentOptions;
pub use line::{GlyphPos, Line, LineMetrics};
pub use run::{Run, RunMetrics};

/// Base direction of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    /// Left-to-right.
    #[default]
    LeftToRight,
    /// Right-to-left.
    RightToLeft,
}

impl Direction {
    /// Returns `true` for [`Direction::RightToLeft`].
    pub fn is_rtl(self) -> bool {
        self == Self::RightToLeft
    }
}

/// Alignment of a layout.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Alignment {
    /// This is [`Alignment::Left`] for LTR text and [`Alignment::Right`] for RTL text.
    #[default]
    Start,
    /// This is [`Alignment::Right`] for LTR text and [`Alignment::Left`] for RTL text.
    End,
    /// Align content to the left edge.
    ///
    /// For alignment that should be aware of text direction, use [`Alignment::Start`] or
    /// [`Alignment::End`] instead.
    Left,
    /// Align each line centered within the container.
    Center,
    /// Align content to the right edge.
    ///
    /// For alignment that should be aware of text direction, use [`Alignment::Start`] or
    /// [`Alignment::End`] instead.
    Right,
    /// Justify each line by spacing out content, except for the last line and lines ending
    /// in a hard break.
    Justified,
}

/// Why a line ended where it did.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BreakReason {
    /// The line runs to the end of the text.
    #[default]
    None,
    /// The line was broken at a break opportunity to respect the width.
    Regular,
    /// The line ends in a mandatory break.
    Explicit,
    /// No break opportunity was available and a word was broken between graphemes.
    Emergency,
}
