// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per code unit classification of the text.
//!
//! The analysis runs once per layout. It decodes the UTF-16 text to UTF-8 for
//! the Unicode engine, and records the translation tables between the two
//! index spaces so that the shaper can move engine results into canonical
//! (UTF-16) indices in one step.

pub mod icu;

use core::ops::Range;

use crate::{Result, Text};

/// Kind of a line break opportunity.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LineBreak {
    /// The line may be broken here.
    Soft,
    /// The line must be broken here.
    Hard,
}

/// Classification services consumed by the analyzer.
///
/// All offsets are UTF-8 byte offsets into the `text` argument.
pub trait UnicodeEngine: Sized {
    /// Constructs the engine.
    ///
    /// Failing here is the only way the analysis stage can fail.
    fn try_new() -> Result<Self>;

    /// Calls `f` with each code point and its byte range.
    fn for_each_code_point(&self, text: &str, mut f: impl FnMut(char, Range<usize>)) {
        for (index, ch) in text.char_indices() {
            f(ch, index..index + ch.len_utf8());
        }
    }

    /// Returns `true` if `ch` is whitespace for the purpose of line wrapping.
    fn is_whitespace(&self, ch: char) -> bool;

    /// Calls `f` with every line break opportunity, as the offset of the first
    /// byte after the break.
    fn for_each_line_break(&self, text: &str, f: impl FnMut(usize, LineBreak));

    /// Calls `f` with the offset of every grapheme cluster start.
    fn for_each_grapheme_start(&self, text: &str, f: impl FnMut(usize));
}

/// Properties of a single UTF-16 code unit.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeUnitFlags(u8);

impl CodeUnitFlags {
    const WHITESPACE_SHIFT: u8 = 0;
    const HARD_BREAK_SHIFT: u8 = 1;
    const SOFT_BREAK_SHIFT: u8 = 2;
    const GRAPHEME_START_SHIFT: u8 = 3;
    const GLYPH_START_SHIFT: u8 = 4;

    /// The code unit belongs to a whitespace code point.
    pub const WHITESPACE: Self = Self(1 << Self::WHITESPACE_SHIFT);
    /// A mandatory line break precedes the code unit.
    pub const HARD_BREAK_BEFORE: Self = Self(1 << Self::HARD_BREAK_SHIFT);
    /// An optional line break precedes the code unit.
    pub const SOFT_BREAK_BEFORE: Self = Self(1 << Self::SOFT_BREAK_SHIFT);
    /// The code unit starts a grapheme cluster.
    pub const GRAPHEME_START: Self = Self(1 << Self::GRAPHEME_START_SHIFT);
    /// The code unit starts a glyph cluster of some run.
    pub const GLYPH_START: Self = Self(1 << Self::GLYPH_START_SHIFT);

    /// Returns `true` if all flags of `other` are set.
    #[inline(always)]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline(always)]
    pub(crate) fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Whitespace code unit.
    #[inline(always)]
    pub fn is_whitespace(self) -> bool {
        self.contains(Self::WHITESPACE)
    }

    /// Grapheme cluster start.
    #[inline(always)]
    pub fn is_grapheme_start(self) -> bool {
        self.contains(Self::GRAPHEME_START)
    }

    /// Glyph cluster start.
    #[inline(always)]
    pub fn is_glyph_start(self) -> bool {
        self.contains(Self::GLYPH_START)
    }

    /// A mandatory break precedes this code unit and it starts a grapheme.
    #[inline(always)]
    pub fn is_hard_break(self) -> bool {
        self.contains(Self::HARD_BREAK_BEFORE) && self.is_grapheme_start()
    }

    /// An optional break precedes this code unit and it starts a grapheme.
    #[inline(always)]
    pub fn is_soft_break(self) -> bool {
        self.contains(Self::SOFT_BREAK_BEFORE) && self.is_grapheme_start()
    }
}

impl core::fmt::Debug for CodeUnitFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names = [
            (Self::WHITESPACE, "WS"),
            (Self::HARD_BREAK_BEFORE, "HARD"),
            (Self::SOFT_BREAK_BEFORE, "SOFT"),
            (Self::GRAPHEME_START, "GRAPHEME"),
            (Self::GLYPH_START, "GLYPH"),
        ];
        let mut list = f.debug_set();
        for (flag, name) in names {
            if self.contains(flag) {
                list.entry(&format_args!("{name}"));
            }
        }
        list.finish()
    }
}

/// Output of the analysis stage.
#[derive(Clone, Debug)]
pub(crate) struct Analysis {
    /// UTF-8 copy of the text handed to the engines.
    pub(crate) utf8: String,
    /// One entry per code unit plus the end sentinel.
    pub(crate) flags: Vec<CodeUnitFlags>,
    /// Code unit index for every UTF-8 byte offset (and the end).
    utf8_to_utf16: Vec<usize>,
    /// UTF-8 byte offset for every code unit (and the end).
    utf16_to_utf8: Vec<usize>,
}

impl Analysis {
    /// Translates an engine-native byte offset into a code unit index.
    #[inline]
    pub(crate) fn to_utf16(&self, byte_index: usize) -> usize {
        self.utf8_to_utf16[byte_index.min(self.utf8.len())]
    }

    /// Translates a code unit index into a byte offset of the code point that
    /// contains it.
    #[inline]
    pub(crate) fn to_utf8(&self, unit_index: usize) -> usize {
        self.utf16_to_utf8[unit_index.min(self.flags.len() - 1)]
    }
}

/// Returns the end of the glyph cluster starting at `start`: the next glyph
/// start, or the text length.
pub(crate) fn cluster_end(flags: &[CodeUnitFlags], start: usize) -> usize {
    let text_len = flags.len() - 1;
    if start >= text_len {
        return text_len;
    }
    flags[start + 1..]
        .iter()
        .position(|flag| flag.is_glyph_start())
        .map_or(text_len, |offset| start + 1 + offset)
}

/// Classifies every code unit of `text`.
pub(crate) fn analyze_text<U: UnicodeEngine>(engine: &U, text: &Text) -> Analysis {
    let units = text.as_slice();
    let mut utf8 = String::with_capacity(units.len());
    let mut utf8_to_utf16 = Vec::with_capacity(units.len() + 1);
    let mut utf16_to_utf8 = Vec::with_capacity(units.len() + 1);

    let mut unit_index = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        let (ch, unit_len) = match decoded {
            Ok(ch) => (ch, ch.len_utf16()),
            Err(_) => (char::REPLACEMENT_CHARACTER, 1),
        };
        let byte_index = utf8.len();
        utf8.push(ch);
        utf8_to_utf16.resize(utf8.len(), unit_index);
        utf16_to_utf8.resize(unit_index + unit_len, byte_index);
        unit_index += unit_len;
    }
    utf8_to_utf16.push(unit_index);
    utf16_to_utf8.push(utf8.len());

    let mut analysis = Analysis {
        flags: vec![CodeUnitFlags::default(); units.len() + 1],
        utf8,
        utf8_to_utf16,
        utf16_to_utf8,
    };
    let Analysis {
        utf8,
        flags,
        utf8_to_utf16,
        ..
    } = &mut analysis;

    engine.for_each_code_point(utf8, |ch, range| {
        if engine.is_whitespace(ch) {
            let units = utf8_to_utf16[range.start]..utf8_to_utf16[range.end];
            for flag in &mut flags[units] {
                flag.insert(CodeUnitFlags::WHITESPACE);
            }
        }
    });

    let text_len = utf8.len();
    engine.for_each_line_break(utf8, |byte_index, kind| {
        // Breaks at either end of the text carry no information.
        if byte_index == 0 || byte_index >= text_len {
            return;
        }
        let flag = match kind {
            LineBreak::Hard => CodeUnitFlags::HARD_BREAK_BEFORE,
            LineBreak::Soft => CodeUnitFlags::SOFT_BREAK_BEFORE,
        };
        flags[utf8_to_utf16[byte_index]].insert(flag);
    });

    engine.for_each_grapheme_start(utf8, |byte_index| {
        flags[utf8_to_utf16[byte_index.min(text_len)]].insert(CodeUnitFlags::GRAPHEME_START);
    });
    flags[0].insert(CodeUnitFlags::GRAPHEME_START);
    flags[units.len()].insert(CodeUnitFlags::GRAPHEME_START);

    log::trace!(
        "analyzed {} code units ({} bytes of UTF-8)",
        units.len(),
        analysis.utf8.len()
    );
    analysis
}
