// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;
use std::sync::Arc;

/// Immutable UTF-16 text.
///
/// All text ranges in this crate are ranges of UTF-16 code units into this
/// buffer.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Text {
    units: Arc<[u16]>,
}

impl Text {
    /// Creates a text from UTF-16 code units.
    ///
    /// Unpaired surrogates are accepted; they are analysed and shaped as
    /// U+FFFD REPLACEMENT CHARACTER.
    pub fn from_utf16(units: impl Into<Arc<[u16]>>) -> Self {
        Self {
            units: units.into(),
        }
    }

    /// Returns the code units.
    pub fn as_slice(&self) -> &[u16] {
        &self.units
    }

    /// Returns the number of code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Decodes a range of the text, replacing unpaired surrogates.
    pub fn substring(&self, range: Range<usize>) -> String {
        String::from_utf16_lossy(&self.units[range])
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::from_utf16(text.encode_utf16().collect::<Vec<_>>())
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Vec<u16>> for Text {
    fn from(units: Vec<u16>) -> Self {
        Self::from_utf16(units)
    }
}

impl From<&[u16]> for Text {
    fn from(units: &[u16]) -> Self {
        Self::from_utf16(units)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text({:?})", self.substring(0..self.len()))
    }
}
