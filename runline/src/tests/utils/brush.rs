// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::color::palette::css;

/// Test paint: an RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ColorBrush {
    pub(crate) rgba: [u8; 4],
}

impl ColorBrush {
    pub(crate) fn new(color: peniko::Color) -> Self {
        let rgba8 = color.to_rgba8();
        Self {
            rgba: [rgba8.r, rgba8.g, rgba8.b, rgba8.a],
        }
    }
}

impl Default for ColorBrush {
    fn default() -> Self {
        Self::new(css::BLACK)
    }
}
