// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use linebender_resource_handle::{Blob, FontData};

use crate::{
    Alignment, Direction, FontBlock, HarfrustShaper, IcuUnicode, LayoutContext, Processor,
    ShapingFont, Size,
};

static DEJAVU_SANS: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans.ttf"
));

/// DejaVu Sans at `size`.
pub(crate) fn dejavu_sans(size: f32) -> ShapingFont {
    ShapingFont::new(FontData::new(Blob::new(Arc::new(DEJAVU_SANS)), 0), size)
}

/// Lays out `text` with harfrust and a single DejaVu Sans block.
pub(crate) fn layout_dejavu(
    text: &str,
    size: f32,
    direction: Direction,
    width: f32,
) -> Processor<ShapingFont> {
    let mut lcx = LayoutContext::<IcuUnicode, HarfrustShaper>::new();
    let len = text.encode_utf16().count();
    lcx.layout(
        text,
        &[FontBlock::new(0..len, dejavu_sans(size))],
        direction,
        Alignment::Start,
        Size::width_only(width),
    )
    .unwrap()
}
