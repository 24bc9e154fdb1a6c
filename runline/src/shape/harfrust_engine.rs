// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaping engine backed by `harfrust`, with font metrics from `skrifa`.

use core::fmt;
use core::ops::Range;

use icu_properties::props::Script;
use icu_properties::{CodePointMapData, CodePointMapDataBorrowed};
use linebender_resource_handle::FontData;
use skrifa::MetadataProvider;
use skrifa::instance::{LocationRef, Size as FontSize};

use super::{ShapedRun, ShapingEngine};
use crate::layout::RunMetrics;
use crate::lru_cache::{LookupKey, LruCache};
use crate::{Error, Point, Result};

const DEFAULT_CACHE_CAPACITY: usize = 16;

/// A font at a specific size.
#[derive(Clone)]
pub struct ShapingFont {
    /// Font file data and the index of the face within it.
    pub data: FontData,
    /// Font size in layout units per em.
    pub size: f32,
}

impl ShapingFont {
    /// Creates a new shaping font.
    pub fn new(data: FontData, size: f32) -> Self {
        Self { data, size }
    }
}

impl fmt::Debug for ShapingFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapingFont")
            .field("blob", &self.data.data.id())
            .field("index", &self.data.index)
            .field("size", &self.size)
            .finish()
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
struct ShaperDataKey {
    blob_id: u64,
    index: u32,
}

impl LookupKey<Self> for ShaperDataKey {
    fn matches(&self, key: &Self) -> bool {
        self == key
    }

    fn into_key(self) -> Self {
        self
    }
}

/// [`ShapingEngine`] using `harfrust`.
///
/// Each requested piece is further itemized by script before shaping.
/// Parsed font tables are kept in a small LRU cache keyed by font data.
pub struct HarfrustShaper {
    data_cache: LruCache<ShaperDataKey, harfrust::ShaperData>,
    script_map: CodePointMapDataBorrowed<'static, Script>,
    buffer: Option<harfrust::UnicodeBuffer>,
    glyphs: Vec<u32>,
    positions: Vec<Point>,
    offsets: Vec<Point>,
    clusters: Vec<usize>,
}

impl HarfrustShaper {
    /// Creates a shaper with the default cache capacity.
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a shaper that keeps tables for at most `capacity` fonts.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            data_cache: LruCache::new(capacity),
            script_map: CodePointMapData::<Script>::new(),
            buffer: Some(harfrust::UnicodeBuffer::new()),
            glyphs: Vec::new(),
            positions: Vec::new(),
            offsets: Vec::new(),
            clusters: Vec::new(),
        }
    }
}

impl Default for HarfrustShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HarfrustShaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarfrustShaper")
            .field("cached_fonts", &self.data_cache.len())
            .finish_non_exhaustive()
    }
}

impl ShapingEngine for HarfrustShaper {
    type Font = ShapingFont;

    fn try_new() -> Result<Self> {
        Ok(Self::new())
    }

    fn shape(
        &mut self,
        text: &str,
        range: Range<usize>,
        font: &ShapingFont,
        bidi_level: u8,
        mut sink: impl FnMut(ShapedRun<'_, ShapingFont>),
    ) -> Result<()> {
        let data = font.data.data.as_ref();
        let index = font.data.index;
        let font_ref = harfrust::FontRef::from_index(data, index)
            .map_err(|err| Error::Shaping(format!("cannot read font face {index}: {err}")))?;
        let metrics_ref = skrifa::FontRef::from_index(data, index)
            .map_err(|err| Error::Shaping(format!("cannot read font face {index}: {err}")))?;
        let font_metrics = metrics_ref.metrics(FontSize::new(font.size), LocationRef::default());
        let metrics = RunMetrics {
            ascent: font_metrics.ascent,
            descent: -font_metrics.descent,
            leading: font_metrics.leading,
        };
        let scale = font.size / f32::from(font_metrics.units_per_em.max(1));

        let key = ShaperDataKey {
            blob_id: font.data.data.id(),
            index,
        };
        let shaper_data = self
            .data_cache
            .get_or_insert_with(key, || harfrust::ShaperData::new(&font_ref));
        let shaper = shaper_data
            .shaper(&font_ref)
            .point_size(Some(font.size))
            .build();

        let direction = if bidi_level & 1 != 0 {
            harfrust::Direction::RightToLeft
        } else {
            harfrust::Direction::LeftToRight
        };

        for item in itemize_scripts(self.script_map, text, range) {
            let mut buffer = self.buffer.take().unwrap_or_else(harfrust::UnicodeBuffer::new);
            buffer.clear();
            buffer.reserve(item.len());
            for (offset, ch) in text[item.clone()].char_indices() {
                buffer.add(ch, (item.start + offset) as u32);
            }
            buffer.set_direction(direction);
            buffer.guess_segment_properties();

            let glyph_buffer = shaper.shape(buffer, &[]);

            self.glyphs.clear();
            self.positions.clear();
            self.offsets.clear();
            self.clusters.clear();
            let mut pen = Point::ZERO;
            for (info, pos) in glyph_buffer
                .glyph_infos()
                .iter()
                .zip(glyph_buffer.glyph_positions())
            {
                self.glyphs.push(info.glyph_id);
                self.clusters.push(info.cluster as usize);
                self.positions.push(pen);
                self.offsets.push(Point::new(
                    pos.x_offset as f32 * scale,
                    -(pos.y_offset as f32) * scale,
                ));
                pen.x += pos.x_advance as f32 * scale;
                pen.y -= pos.y_advance as f32 * scale;
            }
            self.positions.push(pen);

            sink(ShapedRun {
                font,
                glyphs: &self.glyphs,
                positions: &self.positions,
                offsets: &self.offsets,
                clusters: &self.clusters,
                text_range: item,
                bidi_level,
                metrics,
            });

            // Keep the allocation for the next item.
            self.buffer = Some(glyph_buffer.clear());
        }
        Ok(())
    }
}

fn is_real_script(script: Script) -> bool {
    !matches!(script, Script::Common | Script::Inherited | Script::Unknown)
}

/// Splits `text[range]` into runs of a single script.
///
/// Common and inherited characters join the item they follow; leading ones
/// join the first real script.
fn itemize_scripts(
    script_map: CodePointMapDataBorrowed<'static, Script>,
    text: &str,
    range: Range<usize>,
) -> Vec<Range<usize>> {
    let mut items = Vec::new();
    let mut start = range.start;
    let mut current = None;
    for (offset, ch) in text[range.clone()].char_indices() {
        let script = script_map.get(ch);
        if !is_real_script(script) {
            continue;
        }
        match current {
            Some(current_script) if current_script != script => {
                let index = range.start + offset;
                items.push(start..index);
                start = index;
                current = Some(script);
            }
            Some(_) => {}
            None => current = Some(script),
        }
    }
    if start < range.end {
        items.push(start..range.end);
    }
    items
}
