// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line wrapping.
//!
//! Clusters are visited once, in logical order. Four stretches track the
//! state of the current line:
//!
//! - `line`: content committed to the line,
//! - `spaces`: whitespace following the committed content,
//! - `clusters`: content since the last break opportunity, not yet committed,
//! - `tail`: whitespace following `clusters`.
//!
//! Content only moves into `line` at a break opportunity, so a forced break
//! before a unit that is not an opportunity carries the whole pending word,
//! including its inner whitespace, to the next line.
//!
//! A wrap unit is a glyph cluster extended over any following clusters that
//! do not start a grapheme, so a grapheme is never split across lines.

use core::mem;
use core::ops::Range;

use smallvec::SmallVec;

use super::{BreakReason, GlyphPos, Line, LineMetrics, Run};
use crate::Size;
use crate::analysis::{CodeUnitFlags, cluster_end};

/// Lines produced by [`wrap`].
#[derive(Clone, Default, Debug)]
pub(crate) struct WrapOutput {
    pub(crate) lines: Vec<Line>,
    /// The height limit cut off the remaining text.
    pub(crate) truncated: bool,
}

/// Accumulates a logically contiguous sequence of glyphs.
#[derive(Clone, Default, Debug)]
struct Stretch {
    begin: GlyphPos,
    end: GlyphPos,
    text_range: Range<usize>,
    advance: f32,
    /// Number of whitespace wrap units.
    spaces: usize,
}

impl Stretch {
    fn is_empty(&self) -> bool {
        self.text_range.is_empty()
    }

    fn append(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other.clone();
            return;
        }
        self.end = other.end;
        // Clusters of a run need not be monotonic in text order.
        self.text_range.start = self.text_range.start.min(other.text_range.start);
        self.text_range.end = self.text_range.end.max(other.text_range.end);
        self.advance += other.advance;
        self.spaces += other.spaces;
    }
}

struct WrapState {
    line: Stretch,
    spaces: Stretch,
    clusters: Stretch,
    tail: Stretch,
    /// Bottom of the last emitted line.
    y: f32,
    done: bool,
    output: WrapOutput,
}

struct WrapContext<'a, F> {
    runs: &'a [Run<F>],
    flags: &'a [CodeUnitFlags],
    size: Size,
}

/// Breaks `runs` into lines that fit `size`.
pub(crate) fn wrap<F>(runs: &[Run<F>], flags: &[CodeUnitFlags], size: Size) -> WrapOutput {
    let cx = WrapContext { runs, flags, size };
    let mut state = WrapState {
        line: Stretch::default(),
        spaces: Stretch::default(),
        clusters: Stretch::default(),
        tail: Stretch::default(),
        y: 0.,
        done: false,
        output: WrapOutput::default(),
    };

    let mut unit: Option<Stretch> = None;
    for (run_index, run) in runs.iter().enumerate() {
        let len = run.len();
        let mut start = 0;
        while start < len {
            let cluster = run.clusters[run.storage_index(start)];
            let mut end = start + 1;
            while end < len && run.clusters[run.storage_index(end)] == cluster {
                end += 1;
            }
            let next = Stretch {
                begin: GlyphPos::new(run_index, start),
                end: GlyphPos::new(run_index, end),
                text_range: cluster..cluster_end(flags, cluster),
                advance: run.advance_of(run.storage_range(start..end)),
                spaces: usize::from(flags[cluster].is_whitespace()),
            };
            let extends_unit = !flags[cluster].is_grapheme_start();
            match unit.as_mut() {
                Some(current) if extends_unit => {
                    let spaces = current.spaces;
                    current.append(&next);
                    current.spaces = spaces;
                }
                _ => {
                    if let Some(complete) = unit.replace(next) {
                        state.push_unit(complete, &cx);
                    }
                }
            }
            start = end;
        }
    }
    if let Some(last) = unit {
        state.push_unit(last, &cx);
    }
    state.finish(&cx);
    state.output
}

impl WrapState {
    fn is_empty(&self) -> bool {
        self.line.is_empty() && self.spaces.is_empty() && self.clusters.is_empty()
    }

    /// Moves pending clusters, and the spaces before them, into the line.
    /// Whitespace after the clusters becomes the trailing whitespace.
    fn commit_clusters(&mut self) {
        if self.clusters.is_empty() {
            return;
        }
        self.line.append(&self.spaces);
        self.line.append(&self.clusters);
        self.spaces = mem::take(&mut self.tail);
        self.clusters = Stretch::default();
    }

    fn push_unit<F>(&mut self, unit: Stretch, cx: &WrapContext<'_, F>) {
        if self.done {
            return;
        }
        let flags = cx.flags[unit.text_range.start];

        if flags.is_hard_break() && !self.is_empty() {
            self.commit_clusters();
            self.emit(BreakReason::Explicit, cx);
            if self.done {
                return;
            }
        }

        if flags.is_soft_break() {
            self.commit_clusters();
        }

        // Whitespace hangs: it never causes a break by itself.
        if flags.is_whitespace() {
            if self.clusters.is_empty() {
                self.spaces.append(&unit);
            } else {
                self.tail.append(&unit);
            }
            return;
        }

        loop {
            let width = self.line.advance
                + self.spaces.advance
                + self.clusters.advance
                + self.tail.advance
                + unit.advance;
            if !cx.size.width.is_finite() || width <= cx.size.width {
                self.clusters.append(&mem::take(&mut self.tail));
                self.clusters.append(&unit);
                return;
            }
            // A regular break falls before the pending clusters, or before
            // the unit when nothing is pending.
            let next = if self.clusters.is_empty() {
                &unit
            } else {
                &self.clusters
            };
            let next_flags = cx.flags[next.text_range.start];
            let at_opportunity = next_flags.is_soft_break() || next_flags.is_hard_break();
            if at_opportunity && (!self.line.is_empty() || !self.spaces.is_empty()) {
                // Break at the last opportunity; pending clusters carry over.
                self.emit(BreakReason::Regular, cx);
            } else if !self.is_empty() {
                // No opportunity on this line: break between graphemes.
                if self.line.is_empty() && !self.clusters.is_empty() {
                    let mut line = mem::take(&mut self.spaces);
                    line.append(&mem::take(&mut self.clusters));
                    self.line = line;
                    self.spaces = mem::take(&mut self.tail);
                }
                self.emit(BreakReason::Emergency, cx);
            } else {
                // The unit is wider than the line on its own.
                self.clusters.append(&unit);
                return;
            }
            if self.done {
                return;
            }
        }
    }

    fn finish<F>(&mut self, cx: &WrapContext<'_, F>) {
        if self.done {
            return;
        }
        self.commit_clusters();
        if !self.is_empty() {
            self.emit(BreakReason::None, cx);
        }
    }

    /// Emits `line` plus its trailing `spaces` and resets both.
    fn emit<F>(&mut self, break_reason: BreakReason, cx: &WrapContext<'_, F>) {
        let line = mem::take(&mut self.line);
        let spaces = mem::take(&mut self.spaces);
        let mut full = line.clone();
        full.append(&spaces);
        if full.is_empty() {
            return;
        }

        let mut data = Line {
            text_range: if line.is_empty() {
                full.text_range.start..full.text_range.start
            } else {
                line.text_range.clone()
            },
            full_text_range: full.text_range.clone(),
            begin: full.begin,
            end: full.end,
            break_reason,
            num_spaces: line.spaces,
            ..Default::default()
        };

        let mut runs: SmallVec<[usize; 4]> = (full.begin.run..=full.end.run)
            .filter(|&index| !data.glyph_range(index, &cx.runs[index]).is_empty())
            .collect();
        if runs.len() > 1 && runs.iter().any(|&index| cx.runs[index].bidi_level != 0) {
            reorder_runs(&mut runs, cx.runs);
        }

        let mut metrics = LineMetrics {
            width: line.advance,
            advance: full.advance,
            trailing_whitespace: spaces.advance,
            ..Default::default()
        };
        for &index in &runs {
            let run_metrics = cx.runs[index].metrics;
            metrics.ascent = metrics.ascent.max(run_metrics.ascent);
            metrics.descent = metrics.descent.max(run_metrics.descent);
            metrics.leading = metrics.leading.max(run_metrics.leading);
        }

        // Round block/vertical axis metrics
        metrics.ascent = metrics.ascent.round();
        metrics.descent = metrics.descent.round();
        metrics.leading = (metrics.leading * 0.5).round() * 2.;
        let above = (metrics.ascent + metrics.leading * 0.5).round();
        let below = (metrics.descent + metrics.leading * 0.5).round();
        metrics.line_height = above + below;

        if cx.size.height.is_finite()
            && !self.output.lines.is_empty()
            && self.y + metrics.line_height > cx.size.height
        {
            log::trace!(
                "line at {:?} exceeds height {}, truncating",
                data.full_text_range,
                cx.size.height
            );
            self.output.truncated = true;
            self.done = true;
            return;
        }

        metrics.baseline = self.y + above;
        self.y = metrics.baseline + below;
        data.metrics = metrics;
        data.runs = runs;

        log::trace!(
            "line {}: text {:?}, width {}, {:?}",
            self.output.lines.len(),
            data.text_range,
            data.metrics.width,
            break_reason
        );
        self.output.lines.push(data);
    }
}

/// Reorders run indices from logical to visual order by their bidi levels.
fn reorder_runs<F>(order: &mut [usize], runs: &[Run<F>]) {
    let run_count = order.len();

    // Find the max level and the min *odd* level
    let mut max_level = 0;
    let mut lowest_odd_level = 255;
    for &index in order.iter() {
        let level = runs[index].bidi_level;
        if level > max_level {
            max_level = level;
        }
        if level & 1 != 0 && level < lowest_odd_level {
            lowest_odd_level = level;
        }
    }

    // From the highest level down to the lowest odd level, reverse any
    // contiguous sequence at that level or higher.
    for level in (lowest_odd_level..=max_level).rev() {
        let mut i = 0;
        while i < run_count {
            if runs[order[i]].bidi_level >= level {
                let mut end = i + 1;
                while end < run_count && runs[order[end]].bidi_level >= level {
                    end += 1;
                }
                order[i..end].reverse();
                i = end;
            }
            i += 1;
        }
    }
}
