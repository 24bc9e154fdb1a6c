// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Alignment, BreakReason, Direction, Line};
use crate::util::nearly_zero;

/// Additional options to fine tune alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentOptions {
    /// If set to `true`, "end" and "center" alignment will apply even if the line contents are
    /// wider than the alignment width. If it is set to `false`, all overflowing lines will be
    /// left where the wrapper put them.
    pub align_when_overflowing: bool,
}

/// Computes the horizontal offset (and justification gap) of every line.
///
/// Offsets are recomputed from scratch, so calling this again with the same
/// arguments gives the same result.
pub(crate) fn align(
    lines: &mut [Line],
    width: f32,
    alignment: Alignment,
    direction: Direction,
    options: AlignmentOptions,
) {
    // Whether the text base direction is right-to-left.
    let is_rtl = direction.is_rtl();
    let alignment_width = if width.is_finite() {
        width
    } else {
        lines
            .iter()
            .map(|line| line.metrics.width)
            .max_by(f32::total_cmp)
            .unwrap_or(0.0)
    };

    for line in lines {
        line.metrics.offset = 0.;
        line.justify_gap = 0.;

        let free_space = alignment_width - line.metrics.width;
        if !options.align_when_overflowing && (free_space < 0.0 || nearly_zero(free_space)) {
            continue;
        }

        match (alignment, is_rtl) {
            (Alignment::Left, _) | (Alignment::Start, false) | (Alignment::End, true) => {
                // Do nothing
            }
            (Alignment::Right, _) | (Alignment::Start, true) | (Alignment::End, false) => {
                line.metrics.offset = free_space;
            }
            (Alignment::Center, _) => {
                line.metrics.offset = free_space * 0.5;
            }
            (Alignment::Justified, _) => {
                if free_space <= 0.0 {
                    continue;
                }
                // The last line of a paragraph, and lines without gaps to
                // stretch, are start aligned instead.
                if matches!(line.break_reason, BreakReason::None | BreakReason::Explicit)
                    || line.num_spaces == 0
                {
                    if is_rtl {
                        line.metrics.offset = free_space;
                    }
                } else {
                    line.justify_gap = free_space / line.num_spaces as f32;
                }
            }
        }

        if is_rtl {
            // In RTL text, trailing whitespace is on the left. As we hang that whitespace, offset
            // the line to the left.
            line.metrics.offset -= line.metrics.trailing_whitespace;
        }
    }
}
