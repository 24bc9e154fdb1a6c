// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use core::ops::Range;

use thiserror::Error;

/// Result type used throughout the layout pipeline.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures of the layout pipeline.
///
/// Every variant is fatal to the layout that produced it: no partially
/// populated [`Processor`](crate::Processor) is ever returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The Unicode analysis engine could not be constructed.
    #[error("Unicode analysis engine unavailable: {0}")]
    UnicodeUnavailable(String),

    /// The shaping engine could not be constructed.
    #[error("Shaping engine unavailable: {0}")]
    ShaperUnavailable(String),

    /// The shaping engine failed while shaping a piece of text.
    #[error("Shaping failed: {0}")]
    Shaping(String),

    /// The font blocks are not sorted, leave a gap, overlap, or do not cover the
    /// whole text.
    #[error("Invalid font blocks: expected a block starting at {expected}, found {found:?}")]
    FontBlocks {
        /// The code unit index the next block should have started at.
        expected: usize,
        /// The offending block range, or an empty range at the text end when
        /// the blocks stop short of it.
        found: Range<usize>,
    },
}
