// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers and geometry types.

pub(crate) fn nearly_eq(x: f32, y: f32) -> bool {
    (x - y).abs() < f32::EPSILON
}

pub(crate) fn nearly_zero(x: f32) -> bool {
    nearly_eq(x, 0.)
}

/// A point in layout coordinates.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0., 0.);

    /// Creates a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis aligned rectangle in layout coordinates.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

/// Requested size of a layout box.
///
/// Either dimension may be `f32::INFINITY` to leave it unconstrained.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Size {
    /// Maximum line width.
    pub width: f32,
    /// Maximum total height of the emitted lines.
    pub height: f32,
}

impl Size {
    /// No constraint in either direction: a single line per paragraph.
    pub const UNBOUNDED: Self = Self::new(f32::INFINITY, f32::INFINITY);

    /// Creates a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Constrains only the width.
    pub const fn width_only(width: f32) -> Self {
        Self::new(width, f32::INFINITY)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
