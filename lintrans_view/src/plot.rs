// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

/// Fixed mapping from plot (world) units to canvas (screen) units.
///
/// The world origin sits at the canvas center, one world unit spans `scale`
/// screen units ([`PlotTransform::PIXELS_PER_UNIT`] by default), and world
/// `+y` points up while screen `+y` points down.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlotTransform {
    width: f64,
    height: f64,
    scale: f64,
}

impl Default for PlotTransform {
    fn default() -> Self {
        Self::new(Self::CANVAS_WIDTH, Self::CANVAS_HEIGHT, Self::PIXELS_PER_UNIT)
    }
}

impl PlotTransform {
    /// Logical canvas width.
    pub const CANVAS_WIDTH: f64 = 600.0;
    /// Logical canvas height.
    pub const CANVAS_HEIGHT: f64 = 500.0;
    /// Screen units per world unit.
    pub const PIXELS_PER_UNIT: f64 = 60.0;

    /// Creates a transform for a `width`×`height` canvas.
    pub const fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Canvas center in screen coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Canvas bounds in screen coordinates.
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Affine transform mapping world coordinates into screen coordinates.
    pub fn world_to_screen(&self) -> Affine {
        let c = self.center();
        Affine::new([self.scale, 0.0, 0.0, -self.scale, c.x, c.y])
    }

    /// Maps a world-space point to screen space.
    pub fn to_screen(&self, p: Point) -> Point {
        self.world_to_screen() * p
    }

    /// Maps a world-space direction to screen space (no translation).
    pub fn vec_to_screen(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.scale, -v.y * self.scale)
    }
}
