// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lintrans Imaging: backend-agnostic imaging IR and backend traits.
//!
//! This crate defines the small, plain‑old‑data (POD) friendly vocabulary
//! that the scene builder in `lintrans_view` speaks, and the traits a
//! concrete output surface implements to consume it.
//!
//! # Position in the stack
//!
//! - **View / scene**: view state, derived linear-algebra quantities, and the
//!   role-tagged geometry of a frame. This lives in `lintrans_view`.
//! - **Imaging IR (this crate)**: paths and paints expressed as resources,
//!   plus [`StateOp`] / [`DrawOp`] sequences that reference them.
//! - **Backends**: [`ImagingBackend`] implementations such as the SVG
//!   exporter (`lintrans_imaging_svg`) or the recording backend used in tests
//!   (`lintrans_imaging_ref`).
//!
//! # Frames
//!
//! Every redraw starts with [`ImagingBackend::begin_frame`]. A frame owns
//! every resource created after it began; starting the next frame discards
//! them together with the previously recorded ops. There is no partial
//! redraw: callers rebuild the whole frame on every change.
//!
//! # Example
//!
//! ```ignore
//! # use lintrans_imaging::*;
//! # use peniko::{Brush, Color};
//! # struct MyBackend { /* implements ResourceBackend + ImagingBackend */ }
//! let mut backend = MyBackend { /* ... */ };
//!
//! backend.begin_frame(FrameSize::new(600, 500));
//! let paint = backend.create_paint(PaintDesc {
//!     brush: Brush::Solid(Color::WHITE),
//! });
//! let path = backend.create_path(PathDesc::line(0.0, 250.0, 600.0, 250.0));
//! backend.stroke_with(path, paint, StrokeStyle::new(1.0));
//! ```

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use peniko::Brush;

/// Identifier for a path resource.
///
/// This is a small, opaque handle that stays valid until the frame it was
/// created in ends or it is destroyed explicitly.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathId(pub u32);

/// Identifier for a paint resource.
///
/// Paints may be shared by many paths within a frame.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaintId(pub u32);

/// Logical size of a frame in device units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameSize {
    /// Width in device units.
    pub width: u32,
    /// Height in device units.
    pub height: u32,
}

impl FrameSize {
    /// Create a frame size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Stroke style used by `StateOp::SetStroke`.
///
/// This is a re-export of [`kurbo::Stroke`], which captures width, joins,
/// caps, and dashes.
pub type StrokeStyle = kurbo::Stroke;

/// State operations that mutate the current imaging state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Set the current paint resource.
    SetPaint(PaintId),
    /// Set the current stroke style.
    SetStroke(StrokeStyle),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the given path with the current paint (non-zero rule).
    FillPath(PathId),
    /// Stroke the given path with the current stroke and paint.
    StrokePath(PathId),
}

/// Unified imaging operation, as recorded by backends.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// Simple path command enumeration.
///
/// Scenes are made of polylines, so curves are flattened before they reach
/// the IR (see [`PathDesc::from_bez_path`]).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCmd {
    /// Move the current point without drawing.
    MoveTo {
        /// X coordinate of the new point.
        x: f32,
        /// Y coordinate of the new point.
        y: f32,
    },
    /// Draw a line from the current point to the given point.
    LineTo {
        /// X coordinate of the line end.
        x: f32,
        /// Y coordinate of the line end.
        y: f32,
    },
    /// Close the current subpath.
    Close,
}

/// Description of a path resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PathDesc {
    /// Command buffer describing the path geometry.
    pub commands: Box<[PathCmd]>,
}

impl PathDesc {
    /// A single straight segment.
    pub fn line(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            commands: Box::new([
                PathCmd::MoveTo { x: x0, y: y0 },
                PathCmd::LineTo { x: x1, y: y1 },
            ]),
        }
    }

    /// Convert a kurbo path, flattening any curves with the given tolerance.
    pub fn from_bez_path(path: &kurbo::BezPath, tolerance: f64) -> Self {
        use kurbo::PathEl;

        let mut commands = Vec::new();
        kurbo::flatten(path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => commands.push(PathCmd::MoveTo {
                x: to_f32(p.x),
                y: to_f32(p.y),
            }),
            PathEl::LineTo(p) => commands.push(PathCmd::LineTo {
                x: to_f32(p.x),
                y: to_f32(p.y),
            }),
            PathEl::ClosePath => commands.push(PathCmd::Close),
            // `flatten` only emits the three variants above.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        Self {
            commands: commands.into_boxed_slice(),
        }
    }

    /// Convert back into a kurbo path.
    pub fn to_bez_path(&self) -> kurbo::BezPath {
        use kurbo::Point;

        let mut out = kurbo::BezPath::new();
        for cmd in self.commands.iter() {
            match *cmd {
                PathCmd::MoveTo { x, y } => out.move_to(Point::new(f64::from(x), f64::from(y))),
                PathCmd::LineTo { x, y } => out.line_to(Point::new(f64::from(x), f64::from(y))),
                PathCmd::Close => out.close_path(),
            }
        }
        out
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "IR coordinates are f32; device-space scene coordinates fit comfortably"
)]
fn to_f32(v: f64) -> f32 {
    v as f32
}

/// Description of a paint resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintDesc {
    /// Brush used when rendering.
    ///
    /// This is a [`peniko::Brush`], so backends can directly map it onto their
    /// native paint representation.
    pub brush: Brush,
}

impl PaintDesc {
    /// A solid color paint.
    #[inline]
    pub fn solid(color: peniko::Color) -> Self {
        Self {
            brush: Brush::Solid(color),
        }
    }
}

/// Resource lifetime interface.
///
/// Implementations must ensure that IDs keep referring to the same resource
/// until the resource is destroyed or the frame it belongs to ends.
pub trait ResourceBackend {
    /// Create a path resource.
    fn create_path(&mut self, desc: PathDesc) -> PathId;
    /// Destroy a previously created path.
    fn destroy_path(&mut self, id: PathId);

    /// Create a paint resource.
    fn create_paint(&mut self, desc: PaintDesc) -> PaintId;
    /// Destroy a previously created paint.
    fn destroy_paint(&mut self, id: PaintId);
}

/// Minimal imaging backend trait.
pub trait ImagingBackend: ResourceBackend {
    /// Start a new frame of the given size.
    ///
    /// This clears the surface: ops recorded for the previous frame and all
    /// resources created during it are discarded, and state is reset.
    fn begin_frame(&mut self, size: FrameSize);

    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);
}

/// Convenience helpers for `ImagingBackend` callers.
///
/// This is separate from [`ImagingBackend`] so that it stays usable as a
/// trait object (`&mut dyn ImagingBackend`).
pub trait ImagingBackendExt: ImagingBackend {
    /// Set `paint` and fill `path` with it.
    #[inline]
    fn fill_with(&mut self, path: PathId, paint: PaintId) {
        self.state(StateOp::SetPaint(paint));
        self.draw(DrawOp::FillPath(path));
    }

    /// Set `paint` and `stroke` and stroke `path` with them.
    #[inline]
    fn stroke_with(&mut self, path: PathId, paint: PaintId, stroke: StrokeStyle) {
        self.state(StateOp::SetPaint(paint));
        self.state(StateOp::SetStroke(stroke));
        self.draw(DrawOp::StrokePath(path));
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{BezPath, Circle, Shape};
    use peniko::Color;

    /// Trivial in-memory backend that records operations for testing.
    #[derive(Default)]
    struct RecordingBackend {
        next_path: u32,
        next_paint: u32,
        frames: u32,
        ops: Vec<ImagingOp>,
    }

    impl ResourceBackend for RecordingBackend {
        fn create_path(&mut self, _desc: PathDesc) -> PathId {
            let id = self.next_path;
            self.next_path += 1;
            PathId(id)
        }

        fn destroy_path(&mut self, _id: PathId) {}

        fn create_paint(&mut self, _desc: PaintDesc) -> PaintId {
            let id = self.next_paint;
            self.next_paint += 1;
            PaintId(id)
        }

        fn destroy_paint(&mut self, _id: PaintId) {}
    }

    impl ImagingBackend for RecordingBackend {
        fn begin_frame(&mut self, _size: FrameSize) {
            self.frames += 1;
            self.next_path = 0;
            self.next_paint = 0;
            self.ops.clear();
        }

        fn state(&mut self, op: StateOp) {
            self.ops.push(ImagingOp::State(op));
        }

        fn draw(&mut self, op: DrawOp) {
            self.ops.push(ImagingOp::Draw(op));
        }
    }

    #[test]
    fn ext_helpers_emit_state_then_draw() {
        let mut backend = RecordingBackend::default();
        backend.begin_frame(FrameSize::new(10, 10));

        let paint = backend.create_paint(PaintDesc::solid(Color::WHITE));
        let path = backend.create_path(PathDesc::line(0.0, 0.0, 1.0, 1.0));

        backend.fill_with(path, paint);
        backend.stroke_with(path, paint, StrokeStyle::new(2.0));

        assert_eq!(
            backend.ops,
            vec![
                ImagingOp::State(StateOp::SetPaint(paint)),
                ImagingOp::Draw(DrawOp::FillPath(path)),
                ImagingOp::State(StateOp::SetPaint(paint)),
                ImagingOp::State(StateOp::SetStroke(StrokeStyle::new(2.0))),
                ImagingOp::Draw(DrawOp::StrokePath(path)),
            ]
        );
    }

    #[test]
    fn begin_frame_clears_previous_ops() {
        let mut backend = RecordingBackend::default();
        backend.begin_frame(FrameSize::new(10, 10));
        let path = backend.create_path(PathDesc::line(0.0, 0.0, 1.0, 1.0));
        backend.draw(DrawOp::StrokePath(path));
        assert_eq!(backend.ops.len(), 1);

        backend.begin_frame(FrameSize::new(10, 10));
        assert!(backend.ops.is_empty());
        assert_eq!(backend.frames, 2);
        assert_eq!(backend.create_path(PathDesc::line(0.0, 0.0, 1.0, 1.0)), PathId(0));
    }

    #[test]
    fn polyline_round_trips_through_desc() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 5.5));
        path.close_path();

        let desc = PathDesc::from_bez_path(&path, 0.1);
        assert_eq!(
            &*desc.commands,
            &[
                PathCmd::MoveTo { x: 0.0, y: 0.0 },
                PathCmd::LineTo { x: 10.0, y: 0.0 },
                PathCmd::LineTo { x: 10.0, y: 5.5 },
                PathCmd::Close,
            ]
        );
        assert_eq!(desc.to_bez_path(), path);
    }

    #[test]
    fn curves_are_flattened() {
        let circle = Circle::new((0.0, 0.0), 50.0).to_path(0.1);
        let desc = PathDesc::from_bez_path(&circle, 0.1);
        assert!(desc.commands.len() > 8);
        assert!(desc.commands.iter().all(|cmd| matches!(
            cmd,
            PathCmd::MoveTo { .. } | PathCmd::LineTo { .. } | PathCmd::Close
        )));
    }
}
