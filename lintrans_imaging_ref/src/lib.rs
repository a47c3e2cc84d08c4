// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=lintrans_imaging_ref --heading-base-level=0

//! Lintrans Imaging Reference Backend.
//!
//! This crate provides a small, stateful implementation of
//! [`ImagingBackend`] and [`ResourceBackend`]
//! for **IR recording and state tracing**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - It keeps every resource descriptor so tests can resolve the ids found in
//!   recorded ops back to geometry and colors.
//! - It is intended primarily for tests and debugging that want to assert on
//!   emitted ops and the imaging state at the time each op is applied.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use lintrans_imaging::{
    DrawOp, FrameSize, ImagingBackend, ImagingOp, PaintDesc, PaintId, PathDesc, PathId,
    ResourceBackend, StateOp, StrokeStyle,
};

/// Snapshot of the current imaging state inside the backend.
#[derive(Clone, Debug, Default)]
pub struct StateSnapshot {
    /// Current paint, if set.
    pub paint: Option<PaintId>,
    /// Current stroke style, if set.
    pub stroke: Option<StrokeStyle>,
}

/// Event recorded by the reference backend.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// Simple reference implementation of the imaging backend.
///
/// This backend:
/// - Stores resource descriptors in vectors keyed by their IDs,
/// - Tracks current imaging state,
/// - Records high-level [`Event`]s as state and draw operations are applied,
/// - Counts frames, resetting everything else on `begin_frame`.
#[derive(Default, Debug)]
pub struct RefBackend {
    paths: Vec<Option<PathDesc>>,
    paints: Vec<Option<PaintDesc>>,

    /// Log of events in the order they were applied.
    events: Vec<Event>,
    ops: Vec<ImagingOp>,
    state: StateSnapshot,

    frames: u32,
    size: Option<FrameSize>,
}

impl RefBackend {
    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns a slice of raw imaging operations.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Number of frames started so far.
    pub fn frame_count(&self) -> u32 {
        self.frames
    }

    /// Size of the current frame, if one was started.
    pub fn frame_size(&self) -> Option<FrameSize> {
        self.size
    }

    /// Resolves a live path id.
    pub fn path(&self, id: PathId) -> Option<&PathDesc> {
        self.paths.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Resolves a live paint id.
    pub fn paint(&self, id: PaintId) -> Option<&PaintDesc> {
        self.paints.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Iterates over the draw events of the current frame.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &StateSnapshot)> {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Clears all recorded events and ops but keeps resources.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
    }
}

impl ResourceBackend for RefBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id =
            u32::try_from(self.paths.len()).expect("RefBackend: too many paths for u32 PathId");
        self.paths.push(Some(desc));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.paths.get_mut(idx) {
            *slot = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id =
            u32::try_from(self.paints.len()).expect("RefBackend: too many paints for u32 PaintId");
        self.paints.push(Some(desc));
        PaintId(id)
    }

    fn destroy_paint(&mut self, id: PaintId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.paints.get_mut(idx) {
            *slot = None;
        }
    }
}

impl ImagingBackend for RefBackend {
    fn begin_frame(&mut self, size: FrameSize) {
        self.frames += 1;
        self.size = Some(size);
        self.paths.clear();
        self.paints.clear();
        self.events.clear();
        self.ops.clear();
        self.state = StateSnapshot::default();
    }

    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::SetPaint(id) => self.state.paint = Some(*id),
            StateOp::SetStroke(style) => self.state.stroke = Some(style.clone()),
        }

        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintrans_imaging::{ImagingBackendExt, PathCmd};
    use peniko::{Brush, Color};

    #[test]
    fn basic_state_and_draw() {
        let mut backend = RefBackend::default();
        backend.begin_frame(FrameSize::new(64, 32));

        let path = backend.create_path(PathDesc::line(0.0, 0.0, 1.0, 1.0));
        let paint = backend.create_paint(PaintDesc::solid(Color::WHITE));
        backend.stroke_with(path, paint, StrokeStyle::new(3.0));

        let events = backend.events();
        assert_eq!(events.len(), 3);
        match &events[2] {
            Event::Draw { op, state } => {
                assert_eq!(*op, DrawOp::StrokePath(path));
                assert_eq!(state.paint, Some(paint));
                assert_eq!(state.stroke.as_ref().map(|s| s.width), Some(3.0));
            }
            other => panic!("expected draw event, got {other:?}"),
        }
        assert_eq!(backend.draws().count(), 1);
    }

    #[test]
    fn resources_resolve_until_destroyed() {
        let mut backend = RefBackend::default();
        backend.begin_frame(FrameSize::new(1, 1));

        let path = backend.create_path(PathDesc::line(1.0, 2.0, 3.0, 4.0));
        let paint = backend.create_paint(PaintDesc::solid(Color::BLACK));
        assert_eq!(
            backend.path(path).map(|p| p.commands[0]),
            Some(PathCmd::MoveTo { x: 1.0, y: 2.0 })
        );
        assert!(matches!(
            backend.paint(paint).map(|p| &p.brush),
            Some(Brush::Solid(_))
        ));

        backend.destroy_path(path);
        backend.destroy_paint(paint);
        assert!(backend.path(path).is_none());
        assert!(backend.paint(paint).is_none());
    }

    #[test]
    fn begin_frame_resets_everything_but_the_counter() {
        let mut backend = RefBackend::default();
        assert_eq!(backend.frame_size(), None);

        backend.begin_frame(FrameSize::new(10, 10));
        let path = backend.create_path(PathDesc::line(0.0, 0.0, 1.0, 0.0));
        let paint = backend.create_paint(PaintDesc::solid(Color::BLACK));
        backend.fill_with(path, paint);

        backend.begin_frame(FrameSize::new(20, 10));
        assert_eq!(backend.frame_count(), 2);
        assert_eq!(backend.frame_size(), Some(FrameSize::new(20, 10)));
        assert!(backend.events().is_empty());
        assert!(backend.ops().is_empty());
        assert!(backend.path(path).is_none());
    }

    #[test]
    fn clear_events_keeps_resources() {
        let mut backend = RefBackend::default();
        backend.begin_frame(FrameSize::new(1, 1));
        let path = backend.create_path(PathDesc::line(0.0, 0.0, 1.0, 0.0));
        backend.draw(DrawOp::FillPath(path));
        backend.clear_events();
        assert!(backend.events().is_empty());
        assert!(backend.path(path).is_some());
    }
}
