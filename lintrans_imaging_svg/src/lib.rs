// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=lintrans_imaging_svg --heading-base-level=0

//! SVG export backend for the Lintrans imaging IR.
//!
//! This crate provides a small implementation of [`ImagingBackend`] and
//! [`ResourceBackend`] that records the ops of the current frame and can
//! export them as an SVG document.
//!
//! - Only solid brushes are supported; other brushes fall back to black.
//! - Each draw op becomes one `<path>` element, in op order.
//! - Starting a frame clears everything, so the document always reflects
//!   exactly one complete frame.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;
use kurbo::{Cap, Join};
use lintrans_imaging::{
    DrawOp, FrameSize, ImagingBackend, ImagingOp, PaintDesc, PaintId, PathCmd, PathDesc, PathId,
    ResourceBackend, StateOp, StrokeStyle,
};
use peniko::{Brush, Color};

#[derive(Clone, Debug, Default)]
struct SvgState {
    paint: Option<PaintId>,
    stroke: Option<StrokeStyle>,
}

/// A recording SVG backend.
#[derive(Debug)]
pub struct SvgBackend {
    size: FrameSize,
    background: Option<Color>,

    paths: Vec<Option<PathDesc>>,
    paints: Vec<Option<PaintDesc>>,

    ops: Vec<ImagingOp>,
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgBackend {
    /// Creates an empty backend with a zero-sized frame and no background.
    pub fn new() -> Self {
        Self {
            size: FrameSize::new(0, 0),
            background: None,
            paths: Vec::new(),
            paints: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Sets a color that fills the whole frame underneath the recorded ops.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Returns the size passed to the last `begin_frame`.
    pub fn frame_size(&self) -> FrameSize {
        self.size
    }

    /// Returns the recorded imaging ops of the current frame.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Export the current frame as an SVG document.
    ///
    /// The frame size is used both as the SVG `width`/`height` attributes and
    /// to set `viewBox="0 0 width height"`.
    pub fn to_svg(&self) -> String {
        render_svg_document(self)
    }
}

impl ResourceBackend for SvgBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        let id =
            u32::try_from(self.paths.len()).expect("SvgBackend: too many paths for u32 PathId");
        self.paths.push(Some(desc));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        if let Some(slot) = self.paths.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn create_paint(&mut self, desc: PaintDesc) -> PaintId {
        let id =
            u32::try_from(self.paints.len()).expect("SvgBackend: too many paints for u32 PaintId");
        self.paints.push(Some(desc));
        PaintId(id)
    }

    fn destroy_paint(&mut self, id: PaintId) {
        if let Some(slot) = self.paints.get_mut(id.0 as usize) {
            *slot = None;
        }
    }
}

impl ImagingBackend for SvgBackend {
    fn begin_frame(&mut self, size: FrameSize) {
        self.size = size;
        self.paths.clear();
        self.paints.clear();
        self.ops.clear();
    }

    fn state(&mut self, op: StateOp) {
        self.ops.push(ImagingOp::State(op));
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op));
    }
}

fn render_svg_document(backend: &SvgBackend) -> String {
    let FrameSize { width, height } = backend.size;
    let mut body = String::new();
    let mut state = SvgState::default();

    if let Some(color) = backend.background {
        let (rgb, a) = color_to_svg(color);
        let _ = write!(
            body,
            "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{rgb}\""
        );
        if a < 1.0 {
            let _ = write!(body, " fill-opacity=\"{}\"", fmt_f32(a));
        }
        body.push_str("/>");
    }

    for op in &backend.ops {
        match op {
            ImagingOp::State(StateOp::SetPaint(id)) => state.paint = Some(*id),
            ImagingOp::State(StateOp::SetStroke(style)) => state.stroke = Some(style.clone()),
            ImagingOp::Draw(draw_op) => write_draw_op(backend, &mut body, draw_op, &state),
        }
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">"
    );
    svg.push_str(&body);
    svg.push_str("</svg>");
    svg
}

fn write_draw_op(backend: &SvgBackend, out: &mut String, op: &DrawOp, state: &SvgState) {
    let (path_id, kind) = match op {
        DrawOp::FillPath(id) => (id, PaintKind::Fill),
        DrawOp::StrokePath(id) => (id, PaintKind::Stroke),
    };
    let Some(Some(path)) = backend.paths.get(path_id.0 as usize) else {
        return;
    };
    let d = path_to_svg_d(path);
    let style = style_for_paint(backend, state, kind);
    match kind {
        PaintKind::Fill => {
            let _ = write!(out, "<path d=\"{d}\" fill-rule=\"nonzero\"{style}/>");
        }
        PaintKind::Stroke => {
            let _ = write!(out, "<path d=\"{d}\"{style}/>");
        }
    }
}

#[derive(Copy, Clone)]
enum PaintKind {
    Fill,
    Stroke,
}

fn style_for_paint(backend: &SvgBackend, state: &SvgState, kind: PaintKind) -> String {
    let mut out = String::new();

    let color = state
        .paint
        .and_then(|id| backend.paints.get(id.0 as usize))
        .and_then(Option::as_ref)
        .and_then(|desc| match &desc.brush {
            Brush::Solid(color) => Some(*color),
            _ => None,
        })
        .unwrap_or(Color::BLACK);
    let (rgb, a) = color_to_svg(color);

    match kind {
        PaintKind::Fill => {
            let _ = write!(out, " fill=\"{rgb}\" stroke=\"none\"");
            if a < 1.0 {
                let _ = write!(out, " fill-opacity=\"{}\"", fmt_f32(a));
            }
        }
        PaintKind::Stroke => {
            let _ = write!(out, " fill=\"none\" stroke=\"{rgb}\"");
            if a < 1.0 {
                let _ = write!(out, " stroke-opacity=\"{}\"", fmt_f32(a));
            }
        }
    }

    if let PaintKind::Stroke = kind
        && let Some(stroke) = state.stroke.as_ref()
    {
        write_stroke_attrs(&mut out, stroke);
    }

    out
}

fn write_stroke_attrs(out: &mut String, stroke: &StrokeStyle) {
    let _ = write!(out, " stroke-width=\"{}\"", fmt_f64_to_f32(stroke.width));
    // SVG has a single linecap, while kurbo can specify start/end caps.
    // Use the start cap when they differ.
    let _ = write!(
        out,
        " stroke-linecap=\"{}\"",
        stroke_cap_svg(stroke.start_cap)
    );
    let _ = write!(out, " stroke-linejoin=\"{}\"", stroke_join_svg(stroke.join));
    if stroke.miter_limit.is_finite() && stroke.join == Join::Miter {
        let _ = write!(
            out,
            " stroke-miterlimit=\"{}\"",
            fmt_f64_to_f32(stroke.miter_limit)
        );
    }
    if !stroke.dash_pattern.is_empty() {
        out.push_str(" stroke-dasharray=\"");
        for (i, v) in stroke.dash_pattern.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&fmt_f64_to_f32(*v));
        }
        out.push('"');
    }
    if stroke.dash_offset != 0.0 {
        let _ = write!(
            out,
            " stroke-dashoffset=\"{}\"",
            fmt_f64_to_f32(stroke.dash_offset)
        );
    }
}

fn stroke_cap_svg(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    }
}

fn stroke_join_svg(join: Join) -> &'static str {
    match join {
        Join::Miter => "miter",
        Join::Round => "round",
        Join::Bevel => "bevel",
    }
}

fn color_to_svg(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    let a = f32::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn path_to_svg_d(path: &PathDesc) -> String {
    let mut d = String::new();
    for cmd in path.commands.iter() {
        match *cmd {
            PathCmd::MoveTo { x, y } => {
                let _ = write!(d, "M{} {}", fmt_f32(x), fmt_f32(y));
            }
            PathCmd::LineTo { x, y } => {
                let _ = write!(d, "L{} {}", fmt_f32(x), fmt_f32(y));
            }
            PathCmd::Close => d.push('Z'),
        }
    }
    d
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "SVG uses f32-like scalar formatting"
)]
fn fmt_f64_to_f32(v: f64) -> String {
    fmt_f32(v as f32)
}

fn fmt_f32(v: f32) -> String {
    // Keep output readable and stable enough for diffing.
    if !v.is_finite() {
        return format!("{v}");
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "best-effort pretty formatting"
    )]
    let i = v as i32;
    let diff = (i as f32) - v;
    if diff > -1e-6 && diff < 1e-6 {
        return format!("{i}");
    }

    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintrans_imaging::ImagingBackendExt;

    fn square() -> PathDesc {
        PathDesc {
            commands: alloc::vec![
                PathCmd::MoveTo { x: 10.0, y: 20.0 },
                PathCmd::LineTo { x: 30.0, y: 20.0 },
                PathCmd::LineTo { x: 30.0, y: 40.0 },
                PathCmd::Close,
            ]
            .into_boxed_slice(),
        }
    }

    #[test]
    fn exports_filled_path() {
        let mut backend = SvgBackend::new();
        backend.begin_frame(FrameSize::new(100, 80));
        let paint = backend.create_paint(PaintDesc::solid(Color::from_rgba8(255, 0, 0, 255)));
        let path = backend.create_path(square());
        backend.fill_with(path, paint);

        let svg = backend.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"100\" height=\"80\" viewBox=\"0 0 100 80\""));
        assert!(svg.contains("<path d=\"M10 20L30 20L30 40Z\""));
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(!svg.contains("fill-opacity"));
    }

    #[test]
    fn exports_translucent_fill_opacity() {
        let mut backend = SvgBackend::new();
        backend.begin_frame(FrameSize::new(10, 10));
        let paint = backend.create_paint(PaintDesc::solid(Color::from_rgba8(59, 130, 246, 51)));
        let path = backend.create_path(square());
        backend.fill_with(path, paint);

        let svg = backend.to_svg();
        assert!(svg.contains("fill=\"#3b82f6\""));
        assert!(svg.contains("fill-opacity=\"0.2\""));
    }

    #[test]
    fn exports_dashed_stroke() {
        let mut backend = SvgBackend::new();
        backend.begin_frame(FrameSize::new(10, 10));
        let paint = backend.create_paint(PaintDesc::solid(Color::from_rgba8(0, 0, 255, 255)));
        let path = backend.create_path(PathDesc::line(0.0, 0.0, 10.0, 0.0));
        backend.stroke_with(path, paint, StrokeStyle::new(2.0).with_dashes(0.0, [5.0, 5.0]));

        let svg = backend.to_svg();
        assert!(svg.contains("fill=\"none\" stroke=\"#0000ff\""));
        assert!(svg.contains("stroke-width=\"2\""));
        assert!(svg.contains("stroke-dasharray=\"5,5\""));
    }

    #[test]
    fn begin_frame_discards_previous_frame() {
        let mut backend = SvgBackend::new();
        backend.begin_frame(FrameSize::new(10, 10));
        let paint = backend.create_paint(PaintDesc::solid(Color::WHITE));
        let path = backend.create_path(square());
        backend.fill_with(path, paint);
        assert_eq!(backend.ops().len(), 2);

        backend.begin_frame(FrameSize::new(20, 20));
        assert!(backend.ops().is_empty());
        assert_eq!(backend.frame_size(), FrameSize::new(20, 20));
        assert!(!backend.to_svg().contains("<path"));
    }

    #[test]
    fn background_is_drawn_first() {
        let mut backend = SvgBackend::new().with_background(Color::WHITE);
        backend.begin_frame(FrameSize::new(600, 500));
        let svg = backend.to_svg();
        assert!(svg.contains(
            "<rect x=\"0\" y=\"0\" width=\"600\" height=\"500\" fill=\"#ffffff\"/>"
        ));
    }

    #[test]
    fn draws_with_destroyed_paths_are_skipped() {
        let mut backend = SvgBackend::new();
        backend.begin_frame(FrameSize::new(10, 10));
        let path = backend.create_path(square());
        backend.destroy_path(path);
        backend.draw(DrawOp::FillPath(path));
        assert!(!backend.to_svg().contains("<path"));
    }

    #[test]
    fn fmt_trims_trailing_zeros() {
        assert_eq!(fmt_f32(2.0), "2");
        assert_eq!(fmt_f32(0.25), "0.25");
        assert_eq!(fmt_f32(-1.5), "-1.5");
        assert_eq!(fmt_f32(1.0 / 3.0), "0.333");
    }
}
