// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene building: view state plus derived quantities in, styled screen-space
//! paths out.

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_6, TAU};

use kurbo::{BezPath, Cap, Join, Point, Stroke, Vec2};
use lintrans_imaging::{FrameSize, ImagingBackend, ImagingBackendExt, PaintDesc, PathDesc};
use lintrans_linalg::Mat2;
use peniko::Color;

use crate::{DerivedQuantities, PlotTransform, ViewState};

/// Axis line color.
pub const AXIS_COLOR: Color = Color::from_rgb8(0xcc, 0xcc, 0xcc);
/// Stroke color of the untransformed shapes.
pub const ORIGINAL_COLOR: Color = Color::from_rgb8(0x3b, 0x82, 0xf6);
/// Stroke color of the transformed shapes.
pub const TRANSFORMED_COLOR: Color = Color::from_rgb8(0xef, 0x44, 0x44);
/// Colors of the first and second eigenvector rays.
pub const EIGEN_COLORS: [Color; 2] = [
    Color::from_rgb8(0x10, 0xb9, 0x81),
    Color::from_rgb8(0x8b, 0x5c, 0xf6),
];
/// Colors of the first and second singular vector pairs.
pub const SINGULAR_COLORS: [Color; 2] = [
    Color::from_rgb8(0xf5, 0x9e, 0x0b),
    Color::from_rgb8(0xec, 0x48, 0x99),
];

/// Alpha of the translucent circle fills.
const SHAPE_FILL_ALPHA: f32 = 0.1;
/// Vector rays extend to this multiple of the plot scale.
const RAY_LENGTH: f64 = 1.5;
/// Arrowhead segment length in screen units.
const ARROW_HEAD_LENGTH: f64 = 10.0;
/// Segments in the circle polygon.
const CIRCLE_SEGMENTS: usize = 100;
const SQUARE_CORNERS: [Point; 4] = [
    Point::new(-1.0, -1.0),
    Point::new(1.0, -1.0),
    Point::new(1.0, 1.0),
    Point::new(-1.0, 1.0),
];

/// What a [`SceneItem`] depicts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Horizontal and vertical lines through the canvas center.
    Axes,
    /// Dashed unit square.
    OriginalSquare,
    /// Unit circle.
    OriginalCircle,
    /// The unit square mapped through the matrix.
    TransformedSquare,
    /// The unit circle mapped through the matrix.
    TransformedCircle,
    /// Transformed eigenvector ray with arrowhead; index 0 is the larger eigenvalue.
    Eigenvector(u8),
    /// Dashed right singular vector ray.
    RightSingularVector(u8),
    /// Solid left singular vector ray, scaled by its singular value.
    LeftSingularVector(u8),
}

/// Stroke color and style.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePaint {
    /// Stroke color.
    pub color: Color,
    /// Width, caps, joins and dashes.
    pub style: Stroke,
}

/// One styled path in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneItem {
    /// What the path depicts.
    pub role: Role,
    /// Geometry in screen coordinates.
    pub path: BezPath,
    /// Fill color, painted before the stroke.
    pub fill: Option<Color>,
    /// Stroke paint.
    pub stroke: Option<StrokePaint>,
}

/// The full visual content of one frame, in draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    plot: PlotTransform,
    items: Vec<SceneItem>,
}

impl Scene {
    /// The plot transform the geometry was built with.
    pub fn plot(&self) -> &PlotTransform {
        &self.plot
    }

    /// Items in draw order.
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Returns the first item with `role`.
    pub fn find(&self, role: Role) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.role == role)
    }

    /// Starts a new frame on `backend` and emits every item.
    ///
    /// The frame is always redrawn in full; fills precede strokes within an
    /// item.
    pub fn draw<B: ImagingBackend + ?Sized>(&self, backend: &mut B) {
        backend.begin_frame(frame_size(&self.plot));
        for item in &self.items {
            let path = backend.create_path(PathDesc::from_bez_path(&item.path, 0.1));
            if let Some(color) = item.fill {
                let paint = backend.create_paint(PaintDesc::solid(color));
                backend.fill_with(path, paint);
            }
            if let Some(stroke) = &item.stroke {
                let paint = backend.create_paint(PaintDesc::solid(stroke.color));
                backend.stroke_with(path, paint, stroke.style.clone());
            }
        }
        log::trace!("drew {} scene items", self.items.len());
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "canvas dimensions are small positive integers"
)]
fn frame_size(plot: &PlotTransform) -> FrameSize {
    let bounds = plot.canvas_rect();
    FrameSize::new(bounds.width() as u32, bounds.height() as u32)
}

/// Builds the scene for the default 600×500 plot.
pub fn build_scene(state: &ViewState, derived: &DerivedQuantities) -> Scene {
    build_scene_with(state, derived, PlotTransform::default())
}

/// Builds the scene for an arbitrary plot transform.
pub fn build_scene_with(
    state: &ViewState,
    derived: &DerivedQuantities,
    plot: PlotTransform,
) -> Scene {
    let mut items = Vec::new();
    items.push(axes(&plot));

    if state.show_original {
        items.extend(shapes(&plot, Mat2::IDENTITY, ORIGINAL_COLOR, true));
    }
    if state.show_transformed {
        items.extend(shapes(&plot, state.matrix, TRANSFORMED_COLOR, false));
    }

    if state.show_eigenvectors
        && let Some(basis) = derived.eigen_basis
    {
        for (index, pair) in (0_u8..).zip(basis.pairs()) {
            let image = state.matrix * pair.vector;
            let end = ray_end(&plot, image * RAY_LENGTH);
            let mut path = ray(&plot, end);
            arrow_head(&mut path, plot.center(), end);
            items.push(SceneItem {
                role: Role::Eigenvector(index),
                path,
                fill: None,
                stroke: Some(solid_stroke(EIGEN_COLORS[usize::from(index)], 3.0)),
            });
        }
    }

    if state.show_singular_vectors
        && let Some(svd) = derived.svd
    {
        let triplets = svd.triplets();
        for (index, triplet) in (0_u8..).zip(triplets) {
            let end = ray_end(&plot, triplet.right * RAY_LENGTH);
            items.push(SceneItem {
                role: Role::RightSingularVector(index),
                path: ray(&plot, end),
                fill: None,
                stroke: Some(dashed_stroke(
                    SINGULAR_COLORS[usize::from(index)],
                    2.0,
                    [3.0, 3.0],
                )),
            });
        }
        for (index, triplet) in (0_u8..).zip(triplets) {
            let end = ray_end(&plot, triplet.left * (triplet.value * RAY_LENGTH));
            items.push(SceneItem {
                role: Role::LeftSingularVector(index),
                path: ray(&plot, end),
                fill: None,
                stroke: Some(solid_stroke(SINGULAR_COLORS[usize::from(index)], 3.0)),
            });
        }
    }

    Scene { plot, items }
}

fn axes(plot: &PlotTransform) -> SceneItem {
    let c = plot.center();
    let bounds = plot.canvas_rect();
    let mut path = BezPath::new();
    path.move_to((bounds.x0, c.y));
    path.line_to((bounds.x1, c.y));
    path.move_to((c.x, bounds.y0));
    path.line_to((c.x, bounds.y1));
    SceneItem {
        role: Role::Axes,
        path,
        fill: None,
        stroke: Some(solid_stroke(AXIS_COLOR, 1.0)),
    }
}

/// Square then circle, each vertex mapped through `m` before projection.
fn shapes(plot: &PlotTransform, m: Mat2, color: Color, original: bool) -> [SceneItem; 2] {
    let map = |p: Point| plot.to_screen((m * p.to_vec2()).to_point());

    let mut square = BezPath::new();
    for (i, corner) in SQUARE_CORNERS.into_iter().enumerate() {
        if i == 0 {
            square.move_to(map(corner));
        } else {
            square.line_to(map(corner));
        }
    }
    square.close_path();

    let mut circle = BezPath::new();
    for i in 0..=CIRCLE_SEGMENTS {
        #[allow(
            clippy::cast_precision_loss,
            reason = "segment indices are tiny and exact in f64"
        )]
        let angle = (i as f64 / CIRCLE_SEGMENTS as f64) * TAU;
        let p = map(Vec2::from_angle(angle).to_point());
        if i == 0 {
            circle.move_to(p);
        } else {
            circle.line_to(p);
        }
    }
    circle.close_path();

    let (square_role, circle_role) = if original {
        (Role::OriginalSquare, Role::OriginalCircle)
    } else {
        (Role::TransformedSquare, Role::TransformedCircle)
    };

    [
        SceneItem {
            role: square_role,
            path: square,
            fill: None,
            stroke: Some(dashed_stroke(color, 2.0, [5.0, 5.0])),
        },
        SceneItem {
            role: circle_role,
            path: circle,
            fill: Some(color.with_alpha(SHAPE_FILL_ALPHA)),
            stroke: Some(solid_stroke(color, 2.0)),
        },
    ]
}

fn ray_end(plot: &PlotTransform, world: Vec2) -> Point {
    plot.center() + plot.vec_to_screen(world)
}

fn ray(plot: &PlotTransform, end: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(plot.center());
    path.line_to(end);
    path
}

/// Two segments leaving `tip` backwards at ±30° from the `from → tip` direction.
fn arrow_head(path: &mut BezPath, from: Point, tip: Point) {
    let angle = (tip - from).atan2();
    for side in [angle - FRAC_PI_6, angle + FRAC_PI_6] {
        path.move_to(tip);
        path.line_to(tip - Vec2::from_angle(side) * ARROW_HEAD_LENGTH);
    }
}

/// Butt caps and miter joins, as a 2D canvas strokes by default.
fn solid_stroke(color: Color, width: f64) -> StrokePaint {
    StrokePaint {
        color,
        style: Stroke::new(width)
            .with_caps(Cap::Butt)
            .with_join(Join::Miter)
            .with_miter_limit(10.0),
    }
}

fn dashed_stroke(color: Color, width: f64, dashes: [f64; 2]) -> StrokePaint {
    let mut paint = solid_stroke(color, width);
    paint.style = paint.style.with_dashes(0.0, dashes);
    paint
}
