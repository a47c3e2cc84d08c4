// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::Vec2;

use crate::{Mat2, normalize, normalize_or_zero};

/// Singular value decomposition `M = U·Σ·Vᵗ` of a 2×2 matrix.
///
/// `v1`, `v2` are orthonormal directions in the input space. `u1`, `u2` are
/// the normalized images `M·v1`, `M·v2`; an image whose length is below
/// [`ZERO_NORM_EPSILON`](crate::ZERO_NORM_EPSILON) is reported as
/// [`Vec2::ZERO`], which only happens alongside a (near) zero singular value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Svd {
    /// First left singular vector.
    pub u1: Vec2,
    /// Second left singular vector.
    pub u2: Vec2,
    /// First singular value, `√λ₁(MᵗM)`.
    pub s1: f64,
    /// Second singular value, `√λ₂(MᵗM)`.
    pub s2: f64,
    /// First right singular vector.
    pub v1: Vec2,
    /// Second right singular vector.
    pub v2: Vec2,
}

/// One column of an [`Svd`]: a right vector, its stretch, and its image direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SingularTriplet {
    /// Right singular vector (input space).
    pub right: Vec2,
    /// Singular value.
    pub value: f64,
    /// Left singular vector (output space).
    pub left: Vec2,
}

impl Svd {
    /// `[s1, s2]`.
    #[inline]
    pub const fn singular_values(&self) -> [f64; 2] {
        [self.s1, self.s2]
    }

    /// Both columns of the decomposition, in `s1`, `s2` order.
    #[inline]
    pub fn triplets(&self) -> [SingularTriplet; 2] {
        [
            SingularTriplet {
                right: self.v1,
                value: self.s1,
                left: self.u1,
            },
            SingularTriplet {
                right: self.v2,
                value: self.s2,
                left: self.u2,
            },
        ]
    }

    /// Rebuilds `U·Σ·Vᵗ = s1·u1·v1ᵗ + s2·u2·v2ᵗ`.
    pub fn reconstruct(&self) -> Mat2 {
        let outer = |u: Vec2, v: Vec2, s: f64| {
            Mat2::new(s * u.x * v.x, s * u.x * v.y, s * u.y * v.x, s * u.y * v.y)
        };
        let l = outer(self.u1, self.v1, self.s1);
        let r = outer(self.u2, self.v2, self.s2);
        Mat2::new(l.a + r.a, l.b + r.b, l.c + r.c, l.d + r.d)
    }
}

/// Singular value decomposition of `m`.
///
/// With the Gram matrix `MᵗM = [[p, q], [q, r]]` and `spread = λ₁ − λ₂ =
/// √((p − r)² + 4q²)`, the first singular value is `√λ₁`. The second is
/// `|det M| / s1`, which equals `√λ₂` without the cancellation in
/// `λ₁ − spread`, and is capped at `s1` so the larger-first order survives
/// rounding.
///
/// `v1` is the unit eigenvector of `MᵗM` for `λ₁`. Its larger component,
/// `λ₁ − r` or `λ₁ − p`, is written as `(|p − r| + spread) / 2` so nothing
/// cancels and no threshold depends on the scale of `m`. `v2` is `v1` turned
/// by a quarter turn. A diagonal `MᵗM` (rotations, reflections,
/// uniform scalings, the zero matrix) gets the canonical axes, larger
/// diagonal entry first.
///
/// Returns `None` only if the entries are not finite.
pub fn svd(m: Mat2) -> Option<Svd> {
    let gram = m.gram();
    let diff = gram.a - gram.d;
    let spread = (diff * diff + 4.0 * gram.b * gram.c).sqrt();
    if !spread.is_finite() {
        return None;
    }

    let s1 = ((gram.trace() + spread) / 2.0).max(0.0).sqrt();
    let s2 = if s1 > 0.0 {
        (m.determinant().abs() / s1).min(s1)
    } else {
        0.0
    };
    let (v1, v2) = right_singular_vectors(gram, spread);

    Some(Svd {
        u1: normalize_or_zero(m * v1),
        u2: normalize_or_zero(m * v2),
        s1,
        s2,
        v1,
        v2,
    })
}

fn right_singular_vectors(gram: Mat2, spread: f64) -> (Vec2, Vec2) {
    let x = Vec2::new(1.0, 0.0);
    let y = Vec2::new(0.0, 1.0);
    let (p, q, r) = (gram.a, gram.b, gram.d);
    if q == 0.0 {
        return if p >= r { (x, y) } else { (y, x) };
    }
    // λ₁ − r and λ₁ − p, each a sum of non-negative terms.
    let v1 = if p >= r {
        Vec2::new((p - r + spread) / 2.0, q)
    } else {
        Vec2::new(q, (r - p + spread) / 2.0)
    };
    let v1 = normalize(v1);
    (v1, Vec2::new(-v1.y, v1.x))
}
