// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::Vec2;

use crate::Mat2;

/// Off-diagonal magnitude below which [`eigenvector`] treats a row as empty.
pub const EIGENVECTOR_EPSILON: f64 = 1e-10;

/// Eigenvalue gap below which [`orthogonal_eigenvectors`] treats the roots as repeated.
pub const REPEATED_ROOT_EPSILON: f64 = 1e-6;

/// Vector length below which [`normalize_or_zero`] returns [`Vec2::ZERO`].
pub const ZERO_NORM_EPSILON: f64 = 1e-10;

/// The two real roots of the characteristic polynomial.
///
/// `first` comes from the `+√disc` branch, so `first >= second` always holds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EigenValues {
    /// The larger root, `(trace + √disc) / 2`.
    pub first: f64,
    /// The smaller root, `(trace − √disc) / 2`.
    pub second: f64,
}

impl EigenValues {
    /// Both roots as an array, larger first.
    #[inline]
    pub const fn to_array(self) -> [f64; 2] {
        [self.first, self.second]
    }
}

/// An eigenvalue together with a unit eigenvector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EigenPair {
    /// The eigenvalue `λ`.
    pub value: f64,
    /// A unit vector `v` with `M·v = λ·v`.
    pub vector: Vec2,
}

/// Both eigenpairs of a matrix with real eigenvalues.
///
/// The eigenvectors are unit length. They are only guaranteed to be
/// perpendicular for symmetric matrices and for the repeated-root case,
/// where the canonical basis is used.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EigenBasis {
    /// Pair for the larger eigenvalue.
    pub first: EigenPair,
    /// Pair for the smaller eigenvalue.
    pub second: EigenPair,
}

impl EigenBasis {
    /// The eigenvalues, larger first.
    #[inline]
    pub fn values(&self) -> EigenValues {
        EigenValues {
            first: self.first.value,
            second: self.second.value,
        }
    }

    /// The two pairs as an array, larger eigenvalue first.
    #[inline]
    pub fn pairs(&self) -> [EigenPair; 2] {
        [self.first, self.second]
    }
}

/// `a·d − b·c`.
#[inline]
pub fn determinant(m: Mat2) -> f64 {
    m.determinant()
}

/// Real eigenvalues of `m`, or `None` when they form a complex conjugate pair.
///
/// With `disc = trace² − 4·det`, the roots are `(trace ± √disc) / 2`. The
/// `+` root is always reported first and the pair is not re-sorted.
pub fn eigenvalues(m: Mat2) -> Option<EigenValues> {
    let trace = m.trace();
    let disc = trace * trace - 4.0 * m.determinant();
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    Some(EigenValues {
        first: (trace + sqrt_disc) / 2.0,
        second: (trace - sqrt_disc) / 2.0,
    })
}

/// An (unnormalized) solution of `(M − λI)·v = 0`.
///
/// The first row `(a − λ, b)` is used when `|b|` is significant, giving
/// `(b, −(a − λ))`. Otherwise the second row `(c, d − λ)` gives
/// `(−(d − λ), c)`. When both off-diagonal entries vanish the matrix is
/// diagonal and the canonical axis whose diagonal entry is closest to `λ`
/// is returned, so the two eigenvalues of `[[3, 0], [0, 1]]` map to `(1, 0)`
/// and `(0, 1)` respectively.
///
/// The result is never the zero vector.
pub fn eigenvector(m: Mat2, lambda: f64) -> Vec2 {
    let a = m.a - lambda;
    let d = m.d - lambda;
    if m.b.abs() > EIGENVECTOR_EPSILON {
        return Vec2::new(m.b, -a);
    }
    if m.c.abs() > EIGENVECTOR_EPSILON {
        return Vec2::new(-d, m.c);
    }
    if a.abs() <= d.abs() {
        Vec2::new(1.0, 0.0)
    } else {
        Vec2::new(0.0, 1.0)
    }
}

/// Scales `v` to unit length.
///
/// `v` must not be the zero vector; use [`normalize_or_zero`] when that
/// cannot be ruled out.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v / v.hypot()
}

/// Scales `v` to unit length, or returns [`Vec2::ZERO`] when `|v|` is below
/// [`ZERO_NORM_EPSILON`].
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len < ZERO_NORM_EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Eigenvalues and unit eigenvectors of `m`, or `None` for complex eigenvalues.
///
/// When `|λ₁ − λ₂| < REPEATED_ROOT_EPSILON` the matrix is (numerically) a
/// multiple of the identity on its eigenspace and the canonical basis
/// `(1, 0)`, `(0, 1)` is returned. Otherwise each eigenvector is computed
/// with [`eigenvector`] and normalized independently; no orthogonality is
/// imposed.
pub fn orthogonal_eigenvectors(m: Mat2) -> Option<EigenBasis> {
    let values = eigenvalues(m)?;
    let (v1, v2) = if (values.first - values.second).abs() < REPEATED_ROOT_EPSILON {
        (Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0))
    } else {
        (
            normalize(eigenvector(m, values.first)),
            normalize(eigenvector(m, values.second)),
        )
    };
    Some(EigenBasis {
        first: EigenPair {
            value: values.first,
            vector: v1,
        },
        second: EigenPair {
            value: values.second,
            vector: v2,
        },
    })
}
