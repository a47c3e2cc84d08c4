// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Mul;

use kurbo::{Affine, Vec2};

/// Names one of the four cells of a [`Mat2`].
///
/// Cells are laid out row-major: `[[A, B], [C, D]]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entry {
    /// Row 0, column 0.
    A,
    /// Row 0, column 1.
    B,
    /// Row 1, column 0.
    C,
    /// Row 1, column 1.
    D,
}

impl Entry {
    /// All entries in row-major order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Zero-based row of this cell.
    #[inline]
    pub const fn row(self) -> usize {
        match self {
            Self::A | Self::B => 0,
            Self::C | Self::D => 1,
        }
    }

    /// Zero-based column of this cell.
    #[inline]
    pub const fn col(self) -> usize {
        match self {
            Self::A | Self::C => 0,
            Self::B | Self::D => 1,
        }
    }

    /// Lower-case single letter name (`"a"` .. `"d"`).
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }

    /// Looks up an entry by its single letter name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|entry| entry.name().eq_ignore_ascii_case(name))
    }
}

/// A 2×2 real matrix `[[a, b], [c, d]]`.
///
/// Applied to a column vector `(x, y)` this yields `(a·x + b·y, c·x + d·y)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat2 {
    /// Row 0, column 0.
    pub a: f64,
    /// Row 0, column 1.
    pub b: f64,
    /// Row 1, column 0.
    pub c: f64,
    /// Row 1, column 1.
    pub d: f64,
}

impl Mat2 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// The zero matrix.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// The matrix a fresh view starts from: `[[2, 0.5], [0.5, 1]]`.
    pub const DEFAULT: Self = Self::new(2.0, 0.5, 0.5, 1.0);

    /// Creates a matrix from its entries in row-major order.
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Creates a matrix from two rows.
    #[inline]
    pub const fn from_rows(rows: [[f64; 2]; 2]) -> Self {
        Self::new(rows[0][0], rows[0][1], rows[1][0], rows[1][1])
    }

    /// Returns the two rows.
    #[inline]
    pub const fn to_rows(self) -> [[f64; 2]; 2] {
        [[self.a, self.b], [self.c, self.d]]
    }

    /// A uniform scaling `s·I`.
    #[inline]
    pub const fn scalar(s: f64) -> Self {
        Self::new(s, 0.0, 0.0, s)
    }

    /// Sum of the diagonal entries.
    #[inline]
    pub fn trace(self) -> f64 {
        self.a + self.d
    }

    /// `a·d − b·c`.
    #[inline]
    pub fn determinant(self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The transposed matrix `[[a, c], [b, d]]`.
    #[inline]
    pub const fn transpose(self) -> Self {
        Self::new(self.a, self.c, self.b, self.d)
    }

    /// The Gram matrix `MᵗM`, which is symmetric and positive semi-definite.
    #[inline]
    pub fn gram(self) -> Self {
        self.transpose() * self
    }

    /// Applies the matrix to a column vector.
    #[inline]
    pub fn mul_vec(self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.b * v.y, self.c * v.x + self.d * v.y)
    }

    /// Reads a single cell.
    #[inline]
    pub const fn entry(self, entry: Entry) -> f64 {
        match entry {
            Entry::A => self.a,
            Entry::B => self.b,
            Entry::C => self.c,
            Entry::D => self.d,
        }
    }

    /// Replaces a single cell.
    #[inline]
    pub fn set_entry(&mut self, entry: Entry, value: f64) {
        match entry {
            Entry::A => self.a = value,
            Entry::B => self.b = value,
            Entry::C => self.c = value,
            Entry::D => self.d = value,
        }
    }

    /// Returns a copy with a single cell replaced.
    #[inline]
    #[must_use]
    pub fn with_entry(mut self, entry: Entry, value: f64) -> Self {
        self.set_entry(entry, value);
        self
    }

    /// Returns `true` if all four entries are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.d.is_finite()
    }

    /// The linear map as a kurbo [`Affine`] with zero translation.
    ///
    /// kurbo stores coefficients column-major (`[a c e; b d f]`), so the
    /// off-diagonal entries swap places relative to [`Mat2`]'s row-major
    /// fields.
    #[inline]
    pub fn to_affine(self) -> Affine {
        Affine::new([self.a, self.c, self.b, self.d, 0.0, 0.0])
    }
}

impl Default for Mat2 {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Mul for Mat2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.a * rhs.a + self.b * rhs.c,
            self.a * rhs.b + self.b * rhs.d,
            self.c * rhs.a + self.d * rhs.c,
            self.c * rhs.b + self.d * rhs.d,
        )
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.mul_vec(rhs)
    }
}

impl From<[[f64; 2]; 2]> for Mat2 {
    #[inline]
    fn from(rows: [[f64; 2]; 2]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Mat2> for [[f64; 2]; 2] {
    #[inline]
    fn from(m: Mat2) -> Self {
        m.to_rows()
    }
}
