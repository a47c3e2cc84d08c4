// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lintrans_linalg::{Entry, Mat2};

/// One of the four independently toggled overlays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Overlay {
    /// The untransformed unit square and unit circle.
    Original,
    /// The unit square and unit circle mapped through the matrix.
    Transformed,
    /// Rays along the transformed eigenvectors.
    Eigenvectors,
    /// Right (dashed) and left (solid) singular vectors.
    SingularVectors,
}

impl Overlay {
    /// All overlays in checkbox order.
    pub const ALL: [Self; 4] = [
        Self::Original,
        Self::Transformed,
        Self::Eigenvectors,
        Self::SingularVectors,
    ];

    /// Whether the overlay is shown in a fresh [`ViewState`].
    pub const fn default_visible(self) -> bool {
        matches!(self, Self::Original | Self::Transformed)
    }

    /// Checkbox label, naming the colors used for the overlay.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Original => "Original (blue)",
            Self::Transformed => "Transformed (red)",
            Self::Eigenvectors => "Eigenvectors (green/purple)",
            Self::SingularVectors => "Singular vectors (orange/pink)",
        }
    }

    /// Short identifier, as accepted by [`Overlay::from_name`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Transformed => "transformed",
            Self::Eigenvectors => "eigenvectors",
            Self::SingularVectors => "singular_vectors",
        }
    }

    /// Parses a short identifier, ignoring ASCII case and treating `-` like `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|overlay| {
            let expected = overlay.name();
            name.len() == expected.len()
                && name.bytes().zip(expected.bytes()).all(|(got, want)| {
                    let got = if got == b'-' { b'_' } else { got };
                    got.eq_ignore_ascii_case(&want)
                })
        })
    }
}

/// Everything the user controls: the matrix and the overlay toggles.
///
/// The state is owned by the caller (normally a
/// [`Controller`](crate::Controller)) and mutated only through the setters
/// below.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewState {
    /// The transformation being visualized.
    pub matrix: Mat2,
    /// Draw the original shapes.
    pub show_original: bool,
    /// Draw the transformed shapes.
    pub show_transformed: bool,
    /// Draw the eigenvector rays.
    pub show_eigenvectors: bool,
    /// Draw the singular vector rays.
    pub show_singular_vectors: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            matrix: Mat2::DEFAULT,
            show_original: Overlay::Original.default_visible(),
            show_transformed: Overlay::Transformed.default_visible(),
            show_eigenvectors: Overlay::Eigenvectors.default_visible(),
            show_singular_vectors: Overlay::SingularVectors.default_visible(),
        }
    }
}

impl ViewState {
    /// Replaces the whole matrix.
    ///
    /// Non-finite entries are stored as `0.0` so the matrix always holds four
    /// finite reals.
    pub fn set_matrix(&mut self, matrix: Mat2) {
        self.matrix = Mat2::new(
            finite_or_zero(matrix.a),
            finite_or_zero(matrix.b),
            finite_or_zero(matrix.c),
            finite_or_zero(matrix.d),
        );
    }

    /// Replaces one matrix entry, coercing non-finite values to `0.0`.
    pub fn set_entry(&mut self, entry: Entry, value: f64) {
        self.matrix.set_entry(entry, finite_or_zero(value));
    }

    /// Whether `overlay` is currently shown.
    pub const fn overlay(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::Original => self.show_original,
            Overlay::Transformed => self.show_transformed,
            Overlay::Eigenvectors => self.show_eigenvectors,
            Overlay::SingularVectors => self.show_singular_vectors,
        }
    }

    /// Shows or hides `overlay`.
    pub fn set_overlay(&mut self, overlay: Overlay, on: bool) {
        let flag = match overlay {
            Overlay::Original => &mut self.show_original,
            Overlay::Transformed => &mut self.show_transformed,
            Overlay::Eigenvectors => &mut self.show_eigenvectors,
            Overlay::SingularVectors => &mut self.show_singular_vectors,
        };
        *flag = on;
    }
}

/// Coerces free-form field text to a matrix entry.
///
/// Surrounding whitespace is ignored. Text that does not parse as a number,
/// or parses to an infinity or NaN, yields `0.0`; there is no error.
pub fn parse_entry(text: &str) -> f64 {
    finite_or_zero(text.trim().parse::<f64>().unwrap_or(0.0))
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
