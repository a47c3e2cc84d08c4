// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=lintrans_linalg --heading-base-level=0

//! Lintrans Linalg: closed-form algebra for 2×2 real matrices.
//!
//! This crate is the numeric leaf of the workspace. Everything in it is a
//! pure function over small `Copy` values:
//! - [`Mat2`]: a 2×2 matrix `[[a, b], [c, d]]` with the usual products.
//! - [`determinant`], [`eigenvalues`], [`eigenvector`], [`normalize`].
//! - [`orthogonal_eigenvectors`]: eigenvalues plus unit eigenvectors, with the
//!   repeated-root case mapped onto the canonical basis.
//! - [`svd`]: singular values and left/right singular vectors obtained from
//!   the eigen-decomposition of `MᵗM`.
//!
//! Vectors are [`kurbo::Vec2`], so results can be fed straight into kurbo
//! geometry.
//!
//! ## Example
//!
//! ```rust
//! use lintrans_linalg::{Mat2, eigenvalues, svd};
//!
//! let m = Mat2::from_rows([[2.0, 0.5], [0.5, 1.0]]);
//! let evals = eigenvalues(m).unwrap();
//! assert!(evals.first >= evals.second);
//!
//! let svd = svd(m).unwrap();
//! assert!((svd.s1 * svd.s2 - m.determinant().abs()).abs() < 1e-9);
//! ```
//!
//! ## Degenerate inputs
//!
//! No function here fails. Complex eigenvalues are reported as `None`, a
//! diagonal matrix picks the canonical axis matching the requested eigenvalue,
//! and a zero singular value yields a zero left singular vector rather than a
//! NaN.
//!
//! This crate is `no_std`.

#![no_std]

mod eigen;
mod mat2;
mod svd;

pub use eigen::{
    EIGENVECTOR_EPSILON, EigenBasis, EigenPair, EigenValues, REPEATED_ROOT_EPSILON,
    ZERO_NORM_EPSILON, determinant, eigenvalues, eigenvector, normalize, normalize_or_zero,
    orthogonal_eigenvectors,
};
pub use mat2::{Entry, Mat2};
pub use svd::{SingularTriplet, Svd, svd};

/// Re-export of the vector type used throughout the API.
pub use kurbo::Vec2;
