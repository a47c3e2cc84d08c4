// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lintrans_linalg::{
    EigenBasis, EigenValues, Mat2, Svd, determinant, eigenvalues, orthogonal_eigenvectors, svd,
};

/// Quantities derived from a matrix, recomputed from scratch on every change.
///
/// This is a pure function of the matrix; nothing is cached between calls.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DerivedQuantities {
    /// `ad − bc`.
    pub determinant: f64,
    /// Eigenvalue pair, larger first, or `None` when complex.
    pub eigenvalues: Option<EigenValues>,
    /// Eigenvalues with unit eigenvectors, or `None` when they are complex.
    pub eigen_basis: Option<EigenBasis>,
    /// Singular value decomposition.
    pub svd: Option<Svd>,
}

impl DerivedQuantities {
    /// Computes every derived quantity of `m`.
    pub fn compute(m: &Mat2) -> Self {
        Self {
            determinant: determinant(*m),
            eigenvalues: eigenvalues(*m),
            eigen_basis: orthogonal_eigenvectors(*m),
            svd: svd(*m),
        }
    }
}
