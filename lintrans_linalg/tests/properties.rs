// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Algebraic properties of `lintrans_linalg`, checked over grids of matrices.
//!
//! The eigen checks use values that are exactly representable so that the
//! discriminants are computed without rounding, which keeps the expected
//! branch (real/complex, repeated/distinct) unambiguous. The SVD checks also
//! run that grid scaled far below and above unit size, and a grid of
//! irrational entries, with tolerances relative to the largest entry.

use core::f64::consts::{E, FRAC_1_SQRT_2, FRAC_PI_3, LN_2, SQRT_2};

use approx::assert_abs_diff_eq;
use lintrans_linalg::{
    Mat2, REPEATED_ROOT_EPSILON, Vec2, determinant, eigenvalues, orthogonal_eigenvectors, svd,
};

const VALUES: [f64; 8] = [-2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0];
const IRRATIONAL: [f64; 6] = [-FRAC_PI_3, -LN_2, 0.0, FRAC_1_SQRT_2, SQRT_2, E];
const SCALES: [f64; 3] = [1e-4, 1e-2, 1e3];
const TOL: f64 = 1e-9;

fn grid_over<const N: usize>(values: [f64; N]) -> impl Iterator<Item = Mat2> {
    values.into_iter().flat_map(move |a| {
        values.into_iter().flat_map(move |b| {
            values.into_iter().flat_map(move |c| {
                values.into_iter().map(move |d| Mat2::new(a, b, c, d))
            })
        })
    })
}

fn grid() -> impl Iterator<Item = Mat2> {
    grid_over(VALUES)
}

/// The exact grid, its scaled copies, and the irrational grid.
fn svd_sweep() -> impl Iterator<Item = Mat2> {
    let scaled = SCALES
        .into_iter()
        .flat_map(|s| grid().map(move |m| Mat2::scalar(s) * m));
    grid().chain(scaled).chain(grid_over(IRRATIONAL))
}

/// Largest absolute entry, the unit for SVD tolerances.
fn magnitude(m: Mat2) -> f64 {
    m.a.abs().max(m.b.abs()).max(m.c.abs()).max(m.d.abs())
}

#[test]
fn determinant_is_exact() {
    for m in grid() {
        assert_eq!(determinant(m), m.a * m.d - m.b * m.c, "det of {m:?}");
    }
}

#[test]
fn eigenvalues_exist_exactly_when_discriminant_is_non_negative() {
    for m in grid() {
        let trace = m.trace();
        let real = trace * trace >= 4.0 * determinant(m);
        assert_eq!(eigenvalues(m).is_some(), real, "branch for {m:?}");
    }
}

#[test]
fn eigenvalues_are_ordered_and_match_trace_and_determinant() {
    for m in grid() {
        let Some(evals) = eigenvalues(m) else {
            continue;
        };
        assert!(evals.first >= evals.second, "order for {m:?}");
        assert_abs_diff_eq!(evals.first + evals.second, m.trace(), epsilon = TOL);
        assert_abs_diff_eq!(evals.first * evals.second, determinant(m), epsilon = TOL);
    }
}

#[test]
fn distinct_eigenpairs_satisfy_the_eigen_equation() {
    for m in grid() {
        let Some(basis) = orthogonal_eigenvectors(m) else {
            continue;
        };
        if (basis.first.value - basis.second.value).abs() < REPEATED_ROOT_EPSILON {
            assert_eq!(basis.first.vector, Vec2::new(1.0, 0.0));
            assert_eq!(basis.second.vector, Vec2::new(0.0, 1.0));
            continue;
        }
        for pair in basis.pairs() {
            let lhs = m * pair.vector;
            let rhs = pair.vector * pair.value;
            assert_abs_diff_eq!(lhs.x, rhs.x, epsilon = TOL);
            assert_abs_diff_eq!(lhs.y, rhs.y, epsilon = TOL);
            assert_abs_diff_eq!(pair.vector.hypot(), 1.0, epsilon = TOL);
        }
    }
}

#[test]
fn singular_values_are_ordered_and_multiply_to_abs_determinant() {
    for m in svd_sweep() {
        let svd = svd(m).expect("finite matrices always decompose");
        let scale = magnitude(m);
        assert!(svd.s1 >= svd.s2, "order for {m:?}");
        assert!(svd.s2 >= 0.0, "sign for {m:?}");
        assert_abs_diff_eq!(
            svd.s1 * svd.s2,
            determinant(m).abs(),
            epsilon = TOL * scale * scale
        );
    }
}

#[test]
fn right_singular_vectors_are_orthonormal() {
    for m in svd_sweep() {
        let svd = svd(m).unwrap();
        assert_abs_diff_eq!(svd.v1.dot(svd.v2), 0.0, epsilon = TOL);
        assert_abs_diff_eq!(svd.v1.hypot(), 1.0, epsilon = TOL);
        assert_abs_diff_eq!(svd.v2.hypot(), 1.0, epsilon = TOL);
    }
}

#[test]
fn right_singular_vectors_are_stretched_by_their_values() {
    for m in svd_sweep() {
        let svd = svd(m).unwrap();
        let tol = TOL * magnitude(m);
        for triplet in svd.triplets() {
            let image = m * triplet.right;
            assert_abs_diff_eq!(image.hypot(), triplet.value, epsilon = tol);
            if triplet.left != Vec2::ZERO {
                let expected = triplet.left * triplet.value;
                assert_abs_diff_eq!(image.x, expected.x, epsilon = tol);
                assert_abs_diff_eq!(image.y, expected.y, epsilon = tol);
            }
        }
    }
}

#[test]
fn decomposition_reconstructs_the_matrix() {
    for m in svd_sweep() {
        let r = svd(m).unwrap().reconstruct();
        let tol = TOL * magnitude(m);
        assert_abs_diff_eq!(r.a, m.a, epsilon = tol);
        assert_abs_diff_eq!(r.b, m.b, epsilon = tol);
        assert_abs_diff_eq!(r.c, m.c, epsilon = tol);
        assert_abs_diff_eq!(r.d, m.d, epsilon = tol);
    }
}

#[test]
fn left_singular_vectors_are_finite() {
    for m in svd_sweep() {
        let svd = svd(m).unwrap();
        for u in [svd.u1, svd.u2] {
            assert!(u.x.is_finite() && u.y.is_finite(), "NaN leaked for {m:?}");
        }
    }
}

#[test]
fn non_finite_entries_have_no_decomposition() {
    assert!(svd(Mat2::new(f64::NAN, 0.0, 0.0, 1.0)).is_none());
    assert!(svd(Mat2::new(1.0, f64::INFINITY, 0.0, 1.0)).is_none());
}

#[test]
fn singular_scenario() {
    let m = Mat2::from_rows([[2.0, 1.0], [4.0, 2.0]]);
    assert_eq!(determinant(m), 0.0);
    let evals = eigenvalues(m).unwrap();
    assert!(evals.first == 0.0 || evals.second == 0.0);
    assert_abs_diff_eq!(svd(m).unwrap().s2, 0.0, epsilon = TOL);
}

#[test]
fn rotation_scenario() {
    let m = Mat2::from_rows([[0.0, -1.0], [1.0, 0.0]]);
    assert_eq!(determinant(m), 1.0);
    assert!(eigenvalues(m).is_none());
    let svd = svd(m).unwrap();
    assert_eq!(svd.s1, 1.0);
    assert_eq!(svd.s2, 1.0);
}

#[test]
fn reflection_scenario() {
    let m = Mat2::from_rows([[-1.0, 0.0], [0.0, 1.0]]);
    assert_eq!(determinant(m), -1.0);
    let evals = eigenvalues(m).unwrap();
    assert_eq!((evals.first, evals.second), (1.0, -1.0));
}

#[test]
fn default_scenario() {
    let m = Mat2::DEFAULT;
    let evals = eigenvalues(m).unwrap();
    assert!(evals.first > 0.0 && evals.second > 0.0);
    let svd = svd(m).unwrap();
    assert_abs_diff_eq!(svd.s1, evals.first.abs(), epsilon = TOL);
    assert_abs_diff_eq!(svd.s2, evals.second.abs(), epsilon = TOL);
}
