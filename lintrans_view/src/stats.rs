// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::DerivedQuantities;

/// One titled block of the statistics panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatBlock {
    /// Block heading.
    pub title: &'static str,
    /// Value lines, or a single notice when the value does not exist.
    pub lines: Vec<String>,
    /// Explanatory caption below the values, absent for notices.
    pub caption: Option<&'static str>,
}

/// The three text blocks shown next to the plot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statistics {
    /// Determinant and its meaning as an area factor.
    pub determinant: StatBlock,
    /// Both eigenvalues, or the complex notice.
    pub eigenvalues: StatBlock,
    /// Both singular values, or `N/A`.
    pub singular_values: StatBlock,
}

impl Statistics {
    /// Formats `derived` with three decimals per value.
    pub fn from_derived(derived: &DerivedQuantities) -> Self {
        let determinant = StatBlock {
            title: "Determinant",
            lines: vec![fixed3(derived.determinant)],
            caption: Some("Area scaling factor"),
        };

        let eigenvalues = match derived.eigenvalues {
            Some(evals) => StatBlock {
                title: "Eigenvalues",
                lines: vec![
                    format!("λ₁ = {}", fixed3(evals.first)),
                    format!("λ₂ = {}", fixed3(evals.second)),
                ],
                caption: Some("Stretch along eigenvectors"),
            },
            None => StatBlock {
                title: "Eigenvalues",
                lines: vec![String::from("Complex values")],
                caption: None,
            },
        };

        let singular_values = match derived.svd {
            Some(svd) => StatBlock {
                title: "Singular Values",
                lines: vec![
                    format!("σ₁ = {}", fixed3(svd.s1)),
                    format!("σ₂ = {}", fixed3(svd.s2)),
                ],
                caption: Some("Principal stretches"),
            },
            None => StatBlock {
                title: "Singular Values",
                lines: vec![String::from("N/A")],
                caption: None,
            },
        };

        Self {
            determinant,
            eigenvalues,
            singular_values,
        }
    }

    /// The blocks in panel order.
    pub fn blocks(&self) -> [&StatBlock; 3] {
        [&self.determinant, &self.eigenvalues, &self.singular_values]
    }
}

impl fmt::Display for StatBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        if let Some(caption) = self.caption {
            writeln!(f, "  ({caption})")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Fixed three-decimal formatting without a negative zero.
fn fixed3(value: f64) -> String {
    let s = format!("{value:.3}");
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => String::from(rest),
        _ => s,
    }
}
