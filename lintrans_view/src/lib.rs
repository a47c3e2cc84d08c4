// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=lintrans_view --heading-base-level=0

//! Lintrans View: the interactive core of the linear transformation visualizer.
//!
//! This crate ties the numeric layer ([`lintrans_linalg`]) to a drawing surface
//! ([`lintrans_imaging`]):
//! - [`ViewState`]: the matrix and the four overlay toggles.
//! - [`DerivedQuantities`]: determinant, eigenvalues, eigenvectors and SVD,
//!   recomputed from scratch whenever anything changes.
//! - [`Statistics`]: the three text blocks shown beside the plot.
//! - [`PlotTransform`] and [`build_scene`]: a fixed 600×500 plot at 60 units
//!   per world unit, and the styled paths drawn on it.
//! - [`Controller`]: the single owner of the state. Inputs go in through
//!   [`Controller::apply`]; each one re-renders into the backend.
//!
//! Everything runs synchronously and nothing here can fail. Malformed input
//! text is coerced to `0.0` by [`parse_entry`].
//!
//! ## Example
//!
//! ```rust
//! use lintrans_imaging_ref::RefBackend;
//! use lintrans_linalg::Entry;
//! use lintrans_view::{Controller, Input, Overlay};
//!
//! let mut controller = Controller::new(RefBackend::default());
//! controller.apply(Input::EditEntry { entry: Entry::B, text: "-1".into() });
//! controller.apply(Input::Toggle { overlay: Overlay::SingularVectors, on: true });
//!
//! assert_eq!(controller.state().matrix.b, -1.0);
//! assert_eq!(controller.backend().frame_count(), 3);
//! println!("{}", controller.statistics());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod derived;
mod plot;
pub mod scene;
mod state;
mod stats;

pub use controller::{Controller, Input};
pub use derived::DerivedQuantities;
pub use plot::PlotTransform;
pub use scene::{Role, Scene, SceneItem, StrokePaint, build_scene, build_scene_with};
pub use state::{Overlay, ViewState, parse_entry};
pub use stats::{StatBlock, Statistics};
