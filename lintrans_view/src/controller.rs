// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use lintrans_imaging::ImagingBackend;
use lintrans_linalg::{Entry, Mat2};

use crate::{DerivedQuantities, Overlay, Scene, Statistics, ViewState, build_scene, parse_entry};

/// A discrete user input.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// Raw text typed into an entry field; coerced with [`parse_entry`].
    EditEntry {
        /// Which field was edited.
        entry: Entry,
        /// The field's full new text.
        text: String,
    },
    /// An already numeric entry value.
    SetEntry {
        /// Which field changed.
        entry: Entry,
        /// New value; non-finite values are stored as `0.0`.
        value: f64,
    },
    /// Replace the whole matrix at once.
    SetMatrix(Mat2),
    /// A checkbox changed.
    Toggle {
        /// Which overlay.
        overlay: Overlay,
        /// New checkbox state.
        on: bool,
    },
}

/// Owns the view state and keeps everything derived from it current.
///
/// Every mutation goes through [`Controller::apply`], which runs the whole
/// cycle synchronously: update the state, recompute the derived quantities,
/// rebuild the scene, redraw it into the backend from a cleared frame, and
/// refresh the statistics text.
#[derive(Debug)]
pub struct Controller<B> {
    state: ViewState,
    derived: DerivedQuantities,
    scene: Scene,
    statistics: Statistics,
    backend: B,
}

impl<B: ImagingBackend> Controller<B> {
    /// Creates a controller with the default state and renders the first frame.
    pub fn new(backend: B) -> Self {
        Self::with_state(ViewState::default(), backend)
    }

    /// Creates a controller starting from `state` and renders the first frame.
    pub fn with_state(mut state: ViewState, mut backend: B) -> Self {
        state.set_matrix(state.matrix);
        let derived = DerivedQuantities::compute(&state.matrix);
        let scene = build_scene(&state, &derived);
        scene.draw(&mut backend);
        let statistics = Statistics::from_derived(&derived);
        Self {
            state,
            derived,
            scene,
            statistics,
            backend,
        }
    }

    /// Applies one input and re-renders.
    pub fn apply(&mut self, input: Input) {
        log::debug!("applying {input:?}");
        match input {
            Input::EditEntry { entry, text } => self.state.set_entry(entry, parse_entry(&text)),
            Input::SetEntry { entry, value } => self.state.set_entry(entry, value),
            Input::SetMatrix(matrix) => self.state.set_matrix(matrix),
            Input::Toggle { overlay, on } => self.state.set_overlay(overlay, on),
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.derived = DerivedQuantities::compute(&self.state.matrix);
        self.scene = build_scene(&self.state, &self.derived);
        self.scene.draw(&mut self.backend);
        self.statistics = Statistics::from_derived(&self.derived);
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Quantities derived from the current matrix.
    pub fn derived(&self) -> &DerivedQuantities {
        &self.derived
    }

    /// The scene drawn by the last render.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Statistics text for the current matrix.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The backend holding the last rendered frame.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the controller, returning its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintrans_imaging_ref::RefBackend;

    #[test]
    fn new_renders_initial_frame() {
        let controller = Controller::new(RefBackend::default());
        assert_eq!(controller.backend().frame_count(), 1);
        assert_eq!(controller.state(), &ViewState::default());
        assert_eq!(controller.statistics().determinant.lines, ["1.750"]);
    }

    #[test]
    fn every_input_rerenders() {
        let mut controller = Controller::new(RefBackend::default());
        controller.apply(Input::Toggle {
            overlay: Overlay::Eigenvectors,
            on: true,
        });
        controller.apply(Input::SetEntry {
            entry: Entry::A,
            value: 3.0,
        });
        assert_eq!(controller.backend().frame_count(), 3);
    }

    #[test]
    fn edit_entry_coerces_garbage_to_zero() {
        let mut controller = Controller::new(RefBackend::default());
        controller.apply(Input::EditEntry {
            entry: Entry::D,
            text: String::from("not a number"),
        });
        assert_eq!(controller.state().matrix, Mat2::new(2.0, 0.5, 0.5, 0.0));
        assert_eq!(controller.derived().determinant, -0.25);
    }

    #[test]
    fn with_state_sanitizes_matrix() {
        let state = ViewState {
            matrix: Mat2::new(f64::NAN, 0.0, 0.0, 1.0),
            show_singular_vectors: true,
            ..ViewState::default()
        };
        let controller = Controller::with_state(state, RefBackend::default());
        assert_eq!(controller.state().matrix, Mat2::new(0.0, 0.0, 0.0, 1.0));
        assert!(controller.state().show_singular_vectors);
    }
}
