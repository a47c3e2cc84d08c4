// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line front end for the 2×2 linear transformation visualizer.
//!
//! Builds a view state from flags (or a JSON state file), renders it to SVG,
//! and prints the determinant, eigenvalue and singular value statistics.
//! With `--edit`, stdin is read as a line-oriented session where every line
//! is one input event (see `help` inside the session).

mod error;
mod session;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use lintrans_imaging_svg::SvgBackend;
use lintrans_linalg::Mat2;
use lintrans_view::{Controller, ViewState, parse_entry};
use peniko::Color;

use crate::error::DemoError;

/// Visualize a 2×2 matrix acting on the unit square and unit circle.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Matrix entries `a,b,c,d` for `[[a, b], [c, d]]`; non-numbers become 0.
    #[arg(long, value_parser = parse_matrix, allow_hyphen_values = true)]
    matrix: Option<Mat2>,
    /// Load the initial view state from a JSON file.
    #[arg(long, value_name = "JSON")]
    state: Option<PathBuf>,
    /// Save the final view state to a JSON file.
    #[arg(long, value_name = "JSON")]
    save_state: Option<PathBuf>,
    /// Write the rendered frame to this SVG file.
    #[arg(short, long, value_name = "SVG")]
    output: Option<PathBuf>,
    /// Hide the original square and circle.
    #[arg(long)]
    hide_original: bool,
    /// Hide the transformed square and circle.
    #[arg(long)]
    hide_transformed: bool,
    /// Show the transformed eigenvectors.
    #[arg(long)]
    eigenvectors: bool,
    /// Show the right and left singular vectors.
    #[arg(long)]
    singular_vectors: bool,
    /// Read edit commands from stdin after the first render.
    #[arg(long)]
    edit: bool,
}

fn parse_matrix(text: &str) -> Result<Mat2, String> {
    let values: Vec<f64> = text.split(',').map(parse_entry).collect();
    match values.as_slice() {
        &[a, b, c, d] => Ok(Mat2::new(a, b, c, d)),
        other => Err(format!("expected 4 comma-separated values, got {}", other.len())),
    }
}

fn initial_state(args: &Args) -> Result<ViewState, DemoError> {
    let mut state = match &args.state {
        Some(path) => load_state(path)?,
        None => ViewState::default(),
    };
    if let Some(matrix) = args.matrix {
        state.set_matrix(matrix);
    }
    if args.hide_original {
        state.show_original = false;
    }
    if args.hide_transformed {
        state.show_transformed = false;
    }
    if args.eigenvectors {
        state.show_eigenvectors = true;
    }
    if args.singular_vectors {
        state.show_singular_vectors = true;
    }
    Ok(state)
}

fn load_state(path: &Path) -> Result<ViewState, DemoError> {
    let text = fs::read_to_string(path).map_err(|err| DemoError::io(path, err))?;
    let state = serde_json::from_str(&text).map_err(|err| DemoError::json(path, err))?;
    log::info!("loaded state from {}", path.display());
    Ok(state)
}

fn save_state(state: &ViewState, path: &Path) -> Result<(), DemoError> {
    let text = serde_json::to_string_pretty(state).map_err(|err| DemoError::json(path, err))?;
    fs::write(path, text).map_err(|err| DemoError::io(path, err))?;
    log::info!("saved state to {}", path.display());
    Ok(())
}

fn run(args: &Args) -> Result<(), DemoError> {
    let state = initial_state(args)?;
    log::debug!("initial state: {state:?}");

    let backend = SvgBackend::new().with_background(Color::WHITE);
    let mut controller = Controller::with_state(state, backend);
    print!("{}", controller.statistics());
    if let Some(path) = &args.output {
        session::write_svg(&controller, path)?;
    }

    if args.edit {
        let stdin = io::stdin();
        session::run_session(
            &mut controller,
            args.output.as_deref(),
            stdin.lock(),
            &mut io::stdout(),
        )?;
    }

    if let Some(path) = &args.save_state {
        save_state(controller.state(), path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn matrix_flag_coerces_entries() {
        assert_eq!(parse_matrix("1,2,3,4"), Ok(Mat2::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(parse_matrix("-1, x ,0,1"), Ok(Mat2::new(-1.0, 0.0, 0.0, 1.0)));
        assert!(parse_matrix("1,2,3").is_err());
    }

    #[test]
    fn flags_override_loaded_state() {
        let args = Args::parse_from([
            "lintrans_demo",
            "--matrix",
            "0,-1,1,0",
            "--hide-original",
            "--singular-vectors",
        ]);
        let state = initial_state(&args).unwrap();
        assert_eq!(state.matrix, Mat2::new(0.0, -1.0, 1.0, 0.0));
        assert!(!state.show_original);
        assert!(state.show_transformed);
        assert!(!state.show_eigenvectors);
        assert!(state.show_singular_vectors);
    }

    #[test]
    fn state_round_trips_through_json() {
        let dir = std::env::temp_dir().join(format!("lintrans_demo_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.json");

        let mut state = ViewState::default();
        state.set_matrix(Mat2::new(1.0, -2.0, 0.5, 3.0));
        state.show_eigenvectors = true;
        save_state(&state, &path).unwrap();
        assert_eq!(load_state(&path).unwrap(), state);

        fs::write(&path, "{\"show_original\": false}").unwrap();
        let partial = load_state(&path).unwrap();
        assert_eq!(partial.matrix, Mat2::DEFAULT);
        assert!(!partial.show_original);

        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_state(&path), Err(DemoError::Json { .. })));
        fs::remove_dir_all(&dir).unwrap();
    }
}
