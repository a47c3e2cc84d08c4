// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-oriented edit session: each stdin line is one input event.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use lintrans_imaging_svg::SvgBackend;
use lintrans_linalg::{Entry, Mat2};
use lintrans_view::{Controller, Input, Overlay, parse_entry};

use crate::error::DemoError;

const HELP: &str = "\
commands:
  a|b|c|d <value>          edit one matrix entry (non-numbers become 0)
  matrix <a> <b> <c> <d>   replace the whole matrix
  reset                    restore the default matrix
  show|hide <overlay>      overlays: original, transformed, eigenvectors, singular_vectors
  stats                    print the statistics
  save [path]              write the current frame as SVG
  help                     print this text
  quit                     end the session";

/// One parsed session line.
#[derive(Debug, PartialEq)]
pub(crate) enum Command {
    Apply(Input),
    Stats,
    Save(Option<PathBuf>),
    Help,
    Quit,
}

/// Parses one line; blank lines and `#` comments yield `None`.
pub(crate) fn parse_command(line: &str) -> Result<Option<Command>, DemoError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));

    if let Some(entry) = Entry::from_name(head) {
        return Ok(Some(Command::Apply(Input::EditEntry {
            entry,
            text: rest.to_owned(),
        })));
    }

    let command = match head.to_ascii_lowercase().as_str() {
        "matrix" => {
            let values: Vec<f64> = rest.split_whitespace().map(parse_entry).collect();
            let &[a, b, c, d] = values.as_slice() else {
                return Err(DemoError::Command(format!(
                    "`matrix` takes 4 values, got {}",
                    values.len()
                )));
            };
            Command::Apply(Input::SetMatrix(Mat2::new(a, b, c, d)))
        }
        "reset" => Command::Apply(Input::SetMatrix(Mat2::DEFAULT)),
        verb @ ("show" | "hide") => {
            let overlay = Overlay::from_name(rest)
                .ok_or_else(|| DemoError::Command(format!("unknown overlay `{rest}`")))?;
            Command::Apply(Input::Toggle {
                overlay,
                on: verb == "show",
            })
        }
        "stats" => Command::Stats,
        "save" => Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(DemoError::Command(format!("unknown command `{head}`"))),
    };
    Ok(Some(command))
}

/// Writes the controller's current frame to `path`.
pub(crate) fn write_svg(controller: &Controller<SvgBackend>, path: &Path) -> Result<(), DemoError> {
    fs::write(path, controller.backend().to_svg()).map_err(|err| DemoError::io(path, err))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Feeds `input` line by line into `controller` until EOF or `quit`.
///
/// After every applied input the statistics are printed and, when `output` is
/// set, the SVG is rewritten. Malformed lines are reported and skipped.
pub(crate) fn run_session(
    controller: &mut Controller<SvgBackend>,
    output: Option<&Path>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), DemoError> {
    let stdout_err = |err| DemoError::io("<stdout>", err);

    for line in input.lines() {
        let line = line.map_err(DemoError::Stdin)?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) if err.is_recoverable() => {
                writeln!(out, "error: {err}").map_err(stdout_err)?;
                continue;
            }
            Err(err) => return Err(err),
        };

        match command {
            Command::Apply(input) => {
                controller.apply(input);
                write!(out, "{}", controller.statistics()).map_err(stdout_err)?;
                if let Some(path) = output {
                    write_svg(controller, path)?;
                }
            }
            Command::Stats => write!(out, "{}", controller.statistics()).map_err(stdout_err)?,
            Command::Save(path) => match path.as_deref().or(output) {
                Some(path) => write_svg(controller, path)?,
                None => writeln!(out, "error: no output path").map_err(stdout_err)?,
            },
            Command::Help => writeln!(out, "{HELP}").map_err(stdout_err)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
