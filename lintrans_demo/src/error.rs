// Copyright 2025 the Lintrans Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can stop the demo, or reject one session line.
#[derive(Debug)]
pub(crate) enum DemoError {
    /// Reading or writing a file failed.
    Io { path: PathBuf, source: io::Error },
    /// Reading the edit session from stdin failed.
    Stdin(io::Error),
    /// A state file did not hold a valid view state.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A session line could not be understood.
    Command(String),
}

impl DemoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Whether a session can continue after reporting this error.
    pub(crate) fn is_recoverable(&self) -> bool {
        matches!(self, Self::Command(_))
    }
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Stdin(source) => write!(f, "reading stdin: {source}"),
            Self::Json { path, source } => {
                write!(f, "{}: invalid state file: {source}", path.display())
            }
            Self::Command(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Stdin(source) => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Command(_) => None,
        }
    }
}
