//! Diagnostic reporting for the whole pipeline.
//!
//! Parsing, loading, analysis and generation never abort on a bad input
//! file: they record a [`Diagnostic`] in a [`Reporter`] and move on. The
//! driver polls [`Reporter::has_errors`] between phases and decides the
//! exit status. The reporter is the only channel for structured error
//! output; `tracing` carries progress and debug messages only.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Classification of an error diagnostic.
///
/// Every error is non-fatal at the site of detection; the offending
/// artifact is skipped or left partial and processing continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Malformed section header, list line, or key/value separator.
    #[error("lexical")]
    Lexical,
    /// Missing required section or header; empty section body.
    #[error("structural")]
    Structural,
    /// Unknown metadata key, missing required metadata, name mismatch,
    /// duplicate key, unknown entity kind in a reference.
    #[error("schema")]
    Schema,
    /// Dangling fully-qualified-name reference, range/type mismatch,
    /// external restriction against an unknown property.
    #[error("reference")]
    Reference,
    /// Inheritance cycle among classes.
    #[error("cycle")]
    Cycle,
    /// Key collision during JSON-LD context synthesis.
    #[error("duplicate context key")]
    DuplicateContextKey,
    /// File read or write failure.
    #[error("i/o")]
    Io,
}

/// Where a diagnostic was detected: an input or output file, with a
/// 1-based line number when one is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    pub file: PathBuf,
    pub line: Option<u32>,
}

impl Origin {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: path.into(),
            line: None,
        }
    }

    pub fn line(path: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: path.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.file.display()),
            None => write!(f, "{}", self.file.display()),
        }
    }
}

/// A single reported message.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Set for errors; `None` for warnings and infos.
    pub kind: Option<ErrorKind>,
    pub message: String,
    pub origin: Option<Origin>,
}

impl Diagnostic {
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind: Some(kind),
            message: message.into(),
            origin: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: None,
            message: message.into(),
            origin: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            kind: None,
            message: message.into(),
            origin: None,
        }
    }

    /// Attach the file (and optionally line) the diagnostic refers to.
    pub fn at(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(kind) = self.kind {
            write!(f, " [{kind}]")?;
        }
        if let Some(origin) = &self.origin {
            write!(f, " {origin}")?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// REPORTER
// ============================================================================

/// Collects diagnostics and counts them per severity.
///
/// Mirrors the counting log handler of the reference tooling: emitting a
/// record is also counted, so the driver can ask "did anything go wrong"
/// without re-scanning the record list.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
    errors: usize,
    warnings: usize,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. Errors and warnings are also surfaced through
    /// `tracing` so interactive runs see them as they happen.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                self.errors += 1;
                tracing::error!("{diagnostic}");
            }
            Severity::Warning => {
                self.warnings += 1;
                tracing::warn!("{diagnostic}");
            }
            Severity::Info => tracing::info!("{diagnostic}"),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Shorthand for an error without a file origin.
    pub fn error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.report(Diagnostic::error(kind, message));
    }

    /// Shorthand for an error located in `file`.
    pub fn error_in(&mut self, kind: ErrorKind, file: &Path, message: impl Into<String>) {
        self.report(Diagnostic::error(kind, message).at(Origin::file(file)));
    }

    /// Shorthand for an error located at `file:line`.
    pub fn error_at(&mut self, kind: ErrorKind, file: &Path, line: u32, message: impl Into<String>) {
        self.report(Diagnostic::error(kind, message).at(Origin::line(file, line)));
    }

    /// Shorthand for a warning without a file origin.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.report(Diagnostic::warning(message));
    }

    /// Shorthand for a warning located in `file`.
    pub fn warning_in(&mut self, file: &Path, message: impl Into<String>) {
        self.report(Diagnostic::warning(message).at(Origin::file(file)));
    }

    /// True once any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// All recorded diagnostics, in reporting order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Errors of a given kind, in reporting order.
    pub fn errors_of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.kind == Some(kind))
    }
}
