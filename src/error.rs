//! Error types for report parsing and path selection.

use crate::classify::State;

/// Everything that can go wrong between reading a report and
/// rendering its paths.
///
/// Parsing errors are fatal for the whole report: the input is a
/// tool-generated artifact and there is no partial recovery.
#[derive(Debug, thiserror::Error)]
pub enum StaError {
    /// A line that must carry a cell label or a numeric delay does not.
    #[error("malformed report line {line_no}: `{line}`")]
    MalformedLine {
        /// 1-based physical line number where the logical line ends.
        line_no: usize,
        /// The offending (logical) line content.
        line: String,
    },
    /// The input ended in the middle of a path.
    #[error("truncated report: input ended while expecting {state}")]
    TruncatedReport {
        /// The parser state active at end of input.
        state: State,
    },
    /// An explicitly selected path id does not exist.
    #[error("path id {id} out of range (report has {len} paths)")]
    IndexOutOfRange {
        /// The requested id.
        id: usize,
        /// Number of parsed paths.
        len: usize,
    },
    /// The report file could not be read.
    #[error("cannot read timing report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StaError>;
