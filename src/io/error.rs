//! Error taxonomy shared by the library and the command line

use std::fmt;
use std::path::PathBuf;

/// Every failure a stereogram run can report
///
/// No variant is produced after a row has been written: generation either
/// returns a complete grid or one of these.
#[derive(Debug)]
pub enum StereogramError {
    /// Configuration validation failed before any row was processed
    Config {
        /// Setting that was rejected
        parameter: &'static str,
        /// Rejected value, rendered for display
        value: String,
        /// Constraint the value violates
        reason: String,
    },

    /// Depth sample outside `[0, 1]` while clamping is disabled
    InvalidDepth {
        /// Output row that requested the sample
        row: usize,
        /// Output column that requested the sample
        col: usize,
        /// The offending sample value
        value: f64,
    },

    /// Depth sampler queried outside the output grid
    ///
    /// This is a caller bug in the surrounding adapter, not a data problem.
    OutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Output grid height
        height: usize,
        /// Output grid width
        width: usize,
    },

    /// Character in a text depth file that encodes no elevation
    DepthCharacter {
        /// 1-based line number
        line: usize,
        /// 1-based column number
        column: usize,
        /// The unrecognised character
        character: char,
    },

    /// Depth or grid data with an unusable shape
    InvalidSourceData {
        /// What is wrong with the data
        reason: String,
    },

    /// Depth image that could not be opened or decoded
    ImageLoad {
        /// Image that failed
        path: PathBuf,
        /// Decoder failure
        source: image::ImageError,
    },

    /// Reading or writing a file or directory failed
    FileSystem {
        /// File or directory involved
        path: PathBuf,
        /// Short name of the failed step, e.g. `read depth file`
        operation: &'static str,
        /// I/O failure
        source: std::io::Error,
    },

    /// Internal invariant violated during computation
    Computation {
        /// Stage that detected the violation
        operation: &'static str,
        /// Violated invariant
        reason: String,
    },
}

impl fmt::Display for StereogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid configuration '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidDepth { row, col, value } => {
                write!(
                    f,
                    "Depth value {value} at row {row}, column {col} is outside [0, 1]"
                )
            }
            Self::OutOfRange {
                row,
                col,
                height,
                width,
            } => {
                write!(
                    f,
                    "Depth requested at ({row}, {col}) outside the {width}x{height} grid"
                )
            }
            Self::DepthCharacter {
                line,
                column,
                character,
            } => {
                write!(
                    f,
                    "Invalid depth character '{character}' at line {line}, column {column}"
                )
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Unusable depth data: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot decode depth image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "Cannot {operation} '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Internal error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for StereogramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl StereogramError {
    /// Whether this error was raised by configuration validation
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result of any fallible stereogram operation
pub type Result<T> = std::result::Result<T, StereogramError>;

impl From<image::ImageError> for StereogramError {
    fn from(source: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::new(),
            source,
        }
    }
}

// Bare `?` on I/O results inside directory walks; callers that know the
// path build `FileSystem` themselves.
impl From<std::io::Error> for StereogramError {
    fn from(source: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::new(),
            operation: "access",
            source,
        }
    }
}

/// Build a configuration error from any displayable value
pub fn config_error(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StereogramError {
    StereogramError::Config {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Build an internal-invariant error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> StereogramError {
    StereogramError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
