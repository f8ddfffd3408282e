// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Error type for planning and applying numeric moves.
//!
//! Library code returns `NmvError`; the binary wraps it in `anyhow` for
//! context. Two kinds are recoverable:
//!
//! - **NotPrefixed**: a directory entry without a numeric prefix, skipped.
//! - **UnsafeRenameOrder**: the plan cannot be applied in sequence and must
//!   be staged through temporary names.
//!
//! Everything else aborts before the filesystem is touched.

use std::fmt;
use std::path::PathBuf;

/// Errors raised by the name codec, the planner and the I/O collaborators.
#[derive(Debug)]
pub enum NmvError {
    /// The file name does not start with an ASCII digit.
    NotPrefixed { name: String },

    /// A numeric prefix or requested ordinal does not fit in a `u64`.
    OrdinalOverflow { text: String },

    /// The requested ordinal is not a decimal number.
    InvalidOrdinal { text: String },

    /// The file to move is not among the discovered items.
    TargetNotFound { name: String },

    /// There are no prefixed files to renumber.
    EmptyDirectory,

    /// The renames cannot be applied one after another without clobbering
    /// a source that has not moved yet.
    UnsafeRenameOrder { pending: usize },

    /// A rename destination is already taken on disk.
    DestinationExists { path: PathBuf },

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: std::io::Error,
    },
}

impl NmvError {
    /// True for errors the caller is expected to handle and carry on from.
    pub fn is_recoverable(&self) -> bool {
        return matches!(
            self,
            NmvError::NotPrefixed { .. } | NmvError::UnsafeRenameOrder { .. }
        );
    }

    pub(crate) fn io(
        path: impl Into<PathBuf>,
        operation: &'static str,
        source: std::io::Error,
    ) -> NmvError {
        return NmvError::Io {
            path: path.into(),
            operation,
            source,
        };
    }
}

impl fmt::Display for NmvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NmvError::NotPrefixed { name } => {
                write!(f, "'{}' is not in numeric prefix format", name)
            }
            NmvError::OrdinalOverflow { text } => {
                write!(f, "numeric prefix '{}' does not fit in 64 bits", text)
            }
            NmvError::InvalidOrdinal { text } => {
                write!(f, "'{}' is not a non-negative decimal ordinal", text)
            }
            NmvError::TargetNotFound { name } => {
                write!(f, "'{}' is not a prefixed file in the target directory", name)
            }
            NmvError::EmptyDirectory => {
                write!(f, "no numerically prefixed files to renumber")
            }
            NmvError::UnsafeRenameOrder { pending } => {
                write!(
                    f,
                    "no safe sequential order exists, {} renames form a cycle",
                    pending
                )
            }
            NmvError::DestinationExists { path } => {
                write!(f, "refusing to overwrite '{}'", path.display())
            }
            NmvError::Io {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "I/O error during {} on '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for NmvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NmvError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, NmvError>;
