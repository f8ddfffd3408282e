// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! nmv - renumber files carrying a zero-padded numeric prefix.
//!
//! Moving one file to a new ordinal shifts only the siblings that have to
//! move, soaking up free ordinals where it can, and keeps every prefix
//! padded to the same width.
//!
//! # Quick Start
//!
//! ```
//! use nmv::plan::plan;
//!
//! let files = ["0001_a.txt", "0003_b.txt"];
//! let plan = plan(files, "0001_a.txt", 2).unwrap();
//!
//! assert_eq!(plan.renames.len(), 1);
//! assert_eq!(plan.renames[0].from, "0001_a.txt");
//! assert_eq!(plan.renames[0].to, "0002_a.txt");
//! ```

pub mod dir;
pub mod elision;
pub mod error;
mod gap;
pub mod logging;
pub mod name;
pub mod plan;
pub mod sequence;

pub use error::NmvError;
pub use error::Result;
