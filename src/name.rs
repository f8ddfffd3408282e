// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Name codec for numerically prefixed file names.
//!
//! A prefixed name is a run of ASCII digits followed by anything at all:
//!
//! ```text
//! 0050_name.txt
//! ^^^^          ordinal 50, width 4
//!     ^^^^^^^^^ unprefixed name "_name.txt"
//! ```
//!
//! Rendering pads the ordinal with zeros up to the width and never
//! truncates, so `parse(render(o, w, n))` yields width `max(w, digits(o))`.

use std::path::Path;
use std::path::PathBuf;

use crate::error::NmvError;
use crate::error::Result;

/// A file name split into its numeric prefix and the rest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixedName {
    /// Value of the digit run.
    pub ordinal: u64,
    /// Number of digits in the run, leading zeros included.
    pub width: u32,
    /// Everything after the digit run.
    pub name: String,
}

impl PrefixedName {
    /// Render back into a file name at this name's own width.
    pub fn file_name(&self) -> String {
        return render(self.ordinal, self.width, &self.name);
    }
}

/// Split a file name into ordinal, width and unprefixed name.
///
/// Returns `NotPrefixed` when the name does not begin with a digit, and
/// `OrdinalOverflow` when the digit run does not fit in a `u64`.
pub fn parse(file_name: &str) -> Result<PrefixedName> {
    let split = file_name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(file_name.len());

    if split == 0 {
        return Err(NmvError::NotPrefixed {
            name: file_name.to_string(),
        });
    }

    let (digits_str, rest) = file_name.split_at(split);
    let ordinal = digits_str
        .parse::<u64>()
        .map_err(|_| NmvError::OrdinalOverflow {
            text: digits_str.to_string(),
        })?;

    return Ok(PrefixedName {
        ordinal,
        width: split as u32,
        name: rest.to_string(),
    });
}

/// Render an ordinal, zero padded up to `width`, followed by `name`.
pub fn render(ordinal: u64, width: u32, name: &str) -> String {
    return format!("{:0width$}{}", ordinal, name, width = width as usize);
}

/// Number of decimal digits needed to write `ordinal`.
pub fn digits(ordinal: u64) -> u32 {
    return ordinal.checked_ilog10().map_or(1, |log| log + 1);
}

/// Parse a requested ordinal given as decimal text.
pub fn parse_ordinal(text: &str) -> Result<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NmvError::InvalidOrdinal {
            text: text.to_string(),
        });
    }
    return text.parse::<u64>().map_err(|_| NmvError::OrdinalOverflow {
        text: text.to_string(),
    });
}

/// A prefixed file located in a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixedFile {
    pub directory: PathBuf,
    pub name: String,
    pub ordinal: u64,
    pub width: u32,
}

impl PrefixedFile {
    /// Parse a path whose final component is a prefixed name.
    pub fn from_path(path: &Path) -> Result<PrefixedFile> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parsed = parse(&file_name)?;
        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        return Ok(PrefixedFile {
            directory,
            name: parsed.name,
            ordinal: parsed.ordinal,
            width: parsed.width,
        });
    }

    /// The prefixed file name, assuming `width` is wide enough.
    pub fn file_name(&self) -> String {
        return render(self.ordinal, self.width, &self.name);
    }

    /// Full path of the file.
    pub fn path(&self) -> PathBuf {
        return self.directory.join(self.file_name());
    }
}
