//! Base types for the structure of a DAT file.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use widestring::U16String;

use crate::error::{Error, Result};

/// Width in bytes of every count and length field in the archive.
pub const FIELD_BYTES: u64 = 4;

/// Width in bytes of one UTF-16 code unit in the path-text block.
pub const CODE_UNIT_BYTES: u64 = 2;

/// Separator used between path segments inside the archive, on every host platform.
pub const SEPARATOR: char = '/';

/// A platform-neutral path to an entry inside a DAT archive.
///
/// An entry path is an ordered list of non-empty segments. Segments are joined with
/// [`SEPARATOR`] when the path is serialized and split on it when parsed; the host path
/// separator never appears inside an archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath {
    segments: Vec<String>,
}

impl EntryPath {
    /// Build a path from its segments, validating each one.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(Error::InvalidPath("path has no segments".into()));
        }

        for segment in &segments {
            if segment.is_empty() {
                return Err(Error::InvalidPath(format!(
                    "empty segment in \"{}\"",
                    segments.join("/")
                )));
            }
            if segment.contains(SEPARATOR) {
                return Err(Error::InvalidPath(format!(
                    "separator inside segment \"{segment}\""
                )));
            }
        }

        Ok(EntryPath { segments })
    }

    /// The ordered segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Join the segments with the host path separator.
    ///
    /// # Warnings
    ///
    /// It is dangerous to use this path directly when extracting an archive. A segment such
    /// as `..` can break out of the target directory, and carelessly writing to the result
    /// allows a crafted archive to overwrite files outside it.
    pub fn to_native(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// The serialized form of this path as UTF-16 code units.
    pub(crate) fn to_code_units(&self) -> Vec<u16> {
        U16String::from_str(&self.to_string()).into_vec()
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromStr for EntryPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EntryPath::from_segments(s.split(SEPARATOR))
    }
}
