//! Types for reading DAT archives
//!

use byteorder::{LittleEndian, ReadBytesExt};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, FileNotFoundError, Result};
use crate::types::{EntryPath, CODE_UNIT_BYTES, FIELD_BYTES};

/// A view of one entry inside a [`DatArchive`].
///
/// Implements [`Read`] over the entry's payload so callers can stream it out with
/// [`std::io::copy`].
#[derive(Debug)]
pub struct DatFile<'a> {
    path: &'a EntryPath,
    payload: &'a [u8],
}

impl<'a> DatFile<'a> {
    /// Get the archive path of the entry
    pub fn path(&self) -> &EntryPath {
        self.path
    }

    /// Get the size of the entry's payload, in bytes
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Get the entry's payload
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

impl Read for DatFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.payload.read(buf)
    }
}

/// DAT archive reader
///
/// Parses a whole archive into memory up front; entries keep the order they have in the
/// file.
///
/// ```no_run
/// use std::io::{Read, Seek};
///
/// fn list_dat_contents(reader: impl Read + Seek) -> ftl_dat::error::Result<()> {
///     let dat = ftl_dat::DatArchive::new(reader)?;
///
///     for i in 0..dat.len() {
///         let mut file = dat.by_index(i)?;
///         println!("Filename: {}", file.path());
///         std::io::copy(&mut file, &mut std::io::stdout())?;
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DatArchive {
    entries: IndexMap<EntryPath, Vec<u8>>,
}

impl DatArchive {
    /// Read a DAT archive, collecting the files it contains.
    pub fn new<R: Read + Seek>(mut reader: R) -> Result<DatArchive> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        let mut remaining = len;

        claim(&mut remaining, FIELD_BYTES)?;
        let count = reader.read_u32::<LittleEndian>()?;

        // The whole length table must be present before any of it is trusted.
        claim(&mut remaining, u64::from(count) * FIELD_BYTES)?;
        let mut path_lengths = Vec::with_capacity(count as usize);
        for _ in 0..count {
            path_lengths.push(reader.read_u32::<LittleEndian>()?);
        }

        // The text section is one contiguous block sized by the sum of the table.
        let text_bytes: u128 = path_lengths
            .iter()
            .map(|units| u128::from(*units) * u128::from(CODE_UNIT_BYTES))
            .sum();
        claim_wide(&mut remaining, text_bytes)?;
        let mut text = vec![0u8; text_bytes as usize];
        reader.read_exact(&mut text)?;

        let mut paths = Vec::with_capacity(count as usize);
        let mut offset = 0usize;
        for units in &path_lengths {
            let end = offset + *units as usize * CODE_UNIT_BYTES as usize;
            let units: Vec<u16> = text[offset..end]
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            offset = end;

            paths.push(String::from_utf16(&units)?.parse::<EntryPath>()?);
        }

        claim(&mut remaining, u64::from(count) * FIELD_BYTES)?;
        let mut data_sizes = Vec::with_capacity(count as usize);
        for _ in 0..count {
            data_sizes.push(reader.read_u32::<LittleEndian>()?);
        }

        let blob_bytes: u128 = data_sizes.iter().map(|size| u128::from(*size)).sum();
        claim_wide(&mut remaining, blob_bytes)?;
        let mut blob = vec![0u8; blob_bytes as usize];
        reader.read_exact(&mut blob)?;

        let mut entries = IndexMap::with_capacity(count as usize);
        let mut offset = 0usize;
        for (path, size) in paths.into_iter().zip(data_sizes) {
            let end = offset + size as usize;
            let payload = blob[offset..end].to_vec();
            offset = end;

            match entries.entry(path) {
                Entry::Occupied(occupied) => {
                    return Err(Error::DuplicatePath(occupied.key().to_string()));
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(payload);
                }
            }
        }

        Ok(DatArchive { entries })
    }

    /// Number of entries contained in this archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entry paths in this archive, in file order.
    pub fn entry_paths(&self) -> impl Iterator<Item = &EntryPath> {
        self.entries.keys()
    }

    /// Total size of the payloads in the archive, if it can be known.
    pub fn total_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for payload in self.entries.values() {
            total = total.checked_add(payload.len() as u128)?;
        }
        Some(total)
    }

    /// Search for an entry by its serialized path
    pub fn by_name(&self, name: &str) -> Result<DatFile<'_>> {
        let path: EntryPath = name.parse()?;
        let Some((path, payload)) = self.entries.get_key_value(&path) else {
            return Err(Error::FileNotFound(FileNotFoundError::Name(
                name.to_owned(),
            )));
        };

        Ok(DatFile { path, payload })
    }

    /// Get a contained entry by index
    pub fn by_index(&self, file_number: usize) -> Result<DatFile<'_>> {
        let (path, payload) = self
            .entries
            .get_index(file_number)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))?;

        Ok(DatFile { path, payload })
    }
}

fn claim(remaining: &mut u64, needed: u64) -> Result<()> {
    if needed > *remaining {
        return Err(Error::Truncated {
            needed: needed - *remaining,
            remaining: *remaining,
        });
    }
    *remaining -= needed;
    Ok(())
}

fn claim_wide(remaining: &mut u64, needed: u128) -> Result<()> {
    let needed = u64::try_from(needed).unwrap_or(u64::MAX);
    claim(remaining, needed)
}
