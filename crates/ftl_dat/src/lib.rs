//! This library handles reading from and creating **DAT** resource archives used by *FTL: Faster Than Light*.
//!
//! # DAT Archive Format Documentation
//!
//! This crate provides utilities to read and extract data from the **DAT** archive format used by
//! the game *FTL: Faster Than Light*. The DAT format is a custom binary format that bundles the
//! game's resource tree within a single file. DAT files are typically identified with the `.dat`
//! extension.
//!
//! ## File Structure
//!
//! A DAT file consists of an entry count, followed by a path-length table, a path-text block,
//! a data-size table, and the concatenated entry payloads. There is no magic number and no
//! per-entry framing; every table is a flat block sized by the entry count.
//!
//! | Offset (bytes) | Field            | Description                                                  |
//! |----------------|------------------|--------------------------------------------------------------|
//! | 0x0000         | Entry Count      | 4 bytes: Number of entries in the archive (N)                |
//! | 0x0004         | Path Lengths     | N × 4 bytes: Length of each entry's path, in UTF-16 code units |
//! | variable       | Path Text        | Each entry's path, UTF-16 (little-endian), back to back      |
//! | variable       | Data Sizes       | N × 4 bytes: Byte length of each entry's payload             |
//! | variable       | Data             | Each entry's payload bytes, back to back                     |
//!
//! ### Entry Count
//!
//! A 4-byte unsigned integer giving the number of entries. An archive with zero entries is
//! exactly these 4 bytes and nothing else.
//!
//! ### Path Tables
//!
//! The path-length table holds one 4-byte unsigned integer per entry, counting the UTF-16
//! code units of that entry's path (not bytes, not characters). The path-text block that
//! follows holds the path strings themselves, encoded as UTF-16 little-endian and
//! concatenated in entry order; the i-th path occupies `path_length[i] * 2` bytes. Paths use
//! `/` as their segment separator regardless of the host platform.
//!
//! ### Data Tables
//!
//! The data-size table holds one 4-byte unsigned integer per entry, giving the byte length of
//! that entry's payload. The payloads follow, concatenated in entry order with no padding or
//! alignment; the i-th payload occupies `data_size[i]` bytes. Payloads are stored verbatim.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.dat`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Path Encoding**: UTF-16 (little-endian), lengths measured in 16-bit code units
//!

pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use read::DatArchive;
pub use types::EntryPath;
pub use write::DatWriter;
