//! Types for writing DAT archives
//!

use byteorder::{LittleEndian, WriteBytesExt};
use indexmap::IndexSet;
use std::io::{self, Cursor, Write};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::read::DatArchive;
use crate::types::EntryPath;

/// DAT archive generator
///
/// Entry payloads stream into an in-memory data block while the path tables accumulate
/// alongside; the archive's flat table layout is only emitted once [`DatWriter::finish`]
/// runs, in the order the format dictates.
///
/// ```
/// # fn doit() -> ftl_dat::error::Result<()>
/// # {
/// # use ftl_dat::DatWriter;
/// use std::io::Write;
///
/// // We use a buffer here, though you'd normally use a `File`
/// let mut dat = DatWriter::new(std::io::Cursor::new(Vec::new()));
///
/// dat.start_file("hello_world.txt".parse()?)?;
/// dat.write_all(b"Hello, World!")?;
///
/// // Apply the changes you've made.
/// dat.finish()?;
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct DatWriter<W: Write> {
    inner: W,
    writing_to_file: bool,
    paths: IndexSet<EntryPath>,
    path_lengths: Vec<u32>,
    path_block: Cursor<Vec<u8>>,
    data_sizes: Vec<u32>,
    data_block: Cursor<Vec<u8>>,
    current_size: u64,
}

impl<W: Write> DatWriter<W> {
    /// Initializes the archive.
    ///
    /// Before writing to this object, the [`DatWriter::start_file`] function should be
    /// called.
    pub fn new(inner: W) -> DatWriter<W> {
        DatWriter {
            inner,
            writing_to_file: false,
            paths: IndexSet::new(),
            path_lengths: Vec::new(),
            path_block: Cursor::new(Vec::new()),
            data_sizes: Vec::new(),
            data_block: Cursor::new(Vec::new()),
            current_size: 0,
        }
    }

    /// Returns true if an entry is currently open for writing.
    pub const fn is_writing_file(&self) -> bool {
        self.writing_to_file
    }

    /// Start a new entry at the given archive path.
    #[instrument(skip(self), err)]
    pub fn start_file(&mut self, path: EntryPath) -> Result<()> {
        if self.writing_to_file {
            self.finish_file()?;
        }

        if !self.paths.insert(path.clone()) {
            return Err(Error::DuplicatePath(path.to_string()));
        }

        let units = path.to_code_units();
        // The consuming engine reads path lengths as signed 32-bit counts.
        if units.len() > i32::MAX as usize {
            return Err(Error::SizeOverflow {
                field: "path length",
            });
        }

        self.path_lengths.push(units.len() as u32);
        for unit in units {
            self.path_block.write_u16::<LittleEndian>(unit)?;
        }

        self.current_size = 0;
        self.writing_to_file = true;

        Ok(())
    }

    #[instrument(skip(self), err)]
    fn finish_file(&mut self) -> Result<()> {
        if self.current_size > u64::from(u32::MAX) {
            return Err(Error::SizeOverflow { field: "data size" });
        }

        self.data_sizes.push(self.current_size as u32);
        self.writing_to_file = false;

        Ok(())
    }

    /// Finish the last entry and write the archive's tables and payloads
    ///
    /// This will return the writer, but one should normally not append any data to the end
    /// of the file.
    #[instrument(skip(self), err)]
    pub fn finish(mut self) -> Result<W> {
        if self.writing_to_file {
            self.finish_file()?;
        }

        if self.path_lengths.len() > u32::MAX as usize {
            return Err(Error::SizeOverflow {
                field: "entry count",
            });
        }

        self.inner
            .write_u32::<LittleEndian>(self.path_lengths.len() as u32)?;
        for units in &self.path_lengths {
            self.inner.write_u32::<LittleEndian>(*units)?;
        }
        self.inner.write_all(self.path_block.get_ref())?;
        for size in &self.data_sizes {
            self.inner.write_u32::<LittleEndian>(*size)?;
        }
        self.inner.write_all(self.data_block.get_ref())?;

        Ok(self.inner)
    }
}

impl<W: Write> Write for DatWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.writing_to_file {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "No entry has been started",
            ));
        }

        let written = self.data_block.write(buf)?;
        self.current_size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl DatArchive {
    /// Re-encode this archive, preserving entry order, into the given writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<W> {
        let mut dat = DatWriter::new(writer);
        for i in 0..self.len() {
            let file = self.by_index(i)?;
            dat.start_file(file.path().clone())?;
            dat.write_all(file.payload())?;
        }
        dat.finish()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_str_eq;
    use tracing_test::traced_test;

    use crate::error::{Error, Result};
    use crate::write::DatWriter;
    use std::io::{Cursor, Write};

    #[traced_test]
    #[test]
    fn dat_empty_write() -> Result<()> {
        let expected = vec![
            // Entry Count
            0x00, 0x00, 0x00, 0x00,
        ];

        let writer = DatWriter::new(Cursor::new(Vec::new()));
        let result = writer.finish()?;
        assert_eq!(result.get_ref().len(), expected.len());
        assert_str_eq!(
            format!("{:02X?}", *result.get_ref()),
            format!("{:02X?}", expected)
        );

        Ok(())
    }

    #[traced_test]
    #[test]
    fn dat_write_without_data() -> Result<()> {
        #[rustfmt::skip]
        let expected = [
            // Entry Count
            0x01, 0x00, 0x00, 0x00,
            // Path Lengths
            0x09, 0x00, 0x00, 0x00,
            // Path Text "hello.txt"
            0x68, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F, 0x00,
            0x2E, 0x00, 0x74, 0x00, 0x78, 0x00, 0x74, 0x00,
            // Data Sizes
            0x00, 0x00, 0x00, 0x00,
        ];

        let mut writer = DatWriter::new(Cursor::new(Vec::new()));
        writer.start_file("hello.txt".parse()?)?;

        let result = writer.finish()?;
        assert_eq!(result.get_ref().len(), expected.len());
        assert_str_eq!(
            format!("{:02X?}", *result.get_ref()),
            format!("{:02X?}", expected)
        );

        Ok(())
    }

    #[test]
    fn dat_write_nested_and_empty_entries() -> Result<()> {
        #[rustfmt::skip]
        let expected = [
            // Entry Count
            0x02, 0x00, 0x00, 0x00,
            // Path Lengths
            0x07, 0x00, 0x00, 0x00,
            0x05, 0x00, 0x00, 0x00,
            // Path Text "a/b.txt"
            0x61, 0x00, 0x2F, 0x00, 0x62, 0x00, 0x2E, 0x00, 0x74, 0x00,
            0x78, 0x00, 0x74, 0x00,
            // Path Text "c.txt"
            0x63, 0x00, 0x2E, 0x00, 0x74, 0x00, 0x78, 0x00, 0x74, 0x00,
            // Data Sizes
            0x02, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            // Data "hi"
            0x68, 0x69,
        ];

        let mut writer = DatWriter::new(Cursor::new(Vec::new()));
        writer.start_file("a/b.txt".parse()?)?;
        writer.write_all(b"hi")?;

        writer.start_file("c.txt".parse()?)?;

        let result = writer.finish()?;
        assert_eq!(result.get_ref().len(), expected.len());
        assert_str_eq!(
            format!("{:02X?}", *result.get_ref()),
            format!("{:02X?}", expected)
        );

        let archive = crate::read::DatArchive::new(Cursor::new(expected))?;
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0)?.path().to_string(), "a/b.txt");
        assert_eq!(archive.by_index(0)?.payload(), b"hi");
        assert_eq!(archive.by_index(1)?.path().to_string(), "c.txt");
        assert_eq!(archive.by_index(1)?.payload(), b"");

        Ok(())
    }

    #[test]
    fn dat_write_multiple_entries_with_data() -> Result<()> {
        #[rustfmt::skip]
        let expected = [
            // Entry Count
            0x02, 0x00, 0x00, 0x00,
            // Path Lengths
            0x09, 0x00, 0x00, 0x00,
            0x09, 0x00, 0x00, 0x00,
            // Path Text "hello.txt"
            0x68, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F, 0x00,
            0x2E, 0x00, 0x74, 0x00, 0x78, 0x00, 0x74, 0x00,
            // Path Text "world.txt"
            0x77, 0x00, 0x6F, 0x00, 0x72, 0x00, 0x6C, 0x00, 0x64, 0x00,
            0x2E, 0x00, 0x74, 0x00, 0x78, 0x00, 0x74, 0x00,
            // Data Sizes
            0x0B, 0x00, 0x00, 0x00,
            0x0B, 0x00, 0x00, 0x00,
            // Data "Hello World"
            0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x20, 0x57, 0x6F, 0x72, 0x6C, 0x64,
            // Data "World Hello"
            0x57, 0x6F, 0x72, 0x6C, 0x64, 0x20, 0x48, 0x65, 0x6C, 0x6C, 0x6F,
        ];

        let mut writer = DatWriter::new(Cursor::new(Vec::new()));
        writer.start_file("hello.txt".parse()?)?;
        writer.write_all(b"Hello World")?;

        writer.start_file("world.txt".parse()?)?;
        writer.write_all(b"World Hello")?;

        let result = writer.finish()?;
        assert_eq!(result.get_ref().len(), expected.len());
        assert_str_eq!(
            format!("{:02X?}", *result.get_ref()),
            format!("{:02X?}", expected)
        );

        Ok(())
    }

    #[test]
    fn dat_write_duplicate_path() -> Result<()> {
        let mut writer = DatWriter::new(Cursor::new(Vec::new()));
        writer.start_file("hello.txt".parse()?)?;

        assert!(matches!(
            writer.start_file("hello.txt".parse()?),
            Err(Error::DuplicatePath(_))
        ));

        Ok(())
    }

    #[test]
    fn dat_write_before_start() {
        let mut writer = DatWriter::new(Cursor::new(Vec::new()));
        assert!(writer.write_all(b"too early").is_err());
    }
}
