//! ZIP container access by part name

use std::io::{Read, Seek, Write};

use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{XlsxError, XlsxResult};

/// Reads named parts out of a container
pub struct PackageReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> PackageReader<R> {
    /// Open a container; anything that is not a ZIP archive is rejected
    pub fn open(reader: R) -> XlsxResult<Self> {
        let archive = match ZipArchive::new(reader) {
            Ok(archive) => archive,
            Err(ZipError::InvalidArchive(reason)) => {
                return Err(XlsxError::NotAContainer(format!(
                    "not a ZIP archive ({})",
                    reason
                )))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { archive })
    }

    /// Whether the container has an entry with this name
    pub fn contains(&self, name: &str) -> bool {
        self.archive.file_names().any(|n| n == name)
    }

    /// Uncompressed size of an entry
    pub fn size(&mut self, name: &str) -> Option<u64> {
        self.archive.by_name(name).ok().map(|file| file.size())
    }

    /// Read a required entry
    pub fn read_part(&mut self, name: &str) -> XlsxResult<Vec<u8>> {
        self.read_optional_part(name)?
            .ok_or_else(|| XlsxError::MissingPart(name.to_string()))
    }

    /// Read an entry that may be absent
    pub fn read_optional_part(&mut self, name: &str) -> XlsxResult<Option<Vec<u8>>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        log::debug!("read part {} ({} bytes)", name, bytes.len());
        Ok(Some(bytes))
    }
}

/// Writes named parts into a new container
pub struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    compression: CompressionMethod,
}

impl<W: Write + Seek> PackageWriter<W> {
    /// Start a container; every entry uses `compression`
    pub fn create(writer: W, compression: CompressionMethod) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            compression,
        }
    }

    /// Add an entry
    pub fn write_part(&mut self, name: &str, bytes: &[u8]) -> XlsxResult<()> {
        let options = SimpleFileOptions::default().compression_method(self.compression);
        self.zip.start_file(name, options)?;
        self.zip.write_all(bytes)?;
        log::debug!("wrote part {} ({} bytes)", name, bytes.len());
        Ok(())
    }

    /// Write the central directory and hand back the underlying writer
    pub fn finish(self) -> XlsxResult<W> {
        Ok(self.zip.finish()?)
    }
}
