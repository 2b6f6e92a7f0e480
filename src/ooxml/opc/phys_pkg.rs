//! Physical (ZIP) container of an OPC package.
//!
//! The reader inflates every member up front; presentation packages are
//! small and every part is needed anyway once the relationship graph is
//! walked. The total inflated size is capped at [`MAX_PACKAGE_SIZE`], and
//! sizes claimed by member headers are never used to allocate.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Upper bound on the inflated size of all members of a package.
pub const MAX_PACKAGE_SIZE: u64 = 512 * 1024 * 1024;

/// Largest allocation made up front for one member.
const MEMBER_CAPACITY_HINT: u64 = 1 << 20;

/// All members of a ZIP package, keyed by member name.
#[derive(Debug)]
pub struct PhysPkgReader {
    members: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Open a package file. A missing file is [`OpcError::PackageNotFound`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with_limit(data, MAX_PACKAGE_SIZE)
    }

    /// Read a package whose members inflate to at most `limit` bytes in
    /// total. Exceeding it is [`OpcError::PackageTooLarge`], whether the
    /// member headers admit it or the inflated data does.
    pub fn from_bytes_with_limit(data: Vec<u8>, limit: u64) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut members = HashMap::with_capacity(archive.len());
        let mut remaining = limit;

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            if file.size() > remaining {
                return Err(OpcError::PackageTooLarge { member: name, limit });
            }

            let mut blob = Vec::with_capacity(file.size().min(MEMBER_CAPACITY_HINT) as usize);
            let read = (&mut file).take(remaining + 1).read_to_end(&mut blob)? as u64;
            if read > remaining {
                return Err(OpcError::PackageTooLarge { member: name, limit });
            }
            remaining -= read;
            members.insert(name, blob);
        }

        Ok(Self { members })
    }

    /// `[Content_Types].xml`, required in every package.
    pub fn content_types_xml(&self) -> Result<&[u8]> {
        self.members
            .get(CONTENT_TYPES_URI.trim_start_matches('/'))
            .map(Vec::as_slice)
            .ok_or_else(|| OpcError::PartNotFound("[Content_Types].xml".to_string()))
    }

    /// The `.rels` content for `source_uri`, if the source has any.
    pub fn rels_xml_for(&self, source_uri: &PackURI) -> Result<Option<&[u8]>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        Ok(self.members.get(rels_uri.membername()).map(Vec::as_slice))
    }

    /// Move a member's bytes out of the reader.
    pub fn take_blob(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        self.members
            .remove(pack_uri.membername())
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    #[inline]
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.members.contains_key(pack_uri.membername())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Deflating ZIP writer producing a package in memory.
pub struct PhysPkgWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }

    /// Write one member under the membername of `pack_uri`.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.zip.start_file(pack_uri.membername(), self.options)?;
        self.zip.write_all(blob)?;
        Ok(())
    }

    /// Finish the central directory and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_members() {
        let mut writer = PhysPkgWriter::new();
        let ct = PackURI::new(CONTENT_TYPES_URI).unwrap();
        let pres = PackURI::new("/ppt/presentation.xml").unwrap();
        writer.write(&ct, b"<Types/>").unwrap();
        writer.write(&pres, b"<p:presentation/>").unwrap();
        let bytes = writer.finish().unwrap();

        let mut reader = PhysPkgReader::from_bytes(bytes).unwrap();
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.content_types_xml().unwrap(), b"<Types/>");
        assert!(reader.contains(&pres));
        assert_eq!(reader.take_blob(&pres).unwrap(), b"<p:presentation/>");
        assert!(!reader.contains(&pres));
    }

    /// Stored (uncompressed) single-member archive.
    fn stored_package(blob: &[u8]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(blob).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_inflated_size_over_limit() {
        let bytes = stored_package(b"<Types>0123456789</Types>");
        assert!(matches!(
            PhysPkgReader::from_bytes_with_limit(bytes.clone(), 8),
            Err(OpcError::PackageTooLarge { limit: 8, .. })
        ));
        assert_eq!(PhysPkgReader::from_bytes_with_limit(bytes, 64).unwrap().len(), 1);
    }

    #[test]
    fn test_huge_claimed_size_is_an_error() {
        let mut bytes = stored_package(b"<Types/>");
        // uncompressed size field of the central directory entry
        let central = memchr::memmem::rfind(&bytes, b"PK\x01\x02").unwrap();
        bytes[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

        let result = PhysPkgReader::from_bytes(bytes);
        assert!(matches!(
            result,
            Err(OpcError::PackageTooLarge { .. }) | Err(OpcError::ZipError(_)) | Err(OpcError::IoError(_))
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            PhysPkgReader::from_bytes(b"plain text, not a package".to_vec()),
            Err(OpcError::ZipError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            PhysPkgReader::open("/definitely/not/here.pptx"),
            Err(OpcError::PackageNotFound(_))
        ));
    }
}
