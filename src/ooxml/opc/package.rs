//! In-memory OPC package.
//!
//! [`OpcPackage`] owns every part and the package-level relationships. It can
//! be edited freely; [`OpcPackage::drop_unreachable_parts`] then removes
//! whatever an edit left without an incoming relationship.

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub struct OpcPackage {
    rels: Relationships,
    parts: HashMap<PackURI, Box<dyn Part>>,
}

impl OpcPackage {
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: HashMap::new(),
        }
    }

    /// Open a package file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::open(path)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::from_reader(reader)?)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::from_bytes(data)?)
    }

    fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        Self::unmarshal(PackageReader::from_phys_reader(phys_reader)?)
    }

    /// Turn serialized parts and relationships into the object graph.
    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();

        for srel in pkg_reader.take_pkg_srels() {
            let is_external = srel.is_external();
            package
                .rels
                .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
        }

        for spart in pkg_reader.take_sparts() {
            let mut part = PartFactory::load(spart.partname.clone(), spart.content_type, spart.blob)?;
            for srel in spart.srels {
                let is_external = srel.is_external();
                part.rels_mut()
                    .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
            }
            package.parts.insert(spart.partname, part);
        }

        Ok(package)
    }

    /// Serialize to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }

    /// Partname of the main document part (`officeDocument` relationship).
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let partname = self.main_document_partname()?;
        self.get_part(&partname)
    }

    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname)
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .get_mut(partname)
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Target part of relationship `r_id` of the part at `source`.
    pub fn related_part(&self, source: &PackURI, r_id: &str) -> Result<&dyn Part> {
        let rel = self
            .get_part(source)?
            .rels()
            .get(r_id)
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("{} in {}", r_id, source)))?;
        self.get_part(&rel.target_partname()?)
    }

    /// Add (or replace) a part.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        self.parts.insert(part.partname().clone(), part);
    }

    /// All parts, in no particular order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    /// Parts reachable from the package relationships, breadth-first in
    /// rId order. A relationship to a missing part is an error.
    pub fn iter_reachable_parts(&self) -> Result<Vec<&dyn Part>> {
        let mut out = Vec::with_capacity(self.parts.len());
        let mut visited: HashSet<PackURI> = HashSet::with_capacity(self.parts.len());
        let mut queue: VecDeque<PackURI> = VecDeque::new();

        for rel in self.rels.iter().filter(|r| !r.is_external()) {
            let partname = rel.target_partname()?;
            if visited.insert(partname.clone()) {
                queue.push_back(partname);
            }
        }

        while let Some(partname) = queue.pop_front() {
            let part = self.get_part(&partname)?;
            for rel in part.rels().iter().filter(|r| !r.is_external()) {
                let target = rel.target_partname()?;
                if visited.insert(target.clone()) {
                    queue.push_back(target);
                }
            }
            out.push(part);
        }

        Ok(out)
    }

    /// Remove every part no relationship chain reaches any more.
    ///
    /// Returns the removed partnames, sorted.
    pub fn drop_unreachable_parts(&mut self) -> Result<Vec<PackURI>> {
        let reachable: HashSet<PackURI> = self
            .iter_reachable_parts()?
            .into_iter()
            .map(|p| p.partname().clone())
            .collect();

        let mut dropped: Vec<PackURI> = self
            .parts
            .keys()
            .filter(|partname| !reachable.contains(*partname))
            .cloned()
            .collect();
        dropped.sort();

        for partname in &dropped {
            self.parts.remove(partname);
        }
        Ok(dropped)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// First free partname for a template with a `%d` placeholder, e.g.
    /// `/ppt/slides/slide%d.xml`.
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        for n in 1..=10_000u32 {
            let mut buf = itoa::Buffer::new();
            let candidate = PackURI::new(template.replace("%d", buf.format(n))).map_err(OpcError::InvalidPackUri)?;
            if !self.parts.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
        Err(OpcError::InvalidPackUri(format!("No free partname for {}", template)))
    }

    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as CT;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    const PRES_RELS: &str = r#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/" TargetMode="External"/>
</Relationships>"#;

    fn minimal_package() -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        let files: [(&str, &str); 6] = [
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
</Types>"#,
            ),
            (
                "_rels/.rels",
                r#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#,
            ),
            ("ppt/presentation.xml", "<p:presentation/>"),
            ("ppt/_rels/presentation.xml.rels", PRES_RELS),
            ("ppt/slides/slide1.xml", "<p:sld/>"),
            ("ppt/orphan.xml", "<orphan/>"),
        ];
        for (name, body) in files {
            writer.start_file(name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_open_walks_relationship_graph() {
        let pkg = OpcPackage::from_bytes(minimal_package()).unwrap();
        // The orphan member has no incoming relationship and is never loaded
        assert_eq!(pkg.part_count(), 2);
        assert_eq!(pkg.main_document_part().unwrap().content_type(), CT::PML_PRESENTATION_MAIN);
        let pres = pkg.main_document_partname().unwrap();
        assert_eq!(pkg.related_part(&pres, "rId1").unwrap().content_type(), CT::PML_SLIDE);
    }

    #[test]
    fn test_drop_unreachable_after_unlink() {
        let mut pkg = OpcPackage::from_bytes(minimal_package()).unwrap();
        let pres = pkg.main_document_partname().unwrap();
        pkg.get_part_mut(&pres).unwrap().rels_mut().remove("rId1");

        let dropped = pkg.drop_unreachable_parts().unwrap();
        assert_eq!(dropped, vec![PackURI::new("/ppt/slides/slide1.xml").unwrap()]);
        assert_eq!(pkg.part_count(), 1);
    }

    #[test]
    fn test_save_and_reopen() {
        let pkg = OpcPackage::from_bytes(minimal_package()).unwrap();
        let bytes = pkg.to_bytes().unwrap();
        let reopened = OpcPackage::from_bytes(bytes).unwrap();
        assert_eq!(reopened.part_count(), 2);
        assert!(reopened.contains_part(&PackURI::new("/ppt/slides/slide1.xml").unwrap()));
        // External relationship survives untouched
        let pres = reopened.main_document_part().unwrap();
        assert!(pres.rels().get("rId2").unwrap().is_external());
    }

    #[test]
    fn test_next_partname() {
        let pkg = OpcPackage::from_bytes(minimal_package()).unwrap();
        let next = pkg.next_partname("/ppt/slides/slide%d.xml").unwrap();
        assert_eq!(next.as_str(), "/ppt/slides/slide2.xml");
    }
}
