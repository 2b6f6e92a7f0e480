/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::{Part, XmlPart};
use crate::ooxml::pptx::parts::{PresentationPart, SlideId, SlideLayoutPart, SlideMasterPart, SlidePart};
use crate::ooxml::pptx::shapes::{Placeholder, TextFrame};
use crate::ooxml::pptx::template;
use crate::ooxml::pptx::writer::{self, NewSlide};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Lowest id PresentationML allows for a slide.
const MIN_SLIDE_ID: u32 = 256;

/// A slide layout as seen from the presentation: where it lives, what it is
/// called and which placeholder slots it offers.
#[derive(Debug, Clone)]
pub struct SlideLayout {
    pub partname: PackURI,
    pub name: String,
    pub placeholders: Vec<Placeholder>,
}

impl SlideLayout {
    /// Has a `title` or `ctrTitle` slot.
    pub fn has_title(&self) -> bool {
        self.placeholders.iter().any(|p| p.kind.is_title())
    }

    /// Has a `body` or `obj` slot.
    pub fn has_body(&self) -> bool {
        self.placeholders.iter().any(|p| p.kind.is_body())
    }
}

/// A slide of the presentation, read back.
#[derive(Debug, Clone)]
pub struct Slide {
    pub partname: PackURI,
    pub layout_partname: PackURI,
    pub placeholders: Vec<Placeholder>,
}

impl Slide {
    /// Text of the first title placeholder.
    pub fn title(&self) -> Option<String> {
        self.placeholders.iter().find(|p| p.kind.is_title()).map(Placeholder::text)
    }

    /// Text region of the first body or object placeholder that has one.
    pub fn body(&self) -> Option<&TextFrame> {
        self.placeholders
            .iter()
            .filter(|p| p.kind.is_body())
            .find_map(|p| p.text_frame.as_ref())
    }
}

/// A PowerPoint (.pptx) package open for editing.
///
/// Wraps an OPC package and keeps the presentation's slide list
/// (`<p:sldIdLst>`) and its slide relationships in step: every mutation
/// updates both sides and rewrites the list in `presentation.xml`.
///
/// # Examples
///
/// ```rust,no_run
/// use deckgen::ooxml::pptx::Package;
///
/// let mut pkg = Package::open("template.potx")?;
/// let layout = pkg.slide_layouts()?.remove(1);
/// pkg.add_slide(&layout)?;
/// pkg.save("deck.pptx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Package {
    opc: OpcPackage,
    pres_partname: PackURI,
    slide_ids: Vec<SlideId>,
    next_slide_id: u32,
}

impl Package {
    /// A new presentation from the built-in default template.
    pub fn new() -> Result<Self> {
        Self::from_opc(template::default_package()?)
    }

    /// Open a .pptx or .potx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    fn from_opc(mut opc: OpcPackage) -> Result<Self> {
        let pres_partname = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let main_part = opc.get_part_mut(&pres_partname)?;
        let content_type = main_part.content_type().to_string();
        match content_type.as_str() {
            ct::PML_PRESENTATION_MAIN => {},
            ct::PML_TEMPLATE_MAIN => {
                debug!(partname = %pres_partname, "Converting template main part to presentation");
                main_part.set_content_type(ct::PML_PRESENTATION_MAIN.to_string());
            },
            _ => {
                return Err(OoxmlError::InvalidContentType {
                    expected: ct::PML_PRESENTATION_MAIN.to_string(),
                    got: content_type,
                });
            },
        }

        let main_part = opc.get_part(&pres_partname)?;
        let slide_ids = PresentationPart::from_part(main_part)?.slide_ids()?;
        if let Some(dangling) = slide_ids.iter().find(|s| !main_part.rels().contains(&s.r_id)) {
            return Err(OoxmlError::InvalidRelationship(format!(
                "slide {} refers to missing relationship {}",
                dangling.id, dangling.r_id
            )));
        }

        let next_slide_id = slide_ids
            .iter()
            .map(|s| s.id)
            .max()
            .unwrap_or(0)
            .max(MIN_SLIDE_ID - 1)
            + 1;

        Ok(Self {
            opc,
            pres_partname,
            slide_ids,
            next_slide_id,
        })
    }

    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    #[cfg(test)]
    pub(crate) fn opc_package_mut(&mut self) -> &mut OpcPackage {
        &mut self.opc
    }

    fn presentation_part(&self) -> Result<PresentationPart<'_>> {
        PresentationPart::from_part(self.opc.get_part(&self.pres_partname)?)
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_ids.len()
    }

    /// Number of slide masters in `<p:sldMasterIdLst>`.
    pub fn slide_master_count(&self) -> Result<usize> {
        Ok(self.presentation_part()?.slide_master_rids()?.len())
    }

    /// Every layout of every master, masters in `<p:sldMasterIdLst>` order
    /// and each master's layouts in `<p:sldLayoutIdLst>` order.
    pub fn slide_layouts(&self) -> Result<Vec<SlideLayout>> {
        let mut layouts = Vec::new();

        for master_rid in self.presentation_part()?.slide_master_rids()? {
            let master = SlideMasterPart::from_part(self.opc.related_part(&self.pres_partname, &master_rid)?)?;
            for partname in master.slide_layout_partnames()? {
                let layout = SlideLayoutPart::from_part(self.opc.get_part(&partname)?)?;
                layouts.push(SlideLayout {
                    name: layout.name()?,
                    placeholders: layout.placeholders()?,
                    partname,
                });
            }
        }

        Ok(layouts)
    }

    /// `(index, rId)` of every slide, in presentation order.
    pub fn slide_refs(&self) -> Vec<(usize, String)> {
        self.slide_ids
            .iter()
            .enumerate()
            .map(|(index, slide_id)| (index, slide_id.r_id.clone()))
            .collect()
    }

    /// Remove slides given as `(index, rId)` pairs from both the slide list
    /// and the presentation's relationships.
    ///
    /// All pairs are checked before anything changes; a pair whose index and
    /// rId do not line up, or whose relationship is missing, fails the whole
    /// call. Removal runs from the highest index down. The slide parts stay
    /// in the package until [`Package::drop_unreachable_parts`].
    pub fn remove_slide_pairs(&mut self, pairs: &[(usize, String)]) -> Result<()> {
        let pres_rels = self.opc.get_part(&self.pres_partname)?.rels();
        for (index, r_id) in pairs {
            let listed = self.slide_ids.get(*index).is_some_and(|s| &s.r_id == r_id);
            if !listed || !pres_rels.contains(r_id) {
                return Err(OoxmlError::InvalidRelationship(format!(
                    "slide {} ({}) is not in the slide list",
                    index, r_id
                )));
            }
        }

        let mut ordered: Vec<&(usize, String)> = pairs.iter().collect();
        ordered.sort_by(|a, b| b.0.cmp(&a.0));
        ordered.dedup_by_key(|pair| pair.0);

        let pres_part = self.opc.get_part_mut(&self.pres_partname)?;
        for (index, r_id) in ordered {
            self.slide_ids.remove(*index);
            pres_part.rels_mut().remove(r_id);
        }

        self.flush_slide_id_list()
    }

    /// Slide relationships of the presentation that no `<p:sldId>` names.
    pub fn unlisted_slide_rels(&self) -> Result<Vec<String>> {
        let pres_part = self.opc.get_part(&self.pres_partname)?;
        Ok(pres_part
            .rels()
            .iter()
            .filter(|rel| rel.reltype() == rt::SLIDE && !self.slide_ids.iter().any(|s| s.r_id == rel.r_id()))
            .map(|rel| rel.r_id().to_string())
            .collect())
    }

    /// Remove the relationships returned by
    /// [`Package::unlisted_slide_rels`], returning how many went.
    pub fn remove_unlisted_slide_rels(&mut self) -> Result<usize> {
        let unlisted = self.unlisted_slide_rels()?;
        let pres_part = self.opc.get_part_mut(&self.pres_partname)?;
        for r_id in &unlisted {
            pres_part.rels_mut().remove(r_id);
        }
        Ok(unlisted.len())
    }

    /// Remove parts no relationship reaches any more, returning their names.
    pub fn drop_unreachable_parts(&mut self) -> Result<Vec<PackURI>> {
        Ok(self.opc.drop_unreachable_parts()?)
    }

    /// Remove section-list slide entries and custom shows from
    /// `presentation.xml`. Returns the number of section entries removed.
    pub fn strip_section_refs(&mut self) -> Result<usize> {
        let pres_part = self.opc.get_part_mut(&self.pres_partname)?;
        let (xml, removed) = writer::strip_section_refs(pres_part.blob())?;
        pres_part.set_blob(xml);
        Ok(removed)
    }

    /// Append a slide made from `layout`, returning its index.
    pub fn add_slide(&mut self, layout: &SlideLayout) -> Result<usize> {
        if !self.opc.contains_part(&layout.partname) {
            return Err(OoxmlError::PartNotFound(layout.partname.to_string()));
        }

        let partname = self.opc.next_partname("/ppt/slides/slide%d.xml")?;
        let xml = NewSlide::from_layout(&layout.placeholders).to_xml()?;

        let mut part = XmlPart::new(partname.clone(), ct::PML_SLIDE.to_string(), xml.into_bytes());
        part.relate_to(&layout.partname, rt::SLIDE_LAYOUT);
        self.opc.add_part(Box::new(part));

        let r_id = self
            .opc
            .get_part_mut(&self.pres_partname)?
            .relate_to(&partname, rt::SLIDE);
        self.slide_ids.push(SlideId {
            id: self.next_slide_id,
            r_id,
        });
        self.next_slide_id += 1;
        self.flush_slide_id_list()?;

        debug!(partname = %partname, layout = %layout.name, "Added slide");
        Ok(self.slide_ids.len() - 1)
    }

    fn slide_partname(&self, index: usize) -> Result<PackURI> {
        let slide_id = self
            .slide_ids
            .get(index)
            .ok_or_else(|| OoxmlError::PartNotFound(format!("slide {}", index)))?;
        let rel = self
            .opc
            .get_part(&self.pres_partname)?
            .rels()
            .get(&slide_id.r_id)
            .ok_or_else(|| OoxmlError::InvalidRelationship(slide_id.r_id.clone()))?;
        Ok(rel.target_partname()?)
    }

    /// Placeholders of slide `index` in document order.
    pub fn slide_placeholders(&self, index: usize) -> Result<Vec<Placeholder>> {
        let partname = self.slide_partname(index)?;
        SlidePart::from_part(self.opc.get_part(&partname)?)?.placeholders()
    }

    /// Replace the text of placeholder `shape_id` on slide `index` with one
    /// top-level paragraph per value.
    pub fn set_placeholder_text(&mut self, index: usize, shape_id: u32, paragraphs: &[String]) -> Result<()> {
        let partname = self.slide_partname(index)?;
        let part = self.opc.get_part_mut(&partname)?;
        let xml = writer::replace_text_body(part.blob(), shape_id, paragraphs)?;
        part.set_blob(xml);
        Ok(())
    }

    /// All slides in presentation order.
    pub fn slides(&self) -> Result<Vec<Slide>> {
        (0..self.slide_ids.len())
            .map(|index| {
                let partname = self.slide_partname(index)?;
                let slide = SlidePart::from_part(self.opc.get_part(&partname)?)?;
                Ok(Slide {
                    layout_partname: slide.layout_partname()?,
                    placeholders: slide.placeholders()?,
                    partname,
                })
            })
            .collect()
    }

    fn flush_slide_id_list(&mut self) -> Result<()> {
        let pres_part = self.opc.get_part_mut(&self.pres_partname)?;
        let xml = writer::write_slide_id_list(pres_part.blob(), &self.slide_ids)?;
        pres_part.set_blob(xml);
        Ok(())
    }

    /// Serialize to .pptx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.opc.to_bytes()?)
    }

    /// Write the package to `path`.
    ///
    /// The bytes go to a temporary file next to `path` that is renamed over
    /// it once complete, so `path` never holds a partial package.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| OoxmlError::Io(e.error))?;

        info!(path = %path.display(), slides = self.slide_ids.len(), bytes = bytes.len(), "Saved presentation");
        Ok(())
    }
}
