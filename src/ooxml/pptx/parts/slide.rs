/// Slide parts and related types.
///
/// This module contains parts for slides, slide layouts, and slide masters.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::parts::{csld_name, id_list_entries};
use crate::ooxml::pptx::shapes::{Placeholder, parse_placeholders};

/// A slide part.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package.
pub struct SlidePart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlidePart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Slide name from `<p:cSld name>`, usually empty.
    pub fn name(&self) -> Result<String> {
        csld_name(self.part.blob())
    }

    /// Placeholder shapes in document order.
    pub fn placeholders(&self) -> Result<Vec<Placeholder>> {
        parse_placeholders(self.part.blob())
    }

    /// Partname of the layout this slide was made from.
    pub fn layout_partname(&self) -> Result<PackURI> {
        let rel = self
            .part
            .rels()
            .part_with_reltype(relationship_type::SLIDE_LAYOUT)?;
        Ok(rel.target_partname()?)
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// A slide layout part.
///
/// Corresponds to `/ppt/slideLayouts/slideLayoutN.xml` in the package.
pub struct SlideLayoutPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideLayoutPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the layout name.
    pub fn name(&self) -> Result<String> {
        csld_name(self.part.blob())
    }

    /// Placeholder slots the layout hands down to its slides.
    pub fn placeholders(&self) -> Result<Vec<Placeholder>> {
        parse_placeholders(self.part.blob())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// A slide master part.
///
/// Corresponds to `/ppt/slideMasters/slideMasterN.xml` in the package.
pub struct SlideMasterPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideMasterPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the master name.
    pub fn name(&self) -> Result<String> {
        csld_name(self.part.blob())
    }

    /// Get the relationship IDs of all slide layouts in this master.
    pub fn slide_layout_rids(&self) -> Result<Vec<String>> {
        Ok(id_list_entries(self.part.blob(), b"sldLayoutId")?
            .into_iter()
            .filter_map(|(_, r_id)| r_id)
            .collect())
    }

    /// Partnames of this master's layouts in `<p:sldLayoutIdLst>` order.
    pub fn slide_layout_partnames(&self) -> Result<Vec<PackURI>> {
        self.slide_layout_rids()?
            .iter()
            .map(|r_id| {
                let rel = self.part.rels().get(r_id).ok_or_else(|| {
                    OoxmlError::InvalidRelationship(format!("{} has no relationship {}", self.part.partname(), r_id))
                })?;
                Ok(rel.target_partname()?)
            })
            .collect()
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::shapes::PlaceholderType;
    use crate::ooxml::opc::constants::content_type;
    use crate::ooxml::opc::part::XmlPart;

    #[test]
    fn test_master_layout_partnames() {
        let xml = r#"<p:sldMaster xmlns:p="p" xmlns:r="r"><p:cSld><p:spTree/></p:cSld>
            <p:sldLayoutIdLst><p:sldLayoutId id="2147483650" r:id="rId2"/><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#;
        let mut part = XmlPart::new(
            PackURI::new("/ppt/slideMasters/slideMaster1.xml").unwrap(),
            content_type::PML_SLIDE_MASTER.to_string(),
            xml.as_bytes().to_vec(),
        );
        part.rels_mut().add_relationship(
            relationship_type::SLIDE_LAYOUT.to_string(),
            "../slideLayouts/slideLayout1.xml".to_string(),
            "rId1".to_string(),
            false,
        );
        part.rels_mut().add_relationship(
            relationship_type::SLIDE_LAYOUT.to_string(),
            "../slideLayouts/slideLayout2.xml".to_string(),
            "rId2".to_string(),
            false,
        );

        let master = SlideMasterPart::from_part(&part).unwrap();
        let names: Vec<String> = master
            .slide_layout_partnames()
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(names, vec!["/ppt/slideLayouts/slideLayout2.xml", "/ppt/slideLayouts/slideLayout1.xml"]);
        assert_eq!(master.name().unwrap(), "");
    }

    #[test]
    fn test_layout_name_and_placeholders() {
        let xml = r#"<p:sldLayout xmlns:p="p"><p:cSld name="Title &amp; Body"><p:spTree>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr></p:sp>
            </p:spTree></p:cSld></p:sldLayout>"#;
        let part = XmlPart::new(
            PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap(),
            content_type::PML_SLIDE_LAYOUT.to_string(),
            xml.as_bytes().to_vec(),
        );
        let layout = SlideLayoutPart::from_part(&part).unwrap();
        assert_eq!(layout.name().unwrap(), "Title & Body");
        assert_eq!(layout.placeholders().unwrap()[0].kind, PlaceholderType::Title);
    }

    #[test]
    fn test_slide_without_layout_relationship() {
        let part = XmlPart::new(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            content_type::PML_SLIDE.to_string(),
            b"<p:sld xmlns:p=\"p\"/>".to_vec(),
        );
        assert!(SlidePart::from_part(&part).unwrap().layout_partname().is_err());
    }
}
