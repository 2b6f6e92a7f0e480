/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::parts::id_list_entries;
use quick_xml::Reader;
use quick_xml::events::Event;

/// One `<p:sldId>` entry: the slide's presentation-unique id and the
/// relationship that points at its part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideId {
    pub id: u32,
    pub r_id: String,
}

/// Prefixes a presentation.xml binds to the PresentationML and
/// relationships namespaces.
///
/// Generated elements must reuse them, since donors are free to pick their
/// own (or use a default namespace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePrefixes {
    /// Empty when PresentationML is the default namespace
    pub pml: String,
    pub rel: String,
}

impl NamespacePrefixes {
    /// Qualified PresentationML element name.
    pub fn pml(&self, local: &str) -> String {
        if self.pml.is_empty() {
            local.to_string()
        } else {
            format!("{}:{}", self.pml, local)
        }
    }
}

impl Default for NamespacePrefixes {
    fn default() -> Self {
        Self {
            pml: "p".to_string(),
            rel: "r".to_string(),
        }
    }
}

/// The main presentation part.
///
/// # Example
///
/// ```rust,ignore
/// let pres_part = PresentationPart::from_part(opc_part)?;
/// for slide_id in pres_part.slide_ids()? {
///     println!("{} -> {}", slide_id.id, slide_id.r_id);
/// }
/// ```
pub struct PresentationPart<'a> {
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Entries of `<p:sldIdLst>` in presentation order.
    ///
    /// Entries missing either id are a malformed slide list.
    pub fn slide_ids(&self) -> Result<Vec<SlideId>> {
        id_list_entries(self.xml_bytes(), b"sldId")?
            .into_iter()
            .map(|entry| match entry {
                (Some(id), Some(r_id)) => Ok(SlideId { id, r_id }),
                _ => Err(OoxmlError::InvalidFormat(format!(
                    "sldId without id or r:id in {}",
                    self.part.partname()
                ))),
            })
            .collect()
    }

    /// Relationship IDs of the slide masters, in `<p:sldMasterIdLst>` order.
    pub fn slide_master_rids(&self) -> Result<Vec<String>> {
        Ok(id_list_entries(self.xml_bytes(), b"sldMasterId")?
            .into_iter()
            .filter_map(|(_, r_id)| r_id)
            .collect())
    }

    /// Slide size in EMUs from `<p:sldSz>`.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        let mut reader = Reader::from_reader(self.xml_bytes());

        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldSz" => {
                    let mut cx = None;
                    let mut cy = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"cx" => cx = atoi_simd::parse::<i64>(&attr.value).ok(),
                            b"cy" => cy = atoi_simd::parse::<i64>(&attr.value).ok(),
                            _ => {},
                        }
                    }
                    return Ok(cx.zip(cy));
                },
                Event::Eof => break,
                _ => {},
            }
        }

        Ok(None)
    }

    /// Namespace prefixes declared on the root element.
    pub fn namespace_prefixes(&self) -> Result<NamespacePrefixes> {
        namespace_prefixes(self.xml_bytes())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// Namespace prefixes used by a presentation.xml document.
pub(crate) fn namespace_prefixes(xml: &[u8]) -> Result<NamespacePrefixes> {
    let mut reader = Reader::from_reader(xml);
    let mut prefixes = NamespacePrefixes::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                prefixes.pml = e
                    .name()
                    .prefix()
                    .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
                    .unwrap_or_default();
                for attr in e.attributes() {
                    let attr = attr?;
                    if let Some(prefix) = attr.key.as_ref().strip_prefix(b"xmlns:")
                        && attr.value.as_ref() == namespace::OFC_RELATIONSHIPS.as_bytes()
                    {
                        prefixes.rel = String::from_utf8_lossy(prefix).into_owned();
                    }
                }
                return Ok(prefixes);
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Err(OoxmlError::InvalidFormat("presentation part has no root element".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type;
    use crate::ooxml::opc::packuri::PackURI;
    use crate::ooxml::opc::part::XmlPart;

    fn part(xml: &str) -> XmlPart {
        XmlPart::new(
            PackURI::new("/ppt/presentation.xml").unwrap(),
            content_type::PML_PRESENTATION_MAIN.to_string(),
            xml.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_slide_ids_and_masters() {
        let xml = r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
            <p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
            <p:sldIdLst><p:sldId id="256" r:id="rId7"/><p:sldId id="300" r:id="rId2"/></p:sldIdLst>
            <p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#;
        let part = part(xml);
        let pres = PresentationPart::from_part(&part).unwrap();

        assert_eq!(
            pres.slide_ids().unwrap(),
            vec![
                SlideId { id: 256, r_id: "rId7".into() },
                SlideId { id: 300, r_id: "rId2".into() },
            ]
        );
        assert_eq!(pres.slide_master_rids().unwrap(), vec!["rId1".to_string()]);
        assert_eq!(pres.slide_size().unwrap(), Some((12192000, 6858000)));
        assert_eq!(pres.namespace_prefixes().unwrap(), NamespacePrefixes::default());
    }

    #[test]
    fn test_custom_prefixes() {
        let xml = r#"<presentation xmlns="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:rel="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sldIdLst><sldId id="256" rel:id="rId3"/></sldIdLst></presentation>"#;
        let part = part(xml);
        let pres = PresentationPart::from_part(&part).unwrap();

        let prefixes = pres.namespace_prefixes().unwrap();
        assert_eq!(prefixes.pml, "");
        assert_eq!(prefixes.rel, "rel");
        assert_eq!(prefixes.pml("sldIdLst"), "sldIdLst");
        assert_eq!(pres.slide_ids().unwrap()[0].r_id, "rId3");
    }

    #[test]
    fn test_slide_id_without_rel_is_malformed() {
        let xml = r#"<p:presentation xmlns:p="p"><p:sldIdLst><p:sldId id="256"/></p:sldIdLst></p:presentation>"#;
        let part = part(xml);
        let pres = PresentationPart::from_part(&part).unwrap();
        assert!(pres.slide_ids().is_err());
    }
}
