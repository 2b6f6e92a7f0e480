//! Built-in default template.
//!
//! One master with the Office theme, a 4:3 slide size and five layouts in
//! the order PowerPoint's blank presentation lists them: Title Slide, Title
//! and Content, Section Header, Title Only, Blank. The template has no
//! slides.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::{Part, XmlPart};

/// A part of the default template and its outgoing relationships.
struct TemplatePart {
    partname: &'static str,
    content_type: &'static str,
    xml: &'static str,
    rels: &'static [(&'static str, &'static str, &'static str)],
}

const LAYOUT_RELS: &[(&str, &str, &str)] = &[("rId1", rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml")];

const PACKAGE_RELS: &[(&str, &str, &str)] = &[
    ("rId1", rt::OFFICE_DOCUMENT, "ppt/presentation.xml"),
    ("rId2", rt::CORE_PROPERTIES, "docProps/core.xml"),
    ("rId3", rt::EXTENDED_PROPERTIES, "docProps/app.xml"),
];

const PARTS: &[TemplatePart] = &[
    TemplatePart {
        partname: "/ppt/presentation.xml",
        content_type: ct::PML_PRESENTATION_MAIN,
        xml: include_str!("resources/presentation.xml"),
        rels: &[
            ("rId1", rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
            ("rId2", rt::PRES_PROPS, "presProps.xml"),
            ("rId3", rt::VIEW_PROPS, "viewProps.xml"),
            ("rId4", rt::THEME, "theme/theme1.xml"),
            ("rId5", rt::TABLE_STYLES, "tableStyles.xml"),
        ],
    },
    TemplatePart {
        partname: "/ppt/slideMasters/slideMaster1.xml",
        content_type: ct::PML_SLIDE_MASTER,
        xml: include_str!("resources/slideMasters/slideMaster1.xml"),
        rels: &[
            ("rId1", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
            ("rId2", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"),
            ("rId3", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout3.xml"),
            ("rId4", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout4.xml"),
            ("rId5", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout5.xml"),
            ("rId6", rt::THEME, "../theme/theme1.xml"),
        ],
    },
    TemplatePart {
        partname: "/ppt/slideLayouts/slideLayout1.xml",
        content_type: ct::PML_SLIDE_LAYOUT,
        xml: include_str!("resources/slideLayouts/slideLayout1.xml"),
        rels: LAYOUT_RELS,
    },
    TemplatePart {
        partname: "/ppt/slideLayouts/slideLayout2.xml",
        content_type: ct::PML_SLIDE_LAYOUT,
        xml: include_str!("resources/slideLayouts/slideLayout2.xml"),
        rels: LAYOUT_RELS,
    },
    TemplatePart {
        partname: "/ppt/slideLayouts/slideLayout3.xml",
        content_type: ct::PML_SLIDE_LAYOUT,
        xml: include_str!("resources/slideLayouts/slideLayout3.xml"),
        rels: LAYOUT_RELS,
    },
    TemplatePart {
        partname: "/ppt/slideLayouts/slideLayout4.xml",
        content_type: ct::PML_SLIDE_LAYOUT,
        xml: include_str!("resources/slideLayouts/slideLayout4.xml"),
        rels: LAYOUT_RELS,
    },
    TemplatePart {
        partname: "/ppt/slideLayouts/slideLayout5.xml",
        content_type: ct::PML_SLIDE_LAYOUT,
        xml: include_str!("resources/slideLayouts/slideLayout5.xml"),
        rels: LAYOUT_RELS,
    },
    TemplatePart {
        partname: "/ppt/theme/theme1.xml",
        content_type: ct::OFC_THEME,
        xml: include_str!("resources/theme/theme1.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/ppt/presProps.xml",
        content_type: ct::PML_PRES_PROPS,
        xml: include_str!("resources/presProps.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/ppt/viewProps.xml",
        content_type: ct::PML_VIEW_PROPS,
        xml: include_str!("resources/viewProps.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/ppt/tableStyles.xml",
        content_type: ct::PML_TABLE_STYLES,
        xml: include_str!("resources/tableStyles.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/docProps/core.xml",
        content_type: ct::OPC_CORE_PROPERTIES,
        xml: include_str!("resources/docProps/core.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/docProps/app.xml",
        content_type: ct::OFC_EXTENDED_PROPERTIES,
        xml: include_str!("resources/docProps/app.xml"),
        rels: &[],
    },
];

/// Build the default template as an in-memory package.
pub fn default_package() -> Result<OpcPackage> {
    let mut package = OpcPackage::new();

    for &(r_id, reltype, target) in PACKAGE_RELS {
        package
            .rels_mut()
            .add_relationship(reltype.to_string(), target.to_string(), r_id.to_string(), false);
    }

    for template_part in PARTS {
        let partname = PackURI::new(template_part.partname).map_err(OoxmlError::InvalidFormat)?;
        let mut part = XmlPart::new(
            partname,
            template_part.content_type.to_string(),
            template_part.xml.as_bytes().to_vec(),
        );
        for &(r_id, reltype, target) in template_part.rels {
            part.rels_mut()
                .add_relationship(reltype.to_string(), target.to_string(), r_id.to_string(), false);
        }
        package.add_part(Box::new(part));
    }

    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_part_is_reachable() {
        let mut package = default_package().unwrap();
        assert_eq!(package.part_count(), PARTS.len());
        assert!(package.drop_unreachable_parts().unwrap().is_empty());
    }

    #[test]
    fn test_template_resources_are_well_formed() {
        for template_part in PARTS {
            let mut reader = quick_xml::Reader::from_str(template_part.xml);
            loop {
                match reader.read_event() {
                    Ok(quick_xml::events::Event::Eof) => break,
                    Ok(_) => {},
                    Err(e) => panic!("{}: {}", template_part.partname, e),
                }
            }
        }
    }
}
