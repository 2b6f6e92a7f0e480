//! Relationships between parts of an OPC package.
//!
//! Every source (the package itself or a part) owns one [`Relationships`]
//! table, serialized as its `.rels` part.
use crate::common::xml::escape_xml;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    r_id: String,
    reltype: String,
    /// Part reference relative to `base_uri`, or an URL when external
    target_ref: String,
    base_uri: String,
    is_external: bool,
}

impl Relationship {
    pub fn new(r_id: String, reltype: String, target_ref: String, base_uri: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Absolute partname of the target. Fails for external relationships.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} is external and has no target part",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Relationship table of a single source, keyed by rId.
#[derive(Debug, Clone)]
pub struct Relationships {
    base_uri: String,
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: HashMap::new(),
        }
    }

    /// Insert a relationship, replacing any previous one with the same rId.
    pub fn add_relationship(&mut self, reltype: String, target_ref: String, r_id: String, is_external: bool) {
        let rel = Relationship::new(r_id.clone(), reltype, target_ref, self.base_uri.clone(), is_external);
        self.rels.insert(r_id, rel);
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    #[inline]
    pub fn contains(&self, r_id: &str) -> bool {
        self.rels.contains_key(r_id)
    }

    /// rId of the internal relationship of `reltype` to `target_ref`,
    /// created with the lowest free rId when missing.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        if let Some(rel) = self
            .rels
            .values()
            .find(|rel| !rel.is_external && rel.reltype == reltype && rel.target_ref == target_ref)
        {
            return rel.r_id.clone();
        }

        let r_id = self.next_r_id();
        self.add_relationship(reltype.to_string(), target_ref.to_string(), r_id.clone(), false);
        r_id
    }

    /// Lowest `rIdN` not yet taken, filling gaps left by removals.
    fn next_r_id(&self) -> String {
        let mut used: Vec<u32> = self.rels.keys().filter_map(|r_id| r_id_number(r_id)).collect();
        used.sort_unstable();

        let mut next = 1u32;
        for num in used {
            match num.cmp(&next) {
                std::cmp::Ordering::Equal => next += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }
        format!("rId{}", next)
    }

    /// The single relationship of `reltype`.
    ///
    /// Errors when there is none or more than one.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.values().filter(|rel| rel.reltype == reltype);
        match (matching.next(), matching.next()) {
            (Some(rel), None) => Ok(rel),
            (None, _) => Err(OpcError::RelationshipNotFound(format!("No relationship of type '{}'", reltype))),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    /// Relationships ordered by rId number, so callers walking the graph
    /// see a stable order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by(|a, b| rel_order(&a.r_id, &b.r_id));
        rels.into_iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    pub fn remove(&mut self, r_id: &str) -> Option<Relationship> {
        self.rels.remove(r_id)
    }

    /// Serialize as a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.rels.len() * 160);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str("<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">");

        for rel in self.iter() {
            let target_mode = if rel.is_external { r#" TargetMode="External""# } else { "" };
            let _ = write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(&rel.r_id),
                escape_xml(&rel.reltype),
                escape_xml(&rel.target_ref),
                target_mode
            );
        }

        xml.push_str("</Relationships>");
        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/".to_string())
    }
}

/// Numeric part of an `rIdN` identifier.
#[inline]
pub(crate) fn r_id_number(r_id: &str) -> Option<u32> {
    r_id.strip_prefix("rId")
        .and_then(|digits| atoi_simd::parse::<u32>(digits.as_bytes()).ok())
}

/// `rId2` sorts before `rId10`; identifiers outside the `rIdN` scheme go last.
fn rel_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (r_id_number(a), r_id_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::new("/ppt".to_string());
        assert_eq!(rels.next_r_id(), "rId1");

        rels.add_relationship("t".into(), "a.xml".into(), "rId1".into(), false);
        rels.add_relationship("t".into(), "c.xml".into(), "rId3".into(), false);
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_get_or_add_reuses_existing() {
        let mut rels = Relationships::new("/ppt".to_string());
        assert_eq!(rels.get_or_add("type1", "slides/slide1.xml"), "rId1");
        assert_eq!(rels.get_or_add("type1", "slides/slide1.xml"), "rId1");
        assert_eq!(rels.get_or_add("type1", "slides/slide2.xml"), "rId2");
    }

    #[test]
    fn test_target_partname_resolves_against_base() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        rels.add_relationship("t".into(), "../slideLayouts/slideLayout2.xml".into(), "rId1".into(), false);
        let target = rels.get("rId1").unwrap().target_partname().unwrap();
        assert_eq!(target.as_str(), "/ppt/slideLayouts/slideLayout2.xml");

        rels.add_relationship("h".into(), "https://example.com".into(), "rId2".into(), true);
        assert!(rels.get("rId2").unwrap().target_partname().is_err());
    }

    #[test]
    fn test_to_xml_orders_numerically() {
        let mut rels = Relationships::new("/ppt".to_string());
        for n in [10, 2, 1] {
            rels.add_relationship("t".into(), format!("s{}.xml", n), format!("rId{}", n), false);
        }
        let xml = rels.to_xml();
        let first = xml.find("rId1\"").unwrap();
        let second = xml.find("rId2\"").unwrap();
        let tenth = xml.find("rId10\"").unwrap();
        assert!(first < second && second < tenth);
    }

    #[test]
    fn test_part_with_reltype_rejects_duplicates() {
        let mut rels = Relationships::default();
        rels.add_relationship("t".into(), "a.xml".into(), "rId1".into(), false);
        assert!(rels.part_with_reltype("t").is_ok());
        rels.add_relationship("t".into(), "b.xml".into(), "rId2".into(), false);
        assert!(rels.part_with_reltype("t").is_err());
        assert!(rels.part_with_reltype("missing").is_err());
    }
}
