/// Placeholder type of a PresentationML placeholder shape.
///
/// Mirrors `ST_PlaceholderType`. A `<p:ph>` element without a `type`
/// attribute is an object placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaceholderType {
    /// `title`
    Title,
    /// `ctrTitle`
    CenterTitle,
    /// `subTitle`
    SubTitle,
    /// `body`
    Body,
    /// `obj`, also the default when `type` is omitted
    #[default]
    Object,
    /// `dt`
    Date,
    /// `ftr`
    Footer,
    /// `sldNum`
    SlideNumber,
    /// `hdr`
    Header,
    /// `chart`
    Chart,
    /// `tbl`
    Table,
    /// `clipArt`
    ClipArt,
    /// `dgm`
    Diagram,
    /// `media`
    Media,
    /// `sldImg`
    SlideImage,
    /// `pic`
    Picture,
    /// Anything this crate does not know about
    Other,
}

impl PlaceholderType {
    /// Parse the `type` attribute value of a `<p:ph>` element.
    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "title" => Self::Title,
            "ctrTitle" => Self::CenterTitle,
            "subTitle" => Self::SubTitle,
            "body" => Self::Body,
            "obj" => Self::Object,
            "dt" => Self::Date,
            "ftr" => Self::Footer,
            "sldNum" => Self::SlideNumber,
            "hdr" => Self::Header,
            "chart" => Self::Chart,
            "tbl" => Self::Table,
            "clipArt" => Self::ClipArt,
            "dgm" => Self::Diagram,
            "media" => Self::Media,
            "sldImg" => Self::SlideImage,
            "pic" => Self::Picture,
            _ => Self::Other,
        }
    }

    /// The `type` attribute value, or `None` for the implied object type.
    pub fn as_ooxml(self) -> Option<&'static str> {
        match self {
            Self::Title => Some("title"),
            Self::CenterTitle => Some("ctrTitle"),
            Self::SubTitle => Some("subTitle"),
            Self::Body => Some("body"),
            Self::Object | Self::Other => None,
            Self::Date => Some("dt"),
            Self::Footer => Some("ftr"),
            Self::SlideNumber => Some("sldNum"),
            Self::Header => Some("hdr"),
            Self::Chart => Some("chart"),
            Self::Table => Some("tbl"),
            Self::ClipArt => Some("clipArt"),
            Self::Diagram => Some("dgm"),
            Self::Media => Some("media"),
            Self::SlideImage => Some("sldImg"),
            Self::Picture => Some("pic"),
        }
    }

    /// Title-like placeholder (`title` or `ctrTitle`).
    #[inline]
    pub fn is_title(self) -> bool {
        matches!(self, Self::Title | Self::CenterTitle)
    }

    /// Placeholder that can take the bullet body of a slide.
    #[inline]
    pub fn is_body(self) -> bool {
        matches!(self, Self::Body | Self::Object)
    }

    /// Placeholder that gets a text region when cloned onto a new slide.
    #[inline]
    pub fn takes_text(self) -> bool {
        matches!(
            self,
            Self::Title | Self::CenterTitle | Self::SubTitle | Self::Body | Self::Object
        )
    }

    /// Date, footer and slide number placeholders stay on the layout.
    #[inline]
    pub fn is_cloneable(self) -> bool {
        !matches!(self, Self::Date | Self::Footer | Self::SlideNumber)
    }

    /// Base of the shape name PowerPoint gives a new placeholder of this type.
    pub fn shape_basename(self) -> &'static str {
        match self {
            Self::Title | Self::CenterTitle => "Title",
            Self::SubTitle => "Subtitle",
            Self::Body => "Text Placeholder",
            Self::Object | Self::Other => "Content Placeholder",
            Self::Date => "Date Placeholder",
            Self::Footer => "Footer Placeholder",
            Self::SlideNumber => "Slide Number Placeholder",
            Self::Header => "Header Placeholder",
            Self::Chart => "Chart Placeholder",
            Self::Table => "Table Placeholder",
            Self::ClipArt => "ClipArt Placeholder",
            Self::Diagram => "SmartArt Placeholder",
            Self::Media => "Media Placeholder",
            Self::SlideImage => "Slide Image Placeholder",
            Self::Picture => "Picture Placeholder",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_type_is_object() {
        assert_eq!(PlaceholderType::default(), PlaceholderType::Object);
        assert!(PlaceholderType::Object.is_body());
        assert_eq!(PlaceholderType::Object.as_ooxml(), None);
    }

    #[test]
    fn test_roundtrip_known_values() {
        for value in ["title", "ctrTitle", "subTitle", "body", "dt", "ftr", "sldNum", "pic"] {
            assert_eq!(PlaceholderType::from_ooxml(value).as_ooxml(), Some(value));
        }
    }

    #[test]
    fn test_footer_family_not_cloned() {
        assert!(!PlaceholderType::Date.is_cloneable());
        assert!(!PlaceholderType::Footer.is_cloneable());
        assert!(!PlaceholderType::SlideNumber.is_cloneable());
        assert!(PlaceholderType::Picture.is_cloneable());
        assert!(!PlaceholderType::Picture.takes_text());
    }
}
