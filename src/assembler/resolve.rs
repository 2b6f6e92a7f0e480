//! Style resolution: pick the one layout every slide of a run is made from.

use crate::assembler::options::AssembleOptions;
use crate::common::{Error, Result};
use crate::ooxml::pptx::SlideLayout;
use std::fmt;
use tracing::{debug, info};

/// How the layout was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// The layout at the preferred position
    PreferredPosition,
    /// First layout with both a title and a body or object placeholder
    TitleAndBody,
    /// First layout there is
    FirstLayout,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreferredPosition => "preferred position",
            Self::TitleAndBody => "title and body scan",
            Self::FirstLayout => "first layout",
        })
    }
}

/// The layout chosen for a run.
#[derive(Debug, Clone)]
pub struct ResolvedLayout {
    pub layout: SlideLayout,
    /// Position among all layouts of all masters
    pub index: usize,
    pub strategy: ResolutionStrategy,
}

type Strategy = fn(&[SlideLayout], &AssembleOptions) -> Option<usize>;

/// Tried in order; the first hit wins.
const STRATEGIES: [(ResolutionStrategy, Strategy); 3] = [
    (ResolutionStrategy::PreferredPosition, preferred_position),
    (ResolutionStrategy::TitleAndBody, title_and_body),
    (ResolutionStrategy::FirstLayout, first_layout),
];

/// The layout at the preferred position, unless it has neither a title nor
/// a body placeholder.
fn preferred_position(layouts: &[SlideLayout], options: &AssembleOptions) -> Option<usize> {
    let index = options.preferred_layout_index;
    layouts
        .get(index)
        .filter(|layout| layout.has_title() || layout.has_body())
        .map(|_| index)
}

fn title_and_body(layouts: &[SlideLayout], _options: &AssembleOptions) -> Option<usize> {
    layouts.iter().position(|layout| layout.has_title() && layout.has_body())
}

fn first_layout(layouts: &[SlideLayout], _options: &AssembleOptions) -> Option<usize> {
    (!layouts.is_empty()).then_some(0)
}

/// Choose the layout for every slide of one run.
///
/// Fails with [`Error::NoLayout`] when there is no layout to choose from.
pub fn resolve_layout(mut layouts: Vec<SlideLayout>, options: &AssembleOptions) -> Result<ResolvedLayout> {
    for (strategy, select) in STRATEGIES {
        match select(&layouts, options) {
            Some(index) => {
                let layout = layouts.swap_remove(index);
                info!(
                    layout = %layout.name,
                    partname = %layout.partname,
                    index,
                    %strategy,
                    "Resolved slide layout"
                );
                return Ok(ResolvedLayout {
                    layout,
                    index,
                    strategy,
                });
            },
            None => debug!(%strategy, "Layout strategy found nothing"),
        }
    }

    Err(Error::NoLayout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::shapes::PlaceholderType;
    use crate::ooxml::PackURI;
    use crate::ooxml::pptx::Placeholder;

    fn layout(n: usize, kinds: &[PlaceholderType]) -> SlideLayout {
        SlideLayout {
            partname: PackURI::new(format!("/ppt/slideLayouts/slideLayout{}.xml", n)).unwrap(),
            name: format!("Layout {}", n),
            placeholders: kinds
                .iter()
                .zip(2u32..)
                .map(|(&kind, shape_id)| Placeholder {
                    shape_id,
                    name: String::new(),
                    kind,
                    type_attr: kind.as_ooxml().map(str::to_string),
                    orient: None,
                    sz: None,
                    idx: None,
                    text_frame: None,
                })
                .collect(),
        }
    }

    use PlaceholderType::{Body, CenterTitle, Object, SubTitle, Title};

    #[test]
    fn test_preferred_position_wins() {
        let layouts = vec![layout(1, &[CenterTitle, SubTitle]), layout(2, &[Title, Object])];
        let resolved = resolve_layout(layouts, &AssembleOptions::default()).unwrap();
        assert_eq!(resolved.strategy, ResolutionStrategy::PreferredPosition);
        assert_eq!(resolved.index, 1);
        assert_eq!(resolved.layout.name, "Layout 2");
    }

    #[test]
    fn test_scan_when_preferred_missing_or_empty() {
        let layouts = vec![layout(1, &[Title, Body])];
        let resolved = resolve_layout(layouts, &AssembleOptions::default()).unwrap();
        assert_eq!(resolved.strategy, ResolutionStrategy::TitleAndBody);
        assert_eq!(resolved.index, 0);

        let layouts = vec![layout(1, &[CenterTitle]), layout(2, &[]), layout(3, &[Title, Body])];
        let resolved = resolve_layout(layouts, &AssembleOptions::default()).unwrap();
        assert_eq!(resolved.strategy, ResolutionStrategy::TitleAndBody);
        assert_eq!(resolved.layout.name, "Layout 3");
    }

    #[test]
    fn test_first_layout_fallback() {
        let layouts = vec![layout(1, &[]), layout(2, &[])];
        let resolved = resolve_layout(layouts, &AssembleOptions::default()).unwrap();
        assert_eq!(resolved.strategy, ResolutionStrategy::FirstLayout);
        assert_eq!(resolved.layout.name, "Layout 1");
    }

    #[test]
    fn test_no_layouts_is_fatal() {
        assert!(matches!(
            resolve_layout(Vec::new(), &AssembleOptions::default()),
            Err(Error::NoLayout)
        ));
    }
}
