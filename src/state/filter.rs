//! Filter composition for the gallery and works grids
//!
//! A selection is a set of independent facets. An item is kept when every
//! facet admits it; kept items stay in catalog order.

use std::fmt;

use super::data::{ArtworkRecord, Category, WorkItem, WorkKind};

/// Year facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    Any,
    Year(i32),
}

impl YearFilter {
    /// An item without a year only passes `Any`
    pub fn admits(&self, year: Option<i32>) -> bool {
        match self {
            YearFilter::Any => true,
            YearFilter::Year(wanted) => year == Some(*wanted),
        }
    }

    /// `Any` followed by the given years
    pub fn options(years: &[i32]) -> Vec<YearFilter> {
        std::iter::once(YearFilter::Any)
            .chain(years.iter().copied().map(YearFilter::Year))
            .collect()
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::Any => f.write_str("Any year"),
            YearFilter::Year(year) => write!(f, "{}", year),
        }
    }
}

/// Category facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    pub fn options(categories: &[Category]) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(categories.iter().copied().map(CategoryFilter::Only))
            .collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All categories"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Exhibition facet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExhibitionFilter {
    #[default]
    All,
    Only(String),
}

impl ExhibitionFilter {
    pub fn admits(&self, exhibition: Option<&str>) -> bool {
        match self {
            ExhibitionFilter::All => true,
            ExhibitionFilter::Only(wanted) => exhibition == Some(wanted.as_str()),
        }
    }

    pub fn options(exhibitions: &[String]) -> Vec<ExhibitionFilter> {
        std::iter::once(ExhibitionFilter::All)
            .chain(exhibitions.iter().cloned().map(ExhibitionFilter::Only))
            .collect()
    }
}

impl fmt::Display for ExhibitionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExhibitionFilter::All => f.write_str("All exhibitions"),
            ExhibitionFilter::Only(name) => f.write_str(name),
        }
    }
}

/// Work kind facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(WorkKind),
}

impl KindFilter {
    pub fn admits(&self, kind: WorkKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(wanted) => *wanted == kind,
        }
    }

    pub fn options(kinds: &[WorkKind]) -> Vec<KindFilter> {
        std::iter::once(KindFilter::All)
            .chain(kinds.iter().copied().map(KindFilter::Only))
            .collect()
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindFilter::All => f.write_str("All techniques"),
            KindFilter::Only(kind) => write!(f, "{}", kind),
        }
    }
}

/// Facet selection for the artwork gallery
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub year: YearFilter,
    pub category: CategoryFilter,
    pub exhibition: ExhibitionFilter,
}

impl FilterSelection {
    pub fn matches(&self, artwork: &ArtworkRecord) -> bool {
        self.year.admits(Some(artwork.year))
            && self.category.admits(artwork.category)
            && self.exhibition.admits(artwork.exhibition.as_deref())
    }

    /// Catalog positions of the matching artworks, in catalog order
    pub fn apply_indices(&self, catalog: &[ArtworkRecord]) -> Vec<usize> {
        matching_indices(catalog, |artwork| self.matches(artwork))
    }

    /// The filtered view itself
    pub fn apply<'a>(&self, catalog: &'a [ArtworkRecord]) -> Vec<&'a ArtworkRecord> {
        catalog.iter().filter(|artwork| self.matches(artwork)).collect()
    }

    /// True when any facet narrows the catalog
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Facet selection for the works grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkFilter {
    pub year: YearFilter,
    pub kind: KindFilter,
}

impl WorkFilter {
    pub fn matches(&self, work: &WorkItem) -> bool {
        self.year.admits(work.year) && self.kind.admits(work.kind)
    }

    pub fn apply_indices(&self, works: &[WorkItem]) -> Vec<usize> {
        matching_indices(works, |work| self.matches(work))
    }

    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn matching_indices<T>(items: &[T], keep: impl Fn(&T) -> bool) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| keep(item))
        .map(|(index, _)| index)
        .collect()
}
