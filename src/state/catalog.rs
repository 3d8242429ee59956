use std::collections::HashSet;
use thiserror::Error;

use super::data::{
    ArtworkRecord, Biography, Category, Content, EducationEntry, GroupExhibition,
    SoloExhibitionYear, WorkItem, WorkKind,
};

/// Content bundle compiled into the binary
const EMBEDDED_CONTENT: &str = include_str!("../../assets/content.json");

/// Errors raised while loading the content bundle
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("content bundle is not valid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
    #[error("{kind} {id} has an empty image reference")]
    EmptyImage { kind: &'static str, id: u32 },
}

/// The Catalog owns the static content of the portfolio.
/// Artworks and works keep their bundle order, which is the display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    content: Content,
}

impl Catalog {
    /// Parse the bundle embedded at build time
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CONTENT)
    }

    /// Parse and validate a content bundle
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let content: Content = serde_json::from_str(json)?;
        Self::validate(&content)?;

        log::info!(
            "📚 Catalog loaded: {} artworks, {} works, {} group exhibitions",
            content.artworks.len(),
            content.works.len(),
            content.group_exhibitions.len()
        );

        Ok(Catalog { content })
    }

    /// Ids must be unique per collection and every record needs an image
    fn validate(content: &Content) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for artwork in &content.artworks {
            if !seen.insert(artwork.id) {
                return Err(CatalogError::DuplicateId { kind: "artwork", id: artwork.id });
            }
            if artwork.image.trim().is_empty() {
                return Err(CatalogError::EmptyImage { kind: "artwork", id: artwork.id });
            }
        }

        let mut seen = HashSet::new();
        for work in &content.works {
            if !seen.insert(work.id) {
                return Err(CatalogError::DuplicateId { kind: "work", id: work.id });
            }
            if work.image.trim().is_empty() {
                return Err(CatalogError::EmptyImage { kind: "work", id: work.id });
            }
        }

        Ok(())
    }

    pub fn artworks(&self) -> &[ArtworkRecord] {
        &self.content.artworks
    }

    pub fn works(&self) -> &[WorkItem] {
        &self.content.works
    }

    pub fn biography(&self) -> &Biography {
        &self.content.biography
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.content.education
    }

    pub fn solo_exhibitions(&self) -> &[SoloExhibitionYear] {
        &self.content.solo_exhibitions
    }

    pub fn group_exhibitions(&self) -> &[GroupExhibition] {
        &self.content.group_exhibitions
    }

    /// Unique artwork years, newest first
    pub fn years(&self) -> Vec<i32> {
        descending_unique(self.content.artworks.iter().map(|a| a.year))
    }

    /// Unique categories in order of first appearance
    pub fn categories(&self) -> Vec<Category> {
        first_appearance(self.content.artworks.iter().map(|a| a.category))
    }

    /// Unique exhibition names in order of first appearance
    pub fn exhibitions(&self) -> Vec<String> {
        first_appearance(
            self.content
                .artworks
                .iter()
                .filter_map(|a| a.exhibition.clone()),
        )
    }

    /// Unique years of works that have one, newest first
    pub fn work_years(&self) -> Vec<i32> {
        descending_unique(self.content.works.iter().filter_map(|w| w.year))
    }

    /// Unique work kinds in order of first appearance
    pub fn work_kinds(&self) -> Vec<WorkKind> {
        first_appearance(self.content.works.iter().map(|w| w.kind))
    }

    /// Every image reference the content points at
    pub fn image_references(&self) -> impl Iterator<Item = &str> {
        self.content
            .artworks
            .iter()
            .map(|a| a.image.as_str())
            .chain(self.content.works.iter().map(|w| w.image.as_str()))
    }
}

fn descending_unique(values: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut values: Vec<i32> = values.collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.dedup();
    values
}

fn first_appearance<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut unique = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
