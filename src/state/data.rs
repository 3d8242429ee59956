//! Shared data structures for the application state
//!
//! These structs represent the content model that flows between
//! the embedded content bundle and the UI layer. Everything here is
//! immutable once parsed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad classification of an artwork, used as a gallery facet
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Traditional,
    NonTraditional,
    Minimalistic,
}

impl Category {
    /// Human-readable label for filter controls and captions
    pub fn label(&self) -> &'static str {
        match self {
            Category::Traditional => "Traditional",
            Category::NonTraditional => "Non-traditional",
            Category::Minimalistic => "Minimalistic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents a single artwork in the gallery catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArtworkRecord {
    /// Unique catalog ID
    pub id: u32,
    pub title: String,
    pub year: i32,
    /// Image reference relative to the assets directory (e.g. "/images/gallery/01.jpg")
    pub image: String,
    pub category: Category,
    /// Exhibition the work was shown at, if any
    #[serde(default)]
    pub exhibition: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Technique of a work-in-progress item
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkKind {
    #[serde(rename = "malba")]
    Painting,
    #[serde(rename = "kresba")]
    Drawing,
    #[serde(rename = "grafika")]
    Print,
}

impl WorkKind {
    pub fn label(&self) -> &'static str {
        match self {
            WorkKind::Painting => "Painting",
            WorkKind::Drawing => "Drawing",
            WorkKind::Print => "Print",
        }
    }
}

impl fmt::Display for WorkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An item of the artist's own ongoing work
///
/// Names and years are often filled in later, so both may be absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub id: u32,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: WorkKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl WorkItem {
    /// Display label; falls back to "{kind} {id}" while the name is empty
    pub fn label(&self) -> String {
        if self.name.trim().is_empty() {
            format!("{} {}", self.kind, self.id)
        } else {
            self.name.clone()
        }
    }
}

/// Anything that can be laid out in an image grid and shown in the lightbox
pub trait GridItem {
    /// Image reference relative to the assets directory
    fn image(&self) -> &str;
    /// Primary caption line
    fn caption(&self) -> String;
    /// Secondary caption line (year, medium...)
    fn details(&self) -> Option<String>;
}

impl GridItem for ArtworkRecord {
    fn image(&self) -> &str {
        &self.image
    }

    fn caption(&self) -> String {
        self.title.clone()
    }

    fn details(&self) -> Option<String> {
        let mut parts = vec![self.year.to_string(), self.category.label().to_string()];
        if let Some(medium) = &self.medium {
            parts.push(medium.clone());
        }
        if let Some(dimensions) = &self.dimensions {
            parts.push(dimensions.clone());
        }
        Some(parts.join(" • "))
    }
}

impl GridItem for WorkItem {
    fn image(&self) -> &str {
        &self.image
    }

    fn caption(&self) -> String {
        self.label()
    }

    fn details(&self) -> Option<String> {
        self.year.map(|year| year.to_string())
    }
}

/// A link shown in the footer and on the biography page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

/// Biography page content
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Biography {
    pub name: String,
    pub subtitle: String,
    pub statement: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub contacts: Vec<ContactLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EducationEntry {
    pub years: String,
    pub institution: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExhibitionEntry {
    pub title: String,
    pub venue: String,
}

/// Solo exhibitions grouped under a single year heading
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SoloExhibitionYear {
    pub year: String,
    pub exhibitions: Vec<ExhibitionEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GroupExhibition {
    pub year: String,
    pub title: String,
    pub venue: String,
}

/// Everything the application displays, as bundled at build time
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub biography: Biography,
    pub artworks: Vec<ArtworkRecord>,
    #[serde(default)]
    pub works: Vec<WorkItem>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub solo_exhibitions: Vec<SoloExhibitionYear>,
    #[serde(default)]
    pub group_exhibitions: Vec<GroupExhibition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_uses_kebab_case() {
        let json = serde_json::to_string(&Category::NonTraditional).unwrap();
        assert_eq!(json, "\"non-traditional\"");

        let parsed: Category = serde_json::from_str("\"minimalistic\"").unwrap();
        assert_eq!(parsed, Category::Minimalistic);
    }

    #[test]
    fn test_artwork_optional_fields_default() {
        let json = r#"{
            "id": 42,
            "title": "Study",
            "year": 2023,
            "image": "/images/study.jpg",
            "category": "traditional"
        }"#;
        let record: ArtworkRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.exhibition, None);
        assert_eq!(record.medium, None);
        assert!(record.tags.is_empty());
        assert_eq!(record.details().as_deref(), Some("2023 • Traditional"));
    }

    #[test]
    fn test_work_item_label_falls_back_to_kind() {
        let json = r#"{ "id": 7, "image": "/images/tvorba/grafika1.jpg", "type": "grafika", "name": "", "year": null }"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.kind, WorkKind::Print);
        assert_eq!(item.label(), "Print 7");
        assert_eq!(item.details(), None);

        let named = WorkItem { name: "Bez názvu".to_string(), ..item };
        assert_eq!(named.caption(), "Bez názvu");
    }
}
