//! Muscle Catalog
//!
//! The fixed, ordered list of muscle records studied with flashcards.
//! Records are created once from a hard-coded table and never change.

mod data;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body region a muscle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Arm,
    Leg,
    Core,
    Back,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Arm, Category::Leg, Category::Core, Category::Back];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Arm => "arm",
            Category::Leg => "leg",
            Category::Core => "core",
            Category::Back => "back",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Arm => "💪",
            Category::Leg => "🦵",
            Category::Core => "🫁",
            Category::Back => "🔙",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleRecord {
    pub id: u32,
    pub name: &'static str,
    pub image_url: &'static str,
    pub description: &'static str,
    pub origin: &'static str,
    pub insertion: &'static str,
    pub function: &'static str,
    pub category: Category,
}

/// Category selection of the flashcard view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Arm,
    Leg,
    Core,
    Back,
}

impl CategoryFilter {
    pub const OPTIONS: [CategoryFilter; 5] = [
        CategoryFilter::All,
        CategoryFilter::Arm,
        CategoryFilter::Leg,
        CategoryFilter::Core,
        CategoryFilter::Back,
    ];

    /// The single category this filter narrows to, `None` for "all"
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Arm => Some(Category::Arm),
            CategoryFilter::Leg => Some(Category::Leg),
            CategoryFilter::Core => Some(Category::Core),
            CategoryFilter::Back => Some(Category::Back),
        }
    }

    pub fn matches(&self, record: &MuscleRecord) -> bool {
        self.category().map_or(true, |c| c == record.category)
    }

    pub fn as_str(&self) -> &'static str {
        self.category().map_or("all", |c| c.as_str())
    }

    pub fn icon(&self) -> &'static str {
        self.category().map_or("📚", |c| c.icon())
    }

    /// Label used by the category selector
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All muscles",
            CategoryFilter::Arm => "Arm muscles",
            CategoryFilter::Leg => "Leg muscles",
            CategoryFilter::Core => "Core muscles",
            CategoryFilter::Back => "Back muscles",
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        match category {
            Category::Arm => CategoryFilter::Arm,
            Category::Leg => CategoryFilter::Leg,
            Category::Core => CategoryFilter::Core,
            Category::Back => CategoryFilter::Back,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "arm" => Ok(CategoryFilter::Arm),
            "leg" => Ok(CategoryFilter::Leg),
            "core" => Ok(CategoryFilter::Core),
            "back" => Ok(CategoryFilter::Back),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Returned when a category name does not parse
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown category '{0}' (expected all, arm, leg, core or back)")]
pub struct UnknownCategory(pub String);

/// The full catalog in display order
pub fn catalog() -> &'static [MuscleRecord] {
    &data::MUSCLES
}

/// Stable sub-sequence of `records` matching `filter`
pub fn filter(records: &'static [MuscleRecord], filter: CategoryFilter) -> Vec<&'static MuscleRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Look up a record by id
pub fn find(id: u32) -> Option<&'static MuscleRecord> {
    catalog().iter().find(|r| r.id == id)
}
