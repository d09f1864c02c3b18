//! Exhibit model
//!
//! This module provides:
//! - `Exhibit` entity, a single catalogued museum object
//! - `ExhibitCategory`, the closed set of collection categories
//! - `ExhibitInput` for create/update calls
//! - `ExhibitSearchCriteria` for server-side filtering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::null_as_default;

/// Exhibit entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibit {
    /// Unique identifier (assigned by the server, grows with insertion order)
    pub id: i64,
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-text description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Production year as entered by the curator ("1939", "ok. 1938")
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_year: String,
    /// Image URL or `data:` URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    /// Collection category
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: ExhibitCategory,
}

impl Exhibit {
    /// Production year parsed as a leading integer.
    ///
    /// `"1939"` and `"1939-1945"` yield 1939; `"ok. 1939"` and `""` yield `None`.
    pub fn parsed_year(&self) -> Option<i32> {
        let trimmed = self.production_year.trim_start();
        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let end = digits
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(digits.len());
        digits[..end].parse::<i32>().ok().map(|year| sign * year)
    }
}

/// Collection category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExhibitCategory {
    /// Umundurowanie
    Uniforms,
    /// Wyposażenie
    Equipment,
    /// Uzbrojenie
    Weaponry,
    /// Dokumenty
    Documents,
    /// Fotografie
    Photos,
    /// Przedmioty dnia codziennego. The server enum is misspelled.
    #[serde(alias = "EVERTYDAY_OBJECTS")]
    EverydayObjects,
    /// Inne; also any category this client does not know
    #[default]
    #[serde(other)]
    Other,
}

impl ExhibitCategory {
    /// All categories in catalog order
    pub const ALL: [ExhibitCategory; 7] = [
        ExhibitCategory::Uniforms,
        ExhibitCategory::Equipment,
        ExhibitCategory::Weaponry,
        ExhibitCategory::Documents,
        ExhibitCategory::Photos,
        ExhibitCategory::EverydayObjects,
        ExhibitCategory::Other,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ExhibitCategory::Uniforms => "UNIFORMS",
            ExhibitCategory::Equipment => "EQUIPMENT",
            ExhibitCategory::Weaponry => "WEAPONRY",
            ExhibitCategory::Documents => "DOCUMENTS",
            ExhibitCategory::Photos => "PHOTOS",
            ExhibitCategory::EverydayObjects => "EVERYDAY_OBJECTS",
            ExhibitCategory::Other => "OTHER",
        }
    }

    /// Name of the server-side enum constant, matched by the `category`
    /// query filter of `GET /exhibits`
    pub fn server_name(&self) -> &'static str {
        match self {
            ExhibitCategory::EverydayObjects => "EVERTYDAY_OBJECTS",
            other => other.as_str(),
        }
    }

    /// Polish label shown to visitors
    pub fn label(&self) -> &'static str {
        match self {
            ExhibitCategory::Uniforms => "Umundurowanie",
            ExhibitCategory::Equipment => "Wyposażenie",
            ExhibitCategory::Weaponry => "Uzbrojenie",
            ExhibitCategory::Documents => "Dokumenty",
            ExhibitCategory::Photos => "Fotografie",
            ExhibitCategory::EverydayObjects => "Przedmioty dnia codziennego",
            ExhibitCategory::Other => "Inne",
        }
    }
}

impl fmt::Display for ExhibitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExhibitCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        match normalized.as_str() {
            "UNIFORMS" => Ok(ExhibitCategory::Uniforms),
            "EQUIPMENT" => Ok(ExhibitCategory::Equipment),
            "WEAPONRY" => Ok(ExhibitCategory::Weaponry),
            "DOCUMENTS" => Ok(ExhibitCategory::Documents),
            "PHOTOS" => Ok(ExhibitCategory::Photos),
            "EVERYDAY_OBJECTS" | "EVERTYDAY_OBJECTS" => Ok(ExhibitCategory::EverydayObjects),
            "OTHER" => Ok(ExhibitCategory::Other),
            _ => Err(anyhow::anyhow!("Invalid exhibit category: {}", s)),
        }
    }
}

/// Body of `POST /exhibits` and `PUT /exhibits/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitInput {
    pub name: String,
    pub description: String,
    pub production_year: String,
    pub image_url: String,
    pub category: ExhibitCategory,
}

impl Default for ExhibitInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            production_year: String::new(),
            image_url: String::new(),
            category: ExhibitCategory::Uniforms,
        }
    }
}

impl From<&Exhibit> for ExhibitInput {
    fn from(exhibit: &Exhibit) -> Self {
        Self {
            name: exhibit.name.clone(),
            description: exhibit.description.clone(),
            production_year: exhibit.production_year.clone(),
            image_url: exhibit.image_url.clone(),
            category: exhibit.category,
        }
    }
}

/// Query object accepted by `GET /exhibits`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExhibitSearchCriteria {
    /// Partial, case-insensitive name match
    pub name: Option<String>,
    /// Exact category
    pub category: Option<ExhibitCategory>,
    /// Exact production year
    pub production_year: Option<i32>,
}

impl ExhibitSearchCriteria {
    /// Query string pairs for the criteria that are set
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            query.push(("name", name.to_string()));
        }
        if let Some(category) = self.category {
            query.push(("category", category.server_name().to_string()));
        }
        if let Some(year) = self.production_year {
            query.push(("productionYear", year.to_string()));
        }
        query
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}
