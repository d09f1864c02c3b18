//! Exhibition model

use serde::{Deserialize, Serialize};

use super::{null_as_default, Exhibit};

/// A curated, named grouping of exhibits with a banner image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub background_image_url: String,
    /// Exhibits in display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub exhibits: Vec<Exhibit>,
}

impl Exhibition {
    /// Ids of the contained exhibits, in display order
    pub fn exhibit_ids(&self) -> Vec<i64> {
        self.exhibits.iter().map(|e| e.id).collect()
    }
}

/// Body of `POST /exhibitions` and `PUT /exhibitions/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionInput {
    pub name: String,
    pub description: String,
    pub background_image_url: String,
    pub exhibit_ids: Vec<i64>,
}
