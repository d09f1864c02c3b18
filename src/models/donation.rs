//! Donation model

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::null_as_default;

/// Review state of a donation offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    /// Waiting for a curator
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "PENDING",
            DonationStatus::Accepted => "ACCEPTED",
            DonationStatus::Rejected => "REJECTED",
        }
    }

    /// Polish label shown to donors
    pub fn label(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "Oczekuje",
            DonationStatus::Accepted => "Przyjęta",
            DonationStatus::Rejected => "Odrzucona",
        }
    }

    /// Whether a curator has already decided
    pub fn is_decided(&self) -> bool {
        !matches!(self, DonationStatus::Pending)
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(DonationStatus::Pending),
            "ACCEPTED" => Ok(DonationStatus::Accepted),
            "REJECTED" => Ok(DonationStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid donation status: {}", s)),
        }
    }
}

/// A visitor-submitted offer of an item for potential accession
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    /// A missing or `null` status reads as pending
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: DonationStatus,
    /// Submission time (server-local)
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub donor_email: String,
}

/// Body of `POST /donations`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationInput {
    pub item_name: String,
    pub description: String,
    /// `data:` URL of the item photo
    pub image_url: String,
}

/// Accepts `2024-05-01T12:30:00(.fff)` with or without a UTC offset.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(with_offset.naive_local()));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid createdAt '{}': {}", raw, e)))
}
