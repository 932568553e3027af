use std::collections::BTreeSet;

use serde::{Deserialize, Serialize, Serializer};

use super::error::EntryRejection;
use crate::model::Category;

/// A validated service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCatalogEntry {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub capabilities: Vec<String>,
    pub tags: BTreeSet<String>,
    pub success_rate: f32,
    pub past_project_count: u32,
}

/// Per-entry validation failure collected during a catalog load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogValidationWarning {
    /// Position of the entry in the source document.
    pub index: usize,
    /// Entry id, when one could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(serialize_with = "serialize_display")]
    pub reason: EntryRejection,
}

impl std::fmt::Display for CatalogValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            Some(id) => write!(f, "entry #{} ('{}'): {}", self.index, id, self.reason),
            None => write!(f, "entry #{}: {}", self.index, self.reason),
        }
    }
}

fn serialize_display<S: Serializer>(value: &EntryRejection, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

/// Loosely typed mirror of a catalog source object.
///
/// Every field is optional so that a missing field becomes a rejection reason
/// instead of failing the whole document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCatalogEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub capabilities: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub success_rate: Option<f64>,
    #[serde(alias = "pastProjectCount")]
    pub past_projects: Option<i64>,
}

impl RawCatalogEntry {
    /// Converts into a validated entry, trimming text and dropping blank list items.
    pub(crate) fn into_entry(self) -> Result<ServiceCatalogEntry, EntryRejection> {
        let id = required_text(self.id, "id")?;
        let name = required_text(self.name, "name")?;
        let category_raw = required_text(self.category, "category")?;
        let category = category_raw
            .parse::<Category>()
            .map_err(|_| EntryRejection::UnknownCategory(category_raw))?;
        let description = required_text(self.description, "description")?;

        let capabilities: Vec<String> = self
            .capabilities
            .ok_or(EntryRejection::MissingField("capabilities"))?
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        let tags: BTreeSet<String> = self
            .tags
            .ok_or(EntryRejection::MissingField("tags"))?
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let success_rate = self
            .success_rate
            .ok_or(EntryRejection::MissingField("successRate"))?;
        let past_projects = self
            .past_projects
            .ok_or(EntryRejection::MissingField("pastProjects"))?;
        if past_projects < 0 {
            return Err(EntryRejection::NegativePastProjects(past_projects));
        }
        if !success_rate.is_finite() || !(0.0..=1.0).contains(&success_rate) {
            return Err(EntryRejection::SuccessRateOutOfRange(success_rate));
        }

        let entry = ServiceCatalogEntry {
            id,
            name,
            category,
            description,
            capabilities,
            tags,
            success_rate: success_rate as f32,
            past_project_count: u32::try_from(past_projects).unwrap_or(u32::MAX),
        };
        entry.validate()?;
        Ok(entry)
    }
}

impl ServiceCatalogEntry {
    /// Checks the invariants every catalog entry must hold.
    pub fn validate(&self) -> Result<(), EntryRejection> {
        for (field, value) in [
            ("id", &self.id),
            ("name", &self.name),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(EntryRejection::BlankField(field));
            }
        }
        if !crate::constants::is_unit_interval(self.success_rate) {
            return Err(EntryRejection::SuccessRateOutOfRange(
                self.success_rate as f64,
            ));
        }
        if self.capabilities.iter().all(|c| c.trim().is_empty()) {
            return Err(EntryRejection::EmptyCapabilities);
        }
        if self.tags.iter().all(|t| t.trim().is_empty()) {
            return Err(EntryRejection::EmptyTags);
        }
        Ok(())
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, EntryRejection> {
    let value = value.ok_or(EntryRejection::MissingField(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EntryRejection::BlankField(field));
    }
    Ok(trimmed.to_string())
}
