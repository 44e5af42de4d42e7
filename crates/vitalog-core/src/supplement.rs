//! Supplement catalog: read-only reference data.
//!
//! The catalog supplies display names and timing metadata consumed by the
//! rewards ledger and the reminder helper. It loads from a JSON file,
//! falling back to a bundled sample set.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const BUILTIN_CATALOG: &str = include_str!("../data/supplements.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplementCategory {
    Vitamin,
    Mineral,
    Herbal,
    Specialty,
}

/// A single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplement {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub special_notes: String,
    #[serde(default)]
    pub synergies: Vec<String>,
    #[serde(default)]
    pub incompatible_with: Vec<String>,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub food_sources: Vec<String>,
    #[serde(default)]
    pub is_morning: bool,
    #[serde(default)]
    pub is_midday: bool,
    #[serde(default)]
    pub is_evening: bool,
    #[serde(default = "default_meal_timing", rename = "meal_timing")]
    pub meal_timing: String,
}

fn default_meal_timing() -> String {
    "with_meal".to_string()
}

impl Supplement {
    /// Category derived from the supplement name.
    pub fn category(&self) -> SupplementCategory {
        let name = self.name.to_lowercase();
        const MINERALS: [&str; 5] = ["zinc", "magnesium", "iron", "calcium", "selenium"];
        const HERBALS: [&str; 3] = ["triphala", "mumijo", "shilajit"];
        if name.contains("vitamin") {
            SupplementCategory::Vitamin
        } else if MINERALS.iter().any(|m| name.contains(m)) {
            SupplementCategory::Mineral
        } else if HERBALS.iter().any(|h| name.contains(h)) {
            SupplementCategory::Herbal
        } else {
            SupplementCategory::Specialty
        }
    }

    /// Display string for timing flags, e.g. "Morning, Evening".
    pub fn timing_display(&self) -> String {
        let mut times = Vec::new();
        if self.is_morning {
            times.push("Morning");
        }
        if self.is_midday {
            times.push("Midday");
        }
        if self.is_evening {
            times.push("Evening");
        }
        if times.is_empty() {
            "Anytime".to_string()
        } else {
            times.join(", ")
        }
    }
}

/// Read-only supplement reference data.
#[derive(Debug, Clone)]
pub struct SupplementCatalog {
    supplements: Vec<Supplement>,
}

impl SupplementCatalog {
    /// Bundled sample catalog.
    pub fn builtin() -> Self {
        // The bundled JSON is validated by tests; an empty catalog is the
        // only safe fallback if it were ever malformed.
        let supplements = serde_json::from_str(BUILTIN_CATALOG).unwrap_or_default();
        Self { supplements }
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let supplements: Vec<Supplement> = serde_json::from_str(&content)?;
        Ok(Self { supplements })
    }

    pub fn all(&self) -> &[Supplement] {
        &self.supplements
    }

    pub fn get(&self, id: &str) -> Option<&Supplement> {
        self.supplements.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.supplements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supplements.is_empty()
    }
}
