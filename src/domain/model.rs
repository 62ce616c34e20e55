use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fixed programme category a user can pursue (e.g. "NPI Engineer").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub code: String,
    pub label: String,
}

/// A single course unit from the static catalog. The label may carry a
/// parenthetical track annotation, e.g. "CMM meten en controleren (C)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub key: String,
    pub label: String,
    pub tracks: Vec<String>,
    pub desc: String,
}

/// Self-assessed familiarity with a module's subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetenceLevel {
    NotFamiliar,
    SomeExperience,
    Skilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPreference {
    Yes,
    No,
}

/// Mutable questionnaire state, built up step by step.
///
/// `wants_contact` is tri-state: `None` means the question was not answered
/// yet, which is what gates the contact step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub role: String,
    /// Chosen track codes, in the order the user picked them.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Module key -> self-assessed competence.
    #[serde(default)]
    pub competences: BTreeMap<String, CompetenceLevel>,
    pub wants_contact: Option<ContactPreference>,
}

/// Immutable snapshot produced when a wizard session completes. Appended to
/// the history slot and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub created_at: DateTime<Utc>,
    pub selection: Selection,
    /// Keys of the recommended modules, in catalog order.
    pub recommended: Vec<String>,
}

/// Input to the module-slug mapper: either a raw label or a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ModulePick {
    Label(String),
    Module(Module),
}

impl ModulePick {
    pub fn label(&self) -> &str {
        match self {
            ModulePick::Label(label) => label,
            ModulePick::Module(module) => &module.label,
        }
    }
}
