pub mod cli;

use crate::core::wizard::{Step, SELECTION_FIELDS};
use crate::domain::model::{Module, Track};
use crate::utils::error::{KeuzeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default catalog shipped inside the binary, so the tool works with zero
/// setup. `--config` replaces it wholesale.
pub const DEFAULT_CONFIG: &str = include_str!("../../keuzetool.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: CatalogSection,
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub steps: Vec<StepRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub base_url: String,
    pub personal_advice_url: String,
}

/// Fields that must be filled in before the named step lets the user
/// continue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRule {
    pub step: String,
    pub requires: Vec<String>,
}

impl CatalogConfig {
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KeuzeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| KeuzeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` references with the environment value, leaving
    /// unknown variables untouched.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn base_url(&self) -> &str {
        &self.catalog.base_url
    }

    pub fn personal_advice_url(&self) -> &str {
        &self.catalog.personal_advice_url
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn track_label(&self, code: &str) -> Option<&str> {
        self.tracks
            .iter()
            .find(|track| track.code == code)
            .map(|track| track.label.as_str())
    }

    pub fn module(&self, key: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.key == key)
    }

    /// Required-field list for a step; steps without a rule advance freely.
    pub fn required_fields(&self, step: &str) -> &[String] {
        self.steps
            .iter()
            .find(|rule| rule.step == step)
            .map(|rule| rule.requires.as_slice())
            .unwrap_or(&[])
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("catalog.base_url", &self.catalog.base_url)?;
        validation::validate_url(
            "catalog.personal_advice_url",
            &self.catalog.personal_advice_url,
        )?;

        if self.tracks.is_empty() {
            return Err(KeuzeError::MissingConfigError {
                field: "tracks".to_string(),
            });
        }

        let mut track_codes: HashSet<&str> = HashSet::new();
        for track in &self.tracks {
            validation::validate_non_empty_string("tracks.code", &track.code)?;
            validation::validate_non_empty_string("tracks.label", &track.label)?;
            if !track_codes.insert(track.code.as_str()) {
                return Err(KeuzeError::InvalidConfigValueError {
                    field: "tracks.code".to_string(),
                    value: track.code.clone(),
                    reason: "Duplicate track code".to_string(),
                });
            }
        }

        let mut module_keys: HashSet<&str> = HashSet::new();
        for module in &self.modules {
            validation::validate_non_empty_string("modules.key", &module.key)?;
            validation::validate_non_empty_string("modules.label", &module.label)?;
            if !module_keys.insert(module.key.as_str()) {
                return Err(KeuzeError::InvalidConfigValueError {
                    field: "modules.key".to_string(),
                    value: module.key.clone(),
                    reason: "Duplicate module key".to_string(),
                });
            }
            for code in &module.tracks {
                if !track_codes.contains(code.as_str()) {
                    return Err(KeuzeError::InvalidConfigValueError {
                        field: "modules.tracks".to_string(),
                        value: code.clone(),
                        reason: format!("Module '{}' references an undefined track", module.key),
                    });
                }
            }
        }

        for rule in &self.steps {
            if Step::from_name(&rule.step).is_none() {
                return Err(KeuzeError::InvalidConfigValueError {
                    field: "steps.step".to_string(),
                    value: rule.step.clone(),
                    reason: format!(
                        "Unknown step. Valid steps: {}",
                        Step::ALL.map(|s| s.name()).join(", ")
                    ),
                });
            }
            for field in &rule.requires {
                if !SELECTION_FIELDS.contains(&field.as_str()) {
                    return Err(KeuzeError::InvalidConfigValueError {
                        field: "steps.requires".to_string(),
                        value: field.clone(),
                        reason: format!(
                            "Unknown field. Valid fields: {}",
                            SELECTION_FIELDS.join(", ")
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
