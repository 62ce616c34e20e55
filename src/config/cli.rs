use crate::domain::ports::{Slot, StateStore};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "keuzetool")]
#[command(about = "Interactive learning-track advisor for the LiS course catalog")]
pub struct Cli {
    /// Catalog configuration file; the embedded default catalog is used
    /// when absent.
    #[arg(long, global = true, value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from))]
    pub config: Option<PathBuf>,

    /// Directory holding the session and history slots.
    #[arg(long, global = true, default_value = "./state", value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from))]
    pub state_dir: PathBuf,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive questionnaire, resuming any saved session.
    Run,
    /// Print the catalog filter URL for the given selections.
    Url {
        /// Track codes, e.g. A,B
        #[arg(long, value_delimiter = ',')]
        tracks: Vec<String>,
        /// Module keys or free-form labels
        #[arg(long, value_delimiter = ',')]
        modules: Vec<String>,
    },
    /// Decode a share token and print the advice it carries.
    Decode { token: String },
    /// List completed advice sessions.
    History,
}

impl Validate for Cli {
    fn validate(&self) -> Result<()> {
        validation::validate_path("state_dir", &self.state_dir.to_string_lossy())?;
        if let Some(config) = &self.config {
            validation::validate_path("config", &config.to_string_lossy())?;
        }
        Ok(())
    }
}

/// File-backed state store: one JSON file per slot under the state
/// directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.base_path.join(format!("{}.json", slot.as_str()))
    }
}

impl StateStore for FileStore {
    fn load(&self, slot: Slot) -> Result<Option<Vec<u8>>> {
        match fs::read(self.slot_path(slot)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, slot: Slot, data: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.slot_path(slot), data)?;
        Ok(())
    }
}
