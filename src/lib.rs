pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::FileStore, CatalogConfig};
pub use core::wizard::{Step, WizardEngine};
pub use utils::error::{KeuzeError, Result};
