pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{engine::SpliceEngine, pipeline::SplicePipeline};
pub use crate::utils::error::{Result, SpliceError};
