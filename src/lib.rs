pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, toml_config::GeneratorConfig, CliConfig};

pub use adapters::{http::HttpFetcher, prompt::TerminalPrompter};
pub use crate::core::{encoding::DiagramUrlEncoder, generator::ModelGenerator, render::render};
pub use utils::error::{GeneratorError, Result};
