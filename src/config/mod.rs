pub mod cli;
pub mod toml_config;

use crate::config::toml_config::GeneratorConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "service-definition-model")]
#[command(about = "Interactively model services and render them as a PlantUML class diagram")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory for data.json, the .puml source and the downloaded diagram
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Base URL of the PlantUML rendering server
    #[arg(long)]
    pub server: Option<String>,

    /// Link to the editable markup rendition instead of the SVG
    #[arg(long)]
    pub markup: bool,

    /// Download the rendered diagram next to the model
    #[arg(long)]
    pub download: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// File configuration (or defaults) with command line overrides applied.
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                GeneratorConfig::from_file(path)?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(server) = &self.server {
            config.renderer.server = server.clone();
        }
        if self.markup {
            config.renderer.variant =
                crate::core::encoding::DiagramVariant::from_change_flag(self.markup);
        }
        if self.download {
            config.renderer.download = true;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoding::DiagramVariant;
    use crate::domain::ports::ConfigProvider;

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "service-definition-model",
            "--output-dir",
            "/tmp/model",
            "--server",
            "http://localhost:8080/plantuml",
            "--markup",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.output_dir(), "/tmp/model");
        assert_eq!(config.server(), "http://localhost:8080/plantuml");
        assert_eq!(config.variant(), DiagramVariant::Markup);
        assert!(!config.download());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = CliConfig::parse_from([
            "service-definition-model",
            "--config",
            "/definitely/not/here.toml",
        ]);
        assert!(cli.resolve().is_err());
    }
}
