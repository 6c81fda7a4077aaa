use crate::core::encoding::{DiagramVariant, DEFAULT_SERVER};
use crate::core::store::DEFAULT_DATA_FILE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GeneratorError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_DIR: &str = "./dist";
pub const DEFAULT_DIAGRAM_FILE: &str = "service-package.puml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub data_file: String,
    pub diagram_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_OUTPUT_DIR.to_string(),
            data_file: DEFAULT_DATA_FILE.to_string(),
            diagram_file: DEFAULT_DIAGRAM_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub server: String,
    pub variant: DiagramVariant,
    pub download: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            variant: DiagramVariant::default(),
            download: false,
        }
    }
}

impl GeneratorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GeneratorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GeneratorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PLANTUML_SERVER})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GeneratorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("renderer.server", &self.renderer.server)?;
        validation::validate_path("output.dir", &self.output.dir)?;
        validation::validate_file_name("output.data_file", &self.output.data_file)?;
        validation::validate_file_name("output.diagram_file", &self.output.diagram_file)?;

        if self.output.data_file == self.output.diagram_file {
            return Err(GeneratorError::InvalidConfigValueError {
                field: "output.diagram_file".to_string(),
                value: self.output.diagram_file.clone(),
                reason: "Diagram file would overwrite the data file".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for GeneratorConfig {
    fn output_dir(&self) -> &str {
        &self.output.dir
    }

    fn data_file(&self) -> &str {
        &self.output.data_file
    }

    fn diagram_file(&self) -> &str {
        &self.output.diagram_file
    }

    fn server(&self) -> &str {
        &self.renderer.server
    }

    fn variant(&self) -> DiagramVariant {
        self.renderer.variant
    }

    fn download(&self) -> bool {
        self.renderer.download
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
