pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_BUNDLE_FILENAME: &str = "cv_bundle.zip";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cv-assembler")]
#[command(about = "Builds the skills matrix and CV template text from a JSON data file")]
pub struct CliConfig {
    /// Local path or http(s) URL of the CV data JSON
    #[arg(long, default_value = "data/template.json")]
    pub data: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub output_formats: Vec<String>,

    /// Year that "present" resolves to (defaults to the current year)
    #[arg(long)]
    pub current_year: Option<i32>,

    /// Plain-text template whose {{PLACEHOLDERS}} are filled into cv.txt
    #[arg(long)]
    pub text_template: Option<String>,

    #[arg(long, default_value = DEFAULT_BUNDLE_FILENAME)]
    pub bundle_filename: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_source(&self) -> &str {
        &self.data
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn current_year(&self) -> Option<i32> {
        self.current_year
    }

    fn text_template(&self) -> Option<&str> {
        self.text_template.as_deref()
    }

    fn bundle_filename(&self) -> &str {
        &self.bundle_filename
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_data_source("data", &self.data)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("output_formats", &self.output_formats)?;
        validation::validate_path("bundle_filename", &self.bundle_filename)?;
        if let Some(year) = self.current_year {
            validation::validate_range("current_year", year, validation::MIN_YEAR, validation::MAX_YEAR)?;
        }
        if let Some(template) = &self.text_template {
            validation::validate_path("text_template", template)?;
        }
        Ok(())
    }
}
