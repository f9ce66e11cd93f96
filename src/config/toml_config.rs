use crate::config::DEFAULT_BUNDLE_FILENAME;
use crate::core::ConfigProvider;
use crate::utils::error::{AssemblyError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub document: DocumentConfig,
    pub source: SourceConfig,
    pub templates: Option<TemplatesConfig>,
    pub matrix: Option<MatrixConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Local path or http(s) URL of the CV data JSON.
    pub data: String,
    pub timeout_seconds: Option<u64>,
}

/// Google Docs templates the rendered text is destined for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    pub listpage_url: Option<String>,
    pub maininfo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatrixConfig {
    pub current_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub bundle_filename: Option<String>,
    pub text_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AssemblyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CV_DATA_URL})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("document.title", &self.document.title)?;
        validation::validate_data_source("source.data", &self.source.data)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        if let Some(filename) = &self.load.bundle_filename {
            validation::validate_path("load.bundle_filename", filename)?;
        }
        if let Some(year) = self.matrix.as_ref().and_then(|m| m.current_year) {
            validation::validate_range(
                "matrix.current_year",
                year,
                validation::MIN_YEAR,
                validation::MAX_YEAR,
            )?;
        }

        self.template_document_ids()?;
        Ok(())
    }

    /// `(name, document id)` for every configured template URL.
    pub fn template_document_ids(&self) -> Result<Vec<(&'static str, String)>> {
        let Some(templates) = &self.templates else {
            return Ok(Vec::new());
        };

        let mut ids = Vec::new();
        for (name, field, url) in [
            ("listpage", "templates.listpage_url", &templates.listpage_url),
            ("maininfo", "templates.maininfo_url", &templates.maininfo_url),
        ] {
            if let Some(url) = url {
                ids.push((name, validation::document_id_from_url(field, url)?));
            }
        }
        Ok(ids)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_source(&self) -> &str {
        &self.source.data
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn current_year(&self) -> Option<i32> {
        self.matrix.as_ref().and_then(|m| m.current_year)
    }

    fn text_template(&self) -> Option<&str> {
        self.load.text_template.as_deref()
    }

    fn bundle_filename(&self) -> &str {
        self.load
            .bundle_filename
            .as_deref()
            .unwrap_or(DEFAULT_BUNDLE_FILENAME)
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
