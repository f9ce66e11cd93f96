use crate::core::{AssemblyResult, ConfigProvider, CvData, Pipeline, Storage};
use crate::domain::model::SkillRow;
use crate::domain::services::build_skills_table;
use crate::domain::services::sections::{
    placeholder_replacements, project_sections, render_template, skill_sections,
    unresolved_placeholders,
};
use crate::utils::error::{AssemblyError, Result};
use crate::utils::validation::is_remote_source;
use chrono::Datelike;
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const TABLE_HEADER: [&str; 4] = ["Category", "Skill", "Years", "Last Used"];

pub const CSV_ENTRY: &str = "skills_matrix.csv";
pub const TSV_ENTRY: &str = "skills_matrix.tsv";
pub const JSON_ENTRY: &str = "cv_sections.json";
pub const TEXT_ENTRY: &str = "cv.txt";

/// Pipeline that turns a CV data file into a skills matrix / template bundle.
pub struct CvPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: Client,
}

impl<S: Storage, C: ConfigProvider> CvPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.config.request_timeout_seconds() {
            request = request.timeout(Duration::from_secs(timeout));
        }

        tracing::debug!("Making API request to: {}", url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(AssemblyError::ApiStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn resolve_current_year(&self) -> i32 {
        self.config
            .current_year()
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

fn write_table(rows: &[SkillRow], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(TABLE_HEADER)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AssemblyError::ProcessingError {
            message: format!("Failed to flush table: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| AssemblyError::ProcessingError {
        message: format!("Table is not valid UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CvPipeline<S, C> {
    async fn extract(&self) -> Result<CvData> {
        let source = self.config.data_source();
        tracing::info!("📥 Loading CV data from: {}", source);

        let bytes = if is_remote_source(source) {
            self.fetch_remote(source).await?
        } else {
            tokio::fs::read(source).await?
        };

        let data: CvData = serde_json::from_slice(&bytes)?;
        if data.skills.catalogue.is_empty() {
            tracing::warn!("CV data has no skill categories; the skills matrix will be empty");
        }
        if data.projects.is_empty() {
            tracing::warn!("CV data has no projects; every skill will show '-'");
        }
        Ok(data)
    }

    async fn transform(&self, data: CvData) -> Result<AssemblyResult> {
        let current_year = self.resolve_current_year();
        tracing::info!(
            "🔧 Aggregating experience for {} projects (present = {})",
            data.projects.len(),
            current_year
        );

        let skills_matrix = build_skills_table(&data.skills.catalogue, &data.projects, current_year)?;
        let replacements = placeholder_replacements(&data);

        let rendered_text = match self.config.text_template() {
            Some(path) => {
                let template = tokio::fs::read_to_string(path).await?;
                let text = render_template(&template, &replacements);
                let leftover = unresolved_placeholders(&text);
                if !leftover.is_empty() {
                    tracing::warn!(
                        "Template '{}' still has unfilled placeholders: {}",
                        path,
                        leftover.join(", ")
                    );
                }
                Some(text)
            }
            None => None,
        };

        Ok(AssemblyResult {
            current_year,
            csv_output: write_table(&skills_matrix, b',')?,
            tsv_output: write_table(&skills_matrix, b'\t')?,
            skill_sections: skill_sections(&data.skills.catalogue),
            project_sections: project_sections(&data.projects),
            skills_matrix,
            replacements,
            rendered_text,
        })
    }

    async fn load(&self, result: AssemblyResult) -> Result<String> {
        let bundle = self.config.bundle_filename();
        let formats = self.config.output_formats();
        let wants = |format: &str| formats.iter().any(|f| f == format);

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            let options = SimpleFileOptions::default();

            if wants("csv") {
                zip.start_file(CSV_ENTRY, options)?;
                zip.write_all(result.csv_output.as_bytes())?;
            }

            if wants("tsv") {
                zip.start_file(TSV_ENTRY, options)?;
                zip.write_all(result.tsv_output.as_bytes())?;
            }

            if wants("json") {
                zip.start_file(JSON_ENTRY, options)?;
                let json_data = serde_json::to_string_pretty(&result)?;
                zip.write_all(json_data.as_bytes())?;
            }

            if let Some(text) = &result.rendered_text {
                zip.start_file(TEXT_ENTRY, options)?;
                zip.write_all(text.as_bytes())?;
            }

            zip.finish()?.into_inner()
        };

        tracing::debug!("Writing bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file(bundle, &zip_data).await?;

        let output_path = Path::new(self.config.output_path())
            .join(bundle)
            .display()
            .to_string();
        tracing::info!("📦 Bundle saved: {}", output_path);
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CvData, SkillsSection};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                AssemblyError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        data: String,
        formats: Vec<String>,
        current_year: Option<i32>,
    }

    impl ConfigProvider for TestConfig {
        fn data_source(&self) -> &str {
            &self.data
        }

        fn output_path(&self) -> &str {
            "./out"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn current_year(&self) -> Option<i32> {
            self.current_year
        }

        fn text_template(&self) -> Option<&str> {
            None
        }

        fn bundle_filename(&self) -> &str {
            "bundle.zip"
        }
    }

    fn pipeline(formats: &[&str], current_year: Option<i32>) -> CvPipeline<MockStorage, TestConfig> {
        CvPipeline::new(
            MockStorage::default(),
            TestConfig {
                data: "unused.json".to_string(),
                formats: formats.iter().map(|f| f.to_string()).collect(),
                current_year,
            },
        )
    }

    fn sample_data() -> CvData {
        serde_json::from_value(serde_json::json!({
            "skills": {"languages": ["Python", "Go (basic)"]},
            "projects": [
                {"period": {"start": "01.2019", "end": "12.2020"}, "environment": ["Python"]},
                {"period": {"start": "01.2021", "end": "present"}, "environment": ["Go, Python"]}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_transform_writes_csv_and_tsv() {
        let result = pipeline(&["csv"], Some(2024))
            .transform(sample_data())
            .await
            .unwrap();

        assert_eq!(result.current_year, 2024);
        assert_eq!(
            result.csv_output,
            "Category,Skill,Years,Last Used\nLanguages,Python,6,2024\n,Go,4,2024\n"
        );
        assert!(result.tsv_output.starts_with("Category\tSkill\tYears\tLast Used\n"));
        assert_eq!(result.skill_sections[0].value, "Python, Go (basic).");
    }

    #[tokio::test]
    async fn test_transform_defaults_to_clock_year() {
        let result = pipeline(&["csv"], None)
            .transform(sample_data())
            .await
            .unwrap();
        assert_eq!(result.current_year, chrono::Local::now().year());
    }

    #[tokio::test]
    async fn test_load_only_writes_requested_formats() {
        let pipeline = pipeline(&["tsv"], Some(2024));
        let result = pipeline.transform(sample_data()).await.unwrap();

        let path = pipeline.load(result).await.unwrap();
        assert!(path.ends_with("bundle.zip"));

        let bytes = pipeline.storage.read_file("bundle.zip").await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names, vec![TSV_ENTRY]);
    }

    #[tokio::test]
    async fn test_extract_accepts_catalogue_without_categories() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let data_path = temp_dir.path().join("cv.json");
        std::fs::write(&data_path, r#"{"skills": {"introduction": ["Intro."]}}"#).unwrap();

        let mut pipeline = pipeline(&["csv"], Some(2024));
        pipeline.config.data = data_path.to_str().unwrap().to_string();

        let data = pipeline.extract().await.unwrap();
        assert!(data.skills.catalogue.is_empty());
        assert!(data.skills.introduction.is_none());
    }

    #[tokio::test]
    async fn test_empty_catalogue_gives_header_only_table() {
        let data = CvData {
            personal_info: None,
            skills: SkillsSection::default(),
            projects: Vec::new(),
        };

        let result = pipeline(&["csv"], Some(2024)).transform(data).await.unwrap();

        assert!(result.skills_matrix.is_empty());
        assert_eq!(result.csv_output, "Category,Skill,Years,Last Used\n");
    }
}
