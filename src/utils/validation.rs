use crate::utils::error::{AssemblyError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Bundle entries the load phase knows how to write.
pub const SUPPORTED_OUTPUT_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

static DOCUMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("document id pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn is_remote_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AssemblyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AssemblyError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AssemblyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(AssemblyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AssemblyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A data source is either an http(s) URL or a local path.
pub fn validate_data_source(field_name: &str, source: &str) -> Result<()> {
    if is_remote_source(source) {
        validate_url(field_name, source)
    } else {
        validate_path(field_name, source)
    }
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(AssemblyError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        if !SUPPORTED_OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(AssemblyError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AssemblyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AssemblyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Extracts the document id from a Google Docs URL (`.../d/<id>/edit`).
pub fn document_id_from_url(field_name: &str, url: &str) -> Result<String> {
    DOCUMENT_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| AssemblyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url.to_string(),
            reason: "Invalid Google Docs URL format".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.data", "https://example.com/cv.json").is_ok());
        assert!(validate_url("source.data", "http://example.com").is_ok());
        assert!(validate_url("source.data", "").is_err());
        assert!(validate_url("source.data", "invalid-url").is_err());
        assert!(validate_url("source.data", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_data_source() {
        assert!(validate_data_source("source.data", "data/template.json").is_ok());
        assert!(validate_data_source("source.data", "https://example.com/cv.json").is_ok());
        assert!(validate_data_source("source.data", "   ").is_err());
        assert!(validate_data_source("source.data", "https://").is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_output_formats("load.output_formats", &formats).is_ok());
        assert!(validate_output_formats("load.output_formats", &["docx".to_string()]).is_err());
        assert!(validate_output_formats("load.output_formats", &[]).is_err());
    }

    #[test]
    fn test_validate_year_range() {
        assert!(validate_range("matrix.current_year", 2024, MIN_YEAR, MAX_YEAR).is_ok());
        assert!(validate_range("matrix.current_year", 24, MIN_YEAR, MAX_YEAR).is_err());
    }

    #[test]
    fn test_document_id_from_url() {
        let id = document_id_from_url(
            "templates.listpage_url",
            "https://docs.google.com/document/d/1W_OfVU_G8dr-MZOk9Cjw/edit?tab=t.0",
        )
        .unwrap();
        assert_eq!(id, "1W_OfVU_G8dr-MZOk9Cjw");
        assert!(document_id_from_url("templates.listpage_url", "https://docs.google.com/").is_err());
    }
}
