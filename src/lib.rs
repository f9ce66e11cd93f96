pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use core::{etl::AssemblyEngine, pipeline::CvPipeline};
pub use domain::model::{CvData, Project, SkillCatalogue, SkillCategory, SkillRow, YearSpan};
pub use domain::services::build_skills_table;
pub use utils::error::{AssemblyError, Result};
