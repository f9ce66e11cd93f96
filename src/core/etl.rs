use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline's extract, transform and load phases in order.
pub struct AssemblyEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AssemblyEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting CV assembly...");

        tracing::info!("Extracting CV data...");
        let data = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} skill categories and {} projects",
            data.skills.catalogue.categories.len(),
            data.projects.len()
        );
        self.monitor.log_stats("Extract");

        tracing::info!("Building skills matrix and template sections...");
        let result = self.pipeline.transform(data).await?;
        tracing::info!(
            "Built {} skills matrix rows and {} project sections (current year {})",
            result.skills_matrix.len(),
            result.project_sections.len(),
            result.current_year
        );
        self.monitor.log_stats("Transform");

        tracing::info!("Writing bundle...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
