pub use crate::app::pipelines::cv_pipeline::CvPipeline;
