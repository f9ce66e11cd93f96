pub mod cv_pipeline;
