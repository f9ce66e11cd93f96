use crate::domain::model::{AssemblyResult, CvData};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Local path or http(s) URL of the CV data file.
    fn data_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// Year that `"present"` resolves to; `None` means the local clock.
    fn current_year(&self) -> Option<i32>;
    fn text_template(&self) -> Option<&str>;
    fn bundle_filename(&self) -> &str;

    fn request_timeout_seconds(&self) -> Option<u64> {
        None
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CvData>;
    async fn transform(&self, data: CvData) -> Result<AssemblyResult>;
    async fn load(&self, result: AssemblyResult) -> Result<String>;
}
