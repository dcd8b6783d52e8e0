use crate::domain::model::{Fragment, MergeResult};
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
    fn fragment_files(&self) -> &[String];
    fn target_file(&self) -> &str;
    fn declaration_name(&self) -> &str;
    fn end_anchor(&self) -> &str;
    fn check_only(&self) -> bool;
    fn report_json(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Fragment>>;
    async fn transform(&self, fragments: Vec<Fragment>) -> Result<MergeResult>;
    async fn load(&self, result: MergeResult) -> Result<String>;
}
