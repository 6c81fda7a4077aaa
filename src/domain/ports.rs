use crate::core::encoding::DiagramVariant;
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

/// Interactive question/answer capability handed to the editor.
pub trait Prompter {
    /// Free-text question. An empty answer yields `default`.
    fn input(&mut self, message: &str, default: &str) -> Result<String>;

    /// Single choice among `choices`; returns the chosen index.
    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> Result<usize>;

    /// Informational output (listings, help).
    fn say(&mut self, text: &str) -> Result<()>;
}

#[async_trait]
pub trait DiagramFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn output_dir(&self) -> &str;
    fn data_file(&self) -> &str;
    fn diagram_file(&self) -> &str;
    fn server(&self) -> &str;
    fn variant(&self) -> DiagramVariant;
    fn download(&self) -> bool;
}
