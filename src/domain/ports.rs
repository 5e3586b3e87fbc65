use crate::domain::model::{GradeRecord, Subject};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn report_filename(&self) -> &str;
    fn transcript_filename(&self) -> &str;
}

/// Backend REST surface used by the coordinator.
#[async_trait]
pub trait GradeApi: Send + Sync {
    /// `GET /api/subjects`
    async fn fetch_subjects(&self) -> Result<Vec<Subject>>;
    /// `POST /api/grades`; any 2xx is success and the body is ignored.
    async fn submit_grade(&self, record: &GradeRecord) -> Result<()>;
    /// `GET /api/grades`
    async fn fetch_grades(&self) -> Result<Vec<GradeRecord>>;
    /// `GET /api/export-excel`
    async fn export_report(&self) -> Result<Vec<u8>>;
}
