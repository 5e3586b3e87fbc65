use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::domain::model::{GradeRecord, Subject};
use crate::domain::ports::GradeApi;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::validate_url;

pub const SUBJECTS_PATH: &str = "/api/subjects";
pub const GRADES_PATH: &str = "/api/grades";
pub const EXPORT_PATH: &str = "/api/export-excel";

/// [`GradeApi`] over HTTP. No retries; a failed call is reported once.
#[derive(Debug, Clone)]
pub struct HttpGradeApi {
    base_url: String,
    client: Client,
}

impl HttpGradeApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Without a timeout a call that never resolves keeps waiting.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        validate_url("api.base_url", base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check_status(url: &str, response: Response) -> Result<Response> {
        tracing::debug!("API response status: {}", response.status());
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(TrackerError::HttpStatusError {
                endpoint: url.to_string(),
                status: response.status().as_u16(),
            })
        }
    }
}

#[async_trait]
impl GradeApi for HttpGradeApi {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
        let url = self.endpoint(SUBJECTS_PATH);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let subjects = Self::check_status(&url, response)?.json().await?;
        Ok(subjects)
    }

    async fn submit_grade(&self, record: &GradeRecord) -> Result<()> {
        let url = self.endpoint(GRADES_PATH);
        tracing::debug!("Posting grade for {} to: {}", record.subject, url);

        let response = self.client.post(&url).json(record).send().await?;
        Self::check_status(&url, response)?;
        Ok(())
    }

    async fn fetch_grades(&self) -> Result<Vec<GradeRecord>> {
        let url = self.endpoint(GRADES_PATH);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let records = Self::check_status(&url, response)?.json().await?;
        Ok(records)
    }

    async fn export_report(&self) -> Result<Vec<u8>> {
        let url = self.endpoint(EXPORT_PATH);
        tracing::debug!("Downloading report from: {}", url);

        let response = self.client.get(&url).send().await?;
        let bytes = Self::check_status(&url, response)?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
