use crate::core::notify::DEFAULT_NOTIFICATION_TTL;
use crate::core::ConfigProvider;
use crate::domain::model::Semester;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{validate_path, validate_positive_number, validate_unique, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "gpa-tracker.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub semesters: SemesterConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means requests wait indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterConfig {
    #[serde(default = "default_semester_ids")]
    pub ids: Vec<u32>,
}

impl Default for SemesterConfig {
    fn default() -> Self {
        Self {
            ids: default_semester_ids(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_report_filename")]
    pub report_filename: String,
    #[serde(default = "default_transcript_filename")]
    pub transcript_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            report_filename: default_report_filename(),
            transcript_filename: default_transcript_filename(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_semester_ids() -> Vec<u32> {
    (1..=8).collect()
}

fn default_ttl_ms() -> u64 {
    DEFAULT_NOTIFICATION_TTL.as_millis() as u64
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_report_filename() -> String {
    "GPA_Report.xlsx".to_string()
}

fn default_transcript_filename() -> String {
    "GPA_Transcript.csv".to_string()
}

impl TrackerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| TrackerError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| TrackerError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn semesters(&self) -> Vec<Semester> {
        self.semesters.ids.iter().copied().map(Semester).collect()
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notifications.ttl_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }
}

impl ConfigProvider for TrackerConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn report_filename(&self) -> &str {
        &self.export.report_filename
    }

    fn transcript_filename(&self) -> &str {
        &self.export.transcript_filename
    }
}

impl Validate for TrackerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }
        validate_unique("semesters.ids", &self.semesters.ids)?;
        validate_positive_number("notifications.ttl_ms", self.notifications.ttl_ms, 1)?;
        validate_path("export.output_path", &self.export.output_path)?;
        validate_path("export.report_filename", &self.export.report_filename)?;
        validate_path("export.transcript_filename", &self.export.transcript_filename)?;
        Ok(())
    }
}
