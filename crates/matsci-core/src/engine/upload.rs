//! Upload of an input file to the calculations repository.
//!
//! This module only shapes the request and tracks its status; the HTTP call itself
//! belongs to the front end. A failed upload is reported once and never retried.

use serde::Serialize;
use std::fmt;

pub const DEFAULT_ENDPOINT: &str = "/api/upload-to-github";
pub const DEFAULT_REPOSITORY: &str = "fablib250/calculations_QE";
pub const UPLOAD_FAILED: &str = "Failed to upload file to GitHub";
pub const UPLOAD_SUCCEEDED: &str = "File uploaded to GitHub successfully";

/// JSON body of the upload POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRequest {
    pub content: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub repo: String,
}

impl UploadRequest {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_name: file_name.into(),
            repo: DEFAULT_REPOSITORY.to_string(),
        }
    }

    pub fn with_repository(mut self, repo: impl Into<String>) -> Self {
        self.repo = repo.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error(String),
}

impl UploadStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, UploadStatus::Uploading)
    }

    /// Outcomes only land while a request is in flight; anything else is ignored.
    pub fn apply(self, event: UploadEvent) -> Self {
        match (self, event) {
            (_, UploadEvent::Start) => UploadStatus::Uploading,
            (UploadStatus::Uploading, UploadEvent::Succeeded) => UploadStatus::Success,
            (UploadStatus::Uploading, UploadEvent::Failed(message)) => UploadStatus::Error(message),
            (status, _) => status,
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStatus::Idle => f.write_str("idle"),
            UploadStatus::Uploading => f.write_str("Uploading..."),
            UploadStatus::Success => f.write_str(UPLOAD_SUCCEEDED),
            UploadStatus::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Start,
    Succeeded,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_file_name() {
        let req = UploadRequest::new("scf.in", "&CONTROL\n/");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "content": "&CONTROL\n/",
                "fileName": "scf.in",
                "repo": "fablib250/calculations_QE",
            })
        );
    }

    #[test]
    fn status_goes_idle_uploading_then_terminal() {
        let status = UploadStatus::default().apply(UploadEvent::Start);
        assert!(status.is_busy());
        assert_eq!(status.clone().apply(UploadEvent::Succeeded), UploadStatus::Success);
        assert_eq!(
            status.apply(UploadEvent::Failed(UPLOAD_FAILED.into())),
            UploadStatus::Error(UPLOAD_FAILED.into())
        );
    }

    #[test]
    fn outcomes_without_a_request_are_ignored() {
        assert_eq!(
            UploadStatus::Idle.apply(UploadEvent::Succeeded),
            UploadStatus::Idle
        );
        let failed = UploadStatus::Error("x".into());
        assert_eq!(failed.clone().apply(UploadEvent::Succeeded), failed);
        assert_eq!(failed.apply(UploadEvent::Start), UploadStatus::Uploading);
    }
}
