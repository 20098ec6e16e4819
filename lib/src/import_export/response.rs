use super::import::{ImportSource, ImportSummary};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Body returned to the client after an upload, plus the status it goes with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip)]
    pub status: u16,
}

impl ImportResponse {
    pub fn from_result(result: &Result<ImportSummary>, source: ImportSource) -> Self {
        match result {
            Ok(summary) => Self {
                success: true,
                message: summary.message(source),
                status: 200,
            },
            Err(err) => {
                let status = err.status_code();
                let message = if status == 500 {
                    format!("Error importing bookmarks: {}", err)
                } else {
                    err.to_string()
                };
                Self {
                    success: false,
                    message,
                    status,
                }
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
