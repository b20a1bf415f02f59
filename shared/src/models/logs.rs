//! Server log export
//!
//! The backend exports its log asynchronously: a task is created, its status
//! polled, and the file fetched once the task is ready.

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Export task state, sent as a bare uppercase word
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogTaskStatus {
    #[default]
    Created,
    Processing,
    Ready,
    Cancelled,
    Failed,
}

impl LogTaskStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Processing => "PROCESSING",
            Self::Ready => "READY",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
        }
    }

    /// No further change will happen
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Ready | Self::Cancelled | Self::Failed)
    }
}

impl fmt::Display for LogTaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogTaskStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(Self::Created),
            "PROCESSING" => Ok(Self::Processing),
            "READY" => Ok(Self::Ready),
            "CANCELLED" => Ok(Self::Cancelled),
            "FAILED" => Ok(Self::Failed),
            other => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Unknown log task status: {}", other),
            )
            .with_detail("status", other)),
        }
    }
}
