//! `/logs` endpoints: date-filtered server log and asynchronous export
//!
//! Every endpoint here answers with plain text, not JSON.

use super::{path_segment, query_pair};
use crate::{ClientError, ClientResult, HttpClient};
use shared::models::LogTaskStatus;
use shared::validation::validate_log_date;

pub struct LogsApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> LogsApi<'a, C> {
    pub(crate) fn new(http: &'a C) -> Self {
        Self { http }
    }

    /// Log lines mentioning `date` (`YYYY-MM-DD`)
    ///
    /// The server answers 404 when no line matches.
    pub async fn view(&self, date: &str) -> ClientResult<String> {
        validate_log_date(date)?;
        self.http
            .get_text(&format!("logs/view?{}", query_pair("date", date)))
            .await
    }

    /// Same lines as [`view`](Self::view), served as a file attachment
    pub async fn download(&self, date: &str) -> ClientResult<String> {
        validate_log_date(date)?;
        self.http
            .get_text(&format!("logs/download?{}", query_pair("date", date)))
            .await
    }

    /// Start an export; returns the new task's id
    pub async fn create_task(&self) -> ClientResult<String> {
        let id = self.http.post_text("logs").await?;
        let id = id.trim();
        if id.is_empty() {
            return Err(ClientError::InvalidResponse("logs: empty task id".into()));
        }
        tracing::debug!(task_id = id, "Log export started");
        Ok(id.to_string())
    }

    pub async fn task_status(&self, id: &str) -> ClientResult<LogTaskStatus> {
        let text = self
            .http
            .get_text(&format!("logs/{}/status", path_segment(id)))
            .await?;
        text.parse::<LogTaskStatus>()
            .map_err(|e| ClientError::InvalidResponse(e.message))
    }

    /// Exported file contents; 404 until the task is ready
    pub async fn task_file(&self, id: &str) -> ClientResult<String> {
        self.http
            .get_text(&format!("logs/{}/file", path_segment(id)))
            .await
    }
}
