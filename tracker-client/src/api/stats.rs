//! `/statistics` endpoints (visit counters kept by the backend)

use super::query_pair;
use crate::{ClientResult, HttpClient};
use shared::models::VisitCounts;

pub struct StatsApi<'a, C> {
    http: &'a C,
}

impl<'a, C: HttpClient> StatsApi<'a, C> {
    pub(crate) fn new(http: &'a C) -> Self {
        Self { http }
    }

    /// Visit count per URL
    pub async fn all(&self) -> ClientResult<VisitCounts> {
        self.http.get("statistics").await
    }

    pub async fn for_url(&self, url: &str) -> ClientResult<u64> {
        self.http
            .get(&format!("statistics/single-stat?{}", query_pair("url", url)))
            .await
    }

    /// Human-readable summary of the most visited URL
    pub async fn top_visited(&self) -> ClientResult<String> {
        self.http.get_text("statistics/top-visited").await
    }
}
