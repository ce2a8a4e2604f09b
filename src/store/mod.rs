//! Report persistence boundary.
//!
//! The pipeline only ever reads a user's prior reports (duplicate check)
//! and appends new ones; reports are immutable snapshots deleted solely by
//! explicit user action. Durable storage lives behind [`ReportStore`] in
//! the consuming service; the in-memory implementation here backs the CLI
//! and tests.

use crate::analyzer::ReportData;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted analysis snapshot. Belongs to exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: ReportData,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// All reports owned by the user, for the duplicate scan.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Report>>;

    /// Persist a finished analysis as an immutable report.
    async fn create(&self, user_id: Uuid, data: ReportData) -> Result<Report>;

    /// Remove one report; true when it existed and belonged to the user.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool>;
}

/// Keeps reports per user in process memory.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: DashMap<Uuid, Vec<Report>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Report>> {
        Ok(self
            .reports
            .get(&user_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn create(&self, user_id: Uuid, data: ReportData) -> Result<Report> {
        let report = Report {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
            data,
        };
        self.reports
            .entry(user_id)
            .or_default()
            .push(report.clone());
        Ok(report)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        match self.reports.get_mut(&user_id) {
            Some(mut entry) => {
                let before = entry.len();
                entry.retain(|r| r.id != id);
                Ok(entry.len() != before)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{ReportData, ReportType};
    use crate::document::Headings;
    use crate::links::LinkStats;
    use crate::metrics::images::ImageAudit;
    use crate::metrics::sentiment::Sentiment;
    use crate::score::ScoreBreakdown;

    fn sample_data(title: &str) -> ReportData {
        ReportData {
            kind: ReportType::Text,
            input: "Pasted content".to_string(),
            url: None,
            title: Some(title.to_string()),
            meta_description: None,
            headings: Headings::default(),
            word_count: 3,
            thin_content: true,
            readability_score: 80,
            sentiment: Sentiment::neutral(),
            keywords: Vec::new(),
            keyword_density: Vec::new(),
            primary_keyword: None,
            images: ImageAudit {
                total: 0,
                with_alt: 0,
                alt_coverage: 100,
                suggestion: None,
            },
            link_stats: LinkStats::default(),
            broken_links: Vec::new(),
            broken_count: 0,
            duplicate_title: false,
            duplicate_meta: false,
            suggestions: Vec::new(),
            score: 40,
            breakdown: ScoreBreakdown::default(),
        }
    }

    #[tokio::test]
    async fn create_then_find_roundtrip() {
        let store = InMemoryReportStore::new();
        let user = Uuid::new_v4();

        let created = store.create(user, sample_data("One")).await.unwrap();
        let found = store.find_by_user(user).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, created.id);
        assert_eq!(found[0].data.title.as_deref(), Some("One"));
    }

    #[tokio::test]
    async fn reports_are_scoped_to_their_owner() {
        let store = InMemoryReportStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.create(alice, sample_data("Alice's page")).await.unwrap();
        assert!(store.find_by_user(bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_requires_matching_owner() {
        let store = InMemoryReportStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let report = store.create(owner, sample_data("Mine")).await.unwrap();
        assert!(!store.delete(report.id, stranger).await.unwrap());
        assert!(store.delete(report.id, owner).await.unwrap());
        assert!(store.find_by_user(owner).await.unwrap().is_empty());
    }
}
